use serde::Deserialize;

/// Successful response from the shadow-trip endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ShadowTripResponse {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub created_count: u32,
    #[serde(default)]
    pub error_count: u32,
    #[serde(default)]
    pub trips: Vec<CreatedTrip>,
}

impl ShadowTripResponse {
    /// Id of the first created trip, if the backend reported one.
    pub fn first_trip_id(&self) -> Option<String> {
        self.trips.first().and_then(|t| t.id.as_ref()).map(|id| match id {
            serde_json::Value::String(s) => s.clone(),
            other => other.to_string(),
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreatedTrip {
    #[serde(default)]
    pub id: Option<serde_json::Value>,
}

/// Body of a 400 response.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub errors: Vec<ApiErrorEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorEntry {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub field: Option<String>,
}
