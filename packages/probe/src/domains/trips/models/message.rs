use serde::{Deserialize, Serialize};

/// A chat message that passed the inbound filter, already routed to an operator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawMessage {
    pub text: String,
    pub sender_display_name: String,
    /// Phone JID or bare number of the sender; may be an anonymized id.
    pub sender_identifier: String,
    pub group_identifier: String,
    pub routed_operator_id: String,
    pub default_origin_city: Option<String>,
}

impl RawMessage {
    pub fn new(text: impl Into<String>, sender_display_name: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            sender_display_name: sender_display_name.into(),
            sender_identifier: String::new(),
            group_identifier: String::new(),
            routed_operator_id: String::new(),
            default_origin_city: None,
        }
    }

    pub fn with_sender_identifier(mut self, identifier: impl Into<String>) -> Self {
        self.sender_identifier = identifier.into();
        self
    }

    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.group_identifier = group.into();
        self
    }

    pub fn with_operator(mut self, operator_id: impl Into<String>) -> Self {
        self.routed_operator_id = operator_id.into();
        self
    }

    pub fn with_default_origin(mut self, city: impl Into<String>) -> Self {
        self.default_origin_city = Some(city.into());
        self
    }
}
