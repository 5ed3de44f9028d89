//! LLM prompts for trip extraction and driver-name refinement.

use chrono::DateTime;
use chrono_tz::Tz;

use crate::domains::trips::models::TripRules;

/// System message for every extraction-service call.
pub const SYSTEM_PROMPT: &str =
    "You are a data extraction system for a Yemeni bus company. Reply with a single JSON object and nothing else.";

/// Prompt for extracting a trip from one chat message.
pub const EXTRACT_TRIP_PROMPT: &str = r#"Today is **{weekday}, {today}**.
Current Time ({timezone}): **{time}**.
{season}
Sender Name: "**{sender}**".

Extract trip details from the text.

**CRITICAL RULES FOR CITIES**:
1. **Standardize Names**: Always map to the OFFICIAL Arabic name.
{aliases}
2. **Major City Priority**: If multiple cities are listed (e.g. "سيئون - تريم"), ONLY extract the MAJOR city ("سيئون").
3. **Official List**: [{cities}].

**CRITICAL RULES FOR DATE**:
- "بكره" / "بكرة" / "غداً" = Tomorrow
- "اليوم" = Today
- "بعد بكره" / "بعد بكرة" = Day after tomorrow
- If text says a DAY NAME (e.g. "الجمعه", "السبت", "الاحد"):
  * If that day is TODAY, return "Today"
  * If that day is TOMORROW, return "Tomorrow"
  * Otherwise compute the YYYY-MM-DD of the NEXT occurrence of that day
- If the text mentions a TIME PERIOD (e.g. "صباح", "بعد الظهر") but NO explicit date:
  * If that time has ALREADY PASSED today ({time}), the trip is for Tomorrow.
  * If that time is STILL COMING today, the trip is for Today.
- If NO date clue at all: return null
- Output the date field as: "Today", "Tomorrow", "After Tomorrow", or "YYYY-MM-DD"

**CRITICAL RULES FOR TIME**:
- Common Arabic time references:
  * "صباح" / "صباحاً" = "07:00"
  * "فجر" = "05:00"
  * "ظهر" / "بعد الظهر" = "12:00"
  * "عصر" / "بعد العصر" = "15:00"
  * "مساء" / "مساءً" = "18:00"
  * "ليل" = "21:00"
  * "بعد صلاة الجمعة" / "بعد صلاة الجمعه" = "13:30"
{season_times}- If an explicit clock time is mentioned (e.g. "الساعة 4", "3 عصراً"), convert to HH:MM 24h.
- Return null ONLY if the text has absolutely NO time or period reference.

**OTHER RULES**:
- **Driver Name**: Extract the Real Full Name (First + Last), in Arabic, at least 2 words.
  - Avoid nicknames like "ابو محمد" or "بو صالح" unless no other name exists.
  - If NO name is in the text, look at the Sender Name "{sender}".
  - If the text has "Ramzi Mkaram (Abu Hadi)", extract ONLY "رمزي مكارم".
- **candidate_phones**: Extract ALL phone numbers found as an array of strings.
- **vehicle_raw**: Extract the bus type exactly as written (e.g. "نوها", "فكسي", "قبة", "باص").

**CLASSIFICATION RULE**:
- "trip": the text announces a travel trip, bus schedule, or a driver seeking passengers.
- "invalid_ad": the text sells products, real estate, or is general spam.
- "question": a passenger asking for a trip rather than offering one.

Extract details into a JSON object:
- classification (string: "trip" | "invalid_ad" | "question")
- driver_name (string or null)
- candidate_phones (array of strings)
- from_city (string or null, OFFICIAL name only)
- to_city (string or null, OFFICIAL name only)
- date (string or null: "Today", "Tomorrow", "After Tomorrow", or "YYYY-MM-DD")
- time (string or null, HH:MM 24h)
- vehicle_raw (string or null)
- price (number or null)

Text to analyze: "{text}""#;

/// Prompt for refining a driver name.
pub const REFINE_NAME_PROMPT: &str = r#"I have a potentially incomplete driver name: "{extracted}"
And the Message Sender Name: "{sender}"

Task: Generate the Best Possible 2-Word Arabic Name for the driver.

Rules:
1. If "{extracted}" contains a real name (e.g. "Ahmed Ali"), return it in Arabic.
2. If it is a nickname (starts with Abu/Bu) or empty, check "{sender}".
3. If "{sender}" is a valid 2-word name (English or Arabic), convert it to Arabic and return it.
4. If you cannot find a valid 2-word name, return null.

Output JSON ONLY: { "refined_name": "string or null" }"#;

const FASTING_TIMES: &str = "- During Ramadan, additional time references:
  * \"بعد الإفطار\" / \"بعد الفطور\" = \"19:00\"
  * \"بعد التراويح\" = \"21:00\"
  * \"سحور\" / \"قبل السحور\" = \"03:00\"
";

/// Render the extraction prompt for a message received at `now`.
pub fn format_extract_prompt(
    text: &str,
    sender_name: &str,
    now: &DateTime<Tz>,
    rules: &TripRules,
) -> String {
    let fasting = rules.dates.is_fasting_period(now.date_naive());

    let aliases = rules
        .city_aliases
        .iter()
        .map(|(alias, official)| format!("   - \"{}\" -> \"{}\"", alias, official))
        .collect::<Vec<_>>()
        .join("\n");

    let season = if fasting {
        "It is currently **Ramadan** in Yemen."
    } else {
        ""
    };

    EXTRACT_TRIP_PROMPT
        .replace("{weekday}", &now.format("%A").to_string())
        .replace("{today}", &now.format("%Y-%m-%d").to_string())
        .replace("{timezone}", now.timezone().name())
        .replace("{time}", &now.format("%H:%M").to_string())
        .replace("{season_times}", if fasting { FASTING_TIMES } else { "" })
        .replace("{season}", season)
        .replace("{aliases}", &aliases)
        .replace("{cities}", &rules.official_cities.join(", "))
        .replace("{sender}", sender_name)
        .replace("{text}", text)
}

/// Render the name refinement prompt.
pub fn format_refine_name_prompt(extracted: &str, sender_name: &str) -> String {
    REFINE_NAME_PROMPT
        .replace("{extracted}", extracted)
        .replace("{sender}", sender_name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_extract_prompt_carries_context() {
        let rules = TripRules::default();
        let now = chrono_tz::Asia::Aden
            .with_ymd_and_hms(2026, 10, 19, 21, 5, 0)
            .unwrap();

        let prompt = format_extract_prompt("رحلة صنعاء عدن", "Saleh", &now, &rules);

        assert!(prompt.contains("Monday, 2026-10-19"));
        assert!(prompt.contains("Current Time (Asia/Aden): **21:05**"));
        assert!(prompt.contains("\"صنعا\" -> \"صنعاء\""));
        assert!(prompt.contains("القطن"));
        assert!(prompt.contains("Text to analyze: \"رحلة صنعاء عدن\""));
        assert!(!prompt.contains("Ramadan"));
        assert!(!prompt.contains('{'), "unfilled placeholder");
    }

    #[test]
    fn test_extract_prompt_mentions_fasting_period() {
        let rules = TripRules::default();
        let now = chrono_tz::Asia::Aden
            .with_ymd_and_hms(2026, 3, 1, 10, 0, 0)
            .unwrap();

        let prompt = format_extract_prompt("x", "y", &now, &rules);
        assert!(prompt.contains("It is currently **Ramadan**"));
        assert!(prompt.contains("بعد التراويح"));
    }

    #[test]
    fn test_refine_prompt() {
        let prompt = format_refine_name_prompt("ابو علي", "Ali Saleh");
        assert!(prompt.contains("incomplete driver name: \"ابو علي\""));
        assert!(prompt.contains("Sender Name: \"Ali Saleh\""));
        assert!(prompt.contains("refined_name"));
    }
}
