//! Injected pipeline configuration: city allow-list, phone format, date
//! lexicons and late-cutoff thresholds, name-quality rules.
//!
//! `Default` carries the production values for Yemeni intercity groups.

use std::ops::RangeInclusive;

use anyhow::{Context, Result};
use chrono::{NaiveDate, Weekday};
use chrono_tz::Tz;

/// All rules the trip pipeline consults.
#[derive(Debug, Clone)]
pub struct TripRules {
    /// Official station names recognized by the backend.
    pub official_cities: Vec<String>,
    /// Colloquial spelling -> official name. Only fed to the extraction prompt.
    pub city_aliases: Vec<(String, String)>,
    pub phone: PhoneRules,
    pub dates: DateRules,
    pub names: NameRules,
}

impl Default for TripRules {
    fn default() -> Self {
        Self {
            official_cities: strings(&[
                "سيئون", "المكلا", "عدن", "عتق", "بيحان", "تريم", "صنعاء", "الحديدة", "تعز", "مأرب",
                "الحوبان", "القطن",
            ]),
            city_aliases: vec![
                ("سيون".to_string(), "سيئون".to_string()),
                ("سيؤن".to_string(), "سيئون".to_string()),
                ("صنعا".to_string(), "صنعاء".to_string()),
                ("شبوة".to_string(), "عتق".to_string()),
                ("المكلاء".to_string(), "المكلا".to_string()),
            ],
            phone: PhoneRules::default(),
            dates: DateRules::default(),
            names: NameRules::default(),
        }
    }
}

impl TripRules {
    pub fn is_official_city(&self, name: &str) -> bool {
        let name = name.trim();
        self.official_cities.iter().any(|c| c == name)
    }
}

// =============================================================================
// Phones
// =============================================================================

#[derive(Debug, Clone)]
pub struct PhoneRules {
    /// Country calling code stripped from international numbers.
    pub country_code: String,
    /// Digit count of a local mobile number.
    pub local_length: usize,
    /// Valid leading digit pairs of a local mobile number.
    pub mobile_prefixes: Vec<String>,
    /// Suffix marking an anonymized chat identifier (no recoverable number).
    pub anonymized_marker: String,
}

impl Default for PhoneRules {
    fn default() -> Self {
        Self {
            country_code: "967".to_string(),
            local_length: 9,
            mobile_prefixes: strings(&["70", "71", "73", "77", "78"]),
            anonymized_marker: "@lid".to_string(),
        }
    }
}

// =============================================================================
// Dates
// =============================================================================

/// A keyword that matches when every fragment occurs as a whole word in the
/// (lowercased) expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Keyword(Vec<String>);

impl Keyword {
    pub fn phrase(text: &str) -> Self {
        Self(vec![text.to_lowercase()])
    }

    pub fn all_of(fragments: &[&str]) -> Self {
        Self(fragments.iter().map(|f| f.to_lowercase()).collect())
    }

    pub fn matches(&self, lowercased: &str) -> bool {
        !self.0.is_empty() && self.0.iter().all(|f| contains_word(lowercased, f))
    }
}

/// Whether `needle` occurs with no letter or digit directly on either side.
fn contains_word(haystack: &str, needle: &str) -> bool {
    haystack.match_indices(needle).any(|(start, found)| {
        let before = haystack[..start].chars().next_back();
        let after = haystack[start + found.len()..].chars().next();
        !before.is_some_and(char::is_alphanumeric) && !after.is_some_and(char::is_alphanumeric)
    })
}

/// Bilingual keyword sets for relative dates and weekday names.
#[derive(Debug, Clone)]
pub struct DateLexicon {
    pub day_after_tomorrow: Vec<Keyword>,
    pub tomorrow: Vec<Keyword>,
    pub today: Vec<Keyword>,
    pub weekdays: Vec<(String, Weekday)>,
}

impl Default for DateLexicon {
    fn default() -> Self {
        Self {
            day_after_tomorrow: vec![
                Keyword::all_of(&["after", "tomorrow"]),
                Keyword::phrase("بعد بكرة"),
                Keyword::phrase("بعد بكره"),
                Keyword::phrase("بعد بكرا"),
                Keyword::phrase("بعد غد"),
                Keyword::phrase("بعد الغد"),
            ],
            tomorrow: vec![
                Keyword::phrase("tomorrow"),
                Keyword::phrase("غدا"),
                Keyword::phrase("غد"),
                Keyword::phrase("بكرة"),
                Keyword::phrase("بكره"),
                Keyword::phrase("بكرا"),
            ],
            today: vec![Keyword::phrase("today"), Keyword::phrase("اليوم")],
            weekdays: vec![
                ("السبت".to_string(), Weekday::Sat),
                ("الاحد".to_string(), Weekday::Sun),
                ("الأحد".to_string(), Weekday::Sun),
                ("الاثنين".to_string(), Weekday::Mon),
                ("الإثنين".to_string(), Weekday::Mon),
                ("الثلاثاء".to_string(), Weekday::Tue),
                ("الثلاثا".to_string(), Weekday::Tue),
                ("الاربعاء".to_string(), Weekday::Wed),
                ("الأربعاء".to_string(), Weekday::Wed),
                ("الخميس".to_string(), Weekday::Thu),
                ("الجمعه".to_string(), Weekday::Fri),
                ("الجمعة".to_string(), Weekday::Fri),
                ("saturday".to_string(), Weekday::Sat),
                ("sunday".to_string(), Weekday::Sun),
                ("monday".to_string(), Weekday::Mon),
                ("tuesday".to_string(), Weekday::Tue),
                ("wednesday".to_string(), Weekday::Wed),
                ("thursday".to_string(), Weekday::Thu),
                ("friday".to_string(), Weekday::Fri),
            ],
        }
    }
}

/// An inclusive range of local dates during which the fasting cutoff applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FastingPeriod {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl FastingPeriod {
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Parse `YYYY-MM-DD..YYYY-MM-DD`.
    pub fn parse(raw: &str) -> Result<Self> {
        let (start, end) = raw
            .split_once("..")
            .with_context(|| format!("fasting period '{}' must look like START..END", raw))?;
        let start = NaiveDate::parse_from_str(start.trim(), "%Y-%m-%d")
            .with_context(|| format!("invalid fasting period start in '{}'", raw))?;
        let end = NaiveDate::parse_from_str(end.trim(), "%Y-%m-%d")
            .with_context(|| format!("invalid fasting period end in '{}'", raw))?;
        anyhow::ensure!(start <= end, "fasting period '{}' ends before it starts", raw);
        Ok(Self { start, end })
    }

    /// Parse a comma-separated list of periods. Blank input yields none.
    pub fn parse_list(raw: &str) -> Result<Vec<Self>> {
        raw.split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(Self::parse)
            .collect()
    }
}

#[derive(Debug, Clone)]
pub struct DateRules {
    /// Timezone of the operating region; "today" means today there.
    pub timezone: Tz,
    /// Hour (local) from which an undated post is taken to mean tomorrow.
    pub late_cutoff_hour: u32,
    /// Same threshold while a fasting period is in effect.
    pub fasting_cutoff_hour: u32,
    pub fasting_periods: Vec<FastingPeriod>,
    pub lexicon: DateLexicon,
}

impl Default for DateRules {
    fn default() -> Self {
        Self {
            timezone: chrono_tz::Asia::Aden,
            late_cutoff_hour: 20,
            fasting_cutoff_hour: 15,
            fasting_periods: vec![FastingPeriod {
                start: NaiveDate::from_ymd_opt(2026, 2, 18).unwrap_or_default(),
                end: NaiveDate::from_ymd_opt(2026, 3, 20).unwrap_or_default(),
            }],
            lexicon: DateLexicon::default(),
        }
    }
}

impl DateRules {
    pub fn is_fasting_period(&self, date: NaiveDate) -> bool {
        self.fasting_periods.iter().any(|p| p.contains(date))
    }

    pub fn cutoff_hour_for(&self, date: NaiveDate) -> u32 {
        if self.is_fasting_period(date) {
            self.fasting_cutoff_hour
        } else {
            self.late_cutoff_hour
        }
    }
}

// =============================================================================
// Names
// =============================================================================

#[derive(Debug, Clone)]
pub struct NameRules {
    /// Letters a good name is written in (plus whitespace).
    pub script: RangeInclusive<char>,
    /// Minimum number of tokens longer than one character.
    pub min_tokens: usize,
    /// Leading words that mark a nickname ("father of ...").
    pub nickname_prefixes: Vec<String>,
}

impl Default for NameRules {
    fn default() -> Self {
        Self {
            script: '\u{0600}'..='\u{06FF}',
            min_tokens: 2,
            nickname_prefixes: strings(&["ابو", "أبو", "بو"]),
        }
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
