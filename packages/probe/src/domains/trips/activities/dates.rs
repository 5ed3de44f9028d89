//! Date resolution for trip posts.
//!
//! Drivers write "بكرة", "الخميس", "after tomorrow" or nothing at all. Every
//! expression resolves to a concrete local calendar date; unparseable input
//! falls back to the late-cutoff default rule, so resolution never fails.

use chrono::{DateTime, Datelike, Duration, NaiveDate, Timelike, Weekday};
use chrono_tz::Tz;
use lazy_static::lazy_static;
use regex::Regex;

use crate::domains::trips::models::DateRules;

lazy_static! {
    static ref ISO_DATE_REGEX: Regex = Regex::new(r"^\d{4}-\d{2}-\d{2}$").unwrap();
}

/// How a date was arrived at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateSource {
    /// No expression; late-cutoff rule applied.
    Default,
    /// today / tomorrow / day after tomorrow keyword.
    Relative,
    /// Already an ISO calendar date.
    Iso,
    /// Named weekday.
    Weekday,
    /// Expression present but unparseable; late-cutoff rule applied.
    Fallback,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedDate {
    pub date: NaiveDate,
    pub source: DateSource,
}

impl ResolvedDate {
    pub fn iso(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }
}

/// The date an undated post refers to: tomorrow once the local hour reaches
/// the cutoff (lower during a fasting period), otherwise today.
pub fn default_date(now: &DateTime<Tz>, rules: &DateRules) -> NaiveDate {
    let today = now.date_naive();
    if now.hour() >= rules.cutoff_hour_for(today) {
        today + Duration::days(1)
    } else {
        today
    }
}

/// Resolve an optional free-form date expression against `now`.
pub fn resolve_date(expression: Option<&str>, now: &DateTime<Tz>, rules: &DateRules) -> ResolvedDate {
    let today = now.date_naive();

    let Some(expression) = expression.map(str::trim).filter(|e| !e.is_empty()) else {
        return ResolvedDate {
            date: default_date(now, rules),
            source: DateSource::Default,
        };
    };

    let lowered = fold_expression(expression);
    let lexicon = &rules.lexicon;

    let relative = if lexicon.day_after_tomorrow.iter().any(|k| k.matches(&lowered)) {
        Some(2)
    } else if lexicon.tomorrow.iter().any(|k| k.matches(&lowered)) {
        Some(1)
    } else if lexicon.today.iter().any(|k| k.matches(&lowered)) {
        Some(0)
    } else {
        None
    };

    if let Some(offset) = relative {
        return ResolvedDate {
            date: today + Duration::days(offset),
            source: DateSource::Relative,
        };
    }

    if let Some(date) = parse_iso_date(expression) {
        return ResolvedDate {
            date,
            source: DateSource::Iso,
        };
    }

    if let Some(weekday) = lexicon
        .weekdays
        .iter()
        .find(|(name, _)| lowered.contains(name.to_lowercase().as_str()))
        .map(|(_, weekday)| *weekday)
    {
        return ResolvedDate {
            date: next_weekday(today, weekday),
            source: DateSource::Weekday,
        };
    }

    tracing::debug!(expression = %expression, "Date not resolved, applying default rule");
    ResolvedDate {
        date: default_date(now, rules),
        source: DateSource::Fallback,
    }
}

/// Lowercase and drop Arabic harakat and tatweel, so "غداً" reads as "غدا".
fn fold_expression(expression: &str) -> String {
    expression
        .chars()
        .filter(|c| !matches!(*c, '\u{064B}'..='\u{065F}' | '\u{0670}' | '\u{0640}'))
        .collect::<String>()
        .to_lowercase()
}

/// Strict `YYYY-MM-DD` that is also a real calendar date.
fn parse_iso_date(expression: &str) -> Option<NaiveDate> {
    if !ISO_DATE_REGEX.is_match(expression) {
        return None;
    }
    NaiveDate::parse_from_str(expression, "%Y-%m-%d").ok()
}

/// Today if it is that weekday, otherwise its next occurrence (1-6 days ahead).
fn next_weekday(today: NaiveDate, weekday: Weekday) -> NaiveDate {
    if today.weekday() == weekday {
        return today;
    }

    let current = today.weekday().num_days_from_monday() as i64;
    let target = weekday.num_days_from_monday() as i64;
    let mut offset = (target - current).rem_euclid(7);
    if offset == 0 {
        offset = 7;
    }
    today + Duration::days(offset)
}
