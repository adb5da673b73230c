//! Display helpers for analysis results.

use regex::Regex;
use std::collections::BTreeMap;
use std::sync::OnceLock;

use crate::analysis::model::UserCount;

const NOT_AVAILABLE: &str = "N/A";

fn phone_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^\+\d+\s?\d[\d\s-]{5,}$").expect("static regex"))
}

/// Whether a chat participant name is really a phone number.
pub fn is_phone_number(name: &str) -> bool {
    phone_pattern().is_match(name)
}

/// Phone numbers are shown whole; other names by their first word.
pub fn display_name(name: &str) -> &str {
    if is_phone_number(name) {
        name
    } else {
        name.split(' ').next().unwrap_or(name)
    }
}

/// `21` → `"9 PM"`; out-of-range or missing → `"N/A"`.
pub fn format_peak_hour(hour: Option<i64>) -> String {
    match hour {
        Some(h @ 0..=23) => {
            let suffix = if h >= 12 { "PM" } else { "AM" };
            let display = if h % 12 == 0 { 12 } else { h % 12 };
            format!("{} {}", display, suffix)
        }
        _ => NOT_AVAILABLE.to_string(),
    }
}

/// `"Ana (12 times)"`.
pub fn format_first_text_champion(champion: &UserCount) -> String {
    match champion.user.as_deref() {
        Some(user) if !user.is_empty() => {
            format!("{} ({} times)", display_name(user), champion.count)
        }
        _ => NOT_AVAILABLE.to_string(),
    }
}

/// The most ignored participant, e.g. `"Ben (41.5%)"`. Ties go to the first user.
pub fn format_most_ignored(ignored: &BTreeMap<String, f64>) -> String {
    ignored
        .iter()
        .min_by(|(_, a), (_, b)| b.total_cmp(a))
        .map(|(user, pct)| format!("{} ({:.1}%)", display_name(user), pct))
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}
