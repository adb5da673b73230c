//! Typed view of the analysis payload produced by the backends.
//!
//! Every field defaults when absent; the backend owns the schema and the
//! gateway forwards it untouched, so consumers decode leniently.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisResults {
    pub chat_name: Option<String>,
    pub stats: Stats,
    #[serde(deserialize_with = "lenient_ai_analysis")]
    pub ai_analysis: Option<AiAnalysis>,
    pub processing_time_seconds: Option<f64>,
    pub error: Option<String>,
}

impl AnalysisResults {
    pub fn from_value(value: Value) -> serde_json::Result<Self> {
        serde_json::from_value(value)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Stats {
    pub total_messages: u64,
    pub days_active: Option<u64>,
    pub user_message_count: BTreeMap<String, u64>,
    pub most_active_users_pct: BTreeMap<String, f64>,
    pub conversation_starters_pct: BTreeMap<String, f64>,
    pub most_ignored_users_pct: BTreeMap<String, f64>,
    pub first_text_champion: UserCount,
    pub longest_monologue: UserCount,
    pub common_words: BTreeMap<String, u64>,
    pub common_emojis: BTreeMap<String, u64>,
    pub average_response_time_minutes: f64,
    pub peak_hour: Option<i64>,
    pub user_monthly_activity: Vec<MonthlySeries>,
    pub weekday_vs_weekend_avg: WeekdayWeekend,
    /// Square matrix; cells may be names, counts or null.
    pub user_interaction_matrix: Option<Vec<Vec<Value>>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserCount {
    pub user: Option<String>,
    pub count: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MonthlySeries {
    pub id: String,
    pub data: Vec<MonthlyPoint>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MonthlyPoint {
    pub x: String,
    pub y: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeekdayWeekend {
    pub average_weekday_messages: f64,
    pub average_weekend_messages: f64,
    pub difference: f64,
    pub percentage_difference: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AiAnalysis {
    pub summary: String,
    pub people: Vec<PersonProfile>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PersonProfile {
    pub name: String,
    pub animal: String,
    pub description: String,
    pub fun_lines: Vec<String>,
}

/// Accept `ai_analysis` as an object, as a JSON string holding an object
/// (double-encoded), or as null. Anything undecodable becomes `None`.
fn lenient_ai_analysis<'de, D>(deserializer: D) -> Result<Option<AiAnalysis>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Value::deserialize(deserializer)?;
    Ok(decode_ai_analysis(raw))
}

fn decode_ai_analysis(raw: Value) -> Option<AiAnalysis> {
    let value = match raw {
        Value::Null => return None,
        Value::String(encoded) => match serde_json::from_str::<Value>(&encoded) {
            Ok(inner) => inner,
            Err(e) => {
                tracing::warn!(error = %e, "ai_analysis string is not valid JSON");
                return None;
            }
        },
        other => other,
    };

    match serde_json::from_value(value) {
        Ok(analysis) => Some(analysis),
        Err(e) => {
            tracing::warn!(error = %e, "Ignoring undecodable ai_analysis");
            None
        }
    }
}
