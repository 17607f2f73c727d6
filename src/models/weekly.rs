use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use super::lenient_string;

// ---------------------------------------------------------------------------
// WeeklyStatus: per-day goal outcome computed by the backend
// ---------------------------------------------------------------------------

/// Goal outcome for one day.
///
/// Any value other than `"achieved"` or `"not_achieved"` (including a missing
/// or non-string status) is read as [`WeeklyStatus::NoData`], so new states
/// added server-side degrade gracefully.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum WeeklyStatus {
    Achieved,
    NotAchieved,
    #[default]
    NoData,
}

impl WeeklyStatus {
    pub fn parse(raw: &str) -> Self {
        match raw {
            "achieved" => WeeklyStatus::Achieved,
            "not_achieved" => WeeklyStatus::NotAchieved,
            _ => WeeklyStatus::NoData,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            WeeklyStatus::Achieved => "achieved",
            WeeklyStatus::NotAchieved => "not_achieved",
            WeeklyStatus::NoData => "no_data",
        }
    }
}

impl Serialize for WeeklyStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for WeeklyStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Option::<Value>::deserialize(deserializer)?;
        Ok(match raw.as_ref().and_then(Value::as_str) {
            Some(s) => WeeklyStatus::parse(s),
            None => WeeklyStatus::NoData,
        })
    }
}

// ---------------------------------------------------------------------------
// DayStatus / WeeklyStatusResponse: `/metrics/weekly-status`
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DayStatus {
    /// Calendar day, `YYYY-MM-DD`.
    #[serde(default, deserialize_with = "lenient_string")]
    pub day: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub day_name: String,
    #[serde(default)]
    pub status: WeeklyStatus,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WeeklyStatusResponse {
    #[serde(default)]
    pub weekly_status: Vec<DayStatus>,
}
