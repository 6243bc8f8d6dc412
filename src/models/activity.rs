//! Transaction-history records as returned by the wallet gateway

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Format of `Activity::date_time`
pub const ACTIVITY_TIME_FORMAT: &str = "%d/%m/%y %H:%M";

/// One transaction-history record.
///
/// Every field is kept as the gateway formats it: `date_time` is `DD/MM/YY HH:MM`,
/// `amount` carries a sign glyph and thousands separators (`+1,000.00`) and `phone`
/// may contain `-` separators.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Activity {
    #[serde(default)]
    pub report_id: String,
    #[serde(default)]
    pub date_time: String,
    #[serde(default)]
    pub amount: String,
    #[serde(rename = "sub_title", default)]
    pub phone: String,
    #[serde(rename = "original_action", default)]
    pub action: String,
}

impl Activity {
    /// Unix epoch seconds of `date_time`, read as UTC. `None` when it does not parse.
    pub fn timestamp(&self) -> Option<i64> {
        NaiveDateTime::parse_from_str(self.date_time.trim(), ACTIVITY_TIME_FORMAT)
            .ok()
            .map(|dt| dt.and_utc().timestamp())
    }
}

/// A batch of activities plus the totals the gateway reported for the query
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    #[serde(default)]
    pub total: usize,
    #[serde(default)]
    pub total_page: usize,
    #[serde(default)]
    pub activities: Vec<Activity>,
}

impl Page {
    pub fn empty() -> Self {
        Self::default()
    }
}
