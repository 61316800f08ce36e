use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Metric {
    pub name: String,
    pub value: String,
}

impl Metric {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Outcome of one completed capture session. Lives on the root controller
/// until the user leaves the results screen.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ResultRecord {
    pub session_id: String,
    pub assessment_id: String,
    pub score: u8,
    /// Display values in table order.
    pub metrics: Vec<Metric>,
    pub benchmark_category: String,
    pub recommendations: Vec<String>,
    pub completed_at: DateTime<Utc>,
}

impl ResultRecord {
    pub fn metric(&self, name: &str) -> Option<&str> {
        self.metrics
            .iter()
            .find(|metric| metric.name == name)
            .map(|metric| metric.value.as_str())
    }
}
