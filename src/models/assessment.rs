use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum AssessmentStatus {
    Available,
    Completed,
    Locked,
}

impl AssessmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AssessmentStatus::Available => "available",
            AssessmentStatus::Completed => "completed",
            AssessmentStatus::Locked => "locked",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Difficulty {
    Easy,
    Medium,
    High,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::High => "High",
        }
    }
}

/// One entry of the dashboard catalogue.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentDefinition {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub icon_ref: &'static str,
    pub expected_duration_secs: u32,
    pub status: AssessmentStatus,
    pub difficulty: Difficulty,
}

/// What the capture screen needs to run one assessment: copy for the header,
/// the numbered instructions and the recording limit.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CaptureProfile {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub instructions: [&'static str; 4],
    pub duration_secs: u32,
}
