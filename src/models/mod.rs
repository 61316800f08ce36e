pub mod assessment;
pub mod result;

pub use assessment::{AssessmentDefinition, AssessmentStatus, CaptureProfile, Difficulty};
pub use result::{Metric, ResultRecord};
