pub mod dashboard;
pub mod grading;
pub mod landing;
pub mod render;
pub mod results;

use serde::Serialize;

pub use dashboard::{AssessmentCard, DashboardView};
pub use grading::{band_for, grade, grade_tone, BenchmarkBand, BENCHMARK_BANDS};
pub use landing::LandingView;
pub use results::ResultsView;

/// Colour role a view asks the presentation layer for.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum Tone {
    Success,
    Secondary,
    Primary,
    Destructive,
    Muted,
}
