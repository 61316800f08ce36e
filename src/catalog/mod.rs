pub mod achievements;
pub mod assessments;

pub use achievements::{Achievement, StatTile, ACHIEVEMENTS, DASHBOARD_STATS, OVERALL_PROGRESS_PERCENT};
pub use assessments::{
    capture_profile, find_definition, resolve_capture_profile, ASSESSMENTS, DEFAULT_PROFILE_ID,
};
