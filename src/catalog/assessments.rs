use crate::models::{AssessmentDefinition, AssessmentStatus, CaptureProfile, Difficulty};

const ENABLE_LOGS: bool = true;
const LOG_TARGET: &str = "athletex::catalog";

use crate::log_warn;

/// Profile used when the capture screen is opened with an id it has no
/// instructions for.
pub const DEFAULT_PROFILE_ID: &str = "vertical-jump";

pub static ASSESSMENTS: [AssessmentDefinition; 4] = [
    AssessmentDefinition {
        id: "vertical-jump",
        title: "Vertical Jump",
        description: "Measure explosive leg power",
        icon_ref: "activity",
        expected_duration_secs: 120,
        status: AssessmentStatus::Available,
        difficulty: Difficulty::Medium,
    },
    AssessmentDefinition {
        id: "shuttle-run",
        title: "Shuttle Run",
        description: "Test agility and speed",
        icon_ref: "timer",
        expected_duration_secs: 180,
        status: AssessmentStatus::Completed,
        difficulty: Difficulty::High,
    },
    AssessmentDefinition {
        id: "sit-ups",
        title: "Sit-ups Test",
        description: "Core strength assessment",
        icon_ref: "target",
        expected_duration_secs: 60,
        status: AssessmentStatus::Available,
        difficulty: Difficulty::Easy,
    },
    AssessmentDefinition {
        id: "endurance-run",
        title: "Endurance Run",
        description: "Cardiovascular fitness",
        icon_ref: "zap",
        expected_duration_secs: 720,
        status: AssessmentStatus::Locked,
        difficulty: Difficulty::High,
    },
];

static CAPTURE_PROFILES: [CaptureProfile; 3] = [
    CaptureProfile {
        id: "vertical-jump",
        title: "Vertical Jump Test",
        description: "Stand with feet shoulder-width apart. Jump as high as possible.",
        instructions: [
            "Position yourself in front of the camera",
            "Keep your feet shoulder-width apart",
            "Jump as high as you can when ready",
            "Land softly and stay in frame",
        ],
        duration_secs: 10,
    },
    CaptureProfile {
        id: "sit-ups",
        title: "Sit-ups Test",
        description: "Complete as many sit-ups as possible in 60 seconds.",
        instructions: [
            "Lie on your back with knees bent",
            "Keep your hands behind your head",
            "Perform sit-ups with proper form",
            "Complete as many as possible",
        ],
        duration_secs: 60,
    },
    CaptureProfile {
        id: "shuttle-run",
        title: "Shuttle Run Test",
        description: "Run back and forth between two points as fast as possible.",
        instructions: [
            "Set up 10 meters between markers",
            "Run to touch the far marker",
            "Return to starting position",
            "Repeat for the full duration",
        ],
        duration_secs: 30,
    },
];

pub fn find_definition(id: &str) -> Option<&'static AssessmentDefinition> {
    ASSESSMENTS.iter().find(|definition| definition.id == id)
}

pub fn capture_profile(id: &str) -> Option<&'static CaptureProfile> {
    CAPTURE_PROFILES.iter().find(|profile| profile.id == id)
}

/// Looks up the capture profile for `id`, substituting the default profile
/// for ids without one. Never fails.
pub fn resolve_capture_profile(id: &str) -> &'static CaptureProfile {
    match capture_profile(id) {
        Some(profile) => profile,
        None => {
            log_warn!(
                "no capture profile for '{}', falling back to '{}'",
                id,
                DEFAULT_PROFILE_ID
            );
            &CAPTURE_PROFILES[0]
        }
    }
}
