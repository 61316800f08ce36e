use serde::Serialize;

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Achievement {
    pub title: &'static str,
    pub icon_ref: &'static str,
    pub earned: bool,
}

pub static ACHIEVEMENTS: [Achievement; 4] = [
    Achievement {
        title: "First Assessment",
        icon_ref: "trophy",
        earned: true,
    },
    Achievement {
        title: "Speed Demon",
        icon_ref: "zap",
        earned: true,
    },
    Achievement {
        title: "Core Strength",
        icon_ref: "target",
        earned: false,
    },
    Achievement {
        title: "Champion",
        icon_ref: "medal",
        earned: false,
    },
];

/// Summary tile on the dashboard header row. Values are fixed, not derived
/// from any history.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct StatTile {
    pub title: &'static str,
    pub value: &'static str,
    pub icon_ref: &'static str,
}

pub static DASHBOARD_STATS: [StatTile; 3] = [
    StatTile {
        title: "Tests Completed",
        value: "1/4",
        icon_ref: "trophy",
    },
    StatTile {
        title: "Overall Score",
        value: "85/100",
        icon_ref: "medal",
    },
    StatTile {
        title: "Rank",
        value: "#127",
        icon_ref: "target",
    },
];

pub const OVERALL_PROGRESS_PERCENT: u8 = 25;
