use anyhow::{anyhow, bail, Result};
use serde::Serialize;

use crate::{
    catalog::{
        find_definition, Achievement, StatTile, ACHIEVEMENTS, ASSESSMENTS, DASHBOARD_STATS,
        OVERALL_PROGRESS_PERCENT,
    },
    models::{AssessmentDefinition, AssessmentStatus, Difficulty},
};

use super::Tone;

fn duration_label(secs: u32) -> String {
    match secs / 60 {
        0 => format!("{secs} secs"),
        1 => "1 min".to_string(),
        minutes => format!("{minutes} mins"),
    }
}

fn difficulty_tone(difficulty: Difficulty) -> Tone {
    match difficulty {
        Difficulty::Easy => Tone::Success,
        Difficulty::Medium => Tone::Secondary,
        Difficulty::High => Tone::Destructive,
    }
}

fn action_label(status: AssessmentStatus) -> &'static str {
    match status {
        AssessmentStatus::Available => "Start Test",
        AssessmentStatus::Completed => "Retake Test",
        AssessmentStatus::Locked => "Complete Previous Tests",
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentCard {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub icon_ref: &'static str,
    pub duration_label: String,
    pub status: AssessmentStatus,
    pub difficulty: Difficulty,
    pub difficulty_tone: Tone,
    pub action_label: &'static str,
    pub startable: bool,
}

impl From<&AssessmentDefinition> for AssessmentCard {
    fn from(definition: &AssessmentDefinition) -> Self {
        Self {
            id: definition.id,
            title: definition.title,
            description: definition.description,
            icon_ref: definition.icon_ref,
            duration_label: duration_label(definition.expected_duration_secs),
            status: definition.status,
            difficulty: definition.difficulty,
            difficulty_tone: difficulty_tone(definition.difficulty),
            action_label: action_label(definition.status),
            startable: definition.status != AssessmentStatus::Locked,
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DashboardView {
    pub title: &'static str,
    pub subtitle: &'static str,
    pub stats: Vec<StatTile>,
    pub progress_percent: u8,
    pub cards: Vec<AssessmentCard>,
    pub achievements: Vec<Achievement>,
}

impl DashboardView {
    pub fn build() -> Self {
        Self {
            title: "Athlete Dashboard",
            subtitle: "Track your progress and complete assessments",
            stats: DASHBOARD_STATS.to_vec(),
            progress_percent: OVERALL_PROGRESS_PERCENT,
            cards: ASSESSMENTS.iter().map(AssessmentCard::from).collect(),
            achievements: ACHIEVEMENTS.to_vec(),
        }
    }

    pub fn card(&self, id: &str) -> Option<&AssessmentCard> {
        self.cards.iter().find(|card| card.id == id)
    }

    /// Returns the id to hand to the root controller when the card's button
    /// is pressed. Locked cards have no live button.
    pub fn select(&self, id: &str) -> Result<String> {
        let definition =
            find_definition(id).ok_or_else(|| anyhow!("no assessment card with id '{id}'"))?;
        if definition.status == AssessmentStatus::Locked {
            bail!("'{}' is locked until previous tests are completed", definition.title);
        }
        Ok(definition.id.to_string())
    }

    pub fn earned_achievements(&self) -> usize {
        self.achievements.iter().filter(|a| a.earned).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cards_follow_catalogue_order() {
        let view = DashboardView::build();
        let ids: Vec<_> = view.cards.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec!["vertical-jump", "shuttle-run", "sit-ups", "endurance-run"]);
    }

    #[test]
    fn card_labels() {
        let view = DashboardView::build();
        let jump = view.card("vertical-jump").unwrap();
        assert_eq!(jump.duration_label, "2 mins");
        assert_eq!(jump.action_label, "Start Test");
        assert_eq!(jump.difficulty_tone, Tone::Secondary);

        let shuttle = view.card("shuttle-run").unwrap();
        assert_eq!(shuttle.action_label, "Retake Test");
        assert!(shuttle.startable);

        assert_eq!(view.card("sit-ups").unwrap().duration_label, "1 min");

        let endurance = view.card("endurance-run").unwrap();
        assert_eq!(endurance.duration_label, "12 mins");
        assert_eq!(endurance.action_label, "Complete Previous Tests");
        assert!(!endurance.startable);
    }

    #[test]
    fn select_passes_id_through_unchanged() {
        let view = DashboardView::build();
        assert_eq!(view.select("sit-ups").unwrap(), "sit-ups");
        assert_eq!(view.select("shuttle-run").unwrap(), "shuttle-run");
    }

    #[test]
    fn select_rejects_locked_and_unknown_cards() {
        let view = DashboardView::build();
        assert!(view.select("endurance-run").unwrap_err().to_string().contains("locked"));
        assert!(view.select("push-ups").is_err());
    }

    #[test]
    fn static_stats_and_achievements() {
        let view = DashboardView::build();
        assert_eq!(view.stats[0].value, "1/4");
        assert_eq!(view.progress_percent, 25);
        assert_eq!(view.earned_achievements(), 2);
        assert_eq!(duration_label(45), "45 secs");
    }
}
