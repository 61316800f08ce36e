use serde::Serialize;

use crate::models::{Metric, ResultRecord};

use super::{
    grading::{grade, grade_tone, BENCHMARK_BANDS},
    Tone,
};

const PERCENTILE_NOTE: &str = "You scored higher than 78% of athletes in your age group";
const CONFIDENCE_NOTE: &str = "High confidence in movement tracking and analysis";
const SUBMISSION_NOTE: &str = "Results will be automatically submitted to Sports Authority of India";

const STRENGTHS: [&str; 3] = [
    "Excellent explosive power generation",
    "Consistent movement form throughout",
    "Good balance and coordination",
];

const NEXT_STEPS: [&str; 3] = [
    "Plyometric exercises for power development",
    "Core strengthening program",
    "Balance and coordination drills",
];

fn assessment_title(assessment_id: &str) -> &'static str {
    match assessment_id {
        "vertical-jump" => "Vertical Jump Test",
        "sit-ups" => "Sit-ups Test",
        "shuttle-run" => "Shuttle Run Test",
        "endurance-run" => "Endurance Run Test",
        _ => "Fitness Assessment",
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BandRow {
    pub category: &'static str,
    pub min: u8,
    pub max: u8,
    pub width_percent: u8,
    pub tone: Tone,
    /// Where the score marker sits inside this band, if it does.
    pub marker_offset: Option<f32>,
}

/// Everything the results screen shows, derived from one record.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ResultsView {
    pub title: &'static str,
    pub score: u8,
    pub grade: &'static str,
    pub grade_tone: Tone,
    pub benchmark_category: String,
    pub metrics: Vec<Metric>,
    pub bands: Vec<BandRow>,
    pub percentile_note: &'static str,
    pub strengths: Vec<&'static str>,
    pub recommendations: Vec<String>,
    pub next_steps: Vec<&'static str>,
    pub confidence_note: &'static str,
    pub submission_note: &'static str,
}

impl ResultsView {
    pub fn from_record(record: &ResultRecord) -> Self {
        let bands = BENCHMARK_BANDS
            .iter()
            .map(|band| BandRow {
                category: band.category,
                min: band.min,
                max: band.max,
                width_percent: band.width_percent(),
                tone: band.tone,
                marker_offset: band.marker_offset(record.score),
            })
            .collect();

        Self {
            title: assessment_title(&record.assessment_id),
            score: record.score,
            grade: grade(record.score),
            grade_tone: grade_tone(record.score),
            benchmark_category: record.benchmark_category.clone(),
            metrics: record.metrics.clone(),
            bands,
            percentile_note: PERCENTILE_NOTE,
            strengths: STRENGTHS.to_vec(),
            recommendations: record.recommendations.clone(),
            next_steps: NEXT_STEPS.to_vec(),
            confidence_note: CONFIDENCE_NOTE,
            submission_note: SUBMISSION_NOTE,
        }
    }

    pub fn marked_band(&self) -> Option<&BandRow> {
        self.bands.iter().find(|row| row.marker_offset.is_some())
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    fn record(assessment_id: &str, score: u8) -> ResultRecord {
        ResultRecord {
            session_id: "s-1".into(),
            assessment_id: assessment_id.into(),
            score,
            metrics: vec![Metric::new("count", "45"), Metric::new("form", "Excellent")],
            benchmark_category: "Above Average".into(),
            recommendations: vec!["Improve core strength".into(), "Focus on explosive power".into()],
            completed_at: Utc::now(),
        }
    }

    #[test]
    fn view_reflects_record() {
        let view = ResultsView::from_record(&record("sit-ups", 82));
        assert_eq!(view.title, "Sit-ups Test");
        assert_eq!(view.grade, "A");
        assert_eq!(view.grade_tone, Tone::Secondary);
        assert_eq!(view.benchmark_category, "Above Average");
        assert_eq!(view.metrics.len(), 2);
        assert_eq!(
            view.recommendations,
            vec!["Improve core strength", "Focus on explosive power"]
        );
    }

    #[test]
    fn exactly_one_band_carries_the_marker() {
        let view = ResultsView::from_record(&record("sit-ups", 91));
        let marked: Vec<_> = view.bands.iter().filter(|b| b.marker_offset.is_some()).collect();
        assert_eq!(marked.len(), 1);
        assert_eq!(view.marked_band().unwrap().category, "Excellent");
    }

    #[test]
    fn titles_cover_catalogue_and_fall_back() {
        assert_eq!(
            ResultsView::from_record(&record("endurance-run", 50)).title,
            "Endurance Run Test"
        );
        assert_eq!(
            ResultsView::from_record(&record("mystery", 50)).title,
            "Fitness Assessment"
        );
    }
}
