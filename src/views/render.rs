//! Plain-text rendering of each screen, used by the terminal walkthrough.

use crate::capture::{CapturePhase, CaptureSnapshot};

use super::{DashboardView, LandingView, ResultsView};

const BAR_WIDTH: usize = 20;

fn bar(percent: u8) -> String {
    let filled = usize::from(percent.min(100)) * BAR_WIDTH / 100;
    format!("[{}{}] {:>3}%", "#".repeat(filled), "-".repeat(BAR_WIDTH - filled), percent)
}

/// Appends `text` and a newline.
fn line(out: &mut String, text: impl AsRef<str>) {
    out.push_str(text.as_ref());
    out.push('\n');
}

pub fn render_landing(view: &LandingView) -> String {
    let mut out = String::new();
    line(&mut out, format!("{}  ·  {}", view.brand, view.partner));
    line(&mut out, format!("[{}]", view.badge));
    line(&mut out, view.headline);
    line(&mut out, view.tagline);
    for feature in &view.features {
        line(&mut out, format!("  * {}: {}", feature.title, feature.description));
    }
    line(&mut out, format!("> {}", view.call_to_action));
    out
}

pub fn render_dashboard(view: &DashboardView) -> String {
    let mut out = String::new();
    line(&mut out, view.title);
    line(&mut out, view.subtitle);
    for stat in &view.stats {
        line(&mut out, format!("  {:<16} {}", stat.title, stat.value));
    }
    line(&mut out, format!("  Progress         {}", bar(view.progress_percent)));
    line(&mut out, "Fitness Assessments");
    for card in &view.cards {
        line(
            &mut out,
            format!(
                "  {:<14} {:<9} {:<6} {:<8} {}{}",
                card.title,
                card.status.as_str(),
                card.difficulty.as_str(),
                card.duration_label,
                card.action_label,
                if card.startable { "" } else { " (disabled)" }
            ),
        );
    }
    line(&mut out, "Achievements");
    for achievement in &view.achievements {
        let mark = if achievement.earned { "x" } else { " " };
        line(&mut out, format!("  [{mark}] {}", achievement.title));
    }
    out
}

pub fn render_capture(snapshot: &CaptureSnapshot) -> String {
    let session = &snapshot.session;
    let mut out = String::new();
    line(&mut out, format!("{} ({})", snapshot.profile.title, session.phase.as_str()));
    match session.phase {
        CapturePhase::Setup => {
            line(&mut out, snapshot.profile.description);
            for (index, step) in snapshot.profile.instructions.iter().enumerate() {
                line(&mut out, format!("  {}. {}", index + 1, step));
            }
            if !snapshot.live_preview {
                line(&mut out, "  (no camera preview)");
            }
        }
        CapturePhase::Recording => {
            line(
                &mut out,
                format!("  REC {}  {}", snapshot.elapsed_label, bar(snapshot.recording_percent)),
            );
        }
        CapturePhase::Analyzing => {
            line(
                &mut out,
                format!("  AI Analysis in Progress... {}", bar(session.analysis_progress)),
            );
        }
        CapturePhase::Complete => line(&mut out, "  Complete"),
    }
    out
}

pub fn render_results(view: &ResultsView) -> String {
    let mut out = String::new();
    line(&mut out, format!("Assessment Complete: {}", view.title));
    line(&mut out, format!("  Score {}/100  Grade {}", view.score, view.grade));
    line(&mut out, format!("  {} category", view.benchmark_category));
    for metric in &view.metrics {
        line(&mut out, format!("  {:<12} {}", metric.name, metric.value));
    }
    line(&mut out, "Performance Benchmark");
    for band in &view.bands {
        let marker = match band.marker_offset {
            Some(offset) => format!("  <- you ({offset:.0}%)"),
            None => String::new(),
        };
        line(
            &mut out,
            format!("  {:<10} {:>3}-{:<3}{}", band.category, band.min, band.max, marker),
        );
    }
    line(&mut out, format!("  {}", view.percentile_note));
    line(&mut out, "Recommendations");
    for rec in &view.recommendations {
        line(&mut out, format!("  - {rec}"));
    }
    out
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::{
        capture::CaptureSession,
        catalog::resolve_capture_profile,
        models::{Metric, ResultRecord},
    };

    #[test]
    fn progress_bar_fills_proportionally() {
        assert_eq!(bar(0), format!("[{}]   0%", "-".repeat(20)));
        assert_eq!(bar(50), format!("[{}{}]  50%", "#".repeat(10), "-".repeat(10)));
        assert_eq!(bar(100), format!("[{}] 100%", "#".repeat(20)));
    }

    #[test]
    fn landing_puts_each_item_on_its_own_line() {
        let view = LandingView::default();
        let text = render_landing(&view);
        assert!(text.ends_with('\n'));
        assert_eq!(text.lines().count(), 5 + view.features.len());
        assert_eq!(text.lines().nth(2), Some(view.headline));
    }

    #[test]
    fn dashboard_marks_locked_cards() {
        let text = render_dashboard(&DashboardView::build());
        assert!(text.contains("Complete Previous Tests (disabled)"));
        assert!(text.contains("[x] First Assessment"));
        assert!(text.contains("[ ] Champion"));
    }

    #[test]
    fn capture_setup_lists_instructions() {
        let snapshot = CaptureSnapshot {
            session: CaptureSession::new("sit-ups", 60, 5),
            profile: resolve_capture_profile("sit-ups"),
            recording_percent: 0,
            elapsed_label: "0:00".into(),
            live_preview: false,
        };
        let text = render_capture(&snapshot);
        assert!(text.contains("Sit-ups Test (setup)"));
        assert!(text.contains("1. Lie on your back with knees bent"));
        assert!(text.contains("(no camera preview)"));
    }

    #[test]
    fn results_point_at_the_scored_band() {
        let record = ResultRecord {
            session_id: "s".into(),
            assessment_id: "vertical-jump".into(),
            score: 80,
            metrics: vec![Metric::new("height", "64cm")],
            benchmark_category: "Above Average".into(),
            recommendations: vec!["Improve core strength".into()],
            completed_at: Utc::now(),
        };
        let text = render_results(&ResultsView::from_record(&record));
        assert!(text.contains("Grade A"));
        assert!(text.contains("Good        75-85   <- you (50%)"));
        assert!(text.contains("- Improve core strength"));
        assert!(render_landing(&LandingView::default()).contains("AthleteX"));
    }
}
