use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

use crate::models::ResultRecord;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub enum AppView {
    #[default]
    Landing,
    Dashboard,
    Capture,
    Results,
}

impl AppView {
    pub fn as_str(&self) -> &'static str {
        match self {
            AppView::Landing => "landing",
            AppView::Dashboard => "dashboard",
            AppView::Capture => "capture",
            AppView::Results => "results",
        }
    }
}

/// Which screen is showing, plus what it was opened with. Every transition
/// checks the current view and leaves state untouched when it does not apply.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FlowState {
    view: AppView,
    selected_assessment: Option<String>,
    result: Option<ResultRecord>,
}

impl FlowState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> AppView {
        self.view
    }

    pub fn selected_assessment(&self) -> Option<&str> {
        self.selected_assessment.as_deref()
    }

    pub fn result(&self) -> Option<&ResultRecord> {
        self.result.as_ref()
    }

    pub fn proceed(&mut self) -> Result<()> {
        self.require_view(AppView::Landing, "proceed")?;
        self.view = AppView::Dashboard;
        Ok(())
    }

    pub fn start_assessment(&mut self, assessment_id: &str) -> Result<()> {
        self.require_view(AppView::Dashboard, "start an assessment")?;
        self.selected_assessment = Some(assessment_id.to_string());
        self.view = AppView::Capture;
        Ok(())
    }

    pub fn complete(&mut self, record: ResultRecord) -> Result<()> {
        self.require_view(AppView::Capture, "complete an assessment")?;
        self.result = Some(record);
        self.view = AppView::Results;
        Ok(())
    }

    pub fn back_to_dashboard(&mut self) -> Result<()> {
        self.require_view(AppView::Results, "return to the dashboard")?;
        self.result = None;
        self.view = AppView::Dashboard;
        Ok(())
    }

    fn require_view(&self, view: AppView, action: &str) -> Result<()> {
        if self.view != view {
            bail!("cannot {action} from the {} view", self.view.as_str());
        }
        Ok(())
    }
}
