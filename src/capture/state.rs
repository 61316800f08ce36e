use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::utils::format_clock;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub enum CapturePhase {
    #[default]
    Setup,
    Recording,
    Analyzing,
    Complete,
}

impl CapturePhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            CapturePhase::Setup => "setup",
            CapturePhase::Recording => "recording",
            CapturePhase::Analyzing => "analyzing",
            CapturePhase::Complete => "complete",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordingTick {
    Continue,
    /// The tick reached the configured duration; the session is now analyzing.
    Finished,
    /// Not recording; nothing changed.
    Idle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalysisTick {
    Continue,
    /// Progress hit 100; the session is now complete.
    Finished,
    Idle,
}

/// State of one recording + analysis attempt.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CaptureSession {
    /// Fresh for every attempt, including retries.
    pub session_id: String,
    pub assessment_id: String,
    pub duration_secs: u32,
    pub is_recording: bool,
    pub elapsed_secs: u32,
    pub phase: CapturePhase,
    pub analysis_progress: u8,
    #[serde(skip)]
    analysis_step: u8,
}

impl CaptureSession {
    pub fn new(assessment_id: impl Into<String>, duration_secs: u32, analysis_step: u8) -> Self {
        Self {
            session_id: Uuid::new_v4().to_string(),
            assessment_id: assessment_id.into(),
            duration_secs,
            is_recording: false,
            elapsed_secs: 0,
            phase: CapturePhase::Setup,
            analysis_progress: 0,
            analysis_step: analysis_step.clamp(1, 100),
        }
    }

    pub fn start_recording(&mut self) -> Result<()> {
        if self.phase != CapturePhase::Setup {
            bail!("cannot start recording while {}", self.phase.as_str());
        }
        self.is_recording = true;
        self.elapsed_secs = 0;
        self.phase = CapturePhase::Recording;
        Ok(())
    }

    pub fn tick_recording(&mut self) -> RecordingTick {
        if self.phase != CapturePhase::Recording {
            return RecordingTick::Idle;
        }
        self.elapsed_secs = (self.elapsed_secs + 1).min(self.duration_secs);
        if self.elapsed_secs >= self.duration_secs {
            self.enter_analysis();
            RecordingTick::Finished
        } else {
            RecordingTick::Continue
        }
    }

    /// Ends recording early. Same transition as the final recording tick.
    pub fn stop_recording(&mut self) -> Result<()> {
        if self.phase != CapturePhase::Recording {
            bail!("no recording in progress (phase {})", self.phase.as_str());
        }
        self.enter_analysis();
        Ok(())
    }

    pub fn tick_analysis(&mut self) -> AnalysisTick {
        if self.phase != CapturePhase::Analyzing {
            return AnalysisTick::Idle;
        }
        self.analysis_progress = self
            .analysis_progress
            .saturating_add(self.analysis_step.max(1))
            .min(100);
        if self.analysis_progress == 100 {
            self.phase = CapturePhase::Complete;
            AnalysisTick::Finished
        } else {
            AnalysisTick::Continue
        }
    }

    /// Puts a finished session back into setup for another attempt.
    pub fn reset_for_retry(&mut self) -> Result<()> {
        if self.phase != CapturePhase::Complete {
            bail!("retry is only available once analysis is complete");
        }
        self.session_id = Uuid::new_v4().to_string();
        self.phase = CapturePhase::Setup;
        self.is_recording = false;
        self.elapsed_secs = 0;
        self.analysis_progress = 0;
        Ok(())
    }

    pub fn recording_percent(&self) -> u8 {
        if self.duration_secs == 0 {
            return 100;
        }
        ((self.elapsed_secs as u64 * 100) / self.duration_secs as u64) as u8
    }

    pub fn elapsed_label(&self) -> String {
        format_clock(self.elapsed_secs)
    }

    fn enter_analysis(&mut self) {
        self.is_recording = false;
        self.phase = CapturePhase::Analyzing;
        self.analysis_progress = 0;
    }
}
