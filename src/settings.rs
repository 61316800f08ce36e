use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf, sync::RwLock, time::Duration};

const ENABLE_LOGS: bool = true;
const LOG_TARGET: &str = "athletex::settings";

use crate::log_warn;

/// Tick cadence of the two capture timers.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct CaptureTiming {
    pub recording_tick_ms: u64,
    pub analysis_tick_ms: u64,
    /// Percentage points added per analysis tick.
    pub analysis_step: u8,
}

impl Default for CaptureTiming {
    fn default() -> Self {
        Self {
            recording_tick_ms: 1_000,
            analysis_tick_ms: 200,
            analysis_step: 5,
        }
    }
}

impl CaptureTiming {
    /// Same step, ten times faster ticks. Used when `ATHLETEX_DEBUG` is set.
    pub fn debug() -> Self {
        Self {
            recording_tick_ms: 100,
            analysis_tick_ms: 20,
            ..Self::default()
        }
    }

    pub fn recording_tick(&self) -> Duration {
        Duration::from_millis(self.recording_tick_ms)
    }

    pub fn analysis_tick(&self) -> Duration {
        Duration::from_millis(self.analysis_tick_ms)
    }

    pub fn validate(&self) -> Result<()> {
        if self.recording_tick_ms == 0 || self.analysis_tick_ms == 0 {
            bail!("capture tick intervals must be greater than zero");
        }
        if self.analysis_step == 0 || self.analysis_step > 100 {
            bail!(
                "analysis step must be within 1..=100, got {}",
                self.analysis_step
            );
        }
        Ok(())
    }
}

/// Half-open range the synthesized score is drawn from.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ScoreBand {
    pub min: u8,
    /// Exclusive.
    pub max: u8,
}

impl Default for ScoreBand {
    fn default() -> Self {
        Self { min: 80, max: 100 }
    }
}

impl ScoreBand {
    pub fn validate(&self) -> Result<()> {
        if self.min >= self.max || self.max > 100 {
            bail!(
                "score band must satisfy min < max <= 100, got {}..{}",
                self.min,
                self.max
            );
        }
        Ok(())
    }

    pub fn contains(&self, score: u8) -> bool {
        (self.min..self.max).contains(&score)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct UserSettings {
    pub capture: CaptureTiming,
    pub score_band: ScoreBand,
    /// Assessment the demo walkthrough picks from the dashboard.
    pub demo_assessment: String,
}

impl Default for UserSettings {
    fn default() -> Self {
        Self {
            capture: CaptureTiming::default(),
            score_band: ScoreBand::default(),
            demo_assessment: "sit-ups".into(),
        }
    }
}

impl UserSettings {
    pub fn validate(&self) -> Result<()> {
        self.capture.validate()?;
        self.score_band.validate()
    }
}

pub struct SettingsStore {
    path: PathBuf,
    data: RwLock<UserSettings>,
}

impl SettingsStore {
    /// Loads settings from `path`. A missing file yields defaults; a file that
    /// does not parse or fails validation is logged and replaced by defaults.
    pub fn new(path: PathBuf) -> Result<Self> {
        let data = if path.exists() {
            let contents = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read settings from {}", path.display()))?;
            match serde_json::from_str::<UserSettings>(&contents) {
                Ok(parsed) => match parsed.validate() {
                    Ok(()) => parsed,
                    Err(err) => {
                        log_warn!("ignoring invalid settings in {}: {err}", path.display());
                        UserSettings::default()
                    }
                },
                Err(err) => {
                    log_warn!("ignoring unreadable settings in {}: {err}", path.display());
                    UserSettings::default()
                }
            }
        } else {
            UserSettings::default()
        };

        Ok(Self {
            path,
            data: RwLock::new(data),
        })
    }

    pub fn snapshot(&self) -> UserSettings {
        match self.data.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn capture_timing(&self) -> CaptureTiming {
        self.snapshot().capture
    }

    pub fn score_band(&self) -> ScoreBand {
        self.snapshot().score_band
    }

    pub fn demo_assessment(&self) -> String {
        self.snapshot().demo_assessment
    }

    pub fn update_capture_timing(&self, timing: CaptureTiming) -> Result<()> {
        timing.validate()?;
        self.update(|data| data.capture = timing)
    }

    pub fn update_score_band(&self, band: ScoreBand) -> Result<()> {
        band.validate()?;
        self.update(|data| data.score_band = band)
    }

    fn update(&self, apply: impl FnOnce(&mut UserSettings)) -> Result<()> {
        let mut guard = self
            .data
            .write()
            .map_err(|_| anyhow::anyhow!("settings lock poisoned"))?;
        apply(&mut *guard);
        self.persist(&guard)
    }

    fn persist(&self, data: &UserSettings) -> Result<()> {
        let serialized = serde_json::to_string_pretty(data)?;
        fs::write(&self.path, serialized)
            .with_context(|| format!("Failed to write settings to {}", self.path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let store = SettingsStore::new(dir.path().join("settings.json")).unwrap();
        assert_eq!(store.snapshot(), UserSettings::default());
        assert_eq!(store.capture_timing().recording_tick_ms, 1_000);
        assert_eq!(store.capture_timing().analysis_tick_ms, 200);
        assert_eq!(store.capture_timing().analysis_step, 5);
    }

    #[test]
    fn updates_are_persisted_and_reloaded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        let store = SettingsStore::new(path.clone()).unwrap();
        store
            .update_capture_timing(CaptureTiming {
                recording_tick_ms: 500,
                analysis_tick_ms: 50,
                analysis_step: 10,
            })
            .unwrap();
        store.update_score_band(ScoreBand { min: 60, max: 90 }).unwrap();

        let reloaded = SettingsStore::new(path).unwrap();
        assert_eq!(reloaded.capture_timing().recording_tick_ms, 500);
        assert_eq!(reloaded.capture_timing().analysis_step, 10);
        assert_eq!(reloaded.score_band(), ScoreBand { min: 60, max: 90 });
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, r#"{ "demoAssessment": "shuttle-run" }"#).unwrap();

        let store = SettingsStore::new(path).unwrap();
        assert_eq!(store.demo_assessment(), "shuttle-run");
        assert_eq!(store.capture_timing(), CaptureTiming::default());
    }

    #[test]
    fn invalid_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, r#"{ "capture": { "analysisStep": 0 } }"#).unwrap();
        assert_eq!(
            SettingsStore::new(path.clone()).unwrap().snapshot(),
            UserSettings::default()
        );

        fs::write(&path, "not json").unwrap();
        assert_eq!(
            SettingsStore::new(path).unwrap().snapshot(),
            UserSettings::default()
        );
    }

    #[test]
    fn rejects_invalid_updates() {
        let dir = tempfile::tempdir().unwrap();
        let store = SettingsStore::new(dir.path().join("settings.json")).unwrap();
        assert!(store
            .update_capture_timing(CaptureTiming {
                recording_tick_ms: 0,
                ..CaptureTiming::default()
            })
            .is_err());
        assert!(store.update_score_band(ScoreBand { min: 90, max: 90 }).is_err());
        assert!(store.update_score_band(ScoreBand { min: 10, max: 101 }).is_err());
        assert_eq!(store.snapshot(), UserSettings::default());
    }
}
