pub mod capture;
pub mod catalog;
pub mod flow;
pub mod models;
pub mod settings;
pub mod utils;
pub mod views;

use std::{path::PathBuf, sync::Arc, time::Duration};

use anyhow::{anyhow, Result};
use capture::SimulatedCamera;
use flow::{
    commands::{
        back_to_dashboard, get_capture_state, get_dashboard, get_landing, get_results,
        get_started, start_recording, start_test,
    },
    AppController, AppView,
};
use settings::{CaptureTiming, SettingsStore};
use views::render::{render_capture, render_dashboard, render_landing, render_results};

const ENABLE_LOGS: bool = true;
const LOG_TARGET: &str = "athletex";

pub struct AppState {
    pub app: AppController,
    pub settings: SettingsStore,
}

fn debug_mode() -> bool {
    std::env::var("ATHLETEX_DEBUG")
        .map(|value| value == "1" || value.eq_ignore_ascii_case("true"))
        .unwrap_or(false)
}

fn settings_path() -> PathBuf {
    std::env::var_os("ATHLETEX_SETTINGS")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("athletex-settings.json"))
}

/// Runs one landing → dashboard → capture → results walkthrough against a
/// simulated camera, printing each screen as it changes.
pub fn run() -> Result<()> {
    // Initialize logging (reads RUST_LOG env var)
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    crate::log_info!("AthleteX starting up...");

    let settings = SettingsStore::new(settings_path())?;
    let timing = if debug_mode() {
        CaptureTiming::debug()
    } else {
        settings.capture_timing()
    };

    let app = AppController::new(Arc::new(SimulatedCamera::new()), timing, settings.score_band());
    let state = AppState { app, settings };

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    let outcome = runtime.block_on(async {
        let result = walkthrough(&state, timing.recording_tick()).await;
        state.app.shutdown().await;
        result
    });

    if let Err(err) = &outcome {
        crate::log_error!("walkthrough failed: {err:#}");
    }
    outcome
}

async fn walkthrough(state: &AppState, refresh: Duration) -> Result<()> {
    let mut views = state.app.subscribe();

    println!("{}", render_landing(&get_landing(state).map_err(|e| anyhow!(e))?));
    get_started(state).await.map_err(|e| anyhow!(e))?;
    println!("{}", render_dashboard(&get_dashboard(state).map_err(|e| anyhow!(e))?));

    let assessment = state.settings.demo_assessment();
    let setup = start_test(state, assessment).await.map_err(|e| anyhow!(e))?;
    println!("{}", render_capture(&setup));
    start_recording(state).await.map_err(|e| anyhow!(e))?;

    let mut ticker = tokio::time::interval(refresh);
    while *views.borrow_and_update() == AppView::Capture {
        tokio::select! {
            _ = ticker.tick() => {
                if let Ok(snapshot) = get_capture_state(state).await {
                    println!("{}", render_capture(&snapshot));
                }
            }
            changed = views.changed() => {
                changed.map_err(|_| anyhow!("app controller went away"))?;
            }
        }
    }

    println!("{}", render_results(&get_results(state).await.map_err(|e| anyhow!(e))?));
    back_to_dashboard(state).await.map_err(|e| anyhow!(e))?;
    crate::log_info!("walkthrough finished");
    Ok(())
}
