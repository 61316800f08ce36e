//! String-error entry points for a UI shell. Each one maps to a button or a
//! poll on one of the four screens.

use crate::{
    capture::CaptureSnapshot,
    flow::{AppController, AppSnapshot, AppView},
    views::{DashboardView, LandingView, ResultsView},
    AppState,
};

fn controller_from_state(state: &AppState) -> &AppController {
    &state.app
}

pub async fn get_app_state(state: &AppState) -> Result<AppSnapshot, String> {
    Ok(controller_from_state(state).snapshot().await)
}

pub fn get_landing(state: &AppState) -> Result<LandingView, String> {
    Ok(controller_from_state(state).landing_view())
}

pub fn get_dashboard(state: &AppState) -> Result<DashboardView, String> {
    Ok(controller_from_state(state).dashboard_view())
}

pub async fn get_results(state: &AppState) -> Result<ResultsView, String> {
    controller_from_state(state)
        .results_view()
        .await
        .ok_or_else(|| "no result to show".to_string())
}

pub async fn get_started(state: &AppState) -> Result<AppView, String> {
    controller_from_state(state)
        .proceed()
        .await
        .map_err(|e| e.to_string())
}

/// Dashboard card press: validates the card, then mounts the capture screen.
pub async fn start_test(state: &AppState, test_id: String) -> Result<CaptureSnapshot, String> {
    let controller = controller_from_state(state);
    let chosen = controller
        .dashboard_view()
        .select(&test_id)
        .map_err(|e| e.to_string())?;
    controller
        .start_assessment(&chosen)
        .await
        .map_err(|e| e.to_string())
}

pub async fn start_recording(state: &AppState) -> Result<CaptureSnapshot, String> {
    controller_from_state(state)
        .start_recording()
        .await
        .map_err(|e| e.to_string())
}

pub async fn stop_recording(state: &AppState) -> Result<CaptureSnapshot, String> {
    controller_from_state(state)
        .stop_recording()
        .await
        .map_err(|e| e.to_string())
}

pub async fn get_capture_state(state: &AppState) -> Result<CaptureSnapshot, String> {
    controller_from_state(state)
        .capture_snapshot()
        .await
        .ok_or_else(|| "capture view is not active".to_string())
}

pub async fn back_to_dashboard(state: &AppState) -> Result<AppView, String> {
    controller_from_state(state)
        .back_to_dashboard()
        .await
        .map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::{capture::SimulatedCamera, settings::SettingsStore};

    fn state() -> (AppState, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let settings = SettingsStore::new(dir.path().join("settings.json")).unwrap();
        let app = AppController::new(
            Arc::new(SimulatedCamera::new()),
            settings.capture_timing(),
            settings.score_band(),
        );
        (AppState { app, settings }, dir)
    }

    #[tokio::test(start_paused = true)]
    async fn locked_card_cannot_be_started() {
        let (state, _dir) = state();
        get_started(&state).await.unwrap();
        let err = start_test(&state, "endurance-run".into()).await.unwrap_err();
        assert!(err.contains("locked"));
        assert_eq!(get_app_state(&state).await.unwrap().view, AppView::Dashboard);
    }

    #[tokio::test(start_paused = true)]
    async fn errors_surface_as_strings() {
        let (state, _dir) = state();
        assert!(get_results(&state).await.is_err());
        assert!(get_capture_state(&state).await.is_err());
        let err = back_to_dashboard(&state).await.unwrap_err();
        assert!(err.contains("landing"));
    }

    #[tokio::test(start_paused = true)]
    async fn full_flow_through_commands() {
        let (state, _dir) = state();
        let mut views = state.app.subscribe();
        assert_eq!(get_landing(&state).unwrap().brand, "AthleteX");
        get_started(&state).await.unwrap();
        assert_eq!(get_dashboard(&state).unwrap().cards.len(), 4);

        start_test(&state, "vertical-jump".into()).await.unwrap();
        start_recording(&state).await.unwrap();
        views
            .wait_for(|view| *view == AppView::Results)
            .await
            .unwrap();

        let results = get_results(&state).await.unwrap();
        assert_eq!(results.title, "Vertical Jump Test");
        assert_eq!(back_to_dashboard(&state).await.unwrap(), AppView::Dashboard);
    }
}
