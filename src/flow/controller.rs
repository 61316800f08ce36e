use std::sync::{Arc, Mutex as StdMutex};

use anyhow::{anyhow, bail, Result};
use serde::Serialize;
use tokio::{
    sync::{mpsc, watch, Mutex},
    task::JoinHandle,
};

use crate::{
    capture::{
        CameraService, CaptureController, CaptureEvent, CaptureSnapshot, ResultSynthesizer,
    },
    models::ResultRecord,
    settings::{CaptureTiming, ScoreBand},
    utils::lock_unpoisoned,
    views::{DashboardView, LandingView, ResultsView},
};

use super::{AppView, FlowState};

const ENABLE_LOGS: bool = true;
const LOG_TARGET: &str = "athletex::flow";

use crate::{log_debug, log_error, log_info};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppSnapshot {
    pub view: AppView,
    pub selected_assessment: Option<String>,
    pub result: Option<ResultRecord>,
    pub capture: Option<CaptureSnapshot>,
}

/// Root of the app. Holds the flow state, mounts a capture controller when
/// an assessment starts and moves to results when that capture completes.
pub struct AppController {
    flow: Arc<Mutex<FlowState>>,
    capture: Arc<Mutex<Option<CaptureController>>>,
    camera: Arc<dyn CameraService>,
    timing: CaptureTiming,
    score_band: ScoreBand,
    view_tx: Arc<watch::Sender<AppView>>,
    watcher: StdMutex<Option<JoinHandle<()>>>,
}

impl AppController {
    pub fn new(camera: Arc<dyn CameraService>, timing: CaptureTiming, score_band: ScoreBand) -> Self {
        let (view_tx, _) = watch::channel(AppView::Landing);
        Self {
            flow: Arc::new(Mutex::new(FlowState::new())),
            capture: Arc::new(Mutex::new(None)),
            camera,
            timing,
            score_band,
            view_tx: Arc::new(view_tx),
            watcher: StdMutex::new(None),
        }
    }

    /// Receiver that observes every view change.
    pub fn subscribe(&self) -> watch::Receiver<AppView> {
        self.view_tx.subscribe()
    }

    pub async fn view(&self) -> AppView {
        self.flow.lock().await.view()
    }

    pub async fn snapshot(&self) -> AppSnapshot {
        let (view, selected_assessment, result) = {
            let flow = self.flow.lock().await;
            (
                flow.view(),
                flow.selected_assessment().map(str::to_string),
                flow.result().cloned(),
            )
        };
        let capture = match self.capture.lock().await.as_ref() {
            Some(controller) => Some(controller.snapshot().await),
            None => None,
        };

        AppSnapshot {
            view,
            selected_assessment,
            result,
            capture,
        }
    }

    pub fn landing_view(&self) -> LandingView {
        LandingView::default()
    }

    pub fn dashboard_view(&self) -> DashboardView {
        DashboardView::build()
    }

    pub async fn results_view(&self) -> Option<ResultsView> {
        let flow = self.flow.lock().await;
        if flow.view() != AppView::Results {
            return None;
        }
        flow.result().map(ResultsView::from_record)
    }

    pub async fn proceed(&self) -> Result<AppView> {
        let mut flow = self.flow.lock().await;
        flow.proceed()?;
        self.publish(flow.view());
        Ok(flow.view())
    }

    /// Mounts the capture screen for `assessment_id`. Ids without a capture
    /// profile run with the default one.
    pub async fn start_assessment(&self, assessment_id: &str) -> Result<CaptureSnapshot> {
        let mut flow = self.flow.lock().await;
        if flow.view() != AppView::Dashboard {
            bail!(
                "cannot start an assessment from the {} view",
                flow.view().as_str()
            );
        }

        self.score_band.validate()?;

        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let controller = CaptureController::mount(
            assessment_id,
            Arc::clone(&self.camera),
            self.timing,
            ResultSynthesizer::new(self.score_band),
            events_tx,
        )
        .await?;
        let snapshot = controller.snapshot().await;

        flow.start_assessment(assessment_id)?;
        *self.capture.lock().await = Some(controller);
        self.spawn_watcher(events_rx);
        self.publish(flow.view());

        log_info!("capture view active for '{}'", assessment_id);
        Ok(snapshot)
    }

    pub async fn start_recording(&self) -> Result<CaptureSnapshot> {
        let capture = self.capture.lock().await;
        capture
            .as_ref()
            .ok_or_else(|| anyhow!("capture view is not active"))?
            .start_recording()
            .await
    }

    pub async fn stop_recording(&self) -> Result<CaptureSnapshot> {
        let capture = self.capture.lock().await;
        capture
            .as_ref()
            .ok_or_else(|| anyhow!("capture view is not active"))?
            .stop_recording()
            .await
    }

    pub async fn capture_snapshot(&self) -> Option<CaptureSnapshot> {
        match self.capture.lock().await.as_ref() {
            Some(controller) => Some(controller.snapshot().await),
            None => None,
        }
    }

    /// Leaves the results screen and drops the held record.
    pub async fn back_to_dashboard(&self) -> Result<AppView> {
        let mut flow = self.flow.lock().await;
        flow.back_to_dashboard()?;
        self.publish(flow.view());
        log_info!("back on dashboard, result discarded");
        Ok(flow.view())
    }

    /// Stops any running capture and releases the camera.
    pub async fn shutdown(&self) {
        if let Some(handle) = lock_unpoisoned(&self.watcher).take() {
            handle.abort();
        }
        if let Some(controller) = self.capture.lock().await.take() {
            controller.unmount();
        }
    }

    fn spawn_watcher(&self, events_rx: mpsc::UnboundedReceiver<CaptureEvent>) {
        let mut watcher = lock_unpoisoned(&self.watcher);
        if let Some(handle) = watcher.take() {
            handle.abort();
        }

        let handle = tokio::spawn(watch_capture(
            Arc::clone(&self.flow),
            Arc::clone(&self.capture),
            Arc::clone(&self.view_tx),
            events_rx,
        ));
        *watcher = Some(handle);
    }

    fn publish(&self, view: AppView) {
        self.view_tx.send_replace(view);
    }
}

impl Drop for AppController {
    fn drop(&mut self) {
        if let Some(handle) = lock_unpoisoned(&self.watcher).take() {
            handle.abort();
        }
    }
}

async fn watch_capture(
    flow: Arc<Mutex<FlowState>>,
    capture: Arc<Mutex<Option<CaptureController>>>,
    view_tx: Arc<watch::Sender<AppView>>,
    mut events_rx: mpsc::UnboundedReceiver<CaptureEvent>,
) {
    while let Some(event) = events_rx.recv().await {
        match event {
            CaptureEvent::StateChanged(snapshot) => {
                log_debug!(
                    "capture {} {} progress {}%",
                    snapshot.session.phase.as_str(),
                    snapshot.elapsed_label,
                    snapshot.session.analysis_progress
                );
            }
            CaptureEvent::Completed(record) => {
                let assessment_id = record.assessment_id.clone();
                {
                    let mut flow = flow.lock().await;
                    if let Err(err) = flow.complete(record) {
                        log_error!("dropping result for '{}': {err}", assessment_id);
                        return;
                    }
                    view_tx.send_replace(flow.view());
                }

                if let Some(controller) = capture.lock().await.take() {
                    controller.unmount();
                }
                log_info!("results view active for '{}'", assessment_id);
                return;
            }
        }
    }
}
