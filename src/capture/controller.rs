use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc, Mutex as StdMutex,
};

use anyhow::Result;
use serde::Serialize;
use tokio::{
    sync::{mpsc, Mutex},
    task::JoinHandle,
    time::{self, MissedTickBehavior},
};
use tokio_util::sync::CancellationToken;

use crate::{
    catalog::resolve_capture_profile,
    models::{CaptureProfile, ResultRecord},
    settings::CaptureTiming,
    utils::lock_unpoisoned,
};

use super::{
    device::{CameraService, StreamLease, StreamRequest},
    state::{AnalysisTick, CaptureSession, RecordingTick},
    synthesis::ResultSynthesizer,
};

const ENABLE_LOGS: bool = true;
const LOG_TARGET: &str = "athletex::capture";

use crate::{log_debug, log_error, log_info};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CaptureSnapshot {
    pub session: CaptureSession,
    pub profile: &'static CaptureProfile,
    pub recording_percent: u8,
    pub elapsed_label: String,
    pub live_preview: bool,
}

#[derive(Debug, Clone)]
pub enum CaptureEvent {
    StateChanged(CaptureSnapshot),
    /// Sent once per attempt, when analysis reaches 100.
    Completed(ResultRecord),
}

#[derive(Debug, Clone, Copy)]
enum TickerPhase {
    Recording,
    Analysis,
}

struct CaptureInner {
    profile: &'static CaptureProfile,
    state: Mutex<CaptureSession>,
    lease: StdMutex<Option<StreamLease>>,
    ticker: StdMutex<Option<JoinHandle<()>>>,
    camera: Arc<dyn CameraService>,
    timing: CaptureTiming,
    synthesizer: StdMutex<ResultSynthesizer>,
    events: mpsc::UnboundedSender<CaptureEvent>,
    completed: AtomicBool,
    cancel: CancellationToken,
}

/// Drives one capture screen: owns the camera lease, the capture session and
/// whichever timer task is running. Dropping the controller stops the timer
/// and releases the camera.
pub struct CaptureController {
    inner: Arc<CaptureInner>,
}

impl CaptureController {
    /// Resolves the profile for `assessment_id` and asks the camera for a
    /// preview stream. A camera failure is logged and the screen carries on
    /// without preview. Invalid timing or an empty score band is rejected
    /// before anything is acquired.
    pub async fn mount(
        assessment_id: &str,
        camera: Arc<dyn CameraService>,
        timing: CaptureTiming,
        synthesizer: ResultSynthesizer,
        events: mpsc::UnboundedSender<CaptureEvent>,
    ) -> Result<Self> {
        timing.validate()?;
        synthesizer.band().validate()?;
        let profile = resolve_capture_profile(assessment_id);
        let session =
            CaptureSession::new(assessment_id, profile.duration_secs, timing.analysis_step);

        log_info!(
            "mounting capture for '{}' ({}s, session {})",
            assessment_id,
            profile.duration_secs,
            session.session_id
        );

        let inner = Arc::new(CaptureInner {
            profile,
            state: Mutex::new(session),
            lease: StdMutex::new(None),
            ticker: StdMutex::new(None),
            camera,
            timing,
            synthesizer: StdMutex::new(synthesizer),
            events,
            completed: AtomicBool::new(false),
            cancel: CancellationToken::new(),
        });

        inner.acquire_preview().await;
        inner.emit_state_changed().await;

        Ok(Self { inner })
    }

    pub fn profile(&self) -> &'static CaptureProfile {
        self.inner.profile
    }

    pub fn has_live_preview(&self) -> bool {
        self.inner.has_live_preview()
    }

    pub async fn session(&self) -> CaptureSession {
        self.inner.state.lock().await.clone()
    }

    pub async fn snapshot(&self) -> CaptureSnapshot {
        let session = self.session().await;
        self.inner.snapshot_of(session)
    }

    pub async fn start_recording(&self) -> Result<CaptureSnapshot> {
        {
            let mut state = self.inner.state.lock().await;
            state.start_recording()?;
            log_info!(
                "recording started for '{}' (session {})",
                state.assessment_id,
                state.session_id
            );
        }

        self.inner.spawn_ticker(TickerPhase::Recording);
        self.inner.emit_state_changed().await;
        Ok(self.snapshot().await)
    }

    /// Ends recording before the configured duration and starts analysis.
    pub async fn stop_recording(&self) -> Result<CaptureSnapshot> {
        {
            let mut state = self.inner.state.lock().await;
            state.stop_recording()?;
            log_info!(
                "recording stopped manually at {}s (session {})",
                state.elapsed_secs,
                state.session_id
            );
        }

        self.inner.release_device();
        // Replaces the recording ticker; it has not seen the transition.
        self.inner.spawn_ticker(TickerPhase::Analysis);
        self.inner.emit_state_changed().await;
        Ok(self.snapshot().await)
    }

    /// Starts a fresh attempt after a completed one and re-acquires the
    /// camera. `AppController` unmounts the capture screen as soon as it sees
    /// the completion, so this is only reachable by a caller that mounted the
    /// controller itself.
    pub async fn retry(&self) -> Result<CaptureSnapshot> {
        {
            let mut state = self.inner.state.lock().await;
            state.reset_for_retry()?;
            log_info!("retrying '{}' as session {}", state.assessment_id, state.session_id);
        }

        self.inner.completed.store(false, Ordering::SeqCst);
        self.inner.acquire_preview().await;
        self.inner.emit_state_changed().await;
        Ok(self.snapshot().await)
    }

    /// Tears the screen down. Equivalent to dropping the controller.
    pub fn unmount(self) {
        log_info!("unmounting capture for '{}'", self.inner.profile.id);
    }
}

impl Drop for CaptureController {
    fn drop(&mut self) {
        self.inner.shutdown();
    }
}

impl CaptureInner {
    async fn acquire_preview(&self) {
        match self.camera.acquire(&StreamRequest::front_camera()).await {
            Ok(stream) => {
                log_debug!("camera stream {} acquired", stream.id);
                let mut lease = lock_unpoisoned(&self.lease);
                // Any previous lease is stopped by its Drop.
                *lease = Some(StreamLease::new(stream));
            }
            Err(err) => {
                log_error!("Error accessing camera: {err:#}");
            }
        }
    }

    fn has_live_preview(&self) -> bool {
        lock_unpoisoned(&self.lease)
            .as_ref()
            .map(StreamLease::is_active)
            .unwrap_or(false)
    }

    fn release_device(&self) {
        if let Some(mut lease) = lock_unpoisoned(&self.lease).take() {
            lease.release();
        }
    }

    fn shutdown(&self) {
        self.cancel.cancel();
        if let Some(handle) = lock_unpoisoned(&self.ticker).take() {
            handle.abort();
        }
        self.release_device();
    }

    fn spawn_ticker(self: &Arc<Self>, phase: TickerPhase) {
        let mut ticker = lock_unpoisoned(&self.ticker);
        if let Some(handle) = ticker.take() {
            handle.abort();
        }

        let inner = Arc::clone(self);
        let handle = tokio::spawn(async move {
            match phase {
                TickerPhase::Recording => inner.run_recording().await,
                TickerPhase::Analysis => inner.run_analysis().await,
            }
        });
        *ticker = Some(handle);
    }

    /// Recording loop. Its final tick performs the phase change and then runs
    /// the analysis loop on the same task, so no analysis tick can precede it.
    async fn run_recording(&self) {
        let mut interval = time::interval(self.timing.recording_tick());
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        interval.tick().await;

        loop {
            tokio::select! {
                _ = interval.tick() => {}
                _ = self.cancel.cancelled() => {
                    log_debug!("recording ticker cancelled");
                    return;
                }
            }

            let (outcome, session) = {
                let mut state = self.state.lock().await;
                let outcome = state.tick_recording();
                (outcome, state.clone())
            };

            match outcome {
                RecordingTick::Idle => return,
                RecordingTick::Continue => {
                    log_debug!("recording {}s / {}s", session.elapsed_secs, session.duration_secs);
                    self.emit(CaptureEvent::StateChanged(self.snapshot_of(session)));
                }
                RecordingTick::Finished => {
                    log_info!(
                        "recording reached {}s, starting analysis (session {})",
                        session.elapsed_secs,
                        session.session_id
                    );
                    self.release_device();
                    self.emit(CaptureEvent::StateChanged(self.snapshot_of(session)));
                    break;
                }
            }
        }

        self.run_analysis().await;
    }

    async fn run_analysis(&self) {
        let mut interval = time::interval(self.timing.analysis_tick());
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        interval.tick().await;

        loop {
            tokio::select! {
                _ = interval.tick() => {}
                _ = self.cancel.cancelled() => {
                    log_debug!("analysis ticker cancelled");
                    return;
                }
            }

            let (outcome, session) = {
                let mut state = self.state.lock().await;
                let outcome = state.tick_analysis();
                (outcome, state.clone())
            };

            match outcome {
                AnalysisTick::Idle => return,
                AnalysisTick::Continue => {
                    log_debug!("analysis {}%", session.analysis_progress);
                    self.emit(CaptureEvent::StateChanged(self.snapshot_of(session)));
                }
                AnalysisTick::Finished => {
                    self.emit(CaptureEvent::StateChanged(self.snapshot_of(session.clone())));
                    self.finish(&session);
                    return;
                }
            }
        }
    }

    fn finish(&self, session: &CaptureSession) {
        if self.completed.swap(true, Ordering::SeqCst) {
            return;
        }

        let record = lock_unpoisoned(&self.synthesizer)
            .synthesize(&session.session_id, &session.assessment_id);
        log_info!(
            "analysis complete for '{}': score {} (session {})",
            record.assessment_id,
            record.score,
            record.session_id
        );
        self.emit(CaptureEvent::Completed(record));
    }

    fn snapshot_of(&self, session: CaptureSession) -> CaptureSnapshot {
        CaptureSnapshot {
            recording_percent: session.recording_percent(),
            elapsed_label: session.elapsed_label(),
            live_preview: self.has_live_preview(),
            profile: self.profile,
            session,
        }
    }

    async fn emit_state_changed(&self) {
        let session = self.state.lock().await.clone();
        self.emit(CaptureEvent::StateChanged(self.snapshot_of(session)));
    }

    fn emit(&self, event: CaptureEvent) {
        // The receiver goes away when the root controller moves on; late
        // ticks are simply dropped.
        let _ = self.events.send(event);
    }
}
