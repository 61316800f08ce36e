//! Camera acquisition seam.
//!
//! The capture controller only ever talks to a [`CameraService`]. Whatever it
//! hands back is wrapped in a [`StreamLease`] so every track gets stopped on
//! every exit path, including a plain drop.

use std::sync::{
    atomic::{AtomicBool, AtomicU64, Ordering},
    Arc,
};

use anyhow::Result;
use async_trait::async_trait;
use serde::Serialize;
use uuid::Uuid;

const ENABLE_LOGS: bool = true;
const LOG_TARGET: &str = "athletex::capture::device";

use crate::log_debug;

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum FacingMode {
    User,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct StreamRequest {
    pub video: Option<FacingMode>,
    pub audio: bool,
}

impl StreamRequest {
    /// Front-facing video, no audio.
    pub fn front_camera() -> Self {
        Self {
            video: Some(FacingMode::User),
            audio: false,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum TrackKind {
    Video,
    Audio,
}

pub trait MediaTrack: Send + Sync {
    fn kind(&self) -> TrackKind;
    fn label(&self) -> &str;
    fn stop(&self);
    fn is_live(&self) -> bool;
}

pub struct MediaStream {
    pub id: String,
    tracks: Vec<Box<dyn MediaTrack>>,
}

impl MediaStream {
    pub fn new(tracks: Vec<Box<dyn MediaTrack>>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            tracks,
        }
    }

    pub fn tracks(&self) -> &[Box<dyn MediaTrack>] {
        &self.tracks
    }

    pub fn live_track_count(&self) -> usize {
        self.tracks.iter().filter(|track| track.is_live()).count()
    }

    pub fn stop_all(&self) {
        for track in &self.tracks {
            if track.is_live() {
                track.stop();
            }
        }
    }
}

impl std::fmt::Debug for MediaStream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MediaStream")
            .field("id", &self.id)
            .field("tracks", &self.tracks.len())
            .finish()
    }
}

#[async_trait]
pub trait CameraService: Send + Sync {
    async fn acquire(&self, request: &StreamRequest) -> Result<MediaStream>;
}

/// Exclusive hold on an acquired stream. Stops every track when released or
/// dropped; releasing twice is a no-op.
#[derive(Debug)]
pub struct StreamLease {
    stream: Option<MediaStream>,
}

impl StreamLease {
    pub fn new(stream: MediaStream) -> Self {
        Self {
            stream: Some(stream),
        }
    }

    pub fn is_active(&self) -> bool {
        self.stream
            .as_ref()
            .map(|stream| stream.live_track_count() > 0)
            .unwrap_or(false)
    }

    pub fn release(&mut self) {
        if let Some(stream) = self.stream.take() {
            log_debug!("releasing stream {}", stream.id);
            stream.stop_all();
        }
    }
}

impl Drop for StreamLease {
    fn drop(&mut self) {
        self.release();
    }
}

/// Track handed out by [`SimulatedCamera`]. Carries no frames.
pub struct SimulatedTrack {
    kind: TrackKind,
    label: String,
    live: AtomicBool,
    stops: Arc<AtomicU64>,
}

impl MediaTrack for SimulatedTrack {
    fn kind(&self) -> TrackKind {
        self.kind
    }

    fn label(&self) -> &str {
        &self.label
    }

    fn stop(&self) {
        if self.live.swap(false, Ordering::SeqCst) {
            self.stops.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn is_live(&self) -> bool {
        self.live.load(Ordering::SeqCst)
    }
}

/// Camera that always succeeds and counts acquisitions and track stops.
#[derive(Default)]
pub struct SimulatedCamera {
    acquired: AtomicU64,
    stops: Arc<AtomicU64>,
}

impl SimulatedCamera {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn acquire_count(&self) -> u64 {
        self.acquired.load(Ordering::SeqCst)
    }

    pub fn stop_count(&self) -> u64 {
        self.stops.load(Ordering::SeqCst)
    }

    /// Tracks handed out and not yet stopped.
    pub fn live_tracks(&self) -> u64 {
        self.acquire_count() - self.stop_count()
    }
}

#[async_trait]
impl CameraService for SimulatedCamera {
    async fn acquire(&self, request: &StreamRequest) -> Result<MediaStream> {
        let mut tracks: Vec<Box<dyn MediaTrack>> = Vec::new();
        if request.video.is_some() {
            tracks.push(Box::new(SimulatedTrack {
                kind: TrackKind::Video,
                label: "simulated front camera".into(),
                live: AtomicBool::new(true),
                stops: Arc::clone(&self.stops),
            }));
        }
        if request.audio {
            tracks.push(Box::new(SimulatedTrack {
                kind: TrackKind::Audio,
                label: "simulated microphone".into(),
                live: AtomicBool::new(true),
                stops: Arc::clone(&self.stops),
            }));
        }
        self.acquired
            .fetch_add(tracks.len() as u64, Ordering::SeqCst);
        Ok(MediaStream::new(tracks))
    }
}

/// Camera that always fails, as a browser does when permission is denied.
#[derive(Debug, Default)]
pub struct UnavailableCamera {
    attempts: AtomicU64,
}

impl UnavailableCamera {
    pub fn attempts(&self) -> u64 {
        self.attempts.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CameraService for UnavailableCamera {
    async fn acquire(&self, _request: &StreamRequest) -> Result<MediaStream> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        anyhow::bail!("NotAllowedError: camera permission denied")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn front_camera_request_yields_one_video_track() {
        let camera = SimulatedCamera::new();
        let stream = camera.acquire(&StreamRequest::front_camera()).await.unwrap();
        assert_eq!(stream.tracks().len(), 1);
        assert_eq!(stream.tracks()[0].kind(), TrackKind::Video);
        assert_eq!(stream.tracks()[0].label(), "simulated front camera");
        assert_eq!(camera.live_tracks(), 1);
    }

    #[tokio::test]
    async fn lease_stops_tracks_once_on_release_and_drop() {
        let camera = SimulatedCamera::new();
        let stream = camera.acquire(&StreamRequest::front_camera()).await.unwrap();
        let mut lease = StreamLease::new(stream);
        assert!(lease.is_active());

        lease.release();
        assert!(!lease.is_active());
        assert_eq!(camera.stop_count(), 1);

        drop(lease);
        assert_eq!(camera.stop_count(), 1);
        assert_eq!(camera.live_tracks(), 0);
    }

    #[tokio::test]
    async fn dropping_lease_stops_tracks() {
        let camera = SimulatedCamera::new();
        let request = StreamRequest {
            video: Some(FacingMode::User),
            audio: true,
        };
        let lease = StreamLease::new(camera.acquire(&request).await.unwrap());
        assert_eq!(camera.live_tracks(), 2);
        drop(lease);
        assert_eq!(camera.live_tracks(), 0);
    }

    #[tokio::test]
    async fn audio_only_request_yields_no_video() {
        let camera = SimulatedCamera::new();
        let request = StreamRequest {
            video: None,
            audio: true,
        };
        let stream = camera.acquire(&request).await.unwrap();
        assert_eq!(stream.tracks().len(), 1);
        assert_eq!(stream.tracks()[0].kind(), TrackKind::Audio);
    }

    #[tokio::test]
    async fn unavailable_camera_reports_error() {
        let camera = UnavailableCamera::default();
        let err = camera
            .acquire(&StreamRequest::front_camera())
            .await
            .unwrap_err();
        assert!(err.to_string().contains("permission denied"));
        assert_eq!(camera.attempts(), 1);
    }
}
