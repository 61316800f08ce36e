pub mod controller;
pub mod device;
pub mod state;
pub mod synthesis;

pub use controller::{CaptureController, CaptureEvent, CaptureSnapshot};
pub use device::{CameraService, MediaStream, SimulatedCamera, StreamLease, StreamRequest};
pub use state::{CapturePhase, CaptureSession};
pub use synthesis::ResultSynthesizer;
