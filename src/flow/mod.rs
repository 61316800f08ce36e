pub mod commands;
pub mod controller;
pub mod state;

pub use controller::{AppController, AppSnapshot};
pub use state::{AppView, FlowState};
