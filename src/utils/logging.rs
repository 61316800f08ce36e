//! Per-module logging macros.
//!
//! A module opts in by defining two consts before using the macros:
//! ```ignore
//! const ENABLE_LOGS: bool = true;
//! const LOG_TARGET: &str = "athletex::capture";
//!
//! use crate::{log_info, log_warn};
//!
//! log_info!("recording started for {}", assessment_id);
//! ```
//! Setting `ENABLE_LOGS` to false silences the module without touching
//! `RUST_LOG`; the target lets `RUST_LOG=athletex::capture=debug` pick out
//! one subsystem.

/// Info-level record under the calling module's `LOG_TARGET`.
#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => {
        if ENABLE_LOGS {
            log::info!(target: LOG_TARGET, $($arg)*);
        }
    };
}

/// Warn-level record under the calling module's `LOG_TARGET`.
#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => {
        if ENABLE_LOGS {
            log::warn!(target: LOG_TARGET, $($arg)*);
        }
    };
}

/// Error-level record under the calling module's `LOG_TARGET`.
#[macro_export]
macro_rules! log_error {
    ($($arg:tt)*) => {
        if ENABLE_LOGS {
            log::error!(target: LOG_TARGET, $($arg)*);
        }
    };
}

/// Debug-level record, used for per-tick chatter.
#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)*) => {
        if ENABLE_LOGS {
            log::debug!(target: LOG_TARGET, $($arg)*);
        }
    };
}
