//! # Analog Utilities
//!
//! Shared setup for programs embedding Analog.
//!
//! Analog itself only emits `tracing` events about its own work; this crate
//! installs the subscriber that turns them into output.

pub mod diagnostics;

pub use diagnostics::{
    init_diagnostics, init_diagnostics_to_file, init_diagnostics_with_level, DiagFormat, DiagLevel, DiagnosticsError,
};
pub use tracing::{debug, error, info, trace, warn};
