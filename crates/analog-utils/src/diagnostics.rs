//! # Diagnostics
//!
//! `tracing` subscriber setup for programs that embed Analog.
//!
//! Analog reports what it does internally (which strategy was picked, lock
//! contention, completed writes) through `tracing`, never through its own log
//! destination. Nothing is printed unless the host installs a subscriber;
//! this module is the one-call way to do that.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use analog_utils::init_diagnostics;
//!
//! // Reads RUST_LOG, ANALOG_DIAG_FORMAT and ANALOG_DIAG_FILE
//! init_diagnostics().expect("Failed to initialize diagnostics");
//! ```
//!
//! ## Environment Variables
//!
//! - `RUST_LOG`: level filter (e.g. `RUST_LOG=analog=trace`)
//! - `ANALOG_DIAG_FORMAT`: `pretty` (default) or `json`
//! - `ANALOG_DIAG_FILE`: write to this file instead of stderr

use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::{env, io};

use tracing::Level;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt::time::ChronoUtc;
use tracing_subscriber::fmt::{self, MakeWriter};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry};

/// Environment variable selecting the output format.
pub const FORMAT_VAR: &str = "ANALOG_DIAG_FORMAT";

/// Environment variable naming a diagnostics file.
pub const FILE_VAR: &str = "ANALOG_DIAG_FILE";

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync + 'static>;

/// Diagnostics output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DiagFormat
{
    /// Human-readable lines
    #[default]
    Pretty,
    /// One JSON object per event
    Json,
}

impl FromStr for DiagFormat
{
    type Err = DiagnosticsError;

    fn from_str(s: &str) -> Result<Self, Self::Err>
    {
        match s.to_lowercase().as_str() {
            "pretty" | "text" | "dev" => Ok(DiagFormat::Pretty),
            "json" | "prod" => Ok(DiagFormat::Json),
            _ => Err(DiagnosticsError::InvalidFormat(s.to_string())),
        }
    }
}

/// Diagnostics verbosity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DiagLevel
{
    Error,
    Warn,
    /// Default
    #[default]
    Info,
    Debug,
    /// Includes one event per completed write
    Trace,
}

impl From<DiagLevel> for Level
{
    fn from(level: DiagLevel) -> Self
    {
        match level {
            DiagLevel::Error => Level::ERROR,
            DiagLevel::Warn => Level::WARN,
            DiagLevel::Info => Level::INFO,
            DiagLevel::Debug => Level::DEBUG,
            DiagLevel::Trace => Level::TRACE,
        }
    }
}

/// Map an Analog severity onto the closest diagnostics verbosity.
///
/// URGENT through ERROR map to `Error`, WARNING to `Warn`, NOTICE and INFO to
/// `Info`, DEBUG to `Debug`; anything outside the named ranks is `Trace`.
impl From<analog::Level> for DiagLevel
{
    fn from(level: analog::Level) -> Self
    {
        match level.value() {
            0..=3 => DiagLevel::Error,
            4 => DiagLevel::Warn,
            5 | 6 => DiagLevel::Info,
            7 => DiagLevel::Debug,
            _ => DiagLevel::Trace,
        }
    }
}

impl FromStr for DiagLevel
{
    type Err = DiagnosticsError;

    fn from_str(s: &str) -> Result<Self, Self::Err>
    {
        match s.to_lowercase().as_str() {
            "error" | "err" => Ok(DiagLevel::Error),
            "warn" | "warning" => Ok(DiagLevel::Warn),
            "info" => Ok(DiagLevel::Info),
            "debug" | "dbg" => Ok(DiagLevel::Debug),
            "trace" => Ok(DiagLevel::Trace),
            _ => Err(DiagnosticsError::InvalidLevel(s.to_string())),
        }
    }
}

/// Install a subscriber configured from the environment.
///
/// `RUST_LOG` selects the filter (default `info`), `ANALOG_DIAG_FORMAT` the
/// format (default pretty). If `ANALOG_DIAG_FILE` is set, events go to that
/// file and the returned guard must be kept alive to flush them.
///
/// ## Errors
///
/// - `InvalidFormat`: `ANALOG_DIAG_FORMAT` is set to an unknown value
/// - `FileError`: the diagnostics file cannot be created
/// - `InitializationFailed`: a global subscriber is already installed
pub fn init_diagnostics() -> Result<Option<WorkerGuard>, DiagnosticsError>
{
    let format = match env::var(FORMAT_VAR) {
        Ok(value) => value.parse()?,
        Err(_) => DiagFormat::default(),
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(Level::INFO.to_string()));

    match env::var(FILE_VAR).ok().map(PathBuf::from) {
        Some(path) => init_file(&path, format, filter).map(Some),
        None => {
            install(build_layer(format, io::stderr, true, filter))?;
            Ok(None)
        }
    }
}

/// Install a stderr subscriber with an explicit level and format.
///
/// ## Errors
///
/// `InitializationFailed` if a global subscriber is already installed.
pub fn init_diagnostics_with_level(level: DiagLevel, format: DiagFormat) -> Result<(), DiagnosticsError>
{
    let filter = EnvFilter::new(Level::from(level).to_string());
    install(build_layer(format, io::stderr, true, filter))
}

/// Install a file-only subscriber.
///
/// The file is appended to and never rotated. Events are handed to a
/// background writer; keep the returned guard alive until shutdown so
/// buffered events are flushed.
///
/// ## Errors
///
/// - `FileError`: the parent directory cannot be created
/// - `InitializationFailed`: a global subscriber is already installed
pub fn init_diagnostics_to_file(
    path: &Path,
    level: DiagLevel,
    format: DiagFormat,
) -> Result<WorkerGuard, DiagnosticsError>
{
    let filter = EnvFilter::new(Level::from(level).to_string());
    init_file(path, format, filter)
}

fn init_file(path: &Path, format: DiagFormat, filter: EnvFilter) -> Result<WorkerGuard, DiagnosticsError>
{
    let dir = path.parent().filter(|p| !p.as_os_str().is_empty()).unwrap_or(Path::new("."));
    let file_name = path
        .file_name()
        .ok_or_else(|| DiagnosticsError::InvalidPath(path.to_path_buf()))?;
    std::fs::create_dir_all(dir)?;

    let appender = tracing_appender::rolling::never(dir, file_name);
    let (writer, guard) = tracing_appender::non_blocking(appender);
    install(build_layer(format, writer, false, filter))?;
    Ok(guard)
}

fn build_layer<W>(format: DiagFormat, writer: W, ansi: bool, filter: EnvFilter) -> BoxedLayer
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let layer = fmt::layer()
        .with_writer(writer)
        .with_target(true)
        .with_thread_ids(true)
        .with_thread_names(true)
        .with_file(true)
        .with_line_number(true)
        .with_timer(ChronoUtc::rfc_3339());

    match format {
        DiagFormat::Pretty => layer.with_ansi(ansi).with_filter(filter).boxed(),
        DiagFormat::Json => layer
            .json()
            .with_current_span(true)
            .with_span_list(true)
            .with_filter(filter)
            .boxed(),
    }
}

fn install(layer: BoxedLayer) -> Result<(), DiagnosticsError>
{
    Registry::default()
        .with(layer)
        .try_init()
        .map_err(|err| DiagnosticsError::InitializationFailed(err.to_string()))
}

/// Diagnostics initialization error
#[derive(Debug, thiserror::Error)]
pub enum DiagnosticsError
{
    /// Invalid diagnostics format
    #[error("Invalid diagnostics format: {0}. Use 'pretty' or 'json'")]
    InvalidFormat(String),

    /// Invalid diagnostics level
    #[error("Invalid diagnostics level: {0}. Use 'error', 'warn', 'info', 'debug', or 'trace'")]
    InvalidLevel(String),

    /// Path has no file name component
    #[error("Invalid diagnostics file path: {}", .0.display())]
    InvalidPath(PathBuf),

    /// A global subscriber was already installed
    #[error("Failed to initialize diagnostics: {0}")]
    InitializationFailed(String),

    /// Diagnostics file error
    #[error("Diagnostics file error: {0}")]
    FileError(#[from] io::Error),
}
