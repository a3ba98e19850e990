//! # Logger
//!
//! The `Analog` facade: holds the current format and location and turns each
//! `log` call into a `LogMessage` written through a freshly built `LogWriter`.
//!
//! ## Lifecycle
//!
//! 1. Create a logger: `Analog::new()` (both settings unset)
//! 2. Configure it at any time: `set_format(..)`, `set_location(..)`
//! 3. Log: `log(message, level)` or a per-level helper like `error(..)`
//!
//! Each call reads a snapshot of the configuration, so a setter called from
//! another thread affects the next call, never one in flight.
//!
//! ## Example
//!
//! ```rust,no_run
//! use analog::{Analog, Level, Location};
//!
//! let logger = Analog::new();
//! logger.set_format("%s [%d]\n");
//! logger.set_location("/var/log/app.log");
//! logger.log("Log this error", Level::ERROR)?;
//!
//! // Deliver somewhere else entirely
//! logger.set_location(Location::callback(|record| {
//!     eprintln!("{record}");
//!     Ok(true)
//! }));
//! logger.debug("Debugging info")?;
//! # Ok::<(), analog::AnalogError>(())
//! ```

use std::sync::{PoisonError, RwLock};

use serde_json::Value;

use crate::error::Result;
use crate::format::Format;
use crate::level::Level;
use crate::location::Location;
use crate::message::LogMessage;
use crate::writer::LogWriter;

/// Format and location of a logger
#[derive(Debug, Clone, Default)]
pub struct Config
{
    pub format: Format,
    pub location: Location,
}

impl Config
{
    pub fn new(format: impl Into<Format>, location: impl Into<Location>) -> Self
    {
        Self {
            format: format.into(),
            location: location.into(),
        }
    }
}

/// Synchronous logger with swappable format and location
///
/// Every call is written whatever its level; there is no threshold. Writes
/// are not serialized by the logger itself, only by the file lock of the
/// file strategy.
#[derive(Debug, Default)]
pub struct Analog
{
    config: RwLock<Config>,
}

impl Analog
{
    pub fn new() -> Self
    {
        Self::default()
    }

    pub fn with_config(config: Config) -> Self
    {
        Self {
            config: RwLock::new(config),
        }
    }

    /// Replace the format. No validation happens until the next write.
    pub fn set_format(&self, format: impl Into<Format>)
    {
        self.config.write().unwrap_or_else(PoisonError::into_inner).format = format.into();
    }

    /// Replace the location. No validation happens until the next write.
    pub fn set_location(&self, location: impl Into<Location>)
    {
        self.config.write().unwrap_or_else(PoisonError::into_inner).location = location.into();
    }

    /// Put both settings back to unset.
    pub fn reset(&self)
    {
        *self.config.write().unwrap_or_else(PoisonError::into_inner) = Config::default();
    }

    /// Snapshot of the current configuration.
    pub fn config(&self) -> Config
    {
        self.config.read().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// Write one message.
    ///
    /// Returns `Ok(true)` for file writes and the callback's own value for
    /// callback locations.
    ///
    /// ## Errors
    ///
    /// Any error from the selected strategy, unchanged: `FileOpen`, `Lock`,
    /// `Write`, `Format` or `Callback`.
    pub fn log(&self, message: impl Into<Value>, level: impl Into<Level>) -> Result<bool>
    {
        let message = LogMessage::new(message, level, None);
        let writer = LogWriter::from_config(&self.config());
        writer.write_message(&message)
    }

    pub fn urgent(&self, message: impl Into<Value>) -> Result<bool>
    {
        self.log(message, Level::URGENT)
    }

    pub fn alert(&self, message: impl Into<Value>) -> Result<bool>
    {
        self.log(message, Level::ALERT)
    }

    pub fn critical(&self, message: impl Into<Value>) -> Result<bool>
    {
        self.log(message, Level::CRITICAL)
    }

    /// Log at the default level.
    pub fn error(&self, message: impl Into<Value>) -> Result<bool>
    {
        self.log(message, Level::default())
    }

    pub fn warning(&self, message: impl Into<Value>) -> Result<bool>
    {
        self.log(message, Level::WARNING)
    }

    pub fn notice(&self, message: impl Into<Value>) -> Result<bool>
    {
        self.log(message, Level::NOTICE)
    }

    pub fn info(&self, message: impl Into<Value>) -> Result<bool>
    {
        self.log(message, Level::INFO)
    }

    pub fn debug(&self, message: impl Into<Value>) -> Result<bool>
    {
        self.log(message, Level::DEBUG)
    }
}
