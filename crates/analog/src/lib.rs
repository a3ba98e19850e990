//! # analog
//!
//! A small, synchronous logger with pluggable format and location strategies.
//!
//! Each call to [`Analog::log`] builds a [`LogMessage`] (message, level,
//! machine, date), renders it with the configured [`Format`] and delivers it
//! to the configured [`Location`]:
//!
//! - **File** (default): appended to a file under an exclusive, non-blocking
//!   lock; `<temp dir>/analog.txt` when no path is set
//! - **Callback**: handed to a user function that decides what to do with it
//!
//! The call blocks until the write is done and returns its outcome. There is
//! no buffering, no background thread and no retry.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use analog::{Analog, Level};
//!
//! let logger = Analog::new();
//! logger.log("Log this error", Level::ERROR)?;
//! logger.log("Debugging info", Level::DEBUG)?;
//! # Ok::<(), analog::AnalogError>(())
//! ```
//!
//! ## Default record format
//!
//! ```text
//! <message> - <level> - <machine> - <YYYY-MM-DD HH:MM:SS>\n
//! ```

pub mod error;
pub mod format;
pub mod global;
pub mod guards;
pub mod level;
pub mod location;
pub mod logger;
pub mod message;
pub mod prelude;
pub mod strategy;
pub mod writer;

mod template;

pub use error::{AnalogError, BoxError, FormatError, Result};
pub use format::{Format, FormatFn, Rendered};
pub use level::Level;
pub use location::{default_location, CallbackFn, Location};
pub use logger::{Analog, Config};
pub use message::LogMessage;
pub use strategy::{CallbackStrategy, FileStrategy, LogStrategy, Strategy, StrategyKind};
pub use writer::LogWriter;
