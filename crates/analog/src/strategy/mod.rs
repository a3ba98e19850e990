//! # Writer Strategies
//!
//! A writer strategy takes a [`LogMessage`], renders it with the configured
//! [`Format`](crate::Format) and delivers it somewhere. Two strategies exist:
//!
//! - [`FileStrategy`]: append to a file under an exclusive, non-blocking lock
//! - [`CallbackStrategy`]: hand the rendered record to a user callback
//!
//! ## Why use a trait?
//!
//! The dispatcher only needs "write this message". Keeping that behind
//! [`LogStrategy`] lets tests and host programs drive either strategy
//! directly, without going through a logger.

mod callback;
mod file;

pub use callback::CallbackStrategy;
pub use file::FileStrategy;

use crate::error::Result;
use crate::message::LogMessage;

/// Delivery interface shared by every writer strategy
pub trait LogStrategy
{
    /// Render and deliver one message.
    ///
    /// Returns the strategy's success value: `true` for files, whatever the
    /// callback returned for callbacks.
    ///
    /// ## Errors
    ///
    /// Every failure is returned as-is; strategies never retry.
    fn write_message(&self, message: &LogMessage) -> Result<bool>;
}

/// Which strategy a [`LogWriter`](crate::LogWriter) selected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrategyKind
{
    File,
    Callback,
}

/// The strategy chosen for one dispatch
#[derive(Debug, Clone)]
pub enum Strategy
{
    File(FileStrategy),
    Callback(CallbackStrategy),
}

impl Strategy
{
    pub fn kind(&self) -> StrategyKind
    {
        match self {
            Strategy::File(_) => StrategyKind::File,
            Strategy::Callback(_) => StrategyKind::Callback,
        }
    }

    pub fn as_file(&self) -> Option<&FileStrategy>
    {
        match self {
            Strategy::File(file) => Some(file),
            Strategy::Callback(_) => None,
        }
    }

    pub fn as_callback(&self) -> Option<&CallbackStrategy>
    {
        match self {
            Strategy::Callback(callback) => Some(callback),
            Strategy::File(_) => None,
        }
    }
}

impl LogStrategy for Strategy
{
    fn write_message(&self, message: &LogMessage) -> Result<bool>
    {
        match self {
            Strategy::File(file) => file.write_message(message),
            Strategy::Callback(callback) => callback.write_message(message),
        }
    }
}
