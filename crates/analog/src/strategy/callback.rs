//! Hand records to a user callback.

use std::fmt;

use tracing::trace;

use super::LogStrategy;
use crate::error::{AnalogError, Result};
use crate::format::Format;
use crate::location::CallbackFn;
use crate::message::LogMessage;

/// Renders each message and passes the result to a callback
///
/// The callback's return value becomes the return value of the write. If the
/// callback fails, its error reaches the caller as [`AnalogError::Callback`]
/// with nothing added.
#[derive(Clone)]
pub struct CallbackStrategy
{
    callback: CallbackFn,
    format: Format,
}

impl CallbackStrategy
{
    pub fn new(callback: CallbackFn, format: Format) -> Self
    {
        Self { callback, format }
    }

    pub fn format(&self) -> &Format
    {
        &self.format
    }
}

impl LogStrategy for CallbackStrategy
{
    fn write_message(&self, message: &LogMessage) -> Result<bool>
    {
        let rendered = self.format.render(message)?;
        let delivered = (self.callback)(rendered).map_err(AnalogError::Callback)?;
        trace!(delivered, "log record handed to callback");
        Ok(delivered)
    }
}

impl fmt::Debug for CallbackStrategy
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        f.debug_struct("CallbackStrategy")
            .field("callback", &"..")
            .field("format", &self.format)
            .finish()
    }
}
