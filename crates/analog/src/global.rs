//! Optional process-wide logger.
//!
//! Nothing is global until [`init`] is called. After that, the free functions
//! in this module forward to the installed [`Analog`] for the rest of the
//! program.
//!
//! ```rust,no_run
//! use analog::{global, Analog, Level};
//!
//! global::init(Analog::new())?;
//! global::set_format("%s (%d)\n")?;
//! global::log("The sky is falling!", Level::ERROR)?;
//! # Ok::<(), analog::AnalogError>(())
//! ```

use once_cell::sync::OnceCell;
use serde_json::Value;

use crate::error::{AnalogError, Result};
use crate::format::Format;
use crate::level::Level;
use crate::location::Location;
use crate::logger::Analog;

static GLOBAL: OnceCell<Analog> = OnceCell::new();

/// Install the process-wide logger.
///
/// ## Errors
///
/// `AlreadyInitialized` if a logger was installed before.
pub fn init(logger: Analog) -> Result<&'static Analog>
{
    GLOBAL.set(logger).map_err(|_| AnalogError::AlreadyInitialized)?;
    GLOBAL.get().ok_or(AnalogError::NotInitialized)
}

pub fn get() -> Option<&'static Analog>
{
    GLOBAL.get()
}

fn installed() -> Result<&'static Analog>
{
    GLOBAL.get().ok_or(AnalogError::NotInitialized)
}

/// See [`Analog::set_format`].
///
/// ## Errors
///
/// `NotInitialized` before [`init`].
pub fn set_format(format: impl Into<Format>) -> Result<()>
{
    installed()?.set_format(format);
    Ok(())
}

/// See [`Analog::set_location`].
///
/// ## Errors
///
/// `NotInitialized` before [`init`].
pub fn set_location(location: impl Into<Location>) -> Result<()>
{
    installed()?.set_location(location);
    Ok(())
}

/// See [`Analog::log`].
///
/// ## Errors
///
/// `NotInitialized` before [`init`], otherwise any error of [`Analog::log`].
pub fn log(message: impl Into<Value>, level: impl Into<Level>) -> Result<bool>
{
    installed()?.log(message, level)
}
