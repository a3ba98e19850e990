//! Common module for library exports

pub use crate::error::{AnalogError, Result};
pub use crate::format::{Format, Rendered};
pub use crate::level::Level;
pub use crate::location::Location;
pub use crate::logger::{Analog, Config};
pub use crate::message::LogMessage;
pub use crate::strategy::LogStrategy;
