//! # Format Strategies
//!
//! A format turns a [`LogMessage`] into a [`Rendered`] value. Three shapes
//! are supported:
//!
//! - **Unset**: the message's default rendering (`message - level - machine - date\n`)
//! - **Template**: a printf-style template, see [`LogMessage::apply_template`]
//! - **Function**: any closure `Fn(&LogMessage) -> Rendered`
//!
//! ## Example
//!
//! ```rust
//! use analog::{Format, LogMessage, Rendered};
//!
//! let msg = LogMessage::new("boot", 6, Some("web"));
//!
//! let template = Format::from("%s [%d]");
//! assert_eq!(template.render(&msg).unwrap(), Rendered::from("boot [6]"));
//!
//! // Structured output for a callback location
//! let structured = Format::function(|m: &LogMessage| Rendered::Value(serde_json::json!({
//!     "msg": m.message(),
//!     "host": m.machine(),
//! })));
//! assert!(matches!(structured.render(&msg).unwrap(), Rendered::Value(_)));
//! ```

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::error::FormatError;
use crate::message::LogMessage;

/// Shared formatting closure.
pub type FormatFn = Arc<dyn Fn(&LogMessage) -> Rendered + Send + Sync>;

/// A rendered log record
#[derive(Debug, Clone, PartialEq)]
pub enum Rendered
{
    /// Text written verbatim
    Text(String),
    /// Structured record; files receive its compact JSON form
    Value(Value),
}

impl Rendered
{
    /// Bytes written to a file destination.
    pub fn into_bytes(self) -> Vec<u8>
    {
        match self {
            Rendered::Text(text) => text.into_bytes(),
            Rendered::Value(value) => value.to_string().into_bytes(),
        }
    }

    pub fn as_text(&self) -> Option<&str>
    {
        match self {
            Rendered::Text(text) => Some(text),
            Rendered::Value(_) => None,
        }
    }
}

impl fmt::Display for Rendered
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        match self {
            Rendered::Text(text) => f.write_str(text),
            Rendered::Value(value) => write!(f, "{value}"),
        }
    }
}

impl From<String> for Rendered
{
    fn from(text: String) -> Self
    {
        Rendered::Text(text)
    }
}

impl From<&str> for Rendered
{
    fn from(text: &str) -> Self
    {
        Rendered::Text(text.to_owned())
    }
}

impl From<Value> for Rendered
{
    fn from(value: Value) -> Self
    {
        Rendered::Value(value)
    }
}

/// How messages are rendered before delivery
#[derive(Clone, Default)]
pub enum Format
{
    /// Default rendering of the message
    #[default]
    Unset,
    /// printf-style template over `message, level, machine, date`
    Template(String),
    /// User formatting function
    Function(FormatFn),
}

impl Format
{
    pub fn template(template: impl Into<String>) -> Self
    {
        Format::Template(template.into())
    }

    pub fn function<F>(f: F) -> Self
    where
        F: Fn(&LogMessage) -> Rendered + Send + Sync + 'static,
    {
        Format::Function(Arc::new(f))
    }

    pub fn is_unset(&self) -> bool
    {
        matches!(self, Format::Unset)
    }

    /// Render a message. Called exactly once per write.
    ///
    /// ## Errors
    ///
    /// Only the template variant can fail, see [`LogMessage::apply_template`].
    pub fn render(&self, message: &LogMessage) -> Result<Rendered, FormatError>
    {
        match self {
            Format::Unset => Ok(Rendered::Text(message.to_string())),
            Format::Template(template) => message.apply_template(template).map(Rendered::Text),
            Format::Function(f) => Ok(f(message)),
        }
    }
}

impl fmt::Debug for Format
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        match self {
            Format::Unset => f.write_str("Unset"),
            Format::Template(template) => f.debug_tuple("Template").field(template).finish(),
            Format::Function(_) => f.write_str("Function(..)"),
        }
    }
}

impl From<&str> for Format
{
    fn from(template: &str) -> Self
    {
        Format::Template(template.to_owned())
    }
}

impl From<String> for Format
{
    fn from(template: String) -> Self
    {
        Format::Template(template)
    }
}

impl<T: Into<Format>> From<Option<T>> for Format
{
    fn from(format: Option<T>) -> Self
    {
        format.map_or(Format::Unset, Into::into)
    }
}
