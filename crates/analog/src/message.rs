//! # Log Messages
//!
//! A `LogMessage` is the immutable record of one log event: the message
//! value, its severity, the machine it came from and the time it was created.
//!
//! ## Field order
//!
//! The four fields always appear in the same order, `message, level,
//! machine, date`. Templates consume them in that order and the default
//! rendering joins them in that order:
//!
//! ```text
//! Disk is full - 3 - 10.0.0.12 - 2024-03-09 14:05:07
//! ```
//!
//! ## Machine resolution
//!
//! The machine is the explicit value passed to the constructor if it is
//! non-empty, else the `SERVER_ADDR` environment variable if set and
//! non-empty, else `"localhost"`.

use std::fmt;

use chrono::{DateTime, Local, Timelike};
use serde::{Serialize, Serializer};
use serde_json::Value;

use crate::error::FormatError;
use crate::level::Level;
use crate::template;

/// Environment variable consulted for the default machine identifier.
pub const SERVER_ADDR_VAR: &str = "SERVER_ADDR";

/// Machine identifier used when nothing else is available.
pub const DEFAULT_MACHINE: &str = "localhost";

/// Layout of the `date` field.
pub const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Separator used by the default rendering.
pub const ELEMENT_SEPARATOR: &str = " - ";

/// Names of the message fields, in rendering order.
pub const FIELD_NAMES: [&str; 4] = ["message", "level", "machine", "date"];

/// One log event
///
/// Constructed once per `log` call and never modified afterwards: there are no
/// setters, and the timestamp is read from the clock exactly once, inside the
/// constructor, truncated to whole seconds.
///
/// ## Example
///
/// ```rust
/// use analog::{Level, LogMessage};
///
/// let msg = LogMessage::new("Disk is full", Level::ERROR, Some("db-1"));
/// assert_eq!(msg.machine(), "db-1");
/// assert_eq!(msg.field("level"), Some(serde_json::json!(3)));
/// assert_eq!(msg.field("user"), None);
///
/// let line = msg.to_string();
/// assert!(line.starts_with("Disk is full - 3 - db-1 - "));
/// assert!(line.ends_with('\n'));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LogMessage
{
    message: Value,
    level: Level,
    machine: String,
    #[serde(rename = "date", serialize_with = "serialize_date")]
    timestamp: DateTime<Local>,
}

impl LogMessage
{
    /// Create a message stamped with the current local time.
    ///
    /// `message` may be anything convertible into a JSON value: `&str`,
    /// `String`, numbers, booleans or a `serde_json::Value`.
    pub fn new(message: impl Into<Value>, level: impl Into<Level>, machine: Option<&str>) -> Self
    {
        Self::at(message, level, machine, Local::now())
    }

    /// Create a message with an explicit timestamp.
    ///
    /// The timestamp is truncated to whole seconds, like one read by [`LogMessage::new`].
    pub fn at(
        message: impl Into<Value>,
        level: impl Into<Level>,
        machine: Option<&str>,
        timestamp: DateTime<Local>,
    ) -> Self
    {
        Self {
            message: message.into(),
            level: level.into(),
            machine: resolve_machine(machine),
            timestamp: timestamp.with_nanosecond(0).unwrap_or(timestamp),
        }
    }

    pub fn message(&self) -> &Value
    {
        &self.message
    }

    pub fn level(&self) -> Level
    {
        self.level
    }

    pub fn machine(&self) -> &str
    {
        &self.machine
    }

    pub fn timestamp(&self) -> DateTime<Local>
    {
        self.timestamp
    }

    /// The timestamp as `YYYY-MM-DD HH:MM:SS`.
    pub fn date(&self) -> String
    {
        self.timestamp.format(DATE_FORMAT).to_string()
    }

    /// The four fields as `(name, value)` pairs in rendering order.
    pub fn elements(&self) -> Vec<(&'static str, Value)>
    {
        vec![
            (FIELD_NAMES[0], self.message.clone()),
            (FIELD_NAMES[1], Value::from(self.level.value())),
            (FIELD_NAMES[2], Value::String(self.machine.clone())),
            (FIELD_NAMES[3], Value::String(self.date())),
        ]
    }

    /// Look up a field by name.
    ///
    /// Returns `None` only for names that are not one of the four fields. An
    /// empty message or a level of `0` is still returned as a value.
    pub fn field(&self, name: &str) -> Option<Value>
    {
        self.elements().into_iter().find(|(field, _)| *field == name).map(|(_, value)| value)
    }

    /// Render the message through a printf-style template.
    ///
    /// Placeholders are filled with `message, level, machine, date` in that
    /// order. A template may use fewer placeholders than there are fields.
    ///
    /// ## Errors
    ///
    /// - `MissingArgument`: more than four placeholders, or `%n$` past the fourth
    /// - `InvalidArgumentNumber`: `%0$`
    /// - `UnknownConversion` / `Incomplete`: malformed placeholder
    /// - `TypeMismatch`: a numeric conversion applied to a non-numeric field
    ///
    /// ## Example
    ///
    /// ```rust
    /// use analog::LogMessage;
    ///
    /// let msg = LogMessage::new("Analog Logged", 1, Some("web"));
    /// assert_eq!(msg.apply_template("%s | %d").unwrap(), "Analog Logged | 1");
    /// ```
    pub fn apply_template(&self, template: &str) -> Result<String, FormatError>
    {
        template::sprintf(template, &self.elements())
    }
}

/// Default rendering: field values joined with `" - "`, newline terminated.
impl fmt::Display for LogMessage
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        let joined = self
            .elements()
            .iter()
            .map(|(_, value)| template::display_value(value))
            .collect::<Vec<_>>()
            .join(ELEMENT_SEPARATOR);
        writeln!(f, "{joined}")
    }
}

fn resolve_machine(machine: Option<&str>) -> String
{
    machine
        .filter(|m| !m.is_empty())
        .map(str::to_owned)
        .or_else(|| std::env::var(SERVER_ADDR_VAR).ok().filter(|addr| !addr.is_empty()))
        .unwrap_or_else(|| DEFAULT_MACHINE.to_owned())
}

fn serialize_date<S: Serializer>(timestamp: &DateTime<Local>, serializer: S) -> Result<S::Ok, S::Error>
{
    serializer.collect_str(&timestamp.format(DATE_FORMAT))
}

#[cfg(test)]
mod tests
{
    use chrono::TimeZone;
    use serde_json::json;

    use super::*;

    fn fixed_time() -> DateTime<Local>
    {
        Local.with_ymd_and_hms(2024, 3, 9, 14, 5, 7).single().unwrap()
    }

    fn fixed(message: &str) -> LogMessage
    {
        LogMessage::at(message, Level::ALERT, Some("amachine"), fixed_time())
    }

    // ========== construction ==========

    #[test]
    fn test_explicit_machine_wins()
    {
        assert_eq!(fixed("Test").machine(), "amachine");
    }

    #[test]
    fn test_empty_machine_falls_back()
    {
        let msg = LogMessage::new("Test", Level::ALERT, Some(""));
        let expected = std::env::var(SERVER_ADDR_VAR)
            .ok()
            .filter(|addr| !addr.is_empty())
            .unwrap_or_else(|| DEFAULT_MACHINE.to_string());
        assert_eq!(msg.machine(), expected);
    }

    #[test]
    fn test_timestamp_truncated_to_seconds()
    {
        let with_nanos = fixed_time().with_nanosecond(987_654_321).unwrap();
        let msg = LogMessage::at("Test", Level::INFO, None, with_nanos);
        assert_eq!(msg.timestamp(), fixed_time());
        assert_eq!(msg.date(), "2024-03-09 14:05:07");
    }

    #[test]
    fn test_new_reads_clock_once()
    {
        let before = Local::now().with_nanosecond(0).unwrap();
        let msg = LogMessage::new("Test", Level::INFO, None);
        let after = Local::now();
        assert!(msg.timestamp() >= before);
        assert!(msg.timestamp() <= after);
    }

    // ========== elements and fields ==========

    #[test]
    fn test_elements_order()
    {
        let names: Vec<_> = fixed("Test").elements().into_iter().map(|(name, _)| name).collect();
        assert_eq!(names, FIELD_NAMES);
    }

    #[test]
    fn test_field_lookup()
    {
        let msg = fixed("Test");
        assert_eq!(msg.field("message"), Some(json!("Test")));
        assert_eq!(msg.field("level"), Some(json!(1)));
        assert_eq!(msg.field("machine"), Some(json!("amachine")));
        assert_eq!(msg.field("date"), Some(json!("2024-03-09 14:05:07")));
    }

    #[test]
    fn test_field_unknown_is_none()
    {
        assert_eq!(fixed("Test").field("severity"), None);
        assert_eq!(fixed("Test").field(""), None);
    }

    // The empty message and the most severe level are values, not absences.
    #[test]
    fn test_field_empty_values_are_present()
    {
        let msg = LogMessage::at("", Level::URGENT, Some("m"), fixed_time());
        assert_eq!(msg.field("message"), Some(json!("")));
        assert_eq!(msg.field("level"), Some(json!(0)));
    }

    // ========== rendering ==========

    #[test]
    fn test_default_rendering()
    {
        assert_eq!(fixed("Test").to_string(), "Test - 1 - amachine - 2024-03-09 14:05:07\n");
    }

    #[test]
    fn test_default_rendering_structured_message()
    {
        let msg = LogMessage::at(json!({"user": 7}), Level::INFO, Some("m"), fixed_time());
        assert_eq!(msg.to_string(), "{\"user\":7} - 6 - m - 2024-03-09 14:05:07\n");
    }

    #[test]
    fn test_apply_template_positional()
    {
        let msg = fixed("Test");
        assert_eq!(
            msg.apply_template("%s / %d / %s / %s").unwrap(),
            "Test / 1 / amachine / 2024-03-09 14:05:07"
        );
    }

    #[test]
    fn test_apply_template_padded_fields()
    {
        let msg = fixed("disk");
        assert_eq!(msg.apply_template("%-8s|%d").unwrap(), "disk    |1");
        assert_eq!(msg.apply_template("%8s|%02d").unwrap(), "    disk|01");
        assert_eq!(msg.apply_template("%3$s: %1$s (%2$+d)").unwrap(), "amachine: disk (+1)");
    }

    #[test]
    fn test_apply_template_arity_mismatch()
    {
        let err = fixed("Test").apply_template("%s %s %s %s %s").unwrap_err();
        assert_eq!(err, FormatError::MissingArgument { index: 5, supplied: 4 });
    }

    #[test]
    fn test_serialize_uses_field_names()
    {
        let value = serde_json::to_value(fixed("Test")).unwrap();
        assert_eq!(
            value,
            json!({
                "message": "Test",
                "level": 1,
                "machine": "amachine",
                "date": "2024-03-09 14:05:07",
            })
        );
    }
}
