//! Severity levels.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Ranked severity of a log event
///
/// Levels are plain integers from 0 (most severe) to 7 (least severe). The
/// logger never filters on them: every call is written whatever its level.
/// Values outside the eight named ranks are accepted and written as-is, so
/// integer literals can be passed wherever a level is expected.
///
/// ## Example
///
/// ```rust
/// use analog::Level;
///
/// assert_eq!(Level::default(), Level::ERROR);
/// assert_eq!(Level::from(7), Level::DEBUG);
/// assert!(Level::URGENT.is_more_severe_than(Level::INFO));
/// assert_eq!(Level::ALERT.to_string(), "1");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Level(i32);

impl Level
{
    /// It's an emergency
    pub const URGENT: Self = Level(0);
    /// Immediate action required
    pub const ALERT: Self = Level(1);
    /// Critical conditions
    pub const CRITICAL: Self = Level(2);
    /// An error occurred
    pub const ERROR: Self = Level(3);
    /// Something unexpected happening
    pub const WARNING: Self = Level(4);
    /// Something worth noting
    pub const NOTICE: Self = Level(5);
    /// Information, not an error
    pub const INFO: Self = Level(6);
    /// Debugging messages
    pub const DEBUG: Self = Level(7);

    /// All named levels, most severe first.
    pub const ALL: [Self; 8] = [
        Self::URGENT,
        Self::ALERT,
        Self::CRITICAL,
        Self::ERROR,
        Self::WARNING,
        Self::NOTICE,
        Self::INFO,
        Self::DEBUG,
    ];

    pub const fn new(value: i32) -> Self
    {
        Level(value)
    }

    pub const fn value(self) -> i32
    {
        self.0
    }

    /// Upper-case name of a named level, `None` for other values.
    pub const fn name(self) -> Option<&'static str>
    {
        match self.0 {
            0 => Some("URGENT"),
            1 => Some("ALERT"),
            2 => Some("CRITICAL"),
            3 => Some("ERROR"),
            4 => Some("WARNING"),
            5 => Some("NOTICE"),
            6 => Some("INFO"),
            7 => Some("DEBUG"),
            _ => None,
        }
    }

    /// Lower rank means more severe.
    pub const fn is_more_severe_than(self, other: Self) -> bool
    {
        self.0 < other.0
    }
}

impl Default for Level
{
    fn default() -> Self
    {
        Level::ERROR
    }
}

impl From<i32> for Level
{
    fn from(value: i32) -> Self
    {
        Level(value)
    }
}

impl From<u8> for Level
{
    fn from(value: u8) -> Self
    {
        Level(i32::from(value))
    }
}

impl From<Level> for i32
{
    fn from(level: Level) -> Self
    {
        level.0
    }
}

/// Rendered records carry the integer, not the name.
impl fmt::Display for Level
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Level
{
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err>
    {
        if let Ok(value) = s.trim().parse::<i32>() {
            return Ok(Level(value));
        }

        match s.trim().to_lowercase().as_str() {
            "urgent" | "emergency" | "emerg" => Ok(Level::URGENT),
            "alert" => Ok(Level::ALERT),
            "critical" | "crit" => Ok(Level::CRITICAL),
            "error" | "err" => Ok(Level::ERROR),
            "warning" | "warn" => Ok(Level::WARNING),
            "notice" => Ok(Level::NOTICE),
            "info" => Ok(Level::INFO),
            "debug" | "dbg" => Ok(Level::DEBUG),
            _ => Err(format!("Unknown log level: {s}. Use a level name or a number from 0 to 7")),
        }
    }
}
