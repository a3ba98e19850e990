//! # Log Writer
//!
//! The dispatcher between a logger and its writer strategies. A `LogWriter`
//! is built for each log call from the current `(Location, Format)` pair and
//! picks its strategy from the shape of the location:
//!
//! | location             | strategy           |
//! |----------------------|--------------------|
//! | `Location::Callback` | `CallbackStrategy` |
//! | `Location::Path`     | `FileStrategy`     |
//! | `Location::Unset`    | `FileStrategy` (`<temp dir>/analog.txt`) |

use tracing::debug;

use crate::error::Result;
use crate::format::Format;
use crate::location::Location;
use crate::logger::Config;
use crate::message::LogMessage;
use crate::strategy::{CallbackStrategy, FileStrategy, LogStrategy, Strategy};

/// Routes messages to the strategy selected for a location
///
/// ## Example
///
/// ```rust
/// use analog::{Format, Location, LogWriter, StrategyKind};
///
/// let writer = LogWriter::new(Location::callback(|_| Ok(true)), Format::Unset);
/// assert_eq!(writer.strategy().kind(), StrategyKind::Callback);
///
/// let writer = LogWriter::new(Location::path("app.log"), Format::from("%s\n"));
/// assert_eq!(writer.strategy().kind(), StrategyKind::File);
/// ```
#[derive(Debug, Clone)]
pub struct LogWriter
{
    strategy: Strategy,
}

impl LogWriter
{
    pub fn new(location: Location, format: Format) -> Self
    {
        let strategy = match location {
            Location::Callback(callback) => Strategy::Callback(CallbackStrategy::new(callback, format)),
            Location::Path(path) => Strategy::File(FileStrategy::new(Some(path), format)),
            Location::Unset => Strategy::File(FileStrategy::new(None, format)),
        };
        debug!(strategy = ?strategy.kind(), "log writer strategy selected");
        Self { strategy }
    }

    /// Build a writer from a configuration snapshot.
    pub fn from_config(config: &Config) -> Self
    {
        Self::new(config.location.clone(), config.format.clone())
    }

    /// The selected strategy, for introspection.
    pub fn strategy(&self) -> &Strategy
    {
        &self.strategy
    }

    /// Delegate to the selected strategy and return exactly what it returns.
    ///
    /// ## Errors
    ///
    /// Whatever the strategy returns; see [`FileStrategy`] and [`CallbackStrategy`].
    pub fn write_message(&self, message: &LogMessage) -> Result<bool>
    {
        self.strategy.write_message(message)
    }
}

#[cfg(test)]
mod tests
{
    use std::path::Path;

    use super::*;
    use crate::format::Rendered;
    use crate::location::default_location;
    use crate::strategy::StrategyKind;

    #[test]
    fn test_callback_location_selects_callback_strategy()
    {
        let format = Format::function(|m: &LogMessage| Rendered::Text(format!("{} | {}", m.message(), m.level())));
        let writer = LogWriter::new(Location::callback(|_| Ok(true)), format);

        assert_eq!(writer.strategy().kind(), StrategyKind::Callback);
        assert!(writer.strategy().as_callback().is_some());
        assert!(writer.strategy().as_file().is_none());
    }

    #[test]
    fn test_path_location_selects_file_strategy()
    {
        let writer = LogWriter::new(Location::path("analog.txt"), Format::from("%s . %s . %d . %s\n"));

        let file = writer.strategy().as_file().expect("file strategy");
        assert_eq!(file.path(), Path::new("analog.txt"));
        assert!(matches!(file.format(), Format::Template(_)));
    }

    #[test]
    fn test_unset_location_selects_default_file()
    {
        let writer = LogWriter::new(Location::Unset, Format::Unset);
        assert_eq!(writer.strategy().kind(), StrategyKind::File);
        assert_eq!(writer.strategy().as_file().map(FileStrategy::path), Some(default_location()));
    }

    #[test]
    fn test_write_delegates_to_strategy()
    {
        let location = Location::callback(|rendered| Ok(rendered.as_text() == Some("hi")));
        let writer = LogWriter::new(location, Format::from("%s"));
        assert!(writer.write_message(&LogMessage::new("hi", 6, None)).unwrap());
        assert!(!writer.write_message(&LogMessage::new("bye", 6, None)).unwrap());
    }

    #[test]
    fn test_from_config()
    {
        let config = Config {
            format: Format::Unset,
            location: Location::callback(|_| Ok(true)),
        };
        assert_eq!(LogWriter::from_config(&config).strategy().kind(), StrategyKind::Callback);
    }
}
