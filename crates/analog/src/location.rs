//! Where rendered records go.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::error::BoxError;
use crate::format::Rendered;

/// File name used under the temp directory when no location is set.
pub const DEFAULT_FILE_NAME: &str = "analog.txt";

/// Shared delivery callback.
///
/// The callback receives the rendered record and returns its own success
/// value. Errors are handed back to the `log` caller untouched.
pub type CallbackFn = Arc<dyn Fn(Rendered) -> Result<bool, BoxError> + Send + Sync>;

/// Destination of log records
///
/// The shape of this value decides which writer strategy is used:
/// `Callback` selects the callback strategy, `Path` and `Unset` select the
/// file strategy.
#[derive(Clone, Default)]
pub enum Location
{
    /// `<temp dir>/analog.txt`
    #[default]
    Unset,
    /// Append to this file
    Path(PathBuf),
    /// Hand the rendered record to a user callback
    Callback(CallbackFn),
}

impl Location
{
    pub fn path(path: impl Into<PathBuf>) -> Self
    {
        Location::Path(path.into())
    }

    pub fn callback<F>(f: F) -> Self
    where
        F: Fn(Rendered) -> Result<bool, BoxError> + Send + Sync + 'static,
    {
        Location::Callback(Arc::new(f))
    }

    pub fn is_callback(&self) -> bool
    {
        matches!(self, Location::Callback(_))
    }
}

/// `<temp dir>/analog.txt`
pub fn default_location() -> PathBuf
{
    std::env::temp_dir().join(DEFAULT_FILE_NAME)
}

impl fmt::Debug for Location
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        match self {
            Location::Unset => f.write_str("Unset"),
            Location::Path(path) => f.debug_tuple("Path").field(path).finish(),
            Location::Callback(_) => f.write_str("Callback(..)"),
        }
    }
}

impl From<PathBuf> for Location
{
    fn from(path: PathBuf) -> Self
    {
        Location::Path(path)
    }
}

impl From<&Path> for Location
{
    fn from(path: &Path) -> Self
    {
        Location::Path(path.to_path_buf())
    }
}

impl From<&str> for Location
{
    fn from(path: &str) -> Self
    {
        Location::Path(PathBuf::from(path))
    }
}

impl From<String> for Location
{
    fn from(path: String) -> Self
    {
        Location::Path(PathBuf::from(path))
    }
}

impl<T: Into<Location>> From<Option<T>> for Location
{
    fn from(location: Option<T>) -> Self
    {
        location.map_or(Location::Unset, Into::into)
    }
}

#[cfg(test)]
mod tests
{
    use super::*;

    #[test]
    fn test_default_location_is_in_temp_dir()
    {
        let path = default_location();
        assert_eq!(path.parent(), Some(std::env::temp_dir().as_path()));
        assert_eq!(path.file_name().and_then(|n| n.to_str()), Some("analog.txt"));
    }

    #[test]
    fn test_conversions()
    {
        assert!(matches!(Location::from("log.txt"), Location::Path(p) if p == Path::new("log.txt")));
        assert!(matches!(Location::from(None::<&str>), Location::Unset));
        assert!(Location::callback(|_| Ok(true)).is_callback());
        assert!(!Location::path("x").is_callback());
    }

    #[test]
    fn test_debug_hides_closure()
    {
        assert_eq!(format!("{:?}", Location::callback(|_| Ok(true))), "Callback(..)");
    }
}
