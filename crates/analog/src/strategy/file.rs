//! Append records to a file.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::{trace, warn};

use super::LogStrategy;
use crate::error::{AnalogError, Result};
use crate::format::Format;
use crate::guards::FileLockGuard;
use crate::location::default_location;
use crate::message::LogMessage;

/// Writes each record to a file, holding an exclusive lock for the write
///
/// The file is opened in append mode (created if missing) for every write and
/// closed again afterwards. The lock is requested without blocking: if another
/// handle holds it, the write fails with [`AnalogError::Lock`] straight away.
///
/// ## Example
///
/// ```rust,no_run
/// use analog::{FileStrategy, Format, Level, LogMessage, LogStrategy};
///
/// let strategy = FileStrategy::new(Some("/var/log/app.log".into()), Format::from("%s [%d]\n"));
/// strategy.write_message(&LogMessage::new("started", Level::INFO, None))?;
/// # Ok::<(), analog::AnalogError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct FileStrategy
{
    path: Option<PathBuf>,
    format: Format,
}

impl FileStrategy
{
    pub fn new(path: Option<PathBuf>, format: Format) -> Self
    {
        Self { path, format }
    }

    /// The file that will be written: the configured path or `<temp dir>/analog.txt`.
    pub fn path(&self) -> PathBuf
    {
        self.path.clone().unwrap_or_else(default_location)
    }

    pub fn format(&self) -> &Format
    {
        &self.format
    }
}

impl LogStrategy for FileStrategy
{
    /// Open, lock, render, write, then unlock and close.
    ///
    /// The lock guard and the file handle are dropped on every path out of
    /// this function, including a failed render or write.
    ///
    /// ## Errors
    ///
    /// - `FileOpen`: the file cannot be opened or created
    /// - `Lock`: another handle holds the lock
    /// - `Format`: the template could not be applied
    /// - `Write`: the bytes could not be written
    fn write_message(&self, message: &LogMessage) -> Result<bool>
    {
        let path = self.path();
        let file = OpenOptions::new()
            .append(true)
            .create(true)
            .open(&path)
            .map_err(|source| AnalogError::FileOpen { path: path.clone(), source })?;

        let _lock = FileLockGuard::try_acquire(&file).map_err(|source| {
            warn!(path = %path.display(), error = %source, "log file is locked by another writer");
            AnalogError::Lock { path: path.clone(), source }
        })?;

        let bytes = self.format.render(message)?.into_bytes();
        write_all(&mut &file, &bytes, &path)?;

        // The guard unlocks on drop; a completed write is never reported as failed
        trace!(path = %path.display(), bytes = bytes.len(), "log record written");
        Ok(true)
    }
}

fn write_all(out: &mut impl Write, bytes: &[u8], path: &Path) -> Result<()>
{
    out.write_all(bytes)
        .and_then(|()| out.flush())
        .map_err(|source| AnalogError::Write { path: path.to_path_buf(), source })
}
