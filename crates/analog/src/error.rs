//! # Error Types
//!
//! Error handling for log writes.
//!
//! We use `thiserror` to generate the `Error` trait implementations and
//! messages. Every failure surfaces to the caller of `log`; nothing in this
//! crate retries, queues or falls back to another destination.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Boxed error type returned by user-supplied delivery callbacks.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Main error type for logging operations
///
/// ## Error Categories
///
/// 1. **File errors**: FileOpen, Lock, Write (file strategy only)
/// 2. **Rendering errors**: Format (template could not be applied)
/// 3. **Delivery errors**: Callback (whatever the user callback returned)
/// 4. **Lifecycle errors**: AlreadyInitialized, NotInitialized (global logger)
#[derive(Error, Debug)]
pub enum AnalogError
{
    /// The destination file could not be opened or created for appending
    #[error("Could not open log file {} for writing: {source}", path.display())]
    FileOpen
    {
        /// File that was being opened
        path: PathBuf,
        /// Underlying OS error
        #[source]
        source: io::Error,
    },

    /// The exclusive lock on the log file could not be acquired immediately
    ///
    /// The lock is requested in non-blocking mode. If another handle holds it,
    /// the write fails right away with `source.kind() == WouldBlock` instead
    /// of waiting for the holder to finish.
    #[error("Could not lock log file {}: {source}", path.display())]
    Lock
    {
        /// File that was being locked
        path: PathBuf,
        /// Underlying OS error
        #[source]
        source: io::Error,
    },

    /// The rendered record could not be written to the locked file
    #[error("Could not write to log file {}: {source}", path.display())]
    Write
    {
        /// File that was being written
        path: PathBuf,
        /// Underlying OS error
        #[source]
        source: io::Error,
    },

    /// Rendering the message through a template failed
    #[error(transparent)]
    Format(#[from] FormatError),

    /// The delivery callback failed
    ///
    /// The callback's error is carried unchanged: its message is displayed
    /// as-is and it can be recovered with `downcast_ref`.
    #[error(transparent)]
    Callback(BoxError),

    /// `global::init` was called more than once
    #[error("The global logger is already initialized")]
    AlreadyInitialized,

    /// A global logging function was used before `global::init`
    #[error("The global logger has not been initialized")]
    NotInitialized,
}

impl AnalogError
{
    /// Returns `true` when the error is a lock conflict with another holder.
    pub fn is_lock_contention(&self) -> bool
    {
        matches!(self, AnalogError::Lock { source, .. } if source.kind() == io::ErrorKind::WouldBlock)
    }
}

/// Errors produced while applying a printf-style template to a message
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormatError
{
    /// The template asks for more values than a message carries
    #[error("Template placeholder {index} has no value ({supplied} supplied)")]
    MissingArgument
    {
        /// 1-based position of the placeholder
        index: usize,
        /// Number of values available
        supplied: usize,
    },

    /// The template uses a conversion this formatter does not know
    #[error("Unknown conversion '%{conversion}' at byte {offset}")]
    UnknownConversion
    {
        /// Conversion character after `%`
        conversion: char,
        /// Byte offset of the `%`
        offset: usize,
    },

    /// A placeholder uses `%0$`; argument numbers start at 1
    #[error("Argument number must be greater than zero at byte {offset}")]
    InvalidArgumentNumber
    {
        /// Byte offset of the `%`
        offset: usize,
    },

    /// The template ends in the middle of a placeholder
    #[error("Incomplete placeholder at byte {offset}")]
    Incomplete
    {
        /// Byte offset of the `%`
        offset: usize,
    },

    /// A numeric conversion was given a value that is not a number
    #[error("Conversion '%{conversion}' cannot format the {field} field")]
    TypeMismatch
    {
        /// Conversion character after `%`
        conversion: char,
        /// Name of the message field that was substituted
        field: &'static str,
    },
}

/// Result type alias for logging operations
pub type Result<T> = std::result::Result<T, AnalogError>;
