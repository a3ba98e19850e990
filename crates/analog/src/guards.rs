//! # RAII Guards for Log Files
//!
//! This module provides a guard around an exclusive advisory lock on an open
//! file. The lock is taken in non-blocking mode and released when the guard
//! is dropped, so a write that fails half-way never leaves the file locked.
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::fs::OpenOptions;
//! use std::io::Write;
//!
//! use analog::guards::FileLockGuard;
//!
//! let mut file = OpenOptions::new().append(true).create(true).open("/tmp/app.log")?;
//! {
//!     let _lock = FileLockGuard::try_acquire(&file)?;
//!     // No other handle can lock the file until the guard is dropped
//! }
//! file.write_all(b"unlocked again\n")?;
//! # Ok::<(), std::io::Error>(())
//! ```

#![allow(unsafe_code)] // flock(2) has no safe wrapper in libc

use std::fs::File;
use std::io;

/// RAII guard holding an exclusive, non-blocking lock on a file.
///
/// `flock` locks belong to the open file description, so two handles opened
/// separately on the same path conflict even inside a single process.
///
/// ## Errors
///
/// [`FileLockGuard::try_acquire`] never waits. If another handle holds the
/// lock it returns an error whose kind is `io::ErrorKind::WouldBlock`.
#[derive(Debug)]
pub struct FileLockGuard<'a>
{
    file: &'a File,
    active: bool,
}

impl<'a> FileLockGuard<'a>
{
    /// Lock `file` exclusively or fail immediately.
    pub fn try_acquire(file: &'a File) -> io::Result<Self>
    {
        sys::try_lock_exclusive(file)?;
        Ok(Self { file, active: true })
    }

    /// Release the lock before the guard is dropped.
    ///
    /// After calling this method, dropping the guard is a no-op.
    pub fn release(mut self) -> io::Result<()>
    {
        if self.active {
            self.active = false;
            sys::unlock(self.file)?;
        }
        Ok(())
    }
}

impl Drop for FileLockGuard<'_>
{
    fn drop(&mut self)
    {
        if self.active {
            // Best effort unlock - closing the handle releases it anyway
            let _ = sys::unlock(self.file);
        }
    }
}

#[cfg(unix)]
mod sys
{
    use std::fs::File;
    use std::io;
    use std::os::fd::AsRawFd;

    pub(super) fn try_lock_exclusive(file: &File) -> io::Result<()>
    {
        flock(file, libc::LOCK_EX | libc::LOCK_NB)
    }

    pub(super) fn unlock(file: &File) -> io::Result<()>
    {
        flock(file, libc::LOCK_UN)
    }

    fn flock(file: &File, operation: libc::c_int) -> io::Result<()>
    {
        // SAFETY: the descriptor is owned by `file`, which outlives this call.
        let result = unsafe { libc::flock(file.as_raw_fd(), operation) };
        if result == 0 {
            Ok(())
        } else {
            // EWOULDBLOCK maps to ErrorKind::WouldBlock
            Err(io::Error::last_os_error())
        }
    }
}

#[cfg(not(unix))]
mod sys
{
    use std::fs::{File, TryLockError};
    use std::io;

    pub(super) fn try_lock_exclusive(file: &File) -> io::Result<()>
    {
        file.try_lock().map_err(|err| match err {
            TryLockError::WouldBlock => io::Error::from(io::ErrorKind::WouldBlock),
            TryLockError::Error(err) => err,
        })
    }

    pub(super) fn unlock(file: &File) -> io::Result<()>
    {
        file.unlock()
    }
}
