//! Diagnostics written to a file.
//!
//! Installs the global subscriber, so this binary holds a single test.

use std::fs;

use analog::{Analog, Location};
use analog_utils::{init_diagnostics_to_file, init_diagnostics_with_level, DiagFormat, DiagLevel, DiagnosticsError};

#[test]
fn test_analog_events_reach_diagnostics_file()
{
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("diag").join("analog-diag.log");

    let guard = init_diagnostics_to_file(&path, DiagLevel::Trace, DiagFormat::Json).unwrap();

    let logger = Analog::new();
    logger.set_location(Location::callback(|_| Ok(true)));
    assert!(logger.info("hello").unwrap());
    analog_utils::info!(component = "test", "host event");

    // Flushes the background writer
    drop(guard);

    let content = fs::read_to_string(&path).unwrap();
    assert!(content.contains("log writer strategy selected"));
    assert!(content.contains("log record handed to callback"));
    assert!(content.contains("host event"));
    for line in content.lines() {
        assert!(line.starts_with('{'), "expected JSON lines, got {line}");
    }

    // Only one global subscriber per process
    let second = init_diagnostics_with_level(DiagLevel::Info, DiagFormat::Pretty);
    assert!(matches!(second, Err(DiagnosticsError::InitializationFailed(_))));
}
