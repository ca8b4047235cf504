// Debug logging module for Coin Dash
// Routes `tracing` output to a file when enabled via --debug flag.
// stderr is unusable while the TUI owns the terminal.

use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::sync::Mutex;
use std::time::SystemTime;

use tracing::Level;

pub const LOG_FILE_PATH: &str = "/tmp/coin-dash-debug.log";

/// Initialize debug logging to file
///
/// # Behavior
/// - If enabled=false: no subscriber is installed, so every `tracing` macro is a no-op
/// - If enabled=true: creates/truncates the log file, writes a header and
///   installs a plain-text subscriber at DEBUG level
pub fn init(enabled: bool) -> io::Result<()> {
    if !enabled {
        return Ok(());
    }

    let mut file = create_log_file(LOG_FILE_PATH)?;

    writeln!(file, "=== Coin Dash Debug Log ===")?;
    writeln!(file, "Session started: {:?}", SystemTime::now())?;
    writeln!(file, "To monitor: tail -f {}", LOG_FILE_PATH)?;
    writeln!(file, "========================================\n")?;

    tracing_subscriber::fmt()
        .with_max_level(Level::DEBUG)
        .with_ansi(false)
        .with_target(false)
        .with_writer(Mutex::new(file))
        .try_init()
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;

    Ok(())
}

fn create_log_file(path: &str) -> io::Result<File> {
    OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(path)
}
