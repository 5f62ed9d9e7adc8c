use std::fs::OpenOptions;
use std::io::Write;
use chrono::Utc;
use crate::storage::log_path;

enum Level {
    Info,
    Warn,
    Error,
}

impl Level {
    fn as_str(&self) -> &'static str {
        match self {
            Level::Info => "INFO",
            Level::Warn => "WARN",
            Level::Error => "ERROR",
        }
    }
}

/// Appends a `[timestamp] [LEVEL] message` line to the log file.
///
/// Logging never fails a command; write errors are swallowed.
fn log_to_file(message: &str, level: Level) {
    let timestamp = Utc::now().to_rfc3339();
    let entry = format!("[{}] [{}] {}\n", timestamp, level.as_str(), message);
    if let Ok(mut f) = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_path())
    {
        let _ = f.write_all(entry.as_bytes());
    }
}

pub fn info(message: &str) {
    log_to_file(message, Level::Info);
}

pub fn warn(message: &str) {
    log_to_file(message, Level::Warn);
}

pub fn error(message: &str) {
    log_to_file(message, Level::Error);
}
