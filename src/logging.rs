//! Tracing sink for a TUI process.
//!
//! The dashboard owns the terminal while it runs, so log output goes
//! nowhere near stdout. Every line lands in a bounded in-memory ring
//! buffer (backing the in-app log view) and in a timestamped session
//! file, with `latest.log` pointing at the current session.

use std::collections::VecDeque;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use chrono::Local;
use tracing::Level;
use tracing_subscriber::fmt::MakeWriter;

use crate::utils::app_paths::AppPaths;

/// Maximum number of log entries to keep in memory
const MAX_LOG_ENTRIES: usize = 1000;

/// A log entry with timestamp and message
#[derive(Debug, Clone)]
pub struct LogEntry {
    pub timestamp: String,
    pub level: String,
    pub target: String,
    pub message: String,
}

impl LogEntry {
    pub fn new(level: Level, target: &str, message: String) -> Self {
        Self {
            timestamp: Local::now().format("%H:%M:%S%.3f").to_string(),
            level: level.to_string().to_uppercase(),
            target: target.to_string(),
            message,
        }
    }

    /// Format for the log view and the session file
    pub fn format_for_display(&self) -> String {
        format!(
            "[{}] {} [{}] {}",
            self.timestamp, self.level, self.target, self.message
        )
    }
}

/// Thread-safe ring buffer for log entries
#[derive(Clone)]
pub struct LogRingBuffer {
    entries: Arc<Mutex<VecDeque<LogEntry>>>,
}

impl Default for LogRingBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl LogRingBuffer {
    pub fn new() -> Self {
        Self {
            entries: Arc::new(Mutex::new(VecDeque::with_capacity(MAX_LOG_ENTRIES))),
        }
    }

    pub fn push(&self, entry: LogEntry) {
        let mut entries = self.entries.lock().unwrap();
        if entries.len() >= MAX_LOG_ENTRIES {
            entries.pop_front();
        }
        entries.push_back(entry);
    }

    /// Most recent `count` entries, oldest first
    pub fn recent(&self, count: usize) -> Vec<LogEntry> {
        let entries = self.entries.lock().unwrap();
        entries.iter().rev().take(count).rev().cloned().collect()
    }

    pub fn len(&self) -> usize {
        let entries = self.entries.lock().unwrap();
        entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        let mut entries = self.entries.lock().unwrap();
        entries.clear();
    }
}

/// Split the compact fmt output, "LEVEL target: message"
fn parse_compact_line(message: &str) -> LogEntry {
    let prefixes = [
        ("TRACE ", Level::TRACE),
        ("DEBUG ", Level::DEBUG),
        ("INFO ", Level::INFO),
        ("WARN ", Level::WARN),
        ("ERROR ", Level::ERROR),
    ];

    for (prefix, level) in prefixes {
        if let Some(rest) = message.strip_prefix(prefix) {
            // "target: message", but only when the target has no spaces
            if let Some(colon_pos) = rest.find(':') {
                let potential_target = &rest[..colon_pos];
                if !potential_target.contains(' ') {
                    return LogEntry::new(
                        level,
                        potential_target,
                        rest[colon_pos + 1..].trim().to_string(),
                    );
                }
            }
            return LogEntry::new(level, "general", rest.to_string());
        }
    }

    LogEntry::new(Level::INFO, "general", message.to_string())
}

/// Writer behind the fmt layer: ring buffer plus session file
pub struct DualWriter {
    buffer: LogRingBuffer,
    file: Arc<Mutex<Option<File>>>,
}

impl DualWriter {
    fn new(buffer: LogRingBuffer, file: Option<File>) -> Self {
        Self {
            buffer,
            file: Arc::new(Mutex::new(file)),
        }
    }
}

impl Write for DualWriter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        if let Ok(message) = std::str::from_utf8(buf) {
            let message = message.trim();
            if !message.is_empty() {
                let entry = parse_compact_line(message);

                if let Ok(mut file_opt) = self.file.lock() {
                    if let Some(ref mut file) = *file_opt {
                        let line = format!("{}\n", entry.format_for_display());
                        let _ = file.write_all(line.as_bytes());
                        // Flushed per line so a crash leaves a complete file
                        let _ = file.flush();
                    }
                }

                self.buffer.push(entry);
            }
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        if let Ok(mut file_opt) = self.file.lock() {
            if let Some(ref mut file) = *file_opt {
                let _ = file.flush();
            }
        }
        Ok(())
    }
}

impl Clone for DualWriter {
    fn clone(&self) -> Self {
        Self {
            buffer: self.buffer.clone(),
            file: self.file.clone(),
        }
    }
}

impl<'a> MakeWriter<'a> for DualWriter {
    type Writer = Self;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

/// Open the timestamped session log and repoint `latest.log` at it.
/// A missing log directory is not fatal; we just lose file logging.
fn open_session_log() -> (Option<File>, Option<PathBuf>) {
    let log_dir = match AppPaths::log_dir() {
        Ok(dir) => dir,
        Err(_) => return (None, None),
    };

    let timestamp = Local::now().format("%Y%m%d_%H%M%S");
    let log_path = log_dir.join(format!("agrodash_{}.log", timestamp));

    let latest_path = log_dir.join("latest.log");

    #[cfg(unix)]
    {
        let _ = std::fs::remove_file(&latest_path);
        let _ = std::os::unix::fs::symlink(&log_path, &latest_path);
    }

    #[cfg(windows)]
    {
        let pointer = format!("Current log file: {}\n", log_path.display());
        let _ = std::fs::write(&latest_path, pointer);
    }

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .ok();

    (file, Some(log_path))
}

/// Install the tracing subscriber.
///
/// Returns the ring buffer for the in-app log view and the session
/// log path, if one could be opened. RUST_LOG overrides the default
/// `info` filter.
pub fn init_tracing() -> (LogRingBuffer, Option<PathBuf>) {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let buffer = LogRingBuffer::new();
    let (file, log_path) = open_session_log();
    let writer = DualWriter::new(buffer.clone(), file);

    let fmt_layer = fmt::layer()
        .with_writer(writer)
        .with_target(true)
        .with_level(true)
        .with_ansi(false)
        .without_time() // Entries carry their own timestamps
        .compact();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();

    (buffer, log_path)
}
