//! Rolling File Logger
//!
//! Appends plain-text lines to `<dir>/<name>.log`. When the active file grows
//! past the configured size it is shifted to `<name>.1.log`, older files move
//! up by one and the oldest is discarded. The most recent lines are also kept
//! in a bounded in-memory buffer so a diagnostics view can show them without
//! touching the disk.
//!
//! `init_logger` installs a process-wide instance and routes both `tracing`
//! events and `log` records into it.

use std::collections::VecDeque;
use std::fmt;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, OnceLock};

use chrono::{SecondsFormat, Utc};
use tracing_subscriber::fmt::writer::MakeWriterExt;

static LOGGER: OnceLock<RollingLogger> = OnceLock::new();

/// Errors raised while setting up or writing the log
#[derive(Debug)]
pub enum LoggerError {
    Io(io::Error),
    AlreadyInitialized,
    NotInitialized,
    Subscriber(String),
}

impl fmt::Display for LoggerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoggerError::Io(e) => write!(f, "log file error: {}", e),
            LoggerError::AlreadyInitialized => write!(f, "logger already initialized"),
            LoggerError::NotInitialized => write!(f, "logger not initialized"),
            LoggerError::Subscriber(msg) => write!(f, "failed to install subscriber: {}", msg),
        }
    }
}

impl std::error::Error for LoggerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoggerError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for LoggerError {
    fn from(e: io::Error) -> Self {
        LoggerError::Io(e)
    }
}

/// Rotation and buffering limits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RollingConfig {
    /// Size at which the active file is rotated
    pub max_file_bytes: u64,
    /// Number of rotated files kept next to the active one
    pub max_files: usize,
    /// Lines kept in the in-memory ring buffer
    pub buffer_lines: usize,
}

impl Default for RollingConfig {
    fn default() -> Self {
        Self {
            max_file_bytes: 1024 * 1024,
            max_files: 5,
            buffer_lines: 500,
        }
    }
}

struct Inner {
    dir: PathBuf,
    name: String,
    config: RollingConfig,
    file: File,
    written: u64,
    buffer: VecDeque<String>,
}

impl Inner {
    fn active_path(&self) -> PathBuf {
        self.dir.join(format!("{}.log", self.name))
    }

    fn rotated_path(&self, index: usize) -> PathBuf {
        self.dir.join(format!("{}.{}.log", self.name, index))
    }

    fn rotate(&mut self) -> io::Result<()> {
        self.file.flush()?;

        if self.config.max_files == 0 {
            self.file = File::create(self.active_path())?;
            self.written = 0;
            return Ok(());
        }

        let oldest = self.rotated_path(self.config.max_files);
        if oldest.exists() {
            fs::remove_file(&oldest)?;
        }
        for index in (1..self.config.max_files).rev() {
            let from = self.rotated_path(index);
            if from.exists() {
                fs::rename(&from, self.rotated_path(index + 1))?;
            }
        }
        fs::rename(self.active_path(), self.rotated_path(1))?;

        self.file = open_append(&self.active_path())?;
        self.written = 0;
        Ok(())
    }

    fn append(&mut self, text: &str) -> io::Result<()> {
        if self.written > 0 && self.written + text.len() as u64 > self.config.max_file_bytes {
            self.rotate()?;
        }

        self.file.write_all(text.as_bytes())?;
        self.file.flush()?;
        self.written += text.len() as u64;

        if self.config.buffer_lines > 0 {
            for line in text.lines().filter(|l| !l.is_empty()) {
                if self.buffer.len() == self.config.buffer_lines {
                    self.buffer.pop_front();
                }
                self.buffer.push_back(line.to_string());
            }
        }
        Ok(())
    }
}

fn open_append(path: &Path) -> io::Result<File> {
    OpenOptions::new().create(true).append(true).open(path)
}

/// Handle to a rotating log file; cheap to clone
#[derive(Clone)]
pub struct RollingLogger {
    inner: Arc<Mutex<Inner>>,
}

impl RollingLogger {
    /// Open (or create) `<dir>/<name>.log` for appending
    pub fn open(dir: impl Into<PathBuf>, name: &str, config: RollingConfig) -> Result<Self, LoggerError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;

        let path = dir.join(format!("{}.log", name));
        let file = open_append(&path)?;
        let written = file.metadata().map(|m| m.len()).unwrap_or(0);

        Ok(Self {
            inner: Arc::new(Mutex::new(Inner {
                dir,
                name: name.to_string(),
                config,
                file,
                written,
                buffer: VecDeque::with_capacity(config.buffer_lines),
            })),
        })
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        // A panic while holding the lock leaves the file usable.
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Path of the active log file
    pub fn log_path(&self) -> PathBuf {
        self.lock().active_path()
    }

    /// Append raw text, rotating first if it would overflow the active file
    pub fn append(&self, text: &str) -> Result<(), LoggerError> {
        self.lock().append(text).map_err(LoggerError::from)
    }

    /// Write a single `[timestamp] LEVEL: message` line
    pub fn line(&self, level: &str, message: &str) -> Result<(), LoggerError> {
        self.append(&format!("[{}] {}: {}\n", timestamp(), level, message))
    }

    /// Write an error entry with its origin and a trace block
    ///
    /// Format: `[timestamp] ERROR in <context>: <message>\n<trace>\n\n`
    pub fn error_in(&self, context: &str, message: &str, trace: &str) -> Result<(), LoggerError> {
        self.append(&format_error_entry(&timestamp(), context, message, trace))
    }

    /// The last `limit` buffered lines, oldest first
    pub fn recent(&self, limit: usize) -> Vec<String> {
        let inner = self.lock();
        let skip = inner.buffer.len().saturating_sub(limit);
        inner.buffer.iter().skip(skip).cloned().collect()
    }
}

impl Write for RollingLogger {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.lock().append(&String::from_utf8_lossy(buf))?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.lock().file.flush()
    }
}

fn timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn format_error_entry(timestamp: &str, context: &str, message: &str, trace: &str) -> String {
    let trace = trace.trim_end();
    if trace.is_empty() {
        format!("[{}] ERROR in {}: {}\n\n", timestamp, context, message)
    } else {
        format!("[{}] ERROR in {}: {}\n{}\n\n", timestamp, context, message, trace)
    }
}

/// Install the global logger writing to `<dir>/<app_name>.log`
///
/// Also installs a `tracing` fmt subscriber that tees into stderr and the
/// log file; `log` records are forwarded through it.
pub fn init_logger(dir: impl Into<PathBuf>, app_name: &str) -> Result<(), LoggerError> {
    init_logger_with(dir, app_name, RollingConfig::default())
}

/// `init_logger` with explicit rotation limits
pub fn init_logger_with(dir: impl Into<PathBuf>, app_name: &str, config: RollingConfig) -> Result<(), LoggerError> {
    let logger = RollingLogger::open(dir, app_name, config)?;
    LOGGER.set(logger.clone()).map_err(|_| LoggerError::AlreadyInitialized)?;

    let file_writer = move || logger.clone();
    tracing_subscriber::fmt()
        .with_ansi(false)
        .with_max_level(tracing::Level::INFO)
        .with_writer(io::stderr.and(file_writer))
        .try_init()
        .map_err(|e| LoggerError::Subscriber(e.to_string()))?;

    log::info!("{} logging to {}", app_name, log_path().map(|p| p.display().to_string()).unwrap_or_default());
    Ok(())
}

fn global() -> Result<&'static RollingLogger, LoggerError> {
    LOGGER.get().ok_or(LoggerError::NotInitialized)
}

/// Append an INFO line to the global log
pub fn info(message: &str) -> Result<(), LoggerError> {
    global()?.line("INFO", message)
}

/// Append an ERROR line to the global log
pub fn error(message: &str) -> Result<(), LoggerError> {
    global()?.line("ERROR", message)
}

/// Append a contextual error entry with trace to the global log
///
/// The entry is echoed to stderr, since it bypasses the subscriber.
pub fn error_in(context: &str, message: &str, trace: &str) -> Result<(), LoggerError> {
    let entry = format_error_entry(&timestamp(), context, message, trace);
    global()?.append(&entry)?;
    let _ = io::stderr().write_all(entry.as_bytes());
    Ok(())
}

/// Recent lines from the global log buffer; empty before initialization
pub fn recent(limit: usize) -> Vec<String> {
    LOGGER.get().map(|l| l.recent(limit)).unwrap_or_default()
}

/// Active file of the global log
pub fn log_path() -> Option<PathBuf> {
    LOGGER.get().map(|l| l.log_path())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn small_config() -> RollingConfig {
        RollingConfig {
            max_file_bytes: 64,
            max_files: 2,
            buffer_lines: 3,
        }
    }

    #[test]
    fn test_error_entry_format() {
        let entry = format_error_entry("2024-01-01T00:00:00.000Z", "file:open", "File not found: /x", "caused by: gone");
        assert_eq!(
            entry,
            "[2024-01-01T00:00:00.000Z] ERROR in file:open: File not found: /x\ncaused by: gone\n\n"
        );

        let bare = format_error_entry("t", "ctx", "msg", "  \n");
        assert_eq!(bare, "[t] ERROR in ctx: msg\n\n");
    }

    #[test]
    fn test_appends_to_active_file() {
        let dir = tempdir().unwrap();
        let logger = RollingLogger::open(dir.path(), "Test", RollingConfig::default()).unwrap();

        logger.error_in("backend:start", "boom", "trace line").unwrap();

        let content = fs::read_to_string(dir.path().join("Test.log")).unwrap();
        assert!(content.contains("ERROR in backend:start: boom\ntrace line\n"));
        assert!(content.starts_with('['));
    }

    #[test]
    fn test_rotation_keeps_bounded_file_count() {
        let dir = tempdir().unwrap();
        let logger = RollingLogger::open(dir.path(), "Rot", small_config()).unwrap();

        for i in 0..10 {
            logger.append(&format!("{:0>40}\n", i)).unwrap();
        }

        assert!(dir.path().join("Rot.log").exists());
        assert!(dir.path().join("Rot.1.log").exists());
        assert!(dir.path().join("Rot.2.log").exists());
        assert!(!dir.path().join("Rot.3.log").exists());

        let active = fs::read_to_string(dir.path().join("Rot.log")).unwrap();
        assert!(active.len() as u64 <= 64);
        assert!(active.contains(&format!("{:0>40}", 9)));
    }

    #[test]
    fn test_reopen_continues_existing_file() {
        let dir = tempdir().unwrap();
        {
            let logger = RollingLogger::open(dir.path(), "Keep", RollingConfig::default()).unwrap();
            logger.append("first\n").unwrap();
        }
        let logger = RollingLogger::open(dir.path(), "Keep", RollingConfig::default()).unwrap();
        logger.append("second\n").unwrap();

        let content = fs::read_to_string(logger.log_path()).unwrap();
        assert_eq!(content, "first\nsecond\n");
    }

    #[test]
    fn test_ring_buffer_keeps_latest_lines() {
        let dir = tempdir().unwrap();
        let logger = RollingLogger::open(dir.path(), "Buf", small_config()).unwrap();

        logger.append("a\nb\n").unwrap();
        logger.append("c\nd\n").unwrap();

        assert_eq!(logger.recent(10), vec!["b", "c", "d"]);
        assert_eq!(logger.recent(1), vec!["d"]);
    }

    #[test]
    fn test_io_write_appends() {
        let dir = tempdir().unwrap();
        let mut logger = RollingLogger::open(dir.path(), "Io", RollingConfig::default()).unwrap();

        writeln!(logger, "from writer").unwrap();
        logger.flush().unwrap();

        let content = fs::read_to_string(logger.log_path()).unwrap();
        assert_eq!(content, "from writer\n");
    }
}
