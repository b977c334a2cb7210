//! Rolling File Logger
//!
//! Installs a `tracing` subscriber that writes one file per day under a log
//! directory and keeps the most recent lines in a circular buffer.
//! Records emitted through the `log` facade are bridged into the same sink.

use std::collections::VecDeque;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, OnceLock};

use chrono::Local;

/// Number of daily log files kept on disk
pub const MAX_LOG_FILES: usize = 7;
/// Number of lines kept in memory
pub const RING_CAPACITY: usize = 500;

static LOGGER: OnceLock<Mutex<LoggerState>> = OnceLock::new();

/// Fixed-size buffer of the most recent log lines
#[derive(Debug)]
pub struct RingBuffer {
    lines: VecDeque<String>,
    capacity: usize,
}

impl RingBuffer {
    pub fn new(capacity: usize) -> Self {
        Self {
            lines: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn push(&mut self, line: String) {
        if self.capacity == 0 {
            return;
        }
        if self.lines.len() == self.capacity {
            self.lines.pop_front();
        }
        self.lines.push_back(line);
    }

    /// Lines oldest first
    pub fn snapshot(&self) -> Vec<String> {
        self.lines.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Daily log file, reopened when the local date changes
struct RollingFile {
    dir: PathBuf,
    app_name: String,
    date: String,
    file: File,
}

impl RollingFile {
    fn open(dir: &Path, app_name: &str) -> io::Result<Self> {
        fs::create_dir_all(dir)?;
        let date = today();
        let file = open_log_file(dir, app_name, &date)?;
        prune_old_files(dir, app_name, MAX_LOG_FILES)?;
        Ok(Self {
            dir: dir.to_path_buf(),
            app_name: app_name.to_string(),
            date,
            file,
        })
    }

    fn write_all(&mut self, buf: &[u8]) -> io::Result<()> {
        let date = today();
        if date != self.date {
            self.file = open_log_file(&self.dir, &self.app_name, &date)?;
            self.date = date;
            prune_old_files(&self.dir, &self.app_name, MAX_LOG_FILES)?;
        }
        self.file.write_all(buf)
    }
}

struct LoggerState {
    file: RollingFile,
    recent: RingBuffer,
}

impl LoggerState {
    fn record(&mut self, buf: &[u8]) -> io::Result<()> {
        self.file.write_all(buf)?;
        for line in String::from_utf8_lossy(buf).lines() {
            if !line.trim().is_empty() {
                self.recent.push(line.to_string());
            }
        }
        Ok(())
    }
}

/// Writer handed to the fmt layer; forwards into the global state
struct SharedWriter;

impl Write for SharedWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if let Some(state) = LOGGER.get() {
            let mut state = state
                .lock()
                .map_err(|_| io::Error::new(io::ErrorKind::Other, "logger state poisoned"))?;
            state.record(buf)?;
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        if let Some(state) = LOGGER.get() {
            let mut state = state
                .lock()
                .map_err(|_| io::Error::new(io::ErrorKind::Other, "logger state poisoned"))?;
            state.file.file.flush()?;
        }
        Ok(())
    }
}

fn today() -> String {
    Local::now().format("%Y-%m-%d").to_string()
}

/// File name for a given day: `<app_name>-YYYY-MM-DD.log`
pub fn log_file_name(app_name: &str, date: &str) -> String {
    format!("{}-{}.log", app_name, date)
}

fn open_log_file(dir: &Path, app_name: &str, date: &str) -> io::Result<File> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(dir.join(log_file_name(app_name, date)))
}

/// Delete the oldest `<app_name>-*.log` files until at most `keep` remain
pub fn prune_old_files(dir: &Path, app_name: &str, keep: usize) -> io::Result<usize> {
    let prefix = format!("{}-", app_name);
    let mut files: Vec<PathBuf> = fs::read_dir(dir)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| {
            path.file_name()
                .and_then(|n| n.to_str())
                .map(|n| n.starts_with(&prefix) && n.ends_with(".log"))
                .unwrap_or(false)
        })
        .collect();

    if files.len() <= keep {
        return Ok(0);
    }

    // Date suffix sorts lexicographically
    files.sort();
    let excess = files.len() - keep;
    for path in files.iter().take(excess) {
        fs::remove_file(path)?;
    }
    Ok(excess)
}

/// Initialize the global logger.
///
/// Fails if a logger (this one or any other `tracing`/`log` backend) is
/// already installed.
pub fn init_logger(log_dir: PathBuf, app_name: &str) -> Result<(), String> {
    let file = RollingFile::open(&log_dir, app_name)
        .map_err(|e| format!("Failed to open log file in {}: {}", log_dir.display(), e))?;

    LOGGER
        .set(Mutex::new(LoggerState {
            file,
            recent: RingBuffer::new(RING_CAPACITY),
        }))
        .map_err(|_| "Logger already initialized".to_string())?;

    tracing_subscriber::fmt()
        .with_writer(|| SharedWriter)
        .with_ansi(false)
        .with_target(true)
        .try_init()
        .map_err(|e| format!("Failed to install subscriber: {}", e))?;

    log::info!("{} logger initialized at {}", app_name, log_dir.display());
    Ok(())
}

pub fn is_initialized() -> bool {
    LOGGER.get().is_some()
}

/// Most recent log lines, oldest first
pub fn recent_lines() -> Vec<String> {
    LOGGER
        .get()
        .and_then(|state| state.lock().ok().map(|s| s.recent.snapshot()))
        .unwrap_or_default()
}

fn ensure_initialized() -> Result<(), String> {
    if is_initialized() {
        Ok(())
    } else {
        Err("Logger not initialized".to_string())
    }
}

pub fn info(msg: &str) -> Result<(), String> {
    ensure_initialized()?;
    tracing::info!("{}", msg);
    Ok(())
}

pub fn warn(msg: &str) -> Result<(), String> {
    ensure_initialized()?;
    tracing::warn!("{}", msg);
    Ok(())
}

pub fn error(msg: &str) -> Result<(), String> {
    ensure_initialized()?;
    tracing::error!("{}", msg);
    Ok(())
}
