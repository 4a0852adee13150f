use crate::core::error::Result;
use crate::core::types::AnalysisKind;
use chrono::Utc;
use parking_lot::Mutex;
use serde::Serialize;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Structure for a single log entry
#[derive(Debug, Serialize)]
pub struct LogEntry<'a> {
    /// Analysis that was run
    pub analysis: AnalysisKind,
    /// Boolean outcome: `safe`, `deadlocked`, request granted or recovery resolved
    pub verdict: bool,
    /// Safe order, cycle, deadlocked processes or recovery victims
    pub witness: &'a [String],
    /// Absolute timestamp of the analysis (seconds since Unix Epoch)
    pub timestamp: f64,
}

/// Determines how the logger should operate
#[derive(Debug)]
pub enum LoggerMode {
    /// Logging is disabled entirely
    Disabled,
    /// Log to the specified file
    ToFile {
        path: PathBuf,
        writer: Mutex<BufWriter<File>>,
    },
}

/// Logger for recording analysis runs as JSON lines
#[derive(Debug)]
pub struct AnalysisLogger {
    mode: LoggerMode,
}

impl Default for AnalysisLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl AnalysisLogger {
    /// Create a new logger with logging disabled
    pub fn new() -> Self {
        AnalysisLogger {
            mode: LoggerMode::Disabled,
        }
    }

    /// Create a new logger that writes to the specified file
    ///
    /// # Arguments
    /// * `path` - Path to the log file. If it contains "{timestamp}", that is
    ///   replaced with the current time as `%Y%m%d_%H%M%S`.
    ///
    /// # Errors
    /// Returns an error if the parent directory cannot be created or the file
    /// cannot be opened
    pub fn with_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = resolve_log_path(path.as_ref());

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent)?;
        }

        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(&path)?;

        Ok(AnalysisLogger {
            mode: LoggerMode::ToFile {
                path,
                writer: Mutex::new(BufWriter::new(file)),
            },
        })
    }

    /// Record one analysis run
    ///
    /// Write failures are dropped; logging never changes an analysis result.
    pub fn log(&self, analysis: AnalysisKind, verdict: bool, witness: &[String]) {
        let LoggerMode::ToFile { writer, .. } = &self.mode else {
            return;
        };

        let now = Utc::now();
        let timestamp = now.timestamp() as f64 + now.timestamp_subsec_micros() as f64 / 1_000_000.0;
        let entry = LogEntry {
            analysis,
            verdict,
            witness,
            timestamp,
        };

        if let Ok(json) = serde_json::to_string(&entry) {
            let mut writer = writer.lock();
            let _ = writeln!(writer, "{json}");
            let _ = writer.flush();
        }
    }

    /// Check if logging is enabled
    pub fn is_enabled(&self) -> bool {
        !matches!(self.mode, LoggerMode::Disabled)
    }

    /// Path of the log file, if logging to a file
    pub fn path(&self) -> Option<&Path> {
        match &self.mode {
            LoggerMode::ToFile { path, .. } => Some(path),
            LoggerMode::Disabled => None,
        }
    }
}

/// Replace a "{timestamp}" placeholder in `path`
#[allow(clippy::literal_string_with_formatting_args)]
fn resolve_log_path(path: &Path) -> PathBuf {
    let raw = path.to_string_lossy();
    if raw.contains("{timestamp}") {
        let timestamp = Utc::now().format("%Y%m%d_%H%M%S").to_string();
        PathBuf::from(raw.replace("{timestamp}", &timestamp))
    } else {
        path.to_path_buf()
    }
}
