//! Logging functionality for deadlock-lab
//!
//! Records every analysis run by a configured engine as one JSON object per
//! line, so a front end can replay what was checked and what was found.

mod analysis_logger;

pub use analysis_logger::{AnalysisLogger, LogEntry, LoggerMode};
