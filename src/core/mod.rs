// Core types
pub mod types;
pub use types::*;

pub mod error;
pub use error::{Error, Result};

// Resource vectors, matrices and validated snapshots
pub mod matrix;

// Banker's algorithm
pub mod safety;

// Matrix deadlock detection
pub mod detection;

// Graph implementation
pub mod graph;

// Cycle-based deadlock detector
pub mod detector;

// Recovery strategies
pub mod recovery;

// Logging functionality
pub mod logger;
pub use logger::AnalysisLogger;

// JSON scenarios
pub mod scenario;

use crate::core::detection::MatrixDetectionResult;
use crate::core::detector::DetectionResult;
use crate::core::graph::ResourceAllocationGraph;
use crate::core::matrix::{DetectionState, ResourceVector, SystemState};
use crate::core::recovery::{RecoveryPlan, RecoveryStrategy};
use crate::core::safety::{RequestOutcome, SafetyResult};
use anyhow::Context;
use chrono::Utc;
use std::path::Path;

type DeadlockCallback = Box<dyn Fn(DeadlockReport) + Send + Sync + 'static>;

/// deadlock-lab configuration struct
pub struct DeadlockLab {
    log_path: Option<String>,
    callback: Option<DeadlockCallback>,
}

impl Default for DeadlockLab {
    fn default() -> Self {
        Self::new()
    }
}

impl DeadlockLab {
    /// Create a new DeadlockLab with default settings
    ///
    /// By default:
    /// - Logging is disabled
    /// - No deadlock callback is installed
    pub fn new() -> Self {
        DeadlockLab {
            log_path: None,
            callback: None,
        }
    }

    /// Activate the analysis log and set the path for the log file
    ///
    /// # Arguments
    /// * `path` - Path to the log file. If the path contains "{timestamp}",
    ///   it will be replaced with the current timestamp.
    ///
    /// # Returns
    /// The builder for method chaining
    pub fn with_log<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.log_path = Some(path.as_ref().to_string_lossy().into_owned());
        self
    }

    /// Set a callback to be invoked whenever an analysis finds a deadlock
    ///
    /// # Arguments
    /// * `callback` - Function to call with the deadlock report
    ///
    /// # Returns
    /// The builder for method chaining
    pub fn callback<F>(mut self, callback: F) -> Self
    where
        F: Fn(DeadlockReport) + Send + Sync + 'static,
    {
        self.callback = Some(Box::new(callback));
        self
    }

    /// Build the engine with the configured settings
    ///
    /// # Errors
    /// Returns an error if logger initialization fails
    pub fn start(self) -> anyhow::Result<Engine> {
        let logger = match self.log_path {
            Some(log_path) => AnalysisLogger::with_file(&log_path)
                .with_context(|| format!("Failed to initialize logger at {log_path}"))?,
            None => AnalysisLogger::new(),
        };

        Ok(Engine {
            logger,
            callback: self.callback,
        })
    }
}

/// Configured entry point to the analyses
///
/// Each method delegates to the pure analysis function, records the run in
/// the analysis log and, when a deadlock is found, invokes the callback. The
/// engine keeps no analysis state between calls; any number of callers can
/// share one by reference.
pub struct Engine {
    logger: AnalysisLogger,
    callback: Option<DeadlockCallback>,
}

impl Engine {
    /// Banker's safety check, see [`safety::check_safety`]
    pub fn check_safety(&self, state: &SystemState) -> SafetyResult {
        let result = safety::check_safety(state);
        self.logger
            .log(AnalysisKind::Safety, result.safe, &labels(&result.order));
        result
    }

    /// Banker's resource-request step, see [`safety::check_request`]
    pub fn check_request(
        &self,
        state: &SystemState,
        process: ProcessId,
        request: &ResourceVector,
    ) -> Result<RequestOutcome> {
        let outcome = safety::check_request(state, process, request)?;
        let (granted, order) = match &outcome {
            RequestOutcome::Granted { order } => (true, labels(order)),
            RequestOutcome::Unsafe { order } => (false, labels(order)),
            RequestOutcome::MustWait => (false, Vec::new()),
        };
        self.logger.log(AnalysisKind::ResourceRequest, granted, &order);
        Ok(outcome)
    }

    /// Graph cycle detection, see [`detector::detect_deadlock`]
    pub fn detect_deadlock(&self, graph: &ResourceAllocationGraph) -> DetectionResult {
        let result = detector::detect_deadlock(graph);
        self.logger
            .log(AnalysisKind::GraphDetection, result.deadlocked, &result.cycle);

        if let (true, Some(phase)) = (result.deadlocked, result.phase) {
            self.report(DeadlockReport {
                source: phase.into(),
                cycle: result.cycle.clone(),
                waiting_for: waiting_pairs(graph, &result.cycle),
                timestamp: Utc::now().to_rfc3339(),
            });
        }
        result
    }

    /// Matrix deadlock detection, see [`detection::detect_matrix_deadlock`]
    pub fn detect_matrix_deadlock(&self, state: &DetectionState) -> MatrixDetectionResult {
        let result = detection::detect_matrix_deadlock(state);
        let processes = labels(&result.deadlocked_processes);
        self.logger
            .log(AnalysisKind::MatrixDetection, result.deadlocked, &processes);

        if result.deadlocked {
            self.report(DeadlockReport {
                source: DeadlockSource::DetectionMatrix,
                cycle: processes,
                waiting_for: Vec::new(),
                timestamp: Utc::now().to_rfc3339(),
            });
        }
        result
    }

    /// Recovery, see [`recovery::recover`]
    pub fn recover(
        &self,
        graph: &ResourceAllocationGraph,
        strategy: RecoveryStrategy,
    ) -> RecoveryPlan {
        let plan = recovery::recover(graph, strategy);
        self.logger
            .log(AnalysisKind::Recovery, plan.resolved, &plan.victims);
        plan
    }

    /// Path of the analysis log, if logging is enabled
    pub fn log_path(&self) -> Option<&Path> {
        self.logger.path()
    }

    fn report(&self, report: DeadlockReport) {
        if let Some(cb) = &self.callback {
            cb(report);
        }
    }
}

fn labels(processes: &[ProcessId]) -> Vec<String> {
    processes.iter().map(|&p| process_label(p)).collect()
}

/// (process, resource) pairs where the walk goes from a process to a resource
fn waiting_pairs(graph: &ResourceAllocationGraph, cycle: &[NodeId]) -> Vec<(String, String)> {
    cycle
        .iter()
        .enumerate()
        .filter_map(|(i, from)| {
            let to = &cycle[(i + 1) % cycle.len()];
            (graph.is_process(from) && graph.is_resource(to)).then(|| (from.clone(), to.clone()))
        })
        .collect()
}
