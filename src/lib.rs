//! # deadlock-lab
//!
//! The resource-state reasoning engine behind a deadlock teaching tool.
//!
//! deadlock-lab decides whether a resource-allocation state is safe, detects
//! deadlock cycles in resource-allocation graphs, and plans recovery. Every
//! analysis is a pure function of its input; the optional [`Engine`] adds an
//! analysis log and a deadlock callback on top.
//!
//! ## Features
//!
//! - Banker's safety check with a deterministic completion order
//! - Banker's resource-request evaluation
//! - Matrix deadlock detection for multi-instance resources
//! - Validated resource-allocation graph editing
//! - Two-phase cycle detection (wait-for graph, then raw graph)
//! - Recovery by process termination or resource preemption
//! - JSON-lines analysis log and JSON scenario files
//!
//! ## Example
//!
//! ```
//! use deadlock_lab::{
//!     EdgeKind, ResourceAllocationGraph, SystemState, check_safety, detect_deadlock,
//! };
//!
//! let state = SystemState::from_rows(
//!     vec![vec![0, 1, 0], vec![2, 0, 0], vec![3, 0, 2], vec![2, 1, 1], vec![0, 0, 2]],
//!     vec![vec![7, 5, 3], vec![3, 2, 2], vec![9, 0, 2], vec![2, 2, 2], vec![4, 3, 3]],
//!     vec![3, 3, 2],
//! )
//! .unwrap();
//! let result = check_safety(&state);
//! assert!(result.safe);
//! assert_eq!(result.order, vec![1, 3, 4, 0, 2]);
//!
//! let mut graph = ResourceAllocationGraph::new();
//! for p in ["P1", "P2"] {
//!     graph.add_process(p).unwrap();
//! }
//! for r in ["R1", "R2"] {
//!     graph.add_resource(r).unwrap();
//! }
//! graph.add_edge("R1", "P1", EdgeKind::Allocation).unwrap();
//! graph.add_edge("R2", "P2", EdgeKind::Allocation).unwrap();
//! graph.add_edge("P1", "R2", EdgeKind::Request).unwrap();
//! graph.add_edge("P2", "R1", EdgeKind::Request).unwrap();
//!
//! let result = detect_deadlock(&graph);
//! assert!(result.deadlocked);
//! assert_eq!(result.cycle, vec!["P1", "R2", "P2", "R1"]);
//! ```

mod core;
pub use core::{
    AnalysisLogger, DeadlockLab, Engine, Error, Result,
    detection::{MatrixDetectionResult, detect_matrix_deadlock},
    detector::{DetectionPhase, DetectionResult, detect_deadlock},
    graph::{EdgeSpec, GraphSpec, ResourceAllocationGraph, WaitForGraph},
    matrix::{DetectionState, ResourceMatrix, ResourceVector, SystemState},
    recovery::{RecoveryPlan, RecoveryStrategy, recover},
    safety::{RequestOutcome, SafetyResult, check_request, check_safety},
    scenario::{Scenario, Verdict},
    types::{
        AnalysisKind, DeadlockReport, DeadlockSource, Edge, EdgeKind, NodeId, NodeKind,
        ProcessId, Quantity, process_label,
    },
};
