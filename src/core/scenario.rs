//! JSON scenario files
//!
//! A scenario is one analysis input, tagged by `kind`:
//!
//! ```json
//! { "kind": "safety", "allocation": [[0, 1]], "max": [[1, 1]], "available": [1, 0] }
//! { "kind": "detection", "allocation": [[1]], "request": [[0]], "available": [0] }
//! { "kind": "graph", "processes": ["P1"], "resources": ["R1"],
//!   "edges": [{ "from": "R1", "to": "P1", "type": "allocation" }] }
//! ```
//!
//! Quantities are kept as raw JSON numbers until validation so that negative
//! and fractional values are reported as invalid quantities rather than as
//! parse errors.

use crate::core::Engine;
use crate::core::detection::MatrixDetectionResult;
use crate::core::detector::DetectionResult;
use crate::core::error::Result;
use crate::core::graph::{GraphSpec, ResourceAllocationGraph};
use crate::core::matrix::{DetectionState, ResourceMatrix, ResourceVector, SystemState};
use crate::core::safety::SafetyResult;
use serde::{Deserialize, Serialize};
use serde_json::Number;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// One analysis input
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Scenario {
    /// Banker's safety check
    Safety {
        allocation: Vec<Vec<Number>>,
        max: Vec<Vec<Number>>,
        available: Vec<Number>,
    },
    /// Matrix deadlock detection
    Detection {
        allocation: Vec<Vec<Number>>,
        request: Vec<Vec<Number>>,
        available: Vec<Number>,
    },
    /// Resource-allocation graph cycle detection
    Graph(GraphSpec),
}

/// Result of running a scenario
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Verdict {
    Safety(SafetyResult),
    Detection(MatrixDetectionResult),
    Graph(DetectionResult),
}

impl Scenario {
    /// Load a scenario from a JSON file
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        Ok(serde_json::from_reader(BufReader::new(file))?)
    }

    /// Parse a scenario from a JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Validate the input and run the matching analysis on `engine`
    pub fn run(&self, engine: &Engine) -> Result<Verdict> {
        match self {
            Scenario::Safety {
                allocation,
                max,
                available,
            } => {
                let state = SystemState::new(
                    ResourceMatrix::from_json(allocation)?,
                    ResourceMatrix::from_json(max)?,
                    ResourceVector::from_json(available)?,
                )?;
                Ok(Verdict::Safety(engine.check_safety(&state)))
            }
            Scenario::Detection {
                allocation,
                request,
                available,
            } => {
                let state = DetectionState::new(
                    ResourceMatrix::from_json(allocation)?,
                    ResourceMatrix::from_json(request)?,
                    ResourceVector::from_json(available)?,
                )?;
                Ok(Verdict::Detection(engine.detect_matrix_deadlock(&state)))
            }
            Scenario::Graph(spec) => {
                let graph = ResourceAllocationGraph::from_spec(spec)?;
                Ok(Verdict::Graph(engine.detect_deadlock(&graph)))
            }
        }
    }
}
