//! Matrix-based deadlock detection
//!
//! The multi-instance detection algorithm: the same work/finish passes as the
//! safety check, but a process only has to get its *current request* rather
//! than its remaining worst-case need. Processes left unfinished are
//! deadlocked.

use crate::core::matrix::DetectionState;
use crate::core::safety::run_passes;
use crate::core::types::ProcessId;
use serde::{Deserialize, Serialize};

/// Outcome of matrix deadlock detection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatrixDetectionResult {
    pub deadlocked: bool,
    /// Every process that could not finish, ascending
    pub deadlocked_processes: Vec<ProcessId>,
}

/// Find the processes that can never have their outstanding requests met
pub fn detect_matrix_deadlock(state: &DetectionState) -> MatrixDetectionResult {
    let (finish, _) = run_passes(state.request(), state.allocation(), state.available());
    let deadlocked_processes: Vec<ProcessId> = finish
        .iter()
        .enumerate()
        .filter_map(|(p, &done)| (!done).then_some(p))
        .collect();

    MatrixDetectionResult {
        deadlocked: !deadlocked_processes.is_empty(),
        deadlocked_processes,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn textbook(request_p2: Vec<u32>) -> DetectionState {
        DetectionState::from_rows(
            vec![
                vec![0, 1, 0],
                vec![2, 0, 0],
                vec![3, 0, 3],
                vec![2, 1, 1],
                vec![0, 0, 2],
            ],
            vec![
                vec![0, 0, 0],
                vec![2, 0, 2],
                request_p2,
                vec![1, 0, 0],
                vec![0, 0, 2],
            ],
            vec![0, 0, 0],
        )
        .unwrap()
    }

    #[test]
    fn test_no_deadlock() {
        let result = detect_matrix_deadlock(&textbook(vec![0, 0, 0]));
        assert!(!result.deadlocked);
        assert!(result.deadlocked_processes.is_empty());
    }

    #[test]
    fn test_deadlock_after_extra_request() {
        // P2 asking for one more C leaves only P0 able to finish
        let result = detect_matrix_deadlock(&textbook(vec![0, 0, 1]));
        assert!(result.deadlocked);
        assert_eq!(result.deadlocked_processes, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_detection_is_idempotent() {
        let state = textbook(vec![0, 0, 1]);
        assert_eq!(detect_matrix_deadlock(&state), detect_matrix_deadlock(&state));
    }
}
