//! Banker's Algorithm safety check and resource-request step
//!
//! # How it works
//!
//! Starting from `work = available`, the checker makes full passes over the
//! unfinished processes in ascending index order. Any process whose need fits
//! in `work` is assumed to run to completion and release its allocation back
//! into `work`. Passes repeat until one finishes nothing. The state is safe
//! iff every process finished.
//!
//! Within a pass, satisfiable processes finish in ascending index order, which
//! makes the reported order deterministic.

use crate::core::error::{Error, Result};
use crate::core::matrix::{ResourceMatrix, ResourceVector, SystemState};
use crate::core::types::ProcessId;
use serde::{Deserialize, Serialize};

/// Outcome of a Banker's safety check
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SafetyResult {
    /// Every process can run to completion
    pub safe: bool,
    /// Completion order; when unsafe, only the processes finished before the
    /// algorithm stalled
    pub order: Vec<ProcessId>,
}

/// Outcome of a Banker's resource request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum RequestOutcome {
    /// Granting leaves the system safe; `order` is a safe completion order of
    /// the resulting state
    Granted { order: Vec<ProcessId> },
    /// Granting would leave the system unsafe; `order` is the partial order
    /// reached before the check stalled
    Unsafe { order: Vec<ProcessId> },
    /// Not enough units are available right now
    MustWait,
}

/// Work/finish pass loop shared by the safety check and matrix detection
///
/// A process finishes once its `demand` row fits in `work`, releasing its
/// `allocation` row. Returns the finish flags and the order in which
/// processes finished.
pub(crate) fn run_passes(
    demand: &ResourceMatrix,
    allocation: &ResourceMatrix,
    available: &ResourceVector,
) -> (Vec<bool>, Vec<ProcessId>) {
    let processes = demand.processes();
    let mut work = available.clone();
    let mut finish = vec![false; processes];
    let mut order = Vec::with_capacity(processes);

    let mut progress = true;
    while progress {
        progress = false;
        for p in 0..processes {
            if finish[p] {
                continue;
            }
            let (Some(wanted), Some(held)) = (demand.row(p), allocation.row(p)) else {
                continue;
            };
            if wanted.fits_within(&work) {
                finish[p] = true;
                order.push(p);
                work.add_assign(held);
                progress = true;
            }
        }
    }

    (finish, order)
}

/// Decide whether `state` is safe and produce a completion order
///
/// Pure function of its input: calling it twice on the same state yields the
/// same result.
pub fn check_safety(state: &SystemState) -> SafetyResult {
    let (finish, order) = run_passes(state.need(), state.allocation(), state.available());
    SafetyResult {
        safe: finish.iter().all(|&f| f),
        order,
    }
}

/// Evaluate a request of `request` units by `process` with the Banker's rules
///
/// # Errors
/// - [`Error::UnknownProcess`] if `process` is out of range
/// - [`Error::DimensionMismatch`] if `request` is not one entry per resource type
/// - [`Error::RequestExceedsNeed`] if the request goes beyond the remaining need
pub fn check_request(
    state: &SystemState,
    process: ProcessId,
    request: &ResourceVector,
) -> Result<RequestOutcome> {
    let need = state
        .need()
        .row(process)
        .ok_or(Error::UnknownProcess(process))?;
    if request.len() != state.resources() {
        return Err(Error::DimensionMismatch(format!(
            "request has {} entries, expected {}",
            request.len(),
            state.resources()
        )));
    }
    if let Some(resource) = request.first_excess_over(need) {
        return Err(Error::RequestExceedsNeed { process, resource });
    }
    if !request.fits_within(state.available()) {
        return Ok(RequestOutcome::MustWait);
    }

    let Some(granted) = state.with_granted(process, request) else {
        return Ok(RequestOutcome::MustWait);
    };
    let result = check_safety(&granted);
    Ok(if result.safe {
        RequestOutcome::Granted {
            order: result.order,
        }
    } else {
        RequestOutcome::Unsafe {
            order: result.order,
        }
    })
}
