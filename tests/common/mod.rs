use deadlock_lab::{
    DeadlockLab, DeadlockReport, EdgeKind, Engine, ProcessId, ResourceAllocationGraph,
    SystemState,
};
use std::sync::{Arc, Mutex as StdMutex, mpsc};

pub struct EngineHarness {
    pub engine: Engine,
    pub rx: mpsc::Receiver<DeadlockReport>,
    pub detected: Arc<StdMutex<bool>>,
}

pub fn start_engine() -> EngineHarness {
    let (tx, rx) = mpsc::channel::<DeadlockReport>();
    let detected = Arc::new(StdMutex::new(false));
    let flag = Arc::clone(&detected);
    let tx = StdMutex::new(tx);

    let engine = DeadlockLab::new()
        .callback(move |report| {
            *flag.lock().unwrap() = true;
            let _ = tx.lock().unwrap().send(report);
        })
        .start()
        .expect("Failed to initialize engine");

    EngineHarness {
        engine,
        rx,
        detected,
    }
}

#[allow(dead_code)]
pub fn expect_report(h: &EngineHarness) -> DeadlockReport {
    let report = h.rx.try_recv().expect("No deadlock reported");
    assert!(*h.detected.lock().unwrap(), "Deadlock flag should be set");
    report
}

#[allow(dead_code)]
pub fn assert_no_report(h: &EngineHarness) {
    assert!(h.rx.try_recv().is_err(), "Unexpected deadlock reported");
    assert!(
        !*h.detected.lock().unwrap(),
        "Deadlock flag should not be set"
    );
}

/// Build a graph from node lists and `(from, to, kind)` edges
#[allow(dead_code)]
pub fn graph(
    processes: &[&str],
    resources: &[&str],
    edges: &[(&str, &str, EdgeKind)],
) -> ResourceAllocationGraph {
    let mut graph = ResourceAllocationGraph::new();
    for p in processes {
        graph.add_process(p).expect("valid process");
    }
    for r in resources {
        graph.add_resource(r).expect("valid resource");
    }
    for &(from, to, kind) in edges {
        graph.add_edge(from, to, kind).expect("valid edge");
    }
    graph
}

/// The textbook five-process, three-resource Banker's state
#[allow(dead_code)]
pub fn classic_state(available: Vec<u32>) -> SystemState {
    SystemState::from_rows(
        vec![
            vec![0, 1, 0],
            vec![2, 0, 0],
            vec![3, 0, 2],
            vec![2, 1, 1],
            vec![0, 0, 2],
        ],
        vec![
            vec![7, 5, 3],
            vec![3, 2, 2],
            vec![9, 0, 2],
            vec![2, 2, 2],
            vec![4, 3, 3],
        ],
        available,
    )
    .expect("valid state")
}

/// Replay `order` against `work := available`, checking each need fits
#[allow(dead_code)]
pub fn replay_order(state: &SystemState, order: &[ProcessId]) -> bool {
    let mut work = state.available().clone();
    for &p in order {
        let (Some(need), Some(held)) = (state.need().row(p), state.allocation().row(p)) else {
            return false;
        };
        if !need.fits_within(&work) {
            return false;
        }
        work.add_assign(held);
    }
    true
}

/// Every consecutive pair of `cycle` (including last → first) is an edge
#[allow(dead_code)]
pub fn is_closed_walk(graph: &ResourceAllocationGraph, cycle: &[String]) -> bool {
    !cycle.is_empty()
        && cycle.iter().enumerate().all(|(i, from)| {
            let to = &cycle[(i + 1) % cycle.len()];
            graph.edges().iter().any(|e| &e.from == from && &e.to == to)
        })
}
