use deadlock_lab::{DeadlockSource, EdgeKind, detect_deadlock};
mod common;
use common::{expect_report, graph, is_closed_walk, start_engine};

#[test]
fn test_simple_two_process_deadlock() {
    let harness = start_engine();

    // P1 holds R1 and wants R2; P2 holds R2 and wants R1
    let rag = graph(
        &["P1", "P2"],
        &["R1", "R2"],
        &[
            ("R1", "P1", EdgeKind::Allocation),
            ("R2", "P2", EdgeKind::Allocation),
            ("P1", "R2", EdgeKind::Request),
            ("P2", "R1", EdgeKind::Request),
        ],
    );

    let result = harness.engine.detect_deadlock(&rag);
    assert!(result.deadlocked);
    assert_eq!(result.cycle, vec!["P1", "R2", "P2", "R1"]);
    assert!(is_closed_walk(&rag, &result.cycle));

    let report = expect_report(&harness);
    assert_eq!(report.source, DeadlockSource::WaitForGraph);
    assert_eq!(report.cycle.len(), 4);
    assert_eq!(report.waiting_for.len(), 2);
}

#[test]
fn test_detection_is_idempotent() {
    let rag = graph(
        &["P1", "P2"],
        &["R1", "R2"],
        &[
            ("R1", "P1", EdgeKind::Allocation),
            ("R2", "P2", EdgeKind::Allocation),
            ("P1", "R2", EdgeKind::Request),
            ("P2", "R1", EdgeKind::Request),
        ],
    );

    assert_eq!(detect_deadlock(&rag), detect_deadlock(&rag));
}
