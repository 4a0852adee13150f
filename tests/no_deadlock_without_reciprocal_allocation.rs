use deadlock_lab::{EdgeKind, detect_deadlock};
mod common;
use common::{assert_no_report, graph, start_engine};

#[test]
fn test_chain_without_reciprocal_allocation() {
    let harness = start_engine();

    let rag = graph(
        &["P1", "P2"],
        &["R1", "R2"],
        &[
            ("R1", "P1", EdgeKind::Allocation),
            ("P1", "R2", EdgeKind::Request),
        ],
    );

    let result = harness.engine.detect_deadlock(&rag);
    assert!(!result.deadlocked);
    assert!(result.cycle.is_empty());
    assert_no_report(&harness);
}

#[test]
fn test_long_wait_chain_is_not_a_deadlock() {
    // P1 -> P2 -> P3 waits, but P3 waits for nobody
    let rag = graph(
        &["P1", "P2", "P3"],
        &["R1", "R2", "R3"],
        &[
            ("R2", "P2", EdgeKind::Allocation),
            ("R3", "P3", EdgeKind::Allocation),
            ("R1", "P1", EdgeKind::Allocation),
            ("P1", "R2", EdgeKind::Request),
            ("P2", "R3", EdgeKind::Request),
        ],
    );

    let result = detect_deadlock(&rag);
    assert!(!result.deadlocked);
    assert_eq!(rag.wait_for_graph().edge_count(), 2);
}

#[test]
fn test_empty_graph() {
    let rag = graph(&[], &[], &[]);
    assert!(!detect_deadlock(&rag).deadlocked);
}
