use deadlock_lab::{EdgeKind, detect_deadlock};
mod common;
use common::graph;

#[test]
fn test_removing_any_cycle_edge_clears_deadlock() {
    let edges = [
        ("R1", "P1", EdgeKind::Allocation),
        ("R2", "P2", EdgeKind::Allocation),
        ("R3", "P3", EdgeKind::Allocation),
        ("P1", "R2", EdgeKind::Request),
        ("P2", "R3", EdgeKind::Request),
        ("P3", "R1", EdgeKind::Request),
    ];
    let rag = graph(&["P1", "P2", "P3"], &["R1", "R2", "R3"], &edges);

    let result = detect_deadlock(&rag);
    assert!(result.deadlocked);
    assert_eq!(result.cycle.len(), 6);

    for (from, to, _) in edges {
        let mut reduced = rag.clone();
        reduced.remove_edge(&format!("{from}-{to}")).unwrap();

        let result = detect_deadlock(&reduced);
        assert!(
            !result.deadlocked,
            "removing {from}-{to} should break the only cycle, got {:?}",
            result.cycle
        );
    }
}

#[test]
fn test_alternative_cycle_survives_edge_removal() {
    // Two independent cycles: P1/P2 over R1/R2 and P3/P4 over R3/R4
    let rag = graph(
        &["P1", "P2", "P3", "P4"],
        &["R1", "R2", "R3", "R4"],
        &[
            ("R1", "P1", EdgeKind::Allocation),
            ("R2", "P2", EdgeKind::Allocation),
            ("P1", "R2", EdgeKind::Request),
            ("P2", "R1", EdgeKind::Request),
            ("R3", "P3", EdgeKind::Allocation),
            ("R4", "P4", EdgeKind::Allocation),
            ("P3", "R4", EdgeKind::Request),
            ("P4", "R3", EdgeKind::Request),
        ],
    );

    let first = detect_deadlock(&rag);
    assert_eq!(first.cycle, vec!["P1", "R2", "P2", "R1"]);

    let mut reduced = rag.clone();
    reduced.remove_edge("P1-R2").unwrap();

    let second = detect_deadlock(&reduced);
    assert!(second.deadlocked);
    assert_eq!(second.cycle, vec!["P3", "R4", "P4", "R3"]);
}

#[test]
fn test_removing_node_clears_deadlock() {
    let mut rag = graph(
        &["P1", "P2"],
        &["R1", "R2"],
        &[
            ("R1", "P1", EdgeKind::Allocation),
            ("R2", "P2", EdgeKind::Allocation),
            ("P1", "R2", EdgeKind::Request),
            ("P2", "R1", EdgeKind::Request),
        ],
    );
    assert!(detect_deadlock(&rag).deadlocked);

    rag.remove_node("R2").unwrap();
    assert!(!detect_deadlock(&rag).deadlocked);
    assert_eq!(rag.edges().len(), 2);
}
