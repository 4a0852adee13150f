use deadlock_lab::{EdgeKind, ResourceAllocationGraph, detect_deadlock};
use rand::Rng;
mod common;
use common::is_closed_walk;

/// Pi holds Ri and requests R(i+1), closing a ring of `n` processes
fn ring(n: usize) -> ResourceAllocationGraph {
    let mut graph = ResourceAllocationGraph::new();
    for i in 0..n {
        graph.add_process(&format!("P{i}")).unwrap();
        graph.add_resource(&format!("R{i}")).unwrap();
    }
    for i in 0..n {
        graph
            .add_edge(&format!("R{i}"), &format!("P{i}"), EdgeKind::Allocation)
            .unwrap();
        graph
            .add_edge(&format!("P{i}"), &format!("R{}", (i + 1) % n), EdgeKind::Request)
            .unwrap();
    }
    graph
}

#[test]
fn test_random_ring_deadlock() {
    let mut rng = rand::rng();

    for _ in 0..10 {
        let n = rng.random_range(3..=8);
        let graph = ring(n);

        let result = detect_deadlock(&graph);
        assert!(result.deadlocked, "ring of {n} should deadlock");
        assert_eq!(result.cycle.len(), 2 * n);
        assert_eq!(result.cycle[0], "P0");
        assert!(is_closed_walk(&graph, &result.cycle));
    }
}

#[test]
fn test_random_ring_broken_at_random_link() {
    let mut rng = rand::rng();

    for _ in 0..10 {
        let n = rng.random_range(3..=8);
        let link = rng.random_range(0..n);
        let mut graph = ring(n);
        graph
            .remove_edge(&format!("P{link}-R{}", (link + 1) % n))
            .unwrap();

        let result = detect_deadlock(&graph);
        assert!(
            !result.deadlocked,
            "ring of {n} broken at P{link} still reports {:?}",
            result.cycle
        );
    }
}
