//! Depth-first cycle search with an explicit recursion stack
//!
//! Works on a dense adjacency list (`adjacency[n]` lists the successors of
//! node `n` in the order they should be followed). All search state lives in
//! a [`CycleSearch`] created per call, so nothing is shared between calls.

/// Per-call DFS state
struct CycleSearch<'a> {
    adjacency: &'a [Vec<usize>],
    /// Nodes ever entered
    visited: Vec<bool>,
    /// Nodes on the current DFS path
    on_stack: Vec<bool>,
    /// Current DFS path, root first
    path: Vec<usize>,
    /// Next successor to try for each entry of `path`
    cursors: Vec<usize>,
}

impl<'a> CycleSearch<'a> {
    fn new(adjacency: &'a [Vec<usize>]) -> Self {
        let n = adjacency.len();
        CycleSearch {
            adjacency,
            visited: vec![false; n],
            on_stack: vec![false; n],
            path: Vec::with_capacity(n),
            cursors: Vec::with_capacity(n),
        }
    }

    fn enter(&mut self, node: usize) {
        self.visited[node] = true;
        self.on_stack[node] = true;
        self.path.push(node);
        self.cursors.push(0);
    }

    fn leave(&mut self) {
        if let Some(node) = self.path.pop() {
            self.on_stack[node] = false;
        }
        self.cursors.pop();
    }

    /// Run a DFS rooted at `start`
    ///
    /// On hitting a node that is still on the path, returns the path slice
    /// from that node's occurrence to the end.
    fn visit_from(&mut self, start: usize) -> Option<Vec<usize>> {
        if self.visited[start] {
            return None;
        }
        self.enter(start);

        while let (Some(&node), Some(cursor)) = (self.path.last(), self.cursors.last_mut()) {
            let Some(&next) = self.adjacency[node].get(*cursor) else {
                self.leave();
                continue;
            };
            *cursor += 1;

            if self.on_stack[next] {
                let pos = self.path.iter().position(|&n| n == next)?;
                return Some(self.path[pos..].to_vec());
            }
            if !self.visited[next] {
                self.enter(next);
            }
        }

        None
    }
}

/// Find a cycle, trying roots in index order
///
/// # Returns
/// The cycle as node indices, without repeating the first node at the end
/// (the closing edge `last → first` is implied), or `None` if acyclic.
pub(crate) fn find_cycle(adjacency: &[Vec<usize>]) -> Option<Vec<usize>> {
    let mut search = CycleSearch::new(adjacency);
    (0..adjacency.len()).find_map(|start| search.visit_from(start))
}
