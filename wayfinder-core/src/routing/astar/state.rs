use std::cmp::Ordering;

use petgraph::graph::NodeIndex;

/// Frontier entry
#[derive(Copy, Clone, Debug)]
pub(super) struct State {
    pub(super) f_score: f64,
    pub(super) g_score: f64,
    /// Push order, breaks ties between equal `f` scores
    pub(super) seq: usize,
    pub(super) node: NodeIndex,
}

// Implement Ord for State to use in BinaryHeap
impl Ord for State {
    fn cmp(&self, other: &Self) -> Ordering {
        // Min-heap by f score, earlier pushes first
        other
            .f_score
            .total_cmp(&self.f_score)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for State {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for State {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for State {}

/// Best known cost record of a node during one search
#[derive(Copy, Clone, Debug, PartialEq)]
pub(super) struct SearchState {
    pub(super) g_score: f64,
    pub(super) f_score: f64,
    pub(super) predecessor: Option<NodeIndex>,
}
