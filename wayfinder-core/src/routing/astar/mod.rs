//! A* search over an [`IndoorGraph`]

mod state;

use std::collections::BinaryHeap;

use fixedbitset::FixedBitSet;
use hashbrown::{HashMap, hash_map::Entry};
use log::{debug, trace};
use petgraph::graph::NodeIndex;

use self::state::{SearchState, State};
use super::Route;
use crate::{
    Error,
    model::{Edge, IndoorGraph, Node},
};

/// Cost shaping supplied by the caller of [`astar`].
///
/// Admissibility is not enforced; an overestimating heuristic yields a valid
/// but possibly suboptimal path.
pub trait CostModel {
    /// Estimated remaining cost from `node` to `goal`
    fn heuristic(&self, node: &Node, goal: &Node) -> f64;

    /// Cost of moving from `from` to `to` over `edge`
    fn step_cost(&self, _from: &Node, _to: &Node, edge: &Edge) -> f64 {
        edge.weight
    }
}

impl<F> CostModel for F
where
    F: Fn(&Node, &Node) -> f64,
{
    fn heuristic(&self, node: &Node, goal: &Node) -> f64 {
        self(node, goal)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchOptions {
    /// Abort after this many node expansions, `None` searches exhaustively.
    /// Popping the goal is not an expansion.
    pub max_iterations: Option<usize>,
}

/// Single-pair shortest path from `start` to `goal`.
///
/// Nodes are resolved against `graph` by id. Returns `Ok(None)` when either
/// node is not part of the graph or the goal is unreachable. Closed nodes are
/// never reopened, so an inconsistent heuristic may produce a suboptimal path.
///
/// # Errors
///
/// Returns [`Error::SearchAborted`] when `options.max_iterations` expansions
/// did not reach the goal.
pub fn astar<C>(
    graph: &IndoorGraph,
    start: &Node,
    goal: &Node,
    cost: &C,
    options: &SearchOptions,
) -> Result<Option<Route>, Error>
where
    C: CostModel + ?Sized,
{
    let (Some(start_idx), Some(goal_idx)) =
        (graph.node_index(&start.id), graph.node_index(&goal.id))
    else {
        debug!("A* endpoints {} -> {} not in graph", start.id, goal.id);
        return Ok(None);
    };

    if start_idx == goal_idx {
        return Ok(Some(Route::new(vec![graph.node_at(start_idx).clone()], 0.0)));
    }

    let goal_node = graph.node_at(goal_idx);
    let start_h = cost.heuristic(graph.node_at(start_idx), goal_node);

    let mut states: HashMap<NodeIndex, SearchState> = HashMap::new();
    let mut closed = FixedBitSet::with_capacity(graph.node_count());
    let mut open = BinaryHeap::new();
    let mut seq = 0;

    states.insert(
        start_idx,
        SearchState {
            g_score: 0.0,
            f_score: start_h,
            predecessor: None,
        },
    );
    open.push(State {
        f_score: start_h,
        g_score: 0.0,
        seq,
        node: start_idx,
    });

    debug!("A* from {} to {}", start.id, goal.id);
    let mut iterations = 0;

    while let Some(State { g_score, node, .. }) = open.pop() {
        // Lazy deletion of superseded frontier entries
        if closed.contains(node.index()) {
            continue;
        }
        if states.get(&node).is_some_and(|best| g_score > best.g_score) {
            continue;
        }

        if node == goal_idx {
            let route = reconstruct_route(graph, &states, start_idx, goal_idx, g_score);
            debug!(
                "A* reached {} after {iterations} iterations, {} nodes, cost {}",
                goal.id,
                route.len(),
                route.cost
            );
            return Ok(Some(route));
        }

        if let Some(max) = options.max_iterations
            && iterations >= max
        {
            debug!("A* aborted after {iterations} iterations");
            return Err(Error::SearchAborted { iterations });
        }
        iterations += 1;

        closed.insert(node.index());
        let current = graph.node_at(node);
        trace!("A* expanding {} (g = {g_score})", current.id);

        for (next, edge) in graph.incident(node) {
            if closed.contains(next.index()) {
                continue;
            }

            let neighbor = graph.node_at(next);
            let tentative = g_score + cost.step_cost(current, neighbor, edge);

            let improved = SearchState {
                g_score: tentative,
                f_score: f64::NAN,
                predecessor: Some(node),
            };
            let record = match states.entry(next) {
                Entry::Vacant(entry) => entry.insert(improved),
                Entry::Occupied(entry) if tentative < entry.get().g_score => {
                    let record = entry.into_mut();
                    *record = improved;
                    record
                }
                Entry::Occupied(_) => continue,
            };
            record.f_score = tentative + cost.heuristic(neighbor, goal_node);

            seq += 1;
            open.push(State {
                f_score: record.f_score,
                g_score: tentative,
                seq,
                node: next,
            });
        }
    }

    debug!("A* exhausted the frontier, no path from {} to {}", start.id, goal.id);
    Ok(None)
}

fn reconstruct_route(
    graph: &IndoorGraph,
    states: &HashMap<NodeIndex, SearchState>,
    start: NodeIndex,
    goal: NodeIndex,
    cost: f64,
) -> Route {
    let mut nodes = vec![graph.node_at(goal).clone()];
    let mut current = goal;

    while current != start {
        let Some(prev) = states.get(&current).and_then(|state| state.predecessor) else {
            break;
        };
        nodes.push(graph.node_at(prev).clone());
        current = prev;
    }
    nodes.reverse();

    Route::new(nodes, cost)
}
