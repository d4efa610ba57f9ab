//! Orchestration of graph building and A* search with level-aware costs

use log::{debug, warn};

use crate::{
    Error,
    loading::{GraphBuilder, PathfinderConfig, PenaltyMode},
    model::{Edge, Feature, IndoorGraph, Metric, Node},
    routing::{CostModel, Route, SearchOptions, astar},
};

/// Shortest-path queries over a venue graph built once at construction.
///
/// The level transition penalty can be changed between queries through
/// [`Pathfinder::set_level_transition_penalty`]; doing so from several
/// threads requires external synchronization. [`Pathfinder::find_path_with_penalty`]
/// takes the penalty per call instead.
#[derive(Debug, Clone)]
pub struct Pathfinder {
    graph: IndoorGraph,
    config: PathfinderConfig,
}

/// Metric distance plus a penalty whenever the two nodes are on different levels
#[derive(Debug, Clone, Copy)]
struct LevelCost {
    metric: Metric,
    penalty: f64,
    mode: PenaltyMode,
}

impl LevelCost {
    fn level_penalty(&self, a: &Node, b: &Node) -> f64 {
        if a.same_level(b) { 0.0 } else { self.penalty }
    }
}

impl CostModel for LevelCost {
    fn heuristic(&self, node: &Node, goal: &Node) -> f64 {
        self.metric.distance(node.geometry, goal.geometry) + self.level_penalty(node, goal)
    }

    fn step_cost(&self, from: &Node, to: &Node, edge: &Edge) -> f64 {
        match self.mode {
            PenaltyMode::HeuristicOnly => edge.weight,
            PenaltyMode::HeuristicAndEdges => edge.weight + self.level_penalty(from, to),
        }
    }
}

impl Pathfinder {
    /// Builds the graph from `features` with the default configuration
    ///
    /// # Errors
    ///
    /// Returns [`Error::GraphEmpty`] if line strings are present but there
    /// are no point features to snap them to.
    pub fn new(features: &[Feature]) -> Result<Self, Error> {
        Self::with_config(features, PathfinderConfig::default())
    }

    /// Builds the graph from `features` using `config.metric`
    ///
    /// # Errors
    ///
    /// See [`Pathfinder::new`].
    pub fn with_config(features: &[Feature], config: PathfinderConfig) -> Result<Self, Error> {
        let graph = GraphBuilder::build_graph(features, config.metric)?;
        Ok(Self { graph, config })
    }

    /// Wraps an already built graph. The graph's metric takes precedence
    /// over `config.metric`.
    pub fn from_graph(graph: IndoorGraph, mut config: PathfinderConfig) -> Self {
        config.metric = graph.metric();
        Self { graph, config }
    }

    /// Nodes from `start_id` to `goal_id`, both included.
    ///
    /// Returns `None` when either id is unknown or the goal cannot be reached.
    pub fn find_path(&self, start_id: &str, goal_id: &str) -> Option<Vec<Node>> {
        self.find_path_with_penalty(start_id, goal_id, self.config.level_transition_penalty)
    }

    /// Same as [`Pathfinder::find_path`], with the penalty given for this call only
    pub fn find_path_with_penalty(
        &self,
        start_id: &str,
        goal_id: &str,
        penalty: f64,
    ) -> Option<Vec<Node>> {
        match self.search(start_id, goal_id, penalty) {
            Ok(route) => route.map(Route::into_nodes),
            Err(e) => {
                warn!("Path search {start_id} -> {goal_id} failed: {e}");
                None
            }
        }
    }

    /// Route from `start_id` to `goal_id` including its cost
    ///
    /// # Errors
    ///
    /// Returns [`Error::SearchAborted`] if the configured iteration limit was
    /// reached. Unknown ids and unreachable goals are `Ok(None)`.
    pub fn find_route(&self, start_id: &str, goal_id: &str) -> Result<Option<Route>, Error> {
        self.search(start_id, goal_id, self.config.level_transition_penalty)
    }

    pub fn set_level_transition_penalty(&mut self, penalty: f64) {
        self.config.level_transition_penalty = penalty;
    }

    pub fn level_transition_penalty(&self) -> f64 {
        self.config.level_transition_penalty
    }

    pub fn config(&self) -> &PathfinderConfig {
        &self.config
    }

    pub fn graph(&self) -> &IndoorGraph {
        &self.graph
    }

    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.graph.nodes()
    }

    pub fn edges(&self) -> impl Iterator<Item = &Edge> {
        self.graph.edges()
    }

    pub fn node(&self, id: &str) -> Option<&Node> {
        self.graph.node(id)
    }

    fn search(&self, start_id: &str, goal_id: &str, penalty: f64) -> Result<Option<Route>, Error> {
        let (Some(start), Some(goal)) = (self.graph.node(start_id), self.graph.node(goal_id)) else {
            debug!("Start or goal node not found: {start_id} -> {goal_id}");
            return Ok(None);
        };

        let cost = LevelCost {
            metric: self.graph.metric(),
            penalty,
            mode: self.config.penalty_mode,
        };
        let options = SearchOptions {
            max_iterations: self.config.max_iterations,
        };

        astar(&self.graph, start, goal, &cost, &options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corridor_with_stairs() -> Vec<Feature> {
        vec![
            Feature::point(0.0, 0.0).with_id("hall").with_level("L1"),
            Feature::point(4.0, 0.0).with_id("stairs_1").with_level("L1"),
            Feature::point(4.0, 1.0).with_id("stairs_2").with_level("L2"),
            Feature::point(8.0, 1.0).with_id("shop").with_level("L2"),
            Feature::line_string(&[(0.0, 0.0), (4.0, 0.0), (4.0, 1.0), (8.0, 1.0)]),
        ]
    }

    #[test]
    fn heuristic_adds_penalty_across_levels() {
        let cost = LevelCost {
            metric: Metric::Euclidean,
            penalty: 10.0,
            mode: PenaltyMode::HeuristicOnly,
        };
        let a = Node::new("a", (0.0, 0.0), "L1");
        let b = Node::new("b", (3.0, 4.0), "L1");
        let c = Node::new("c", (3.0, 4.0), "L2");

        assert!((cost.heuristic(&a, &b) - 5.0).abs() < 1e-12);
        assert!((cost.heuristic(&a, &c) - 15.0).abs() < 1e-12);
    }

    #[test]
    fn step_cost_depends_on_mode() {
        let edge = Edge {
            source: "a".into(),
            target: "b".into(),
            weight: 2.0,
        };
        let a = Node::new("a", (0.0, 0.0), "L1");
        let b = Node::new("b", (2.0, 0.0), "L2");

        let mut cost = LevelCost {
            metric: Metric::Euclidean,
            penalty: 10.0,
            mode: PenaltyMode::HeuristicOnly,
        };
        assert_eq!(cost.step_cost(&a, &b, &edge), 2.0);

        cost.mode = PenaltyMode::HeuristicAndEdges;
        assert_eq!(cost.step_cost(&a, &b, &edge), 12.0);
        assert_eq!(cost.step_cost(&a, &a, &edge), 2.0);
    }

    #[test]
    fn route_cost_includes_penalty_only_when_charged_on_edges() {
        let features = corridor_with_stairs();

        let plain = Pathfinder::new(&features).unwrap();
        let route = plain.find_route("hall", "shop").unwrap().unwrap();
        assert_eq!(route.ids(), ["hall", "stairs_1", "stairs_2", "shop"]);
        assert!((route.cost - 9.0).abs() < 1e-12);

        let config = PathfinderConfig {
            penalty_mode: PenaltyMode::HeuristicAndEdges,
            ..Default::default()
        };
        let charged = Pathfinder::with_config(&features, config).unwrap();
        let route = charged.find_route("hall", "shop").unwrap().unwrap();
        assert_eq!(route.len(), 4);
        assert!((route.cost - 19.0).abs() < 1e-12);
    }

    #[test]
    fn penalty_is_configurable() {
        let mut pathfinder = Pathfinder::new(&corridor_with_stairs()).unwrap();
        assert_eq!(pathfinder.level_transition_penalty(), 10.0);

        pathfinder.set_level_transition_penalty(-3.5);
        assert_eq!(pathfinder.level_transition_penalty(), -3.5);
        assert_eq!(pathfinder.config().level_transition_penalty, -3.5);
    }

    #[test]
    fn from_graph_uses_graph_metric() {
        let graph = GraphBuilder::build_graph(&corridor_with_stairs(), Metric::Haversine).unwrap();
        let pathfinder = Pathfinder::from_graph(graph, PathfinderConfig::default());
        assert_eq!(pathfinder.config().metric, Metric::Haversine);
    }
}
