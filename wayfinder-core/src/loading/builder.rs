use itertools::Itertools;
use log::{debug, info};
use petgraph::graph::NodeIndex;
use rayon::prelude::*;

use super::locator::NodeLocator;
use crate::{
    DEFAULT_LEVEL, Error,
    model::{Edge, Feature, FeatureGeometry, IndoorGraph, Metric, Node},
};

/// One-shot translation of a feature sequence into an [`IndoorGraph`].
///
/// Points become nodes, consecutive line string vertices become edges
/// between the nodes they snap to. All nodes must be added before edges,
/// because vertices snap against the node set present at edge-build time.
#[derive(Debug, Default)]
pub struct GraphBuilder {
    graph: IndoorGraph,
}

impl GraphBuilder {
    pub fn new(metric: Metric) -> Self {
        Self {
            graph: IndoorGraph::new(metric),
        }
    }

    /// Builds a graph from `features` in a single call
    ///
    /// # Errors
    ///
    /// Returns [`Error::GraphEmpty`] if a line string has to be snapped while
    /// there are no point features.
    pub fn build_graph(features: &[Feature], metric: Metric) -> Result<IndoorGraph, Error> {
        Self::new(metric).build(features)
    }

    /// Runs both construction phases and hands over the finished graph
    ///
    /// # Errors
    ///
    /// See [`GraphBuilder::add_edges_from`].
    pub fn build(mut self, features: &[Feature]) -> Result<IndoorGraph, Error> {
        let nodes = self.add_nodes_from(features);
        let edges = self.add_edges_from(features)?;
        info!(
            "Built indoor graph: {} nodes ({nodes} point features), {edges} edges",
            self.graph.node_count()
        );
        Ok(self.graph)
    }

    /// Creates a node for every point feature, returns how many points were read.
    ///
    /// Features without an id, or with an empty one, get `node_<n>`, where
    /// `n` is the number of nodes in the graph at that moment. A repeated id
    /// replaces the earlier node in place.
    pub fn add_nodes_from(&mut self, features: &[Feature]) -> usize {
        let mut created = 0;
        for feature in features {
            let FeatureGeometry::Point(point) = feature.geometry else {
                continue;
            };
            let id = feature
                .id
                .clone()
                .filter(|id| !id.is_empty())
                .unwrap_or_else(|| format!("node_{}", self.graph.node_count()));
            let level_id = feature
                .level_id()
                .unwrap_or_else(|| DEFAULT_LEVEL.to_string());

            let node = Node {
                id,
                geometry: point,
                level_id,
            };
            if self.graph.upsert_node(node) {
                debug!(
                    "Duplicate node id {:?}, keeping the last definition",
                    feature.id
                );
            }
            created += 1;
        }
        created
    }

    /// Creates an edge for every consecutive vertex pair of every line string,
    /// returns the number of edges added.
    ///
    /// # Errors
    ///
    /// Returns [`Error::GraphEmpty`] if the graph has no nodes while at least
    /// one segment needs to be snapped.
    pub fn add_edges_from(&mut self, features: &[Feature]) -> Result<usize, Error> {
        let lines: Vec<_> = features
            .iter()
            .filter_map(|feature| match &feature.geometry {
                FeatureGeometry::LineString(line) if line.0.len() > 1 => Some(line),
                _ => None,
            })
            .collect();

        if lines.is_empty() {
            return Ok(0);
        }

        let locator = NodeLocator::new(&self.graph);
        if locator.is_empty() {
            return Err(Error::GraphEmpty);
        }

        // Snapping only reads the locator, so lines are resolved in parallel
        let snapped: Vec<Vec<NodeIndex>> = lines
            .par_iter()
            .map(|line| line.coords().filter_map(|c| locator.nearest(*c)).collect())
            .collect();

        let mut added = 0;
        for vertices in &snapped {
            for (&a, &b) in vertices.iter().tuple_windows() {
                self.graph.connect(a, b);
                added += 1;
            }
        }
        debug!("Snapped {} line strings into {added} edges", lines.len());
        Ok(added)
    }

    /// Nodes created so far, in first-seen order
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.graph.nodes()
    }

    /// Edges created so far, in insertion order
    pub fn edges(&self) -> impl Iterator<Item = &Edge> {
        self.graph.edges()
    }

    pub fn into_graph(self) -> IndoorGraph {
        self.graph
    }
}
