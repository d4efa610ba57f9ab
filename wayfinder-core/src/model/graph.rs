//! Multi-level indoor graph - nodes, edges and adjacency

use geo::Point;
use hashbrown::HashMap;
use petgraph::{
    graph::{EdgeIndex, NodeIndex, UnGraph},
    visit::EdgeRef,
};

use crate::{NodeId, model::Metric};

/// Navigable point of the venue
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub id: NodeId,
    /// Planar or geographic coordinates, depending on the metric
    pub geometry: Point<f64>,
    /// Logical floor the node belongs to
    pub level_id: String,
}

impl Node {
    pub fn new(id: impl Into<NodeId>, coordinates: (f64, f64), level_id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            geometry: coordinates.into(),
            level_id: level_id.into(),
        }
    }

    pub fn coordinates(&self) -> (f64, f64) {
        self.geometry.x_y()
    }

    pub fn same_level(&self, other: &Node) -> bool {
        self.level_id == other.level_id
    }
}

/// Undirected connection between two nodes
#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    pub source: NodeId,
    pub target: NodeId,
    /// Metric distance between the endpoint nodes
    pub weight: f64,
}

impl Edge {
    /// Endpoint opposite to `id`, `None` if the edge does not touch `id`
    pub fn other_end(&self, id: &str) -> Option<&str> {
        if self.source == id {
            Some(&self.target)
        } else if self.target == id {
            Some(&self.source)
        } else {
            None
        }
    }
}

/// Immutable-after-build graph of a venue.
///
/// Nodes keep first-seen order, edges keep insertion order. Node handles are
/// never invalidated because nodes are never removed.
#[derive(Debug, Clone, Default)]
pub struct IndoorGraph {
    pub(crate) graph: UnGraph<Node, Edge>,
    index: HashMap<NodeId, NodeIndex>,
    metric: Metric,
}

impl IndoorGraph {
    pub fn new(metric: Metric) -> Self {
        Self {
            graph: UnGraph::default(),
            index: HashMap::new(),
            metric,
        }
    }

    pub fn metric(&self) -> Metric {
        self.metric
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    /// Nodes in first-seen order
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.graph.node_weights()
    }

    /// Edges in insertion order
    pub fn edges(&self) -> impl Iterator<Item = &Edge> {
        self.graph.raw_edges().iter().map(|edge| &edge.weight)
    }

    pub fn node(&self, id: &str) -> Option<&Node> {
        self.node_index(id).map(|idx| &self.graph[idx])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    pub(crate) fn node_index(&self, id: &str) -> Option<NodeIndex> {
        self.index.get(id).copied()
    }

    pub(crate) fn node_at(&self, idx: NodeIndex) -> &Node {
        &self.graph[idx]
    }

    /// Inserts a node, replacing the value of an existing node with the same id.
    ///
    /// A replaced node keeps its position. Returns `true` on replacement.
    pub(crate) fn upsert_node(&mut self, node: Node) -> bool {
        if let Some(&idx) = self.index.get(&node.id) {
            self.graph[idx] = node;
            true
        } else {
            let id = node.id.clone();
            let idx = self.graph.add_node(node);
            self.index.insert(id, idx);
            false
        }
    }

    /// Connects two nodes, weighting the edge by their stored coordinates
    pub(crate) fn connect(&mut self, a: NodeIndex, b: NodeIndex) -> EdgeIndex {
        let (source, target) = (&self.graph[a], &self.graph[b]);
        let edge = Edge {
            source: source.id.clone(),
            target: target.id.clone(),
            weight: self.metric.distance(source.geometry, target.geometry),
        };
        self.graph.add_edge(a, b, edge)
    }

    /// Edges touching `idx` together with the node on their other end
    pub(crate) fn incident(&self, idx: NodeIndex) -> impl Iterator<Item = (NodeIndex, &Edge)> {
        self.graph.edges(idx).map(move |edge| {
            let other = if edge.source() == idx {
                edge.target()
            } else {
                edge.source()
            };
            (other, edge.weight())
        })
    }
}
