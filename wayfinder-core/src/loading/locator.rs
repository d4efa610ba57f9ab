//! Nearest-node lookup used to snap line vertices onto graph nodes

use geo::{Coord, Point};
use petgraph::graph::NodeIndex;
use rstar::{RTree, primitives::GeomWithData};

use crate::model::{IndoorGraph, Metric};

type IndexedNode = GeomWithData<[f64; 2], usize>;

/// Snapshot of the node set taken when edge building starts.
///
/// Ties between equidistant nodes always resolve to the node inserted first.
pub(crate) struct NodeLocator {
    points: Vec<Point<f64>>,
    metric: Metric,
    /// Only built for planar metrics, where R-tree ordering is exact
    tree: Option<RTree<IndexedNode>>,
}

impl NodeLocator {
    pub(crate) fn new(graph: &IndoorGraph) -> Self {
        let points: Vec<Point<f64>> = graph.nodes().map(|node| node.geometry).collect();
        let metric = graph.metric();

        let tree = metric.is_planar().then(|| {
            let entries = points
                .iter()
                .enumerate()
                .map(|(idx, point)| GeomWithData::new([point.x(), point.y()], idx))
                .collect();
            RTree::bulk_load(entries)
        });

        Self {
            points,
            metric,
            tree,
        }
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Closest node to `coord`, `None` only when there are no nodes
    pub(crate) fn nearest(&self, coord: Coord<f64>) -> Option<NodeIndex> {
        let nearest = match &self.tree {
            Some(tree) => self.nearest_in_tree(tree, coord),
            None => self.nearest_by_scan(coord),
        };
        nearest.map(NodeIndex::new)
    }

    fn nearest_in_tree(&self, tree: &RTree<IndexedNode>, coord: Coord<f64>) -> Option<usize> {
        let query = [coord.x, coord.y];
        let mut candidates = tree.nearest_neighbor_iter_with_distance_2(&query).peekable();
        let &(_, best) = candidates.peek()?;

        // Squared tree distances may round apart for nodes the metric sees as
        // equidistant, so near-ties are re-ranked under the metric
        let bound = best * (1.0 + 16.0 * f64::EPSILON);
        let target = Point::from(coord);
        candidates
            .take_while(|&(_, distance_2)| distance_2 <= bound)
            .map(|(entry, _)| {
                let distance = self.metric.distance(target, self.points[entry.data]);
                (distance, entry.data)
            })
            .min_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)))
            .map(|(_, idx)| idx)
    }

    fn nearest_by_scan(&self, coord: Coord<f64>) -> Option<usize> {
        let target = Point::from(coord);
        let mut best: Option<(usize, f64)> = None;

        for (idx, point) in self.points.iter().enumerate() {
            let distance = self.metric.distance(target, *point);
            if best.is_none_or(|(_, best_distance)| distance < best_distance) {
                best = Some((idx, distance));
            }
        }

        best.map(|(idx, _)| idx)
    }
}
