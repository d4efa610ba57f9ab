//! Shortest paths through multi-level indoor venues.
//!
//! Point features become graph nodes tagged with a level, line strings become
//! edges between the nodes their vertices snap to. Queries run A* with a
//! heuristic that penalizes moving between levels.

pub mod error;
pub mod loading;
pub mod model;
pub mod pathfinder;
pub mod prelude;
pub mod routing;

pub use error::Error;
pub use loading::{GraphBuilder, PathfinderConfig, PenaltyMode, create_pathfinder};
pub use model::{Edge, Feature, FeatureGeometry, GeometryKind, IndoorGraph, Metric, Node};
pub use pathfinder::Pathfinder;
pub use routing::{CostModel, Route, SearchOptions, astar};

pub type NodeId = String;

/// Level assigned to points without a `levelId` property
pub const DEFAULT_LEVEL: &str = "default";

pub const DEFAULT_LEVEL_TRANSITION_PENALTY: f64 = 10.0;
