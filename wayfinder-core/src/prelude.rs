pub use crate::{DEFAULT_LEVEL, DEFAULT_LEVEL_TRANSITION_PENALTY, Error, NodeId};

// Re-export key components
pub use crate::loading::{
    GraphBuilder, PathfinderConfig, PenaltyMode, create_pathfinder, features_from_geojson,
    features_from_path, features_from_str, features_of_kind,
};
pub use crate::pathfinder::Pathfinder;
pub use crate::routing::{CostModel, Route, SearchOptions, astar};

// Core types of the graph model
pub use crate::model::{Edge, Feature, FeatureGeometry, GeometryKind, IndoorGraph, Metric, Node};
