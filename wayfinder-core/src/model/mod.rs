//! Data model for indoor routing
//!
//! Contains the input feature records, the distance metrics and the
//! multi-level graph built from them.

pub mod feature;
pub mod graph;
pub mod metric;

pub use feature::{Feature, FeatureGeometry, GeometryKind};
pub use graph::{Edge, IndoorGraph, Node};
pub use metric::Metric;
