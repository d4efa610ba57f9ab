//! Route search over the indoor graph

pub mod astar;
mod route;

pub use astar::{CostModel, SearchOptions, astar};
pub use route::Route;
