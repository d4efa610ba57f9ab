use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("No nodes in the graph to snap line vertices to")]
    GraphEmpty,
    #[error("Search aborted after {iterations} iterations")]
    SearchAborted { iterations: usize },
    #[error("Invalid GeoJSON: {0}")]
    InvalidGeoJson(String),
    #[error("Invalid data: {0}")]
    InvalidData(String),
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("GeoJSON error: {0}")]
    GeoJsonError(String),
}
