use geo::LineString;
use geojson::{Feature, FeatureCollection, Geometry, Value as GeoJsonValue};
use serde_json::json;

use crate::{Error, NodeId, model::Node};

/// Result of a successful search: the visited nodes and their total cost
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    pub nodes: Vec<Node>,
    /// Sum of step costs along the route
    pub cost: f64,
}

impl Route {
    pub(crate) fn new(nodes: Vec<Node>, cost: f64) -> Self {
        Self { nodes, cost }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn ids(&self) -> Vec<&NodeId> {
        self.nodes.iter().map(|node| &node.id).collect()
    }

    /// Number of steps that move to a different level
    pub fn level_changes(&self) -> usize {
        self.nodes
            .windows(2)
            .filter(|pair| !pair[0].same_level(&pair[1]))
            .count()
    }

    pub fn into_nodes(self) -> Vec<Node> {
        self.nodes
    }

    /// Converts the route to a `GeoJSON` `FeatureCollection`, one line string per step.
    ///
    /// # Errors
    ///
    /// Returns [`Error::GeoJsonError`] if a step cannot be converted to a
    /// `GeoJSON` feature.
    pub fn to_geojson(&self) -> Result<FeatureCollection, Error> {
        let features = self
            .nodes
            .windows(2)
            .enumerate()
            .map(|(idx, pair)| step_feature(idx, &pair[0], &pair[1]))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(FeatureCollection {
            features,
            bbox: None,
            foreign_members: None,
        })
    }

    /// Serialized form of [`Route::to_geojson`]
    ///
    /// # Errors
    ///
    /// Returns [`Error::GeoJsonError`] if conversion or serialization fails.
    pub fn to_geojson_string(&self) -> Result<String, Error> {
        serde_json::to_string(&self.to_geojson()?).map_err(|e| Error::GeoJsonError(e.to_string()))
    }
}

fn step_feature(step: usize, from: &Node, to: &Node) -> Result<Feature, Error> {
    let line = LineString::from(vec![from.geometry.0, to.geometry.0]);
    let geometry = Geometry::new(GeoJsonValue::from(&line));

    let value = json!({
        "type": "Feature",
        "geometry": geometry,
        "properties": {
            "step": step,
            "from": from.id,
            "to": to.id,
            "from_level": from.level_id,
            "to_level": to.level_id,
            "level_change": !from.same_level(to),
        }
    });

    serde_json::from_value::<Feature>(value).map_err(|e| Error::GeoJsonError(e.to_string()))
}
