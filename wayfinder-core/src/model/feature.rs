//! Input records the graph builder consumes

use geo::{LineString, Point};
use serde_json::{Map, Value as JsonValue};

/// Kind of a feature geometry, mirroring the `GeoJSON` geometry types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GeometryKind {
    Point,
    MultiPoint,
    LineString,
    MultiLineString,
    Polygon,
    MultiPolygon,
    GeometryCollection,
}

/// Geometry payload of a feature.
///
/// Only points and line strings carry coordinates, every other kind is kept
/// so the feature sequence stays faithful to the source document.
#[derive(Debug, Clone, PartialEq)]
pub enum FeatureGeometry {
    Point(Point<f64>),
    LineString(LineString<f64>),
    Other(GeometryKind),
}

impl FeatureGeometry {
    pub fn kind(&self) -> GeometryKind {
        match self {
            FeatureGeometry::Point(_) => GeometryKind::Point,
            FeatureGeometry::LineString(_) => GeometryKind::LineString,
            FeatureGeometry::Other(kind) => *kind,
        }
    }
}

/// A validated geometry + properties record
#[derive(Debug, Clone, PartialEq)]
pub struct Feature {
    /// Stable identifier, numeric ids are kept in their decimal form
    pub id: Option<String>,
    pub geometry: FeatureGeometry,
    pub properties: Map<String, JsonValue>,
}

impl Feature {
    pub fn new(geometry: FeatureGeometry) -> Self {
        Self {
            id: None,
            geometry,
            properties: Map::new(),
        }
    }

    pub fn point(x: f64, y: f64) -> Self {
        Self::new(FeatureGeometry::Point(Point::new(x, y)))
    }

    pub fn line_string(coords: &[(f64, f64)]) -> Self {
        let line: LineString<f64> = coords.to_vec().into();
        Self::new(FeatureGeometry::LineString(line))
    }

    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    #[must_use]
    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<JsonValue>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    #[must_use]
    pub fn with_level(self, level_id: impl Into<String>) -> Self {
        self.with_property("levelId", level_id.into())
    }

    pub fn kind(&self) -> GeometryKind {
        self.geometry.kind()
    }

    /// Level tag from `properties.levelId`.
    ///
    /// Strings are used as is and numbers are stringified, so a ground floor
    /// tagged `0` is level `"0"` rather than the default level. Empty strings
    /// and any other JSON type count as absent.
    pub fn level_id(&self) -> Option<String> {
        match self.properties.get("levelId")? {
            JsonValue::String(level) if !level.is_empty() => Some(level.clone()),
            JsonValue::Number(level) => Some(level.to_string()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn level_id_ignores_empty_and_non_scalar_values() {
        assert_eq!(Feature::point(0.0, 0.0).level_id(), None);
        assert_eq!(Feature::point(0.0, 0.0).with_level("").level_id(), None);
        assert_eq!(
            Feature::point(0.0, 0.0)
                .with_property("levelId", json!({ "floor": 2 }))
                .level_id(),
            None
        );
        assert_eq!(
            Feature::point(0.0, 0.0).with_level("L2").level_id().as_deref(),
            Some("L2")
        );
        assert_eq!(
            Feature::point(0.0, 0.0)
                .with_property("levelId", 3)
                .level_id()
                .as_deref(),
            Some("3")
        );
    }

    #[test]
    fn numeric_zero_level_is_kept() {
        let feature = Feature::point(0.0, 0.0).with_property("levelId", 0);
        assert_eq!(feature.level_id().as_deref(), Some("0"));
    }

    #[test]
    fn geometry_kind_follows_payload() {
        assert_eq!(Feature::point(1.0, 2.0).kind(), GeometryKind::Point);
        assert_eq!(
            Feature::line_string(&[(0.0, 0.0), (1.0, 1.0)]).kind(),
            GeometryKind::LineString
        );
        assert_eq!(
            Feature::new(FeatureGeometry::Other(GeometryKind::Polygon)).kind(),
            GeometryKind::Polygon
        );
    }
}
