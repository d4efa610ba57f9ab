//! `GeoJSON` ingest: turns a `FeatureCollection` into [`Feature`] records

use std::path::Path;

use geojson::{GeoJson, feature::Id};
use log::debug;

use crate::{
    Error,
    model::{Feature, FeatureGeometry, GeometryKind},
};

/// Reads the features of a `FeatureCollection` document, keeping their order
///
/// # Errors
///
/// Returns [`Error::InvalidGeoJson`] if the document is not a
/// `FeatureCollection` or one of its features has no usable geometry.
pub fn features_from_geojson(geojson: GeoJson) -> Result<Vec<Feature>, Error> {
    let GeoJson::FeatureCollection(collection) = geojson else {
        return Err(Error::InvalidGeoJson(
            "Must be a FeatureCollection".to_string(),
        ));
    };

    collection
        .features
        .into_iter()
        .enumerate()
        .map(|(position, feature)| convert_feature(position, feature))
        .collect()
}

/// Parses a `GeoJSON` string, see [`features_from_geojson`]
///
/// # Errors
///
/// Returns [`Error::InvalidGeoJson`] for unparsable or non-collection input.
pub fn features_from_str(source: &str) -> Result<Vec<Feature>, Error> {
    let geojson: GeoJson = source
        .parse()
        .map_err(|e: geojson::Error| Error::InvalidGeoJson(e.to_string()))?;
    features_from_geojson(geojson)
}

/// Reads and parses a `GeoJSON` file, see [`features_from_geojson`]
///
/// # Errors
///
/// Returns [`Error::IoError`] if the file cannot be read and
/// [`Error::InvalidGeoJson`] if its content is rejected.
pub fn features_from_path(path: impl AsRef<Path>) -> Result<Vec<Feature>, Error> {
    let path = path.as_ref();
    let source = std::fs::read_to_string(path)?;
    let features = features_from_str(&source)?;
    debug!("Read {} features from {}", features.len(), path.display());
    Ok(features)
}

/// Features with the given geometry kind, in input order
pub fn features_of_kind(features: &[Feature], kind: GeometryKind) -> Vec<&Feature> {
    features.iter().filter(|f| f.kind() == kind).collect()
}

fn convert_feature(position: usize, feature: geojson::Feature) -> Result<Feature, Error> {
    let geometry = feature.geometry.ok_or_else(|| {
        Error::InvalidGeoJson(format!("Feature #{position} has no geometry"))
    })?;

    let geometry = geo::Geometry::<f64>::try_from(geometry).map_err(|e| {
        Error::InvalidGeoJson(format!("Feature #{position} has invalid geometry: {e}"))
    })?;

    let geometry = match geometry {
        geo::Geometry::Point(point) => FeatureGeometry::Point(point),
        geo::Geometry::LineString(line) => FeatureGeometry::LineString(line),
        geo::Geometry::MultiPoint(_) => FeatureGeometry::Other(GeometryKind::MultiPoint),
        geo::Geometry::MultiLineString(_) => {
            FeatureGeometry::Other(GeometryKind::MultiLineString)
        }
        geo::Geometry::Polygon(_) => FeatureGeometry::Other(GeometryKind::Polygon),
        geo::Geometry::MultiPolygon(_) => FeatureGeometry::Other(GeometryKind::MultiPolygon),
        geo::Geometry::GeometryCollection(_) => {
            FeatureGeometry::Other(GeometryKind::GeometryCollection)
        }
        // GeoJSON has no other geometry types
        other => {
            return Err(Error::InvalidGeoJson(format!(
                "Feature #{position} has unsupported geometry {other:?}"
            )));
        }
    };

    let id = feature.id.map(|id| match id {
        Id::String(id) => id,
        Id::Number(id) => id.to_string(),
    });

    Ok(Feature {
        id,
        geometry,
        properties: feature.properties.unwrap_or_default(),
    })
}
