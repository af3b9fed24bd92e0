use crate::model::reference::DataLoadError;
use geo::Point;
use geojson::GeoJson;
use std::{collections::HashMap, str::FromStr};

pub const GEOID_PROPERTY: &str = "GEOID";
pub const LATITUDE_PROPERTY: &str = "INTPTLAT";
pub const LONGITUDE_PROPERTY: &str = "INTPTLON";

/// internal points of census block groups keyed by GEOID, read from a TIGER-style
/// GeoJSON FeatureCollection.
#[derive(Debug, Clone, Default)]
pub struct BlockGroupCentroids {
    centroids: HashMap<String, Point<f64>>,
}

impl BlockGroupCentroids {
    pub fn new(centroids: HashMap<String, Point<f64>>) -> BlockGroupCentroids {
        BlockGroupCentroids { centroids }
    }

    pub fn get(&self, geoid: &str) -> Option<&Point<f64>> {
        self.centroids.get(geoid)
    }

    pub fn len(&self) -> usize {
        self.centroids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.centroids.is_empty()
    }

    pub fn from_geojson_file(input_file: &str) -> Result<BlockGroupCentroids, DataLoadError> {
        let contents =
            std::fs::read_to_string(input_file).map_err(|e| DataLoadError::MissingTable {
                table: String::from("block group centroids"),
                filepath: input_file.to_string(),
                source: e,
            })?;
        Self::from_geojson_str(&contents, input_file)
    }

    /// reads each feature's GEOID and internal point properties. features with
    /// geometry only are ignored; a feature with a GEOID but no parsable
    /// internal point is an error.
    pub fn from_geojson_str(
        contents: &str,
        source_name: &str,
    ) -> Result<BlockGroupCentroids, DataLoadError> {
        let geojson_error = |msg: String| DataLoadError::GeoJsonError {
            filepath: source_name.to_string(),
            msg,
        };
        let dataset = GeoJson::from_str(contents).map_err(|e| geojson_error(e.to_string()))?;
        let feature_collection = match dataset {
            GeoJson::FeatureCollection(fc) => Ok(fc),
            GeoJson::Geometry(_) => Err(geojson_error(String::from(
                "expected a FeatureCollection but found a single 'Geometry'",
            ))),
            GeoJson::Feature(_) => Err(geojson_error(String::from(
                "expected a FeatureCollection but found a single 'Feature'",
            ))),
        }?;

        let mut centroids = HashMap::new();
        for (idx, feature) in feature_collection.features.iter().enumerate() {
            let geoid = match feature.property(GEOID_PROPERTY) {
                Some(v) => property_string(v),
                None => continue,
            };
            let lat = feature
                .property(LATITUDE_PROPERTY)
                .and_then(property_f64)
                .ok_or_else(|| {
                    geojson_error(format!(
                        "feature {idx} with GEOID {geoid} has no numeric {LATITUDE_PROPERTY}"
                    ))
                })?;
            let lon = feature
                .property(LONGITUDE_PROPERTY)
                .and_then(property_f64)
                .ok_or_else(|| {
                    geojson_error(format!(
                        "feature {idx} with GEOID {geoid} has no numeric {LONGITUDE_PROPERTY}"
                    ))
                })?;
            centroids.insert(geoid, Point::new(lon, lat));
        }
        log::debug!(
            "read {} block group centroids from {}",
            centroids.len(),
            source_name
        );
        Ok(BlockGroupCentroids { centroids })
    }
}

fn property_string(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// TIGER internal points are signed strings such as "+35.7796"
fn property_f64(value: &serde_json::Value) -> Option<f64> {
    match value {
        serde_json::Value::Number(n) => n.as_f64(),
        serde_json::Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod test {
    use super::BlockGroupCentroids;

    #[test]
    fn test_read_tiger_properties() {
        let geojson = r#"{
            "type": "FeatureCollection",
            "features": [
                {
                    "type": "Feature",
                    "geometry": null,
                    "properties": { "GEOID": "371830501001", "INTPTLAT": "+35.7796", "INTPTLON": "-078.6382" }
                },
                {
                    "type": "Feature",
                    "geometry": null,
                    "properties": { "GEOID": "371830501002", "INTPTLAT": 35.5, "INTPTLON": -78.5 }
                },
                {
                    "type": "Feature",
                    "geometry": null,
                    "properties": { "NAME": "no geoid here" }
                }
            ]
        }"#;
        let centroids =
            BlockGroupCentroids::from_geojson_str(geojson, "test").expect("should parse");
        assert_eq!(centroids.len(), 2);
        let p = centroids.get("371830501001").expect("should exist");
        assert_eq!(p.y(), 35.7796);
        assert_eq!(p.x(), -78.6382);
        let q = centroids.get("371830501002").expect("should exist");
        assert_eq!(q.x(), -78.5);
    }

    #[test]
    fn test_missing_internal_point_fails() {
        let geojson = r#"{
            "type": "FeatureCollection",
            "features": [
                { "type": "Feature", "geometry": null, "properties": { "GEOID": "1" } }
            ]
        }"#;
        assert!(BlockGroupCentroids::from_geojson_str(geojson, "test").is_err());
    }

    #[test]
    fn test_single_feature_is_rejected() {
        let geojson = r#"{ "type": "Feature", "geometry": null, "properties": {} }"#;
        assert!(BlockGroupCentroids::from_geojson_str(geojson, "test").is_err());
    }
}
