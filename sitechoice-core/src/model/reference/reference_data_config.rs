use serde::{Deserialize, Serialize};

/// file locations of the reference tables. CSV tables may be gzip-compressed
/// when the filename ends in `.gz`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ReferenceDataConfig {
    pub sites_file: String,
    pub coefficients_file: String,
    pub distances_file: String,
    pub population_file: String,
    pub baseline_visits_file: String,
    /// optional GeoJSON of block group internal points, used for GEOID site
    /// locations and for block group labels without a trailing coordinate.
    #[serde(default)]
    pub centroids_file: Option<String>,
}
