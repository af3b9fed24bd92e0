use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// a user-saved set of per-site visit counts that replaces the baseline
/// visitation table as the calibration target while it is selected.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct CalibrationSet {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub selected: bool,
    pub visits: BTreeMap<String, f64>,
}

impl CalibrationSet {
    pub fn new(id: &str, name: &str, visits: BTreeMap<String, f64>) -> CalibrationSet {
        CalibrationSet {
            id: id.to_string(),
            name: name.to_string(),
            selected: false,
            visits,
        }
    }

    pub fn get(&self, site_name: &str) -> Option<f64> {
        self.visits.get(site_name).copied()
    }
}
