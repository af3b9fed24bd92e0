use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// observed visit counts per site, the default calibration target.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct BaselineVisitation {
    visits: BTreeMap<String, f64>,
}

/// one row of the baseline visits table
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct BaselineVisitRecord {
    pub site_name: String,
    pub visits: f64,
}

impl BaselineVisitation {
    pub fn new(visits: BTreeMap<String, f64>) -> BaselineVisitation {
        BaselineVisitation { visits }
    }

    pub fn get(&self, site_name: &str) -> Option<f64> {
        self.visits.get(site_name).copied()
    }

    pub fn len(&self) -> usize {
        self.visits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.visits.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &f64)> {
        self.visits.iter()
    }
}
