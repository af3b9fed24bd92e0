use sitechoice_core::model::distance::DistanceMatrix;
use std::collections::BTreeMap;

/// the baseline distance matrix with scenario-specific rows layered on top.
/// the baseline is borrowed, never copied or modified.
#[derive(Debug, Clone, Copy)]
pub struct LayeredDistances<'a> {
    baseline: &'a DistanceMatrix,
    added: &'a BTreeMap<String, Vec<f64>>,
}

impl<'a> LayeredDistances<'a> {
    pub fn new(baseline: &'a DistanceMatrix, added: &'a BTreeMap<String, Vec<f64>>) -> Self {
        Self { baseline, added }
    }

    pub fn row(&self, site_name: &str) -> Option<&'a [f64]> {
        self.added
            .get(site_name)
            .map(|r| r.as_slice())
            .or_else(|| self.baseline.row(site_name))
    }

    pub fn contains(&self, site_name: &str) -> bool {
        self.row(site_name).is_some()
    }

    pub fn n_rows(&self) -> usize {
        self.baseline.n_rows() + self.added.len()
    }

    pub fn block_group_ids(&self) -> Vec<String> {
        self.baseline
            .block_groups()
            .iter()
            .map(|bg| bg.id.clone())
            .collect()
    }
}
