use crate::model::{block_group::BlockGroup, reference::DataLoadError};
use std::collections::BTreeMap;

pub const DISTANCE_TABLE: &str = "distance";

/// travel distance in miles from each known site (rows) to each block group (columns).
///
/// rows may include more sites than the site catalog, for example custom sites
/// that were added in earlier scenarios.
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceMatrix {
    block_groups: Vec<BlockGroup>,
    rows: BTreeMap<String, Vec<f64>>,
}

impl DistanceMatrix {
    /// builds a distance matrix, failing if any row width differs from the number of block groups.
    pub fn new(
        block_groups: Vec<BlockGroup>,
        rows: BTreeMap<String, Vec<f64>>,
    ) -> Result<DistanceMatrix, DataLoadError> {
        for (name, row) in rows.iter() {
            if row.len() != block_groups.len() {
                return Err(DataLoadError::schema_mismatch(
                    DISTANCE_TABLE,
                    format!(
                        "row '{name}' has {} values but there are {} block group columns",
                        row.len(),
                        block_groups.len()
                    ),
                ));
            }
        }
        Ok(DistanceMatrix { block_groups, rows })
    }

    pub fn block_groups(&self) -> &[BlockGroup] {
        &self.block_groups
    }

    pub fn n_block_groups(&self) -> usize {
        self.block_groups.len()
    }

    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn row(&self, site_name: &str) -> Option<&[f64]> {
        self.rows.get(site_name).map(|r| r.as_slice())
    }

    pub fn contains(&self, site_name: &str) -> bool {
        self.rows.contains_key(site_name)
    }

    /// site names in sorted order
    pub fn site_names(&self) -> impl Iterator<Item = &String> {
        self.rows.keys()
    }
}
