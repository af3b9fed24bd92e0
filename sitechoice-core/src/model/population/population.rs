use crate::model::{block_group::BlockGroup, reference::DataLoadError};
use indexmap::IndexMap;
use itertools::Itertools;
use std::collections::HashMap;

pub const POPULATION_TABLE: &str = "population";

/// population counts per demographic group for each block group.
///
/// counts are stored column-wise: each demographic group maps to a vector
/// aligned with `block_groups`. group order follows the source table.
#[derive(Debug, Clone, PartialEq)]
pub struct Population {
    block_groups: Vec<String>,
    groups: IndexMap<String, Vec<f64>>,
}

impl Population {
    pub fn new(
        block_groups: Vec<String>,
        groups: IndexMap<String, Vec<f64>>,
    ) -> Result<Population, DataLoadError> {
        if groups.is_empty() {
            return Err(DataLoadError::schema_mismatch(
                POPULATION_TABLE,
                String::from("at least one demographic group column is required"),
            ));
        }
        if let Some(dup) = block_groups.iter().duplicates().next() {
            return Err(DataLoadError::DuplicateKey {
                table: POPULATION_TABLE.to_string(),
                key: dup.clone(),
            });
        }
        for (group, counts) in groups.iter() {
            if counts.len() != block_groups.len() {
                return Err(DataLoadError::schema_mismatch(
                    POPULATION_TABLE,
                    format!(
                        "group '{group}' has {} counts but there are {} block groups",
                        counts.len(),
                        block_groups.len()
                    ),
                ));
            }
        }
        Ok(Population {
            block_groups,
            groups,
        })
    }

    pub fn block_groups(&self) -> &[String] {
        &self.block_groups
    }

    pub fn group_names(&self) -> impl Iterator<Item = &String> {
        self.groups.keys()
    }

    pub fn group_counts(&self, group: &str) -> Option<&[f64]> {
        self.groups.get(group).map(|c| c.as_slice())
    }

    pub fn iter_groups(&self) -> impl Iterator<Item = (&String, &Vec<f64>)> {
        self.groups.iter()
    }

    /// total population of each block group summed across demographic groups
    pub fn totals(&self) -> Vec<f64> {
        (0..self.block_groups.len())
            .map(|bg| self.groups.values().map(|counts| counts[bg]).sum())
            .collect_vec()
    }

    /// total population of one demographic group across all block groups
    pub fn group_total(&self, group: &str) -> Option<f64> {
        self.groups.get(group).map(|c| c.iter().sum())
    }

    /// reorders the block group rows to match the columns of a distance matrix.
    ///
    /// every block group must be present on both sides.
    pub fn aligned_to(&self, order: &[BlockGroup]) -> Result<Population, DataLoadError> {
        if order.len() != self.block_groups.len() {
            return Err(DataLoadError::schema_mismatch(
                POPULATION_TABLE,
                format!(
                    "population has {} block groups but distances have {}",
                    self.block_groups.len(),
                    order.len()
                ),
            ));
        }
        let lookup: HashMap<&str, usize> = self
            .block_groups
            .iter()
            .enumerate()
            .map(|(i, bg)| (bg.as_str(), i))
            .collect();
        let indices = order
            .iter()
            .map(|bg| {
                lookup
                    .get(bg.id.as_str())
                    .copied()
                    .ok_or_else(|| DataLoadError::MissingKey {
                        table: POPULATION_TABLE.to_string(),
                        key: bg.id.clone(),
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;
        let groups = self
            .groups
            .iter()
            .map(|(g, counts)| (g.clone(), indices.iter().map(|i| counts[*i]).collect_vec()))
            .collect::<IndexMap<_, _>>();
        Ok(Population {
            block_groups: order.iter().map(|bg| bg.id.clone()).collect_vec(),
            groups,
        })
    }
}
