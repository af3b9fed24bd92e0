use super::ChoiceModelError;
use indexmap::IndexMap;
use serde::Serialize;
use std::collections::BTreeMap;

/// a dense site-by-block-group matrix. rows are ordered by site name and
/// columns follow the distance matrix's block group order.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct SiteMatrix {
    sites: Vec<String>,
    block_groups: Vec<String>,
    values: Vec<Vec<f64>>,
}

impl SiteMatrix {
    pub fn new(
        sites: Vec<String>,
        block_groups: Vec<String>,
        values: Vec<Vec<f64>>,
    ) -> Result<SiteMatrix, ChoiceModelError> {
        if sites.len() != values.len() {
            return Err(ChoiceModelError::InternalError(format!(
                "site matrix has {} site names but {} rows",
                sites.len(),
                values.len()
            )));
        }
        if let Some((site, row)) = sites
            .iter()
            .zip(values.iter())
            .find(|(_, row)| row.len() != block_groups.len())
        {
            return Err(ChoiceModelError::InternalError(format!(
                "site matrix row '{site}' has {} values but there are {} block groups",
                row.len(),
                block_groups.len()
            )));
        }
        Ok(SiteMatrix {
            sites,
            block_groups,
            values,
        })
    }

    pub fn sites(&self) -> &[String] {
        &self.sites
    }

    pub fn block_groups(&self) -> &[String] {
        &self.block_groups
    }

    pub fn n_sites(&self) -> usize {
        self.sites.len()
    }

    pub fn n_block_groups(&self) -> usize {
        self.block_groups.len()
    }

    pub fn rows(&self) -> &[Vec<f64>] {
        &self.values
    }

    pub fn row(&self, site: &str) -> Option<&[f64]> {
        self.sites
            .iter()
            .position(|s| s == site)
            .map(|idx| self.values[idx].as_slice())
    }

    pub fn get(&self, site: &str, block_group_idx: usize) -> Option<f64> {
        self.row(site).and_then(|r| r.get(block_group_idx).copied())
    }

    pub fn column(&self, block_group_idx: usize) -> Vec<f64> {
        self.values.iter().map(|r| r[block_group_idx]).collect()
    }

    pub fn row_sums(&self) -> Vec<f64> {
        self.values.iter().map(|r| r.iter().sum()).collect()
    }

    pub fn column_sums(&self) -> Vec<f64> {
        (0..self.block_groups.len())
            .map(|bg| self.values.iter().map(|r| r[bg]).sum())
            .collect()
    }

    /// applies `op` to every cell, keeping the labels
    pub fn map<F>(&self, op: F) -> SiteMatrix
    where
        F: Fn(f64) -> f64,
    {
        let values = self
            .values
            .iter()
            .map(|r| r.iter().map(|v| op(*v)).collect())
            .collect();
        SiteMatrix {
            sites: self.sites.clone(),
            block_groups: self.block_groups.clone(),
            values,
        }
    }

    /// builds a matrix with the same labels from column vectors
    pub fn with_columns(&self, columns: Vec<Vec<f64>>) -> Result<SiteMatrix, ChoiceModelError> {
        if columns.len() != self.block_groups.len() {
            return Err(ChoiceModelError::InternalError(format!(
                "expected {} columns, found {}",
                self.block_groups.len(),
                columns.len()
            )));
        }
        let values = (0..self.sites.len())
            .map(|s| columns.iter().map(|c| c[s]).collect())
            .collect();
        SiteMatrix::new(self.sites.clone(), self.block_groups.clone(), values)
    }

    /// site → block group → value
    pub fn to_nested(&self) -> BTreeMap<String, IndexMap<String, f64>> {
        self.sites
            .iter()
            .zip(self.values.iter())
            .map(|(site, row)| {
                let by_bg = self
                    .block_groups
                    .iter()
                    .cloned()
                    .zip(row.iter().copied())
                    .collect();
                (site.clone(), by_bg)
            })
            .collect()
    }
}
