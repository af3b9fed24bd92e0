use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// utility received per trip by each demographic group, and each group's
/// share of the exponentiated averages. `ratio` sums to one.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct EquityEvaluation {
    pub average_utility: IndexMap<String, f64>,
    pub ratio: IndexMap<String, f64>,
}

impl EquityEvaluation {
    pub fn ratio(&self, group: &str) -> Option<f64> {
        self.ratio.get(group).copied()
    }
}

/// utility-weighted trips summed over sites, for each block group and
/// demographic group. each row holds one value per entry of `groups`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct BlockGroupUtility {
    pub groups: Vec<String>,
    pub block_groups: IndexMap<String, Vec<f64>>,
}

impl BlockGroupUtility {
    pub fn get(&self, block_group: &str, group: &str) -> Option<f64> {
        let idx = self.groups.iter().position(|g| g == group)?;
        self.block_groups
            .get(block_group)
            .and_then(|row| row.get(idx).copied())
    }
}
