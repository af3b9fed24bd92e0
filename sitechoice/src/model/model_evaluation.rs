use super::{
    calibration::calibration_ops::SiteCalibration,
    equity::{BlockGroupUtility, EquityEvaluation},
    SiteMatrix,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// one row of the site summary table
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SiteSummary {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    /// probability averaged over block groups
    pub mean_probability: f64,
    pub visits: f64,
}

/// every output of one model run
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct ModelEvaluation {
    pub calibration: SiteCalibration,
    pub calibrated: SiteMatrix,
    pub probability: SiteMatrix,
    pub visits: BTreeMap<String, f64>,
    pub equity: EquityEvaluation,
    pub block_group_utility: BlockGroupUtility,
    pub summary: Vec<SiteSummary>,
}
