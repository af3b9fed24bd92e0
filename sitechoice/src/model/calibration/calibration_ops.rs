use super::LinearFit;
use crate::model::{
    config::{CalibrationPolicy, DegenerateCalibrationPolicy},
    ChoiceModelError, SiteMatrix,
};
use serde::Serialize;
use sitechoice_core::model::calibration::{BaselineVisitation, CalibrationSet};

/// the per-site additive correction that maps modeled attractiveness onto
/// observed visitation. `adjustment` follows the raw utility's site order.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct SiteCalibration {
    pub fit: Option<LinearFit>,
    pub adjustment: Vec<f64>,
}

/// observed visits for each site, from the selected calibration set when one
/// is active, otherwise from the baseline table. sites without an observation
/// count as zero.
pub fn observed_visits(
    sites: &[String],
    baseline: &BaselineVisitation,
    calibration_set: Option<&CalibrationSet>,
    scale: f64,
) -> Vec<f64> {
    sites
        .iter()
        .map(|site| {
            let observed = match calibration_set {
                Some(set) => set.get(site),
                None => baseline.get(site),
            };
            observed.unwrap_or(0.0) * scale
        })
        .collect()
}

/// regresses predicted attractiveness (row sums of raw utility) on observed
/// visits and returns, per site, the difference between the attractiveness
/// implied by the observation and the prediction.
pub fn calibration_adjustment(
    raw_utility: &SiteMatrix,
    observed: &[f64],
    policy: &CalibrationPolicy,
) -> Result<SiteCalibration, ChoiceModelError> {
    let predicted = raw_utility.row_sums();
    if observed.len() != predicted.len() {
        return Err(ChoiceModelError::InternalError(format!(
            "{} observed visit counts for {} sites",
            observed.len(),
            predicted.len()
        )));
    }
    let usable = LinearFit::ordinary_least_squares(observed, &predicted).filter(|fit| {
        fit.slope.is_finite()
            && fit.intercept.is_finite()
            && fit.slope.abs() >= policy.min_slope_magnitude
    });
    match usable {
        Some(fit) => {
            log::debug!(
                "calibration fit over {} sites: intercept={}, slope={}",
                predicted.len(),
                fit.intercept,
                fit.slope
            );
            let adjustment = observed
                .iter()
                .zip(predicted.iter())
                .map(|(obs, pred)| fit.invert(*obs) - pred)
                .collect();
            Ok(SiteCalibration {
                fit: Some(fit),
                adjustment,
            })
        }
        None => {
            let msg = format!(
                "no usable linear fit between {} observed and predicted site values",
                predicted.len()
            );
            match policy.degenerate_policy {
                DegenerateCalibrationPolicy::Identity => {
                    log::warn!("{msg}, applying zero calibration adjustment");
                    Ok(SiteCalibration {
                        fit: None,
                        adjustment: vec![0.0; predicted.len()],
                    })
                }
                DegenerateCalibrationPolicy::Fail => {
                    Err(ChoiceModelError::CalibrationDegenerate(msg))
                }
            }
        }
    }
}

/// exp(raw utility) plus each site's adjustment across all of its block groups.
pub fn apply_calibration(
    raw_utility: &SiteMatrix,
    calibration: &SiteCalibration,
) -> Result<SiteMatrix, ChoiceModelError> {
    let values = raw_utility
        .rows()
        .iter()
        .zip(calibration.adjustment.iter())
        .map(|(row, adj)| row.iter().map(|u| u.exp() + adj).collect())
        .collect();
    SiteMatrix::new(
        raw_utility.sites().to_vec(),
        raw_utility.block_groups().to_vec(),
        values,
    )
}
