use serde::{Deserialize, Serialize};

/// behavior when the observed-to-predicted regression has no usable slope.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum DegenerateCalibrationPolicy {
    /// apply a zero adjustment and log a warning
    #[default]
    Identity,
    /// raise a calibration error
    Fail,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct CalibrationPolicy {
    pub degenerate_policy: DegenerateCalibrationPolicy,
    /// multiplies every observed visit count before fitting
    pub observed_visit_scale: f64,
    /// fitted slopes with a smaller magnitude are treated as zero
    pub min_slope_magnitude: f64,
}

impl Default for CalibrationPolicy {
    fn default() -> Self {
        Self {
            degenerate_policy: DegenerateCalibrationPolicy::Identity,
            observed_visit_scale: 1.0,
            min_slope_magnitude: 1e-12,
        }
    }
}
