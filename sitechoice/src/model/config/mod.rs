mod acreage_policy;
mod calibration_policy;
mod model_parameters;
mod normalization_policy;

pub use acreage_policy::{AcreageBoundary, AcreagePolicy};
pub use calibration_policy::{CalibrationPolicy, DegenerateCalibrationPolicy};
pub use model_parameters::{ModelParameters, DEFAULT_DISTANCE_COEFFICIENT};
pub use normalization_policy::NormalizationPolicy;
