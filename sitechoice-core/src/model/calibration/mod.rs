mod baseline_visitation;
mod calibration_set;
mod calibration_sets;

pub use baseline_visitation::{BaselineVisitRecord, BaselineVisitation};
pub use calibration_set::CalibrationSet;
pub use calibration_sets::{CalibrationSets, CALIBRATION_SETS_TABLE};
