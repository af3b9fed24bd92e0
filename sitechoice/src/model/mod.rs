pub mod attractiveness;
pub mod calibration;
mod choice_model;
mod choice_model_error;
pub mod comparison;
pub mod config;
pub mod equity;
pub mod merge;
mod model_evaluation;
pub mod probability;
mod site_matrix;
#[cfg(test)]
pub(crate) mod test_fixtures;

pub use choice_model::ChoiceModel;
pub use choice_model_error::ChoiceModelError;
pub use model_evaluation::{ModelEvaluation, SiteSummary};
pub use site_matrix::SiteMatrix;
