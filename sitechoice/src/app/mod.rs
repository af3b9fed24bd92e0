mod app_error;
pub mod cli;
pub mod output_ops;
mod site_choice_config;

pub use app_error::AppError;
pub use site_choice_config::{SiteChoiceConfig, ENV_PREFIX};
