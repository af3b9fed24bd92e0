mod data_load_error;
pub mod read_ops;
mod reference_data;
mod reference_data_config;

pub use data_load_error::DataLoadError;
pub use reference_data::ReferenceData;
pub use reference_data_config::ReferenceDataConfig;
