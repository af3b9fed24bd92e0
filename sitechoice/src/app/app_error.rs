use crate::model::ChoiceModelError;
use sitechoice_core::model::reference::DataLoadError;

#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("{msg}: {source}")]
    ConfigReadError {
        msg: String,
        source: config::ConfigError,
    },
    #[error(transparent)]
    DataLoad(#[from] DataLoadError),
    #[error(transparent)]
    ChoiceModel(#[from] ChoiceModelError),
    #[error("failure writing output to '{filepath}': {source}")]
    WriteError {
        filepath: String,
        source: std::io::Error,
    },
    #[error("failure writing CSV output: {0}")]
    CsvError(#[from] csv::Error),
    #[error("failure writing JSON output: {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("{0}")]
    InvalidArguments(String),
}
