use sitechoice_core::model::reference::DataLoadError;

#[derive(thiserror::Error, Debug)]
pub enum ChoiceModelError {
    #[error(transparent)]
    DataLoad(#[from] DataLoadError),
    #[error("site '{site}' cannot be placed: {msg}")]
    UnknownSite { site: String, msg: String },
    #[error("calibration is degenerate: {0}")]
    CalibrationDegenerate(String),
    #[error("visitation probability is degenerate for block group '{block_group}': {msg}")]
    NormalizationDegenerate { block_group: String, msg: String },
    #[error("demographic group '{0}' has zero total population")]
    EmptyDemographicGroup(String),
    #[error("invalid model configuration: {0}")]
    Configuration(String),
    #[error("{0}")]
    InternalError(String),
}
