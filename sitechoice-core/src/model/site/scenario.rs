use super::ModifiedSite;
use crate::model::reference::DataLoadError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// a bundle of user-proposed site edits, evaluated as one "what-if" against the baseline.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Scenario {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub sites: Vec<ModifiedSite>,
}

impl Scenario {
    pub fn new(id: &str, name: &str, sites: Vec<ModifiedSite>) -> Scenario {
        Scenario {
            id: id.to_string(),
            name: name.to_string(),
            sites,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.sites.is_empty()
    }

    /// reads a scenario from a JSON file
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Scenario, DataLoadError> {
        let filepath = path.as_ref().to_string_lossy().to_string();
        let contents =
            std::fs::read_to_string(path.as_ref()).map_err(|e| DataLoadError::MissingTable {
                table: String::from("scenario"),
                filepath: filepath.clone(),
                source: e,
            })?;
        serde_json::from_str(&contents).map_err(|e| DataLoadError::JsonError {
            filepath,
            source: e,
        })
    }
}
