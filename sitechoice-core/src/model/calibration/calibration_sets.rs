use super::CalibrationSet;
use crate::model::reference::DataLoadError;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const CALIBRATION_SETS_TABLE: &str = "calibration sets";

/// the calibration sets saved by one user. at most one set is selected at a time.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(try_from = "Vec<CalibrationSet>", into = "Vec<CalibrationSet>")]
pub struct CalibrationSets {
    sets: Vec<CalibrationSet>,
}

impl CalibrationSets {
    pub fn iter(&self) -> impl Iterator<Item = &CalibrationSet> {
        self.sets.iter()
    }

    pub fn len(&self) -> usize {
        self.sets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&CalibrationSet> {
        self.sets.iter().find(|s| s.id == id)
    }

    /// the active calibration set, if any
    pub fn selected(&self) -> Option<&CalibrationSet> {
        self.sets.iter().find(|s| s.selected)
    }

    /// adds a calibration set. a set that arrives selected deselects all others.
    /// a set with an existing id replaces it.
    pub fn insert(&mut self, set: CalibrationSet) {
        if set.selected {
            self.sets.iter_mut().for_each(|s| s.selected = false);
        }
        match self.sets.iter_mut().find(|s| s.id == set.id) {
            Some(existing) => *existing = set,
            None => self.sets.push(set),
        }
    }

    /// makes `id` the only selected calibration set
    pub fn select(&mut self, id: &str) -> Result<(), DataLoadError> {
        if self.get(id).is_none() {
            return Err(DataLoadError::MissingKey {
                table: CALIBRATION_SETS_TABLE.to_string(),
                key: id.to_string(),
            });
        }
        for set in self.sets.iter_mut() {
            set.selected = set.id == id;
        }
        Ok(())
    }

    /// clears the selection so that the baseline visitation table is used
    pub fn deselect_all(&mut self) {
        self.sets.iter_mut().for_each(|s| s.selected = false);
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<CalibrationSets, DataLoadError> {
        let filepath = path.as_ref().to_string_lossy().to_string();
        let contents =
            std::fs::read_to_string(path.as_ref()).map_err(|e| DataLoadError::MissingTable {
                table: CALIBRATION_SETS_TABLE.to_string(),
                filepath: filepath.clone(),
                source: e,
            })?;
        serde_json::from_str(&contents).map_err(|e| DataLoadError::JsonError {
            filepath,
            source: e,
        })
    }
}

impl TryFrom<Vec<CalibrationSet>> for CalibrationSets {
    type Error = DataLoadError;

    fn try_from(sets: Vec<CalibrationSet>) -> Result<Self, Self::Error> {
        let n_selected = sets.iter().filter(|s| s.selected).count();
        if n_selected > 1 {
            return Err(DataLoadError::schema_mismatch(
                CALIBRATION_SETS_TABLE,
                format!("at most one calibration set may be selected, found {n_selected}"),
            ));
        }
        let mut ids = std::collections::HashSet::new();
        for set in sets.iter() {
            if !ids.insert(set.id.as_str()) {
                return Err(DataLoadError::DuplicateKey {
                    table: CALIBRATION_SETS_TABLE.to_string(),
                    key: set.id.clone(),
                });
            }
        }
        Ok(CalibrationSets { sets })
    }
}

impl From<CalibrationSets> for Vec<CalibrationSet> {
    fn from(value: CalibrationSets) -> Self {
        value.sets
    }
}
