#[derive(thiserror::Error, Debug)]
pub enum DataLoadError {
    #[error("reference table '{table}' could not be opened at '{filepath}': {source}")]
    MissingTable {
        table: String,
        filepath: String,
        source: std::io::Error,
    },
    #[error("failure decoding {table} table: {source}")]
    CsvError { table: String, source: csv::Error },
    #[error("{table} table is missing expected column '{column}'")]
    MissingColumn { table: String, column: String },
    #[error("{table} table has malformed value '{value}' at row {row}, column '{column}'")]
    MalformedValue {
        table: String,
        row: usize,
        column: String,
        value: String,
    },
    #[error("{table} table has duplicate key '{key}'")]
    DuplicateKey { table: String, key: String },
    #[error("{table} table has no entry for '{key}'")]
    MissingKey { table: String, key: String },
    #[error("{table} table does not match the expected schema: {msg}")]
    SchemaMismatch { table: String, msg: String },
    #[error("failure decoding JSON from '{filepath}': {source}")]
    JsonError {
        filepath: String,
        source: serde_json::Error,
    },
    #[error("failure reading GeoJSON from '{filepath}': {msg}")]
    GeoJsonError { filepath: String, msg: String },
    #[error("{0}")]
    InternalError(String),
}

impl DataLoadError {
    pub fn schema_mismatch(table: &str, msg: String) -> DataLoadError {
        DataLoadError::SchemaMismatch {
            table: table.to_string(),
            msg,
        }
    }
}
