use chrono::NaiveDate;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum TrolleyError {
    #[error("fetch failed for {date}: {reason}")]
    Fetch { date: NaiveDate, reason: String },

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("no table element found in report markup")]
    NoTableFound,

    #[error("no master row found (no row with {min_entities}+ entity boundaries)")]
    NoMasterRowFound { min_entities: usize },

    #[error("failed to parse report: {0}")]
    Parse(String),

    #[error("invalid date '{input}': expected DD/MM/YYYY")]
    InvalidDate { input: String },

    #[error("failed to load color rules from {path}: {reason}")]
    ColorRulesLoad { path: PathBuf, reason: String },

    #[error("invalid color rules: {0}")]
    ColorRulesInvalid(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}
