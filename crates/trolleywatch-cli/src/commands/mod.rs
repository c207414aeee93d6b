pub mod analyze;
pub mod regions;
pub mod scrape;
pub mod survey;

use std::path::Path;

use trolleywatch_core::error::TrolleyError;
use trolleywatch_core::parsing::color::load_color_rules;
use trolleywatch_core::store::{CsvStore, RecordStore, SqliteStore};
use trolleywatch_core::ExtractConfig;

/// Pick the store backend by file extension: `.csv` is CSV, anything
/// else is a SQLite database.
pub(crate) fn open_store(path: &Path) -> Result<Box<dyn RecordStore>, TrolleyError> {
    let is_csv = path
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("csv"))
        .unwrap_or(false);
    if is_csv {
        Ok(Box::new(CsvStore::new(path)))
    } else {
        Ok(Box::new(SqliteStore::open(path)?))
    }
}

/// Default extraction config, with the color mapping swapped out when a
/// rules file is given.
pub(crate) fn extract_config(color_rules: Option<&Path>) -> Result<ExtractConfig, TrolleyError> {
    let mut config = ExtractConfig::default();
    if let Some(path) = color_rules {
        config.colors = load_color_rules(path)?;
    }
    Ok(config)
}
