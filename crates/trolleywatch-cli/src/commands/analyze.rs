use std::path::PathBuf;

use trolleywatch_core::error::TrolleyError;
use trolleywatch_core::store::{RecordFilter, RecordStore};
use trolleywatch_core::thresholds::{analyze, AnalyzeOptions};

use super::open_store;
use crate::output;

pub fn run(input: PathBuf, output_format: &str, exclude: Vec<String>) -> Result<(), TrolleyError> {
    let store = open_store(&input)?;
    let history = store.load(&RecordFilter::hospitals_only())?;

    let mut options = AnalyzeOptions::default();
    options.exclude_entities.extend(exclude);

    let report = analyze(&history, &options);

    match output_format {
        "json" => output::json::print(&report)?,
        _ => output::table::print_report(&report),
    }

    Ok(())
}
