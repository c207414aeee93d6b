use std::path::PathBuf;

use trolleywatch_core::aggregate::region_means;
use trolleywatch_core::error::TrolleyError;
use trolleywatch_core::store::{RecordFilter, RecordStore};

use super::open_store;
use crate::output;

pub fn run(input: PathBuf, output_format: &str) -> Result<(), TrolleyError> {
    let store = open_store(&input)?;
    let records = store.load(&RecordFilter::all())?;
    let means = region_means(&records, "HSE ");

    match output_format {
        "json" => output::json::print(&means)?,
        _ => output::table::print_regions(&means),
    }

    Ok(())
}
