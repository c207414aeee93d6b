use std::path::PathBuf;
use std::time::Duration;

use trolleywatch_core::error::TrolleyError;
use trolleywatch_core::extraction::ExtractMode;
use trolleywatch_core::fetch::{parse_report_date, scrape_range, FetchConfig, HttpReportSource};
use trolleywatch_core::store::{CsvStore, RecordFilter, RecordStore};
use trolleywatch_core::thresholds::{analyze, AnalyzeOptions};

use super::extract_config;
use crate::output;

pub fn run(
    start: &str,
    end: &str,
    output_path: PathBuf,
    delay: f64,
    color_rules: Option<PathBuf>,
    analyze_boundaries: bool,
) -> Result<(), TrolleyError> {
    let config = extract_config(color_rules.as_deref())?;

    let fetch_config = FetchConfig {
        request_delay: Duration::from_secs_f64(delay),
        ..FetchConfig::default()
    };
    let request_delay = fetch_config.request_delay;
    let source = HttpReportSource::new(fetch_config)?;

    let records = scrape_range(
        &source,
        parse_report_date(start)?,
        parse_report_date(end)?,
        ExtractMode::Survey,
        &config,
        request_delay,
    );

    if records.is_empty() {
        println!("No records scraped.");
        return Ok(());
    }

    let mut store = CsvStore::new(&output_path);
    let stats = store.append(&records, true)?;
    println!(
        "Appended {} records to {} ({} duplicates skipped, {} rows total)",
        stats.inserted,
        output_path.display(),
        stats.duplicates,
        stats.total
    );

    if analyze_boundaries {
        let history = store.load(&RecordFilter::hospitals_only())?;
        let report = analyze(&history, &AnalyzeOptions::default());
        println!();
        output::table::print_boundaries(&report);
    }

    Ok(())
}
