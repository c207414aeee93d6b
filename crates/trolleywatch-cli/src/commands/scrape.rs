use std::path::PathBuf;
use std::time::Duration;

use tracing::info;

use trolleywatch_core::error::TrolleyError;
use trolleywatch_core::extraction::ExtractMode;
use trolleywatch_core::fetch::{parse_report_date, scrape_range, FetchConfig, HttpReportSource};
use trolleywatch_core::store::RecordStore;

use super::{extract_config, open_store};

#[allow(clippy::too_many_arguments)]
pub fn run(
    date: Option<String>,
    start: Option<String>,
    end: Option<String>,
    output: PathBuf,
    delay: f64,
    color_rules: Option<PathBuf>,
    no_dedup: bool,
    clean_duplicates: bool,
) -> Result<(), TrolleyError> {
    let config = extract_config(color_rules.as_deref())?;

    let fetch_config = FetchConfig {
        request_delay: Duration::from_secs_f64(delay),
        ..FetchConfig::default()
    };
    let request_delay = fetch_config.request_delay;
    let source = HttpReportSource::new(fetch_config)?;

    let (start_date, end_date) = match (date, start, end) {
        (Some(d), _, _) => {
            let d = parse_report_date(&d)?;
            (d, d)
        }
        (None, Some(s), Some(e)) => (parse_report_date(&s)?, parse_report_date(&e)?),
        _ => {
            // Daily-update mode: today's report.
            let today = chrono::Local::now().date_naive();
            info!(date = %today, "daily update");
            (today, today)
        }
    };

    let records = scrape_range(
        &source,
        start_date,
        end_date,
        ExtractMode::Daily,
        &config,
        request_delay,
    );

    if records.is_empty() {
        println!("No records scraped.");
        return Ok(());
    }

    let mut store = open_store(&output)?;
    let stats = store.append(&records, !no_dedup)?;
    println!(
        "Appended {} records to {} ({} duplicates skipped, {} rows total)",
        stats.inserted,
        output.display(),
        stats.duplicates,
        stats.total
    );

    if clean_duplicates {
        let removed = store.dedup()?;
        println!("Duplicates removed: {removed}");
    }

    Ok(())
}
