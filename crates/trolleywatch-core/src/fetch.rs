use chrono::NaiveDate;
use std::thread;
use std::time::Duration;
use tracing::{info, warn};

use crate::error::TrolleyError;
use crate::extraction::{extract_records, ExtractMode};
use crate::model::EntityRecord;
use crate::ExtractConfig;

pub const DEFAULT_BASE_URL: &str = "https://uec.hse.ie/uec/TGAR.php";

/// The publisher serves an empty page to unrecognized clients.
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

/// Network policy for report fetching. Timeout, retry and delay are
/// scheduling/configuration points, not correctness requirements.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    pub base_url: String,
    pub user_agent: String,
    pub timeout: Duration,
    /// Additional attempts after a failed fetch of one date.
    pub retries: u32,
    /// Delay before the first retry; doubled per subsequent retry.
    pub retry_backoff: Duration,
    /// Minimum delay between consecutive date fetches.
    pub request_delay: Duration,
}

impl Default for FetchConfig {
    fn default() -> Self {
        FetchConfig {
            base_url: DEFAULT_BASE_URL.into(),
            user_agent: DEFAULT_USER_AGENT.into(),
            timeout: Duration::from_secs(30),
            retries: 3,
            retry_backoff: Duration::from_secs(2),
            request_delay: Duration::from_secs(1),
        }
    }
}

/// Trait for report transports: one markup document per report date.
pub trait ReportSource {
    fn fetch_report(&self, date: NaiveDate) -> Result<String, TrolleyError>;

    /// Name of this transport (for diagnostics).
    fn source_name(&self) -> &str;
}

/// HTTP transport against the live TrolleyGAR endpoint.
pub struct HttpReportSource {
    client: reqwest::blocking::Client,
    config: FetchConfig,
}

impl HttpReportSource {
    pub fn new(config: FetchConfig) -> Result<Self, TrolleyError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.clone())
            .build()?;
        Ok(HttpReportSource { client, config })
    }

    /// Report URL for one date: `{base}?EDDATE=DD%2FMM%2FYYYY`.
    pub fn report_url(&self, date: NaiveDate) -> String {
        let date_param = format_report_date(date);
        format!(
            "{}?EDDATE={}",
            self.config.base_url,
            urlencoding::encode(&date_param)
        )
    }

    fn try_fetch(&self, url: &str) -> Result<String, reqwest::Error> {
        self.client.get(url).send()?.error_for_status()?.text()
    }
}

impl ReportSource for HttpReportSource {
    fn fetch_report(&self, date: NaiveDate) -> Result<String, TrolleyError> {
        let url = self.report_url(date);
        let mut backoff = self.config.retry_backoff;
        let mut attempt = 0;
        loop {
            match self.try_fetch(&url) {
                Ok(body) => return Ok(body),
                Err(e) => {
                    attempt += 1;
                    if attempt > self.config.retries {
                        return Err(TrolleyError::Fetch {
                            date,
                            reason: e.to_string(),
                        });
                    }
                    warn!(%date, attempt, error = %e, "report fetch failed, retrying");
                    thread::sleep(backoff);
                    backoff *= 2;
                }
            }
        }
    }

    fn source_name(&self) -> &str {
        "http"
    }
}

/// The wire format the publisher expects in `EDDATE`.
pub fn format_report_date(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

/// Parse a DD/MM/YYYY argument as used on the CLI and the wire.
pub fn parse_report_date(s: &str) -> Result<NaiveDate, TrolleyError> {
    NaiveDate::parse_from_str(s.trim(), "%d/%m/%Y").map_err(|_| TrolleyError::InvalidDate {
        input: s.to_string(),
    })
}

/// Fetch and extract one report date.
pub fn scrape_date(
    source: &dyn ReportSource,
    date: NaiveDate,
    mode: ExtractMode,
    config: &ExtractConfig,
) -> Result<Vec<EntityRecord>, TrolleyError> {
    let markup = source.fetch_report(date)?;
    extract_records(&markup, date, mode, config)
}

/// Fetch an inclusive date range, strictly sequentially.
///
/// A failure on one date is logged with that date and the loop moves
/// on; records from earlier dates are retained. The inter-request
/// delay is applied between dates, not after the last one.
pub fn scrape_range(
    source: &dyn ReportSource,
    start: NaiveDate,
    end: NaiveDate,
    mode: ExtractMode,
    config: &ExtractConfig,
    request_delay: Duration,
) -> Vec<EntityRecord> {
    let mut records = Vec::new();
    let mut current = start;

    while current <= end {
        match scrape_date(source, current, mode, config) {
            Ok(mut day) => {
                info!(date = %current, records = day.len(), "scraped report");
                records.append(&mut day);
            }
            Err(e) => warn!(date = %current, error = %e, "skipping date"),
        }

        let Some(next) = current.succ_opt() else { break };
        current = next;
        if current <= end && !request_delay.is_zero() {
            thread::sleep(request_delay);
        }
    }

    records
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn report_url_encodes_date_slashes() {
        let source = HttpReportSource::new(FetchConfig::default()).unwrap();
        assert_eq!(
            source.report_url(date(2026, 8, 6)),
            "https://uec.hse.ie/uec/TGAR.php?EDDATE=06%2F08%2F2026"
        );
    }

    #[test]
    fn report_date_round_trips() {
        let d = parse_report_date("06/08/2026").unwrap();
        assert_eq!(d, date(2026, 8, 6));
        assert_eq!(format_report_date(d), "06/08/2026");
    }

    #[test]
    fn bad_report_date_rejected() {
        assert!(parse_report_date("2026-08-06").is_err());
        assert!(parse_report_date("32/01/2026").is_err());
    }

    struct FlakySource;

    impl ReportSource for FlakySource {
        fn fetch_report(&self, date: NaiveDate) -> Result<String, TrolleyError> {
            if date.day() == 2 {
                return Err(TrolleyError::Fetch {
                    date,
                    reason: "connection reset".into(),
                });
            }
            Ok(format!(
                r#"<table><tr>
                     <td colspan="10">Hospital {}</td><td></td>
                     <td>1</td><td>2</td><td class="tgar-green">3</td>
                   </tr></table>"#,
                date.day()
            ))
        }

        fn source_name(&self) -> &str {
            "flaky"
        }
    }

    #[test]
    fn range_scrape_survives_failing_dates() {
        let config = ExtractConfig::default();
        let records = scrape_range(
            &FlakySource,
            date(2026, 1, 1),
            date(2026, 1, 3),
            ExtractMode::Survey,
            &config,
            Duration::ZERO,
        );
        let names: Vec<&str> = records.iter().map(|r| r.entity_name.as_str()).collect();
        assert_eq!(names, vec!["Hospital 1", "Hospital 3"]);
    }
}
