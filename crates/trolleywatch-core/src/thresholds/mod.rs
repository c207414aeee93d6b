pub mod boundaries;
pub mod estimate;

pub use boundaries::ExactBoundary;
pub use estimate::{BandStats, ThresholdEstimate};

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::model::{EntityRecord, Observation, ObservationSeries};

/// Options for a threshold analysis run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzeOptions {
    /// Entity names excluded from inference, by exact match. The
    /// national aggregate is a pseudo-entity with its own color policy.
    pub exclude_entities: Vec<String>,
}

impl Default for AnalyzeOptions {
    fn default() -> Self {
        AnalyzeOptions {
            exclude_entities: vec!["National Total".into()],
        }
    }
}

/// Full threshold analysis output. The three parts are independently
/// queryable; printing is the CLI's concern.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThresholdReport {
    /// Per-hospital estimates, ascending amber threshold, undetermined
    /// last.
    pub estimates: Vec<ThresholdEstimate>,
    /// Proven single-unit boundaries.
    pub exact_boundaries: Vec<ExactBoundary>,
    /// Threshold value -> number of hospitals, for spotting a shared
    /// national policy.
    pub amber_distribution: BTreeMap<u32, usize>,
    pub red_distribution: BTreeMap<u32, usize>,
}

/// Group records into per-hospital, time-ordered observation series.
///
/// Only observations with a numeric total survive; hospitals with none
/// are omitted entirely. Excluded entities are dropped by exact name.
pub fn observation_series(
    records: &[EntityRecord],
    options: &AnalyzeOptions,
) -> Vec<ObservationSeries> {
    let mut grouped: BTreeMap<&str, Vec<Observation>> = BTreeMap::new();

    for record in records {
        if options
            .exclude_entities
            .iter()
            .any(|name| name == &record.entity_name)
        {
            continue;
        }
        let Some(count) = record.total_count else { continue };
        grouped.entry(&record.entity_name).or_default().push(Observation {
            date: record.date,
            count,
            color: record.total_color,
        });
    }

    grouped
        .into_iter()
        .map(|(hospital, mut observations)| {
            observations.sort_by_key(|o| o.date);
            ObservationSeries {
                hospital: hospital.to_string(),
                observations,
            }
        })
        .collect()
}

/// Run the full inference over a record history: per-hospital threshold
/// estimates, proven boundaries, and the cross-hospital threshold
/// distributions. Recomputed from scratch on every call.
pub fn analyze(records: &[EntityRecord], options: &AnalyzeOptions) -> ThresholdReport {
    let series = observation_series(records, options);

    let mut estimates = Vec::with_capacity(series.len());
    let mut exact = Vec::new();

    for s in &series {
        estimates.push(ThresholdEstimate::compute(&s.hospital, &s.observations));
        exact.extend(boundaries::exact_boundaries(&s.hospital, &s.observations));
    }

    estimates.sort_by(|a, b| {
        let key = |e: &ThresholdEstimate| {
            (e.amber_threshold.is_none(), e.amber_threshold, e.hospital.clone())
        };
        key(a).cmp(&key(b))
    });

    let mut amber_distribution = BTreeMap::new();
    let mut red_distribution = BTreeMap::new();
    for estimate in &estimates {
        if let Some(at) = estimate.amber_threshold {
            *amber_distribution.entry(at).or_insert(0) += 1;
        }
        if let Some(rt) = estimate.red_threshold {
            *red_distribution.entry(rt).or_insert(0) += 1;
        }
    }

    ThresholdReport {
        estimates,
        exact_boundaries: exact,
        amber_distribution,
        red_distribution,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ColorBand;
    use chrono::NaiveDate;

    fn record(day: u32, name: &str, total: Option<u32>, color: ColorBand) -> EntityRecord {
        EntityRecord {
            date: NaiveDate::from_ymd_opt(2026, 1, day).unwrap(),
            entity_name: name.into(),
            ed_count: None,
            ward_count: None,
            total_count: total,
            total_color: color,
            surge_count: None,
            surge_color: ColorBand::None,
            delayed_count: None,
            delayed_color: ColorBand::None,
            over_24h_count: None,
            over_75_24h_count: None,
        }
    }

    #[test]
    fn national_total_excluded_by_default() {
        let records = vec![
            record(1, "National Total", Some(500), ColorBand::Red),
            record(1, "Beaumont Hospital", Some(10), ColorBand::Green),
        ];
        let report = analyze(&records, &AnalyzeOptions::default());
        assert_eq!(report.estimates.len(), 1);
        assert_eq!(report.estimates[0].hospital, "Beaumont Hospital");
    }

    #[test]
    fn hospital_without_numeric_totals_excluded() {
        let records = vec![
            record(1, "Beaumont Hospital", Some(10), ColorBand::Green),
            record(1, "Silent Hospital", None, ColorBand::Green),
        ];
        let report = analyze(&records, &AnalyzeOptions::default());
        assert_eq!(report.estimates.len(), 1);
        assert_eq!(report.estimates[0].hospital, "Beaumont Hospital");
    }

    #[test]
    fn series_are_time_ordered() {
        let records = vec![
            record(3, "X Hospital", Some(12), ColorBand::Amber),
            record(1, "X Hospital", Some(10), ColorBand::Green),
            record(2, "X Hospital", Some(11), ColorBand::Amber),
        ];
        let series = observation_series(&records, &AnalyzeOptions::default());
        let counts: Vec<u32> = series[0].observations.iter().map(|o| o.count).collect();
        assert_eq!(counts, vec![10, 11, 12]);
    }

    #[test]
    fn estimates_sorted_by_amber_threshold_nulls_last() {
        let records = vec![
            // amber threshold 21
            record(1, "B Hospital", Some(20), ColorBand::Green),
            record(2, "B Hospital", Some(25), ColorBand::Amber),
            // amber threshold 11
            record(1, "C Hospital", Some(10), ColorBand::Green),
            record(2, "C Hospital", Some(11), ColorBand::Amber),
            // undetermined
            record(1, "A Hospital", Some(5), ColorBand::Green),
        ];
        let report = analyze(&records, &AnalyzeOptions::default());
        let order: Vec<&str> = report.estimates.iter().map(|e| e.hospital.as_str()).collect();
        assert_eq!(order, vec!["C Hospital", "B Hospital", "A Hospital"]);
    }

    #[test]
    fn amber_and_red_ordered_when_both_present() {
        let records = vec![
            record(1, "X Hospital", Some(10), ColorBand::Green),
            record(2, "X Hospital", Some(15), ColorBand::Amber),
            record(3, "X Hospital", Some(30), ColorBand::Red),
        ];
        let report = analyze(&records, &AnalyzeOptions::default());
        let estimate = &report.estimates[0];
        let (Some(amber_at), Some(red_at)) = (estimate.amber_threshold, estimate.red_threshold)
        else {
            panic!("both thresholds expected");
        };
        assert!(amber_at <= red_at);
    }

    #[test]
    fn distribution_counts_shared_thresholds() {
        let records = vec![
            record(1, "A Hospital", Some(10), ColorBand::Green),
            record(2, "A Hospital", Some(11), ColorBand::Amber),
            record(1, "B Hospital", Some(10), ColorBand::Green),
            record(2, "B Hospital", Some(11), ColorBand::Amber),
            record(1, "C Hospital", Some(20), ColorBand::Green),
            record(2, "C Hospital", Some(21), ColorBand::Amber),
        ];
        let report = analyze(&records, &AnalyzeOptions::default());
        assert_eq!(report.amber_distribution.get(&11), Some(&2));
        assert_eq!(report.amber_distribution.get(&21), Some(&1));
    }

    #[test]
    fn exact_boundaries_collected_per_hospital() {
        let records = vec![
            record(1, "A Hospital", Some(10), ColorBand::Green),
            record(2, "A Hospital", Some(11), ColorBand::Amber),
            record(1, "B Hospital", Some(30), ColorBand::Amber),
            record(2, "B Hospital", Some(31), ColorBand::Red),
        ];
        let report = analyze(&records, &AnalyzeOptions::default());
        assert_eq!(report.exact_boundaries.len(), 2);
        let transitions: Vec<String> = report
            .exact_boundaries
            .iter()
            .map(|b| b.transition())
            .collect();
        assert!(transitions.contains(&"green→amber".to_string()));
        assert!(transitions.contains(&"amber→red".to_string()));
    }
}
