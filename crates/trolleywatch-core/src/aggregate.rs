use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::model::EntityRecord;

/// Per-region mean of the total trolley count, the table the
/// presentation layer (map + table) consumes. Mapping region display
/// names onto geographic datasets is the presentation layer's job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionMean {
    pub region: String,
    pub mean_total: f64,
    pub observations: usize,
}

/// Aggregate the per-region "… Total" rows into mean totals.
///
/// Region aggregates are the records whose name starts with the region
/// prefix and ends with " Total" (the national aggregate carries no
/// prefix and is naturally excluded). Null totals don't contribute.
pub fn region_means(records: &[EntityRecord], region_prefix: &str) -> Vec<RegionMean> {
    let mut sums: BTreeMap<String, (u64, usize)> = BTreeMap::new();

    for record in records {
        if !record.entity_name.starts_with(region_prefix) {
            continue;
        }
        let Some(region) = record.entity_name.strip_suffix(" Total") else {
            continue;
        };
        let Some(total) = record.total_count else { continue };
        let entry = sums.entry(region.to_string()).or_insert((0, 0));
        entry.0 += u64::from(total);
        entry.1 += 1;
    }

    sums.into_iter()
        .map(|(region, (sum, n))| RegionMean {
            region,
            mean_total: sum as f64 / n as f64,
            observations: n,
        })
        .collect()
}
