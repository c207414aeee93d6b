pub mod color;
pub mod row;
pub mod values;

use chrono::NaiveDate;
use tracing::warn;

use crate::extraction::Cell;
use crate::model::{ColorBand, EntityRecord};
use crate::ExtractConfig;
use row::{decode_cells, RawEntity};
use values::parse_count;

/// Minimum non-empty statistic values an entity must carry to yield a
/// record; below this the boundary is treated as malformed and dropped.
const MIN_NON_EMPTY_STATS: usize = 3;

/// Decode one table row's flat cell sequence into entity records.
///
/// Statistic slots are positional: 0=ED, 1=Ward, 2=Total (colored),
/// 3=spacer, 4=Surge (colored), 5=spacer, 6=Delayed (colored),
/// 7=spacer, 8=>24h, 9=spacer, 10=>75 & >24h. Trailing spacer slots are
/// dropped, not emitted as fields. A malformed entity is skipped; the
/// rest of the row is still processed.
pub fn decode_row(
    cells: &[Cell],
    cells_per_entity: usize,
    date: NaiveDate,
    config: &ExtractConfig,
) -> Vec<EntityRecord> {
    decode_cells(cells, cells_per_entity, config)
        .into_iter()
        .filter_map(|entity| build_record(entity, date))
        .collect()
}

fn build_record(entity: RawEntity, date: NaiveDate) -> Option<EntityRecord> {
    let non_empty = entity.stats.iter().filter(|s| !s.text.is_empty()).count();
    if non_empty < MIN_NON_EMPTY_STATS {
        warn!(
            entity = %entity.name,
            non_empty,
            "dropping entity with too few statistic values"
        );
        return None;
    }

    let count = |slot: usize| entity.stats.get(slot).and_then(|s| parse_count(&s.text));
    let color = |slot: usize| {
        entity
            .stats
            .get(slot)
            .map(|s| s.color)
            .unwrap_or(ColorBand::None)
    };

    let record = EntityRecord {
        date,
        ed_count: count(0),
        ward_count: count(1),
        total_count: count(2),
        total_color: color(2),
        surge_count: count(4),
        surge_color: color(4),
        delayed_count: count(6),
        delayed_color: color(6),
        over_24h_count: count(8),
        over_75_24h_count: count(10),
        entity_name: entity.name,
    };
    Some(record)
}
