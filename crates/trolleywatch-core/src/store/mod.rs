pub mod csv;
pub mod sqlite;

pub use csv::CsvStore;
pub use sqlite::SqliteStore;

use crate::error::TrolleyError;
use crate::model::EntityRecord;

/// Entity-name exclusion patterns applied when querying history.
#[derive(Debug, Clone, Default)]
pub struct RecordFilter {
    /// Drop records whose name contains any of these substrings.
    pub exclude_contains: Vec<String>,
    /// Drop records whose name starts with any of these prefixes.
    pub exclude_prefixes: Vec<String>,
}

impl RecordFilter {
    /// Keep everything.
    pub fn all() -> Self {
        RecordFilter::default()
    }

    /// Individual hospitals only: drops the national and regional
    /// aggregate rows and any stray regional entries.
    pub fn hospitals_only() -> Self {
        RecordFilter {
            exclude_contains: vec!["Total".into()],
            exclude_prefixes: vec!["HSE ".into()],
        }
    }

    pub fn keeps(&self, record: &EntityRecord) -> bool {
        let name = &record.entity_name;
        if self.exclude_contains.iter().any(|s| name.contains(s.as_str())) {
            return false;
        }
        if self.exclude_prefixes.iter().any(|p| name.starts_with(p.as_str())) {
            return false;
        }
        true
    }
}

/// Outcome of one append call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AppendStats {
    pub inserted: usize,
    pub duplicates: usize,
    /// Rows stored after the append.
    pub total: usize,
}

/// Tabular storage for entity records: append-only with exact-row
/// duplicate elimination, plus a full-history query.
pub trait RecordStore {
    /// Append records. With `dedup`, rows exactly equal to an existing
    /// or earlier-appended row are skipped.
    fn append(&mut self, records: &[EntityRecord], dedup: bool)
        -> Result<AppendStats, TrolleyError>;

    /// The full stored history, filtered.
    fn load(&self, filter: &RecordFilter) -> Result<Vec<EntityRecord>, TrolleyError>;

    /// Remove exact-duplicate rows already stored; returns how many
    /// were removed.
    fn dedup(&mut self) -> Result<usize, TrolleyError>;
}
