use std::collections::HashSet;
use std::path::PathBuf;

use super::{AppendStats, RecordFilter, RecordStore};
use crate::error::TrolleyError;
use crate::model::EntityRecord;

/// CSV-file record store. The whole file is rewritten on append, which
/// keeps duplicate elimination a plain set operation; the history is
/// small (one row per hospital per day).
pub struct CsvStore {
    path: PathBuf,
}

impl CsvStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        CsvStore { path: path.into() }
    }

    fn read_all(&self) -> Result<Vec<EntityRecord>, TrolleyError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let mut reader = csv::Reader::from_path(&self.path)?;
        let mut records = Vec::new();
        for row in reader.deserialize() {
            records.push(row?);
        }
        Ok(records)
    }

    fn write_all(&self, records: &[EntityRecord]) -> Result<(), TrolleyError> {
        let mut writer = csv::Writer::from_path(&self.path)?;
        for record in records {
            writer.serialize(record)?;
        }
        writer.flush()?;
        Ok(())
    }
}

impl RecordStore for CsvStore {
    fn append(
        &mut self,
        records: &[EntityRecord],
        dedup: bool,
    ) -> Result<AppendStats, TrolleyError> {
        let mut all = self.read_all()?;
        let mut inserted = 0;
        let mut duplicates = 0;

        if dedup {
            let mut seen: HashSet<EntityRecord> = all.iter().cloned().collect();
            for record in records {
                if seen.insert(record.clone()) {
                    all.push(record.clone());
                    inserted += 1;
                } else {
                    duplicates += 1;
                }
            }
        } else {
            all.extend_from_slice(records);
            inserted = records.len();
        }

        self.write_all(&all)?;
        Ok(AppendStats {
            inserted,
            duplicates,
            total: all.len(),
        })
    }

    fn load(&self, filter: &RecordFilter) -> Result<Vec<EntityRecord>, TrolleyError> {
        Ok(self
            .read_all()?
            .into_iter()
            .filter(|r| filter.keeps(r))
            .collect())
    }

    fn dedup(&mut self) -> Result<usize, TrolleyError> {
        let all = self.read_all()?;
        let before = all.len();
        let mut seen = HashSet::new();
        let kept: Vec<EntityRecord> = all
            .into_iter()
            .filter(|r| seen.insert(r.clone()))
            .collect();
        let removed = before - kept.len();
        if removed > 0 {
            self.write_all(&kept)?;
        }
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ColorBand;
    use chrono::NaiveDate;

    fn record(day: u32, name: &str, total: Option<u32>) -> EntityRecord {
        EntityRecord {
            date: NaiveDate::from_ymd_opt(2026, 1, day).unwrap(),
            entity_name: name.into(),
            ed_count: Some(2),
            ward_count: None,
            total_count: total,
            total_color: ColorBand::Amber,
            surge_count: None,
            surge_color: ColorBand::None,
            delayed_count: Some(0),
            delayed_color: ColorBand::Green,
            over_24h_count: None,
            over_75_24h_count: None,
        }
    }

    fn temp_store() -> (tempfile::TempDir, CsvStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = CsvStore::new(dir.path().join("history.csv"));
        (dir, store)
    }

    #[test]
    fn round_trip_preserves_records() {
        let (_dir, mut store) = temp_store();
        let records = vec![
            record(1, "Beaumont Hospital", Some(8)),
            record(1, "Cavan General Hospital", None),
        ];
        store.append(&records, true).unwrap();
        let loaded = store.load(&RecordFilter::all()).unwrap();
        assert_eq!(loaded, records);
    }

    #[test]
    fn appending_same_record_twice_stores_one_row() {
        let (_dir, mut store) = temp_store();
        let records = vec![record(1, "Beaumont Hospital", Some(8))];
        store.append(&records, true).unwrap();
        let stats = store.append(&records, true).unwrap();
        assert_eq!(stats.inserted, 0);
        assert_eq!(stats.duplicates, 1);
        assert_eq!(stats.total, 1);
        assert_eq!(store.load(&RecordFilter::all()).unwrap().len(), 1);
    }

    #[test]
    fn dedup_disabled_keeps_duplicates() {
        let (_dir, mut store) = temp_store();
        let records = vec![record(1, "Beaumont Hospital", Some(8))];
        store.append(&records, false).unwrap();
        store.append(&records, false).unwrap();
        assert_eq!(store.load(&RecordFilter::all()).unwrap().len(), 2);

        let removed = store.dedup().unwrap();
        assert_eq!(removed, 1);
        assert_eq!(store.load(&RecordFilter::all()).unwrap().len(), 1);
    }

    #[test]
    fn load_applies_filter() {
        let (_dir, mut store) = temp_store();
        store
            .append(
                &[
                    record(1, "Beaumont Hospital", Some(8)),
                    record(1, "National Total", Some(400)),
                ],
                true,
            )
            .unwrap();
        let loaded = store.load(&RecordFilter::hospitals_only()).unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].entity_name, "Beaumont Hospital");
    }

    #[test]
    fn missing_file_loads_empty() {
        let (_dir, store) = temp_store();
        assert!(store.load(&RecordFilter::all()).unwrap().is_empty());
    }
}
