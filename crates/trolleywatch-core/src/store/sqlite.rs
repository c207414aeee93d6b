use std::collections::HashSet;
use std::path::Path;
use std::str::FromStr;

use chrono::NaiveDate;
use rusqlite::{params, Connection};

use super::{AppendStats, RecordFilter, RecordStore};
use crate::error::TrolleyError;
use crate::model::{ColorBand, EntityRecord};

const CREATE_TABLE: &str = "
CREATE TABLE IF NOT EXISTS trolleygar (
    date TEXT NOT NULL,
    entity_name TEXT NOT NULL,
    ed_count INTEGER,
    ward_count INTEGER,
    total_count INTEGER,
    total_color TEXT NOT NULL,
    surge_count INTEGER,
    surge_color TEXT NOT NULL,
    delayed_count INTEGER,
    delayed_color TEXT NOT NULL,
    over_24h_count INTEGER,
    over_75_24h_count INTEGER
)";

const INSERT_ROW: &str = "
INSERT INTO trolleygar (
    date, entity_name, ed_count, ward_count, total_count, total_color,
    surge_count, surge_color, delayed_count, delayed_color,
    over_24h_count, over_75_24h_count
) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)";

const SELECT_ALL: &str = "
SELECT date, entity_name, ed_count, ward_count, total_count, total_color,
       surge_count, surge_color, delayed_count, delayed_color,
       over_24h_count, over_75_24h_count
FROM trolleygar ORDER BY rowid";

/// SQLite-backed record store. Dates are stored ISO, colors as their
/// lowercase labels.
pub struct SqliteStore {
    conn: Connection,
}

/// Column values as read from SQLite, before date/color decoding.
struct RawRow {
    date: String,
    entity_name: String,
    ed_count: Option<u32>,
    ward_count: Option<u32>,
    total_count: Option<u32>,
    total_color: String,
    surge_count: Option<u32>,
    surge_color: String,
    delayed_count: Option<u32>,
    delayed_color: String,
    over_24h_count: Option<u32>,
    over_75_24h_count: Option<u32>,
}

impl SqliteStore {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, TrolleyError> {
        let conn = Connection::open(path)?;
        conn.execute_batch(CREATE_TABLE)?;
        Ok(SqliteStore { conn })
    }

    pub fn open_in_memory() -> Result<Self, TrolleyError> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch(CREATE_TABLE)?;
        Ok(SqliteStore { conn })
    }

    fn count(&self) -> Result<usize, TrolleyError> {
        let n: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM trolleygar", [], |row| row.get(0))?;
        Ok(n as usize)
    }

    fn query_all(&self) -> Result<Vec<EntityRecord>, TrolleyError> {
        let mut stmt = self.conn.prepare(SELECT_ALL)?;
        let rows = stmt.query_map([], |row| {
            Ok(RawRow {
                date: row.get(0)?,
                entity_name: row.get(1)?,
                ed_count: row.get(2)?,
                ward_count: row.get(3)?,
                total_count: row.get(4)?,
                total_color: row.get(5)?,
                surge_count: row.get(6)?,
                surge_color: row.get(7)?,
                delayed_count: row.get(8)?,
                delayed_color: row.get(9)?,
                over_24h_count: row.get(10)?,
                over_75_24h_count: row.get(11)?,
            })
        })?;

        let mut records = Vec::new();
        for raw in rows {
            records.push(decode_row(raw?)?);
        }
        Ok(records)
    }
}

fn decode_row(raw: RawRow) -> Result<EntityRecord, TrolleyError> {
    let date = NaiveDate::parse_from_str(&raw.date, "%Y-%m-%d")
        .map_err(|e| TrolleyError::Parse(format!("bad stored date '{}': {e}", raw.date)))?;
    Ok(EntityRecord {
        date,
        entity_name: raw.entity_name,
        ed_count: raw.ed_count,
        ward_count: raw.ward_count,
        total_count: raw.total_count,
        total_color: ColorBand::from_str(&raw.total_color)?,
        surge_count: raw.surge_count,
        surge_color: ColorBand::from_str(&raw.surge_color)?,
        delayed_count: raw.delayed_count,
        delayed_color: ColorBand::from_str(&raw.delayed_color)?,
        over_24h_count: raw.over_24h_count,
        over_75_24h_count: raw.over_75_24h_count,
    })
}

impl RecordStore for SqliteStore {
    fn append(
        &mut self,
        records: &[EntityRecord],
        dedup: bool,
    ) -> Result<AppendStats, TrolleyError> {
        let mut seen: HashSet<EntityRecord> = if dedup {
            self.query_all()?.into_iter().collect()
        } else {
            HashSet::new()
        };

        let mut inserted = 0;
        let mut duplicates = 0;
        let tx = self.conn.transaction()?;
        {
            let mut stmt = tx.prepare(INSERT_ROW)?;
            for record in records {
                if dedup && !seen.insert(record.clone()) {
                    duplicates += 1;
                    continue;
                }
                stmt.execute(params![
                    record.date.to_string(),
                    record.entity_name,
                    record.ed_count,
                    record.ward_count,
                    record.total_count,
                    record.total_color.to_string(),
                    record.surge_count,
                    record.surge_color.to_string(),
                    record.delayed_count,
                    record.delayed_color.to_string(),
                    record.over_24h_count,
                    record.over_75_24h_count,
                ])?;
                inserted += 1;
            }
        }
        tx.commit()?;

        Ok(AppendStats {
            inserted,
            duplicates,
            total: self.count()?,
        })
    }

    fn load(&self, filter: &RecordFilter) -> Result<Vec<EntityRecord>, TrolleyError> {
        Ok(self
            .query_all()?
            .into_iter()
            .filter(|r| filter.keeps(r))
            .collect())
    }

    fn dedup(&mut self) -> Result<usize, TrolleyError> {
        let before = self.count()?;
        // SELECT DISTINCT treats NULLs as equal, which is exactly the
        // exact-row equality the dedup contract wants.
        let tx = self.conn.transaction()?;
        tx.execute_batch(
            "CREATE TABLE trolleygar_dedup AS SELECT DISTINCT * FROM trolleygar;
             DROP TABLE trolleygar;
             ALTER TABLE trolleygar_dedup RENAME TO trolleygar;",
        )?;
        tx.commit()?;
        Ok(before - self.count()?)
    }
}
