pub mod html;

use chrono::NaiveDate;

use crate::error::TrolleyError;
use crate::model::EntityRecord;
use crate::parsing::decode_row;
use crate::ExtractConfig;

/// A single table cell as decoded from markup. Ephemeral, produced per
/// parse pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    pub text: String,
    pub span: u32,
    pub classes: Vec<String>,
    pub width: Option<String>,
}

impl Cell {
    /// An entity boundary is a wide cell with visible text: hospital
    /// names and section headers, never data or spacers.
    pub fn is_entity_boundary(&self, min_span: u32) -> bool {
        self.span >= min_span && !self.text.is_empty()
    }
}

/// The two shapes the published table takes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractMode {
    /// Daily snapshot: one wide master row concatenates every hospital.
    Daily,
    /// Historical color survey: every row decoded independently.
    Survey,
}

impl ExtractMode {
    /// Statistic cells collected per entity; the survey layout carries
    /// one extra trailing spacer.
    pub fn cells_per_entity(&self) -> usize {
        match self {
            ExtractMode::Daily => 11,
            ExtractMode::Survey => 12,
        }
    }
}

/// Extract entity records from raw report markup for one report date.
pub fn extract_records(
    markup: &str,
    date: NaiveDate,
    mode: ExtractMode,
    config: &ExtractConfig,
) -> Result<Vec<EntityRecord>, TrolleyError> {
    let rows = html::table_rows(markup)?;
    let cells_per_entity = mode.cells_per_entity();

    match mode {
        ExtractMode::Daily => {
            let row = find_master_row(&rows, config)?;
            Ok(decode_row(row, cells_per_entity, date, config))
        }
        ExtractMode::Survey => Ok(rows
            .iter()
            .flat_map(|row| decode_row(row, cells_per_entity, date, config))
            .collect()),
    }
}

/// Locate the master row: the first row whose entity-boundary count
/// covers the full hospital roster. Header rows carry too few wide
/// labelled cells to qualify.
fn find_master_row<'a>(
    rows: &'a [Vec<Cell>],
    config: &ExtractConfig,
) -> Result<&'a [Cell], TrolleyError> {
    for row in rows.iter().skip(config.skip_rows) {
        let boundaries = row
            .iter()
            .filter(|c| c.is_entity_boundary(config.boundary_min_span))
            .count();
        if boundaries >= config.master_row_min_entities {
            return Ok(row);
        }
    }
    Err(TrolleyError::NoMasterRowFound {
        min_entities: config.master_row_min_entities,
    })
}
