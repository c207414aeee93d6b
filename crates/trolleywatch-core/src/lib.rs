pub mod aggregate;
pub mod error;
pub mod extraction;
pub mod fetch;
pub mod model;
pub mod parsing;
pub mod store;
pub mod thresholds;

pub use error::TrolleyError;
pub use extraction::{extract_records, ExtractMode};
pub use model::{ColorBand, EntityRecord};

use parsing::color::ColorRules;

/// Knobs for locating and decoding the published table.
///
/// The defaults match the TrolleyGAR layout as published; every value
/// that encodes an assumption about the upstream markup (class names,
/// the region prefix, the span heuristics) is configuration so drift is
/// a config change, not a code change.
#[derive(Debug, Clone)]
pub struct ExtractConfig {
    /// CSS-class-to-band mapping.
    pub colors: ColorRules,
    /// Prefix shared by regional section headers and regional totals.
    pub region_prefix: String,
    /// Name suffixes that mark a wide cell as a real data row rather
    /// than a section header.
    pub entity_suffixes: Vec<String>,
    /// Minimum colspan for a cell to count as an entity boundary.
    pub boundary_min_span: u32,
    /// Minimum entity boundaries for a row to qualify as the master
    /// row in daily mode.
    pub master_row_min_entities: usize,
    /// Leading rows excluded from the master-row search. The boundary
    /// count already rejects ordinary header rows, so this stays 0
    /// unless the header itself grows wide labelled cells.
    pub skip_rows: usize,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        ExtractConfig {
            colors: ColorRules::default(),
            region_prefix: "HSE ".into(),
            entity_suffixes: vec!["Total".into(), "Hospital".into()],
            boundary_min_span: 8,
            master_row_min_entities: 50,
            skip_rows: 0,
        }
    }
}
