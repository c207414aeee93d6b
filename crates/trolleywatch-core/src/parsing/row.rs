use crate::extraction::Cell;
use crate::model::ColorBand;
use crate::ExtractConfig;

/// One statistic cell as decoded for an entity: its raw text and the
/// severity band derived from its classes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatValue {
    pub text: String,
    pub color: ColorBand,
}

/// An entity boundary and the ordered statistic block that follows it,
/// before positional slots are assigned.
#[derive(Debug, Clone)]
pub struct RawEntity {
    pub name: String,
    pub stats: Vec<StatValue>,
}

/// True for section-divider cells like "HSE West and North West": they
/// start with the region prefix but lack a recognized entity suffix.
/// Real rows such as "HSE Mid West Total" keep their suffix and pass.
pub fn is_regional_header(name: &str, config: &ExtractConfig) -> bool {
    name.starts_with(&config.region_prefix)
        && !config
            .entity_suffixes
            .iter()
            .any(|suffix| name.ends_with(suffix.as_str()))
}

/// Partition a flat cell sequence into per-entity statistic blocks.
///
/// Scans left to right. A cell opens an entity iff its span reaches
/// `boundary_min_span` and its text is non-empty. Regional headers are
/// skipped without emitting anything. After a real boundary, at most one
/// immediately-following empty spacer is consumed, then the next
/// `cells_per_entity` cells become the entity's ordered statistics
/// (stopping early if the row runs out). Everything else is
/// spacer/filler and is skipped.
pub fn decode_cells(
    cells: &[Cell],
    cells_per_entity: usize,
    config: &ExtractConfig,
) -> Vec<RawEntity> {
    let mut entities = Vec::new();
    let mut i = 0;

    while i < cells.len() {
        if !cells[i].is_entity_boundary(config.boundary_min_span) {
            i += 1;
            continue;
        }

        let name = cells[i].text.clone();
        i += 1;

        if is_regional_header(&name, config) {
            continue;
        }

        if i < cells.len() && cells[i].text.is_empty() {
            i += 1;
        }

        let mut stats = Vec::with_capacity(cells_per_entity);
        for _ in 0..cells_per_entity {
            let Some(cell) = cells.get(i) else { break };
            stats.push(StatValue {
                text: cell.text.clone(),
                color: config.colors.classify(&cell.classes),
            });
            i += 1;
        }

        entities.push(RawEntity { name, stats });
    }

    entities
}
