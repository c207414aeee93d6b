use scraper::{Html, Selector};

use super::Cell;
use crate::error::TrolleyError;

/// Flatten the first table in the markup into rows of `Cell`s.
///
/// Fails with `NoTableFound` when the document has no table element;
/// callers surface that as "no data for this date", never as an empty
/// result set.
pub fn table_rows(markup: &str) -> Result<Vec<Vec<Cell>>, TrolleyError> {
    let document = Html::parse_document(markup);
    let table_sel = selector("table")?;
    let row_sel = selector("tr")?;
    let cell_sel = selector("td, th")?;

    let table = document
        .select(&table_sel)
        .next()
        .ok_or(TrolleyError::NoTableFound)?;

    let mut rows = Vec::new();
    for row in table.select(&row_sel) {
        let cells = row
            .select(&cell_sel)
            .map(|cell| Cell {
                text: normalize_text(cell.text()),
                span: cell
                    .value()
                    .attr("colspan")
                    .and_then(|v| v.trim().parse().ok())
                    .unwrap_or(1),
                classes: cell.value().classes().map(str::to_string).collect(),
                width: cell.value().attr("width").map(str::to_string),
            })
            .collect();
        rows.push(cells);
    }
    Ok(rows)
}

fn selector(css: &str) -> Result<Selector, TrolleyError> {
    Selector::parse(css).map_err(|e| TrolleyError::Parse(format!("invalid selector '{css}': {e}")))
}

/// Join text fragments and collapse runs of whitespace, matching how
/// the source's nested markup renders a single visible string.
fn normalize_text<'a>(fragments: impl Iterator<Item = &'a str>) -> String {
    let joined: String = fragments.collect();
    joined.split_whitespace().collect::<Vec<_>>().join(" ")
}
