use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::TrolleyError;

/// Severity band encoded by the report's CSS classes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorBand {
    Green,
    Amber,
    Red,
    #[default]
    None,
}

impl ColorBand {
    /// True for the three real severity bands, false for `None`.
    pub fn is_banded(&self) -> bool {
        !matches!(self, ColorBand::None)
    }
}

impl fmt::Display for ColorBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColorBand::Green => write!(f, "green"),
            ColorBand::Amber => write!(f, "amber"),
            ColorBand::Red => write!(f, "red"),
            ColorBand::None => write!(f, "none"),
        }
    }
}

impl std::str::FromStr for ColorBand {
    type Err = TrolleyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "green" => Ok(ColorBand::Green),
            "amber" => Ok(ColorBand::Amber),
            "red" => Ok(ColorBand::Red),
            "none" | "" => Ok(ColorBand::None),
            other => Err(TrolleyError::Parse(format!("unknown color band '{other}'"))),
        }
    }
}

/// One hospital (or aggregate-total) row for one report date.
///
/// Counts stay `None` when the source shows a non-numeric placeholder;
/// they are never coerced to zero. Field order is the persisted column
/// order, and exact equality across all fields is the dedup key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntityRecord {
    pub date: NaiveDate,
    pub entity_name: String,
    pub ed_count: Option<u32>,
    pub ward_count: Option<u32>,
    pub total_count: Option<u32>,
    pub total_color: ColorBand,
    pub surge_count: Option<u32>,
    pub surge_color: ColorBand,
    pub delayed_count: Option<u32>,
    pub delayed_color: ColorBand,
    pub over_24h_count: Option<u32>,
    pub over_75_24h_count: Option<u32>,
}

/// A single valid (count, color) observation for one hospital on one date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Observation {
    pub date: NaiveDate,
    pub count: u32,
    pub color: ColorBand,
}

/// Per-hospital, time-ordered observation history. Built on demand from
/// the persisted records; not itself persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservationSeries {
    pub hospital: String,
    pub observations: Vec<Observation>,
}
