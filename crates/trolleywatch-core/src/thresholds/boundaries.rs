use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::model::{ColorBand, Observation};

/// A proven band boundary: two same-hospital observations one unit
/// apart with different colors. These are the only boundaries known
/// with certainty; everything in `ThresholdEstimate` is inferred.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExactBoundary {
    pub hospital: String,
    pub from_color: ColorBand,
    pub from_value: u32,
    pub from_date: NaiveDate,
    pub to_color: ColorBand,
    pub to_value: u32,
    pub to_date: NaiveDate,
    pub proven: bool,
}

impl ExactBoundary {
    /// Transition label, e.g. "green→amber".
    pub fn transition(&self) -> String {
        format!("{}→{}", self.from_color, self.to_color)
    }
}

/// Scan one hospital's observations for exact single-unit boundaries.
///
/// Only observations carrying a real band participate; the sort by
/// count is stable, so equal counts keep their time order.
pub fn exact_boundaries(hospital: &str, observations: &[Observation]) -> Vec<ExactBoundary> {
    let mut colored: Vec<&Observation> = observations
        .iter()
        .filter(|o| o.color.is_banded())
        .collect();
    colored.sort_by_key(|o| o.count);

    colored
        .windows(2)
        .filter(|pair| pair[1].count - pair[0].count == 1 && pair[0].color != pair[1].color)
        .map(|pair| ExactBoundary {
            hospital: hospital.to_string(),
            from_color: pair[0].color,
            from_value: pair[0].count,
            from_date: pair[0].date,
            to_color: pair[1].color,
            to_value: pair[1].count,
            to_date: pair[1].date,
            proven: true,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn obs(day: u32, count: u32, color: ColorBand) -> Observation {
        Observation {
            date: NaiveDate::from_ymd_opt(2026, 1, day).unwrap(),
            count,
            color,
        }
    }

    #[test]
    fn one_unit_transition_is_proven() {
        let found = exact_boundaries(
            "X",
            &[obs(1, 10, ColorBand::Green), obs(2, 11, ColorBand::Amber)],
        );
        assert_eq!(found.len(), 1);
        let boundary = &found[0];
        assert_eq!(boundary.hospital, "X");
        assert_eq!(boundary.from_color, ColorBand::Green);
        assert_eq!(boundary.from_value, 10);
        assert_eq!(boundary.to_color, ColorBand::Amber);
        assert_eq!(boundary.to_value, 11);
        assert!(boundary.proven);
        assert_eq!(boundary.transition(), "green→amber");
    }

    #[test]
    fn wider_gaps_prove_nothing() {
        let found = exact_boundaries(
            "X",
            &[obs(1, 10, ColorBand::Green), obs(2, 12, ColorBand::Amber)],
        );
        assert!(found.is_empty());
    }

    #[test]
    fn same_color_neighbors_prove_nothing() {
        let found = exact_boundaries(
            "X",
            &[obs(1, 10, ColorBand::Amber), obs(2, 11, ColorBand::Amber)],
        );
        assert!(found.is_empty());
    }

    #[test]
    fn scan_sorts_by_count_not_by_date() {
        // The amber observation predates the green one; sorted by count
        // the pair is still adjacent.
        let found = exact_boundaries(
            "X",
            &[
                obs(5, 21, ColorBand::Amber),
                obs(9, 20, ColorBand::Green),
                obs(2, 35, ColorBand::Red),
            ],
        );
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].from_value, 20);
        assert_eq!(found[0].to_value, 21);
    }

    #[test]
    fn uncolored_observations_do_not_bridge() {
        // Without filtering, the none-colored 11 would sit between 10
        // and 12 and fabricate two transitions.
        let found = exact_boundaries(
            "X",
            &[
                obs(1, 10, ColorBand::Green),
                obs(2, 11, ColorBand::None),
                obs(3, 12, ColorBand::Amber),
            ],
        );
        assert!(found.is_empty());
    }
}
