use serde::{Deserialize, Serialize};

use crate::model::{ColorBand, Observation};

/// Supporting statistics for one severity band's observed values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BandStats {
    pub min: Option<u32>,
    pub max: Option<u32>,
    pub count: usize,
}

impl BandStats {
    fn from_values(values: &[u32]) -> Self {
        BandStats {
            min: values.iter().min().copied(),
            max: values.iter().max().copied(),
            count: values.len(),
        }
    }
}

/// Inferred band boundaries for one hospital, with the per-band
/// statistics they were derived from. Undetermined boundaries stay
/// `None`; they are never fabricated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThresholdEstimate {
    pub hospital: String,
    pub green: BandStats,
    pub amber: BandStats,
    pub red: BandStats,
    pub amber_threshold: Option<u32>,
    pub red_threshold: Option<u32>,
}

impl ThresholdEstimate {
    /// Derive band boundaries from one hospital's observation history.
    ///
    /// The green→amber boundary needs both sides observed:
    /// `min(green_max + 1, amber_min)`. The amber→red boundary uses
    /// `min(amber_max + 1, red_min)` when the amber band is itself
    /// anchored, and falls back to `red_min` alone otherwise; an
    /// unanchored band's upper edge is not trusted to place the next
    /// boundary. A boundary is never placed below the lowest value
    /// observed with the higher-severity color.
    pub fn compute(hospital: &str, observations: &[Observation]) -> ThresholdEstimate {
        let by_color = |band: ColorBand| -> Vec<u32> {
            observations
                .iter()
                .filter(|o| o.color == band)
                .map(|o| o.count)
                .collect()
        };

        let green = BandStats::from_values(&by_color(ColorBand::Green));
        let amber = BandStats::from_values(&by_color(ColorBand::Amber));
        let red = BandStats::from_values(&by_color(ColorBand::Red));

        let amber_threshold = match (green.max, amber.min) {
            (Some(green_max), Some(amber_min)) => Some((green_max + 1).min(amber_min)),
            _ => None,
        };

        let red_threshold = match (amber_threshold, amber.max, red.min) {
            (Some(_), Some(amber_max), Some(red_min)) => Some((amber_max + 1).min(red_min)),
            (_, _, Some(red_min)) => Some(red_min),
            _ => None,
        };

        // Contradictory observations can invert the pair; the ordinal
        // ordering amber <= red always holds in the output.
        let red_threshold = match (amber_threshold, red_threshold) {
            (Some(amber_at), Some(red_at)) if red_at < amber_at => Some(amber_at),
            (_, red_at) => red_at,
        };

        ThresholdEstimate {
            hospital: hospital.to_string(),
            green,
            amber,
            red,
            amber_threshold,
            red_threshold,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn obs(count: u32, color: ColorBand) -> Observation {
        Observation {
            date: NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
            count,
            color,
        }
    }

    #[test]
    fn bracketed_amber_boundary() {
        let estimate = ThresholdEstimate::compute(
            "X",
            &[obs(10, ColorBand::Green), obs(11, ColorBand::Amber)],
        );
        assert_eq!(estimate.amber_threshold, Some(11));
        assert_eq!(estimate.red_threshold, None);
        assert_eq!(estimate.green.max, Some(10));
        assert_eq!(estimate.amber.min, Some(11));
    }

    #[test]
    fn amber_min_tightens_green_bound() {
        // Green seen up to 12, amber first seen at 11: the boundary is
        // the lower of green_max+1 and amber_min.
        let estimate = ThresholdEstimate::compute(
            "X",
            &[
                obs(12, ColorBand::Green),
                obs(11, ColorBand::Amber),
                obs(20, ColorBand::Amber),
            ],
        );
        assert_eq!(estimate.amber_threshold, Some(11));
    }

    #[test]
    fn amber_without_green_is_undetermined() {
        let estimate = ThresholdEstimate::compute(
            "X",
            &[
                obs(15, ColorBand::Amber),
                obs(20, ColorBand::Amber),
                obs(30, ColorBand::Red),
            ],
        );
        assert_eq!(estimate.amber_threshold, None);
        // Unanchored amber does not place the red boundary; only the
        // lowest observed red does.
        assert_eq!(estimate.red_threshold, Some(30));
    }

    #[test]
    fn fully_bracketed_red_boundary() {
        let estimate = ThresholdEstimate::compute(
            "X",
            &[
                obs(10, ColorBand::Green),
                obs(15, ColorBand::Amber),
                obs(20, ColorBand::Amber),
                obs(30, ColorBand::Red),
            ],
        );
        assert_eq!(estimate.amber_threshold, Some(11));
        assert_eq!(estimate.red_threshold, Some(21));
    }

    #[test]
    fn red_alone_keeps_its_min() {
        let estimate = ThresholdEstimate::compute("X", &[obs(40, ColorBand::Red)]);
        assert_eq!(estimate.amber_threshold, None);
        assert_eq!(estimate.red_threshold, Some(40));
    }

    #[test]
    fn green_alone_is_fully_undetermined() {
        let estimate =
            ThresholdEstimate::compute("X", &[obs(3, ColorBand::Green), obs(5, ColorBand::Green)]);
        assert_eq!(estimate.amber_threshold, None);
        assert_eq!(estimate.red_threshold, None);
    }

    #[test]
    fn uncolored_observations_ignored() {
        let estimate = ThresholdEstimate::compute(
            "X",
            &[
                obs(10, ColorBand::Green),
                obs(99, ColorBand::None),
                obs(11, ColorBand::Amber),
            ],
        );
        assert_eq!(estimate.amber_threshold, Some(11));
        assert_eq!(estimate.amber.count, 1);
    }

    #[test]
    fn thresholds_stay_ordered_under_contradictory_data() {
        // A red value below the amber band would invert the pair.
        let estimate = ThresholdEstimate::compute(
            "X",
            &[
                obs(10, ColorBand::Green),
                obs(15, ColorBand::Amber),
                obs(5, ColorBand::Red),
            ],
        );
        let amber_at = estimate.amber_threshold.unwrap();
        let red_at = estimate.red_threshold.unwrap();
        assert!(amber_at <= red_at);
    }
}
