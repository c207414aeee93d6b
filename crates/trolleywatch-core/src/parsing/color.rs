use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::TrolleyError;
use crate::model::ColorBand;

/// One severity band and the class-name substrings that select it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BandRule {
    pub band: ColorBand,
    pub needles: Vec<String>,
}

/// Ordered mapping from CSS class names to severity bands.
///
/// Category precedence is the order of `bands`: the first band with any
/// needle contained in any class wins, regardless of class order. The
/// mapping is configuration, not code, so upstream class-name drift is
/// handled by swapping in a different rules file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColorRules {
    pub bands: Vec<BandRule>,
}

impl Default for ColorRules {
    fn default() -> Self {
        ColorRules {
            bands: vec![
                BandRule {
                    band: ColorBand::Green,
                    needles: vec!["green".into()],
                },
                BandRule {
                    band: ColorBand::Red,
                    needles: vec!["red".into()],
                },
                BandRule {
                    band: ColorBand::Amber,
                    needles: vec!["orange".into(), "amber".into(), "yellow".into()],
                },
            ],
        }
    }
}

impl ColorRules {
    /// Map a cell's class list to a severity band.
    ///
    /// Total function: unknown or empty class lists yield `ColorBand::None`.
    pub fn classify(&self, classes: &[String]) -> ColorBand {
        for rule in &self.bands {
            let hit = classes.iter().any(|class| {
                let class = class.to_lowercase();
                rule.needles.iter().any(|needle| class.contains(needle.as_str()))
            });
            if hit {
                return rule.band;
            }
        }
        ColorBand::None
    }
}

/// Load color rules from a JSON file.
pub fn load_color_rules(path: &Path) -> Result<ColorRules, TrolleyError> {
    let content = std::fs::read_to_string(path).map_err(|e| TrolleyError::ColorRulesLoad {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    let rules: ColorRules =
        serde_json::from_str(&content).map_err(|e| TrolleyError::ColorRulesLoad {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
    validate_color_rules(&rules)?;
    Ok(rules)
}

/// Validate that a rules table is well-formed and normalize needles to
/// lowercase so matching stays case-insensitive.
pub fn validate_color_rules(rules: &ColorRules) -> Result<(), TrolleyError> {
    if rules.bands.is_empty() {
        return Err(TrolleyError::ColorRulesInvalid("bands must not be empty".into()));
    }
    for rule in &rules.bands {
        if rule.band == ColorBand::None {
            return Err(TrolleyError::ColorRulesInvalid(
                "'none' is the fallback band and cannot carry needles".into(),
            ));
        }
        if rule.needles.is_empty() {
            return Err(TrolleyError::ColorRulesInvalid(format!(
                "band '{}' has no needles",
                rule.band
            )));
        }
        if rule.needles.iter().any(|n| n.trim().is_empty()) {
            return Err(TrolleyError::ColorRulesInvalid(format!(
                "band '{}' has an empty needle",
                rule.band
            )));
        }
        if rule.needles.iter().any(|n| *n != n.to_lowercase()) {
            return Err(TrolleyError::ColorRulesInvalid(format!(
                "band '{}' needles must be lowercase",
                rule.band
            )));
        }
    }
    Ok(())
}
