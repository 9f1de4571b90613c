//! Compositions: ratios between the three unit classes (infantry, ranged,
//! cavalry) parsed from free-form text lines such as `"7 11 2"` or `"208"`.

mod parser;

pub use parser::{parse_compositions, LineShape, LINE_SHAPES};

use serde::{Deserialize, Serialize};

/// Tolerance used when checking that ratios sum to one.
pub const RATIO_EPSILON: f64 = 1e-9;

/// Normalized share of each unit class. Components are non-negative and sum to 1.0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ratios {
    pub inf: f64,
    pub rng: f64,
    pub cav: f64,
}

impl Ratios {
    /// Normalize raw parts. Returns None when the parts sum to zero.
    pub fn from_parts(inf: f64, rng: f64, cav: f64) -> Option<Self> {
        let total = inf + rng + cav;
        if total == 0.0 || !total.is_finite() {
            return None;
        }
        Some(Self {
            inf: inf / total,
            rng: rng / total,
            cav: cav / total,
        })
    }

    pub fn sum(&self) -> f64 {
        self.inf + self.rng + self.cav
    }

    pub fn is_normalized(&self) -> bool {
        self.inf >= 0.0
            && self.rng >= 0.0
            && self.cav >= 0.0
            && (self.sum() - 1.0).abs() <= RATIO_EPSILON
    }
}

/// One valid composition line after parsing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompositionRatio {
    /// `custom-{line_index}`, unique within a single parse.
    pub id: String,
    /// Trimmed input line, upper-cased.
    pub label: String,
    pub ratios: Ratios,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_parts_normalizes() {
        let ratios = Ratios::from_parts(7.0, 11.0, 2.0).expect("non-zero total");
        assert!((ratios.inf - 0.35).abs() < RATIO_EPSILON);
        assert!((ratios.rng - 0.55).abs() < RATIO_EPSILON);
        assert!((ratios.cav - 0.10).abs() < RATIO_EPSILON);
        assert!(ratios.is_normalized());
    }

    #[test]
    fn from_parts_rejects_zero_total() {
        assert_eq!(Ratios::from_parts(0.0, 0.0, 0.0), None);
    }
}
