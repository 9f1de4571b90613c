//! Allocation: split a fill total across two tiers and three unit classes.
//!
//! Counts are kept as raw `f64` values. Rounding for display lives in
//! [crate::format] and never feeds back into these results.

pub mod presets;

pub use presets::{
    find_preset, is_fill_option, TierSplitConfig, DEFAULT_FILL_TOTAL, DEFAULT_PRESET_ID,
    FILL_OPTIONS, TIER_SPLIT_PRESETS,
};

use serde::Serialize;

use crate::composition::{CompositionRatio, Ratios};

/// Troop counts for one tier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct TierCounts {
    pub inf: f64,
    pub rng: f64,
    pub cav: f64,
}

impl TierCounts {
    fn from_budget(budget: f64, ratios: &Ratios) -> Self {
        Self {
            inf: budget * ratios.inf,
            rng: budget * ratios.rng,
            cav: budget * ratios.cav,
        }
    }

    pub fn total(&self) -> f64 {
        self.inf + self.rng + self.cav
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct AllocationResult {
    /// T5 troops.
    pub high_tier: TierCounts,
    /// T4 troops.
    pub low_tier: TierCounts,
}

impl AllocationResult {
    pub fn total(&self) -> f64 {
        self.high_tier.total() + self.low_tier.total()
    }
}

/// Split `fill_total` by the preset's tier percentages, then each tier by the composition's ratios.
pub fn allocate(
    composition: &CompositionRatio,
    fill_total: u64,
    config: &TierSplitConfig,
) -> AllocationResult {
    let fill = fill_total as f64;
    let high_budget = fill * config.high_tier_percent;
    let low_budget = fill * config.low_tier_percent;

    AllocationResult {
        high_tier: TierCounts::from_budget(high_budget, &composition.ratios),
        low_tier: TierCounts::from_budget(low_budget, &composition.ratios),
    }
}

/// [allocate] over every composition, in order.
pub fn allocate_all(
    compositions: &[CompositionRatio],
    fill_total: u64,
    config: &TierSplitConfig,
) -> Vec<AllocationResult> {
    compositions
        .iter()
        .map(|composition| allocate(composition, fill_total, config))
        .collect()
}
