//! Fixed option tables: tier-split presets and fill totals.

use serde::Serialize;

/// How a fill total divides between the high (T5) and low (T4) tiers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TierSplitConfig {
    pub id: &'static str,
    pub label: &'static str,
    pub high_tier_percent: f64,
    pub low_tier_percent: f64,
}

pub const TIER_SPLIT_PRESETS: [TierSplitConfig; 3] = [
    TierSplitConfig {
        id: "80/20",
        label: "80/20",
        high_tier_percent: 0.8,
        low_tier_percent: 0.2,
    },
    TierSplitConfig {
        id: "90/10",
        label: "90/10",
        high_tier_percent: 0.9,
        low_tier_percent: 0.1,
    },
    TierSplitConfig {
        id: "100/0",
        label: "100/0",
        high_tier_percent: 1.0,
        low_tier_percent: 0.0,
    },
];

pub const FILL_OPTIONS: [u64; 3] = [150_000, 200_000, 300_000];

pub const DEFAULT_PRESET_ID: &str = "90/10";
pub const DEFAULT_FILL_TOTAL: u64 = 200_000;

/// Look up a preset by id (`"80/20"`, `"90/10"`, `"100/0"`).
pub fn find_preset(id: &str) -> Option<&'static TierSplitConfig> {
    TIER_SPLIT_PRESETS.iter().find(|preset| preset.id == id.trim())
}

pub fn is_fill_option(value: u64) -> bool {
    FILL_OPTIONS.contains(&value)
}
