//! Troop allocation planner.
//!
//! Composition lines such as `"7 11 2"` or `"208"` are parsed into
//! infantry/ranged/cavalry ratios ([composition]), then a fill total is split
//! across the T5/T4 tiers by a fixed preset and across unit classes by those
//! ratios ([allocation]).

pub mod allocation;
pub mod cli;
pub mod composition;
pub mod error;
pub mod format;
pub mod report;
pub mod settings;

pub use allocation::{allocate, AllocationResult, TierCounts, TierSplitConfig};
pub use composition::{parse_compositions, CompositionRatio, Ratios};
