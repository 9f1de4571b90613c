//! Breakdown report: every parsed composition paired with its allocation,
//! rendered as a text table, JSON or CSV.

use std::fmt::Write as _;
use std::io;

use serde::Serialize;

use crate::allocation::{allocate, AllocationResult, TierCounts, TierSplitConfig};
use crate::composition::{parse_compositions, CompositionRatio, Ratios};
use crate::error::{ReportError, SettingsError};
use crate::format::format_count;
use crate::settings::PlannerSettings;

pub const EMPTY_NOTICE: &str = "No valid compositions found. Check your input format.";

#[derive(Debug, Clone, Serialize)]
pub struct CompositionBreakdown {
    pub id: String,
    pub label: String,
    pub ratios: Ratios,
    pub allocation: AllocationResult,
}

#[derive(Debug, Clone, Serialize)]
pub struct Breakdown {
    pub fill_total: u64,
    pub preset: TierSplitConfig,
    pub compositions: Vec<CompositionBreakdown>,
}

impl Breakdown {
    pub fn from_parts(
        compositions: Vec<CompositionRatio>,
        fill_total: u64,
        preset: &TierSplitConfig,
    ) -> Self {
        let compositions = compositions
            .into_iter()
            .map(|composition| {
                let allocation = allocate(&composition, fill_total, preset);
                CompositionBreakdown {
                    id: composition.id,
                    label: composition.label,
                    ratios: composition.ratios,
                    allocation,
                }
            })
            .collect();
        Self {
            fill_total,
            preset: *preset,
            compositions,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.compositions.is_empty()
    }
}

/// Parse the settings' input and allocate each composition with its fill total and preset.
pub fn build_breakdown(settings: &PlannerSettings) -> Result<Breakdown, SettingsError> {
    settings.validate()?;
    let preset = settings.resolve_preset()?;
    let compositions = parse_compositions(&settings.input);
    Ok(Breakdown::from_parts(compositions, settings.fill_total, preset))
}

fn write_tier_row(out: &mut String, tier: &str, counts: &TierCounts) {
    let _ = writeln!(
        out,
        "{tier:<4}{:>10}{:>10}{:>10}",
        format_count(counts.inf),
        format_count(counts.rng),
        format_count(counts.cav)
    );
}

/// Human-readable table with display-formatted counts.
pub fn render_table(breakdown: &Breakdown) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Troops: fill {}, split {}",
        format_count(breakdown.fill_total as f64),
        breakdown.preset.label
    );

    if breakdown.is_empty() {
        let _ = writeln!(out, "\n{EMPTY_NOTICE}");
        return out;
    }

    for entry in &breakdown.compositions {
        let _ = writeln!(out, "\n{}", entry.label);
        let _ = writeln!(out, "{:<4}{:>10}{:>10}{:>10}", "", "Inf", "Rng", "Cav");
        write_tier_row(&mut out, "T5", &entry.allocation.high_tier);
        write_tier_row(&mut out, "T4", &entry.allocation.low_tier);
    }
    out
}

/// Pretty JSON with raw, unrounded counts.
pub fn to_json(breakdown: &Breakdown) -> Result<String, ReportError> {
    Ok(serde_json::to_string_pretty(breakdown)?)
}

#[derive(Debug, Serialize)]
struct CsvRow<'a> {
    id: &'a str,
    label: &'a str,
    tier: &'static str,
    inf: f64,
    rng: f64,
    cav: f64,
}

impl<'a> CsvRow<'a> {
    fn new(entry: &'a CompositionBreakdown, tier: &'static str, counts: &TierCounts) -> Self {
        Self {
            id: &entry.id,
            label: &entry.label,
            tier,
            inf: counts.inf,
            rng: counts.rng,
            cav: counts.cav,
        }
    }
}

/// One CSV row per composition and tier: `id,label,tier,inf,rng,cav`.
pub fn write_csv<W: io::Write>(breakdown: &Breakdown, writer: W) -> Result<(), ReportError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    if breakdown.is_empty() {
        csv_writer.write_record(["id", "label", "tier", "inf", "rng", "cav"])?;
    }
    for entry in &breakdown.compositions {
        csv_writer.serialize(CsvRow::new(entry, "T5", &entry.allocation.high_tier))?;
        csv_writer.serialize(CsvRow::new(entry, "T4", &entry.allocation.low_tier))?;
    }
    csv_writer.flush()?;
    Ok(())
}
