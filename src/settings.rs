//! Planner settings: the composition text, fill total and tier-split preset
//! the front end works with. Built-in defaults double as the "reset" state.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::allocation::{
    find_preset, is_fill_option, TierSplitConfig, DEFAULT_FILL_TOTAL, DEFAULT_PRESET_ID,
};
use crate::error::SettingsError;

/// Seed composition text shown on first load and after a reset.
pub const DEFAULT_INPUT: &str = "569\n7 11 2\n208";

/// Environment variable naming a settings file for the CLI.
pub const SETTINGS_PATH_ENV: &str = "TROOPFILL_SETTINGS";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlannerSettings {
    #[serde(default = "default_input")]
    pub input: String,
    #[serde(default = "default_fill_total")]
    pub fill_total: u64,
    #[serde(default = "default_preset")]
    pub preset: String,
}

fn default_input() -> String {
    DEFAULT_INPUT.to_string()
}

fn default_fill_total() -> u64 {
    DEFAULT_FILL_TOTAL
}

fn default_preset() -> String {
    DEFAULT_PRESET_ID.to_string()
}

impl Default for PlannerSettings {
    fn default() -> Self {
        Self {
            input: default_input(),
            fill_total: default_fill_total(),
            preset: default_preset(),
        }
    }
}

impl PlannerSettings {
    /// Restore the seed input, fill total and preset.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Check the fill total and preset against the fixed option tables.
    pub fn validate(&self) -> Result<(), SettingsError> {
        self.resolve_preset()?;
        if !is_fill_option(self.fill_total) {
            return Err(SettingsError::UnsupportedFillTotal(self.fill_total));
        }
        Ok(())
    }

    pub fn resolve_preset(&self) -> Result<&'static TierSplitConfig, SettingsError> {
        find_preset(&self.preset).ok_or_else(|| SettingsError::UnknownPreset(self.preset.clone()))
    }
}

/// Load and validate settings from a YAML (`.yaml`/`.yml`) or JSON file. Missing keys take defaults.
pub fn load_settings(path: impl AsRef<Path>) -> Result<PlannerSettings, SettingsError> {
    let settings = read_settings(path)?;
    settings.validate()?;
    Ok(settings)
}

/// Like [load_settings] but without checking the option tables, for callers
/// that apply overrides first and validate the result.
pub fn read_settings(path: impl AsRef<Path>) -> Result<PlannerSettings, SettingsError> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path).map_err(|source| SettingsError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let is_yaml = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"));
    let settings = if is_yaml {
        parse_yaml_settings(&raw)?
    } else {
        serde_json::from_str(&raw)?
    };
    Ok(settings)
}

fn parse_yaml_settings(raw: &str) -> Result<PlannerSettings, SettingsError> {
    // An empty YAML document deserializes as null rather than an empty mapping.
    if raw.trim().is_empty() {
        return Ok(PlannerSettings::default());
    }
    Ok(serde_yaml::from_str(raw)?)
}
