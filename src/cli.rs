use std::env;
use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing::info;

use crate::allocation::{DEFAULT_FILL_TOTAL, DEFAULT_PRESET_ID, FILL_OPTIONS, TIER_SPLIT_PRESETS};
use crate::composition::{parse_compositions, CompositionRatio};
use crate::error::{CliError, ReportError, SettingsError};
use crate::report::{build_breakdown, render_table, to_json, write_csv, EMPTY_NOTICE};
use crate::settings::{read_settings, PlannerSettings, SETTINGS_PATH_ENV};

/// Troop allocation planner: split a fill total across tiers and unit classes.
#[derive(Debug, Parser)]
#[command(name = "troopfill", version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Parse compositions and print the per-tier, per-class breakdown
    Plan(PlanArgs),
    /// Parse compositions and print the normalized ratios
    Parse(ParseArgs),
    /// List tier-split presets and fill options
    Presets,
    /// Print the default (reset) settings as YAML
    Defaults,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
    Csv,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ParseFormat {
    Table,
    Json,
}

#[derive(Debug, Args)]
pub struct PlanArgs {
    /// Composition file, or `-` for stdin. Defaults to the settings input
    pub input: Option<String>,

    /// Total troops per composition (150000, 200000 or 300000)
    #[arg(long)]
    pub fill: Option<u64>,

    /// Tier split preset (80/20, 90/10 or 100/0)
    #[arg(long)]
    pub preset: Option<String>,

    /// YAML or JSON settings file (falls back to $TROOPFILL_SETTINGS)
    #[arg(long)]
    pub settings: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,
}

#[derive(Debug, Args)]
pub struct ParseArgs {
    /// Composition file, or `-` for stdin. Defaults to the settings input
    pub input: Option<String>,

    /// YAML or JSON settings file (falls back to $TROOPFILL_SETTINGS)
    #[arg(long)]
    pub settings: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = ParseFormat::Table)]
    pub format: ParseFormat,
}

pub fn parse_command(args: &[String]) -> Result<Command, clap::Error> {
    Cli::try_parse_from(args).map(|cli| cli.command)
}

pub fn run_with_args(args: &[String]) -> i32 {
    let command = match parse_command(args) {
        Ok(command) => command,
        Err(err) => {
            let code = if err.use_stderr() { 2 } else { 0 };
            let _ = err.print();
            return code;
        }
    };

    let outcome = match command {
        Command::Plan(plan) => handle_plan(plan),
        Command::Parse(parse) => handle_parse(parse),
        Command::Presets => handle_presets(),
        Command::Defaults => handle_defaults(),
    };

    match outcome {
        Ok(()) => 0,
        Err(err) => {
            eprintln!("error: {err}");
            1
        }
    }
}

fn handle_plan(args: PlanArgs) -> Result<(), CliError> {
    let mut settings = resolve_settings(args.settings)?;
    if let Some(source) = args.input.as_deref() {
        settings.input = read_input(source)?;
    }
    if let Some(fill) = args.fill {
        settings.fill_total = fill;
    }
    if let Some(preset) = args.preset {
        settings.preset = preset;
    }

    let breakdown = build_breakdown(&settings)?;
    info!(
        compositions = breakdown.compositions.len(),
        fill_total = breakdown.fill_total,
        preset = breakdown.preset.id,
        "plan computed"
    );

    match args.format {
        OutputFormat::Table => print!("{}", render_table(&breakdown)),
        OutputFormat::Json => println!("{}", to_json(&breakdown)?),
        OutputFormat::Csv => write_csv(&breakdown, io::stdout().lock())?,
    }
    Ok(())
}

fn handle_parse(args: ParseArgs) -> Result<(), CliError> {
    let input = match args.input.as_deref() {
        Some(source) => read_input(source)?,
        None => resolve_settings(args.settings)?.input,
    };
    let compositions = parse_compositions(&input);
    info!(compositions = compositions.len(), "input parsed");

    match args.format {
        ParseFormat::Table => print!("{}", render_ratio_table(&compositions)),
        ParseFormat::Json => {
            let payload = serde_json::to_string_pretty(&compositions).map_err(ReportError::from)?;
            println!("{payload}");
        }
    }
    Ok(())
}

fn handle_presets() -> Result<(), CliError> {
    let payload = serde_json::to_string_pretty(&serde_json::json!({
        "presets": TIER_SPLIT_PRESETS,
        "fill_options": FILL_OPTIONS,
        "default_preset": DEFAULT_PRESET_ID,
        "default_fill_total": DEFAULT_FILL_TOTAL,
    }))
    .map_err(ReportError::from)?;
    println!("{payload}");
    Ok(())
}

fn handle_defaults() -> Result<(), CliError> {
    let payload = serde_yaml::to_string(&PlannerSettings::default())
        .map_err(SettingsError::from)?;
    print!("{payload}");
    Ok(())
}

fn render_ratio_table(compositions: &[CompositionRatio]) -> String {
    if compositions.is_empty() {
        return format!("{EMPTY_NOTICE}\n");
    }
    let mut out = String::from("id\tlabel\tinf\trng\tcav\n");
    for composition in compositions {
        out.push_str(&format!(
            "{}\t{}\t{:.4}\t{:.4}\t{:.4}\n",
            composition.id,
            composition.label,
            composition.ratios.inf,
            composition.ratios.rng,
            composition.ratios.cav
        ));
    }
    out
}

/// Explicit `--settings` path, then `$TROOPFILL_SETTINGS`, then built-in defaults.
/// Option tables are checked later, after command-line overrides are applied.
fn resolve_settings(explicit: Option<PathBuf>) -> Result<PlannerSettings, CliError> {
    let path = explicit.or_else(|| env::var_os(SETTINGS_PATH_ENV).map(PathBuf::from));
    match path {
        Some(path) => {
            info!(path = %path.display(), "loading settings");
            Ok(read_settings(path)?)
        }
        None => Ok(PlannerSettings::default()),
    }
}

fn read_input(source: &str) -> Result<String, CliError> {
    if source == "-" {
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .map_err(|source| CliError::Input {
                path: "<stdin>".to_string(),
                source,
            })?;
        return Ok(buffer);
    }
    fs::read_to_string(source).map_err(|err| CliError::Input {
        path: source.to_string(),
        source: err,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn parses_plan_flags() {
        let command = parse_command(&args(&[
            "troopfill", "plan", "comps.txt", "--fill", "300000", "--preset", "80/20", "--format", "csv",
        ]))
        .expect("valid command");
        let Command::Plan(plan) = command else {
            panic!("expected plan command");
        };
        assert_eq!(plan.input.as_deref(), Some("comps.txt"));
        assert_eq!(plan.fill, Some(300_000));
        assert_eq!(plan.preset.as_deref(), Some("80/20"));
        assert_eq!(plan.format, OutputFormat::Csv);
    }

    #[test]
    fn unknown_command_is_usage_error() {
        assert!(parse_command(&args(&["troopfill", "serve"])).is_err());
        assert_eq!(run_with_args(&args(&["troopfill"])), 2);
    }

    #[test]
    fn ratio_table_lists_each_composition() {
        let table = render_ratio_table(&parse_compositions("7 11 2\n\n208"));
        assert_eq!(
            table,
            "id\tlabel\tinf\trng\tcav\ncustom-0\t7 11 2\t0.3500\t0.5500\t0.1000\ncustom-2\t208\t0.2000\t0.0000\t0.8000\n"
        );
        assert_eq!(render_ratio_table(&[]), format!("{EMPTY_NOTICE}\n"));
    }
}
