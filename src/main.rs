use std::env;
use std::process;

use tracing_subscriber::EnvFilter;

/// Overrides `RUST_LOG` for this binary.
const LOG_ENV: &str = "TROOPFILL_LOG";

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    init_tracing();
    let args: Vec<String> = env::args().collect();
    process::exit(troopfill::cli::run_with_args(&args));
}
