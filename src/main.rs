use std::env;
use std::process;

use tracing_subscriber::EnvFilter;

use artifactor::cli::run_with_args;

const LOG_ENV: &str = "ARTIFACTOR_LOG";

fn init_tracing() {
    let env_filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    init_tracing();
    let args: Vec<String> = env::args().collect();
    process::exit(run_with_args(&args));
}
