//! MOSMIX Processor CLI entry point

use std::process;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use mosmix_processor::cli::{args::Args, commands};

fn main() {
    let args = Args::parse();
    init_logging(args.get_log_level());

    if let Err(error) = commands::run(args) {
        eprintln!("Error: {:#}", anyhow::Error::new(error));
        process::exit(1);
    }
}

/// Logging goes to stderr so station tables on stdout stay clean.
fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("mosmix_processor={level}")));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
