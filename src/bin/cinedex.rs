//! Cinedex CLI binary.

use std::process;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use cinedex::cli::{CinedexArgs, execute_command};

#[tokio::main]
async fn main() {
    let args = CinedexArgs::parse();

    let level = match args.verbosity() {
        0 => "error",
        1 => "warn",
        2 => "info",
        _ => "debug",
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)))
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = execute_command(args).await {
        eprintln!("Error: {e}");
        process::exit(if e.is_client_error() { 2 } else { 1 });
    }
}
