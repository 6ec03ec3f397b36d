//! Command line argument parsing using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Cinedex - hybrid search over a movie document store
#[derive(Parser, Debug, Clone)]
#[command(name = "cinedex")]
#[command(about = "Hybrid vector and full-text search over movie documents")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct CinedexArgs {
    /// Verbosity level (repeat for more detail)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long)]
    pub quiet: bool,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl CinedexArgs {
    /// Get the effective verbosity level.
    pub fn verbosity(&self) -> u8 {
        if self.quiet { 0 } else { self.verbose }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Ingest movie documents from a JSON file into a store snapshot
    #[command(name = "ingest")]
    Ingest(IngestArgs),

    /// Search a store snapshot
    #[command(name = "search")]
    Search(SearchArgs),

    /// Fetch a single movie document by id
    #[command(name = "get")]
    Get(GetArgs),

    /// Delete a movie document by id
    #[command(name = "delete")]
    Delete(DeleteArgs),
}

/// Arguments for the ingest command
#[derive(Args, Debug, Clone)]
pub struct IngestArgs {
    /// JSON file containing an array of movie documents
    pub input: PathBuf,

    /// Store snapshot file to create or extend
    #[arg(short, long)]
    pub store: PathBuf,

    /// Maximum number of source documents to process
    #[arg(short, long)]
    pub limit: Option<usize>,
}

/// Arguments for the search command
#[derive(Args, Debug, Clone)]
pub struct SearchArgs {
    /// Query text
    pub query: String,

    /// Store snapshot file
    #[arg(short, long)]
    pub store: PathBuf,

    /// Retrieval mode: vector, text or hybrid
    #[arg(short, long, default_value = "vector")]
    pub mode: String,

    /// Number of results to return
    #[arg(short = 'k', long, default_value_t = 5)]
    pub top_k: usize,

    /// Only match movies released strictly after this year
    #[arg(long)]
    pub year_gt: Option<i32>,

    /// Only match movies carrying this genre label
    #[arg(long)]
    pub genre: Option<String>,
}

/// Arguments for the get command
#[derive(Args, Debug, Clone)]
pub struct GetArgs {
    /// Movie document id
    pub id: String,

    /// Store snapshot file
    #[arg(short, long)]
    pub store: PathBuf,
}

/// Arguments for the delete command
#[derive(Args, Debug, Clone)]
pub struct DeleteArgs {
    /// Movie document id
    pub id: String,

    /// Store snapshot file
    #[arg(short, long)]
    pub store: PathBuf,
}
