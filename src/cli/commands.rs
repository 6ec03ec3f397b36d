//! CLI command execution.

use std::fs;
use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;

use uuid::Uuid;

use crate::cli::args::{CinedexArgs, Command, DeleteArgs, GetArgs, IngestArgs, SearchArgs};
use crate::document::MovieDocument;
use crate::embedding::HashingEmbedder;
use crate::error::{CinedexError, Result};
use crate::ingest::ingest_documents;
use crate::request::{SearchMode, SearchRequest};
use crate::service::MovieService;
use crate::store::{DocumentStore, MemoryDocumentStore};

/// Execute the parsed command.
pub async fn execute_command(args: CinedexArgs) -> Result<()> {
    match &args.command {
        Command::Ingest(ingest_args) => execute_ingest(ingest_args, &args),
        Command::Search(search_args) => execute_search(search_args, &args).await,
        Command::Get(get_args) => execute_get(get_args, &args),
        Command::Delete(delete_args) => execute_delete(delete_args),
    }
}

fn open_store(path: &Path) -> Result<MemoryDocumentStore> {
    if path.exists() {
        MemoryDocumentStore::load_json(path)
    } else {
        Ok(MemoryDocumentStore::new())
    }
}

fn parse_id(raw: &str) -> Result<Uuid> {
    Uuid::parse_str(raw)
        .map_err(|_| CinedexError::invalid_argument(format!("malformed document id: {raw}")))
}

fn print_json<T: serde::Serialize>(value: &T, pretty: bool) -> Result<()> {
    let output = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{output}");
    Ok(())
}

fn execute_ingest(args: &IngestArgs, global: &CinedexArgs) -> Result<()> {
    let data = fs::read_to_string(&args.input)?;
    let documents: Vec<MovieDocument> = serde_json::from_str(&data)?;

    let store = open_store(&args.store)?;
    let embedder = HashingEmbedder::new_default();

    let stats = ingest_documents(&store, &embedder, documents, args.limit)?;
    store.save_json(&args.store)?;

    print_json(&stats, global.pretty)
}

async fn execute_search(args: &SearchArgs, global: &CinedexArgs) -> Result<()> {
    // Mode arrives as a free-form string; an unknown one is a client error.
    let mode = SearchMode::from_str(&args.mode)?;

    let mut request = SearchRequest::new(args.query.clone())
        .with_top_k(args.top_k)
        .with_mode(mode);
    if let Some(year) = args.year_gt {
        request = request.with_year_gt(year);
    }
    if let Some(genre) = &args.genre {
        request = request.with_genre(genre.clone());
    }

    let store = Arc::new(MemoryDocumentStore::load_json(&args.store)?);
    let embedder = Arc::new(HashingEmbedder::new_default());
    let service = MovieService::new(store, embedder);

    let results = service.search(&request).await?;
    if results.is_empty() {
        eprintln!("No results found");
        return Ok(());
    }

    print_json(&results, global.pretty)
}

fn execute_get(args: &GetArgs, global: &CinedexArgs) -> Result<()> {
    let id = parse_id(&args.id)?;
    let store = MemoryDocumentStore::load_json(&args.store)?;

    match store.find_one(id)? {
        Some(doc) => print_json(&doc, global.pretty),
        None => Err(CinedexError::not_found(format!("movie {id}"))),
    }
}

fn execute_delete(args: &DeleteArgs) -> Result<()> {
    let id = parse_id(&args.id)?;
    let store = MemoryDocumentStore::load_json(&args.store)?;

    if store.delete_one(id)? == 0 {
        return Err(CinedexError::not_found(format!("movie {id}")));
    }
    store.save_json(&args.store)?;
    println!("Movie deleted");
    Ok(())
}
