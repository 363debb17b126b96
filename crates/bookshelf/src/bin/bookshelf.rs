use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use futures_util::future::join_all;
use serde::Serialize;
use tracing::Level;

use bookshelf::{
    load_or_create_config, BookService, BookshelfConfig, MemoryRankedCounter, MemoryRecordStore,
    PopularityAggregator, SearchService, ServiceError, ServiceResult,
};

#[derive(Parser)]
#[command(version, about = "Search a book catalog with '|' (or) and '-' (not) operators")]
struct Cli {
    /// JSON array of books to load
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,
    /// Directory holding bookshelf.json; created with defaults when missing
    #[arg(long, global = true)]
    config_dir: Option<PathBuf>,
    #[arg(short, long, global = true, default_value_t = false)]
    verbose: bool,
    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand)]
enum Cmd {
    /// Operator-mode search: `a|b`, `a-b` or a single keyword
    Search {
        query: String,
        #[arg(long, default_value_t = 1)]
        page: u32,
        #[arg(long)]
        size: Option<u32>,
    },
    /// Literal keyword search
    Browse {
        keyword: String,
        #[arg(long, default_value_t = 1)]
        page: u32,
        #[arg(long)]
        size: Option<u32>,
    },
    /// Show one book by ISBN
    Book { id: String },
    /// Run every line of a file as a search, then print the top keywords
    Replay { file: PathBuf },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let level = if cli.verbose { Level::DEBUG } else { Level::WARN };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            tracing::debug!("command failed: {}", error);
            match serde_json::to_string_pretty(&error.to_body()) {
                Ok(body) => eprintln!("{body}"),
                Err(_) => eprintln!("{error}"),
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> ServiceResult<()> {
    let config = match &cli.config_dir {
        Some(dir) => load_or_create_config(dir)?,
        None => BookshelfConfig::default_new(),
    };
    let store = Arc::new(match &cli.catalog {
        Some(path) => MemoryRecordStore::from_json_file(path).await?,
        None => MemoryRecordStore::new(),
    });
    let popularity = PopularityAggregator::new(
        Arc::new(MemoryRankedCounter::new()),
        config.popularity.counter_key.clone(),
        config.popularity.read_timeout(),
    );
    let search = SearchService::new(store.clone(), popularity, config);

    match cli.cmd {
        Cmd::Search { query, page, size } => {
            print_json(&search.search(Some(&query), page, size).await?)
        }
        Cmd::Browse {
            keyword,
            page,
            size,
        } => print_json(&search.browse(Some(&keyword), page, size).await?),
        Cmd::Book { id } => print_json(&BookService::new(store).book_detail(&id).await?),
        Cmd::Replay { file } => replay(&search, &file).await,
    }
}

async fn replay(search: &SearchService, file: &Path) -> ServiceResult<()> {
    let data = tokio::fs::read_to_string(file).await.map_err(|error| {
        ServiceError::Internal(format!("failed to read replay file {}: {error}", file.display()))
    })?;

    let mut recordings = Vec::new();
    for line in data.lines().filter(|line| !line.trim().is_empty()) {
        match search.search_tracked(Some(line), 1, None).await {
            Ok(outcome) => recordings.push(outcome.recording.completed()),
            Err(error) => tracing::warn!("skipping '{}': {}", line, error),
        }
    }
    join_all(recordings).await;

    print_json(&search.top_keywords().await)
}

fn print_json<T: Serialize>(value: &T) -> ServiceResult<()> {
    let output = serde_json::to_string_pretty(value)
        .map_err(|error| ServiceError::Internal(format!("failed to serialize output: {error}")))?;
    println!("{output}");
    Ok(())
}
