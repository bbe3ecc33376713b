use anyhow::Result;
use clap::Parser;
use lua_rag::config::Config;
use lua_rag::{export, indexer};
use std::path::PathBuf;

/// Chunk DCS World Lua scripts into semantic units for RAG embedding
#[derive(Parser, Debug)]
#[command(name = "lua-rag", version, about)]
struct Cli {
    /// Directory containing Lua files to process
    #[arg(long)]
    dir: PathBuf,

    /// Process only this specific file
    #[arg(long)]
    file: Option<PathBuf>,

    /// Limit the number of files to process (for testing)
    #[arg(long)]
    limit: Option<usize>,

    /// Substring pattern for paths to exclude (repeatable)
    #[arg(long)]
    exclude: Vec<String>,

    /// Write chunks to this JSONL file instead of stdout
    #[arg(long)]
    out: Option<PathBuf>,

    /// Path to a TOML config file
    #[arg(long, env = "LUA_RAG_CONFIG")]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let mut config = Config::load(cli.config.as_deref())?;
    config
        .indexing
        .exclude_patterns
        .extend(cli.exclude.iter().cloned());

    tracing::info!(
        "Chunking for embedding backend '{}' (model '{}')",
        config.embedding.backend,
        config.embedding.model
    );

    let chunks = match &cli.file {
        Some(file) => {
            tracing::info!("Processing single file: {}", file.display());
            indexer::chunk_file(file)?
        }
        None => {
            let run = indexer::chunk_directory(&config, &cli.dir, cli.limit)?;
            for error in &run.summary.errors {
                tracing::warn!("Skipped file: {}", error);
            }
            run.chunks
        }
    };

    match &cli.out {
        Some(path) => export::write_jsonl_file(path, &chunks)?,
        None => export::write_jsonl(&mut std::io::stdout().lock(), &chunks)?,
    }

    tracing::info!("Processing complete");
    Ok(())
}
