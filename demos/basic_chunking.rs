//! Basic library usage example
//!
//! This example demonstrates how to use lua-rag as a library to:
//! 1. Chunk a directory of DCS Lua scripts
//! 2. Inspect the extracted chunks
//! 3. Write them as JSON Lines for an embedding pipeline
//!
//! Run with: cargo run --example basic_chunking -- /path/to/scripts

use lua_rag::config::Config;
use lua_rag::{export, indexer};
use std::env;
use std::path::Path;

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    // Get scripts path from command line
    let scripts_dir = env::args().nth(1).unwrap_or_else(|| ".".to_string());

    println!("=== lua-rag - Basic Chunking Example ===\n");

    let config = Config::default();
    let run = indexer::chunk_directory(&config, Path::new(&scripts_dir), None)?;

    println!(
        "Chunked {} files into {} chunks in {} ms\n",
        run.summary.files_processed, run.summary.chunks_created, run.summary.duration_ms
    );

    for chunk in run.chunks.iter().take(10) {
        println!(
            "[{}] {} lines {}-{} ({})",
            chunk.id, chunk.file_path, chunk.line_start, chunk.line_end, chunk.chunk_type
        );
        if let Some(name) = &chunk.metadata.name {
            println!("    name: {}", name);
        }
    }
    if run.chunks.len() > 10 {
        println!("... and {} more", run.chunks.len() - 10);
    }

    // Hand the full set to the embedding pipeline as JSON Lines
    export::write_jsonl_file(Path::new("chunks.jsonl"), &run.chunks)?;
    println!("\nWrote chunks.jsonl");

    Ok(())
}
