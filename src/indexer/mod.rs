//! Lua file discovery, parsing, and chunk extraction
//!
//! Provides functionality to walk a script directory, parse each Lua file
//! with tree-sitter, and cut it into semantically meaningful chunks for the
//! downstream embedding pipeline.

mod chunker;
mod file_walker;
mod lua_parser;

pub use chunker::extract;
pub use file_walker::{FileWalker, LuaFile};
pub use lua_parser::LuaParser;

use crate::config::Config;
use crate::error::{IndexError, RagError};
use crate::types::{Chunk, RunSummary};
use rayon::prelude::*;
use std::path::Path;
use std::time::Instant;

/// Result of chunking a whole directory
#[derive(Debug)]
pub struct DirectoryRun {
    /// All chunks across files, grouped per file in discovery order
    pub chunks: Vec<Chunk>,
    pub summary: RunSummary,
}

/// Chunk an in-memory Lua source buffer
pub fn chunk_bytes(source: &[u8], file_path: &str) -> Result<Vec<Chunk>, RagError> {
    let mut parser = LuaParser::new()?;
    let tree = parser.parse(source, file_path)?;
    Ok(extract(tree.root_node(), source, file_path)?)
}

/// Chunk a single Lua file from disk
pub fn chunk_file(path: &Path) -> Result<Vec<Chunk>, RagError> {
    let bytes = std::fs::read(path).map_err(|e| IndexError::FileReadFailed {
        file: path.display().to_string(),
        reason: e.to_string(),
    })?;
    chunk_bytes(&bytes, &path.to_string_lossy())
}

/// Process every Lua file under `dir`
///
/// Files are chunked in parallel, each with its own parser instance. A
/// failure in one file lands in the summary's error list without stopping the
/// others; only discovery failures abort the run.
pub fn chunk_directory(
    config: &Config,
    dir: &Path,
    limit: Option<usize>,
) -> Result<DirectoryRun, RagError> {
    let start = Instant::now();

    let walker = FileWalker::new(dir, config.indexing.max_file_size)
        .with_excludes(config.indexing.exclude_patterns.clone());
    let mut files = walker.walk()?;

    if let Some(limit) = limit {
        files.truncate(limit);
        tracing::info!("Limited to processing {} Lua files", files.len());
    }

    if files.is_empty() {
        tracing::warn!("No Lua files found in {}", dir.display());
    }

    let results: Vec<Result<Vec<Chunk>, String>> = files
        .par_iter()
        .map(|file| {
            chunk_bytes(&file.bytes, &file.relative_path)
                .map_err(|e| format!("{}: {}", file.relative_path, e))
        })
        .collect();

    let mut chunks = Vec::new();
    let mut errors = Vec::new();
    let mut files_processed = 0;
    for result in results {
        match result {
            Ok(file_chunks) => {
                files_processed += 1;
                chunks.extend(file_chunks);
            }
            Err(e) => {
                tracing::error!("Error processing file {}", e);
                errors.push(e);
            }
        }
    }

    let summary = RunSummary {
        files_processed,
        chunks_created: chunks.len(),
        duration_ms: start.elapsed().as_millis() as u64,
        errors,
    };

    tracing::info!(
        "Extracted {} chunks from {} files in {} ms",
        summary.chunks_created,
        summary.files_processed,
        summary.duration_ms
    );

    Ok(DirectoryRun { chunks, summary })
}
