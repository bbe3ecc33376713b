//! # lua-rag - Lua Source Chunking for DCS Script RAG
//!
//! Parses DCS World Lua scripts with tree-sitter and cuts them into
//! semantically meaningful chunks (functions, declarations, comments,
//! control-flow blocks) for a RAG embedding pipeline.
//!
//! ## Overview
//!
//! Each file yields an ordered sequence of chunks with byte-accurate text,
//! 1-based line ranges, and lightweight metadata (declared names where the
//! grammar exposes them). Files with no recognized top-level construct fall
//! back to a single whole-file chunk. The chunks are serialized as JSON Lines
//! for an external embedding/storage pipeline; vector generation and
//! persistence live outside this crate.
//!
//! ## Modules
//!
//! - [`indexer`]: File walking, Lua parsing, and chunk extraction
//! - [`export`]: JSON Lines output for the embedding pipeline
//! - [`config`]: Configuration management with environment variable support
//! - [`types`]: Chunk data model and run summaries
//! - [`error`]: Error types and utilities
//!
//! ## Usage Example
//!
//! ```no_run
//! use lua_rag::indexer;
//! use std::path::Path;
//!
//! fn main() -> anyhow::Result<()> {
//!     let chunks = indexer::chunk_file(Path::new("l10n/DEFAULT/mission.lua"))?;
//!     for chunk in &chunks {
//!         println!("{} lines {}-{}", chunk.chunk_type, chunk.line_start, chunk.line_end);
//!     }
//!     Ok(())
//! }
//! ```

/// Configuration management with environment variable overrides
pub mod config;

/// Error types and utilities
pub mod error;

/// JSON Lines output for the downstream embedding pipeline
pub mod export;

/// File walking, Lua parsing, and chunk extraction
pub mod indexer;

/// Chunk data model and run summaries
pub mod types;
