//! JSON Lines hand-off for the downstream embedding pipeline
//!
//! One JSON object per chunk per line; the consumer keys records by
//! `id` + `file_path` and computes a vector per chunk's `content`.

use crate::types::Chunk;
use anyhow::{Context, Result};
use std::io::Write;
use std::path::Path;

/// Write chunks as JSON Lines to an arbitrary writer
pub fn write_jsonl<W: Write>(writer: &mut W, chunks: &[Chunk]) -> Result<()> {
    for chunk in chunks {
        serde_json::to_writer(&mut *writer, chunk).context("Failed to serialize chunk")?;
        writer.write_all(b"\n").context("Failed to write chunk")?;
    }
    writer.flush().context("Failed to flush chunk output")?;
    Ok(())
}

/// Write chunks to a file, creating parent directories as needed
pub fn write_jsonl_file(path: &Path, chunks: &[Chunk]) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create output directory {}", parent.display()))?;
    }

    let file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;
    let mut writer = std::io::BufWriter::new(file);
    write_jsonl(&mut writer, chunks)?;

    tracing::info!("Wrote {} chunks to {}", chunks.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indexer::chunk_bytes;

    #[test]
    fn test_one_json_object_per_line() {
        let chunks =
            chunk_bytes(b"local x = 1\n\nfunction f() return x end\n", "test.lua").unwrap();
        assert_eq!(chunks.len(), 2);

        let mut buffer = Vec::new();
        write_jsonl(&mut buffer, &chunks).unwrap();

        let text = String::from_utf8(buffer).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);

        for (line, original) in lines.iter().zip(&chunks) {
            let parsed: Chunk = serde_json::from_str(line).unwrap();
            assert_eq!(parsed.id, original.id);
            assert_eq!(parsed.content, original.content);
        }
    }

    #[test]
    fn test_absent_metadata_fields_are_omitted() {
        let chunks = chunk_bytes(b"-- radio frequency table\n", "test.lua").unwrap();

        let mut buffer = Vec::new();
        write_jsonl(&mut buffer, &chunks).unwrap();

        let text = String::from_utf8(buffer).unwrap();
        assert!(text.contains("\"node_type\":\"comment\""));
        assert!(!text.contains("\"name\""));
        assert!(!text.contains("\"names\""));
    }

    #[test]
    fn test_write_jsonl_file_creates_parents() {
        let dir = tempfile::TempDir::new().unwrap();
        let out = dir.path().join("out/chunks.jsonl");

        let chunks = chunk_bytes(b"local x = 1\n", "test.lua").unwrap();
        write_jsonl_file(&out, &chunks).unwrap();

        let text = std::fs::read_to_string(&out).unwrap();
        assert_eq!(text.lines().count(), 1);
    }
}
