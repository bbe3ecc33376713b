use crate::error::IndexError;
use ignore::WalkBuilder;
use sha2::{Digest, Sha256};
use std::fs;
use std::path::{Path, PathBuf};

/// A discovered Lua source file
///
/// Content is kept as raw bytes: node spans are byte offsets, so decoding
/// happens during chunk extraction, not here.
#[derive(Debug, Clone)]
pub struct LuaFile {
    pub path: PathBuf,
    pub relative_path: String,
    pub bytes: Vec<u8>,
    pub hash: String,
}

pub struct FileWalker {
    root: PathBuf,
    max_file_size: usize,
    exclude_patterns: Vec<String>,
}

impl FileWalker {
    pub fn new(root: impl AsRef<Path>, max_file_size: usize) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            max_file_size,
            exclude_patterns: vec![],
        }
    }

    pub fn with_excludes(mut self, exclude_patterns: Vec<String>) -> Self {
        self.exclude_patterns = exclude_patterns;
        self
    }

    /// Walk the directory and collect all eligible Lua files
    pub fn walk(&self) -> Result<Vec<LuaFile>, IndexError> {
        if !self.root.exists() {
            return Err(IndexError::DirectoryNotFound(
                self.root.display().to_string(),
            ));
        }
        if !self.root.is_dir() {
            return Err(IndexError::NotADirectory(self.root.display().to_string()));
        }

        let mut files = Vec::new();

        let walker = WalkBuilder::new(&self.root)
            .standard_filters(true) // Respect .gitignore, .ignore, etc.
            .hidden(false)
            .require_git(false)
            .build();

        for entry in walker {
            let entry = entry.map_err(|e| IndexError::WalkFailed(e.to_string()))?;
            let path = entry.path();

            if path.is_dir() {
                continue;
            }

            if path.components().any(|c| c.as_os_str() == ".git") {
                continue;
            }

            let is_lua = path
                .extension()
                .and_then(|e| e.to_str())
                .map(|e| e.eq_ignore_ascii_case("lua"))
                .unwrap_or(false);
            if !is_lua {
                continue;
            }

            if !self.matches_patterns(path) {
                tracing::debug!("Skipping excluded file: {:?}", path);
                continue;
            }

            if let Ok(metadata) = fs::metadata(path)
                && metadata.len() > self.max_file_size as u64
            {
                tracing::debug!("Skipping large file: {:?}", path);
                continue;
            }

            // Read raw bytes; malformed UTF-8 is handled during extraction
            let bytes = match fs::read(path) {
                Ok(b) => b,
                Err(e) => {
                    tracing::warn!("Skipping unreadable file {:?}: {}", path, e);
                    continue;
                }
            };

            let hash = calculate_hash(&bytes);

            let relative_path = path
                .strip_prefix(&self.root)
                .unwrap_or(path)
                .to_string_lossy()
                .to_string();

            files.push(LuaFile {
                path: path.to_path_buf(),
                relative_path,
                bytes,
                hash,
            });
        }

        tracing::info!("Found {} Lua files to process", files.len());
        Ok(files)
    }

    /// File must not match any exclude pattern (plain substring match)
    fn matches_patterns(&self, path: &Path) -> bool {
        let path_str = path.to_string_lossy();
        !self
            .exclude_patterns
            .iter()
            .any(|pattern| path_str.contains(pattern.as_str()))
    }
}

fn calculate_hash(content: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content);
    format!("{:x}", hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_file(dir: &Path, name: &str, content: &str) {
        let path = dir.join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }

    #[test]
    fn test_collects_only_lua_files() {
        let dir = TempDir::new().unwrap();
        write_file(dir.path(), "a.lua", "local a = 1");
        write_file(dir.path(), "scripts/b.lua", "local b = 2");
        write_file(dir.path(), "readme.md", "# notes");

        let mut files = FileWalker::new(dir.path(), 1_048_576).walk().unwrap();
        files.sort_by(|a, b| a.relative_path.cmp(&b.relative_path));

        assert_eq!(files.len(), 2);
        assert_eq!(files[0].relative_path, "a.lua");
        assert!(files[1].relative_path.ends_with("b.lua"));
    }

    #[test]
    fn test_exclude_patterns_are_substrings() {
        let dir = TempDir::new().unwrap();
        write_file(dir.path(), "scripts/keep.lua", "local a = 1");
        write_file(dir.path(), "Mods/skip.lua", "local b = 2");

        let files = FileWalker::new(dir.path(), 1_048_576)
            .with_excludes(vec!["Mods".to_string()])
            .walk()
            .unwrap();

        assert_eq!(files.len(), 1);
        assert!(files[0].relative_path.ends_with("keep.lua"));
    }

    #[test]
    fn test_max_file_size_is_enforced() {
        let dir = TempDir::new().unwrap();
        write_file(dir.path(), "small.lua", "local a = 1");
        write_file(dir.path(), "big.lua", &"-- filler\n".repeat(100));

        let files = FileWalker::new(dir.path(), 64).walk().unwrap();

        assert_eq!(files.len(), 1);
        assert_eq!(files[0].relative_path, "small.lua");
    }

    #[test]
    fn test_hash_is_stable_per_content() {
        let dir = TempDir::new().unwrap();
        write_file(dir.path(), "a.lua", "local a = 1");
        write_file(dir.path(), "b.lua", "local a = 1");

        let files = FileWalker::new(dir.path(), 1_048_576).walk().unwrap();

        assert_eq!(files.len(), 2);
        assert_eq!(files[0].hash, files[1].hash);
        assert_eq!(files[0].hash.len(), 64);
    }

    #[test]
    fn test_missing_directory_errors() {
        let result = FileWalker::new("/definitely/not/here", 1_048_576).walk();
        assert!(matches!(result, Err(IndexError::DirectoryNotFound(_))));
    }

    #[test]
    fn test_file_root_is_not_a_directory() {
        let dir = TempDir::new().unwrap();
        write_file(dir.path(), "a.lua", "local a = 1");

        let result = FileWalker::new(dir.path().join("a.lua"), 1_048_576).walk();
        assert!(matches!(result, Err(IndexError::NotADirectory(_))));
    }
}
