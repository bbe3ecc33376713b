/// Configuration system for lua-rag
///
/// Supports loading from multiple sources with priority:
/// CLI args > Environment variables > Config file > Defaults
///
/// The struct is built once at process start and passed by reference into the
/// pipeline; nothing reads ambient process state after that.
use crate::error::{ConfigError, RagError};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Config file looked up in the working directory when no path is given
pub const DEFAULT_CONFIG_FILE: &str = "lua-rag.toml";

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Embedding destination configuration
    #[serde(default)]
    pub embedding: EmbeddingConfig,

    /// File discovery configuration
    #[serde(default)]
    pub indexing: IndexingConfig,
}

/// Where the produced chunks are destined to be embedded
///
/// The pipeline itself never calls the embedding service; this section is
/// validated and handed to the downstream tooling that does.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingConfig {
    /// Embedding backend: "ollama" or "openai"
    #[serde(default = "default_backend")]
    pub backend: String,

    /// Base URL of the Ollama server
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Embedding model name
    #[serde(default = "default_model")]
    pub model: String,
}

/// File discovery configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexingConfig {
    /// Maximum file size to process (in bytes)
    #[serde(default = "default_max_file_size")]
    pub max_file_size: usize,

    /// Substring patterns for paths to exclude
    #[serde(default)]
    pub exclude_patterns: Vec<String>,
}

// Default value functions
fn default_backend() -> String {
    "ollama".to_string()
}

fn default_base_url() -> String {
    "http://localhost:11434".to_string()
}

fn default_model() -> String {
    "nomic-embed-text".to_string()
}

fn default_max_file_size() -> usize {
    1_048_576 // 1 MB
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            backend: default_backend(),
            base_url: default_base_url(),
            model: default_model(),
        }
    }
}

impl Default for IndexingConfig {
    fn default() -> Self {
        Self {
            max_file_size: default_max_file_size(),
            exclude_patterns: Vec::new(),
        }
    }
}

impl Config {
    /// Load configuration from file
    pub fn from_file(path: &Path) -> Result<Self, RagError> {
        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.display().to_string()).into());
        }

        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::LoadFailed(format!("Failed to read config file: {}", e)))?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| ConfigError::ParseFailed(format!("Invalid TOML: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from the given path, the default location, or defaults,
    /// then apply environment overrides and validate
    pub fn load(path: Option<&Path>) -> Result<Self, RagError> {
        let mut config = match path {
            Some(p) => {
                tracing::info!("Loading config from: {}", p.display());
                Self::from_file(p)?
            }
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    tracing::info!("Loading config from: {}", default_path.display());
                    Self::from_file(default_path)?
                } else {
                    tracing::info!("No config file found, using defaults");
                    Self::default()
                }
            }
        };

        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to file
    pub fn save(&self, path: &Path) -> Result<(), RagError> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(|e| {
                ConfigError::SaveFailed(format!("Failed to create config directory: {}", e))
            })?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::SaveFailed(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(path, content)
            .map_err(|e| ConfigError::SaveFailed(format!("Failed to write config file: {}", e)))?;

        tracing::info!("Saved config to: {}", path.display());
        Ok(())
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), RagError> {
        if self.embedding.backend != "ollama" && self.embedding.backend != "openai" {
            return Err(ConfigError::InvalidValue {
                key: "embedding.backend".to_string(),
                reason: format!(
                    "must be 'ollama' or 'openai', got '{}'",
                    self.embedding.backend
                ),
            }
            .into());
        }

        if self.embedding.model.is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "embedding.model".to_string(),
                reason: "must not be empty".to_string(),
            }
            .into());
        }

        if self.embedding.backend == "ollama" && self.embedding.base_url.is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "embedding.base_url".to_string(),
                reason: "must not be empty when backend is 'ollama'".to_string(),
            }
            .into());
        }

        if self.indexing.max_file_size == 0 {
            return Err(ConfigError::InvalidValue {
                key: "indexing.max_file_size".to_string(),
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }

        Ok(())
    }

    /// Apply environment variable overrides
    pub fn apply_env_overrides(&mut self) {
        if let Ok(backend) = std::env::var("LUA_RAG_BACKEND") {
            self.embedding.backend = backend;
        }

        if let Ok(url) = std::env::var("LUA_RAG_BASE_URL") {
            self.embedding.base_url = url;
        }

        if let Ok(model) = std::env::var("LUA_RAG_MODEL") {
            self.embedding.model = model;
        }

        if let Ok(size) = std::env::var("LUA_RAG_MAX_FILE_SIZE")
            && let Ok(size) = size.parse()
        {
            self.indexing.max_file_size = size;
        }
    }
}
