/// Centralized error types for lua-rag using thiserror
///
/// Provides domain-specific error types for better error handling and user-facing messages.
use thiserror::Error;

/// Main error type for the chunking pipeline
#[derive(Error, Debug)]
pub enum RagError {
    #[error("Chunking error: {0}")]
    Chunk(#[from] ChunkError),

    #[error("Indexing error: {0}")]
    Index(#[from] IndexError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

/// Errors raised while extracting chunks from a parsed file
#[derive(Error, Debug)]
pub enum ChunkError {
    #[error("Failed to initialize Lua grammar: {0}")]
    LanguageInit(String),

    #[error("Parser produced no tree for '{0}'")]
    ParseFailed(String),

    /// Strict decode failure on an interesting node. The whole-file fallback
    /// decodes leniently instead; this variant only fires on the node path.
    #[error("Node '{kind}' at line {line} is not valid UTF-8: {source}")]
    InvalidUtf8 {
        kind: &'static str,
        line: usize,
        #[source]
        source: std::str::Utf8Error,
    },
}

/// Errors related to file discovery and per-file processing
#[derive(Error, Debug)]
pub enum IndexError {
    #[error("Directory not found: {0}")]
    DirectoryNotFound(String),

    #[error("Path is not a directory: {0}")]
    NotADirectory(String),

    #[error("Failed to walk directory: {0}")]
    WalkFailed(String),

    #[error("Failed to read file '{file}': {reason}")]
    FileReadFailed { file: String, reason: String },
}

/// Errors related to configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    FileNotFound(String),

    #[error("Failed to load configuration file: {0}")]
    LoadFailed(String),

    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),

    #[error("Invalid configuration value for '{key}': {reason}")]
    InvalidValue { key: String, reason: String },

    #[error("Failed to save configuration: {0}")]
    SaveFailed(String),
}

// Conversion from anyhow::Error to RagError
impl From<anyhow::Error> for RagError {
    fn from(err: anyhow::Error) -> Self {
        RagError::Other(format!("{:#}", err))
    }
}

impl RagError {
    /// Create a new error from a string message
    pub fn other(msg: impl Into<String>) -> Self {
        RagError::Other(msg.into())
    }

    /// Check if this is a user error (bad input, bad config) vs system error
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            RagError::Config(_)
                | RagError::Index(IndexError::DirectoryNotFound(_))
                | RagError::Index(IndexError::NotADirectory(_))
        )
    }
}
