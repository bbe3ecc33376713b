use serde::{Deserialize, Serialize};

/// Syntax categories eligible to become chunks, plus the whole-file fallback
///
/// Each variant maps to a Lua grammar node kind; classification happens in
/// [`crate::indexer`] where the tree is walked. Keeping this an enum means a
/// new chunk category is a compile-time change, not a new magic string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChunkKind {
    /// `function foo()` / `function M.bar()` statement
    FunctionDeclaration,
    /// `local function foo()` statement
    LocalFunction,
    /// Anonymous `function() ... end` expression
    FunctionDefinition,
    /// `{ ... }` table constructor
    TableConstructor,
    /// `local x, y = ...` declaration
    VariableDeclaration,
    /// `x = ...` assignment to already-declared variables
    AssignmentStatement,
    Comment,
    IfStatement,
    ForStatement,
    WhileStatement,
    RepeatStatement,
    DoStatement,
    /// Whole-file fallback when no other construct qualifies
    File,
}

impl ChunkKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChunkKind::FunctionDeclaration => "function_declaration",
            ChunkKind::LocalFunction => "local_function",
            ChunkKind::FunctionDefinition => "function_definition",
            ChunkKind::TableConstructor => "table_constructor",
            ChunkKind::VariableDeclaration => "variable_declaration",
            ChunkKind::AssignmentStatement => "assignment_statement",
            ChunkKind::Comment => "comment",
            ChunkKind::IfStatement => "if_statement",
            ChunkKind::ForStatement => "for_statement",
            ChunkKind::WhileStatement => "while_statement",
            ChunkKind::RepeatStatement => "repeat_statement",
            ChunkKind::DoStatement => "do_statement",
            ChunkKind::File => "file",
        }
    }

    /// True for the function-definition forms that may carry a `name`
    pub fn is_function(&self) -> bool {
        matches!(
            self,
            ChunkKind::FunctionDeclaration | ChunkKind::LocalFunction | ChunkKind::FunctionDefinition
        )
    }
}

impl std::fmt::Display for ChunkKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Metadata attached to each chunk
///
/// Absent fields are omitted from the serialized form, not null-filled.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChunkMetadata {
    /// Raw grammar node kind this chunk was cut from
    pub node_type: String,
    /// Declared name for named function forms
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Declared identifiers for variable declarations, in source order
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub names: Option<Vec<String>>,
}

impl ChunkMetadata {
    pub fn new(node_type: impl Into<String>) -> Self {
        Self {
            node_type: node_type.into(),
            name: None,
            names: None,
        }
    }
}

/// A contiguous, semantically meaningful excerpt of one Lua source file
///
/// Within a single file run, `id` values are dense and 1-based in traversal
/// order; downstream storage keys records by `id` + `file_path`. Chunks are
/// never mutated after creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chunk {
    pub id: usize,
    pub file_path: String,
    pub chunk_type: ChunkKind,
    /// Exact source text spanned by the node, no normalization
    pub content: String,
    pub metadata: ChunkMetadata,
    /// 1-based, inclusive
    pub line_start: usize,
    /// 1-based, inclusive
    pub line_end: usize,
    /// Reserved for nested chunking; the shallow traversal never sets it
    pub parent_id: Option<usize>,
}

/// Summary of one directory processing run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSummary {
    /// Number of files successfully chunked
    pub files_processed: usize,
    /// Number of chunks produced across all files
    pub chunks_created: usize,
    /// Time taken in milliseconds
    pub duration_ms: u64,
    /// Per-file errors encountered (non-fatal for the run)
    #[serde(default)]
    pub errors: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chunk_kind_serializes_to_grammar_vocabulary() {
        let json = serde_json::to_string(&ChunkKind::LocalFunction).unwrap();
        assert_eq!(json, "\"local_function\"");
        let json = serde_json::to_string(&ChunkKind::VariableDeclaration).unwrap();
        assert_eq!(json, "\"variable_declaration\"");
        let json = serde_json::to_string(&ChunkKind::File).unwrap();
        assert_eq!(json, "\"file\"");
    }

    #[test]
    fn test_chunk_kind_display_matches_serde() {
        for kind in [
            ChunkKind::FunctionDeclaration,
            ChunkKind::IfStatement,
            ChunkKind::RepeatStatement,
            ChunkKind::File,
        ] {
            let json = serde_json::to_string(&kind).unwrap();
            assert_eq!(json, format!("\"{}\"", kind));
        }
    }

    #[test]
    fn test_is_function() {
        assert!(ChunkKind::FunctionDeclaration.is_function());
        assert!(ChunkKind::LocalFunction.is_function());
        assert!(ChunkKind::FunctionDefinition.is_function());
        assert!(!ChunkKind::Comment.is_function());
        assert!(!ChunkKind::File.is_function());
    }

    #[test]
    fn test_metadata_omits_absent_fields() {
        let metadata = ChunkMetadata::new("comment");
        let json = serde_json::to_string(&metadata).unwrap();
        assert_eq!(json, "{\"node_type\":\"comment\"}");
    }

    #[test]
    fn test_metadata_with_name() {
        let mut metadata = ChunkMetadata::new("function_declaration");
        metadata.name = Some("spawnGroup".to_string());
        let json = serde_json::to_string(&metadata).unwrap();
        assert!(json.contains("\"name\":\"spawnGroup\""));
        assert!(!json.contains("names"));
    }

    #[test]
    fn test_chunk_serialization_roundtrip() {
        let chunk = Chunk {
            id: 1,
            file_path: "scripts/radio.lua".to_string(),
            chunk_type: ChunkKind::VariableDeclaration,
            content: "local freq = 251.0".to_string(),
            metadata: ChunkMetadata {
                node_type: "variable_declaration".to_string(),
                name: None,
                names: Some(vec!["freq".to_string()]),
            },
            line_start: 3,
            line_end: 3,
            parent_id: None,
        };

        let json = serde_json::to_string(&chunk).unwrap();
        let parsed: Chunk = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed.id, 1);
        assert_eq!(parsed.chunk_type, ChunkKind::VariableDeclaration);
        assert_eq!(parsed.content, chunk.content);
        assert_eq!(parsed.metadata.names, Some(vec!["freq".to_string()]));
        assert_eq!(parsed.parent_id, None);
    }

    #[test]
    fn test_run_summary_defaults_errors() {
        let json = "{\"files_processed\":2,\"chunks_created\":9,\"duration_ms\":12}";
        let summary: RunSummary = serde_json::from_str(json).unwrap();
        assert_eq!(summary.files_processed, 2);
        assert!(summary.errors.is_empty());
    }
}
