//! Semantic chunk extraction from a parsed Lua syntax tree
//!
//! Walks the direct children of the tree root and turns each recognized
//! construct into a [`Chunk`] with byte-accurate text, a 1-based line range,
//! and name metadata where the grammar exposes it. Nested constructs stay
//! inside their enclosing chunk. When nothing at the top level qualifies, the
//! whole file becomes a single `file` chunk.

use crate::error::ChunkError;
use crate::types::{Chunk, ChunkKind, ChunkMetadata};
use tree_sitter::Node;

/// Nodes whose stripped text is shorter than this never become chunks; the
/// threshold filters degenerate fragments such as a stray `end` keyword.
const MIN_CHUNK_CHARS: usize = 5;

/// Extract semantic chunks from one parsed Lua file.
///
/// `source` must be the exact byte buffer the tree was parsed from, since
/// node spans are byte offsets. Interesting nodes are decoded strictly and a
/// malformed span fails the whole file with [`ChunkError::InvalidUtf8`]; only
/// the whole-file fallback decodes leniently. Ids are dense, 1-based, and
/// match the output order. The function is pure and safe to call concurrently
/// on different files.
pub fn extract(root: Node, source: &[u8], file_path: &str) -> Result<Vec<Chunk>, ChunkError> {
    let mut chunks = Vec::new();

    let mut cursor = root.walk();
    for child in root.children(&mut cursor) {
        let Some(kind) = classify(&child) else {
            continue;
        };

        let text = node_text(&child, source)?;
        if text.trim().chars().count() < MIN_CHUNK_CHARS {
            continue;
        }

        let metadata = node_metadata(kind, &child, source)?;
        chunks.push(Chunk {
            id: chunks.len() + 1,
            file_path: file_path.to_string(),
            chunk_type: kind,
            content: text.to_string(),
            metadata,
            // Point rows are 0-based
            line_start: child.start_position().row + 1,
            line_end: child.end_position().row + 1,
            parent_id: None,
        });
    }

    if chunks.is_empty() {
        chunks.push(whole_file_chunk(root, source, file_path));
    }

    Ok(chunks)
}

/// Map a node to its chunk category, or `None` for uninteresting kinds.
///
/// The grammar folds `local function f()` into `function_declaration`; the
/// leading `local` token tells the two forms apart.
fn classify(node: &Node) -> Option<ChunkKind> {
    let kind = match node.kind() {
        "function_declaration" => {
            if node.child(0).is_some_and(|c| c.kind() == "local") {
                ChunkKind::LocalFunction
            } else {
                ChunkKind::FunctionDeclaration
            }
        }
        "function_definition" => ChunkKind::FunctionDefinition,
        "table_constructor" => ChunkKind::TableConstructor,
        "variable_declaration" => ChunkKind::VariableDeclaration,
        "assignment_statement" => ChunkKind::AssignmentStatement,
        "comment" => ChunkKind::Comment,
        "if_statement" => ChunkKind::IfStatement,
        "for_statement" => ChunkKind::ForStatement,
        "while_statement" => ChunkKind::WhileStatement,
        "repeat_statement" => ChunkKind::RepeatStatement,
        "do_statement" => ChunkKind::DoStatement,
        _ => return None,
    };
    Some(kind)
}

/// Strict UTF-8 decode of a node's byte span
fn node_text<'a>(node: &Node, source: &'a [u8]) -> Result<&'a str, ChunkError> {
    node.utf8_text(source).map_err(|e| ChunkError::InvalidUtf8 {
        kind: node.kind(),
        line: node.start_position().row + 1,
        source: e,
    })
}

fn node_metadata(kind: ChunkKind, node: &Node, source: &[u8]) -> Result<ChunkMetadata, ChunkError> {
    let mut metadata = ChunkMetadata::new(node.kind());

    match kind {
        ChunkKind::FunctionDeclaration | ChunkKind::LocalFunction => {
            if let Some(name) = node.child_by_field_name("name") {
                metadata.name = Some(node_text(&name, source)?.to_string());
            }
        }
        ChunkKind::VariableDeclaration => {
            let names = declared_names(node, source)?;
            if !names.is_empty() {
                metadata.names = Some(names);
            }
        }
        _ => {}
    }

    Ok(metadata)
}

/// Collect the identifiers declared by a `variable_declaration`, in source order
fn declared_names(node: &Node, source: &[u8]) -> Result<Vec<String>, ChunkError> {
    let mut names = Vec::new();

    if let Some(list) = variable_list(node) {
        let mut cursor = list.walk();
        for entry in list.named_children(&mut cursor) {
            if entry.kind() == "identifier" {
                names.push(node_text(&entry, source)?.to_string());
            }
        }
    }

    Ok(names)
}

/// `local a, b` carries its variable_list directly; `local a, b = 1, 2` nests
/// it inside an assignment_statement child.
fn variable_list<'tree>(node: &Node<'tree>) -> Option<Node<'tree>> {
    let mut cursor = node.walk();
    let direct = node
        .named_children(&mut cursor)
        .find(|c| c.kind() == "variable_list");
    if direct.is_some() {
        return direct;
    }

    let mut cursor = node.walk();
    let assignment = node
        .named_children(&mut cursor)
        .find(|c| c.kind() == "assignment_statement")?;
    let mut cursor = assignment.walk();
    assignment
        .named_children(&mut cursor)
        .find(|c| c.kind() == "variable_list")
}

/// Fallback when no top-level construct qualifies: one chunk spanning the
/// whole file, decoded leniently with invalid sequences replaced.
fn whole_file_chunk(root: Node, source: &[u8], file_path: &str) -> Chunk {
    Chunk {
        id: 1,
        file_path: file_path.to_string(),
        chunk_type: ChunkKind::File,
        content: String::from_utf8_lossy(source).into_owned(),
        metadata: ChunkMetadata::new("file"),
        line_start: 1,
        line_end: root.end_position().row + 1,
        parent_id: None,
    }
}
