use crate::error::ChunkError;
use tree_sitter::{Parser, Tree};

/// Parser wrapper for the Lua grammar
///
/// `tree_sitter::Parser` is stateful; concurrent callers create one
/// `LuaParser` per worker rather than sharing an instance.
pub struct LuaParser {
    parser: Parser,
}

impl LuaParser {
    /// Create a new parser configured for Lua
    pub fn new() -> Result<Self, ChunkError> {
        let language: tree_sitter::Language = tree_sitter_lua::LANGUAGE.into();
        let mut parser = Parser::new();
        parser
            .set_language(&language)
            .map_err(|e| ChunkError::LanguageInit(e.to_string()))?;

        Ok(Self { parser })
    }

    /// Parse raw source bytes into a syntax tree
    ///
    /// Spans in the returned tree are byte offsets into `source`, so the
    /// caller must keep the same buffer around for chunk extraction.
    pub fn parse(&mut self, source: &[u8], file_path: &str) -> Result<Tree, ChunkError> {
        self.parser
            .parse(source, None)
            .ok_or_else(|| ChunkError::ParseFailed(file_path.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_lua_source() {
        let mut parser = LuaParser::new().unwrap();
        let tree = parser
            .parse(b"local x = 1\nreturn x\n", "test.lua")
            .unwrap();
        assert_eq!(tree.root_node().kind(), "chunk");
        assert!(!tree.root_node().has_error());
    }

    #[test]
    fn test_parses_garbage_without_panicking() {
        let mut parser = LuaParser::new().unwrap();
        // Tree-sitter is error-tolerant: garbage still yields a tree
        let tree = parser.parse(b"@@@ not lua @@@", "garbage.lua").unwrap();
        assert!(tree.root_node().has_error());
    }
}
