//! Content loader: open a file through the workspace and parse it.

use std::path::{Path, PathBuf};

use crate::error::{IndexError, IndexResult};
use crate::parsers::jsonc::{self, Node, ParseFailure, Span};
use crate::position::{LineIndex, RangeInfo};
use crate::workspace::Workspace;

/// A parsed file: raw text and span-carrying tree
#[derive(Debug, Clone)]
pub struct Document {
    pub path: PathBuf,
    pub text: String,
    pub root: Node,
    lines: LineIndex,
}

impl Document {
    pub fn parse(path: impl Into<PathBuf>, text: String) -> Result<Self, ParseFailure> {
        let root = jsonc::parse(&text)?;
        let lines = LineIndex::new(&text);
        Ok(Self {
            path: path.into(),
            text,
            root,
            lines,
        })
    }

    pub fn range(&self, span: Span) -> RangeInfo {
        self.lines.range(&self.text, span)
    }
}

/// Read and parse a file.
///
/// Malformed text comes back as [`IndexError::Parse`], never as a panic, so
/// bulk callers can skip the file and move on.
pub fn load_document(workspace: &dyn Workspace, path: &Path) -> IndexResult<Document> {
    let text = workspace.read_to_string(path)?;
    Document::parse(path, text).map_err(|failure| IndexError::Parse {
        path: path.to_path_buf(),
        failure,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workspace::MockWorkspace;
    use crate::position::Position;

    #[test]
    fn test_load_valid_document() {
        let ws = MockWorkspace::new("/ws");
        ws.add_file("/ws/rp/animations/a.json", "{\n  // walk cycle\n  \"animations\": {}\n}");

        let doc = load_document(&ws, Path::new("/ws/rp/animations/a.json")).unwrap();
        assert!(doc.root.get("animations").is_some());
        assert_eq!(doc.path, PathBuf::from("/ws/rp/animations/a.json"));
        assert!(doc.text.contains("walk cycle"));
    }

    #[test]
    fn test_malformed_document_is_parse_error() {
        let ws = MockWorkspace::new("/ws");
        ws.add_file("/ws/bad.json", "{ \"a\": ");

        let err = load_document(&ws, Path::new("/ws/bad.json")).unwrap_err();
        assert!(matches!(err, IndexError::Parse { .. }));
        assert!(err.is_recoverable());
    }

    #[test]
    fn test_missing_document_is_read_error() {
        let ws = MockWorkspace::new("/ws");
        let err = load_document(&ws, Path::new("/ws/missing.json")).unwrap_err();
        assert!(matches!(err, IndexError::FileRead { .. }));
    }

    #[test]
    fn test_range_of_identifier() {
        let doc = Document::parse(
            "block.json",
            "{\n  \"minecraft:block\": {\n    \"description\": { \"identifier\": \"demo:ore\" }\n  }\n}"
                .to_string(),
        )
        .unwrap();

        let node = doc
            .root
            .pointer(&["minecraft:block", "description", "identifier"])
            .unwrap();
        let range = doc.range(node.span);
        assert_eq!(range.start, Position { line: 2, character: 35 });
        assert_eq!(&doc.text[range.start_byte..range.end_byte], "\"demo:ore\"");
    }
}
