//! Behavior pack block definitions

use super::{description_identifier, ExtractedRecord, FormatHandler};
use crate::loader::Document;
use crate::FileType;

pub struct BlockHandler;

impl FormatHandler for BlockHandler {
    fn file_type(&self) -> FileType {
        FileType::Block
    }

    fn glob(&self) -> &'static str {
        "**/blocks/**/*.json"
    }

    fn title(&self) -> &'static str {
        "Blocks"
    }

    fn extract_identifiers(&self, document: &Document) -> ExtractedRecord {
        description_identifier(document, "minecraft:block")
    }
}
