//! Geometry (model) files
//!
//! Two layouts exist in the wild:
//! - `format_version` 1.12+: `"minecraft:geometry": [{ "description": { "identifier": ... } }]`
//! - legacy 1.8/1.10: top-level `"geometry.name"` or `"geometry.name:geometry.parent"` keys

use super::{ExtractedRecord, FormatHandler};
use crate::loader::Document;
use crate::FileType;

pub struct GeometryHandler;

impl FormatHandler for GeometryHandler {
    fn file_type(&self) -> FileType {
        FileType::Geometry
    }

    fn glob(&self) -> &'static str {
        "**/models/**/*.json"
    }

    fn title(&self) -> &'static str {
        "Geometry"
    }

    fn extract_identifiers(&self, document: &Document) -> ExtractedRecord {
        let mut record = ExtractedRecord::new();

        if let Some(geometries) = document.root.get("minecraft:geometry") {
            for geometry in geometries.elements() {
                if let Some(node) = geometry.pointer(&["description", "identifier"]) {
                    if let Some(identifier) = node.as_str() {
                        record.insert(identifier.to_string(), document.range(node.span));
                    }
                }
            }
        }

        for property in document.root.properties() {
            if property.key.starts_with("geometry.") {
                record.insert(property.key.clone(), document.range(property.key_span));
            }
        }

        record
    }
}
