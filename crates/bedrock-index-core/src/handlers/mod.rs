//! Format handlers: one per file type, turning a parsed document into
//! extracted records.

pub mod block;
pub mod entity;
pub mod geometry;
pub mod keyed;
pub mod material;
pub mod particle;
pub mod sound;

use std::collections::HashMap;

use crate::loader::Document;
use crate::position::RangeInfo;
use crate::{DataType, FileType};

/// Identifier to source location, unique per file and data type
pub type ExtractedRecord = HashMap<String, RangeInfo>;

/// Everything one handler run extracted from one file
pub type FileExtraction = HashMap<DataType, ExtractedRecord>;

/// Trait for file format handlers
pub trait FormatHandler: Send + Sync {
    fn file_type(&self) -> FileType;

    /// Glob selecting this handler's files, relative to the workspace root
    fn glob(&self) -> &'static str;

    /// Human-readable name used in progress reporting
    fn title(&self) -> &'static str;

    fn extract_identifiers(&self, document: &Document) -> ExtractedRecord;

    fn extract(&self, document: &Document) -> FileExtraction {
        let mut extraction = FileExtraction::new();
        extraction.insert(DataType::Definition, self.extract_identifiers(document));
        extraction
    }
}

/// Get the handler for a file type
pub fn handler_for(file_type: FileType) -> &'static dyn FormatHandler {
    match file_type {
        FileType::AnimationController => &keyed::ANIMATION_CONTROLLERS,
        FileType::Animation => &keyed::ANIMATIONS,
        FileType::RenderController => &keyed::RENDER_CONTROLLERS,
        FileType::Geometry => &geometry::GeometryHandler,
        FileType::Material => &material::MaterialHandler,
        FileType::Particle => &particle::ParticleHandler,
        FileType::ClientEntity => &entity::ClientEntityHandler,
        FileType::ServerEntity => &entity::ServerEntityHandler,
        FileType::SoundEffect => &sound::SoundEffectHandler,
        FileType::Block => &block::BlockHandler,
    }
}

/// Every key of the object found at `path`, ranged on the key itself
pub(crate) fn object_keys(document: &Document, path: &[&str]) -> ExtractedRecord {
    document
        .root
        .pointer(path)
        .map(|node| {
            node.properties()
                .iter()
                .map(|p| (p.key.clone(), document.range(p.key_span)))
                .collect()
        })
        .unwrap_or_default()
}

/// `<root_key>.description.identifier`, ranged on the string value
pub(crate) fn description_identifier(document: &Document, root_key: &str) -> ExtractedRecord {
    let mut record = ExtractedRecord::new();
    if let Some(node) = document
        .root
        .pointer(&[root_key, "description", "identifier"])
    {
        if let Some(identifier) = node.as_str().filter(|id| !id.is_empty()) {
            record.insert(identifier.to_string(), document.range(node.span));
        }
    }
    record
}

#[cfg(test)]
pub(crate) fn document(text: &str) -> Document {
    Document::parse("test.json", text.to_string()).unwrap()
}
