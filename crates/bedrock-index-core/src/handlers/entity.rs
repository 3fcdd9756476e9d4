//! Entity definitions
//!
//! Client entities (resource pack `entity/`) only contribute their
//! identifier. Server entities (behavior pack `entities/`) also contribute
//! their event names and component group names.

use super::{description_identifier, object_keys, ExtractedRecord, FileExtraction, FormatHandler};
use crate::loader::Document;
use crate::{DataType, FileType};

const SERVER_ROOT: &str = "minecraft:entity";

pub struct ClientEntityHandler;

impl FormatHandler for ClientEntityHandler {
    fn file_type(&self) -> FileType {
        FileType::ClientEntity
    }

    fn glob(&self) -> &'static str {
        "**/entity/**/*.json"
    }

    fn title(&self) -> &'static str {
        "Client Entities"
    }

    fn extract_identifiers(&self, document: &Document) -> ExtractedRecord {
        description_identifier(document, "minecraft:client_entity")
    }
}

pub struct ServerEntityHandler;

impl FormatHandler for ServerEntityHandler {
    fn file_type(&self) -> FileType {
        FileType::ServerEntity
    }

    fn glob(&self) -> &'static str {
        "**/entities/**/*.json"
    }

    fn title(&self) -> &'static str {
        "Server Entities"
    }

    fn extract_identifiers(&self, document: &Document) -> ExtractedRecord {
        description_identifier(document, SERVER_ROOT)
    }

    fn extract(&self, document: &Document) -> FileExtraction {
        let mut extraction = FileExtraction::new();
        extraction.insert(DataType::Definition, self.extract_identifiers(document));
        extraction.insert(
            DataType::ServerEntityEvents,
            object_keys(document, &[SERVER_ROOT, "events"]),
        );
        extraction.insert(
            DataType::ServerEntityComponentGroups,
            object_keys(document, &[SERVER_ROOT, "component_groups"]),
        );
        extraction
    }
}
