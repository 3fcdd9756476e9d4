//! Particle effect files

use super::{description_identifier, ExtractedRecord, FormatHandler};
use crate::loader::Document;
use crate::FileType;

pub struct ParticleHandler;

impl FormatHandler for ParticleHandler {
    fn file_type(&self) -> FileType {
        FileType::Particle
    }

    fn glob(&self) -> &'static str {
        "**/particles/**/*.json"
    }

    fn title(&self) -> &'static str {
        "Particles"
    }

    fn extract_identifiers(&self, document: &Document) -> ExtractedRecord {
        description_identifier(document, "particle_effect")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::document;

    #[test]
    fn test_particle_identifier() {
        let doc = document(
            r#"{
  "format_version": "1.10.0",
  "particle_effect": {
    "description": { "identifier": "demo:sparkle", "basic_render_parameters": {} },
    "components": {}
  }
}"#,
        );
        let ids = ParticleHandler.extract_identifiers(&doc);
        assert_eq!(ids.len(), 1);
        assert!(ids.contains_key("demo:sparkle"));
    }
}
