//! Material files: `"materials": { "version": "1.0.0", "name:parent": {...} }`

use super::{object_keys, ExtractedRecord, FormatHandler};
use crate::loader::Document;
use crate::FileType;

pub struct MaterialHandler;

impl FormatHandler for MaterialHandler {
    fn file_type(&self) -> FileType {
        FileType::Material
    }

    fn glob(&self) -> &'static str {
        "**/materials/**/*.material"
    }

    fn title(&self) -> &'static str {
        "Materials"
    }

    fn extract_identifiers(&self, document: &Document) -> ExtractedRecord {
        let mut record = object_keys(document, &["materials"]);
        record.remove("version");
        record
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::document;

    #[test]
    fn test_material_keys_without_version() {
        let doc = document(
            r#"{
  "materials": {
    "version": "1.0.0",
    "cow_glow": { "+defines": ["USE_EMISSIVE"] },
    "cow_glow_alpha:cow_glow": {}
  }
}"#,
        );
        let ids = MaterialHandler.extract_identifiers(&doc);

        assert_eq!(ids.len(), 2);
        assert!(ids.contains_key("cow_glow"));
        assert!(ids.contains_key("cow_glow_alpha:cow_glow"));
        assert!(!ids.contains_key("version"));
    }
}
