//! `sound_definitions.json`
//!
//! Newer files nest the definitions under `sound_definitions`; older ones
//! put them at the top level next to `format_version`.

use super::{object_keys, ExtractedRecord, FormatHandler};
use crate::loader::Document;
use crate::FileType;

pub struct SoundEffectHandler;

impl FormatHandler for SoundEffectHandler {
    fn file_type(&self) -> FileType {
        FileType::SoundEffect
    }

    fn glob(&self) -> &'static str {
        "**/sounds/sound_definitions.json"
    }

    fn title(&self) -> &'static str {
        "Sound Effects"
    }

    fn extract_identifiers(&self, document: &Document) -> ExtractedRecord {
        if document.root.get("sound_definitions").is_some() {
            return object_keys(document, &["sound_definitions"]);
        }

        let mut record = object_keys(document, &[]);
        record.remove("format_version");
        record
    }
}
