//! Handlers for files whose definitions are the keys of one top-level
//! object: animations, animation controllers and render controllers.

use super::{object_keys, ExtractedRecord, FormatHandler};
use crate::loader::Document;
use crate::FileType;

pub struct KeyedHandler {
    file_type: FileType,
    glob: &'static str,
    title: &'static str,
    root_key: &'static str,
}

pub static ANIMATIONS: KeyedHandler = KeyedHandler {
    file_type: FileType::Animation,
    glob: "**/animations/**/*.json",
    title: "Animations",
    root_key: "animations",
};

pub static ANIMATION_CONTROLLERS: KeyedHandler = KeyedHandler {
    file_type: FileType::AnimationController,
    glob: "**/animation_controllers/**/*.json",
    title: "Animation Controllers",
    root_key: "animation_controllers",
};

pub static RENDER_CONTROLLERS: KeyedHandler = KeyedHandler {
    file_type: FileType::RenderController,
    glob: "**/render_controllers/**/*.json",
    title: "Render Controllers",
    root_key: "render_controllers",
};

impl FormatHandler for KeyedHandler {
    fn file_type(&self) -> FileType {
        self.file_type
    }

    fn glob(&self) -> &'static str {
        self.glob
    }

    fn title(&self) -> &'static str {
        self.title
    }

    fn extract_identifiers(&self, document: &Document) -> ExtractedRecord {
        object_keys(document, &[self.root_key])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::document;
    use crate::position::Position;

    #[test]
    fn test_animation_keys() {
        let doc = document(
            r#"{
  "format_version": "1.8.0",
  "animations": {
    "animation.cow.walk": { "loop": true },
    "animation.cow.look_at_target": {}
  }
}"#,
        );
        let ids = ANIMATIONS.extract_identifiers(&doc);

        assert_eq!(ids.len(), 2);
        let walk = ids["animation.cow.walk"];
        assert_eq!(walk.start, Position { line: 3, character: 4 });
        assert_eq!(&doc.text[walk.start_byte..walk.end_byte], "\"animation.cow.walk\"");
    }

    #[test]
    fn test_controllers_read_their_own_root() {
        let doc = document(
            r#"{
  "animation_controllers": { "controller.animation.cow.move": {} },
  "render_controllers": { "controller.render.cow": {} }
}"#,
        );

        let controllers = ANIMATION_CONTROLLERS.extract_identifiers(&doc);
        assert!(controllers.contains_key("controller.animation.cow.move"));
        assert_eq!(controllers.len(), 1);

        let render = RENDER_CONTROLLERS.extract_identifiers(&doc);
        assert!(render.contains_key("controller.render.cow"));
        assert_eq!(render.len(), 1);
    }
}
