//! # bedrock-index-core
//!
//! Lazily-populated definition index for Bedrock add-on workspaces.
//!
//! Indexes:
//! - Animations, animation controllers and render controllers
//! - Geometry and materials (with `child:parent` inheritance names)
//! - Particles, blocks and sound definitions
//! - Client and server entities (plus server entity events and component groups)
//!
//! Each file type is scanned on first use, then kept current through
//! single-file refresh and delete calls driven by the host's file events.

pub mod cache;
pub mod config;
pub mod defaults;
pub mod error;
pub mod file_utils;
pub mod glob_resolver;
pub mod handlers;
pub mod index;
pub mod loader;
pub mod parsers;
pub mod position;
pub mod progress;
pub mod workspace;

use std::fmt;
use std::path::Path;
use std::str::FromStr;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

pub use cache::{CachedFile, TypeCache};
pub use config::IndexConfig;
pub use error::{IndexError, IndexResult};
pub use handlers::{handler_for, ExtractedRecord, FileExtraction, FormatHandler};
pub use index::{DefinitionLocation, FileIndex, LocationData};
pub use position::{Position, RangeInfo};
pub use progress::{LogProgress, ProgressReporter};
pub use workspace::{DiskWorkspace, MockWorkspace, Workspace};

use glob_resolver::GlobPattern;

/// Kind of add-on file, one per format handler
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum FileType {
    AnimationController,
    Animation,
    RenderController,
    Geometry,
    Material,
    Particle,
    ClientEntity,
    ServerEntity,
    SoundEffect,
    Block,
}

impl FileType {
    pub const COUNT: usize = 10;

    pub const ALL: [FileType; Self::COUNT] = [
        FileType::AnimationController,
        FileType::Animation,
        FileType::RenderController,
        FileType::Geometry,
        FileType::Material,
        FileType::Particle,
        FileType::ClientEntity,
        FileType::ServerEntity,
        FileType::SoundEffect,
        FileType::Block,
    ];

    /// Position in [`FileType::ALL`]
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            FileType::AnimationController => "animation-controller",
            FileType::Animation => "animation",
            FileType::RenderController => "render-controller",
            FileType::Geometry => "geometry",
            FileType::Material => "material",
            FileType::Particle => "particle",
            FileType::ClientEntity => "client-entity",
            FileType::ServerEntity => "server-entity",
            FileType::SoundEffect => "sound-effect",
            FileType::Block => "block",
        }
    }

    /// Whether identifiers may be declared as `child:parent`
    pub fn supports_hierarchical_names(self) -> bool {
        matches!(self, FileType::Geometry | FileType::Material)
    }

    /// Detect the file type of a workspace-relative path.
    ///
    /// Returns the first type (in [`FileType::ALL`] order) whose glob matches.
    pub fn detect(relative: &Path) -> Option<FileType> {
        static PATTERNS: OnceLock<Vec<(FileType, GlobPattern)>> = OnceLock::new();

        PATTERNS
            .get_or_init(|| {
                FileType::ALL
                    .iter()
                    .filter_map(|&t| Some((t, GlobPattern::new(handler_for(t).glob()).ok()?)))
                    .collect()
            })
            .iter()
            .find(|(_, pattern)| pattern.matches(relative))
            .map(|(t, _)| *t)
    }
}

impl fmt::Display for FileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for FileType {
    type Err = IndexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FileType::ALL
            .into_iter()
            .find(|t| t.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| IndexError::UnknownFileType {
                name: s.to_string(),
            })
    }
}

/// Kind of record a handler extracts from a file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DataType {
    #[serde(rename = "definition")]
    Definition,
    #[serde(rename = "events")]
    ServerEntityEvents,
    #[serde(rename = "component-groups")]
    ServerEntityComponentGroups,
}

impl DataType {
    pub fn name(self) -> &'static str {
        match self {
            DataType::Definition => "definition",
            DataType::ServerEntityEvents => "events",
            DataType::ServerEntityComponentGroups => "component-groups",
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DataType {
    type Err = IndexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        [
            DataType::Definition,
            DataType::ServerEntityEvents,
            DataType::ServerEntityComponentGroups,
        ]
        .into_iter()
        .find(|t| t.name().eq_ignore_ascii_case(s))
        .ok_or_else(|| IndexError::UnknownDataType {
            name: s.to_string(),
        })
    }
}
