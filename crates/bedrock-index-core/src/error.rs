//! Error types for the index

use crate::parsers::jsonc::ParseFailure;
use std::path::PathBuf;
use thiserror::Error;

pub type IndexResult<T> = Result<T, IndexError>;

/// Index errors
#[derive(Error, Debug)]
pub enum IndexError {
    #[error("Failed to read file: {}", path.display())]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Not a regular file: {}", path.display())]
    FileNotRegular { path: PathBuf },

    #[error("File too large: {} ({size} bytes, limit {limit})", path.display())]
    FileTooBig { path: PathBuf, size: u64, limit: u64 },

    #[error("Failed to parse {}: {failure}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        failure: ParseFailure,
    },

    #[error("Invalid glob pattern: {pattern}")]
    InvalidGlob {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },

    #[error("Workspace not accessible: {}", root.display())]
    Workspace {
        root: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Unknown file type: {name}")]
    UnknownFileType { name: String },

    #[error("Unknown data type: {name}")]
    UnknownDataType { name: String },
}

impl IndexError {
    /// Whether the error only concerns a single file.
    ///
    /// Bulk population skips files failing with a recoverable error and keeps
    /// going; anything else is a host failure and is handed to the caller.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            IndexError::FileRead { .. }
                | IndexError::FileNotRegular { .. }
                | IndexError::FileTooBig { .. }
                | IndexError::Parse { .. }
        )
    }
}
