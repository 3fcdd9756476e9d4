//! Size-limited file reading
//!
//! Rejects anything that is not a regular file before reading it, so a
//! stray FIFO or device inside a pack cannot hang a bulk scan, and enforces
//! a size limit so a huge generated file cannot exhaust memory.

use crate::error::{IndexError, IndexResult};
use std::fs;
use std::path::Path;

/// Read a file, rejecting non-regular files and files above `max_size` bytes.
///
/// Files at exactly `max_size` bytes are accepted.
pub fn read_file_with_limit(path: &Path, max_size: u64) -> IndexResult<String> {
    let metadata = fs::metadata(path).map_err(|e| IndexError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    if !metadata.is_file() {
        return Err(IndexError::FileNotRegular {
            path: path.to_path_buf(),
        });
    }

    let size = metadata.len();
    if size > max_size {
        return Err(IndexError::FileTooBig {
            path: path.to_path_buf(),
            size,
            limit: max_size,
        });
    }

    fs::read_to_string(path).map_err(|e| IndexError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_normal_file_read_succeeds() {
        let temp = TempDir::new().unwrap();
        let file_path = temp.path().join("entity.json");
        fs::write(&file_path, "{}").unwrap();

        assert_eq!(read_file_with_limit(&file_path, 1024).unwrap(), "{}");
    }

    #[test]
    fn test_nonexistent_file_returns_error() {
        let result = read_file_with_limit(Path::new("/nonexistent/path/file.json"), 1024);
        assert!(matches!(result.unwrap_err(), IndexError::FileRead { .. }));
    }

    #[test]
    fn test_directory_is_rejected() {
        let temp = TempDir::new().unwrap();
        let result = read_file_with_limit(temp.path(), 1024);
        assert!(matches!(result.unwrap_err(), IndexError::FileNotRegular { .. }));
    }

    #[test]
    fn test_file_at_limit_is_accepted() {
        let temp = TempDir::new().unwrap();
        let file_path = temp.path().join("exact.json");
        fs::write(&file_path, "x".repeat(16)).unwrap();

        assert!(read_file_with_limit(&file_path, 16).is_ok());
    }

    #[test]
    fn test_file_over_limit_is_rejected() {
        let temp = TempDir::new().unwrap();
        let file_path = temp.path().join("big.json");
        fs::write(&file_path, "x".repeat(17)).unwrap();

        match read_file_with_limit(&file_path, 16).unwrap_err() {
            IndexError::FileTooBig { size, limit, .. } => {
                assert_eq!(size, 17);
                assert_eq!(limit, 16);
            }
            other => panic!("expected FileTooBig, got {:?}", other),
        }
    }
}
