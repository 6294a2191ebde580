//! Copies resolved files into the destination tree.

use crate::error::CopyError;
use std::fs::{self, File, OpenOptions};
use std::io::{self, BufWriter, ErrorKind, Write};
use std::path::Path;

/// Streams source bytes to a resolved destination
pub struct CopyExecutor;

impl CopyExecutor {
    /// Copy `source` to `destination`, creating parent directories.
    ///
    /// Returns the number of bytes written. The destination is created
    /// exclusively: if something appeared there since resolution the copy
    /// fails rather than overwriting it. Partial output is removed on error.
    pub fn copy(source: &Path, destination: &Path) -> Result<u64, CopyError> {
        if is_same_file(source, destination) {
            return Err(CopyError::SourceIsDestination {
                path: destination.to_path_buf(),
            });
        }

        if let Some(parent) = destination.parent() {
            fs::create_dir_all(parent).map_err(|source| CopyError::CreateDirectory {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let mut input = File::open(source).map_err(|e| CopyError::OpenSource {
            path: source.to_path_buf(),
            source: e,
        })?;

        let output = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(destination)
            .map_err(|e| match e.kind() {
                ErrorKind::AlreadyExists => CopyError::DestinationExists {
                    path: destination.to_path_buf(),
                },
                _ => CopyError::CreateDestination {
                    path: destination.to_path_buf(),
                    source: e,
                },
            })?;

        let mut writer = BufWriter::new(output);
        let result = io::copy(&mut input, &mut writer).and_then(|bytes| {
            writer.flush()?;
            Ok(bytes)
        });

        match result {
            Ok(bytes) => Ok(bytes),
            Err(e) => {
                drop(writer);
                if let Err(cleanup) = fs::remove_file(destination) {
                    tracing::warn!(
                        path = %destination.display(),
                        error = %cleanup,
                        "failed to remove partial copy"
                    );
                }
                Err(CopyError::Transfer {
                    path: destination.to_path_buf(),
                    source: e,
                })
            }
        }
    }
}

/// Whether two paths name the same file, before anything is written
fn is_same_file(a: &Path, b: &Path) -> bool {
    if a == b {
        return true;
    }
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn copies_into_new_directories() {
        let temp_src = TempDir::new().unwrap();
        let temp_dest = TempDir::new().unwrap();

        let src_file = temp_src.path().join("test.jpg");
        fs::write(&src_file, b"test content").unwrap();
        let dest_file = temp_dest.path().join("2024/01/15/test.jpg");

        let bytes = CopyExecutor::copy(&src_file, &dest_file).unwrap();

        assert_eq!(bytes, 12);
        assert!(src_file.exists());
        assert_eq!(fs::read(&dest_file).unwrap(), b"test content");
    }

    #[test]
    fn refuses_to_copy_onto_itself() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("photo.jpg");
        fs::write(&file, b"keep me").unwrap();

        let result = CopyExecutor::copy(&file, &file);

        assert!(matches!(result, Err(CopyError::SourceIsDestination { .. })));
        assert_eq!(fs::read(&file).unwrap(), b"keep me");
    }

    #[test]
    fn refuses_equivalent_spellings_of_the_same_path() {
        let temp = TempDir::new().unwrap();
        fs::create_dir(temp.path().join("a")).unwrap();
        let file = temp.path().join("a").join("photo.jpg");
        fs::write(&file, b"keep me").unwrap();
        let roundabout = temp.path().join("a").join("..").join("a").join("photo.jpg");

        let result = CopyExecutor::copy(&file, &roundabout);

        assert!(matches!(result, Err(CopyError::SourceIsDestination { .. })));
    }

    #[test]
    fn guard_runs_before_directories_are_created() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("new").join("photo.jpg");

        let result = CopyExecutor::copy(&missing, &missing);

        assert!(matches!(result, Err(CopyError::SourceIsDestination { .. })));
        assert!(!temp.path().join("new").exists());
    }

    #[test]
    fn never_overwrites_an_existing_destination() {
        let temp = TempDir::new().unwrap();
        let src_file = temp.path().join("new.jpg");
        fs::write(&src_file, b"new").unwrap();
        let dest_file = temp.path().join("out").join("new.jpg");
        fs::create_dir_all(dest_file.parent().unwrap()).unwrap();
        fs::write(&dest_file, b"old").unwrap();

        let result = CopyExecutor::copy(&src_file, &dest_file);

        assert!(matches!(result, Err(CopyError::DestinationExists { .. })));
        assert_eq!(fs::read(&dest_file).unwrap(), b"old");
    }

    #[test]
    fn missing_source_creates_no_file() {
        let temp_dest = TempDir::new().unwrap();
        let dest_file = temp_dest.path().join("2024/01/15/file.jpg");

        let result = CopyExecutor::copy(Path::new("/nonexistent/file.jpg"), &dest_file);

        assert!(matches!(result, Err(CopyError::OpenSource { .. })));
        assert!(!dest_file.exists());
    }
}
