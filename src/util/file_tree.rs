use std::fs::read_dir;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::trace;

#[derive(Debug, Error)]
#[error("failed to walk directory {}: {source}", .path.display())]
pub struct FileTreeError {
    pub path: PathBuf,
    #[source]
    pub source: std::io::Error,
}

/// Returns all regular files below `root`, recursing into subdirectories depth-first. The order
///  is the file system's traversal order.
///
/// Any directory that can not be read fails the whole walk.
pub fn walk_files(root: &Path) -> Result<Vec<PathBuf>, FileTreeError> {
    let mut result = Vec::new();
    walk_into(root, &mut result)?;
    Ok(result)
}

fn walk_into(dir: &Path, result: &mut Vec<PathBuf>) -> Result<(), FileTreeError> {
    trace!("walking directory {}", dir.display());

    let to_error = |source| FileTreeError { path: dir.to_path_buf(), source };

    for dir_entry in read_dir(dir).map_err(to_error)? {
        let dir_entry = dir_entry.map_err(to_error)?;
        let file_type = dir_entry.file_type().map_err(to_error)?;
        let path = dir_entry.path();

        if file_type.is_dir() {
            walk_into(&path, result)?;
        }
        else if file_type.is_file() || (file_type.is_symlink() && path.is_file()) {
            result.push(path);
        }
    }
    Ok(())
}
