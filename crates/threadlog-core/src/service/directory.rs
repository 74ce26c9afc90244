//! Log directory provisioning

use std::path::Path;

use crate::LogSetupError;

/// Make sure the directory holding `path` exists
///
/// A path without a directory component needs nothing. An existing
/// directory, including one created concurrently by another thread, is not
/// an error.
pub fn ensure_parent_dir(path: &Path) -> Result<(), LogSetupError> {
    let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) else {
        return Ok(());
    };

    std::fs::create_dir_all(dir).map_err(|source| LogSetupError::DirectoryCreation {
        dir: dir.to_path_buf(),
        source,
    })
}
