//! File-level loading and saving.

use std::path::Path;

use crate::{load_str, to_kdl_string, PersistError, PersistNode};

/// Read a KDL file and load a fresh `T` from it.
pub fn load_file<T: PersistNode + Default>(path: impl AsRef<Path>) -> Result<T, PersistError> {
    let path = path.as_ref();
    log::debug!("loading {}", path.display());
    let contents = std::fs::read_to_string(path)?;
    load_str(&contents)
}

/// Save `value` and write the rendered document to `path`, replacing any
/// existing file.
pub fn save_file<T: PersistNode + ?Sized>(value: &T, path: impl AsRef<Path>) -> Result<(), PersistError> {
    let path = path.as_ref();
    log::debug!("saving {}", path.display());
    std::fs::write(path, to_kdl_string(value))?;
    Ok(())
}
