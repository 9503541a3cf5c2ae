//! Physical writer: materialises a virtual tree under a root path.
//!
//! A [`File`] is written to `root/name`. A [`Dir`] is created (with any
//! missing parents) at `root/name` and its entries are then written into it
//! in parallel. The first failure aborts the write.

use crate::jsx::{Dir, Entry, File};
use crate::storage::Storage;
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WriteError {
    #[error("Could not write to {}", .0.display())]
    Write(PathBuf),
}

pub fn write(storage: &dyn Storage, root: &Path, entry: &Entry) -> Result<(), WriteError> {
    match entry {
        Entry::File(file) => write_file(storage, root, file),
        Entry::Dir(dir) => write_dir(storage, root, dir),
    }
}

pub fn write_file(storage: &dyn Storage, root: &Path, file: &File) -> Result<(), WriteError> {
    let path = root.join(file.name());
    storage
        .write(&path, file.content().as_bytes())
        .map_err(|_| WriteError::Write(path.clone()))?;
    tracing::trace!(path = %path.display(), bytes = file.content().len(), "wrote file");
    Ok(())
}

pub fn write_dir(storage: &dyn Storage, root: &Path, dir: &Dir) -> Result<(), WriteError> {
    let path = root.join(dir.name());
    storage
        .create_dir_all(&path)
        .map_err(|_| WriteError::Write(path.clone()))?;
    tracing::debug!(path = %path.display(), entries = dir.entries().len(), "writing directory");

    dir.entries()
        .par_iter()
        .try_for_each(|entry| write(storage, &path, entry))
}
