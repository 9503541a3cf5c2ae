//! Physical reader: a path on storage becomes a virtual [`File`] or [`Dir`].
//!
//! Files are read as binary content and named by their basename. Directories
//! are read recursively; entries that are neither files nor directories are
//! skipped. Entries are sorted by name so the resulting tree does not depend
//! on listing order, and siblings are read in parallel.

use crate::jsx::{Content, Dir, Entry, File};
use crate::storage::{EntryKind, Storage};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReadError {
    #[error("Could not read from {}", .0.display())]
    Read(PathBuf),
    #[error("Argument to `read` must be a file or directory")]
    Unsupported(PathBuf),
}

/// Read the file or directory at `path`.
pub fn read(storage: &dyn Storage, path: &Path) -> Result<Entry, ReadError> {
    match storage.kind(path) {
        Some(EntryKind::File) => read_file(storage, path).map(Entry::File),
        Some(EntryKind::Dir) => read_dir(storage, path).map(Entry::Dir),
        Some(EntryKind::Other) => Err(ReadError::Unsupported(path.to_path_buf())),
        None => Err(ReadError::Read(path.to_path_buf())),
    }
}

pub fn read_file(storage: &dyn Storage, path: &Path) -> Result<File, ReadError> {
    let bytes = storage
        .read(path)
        .map_err(|_| ReadError::Read(path.to_path_buf()))?;
    tracing::trace!(path = %path.display(), bytes = bytes.len(), "read file");
    Ok(File::new(base_name(path), Content::Binary(bytes)))
}

pub fn read_dir(storage: &dyn Storage, path: &Path) -> Result<Dir, ReadError> {
    let mut listing = storage
        .list(path)
        .map_err(|_| ReadError::Read(path.to_path_buf()))?;
    listing.sort_by(|a, b| a.0.cmp(&b.0));

    let entries = listing
        .into_par_iter()
        .filter_map(|(name, kind)| {
            let child = path.join(&name);
            match kind {
                EntryKind::File => Some(read_file(storage, &child).map(Entry::File)),
                EntryKind::Dir => Some(read_dir(storage, &child).map(Entry::Dir)),
                EntryKind::Other => {
                    tracing::debug!(path = %child.display(), "skipping special file");
                    None
                }
            }
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Dir::new(base_name(path), entries))
}

fn base_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| path.to_string_lossy().to_string())
}
