//! Filesystem access behind a trait.
//!
//! The [`reader`](crate::reader) and [`writer`](crate::writer) never touch
//! `std::fs` directly; they go through [`Storage`], so tests can swap in the
//! in-memory mock from this module's test submodule. The production
//! implementation is [`DiskStorage`].

use std::fs;
use std::io;
use std::path::Path;

/// What a path points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum EntryKind {
    File,
    Dir,
    /// Sockets, devices, FIFOs and the like.
    Other,
}

/// Minimal filesystem surface needed to read sources and write the site.
///
/// `Sync` so a single storage can be shared by rayon workers.
pub trait Storage: Sync {
    /// Kind of entry at `path`, or `None` if nothing is there.
    fn kind(&self, path: &Path) -> Option<EntryKind>;

    /// Direct children of a directory, as `(name, kind)` pairs in no
    /// particular order.
    fn list(&self, path: &Path) -> io::Result<Vec<(String, EntryKind)>>;

    fn read(&self, path: &Path) -> io::Result<Vec<u8>>;

    /// Create a directory and any missing parents. Existing directories are
    /// not an error.
    fn create_dir_all(&self, path: &Path) -> io::Result<()>;

    /// Create or truncate a file.
    fn write(&self, path: &Path, bytes: &[u8]) -> io::Result<()>;
}

/// The real filesystem. Symlinks are followed.
#[derive(Debug, Clone, Copy, Default)]
pub struct DiskStorage;

fn kind_of(metadata: &fs::Metadata) -> EntryKind {
    if metadata.is_file() {
        EntryKind::File
    } else if metadata.is_dir() {
        EntryKind::Dir
    } else {
        EntryKind::Other
    }
}

impl Storage for DiskStorage {
    fn kind(&self, path: &Path) -> Option<EntryKind> {
        fs::metadata(path).ok().map(|metadata| kind_of(&metadata))
    }

    fn list(&self, path: &Path) -> io::Result<Vec<(String, EntryKind)>> {
        let mut entries = Vec::new();
        for entry in fs::read_dir(path)? {
            let entry = entry?;
            let name = entry.file_name().into_string().map_err(|name| {
                io::Error::new(
                    io::ErrorKind::InvalidData,
                    format!("non UTF-8 file name {:?}", name),
                )
            })?;
            // Dangling symlinks have no target to classify.
            let kind = match fs::metadata(entry.path()) {
                Ok(metadata) => kind_of(&metadata),
                Err(_) => EntryKind::Other,
            };
            entries.push((name, kind));
        }
        Ok(entries)
    }

    fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        fs::read(path)
    }

    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        fs::create_dir_all(path)
    }

    fn write(&self, path: &Path, bytes: &[u8]) -> io::Result<()> {
        fs::write(path, bytes)
    }
}
