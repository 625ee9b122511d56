//! Store capability: the file-like operations the editor needs.

use std::fs::{File, OpenOptions};
use std::io::{self, Cursor, Read, Seek, Write};
use std::path::{Path, PathBuf};

/// Trait for a readable, writable, seekable, truncatable store.
///
/// The editor only ever talks to a `Store`, so any file-like resource (or an
/// in-memory buffer in tests) can stand in for the hosts file.
pub trait Store: Read + Write + Seek {
    /// Cut (or extend) the store to `len` bytes.
    fn truncate(&mut self, len: u64) -> io::Result<()>;
    /// Location on disk, if the store has one.
    fn path(&self) -> Option<&Path>;
}

/// A hosts file opened from disk, remembering where it came from.
#[derive(Debug)]
pub struct FileStore {
    file: File,
    path: PathBuf,
}

impl FileStore {
    /// Open an existing file read-only.
    pub fn open_read(path: impl Into<PathBuf>) -> io::Result<Self> {
        Self::open_with(path.into(), OpenOptions::new().read(true))
    }

    /// Open an existing file for reading and writing. Never creates or truncates.
    pub fn open_rw(path: impl Into<PathBuf>) -> io::Result<Self> {
        Self::open_with(path.into(), OpenOptions::new().read(true).write(true))
    }

    fn open_with(path: PathBuf, options: &OpenOptions) -> io::Result<Self> {
        let file = options.open(&path)?;
        Ok(Self { file, path })
    }

    pub fn file(&self) -> &File {
        &self.file
    }
}

impl Read for FileStore {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.file.read(buf)
    }
}

impl Write for FileStore {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.file.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.file.flush()
    }
}

impl Seek for FileStore {
    fn seek(&mut self, pos: io::SeekFrom) -> io::Result<u64> {
        self.file.seek(pos)
    }
}

impl Store for FileStore {
    fn truncate(&mut self, len: u64) -> io::Result<()> {
        self.file.set_len(len)
    }

    fn path(&self) -> Option<&Path> {
        Some(&self.path)
    }
}

/// Anonymous temp files and the like.
impl Store for File {
    fn truncate(&mut self, len: u64) -> io::Result<()> {
        self.set_len(len)
    }

    fn path(&self) -> Option<&Path> {
        None
    }
}

impl Store for tempfile::NamedTempFile {
    fn truncate(&mut self, len: u64) -> io::Result<()> {
        self.as_file().set_len(len)
    }

    fn path(&self) -> Option<&Path> {
        Some(tempfile::NamedTempFile::path(self))
    }
}

/// In-memory store, used as a test double.
impl Store for Cursor<Vec<u8>> {
    fn truncate(&mut self, len: u64) -> io::Result<()> {
        let len = usize::try_from(len).map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
        self.get_mut().resize(len, 0);
        Ok(())
    }

    fn path(&self) -> Option<&Path> {
        None
    }
}
