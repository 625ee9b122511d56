//! Hosts file operations by path: open the store, run one edit, release it.

use std::fs;
use std::io;
use std::net::IpAddr;
use std::path::Path;

use tempfile::NamedTempFile;
use tracing::{debug, warn};

use crate::editor::{validate_name, Editor};
use crate::error::Result;
use crate::line::Line;
use crate::store::{FileStore, Store};

/// Append `name` -> `address` to the hosts file, optionally with a comment above it.
pub fn add_host(path: &Path, name: &str, address: IpAddr, comment: Option<&str>) -> Result<()> {
    let mut editor = Editor::new(FileStore::open_rw(path)?);
    let address = address.to_string();
    match comment {
        Some(c) => editor.add_with_comment(name, &address, c),
        None => editor.add(name, &address),
    }
}

/// Walk the hosts file, handing records (and comments if asked) to `handler`.
pub fn list_hosts<F, E>(path: &Path, include_comments: bool, handler: F) -> Result<(), E>
where
    F: FnMut(Line<'_>) -> Result<(), E>,
    E: From<io::Error>,
{
    let mut editor = Editor::new(FileStore::open_read(path)?);
    if include_comments {
        editor.list_all(handler)
    } else {
        editor.list(handler)
    }
}

/// A rewrite target that can be swapped in for the store it was written from.
pub trait Replacement<S>: Store + Sized {
    /// Take over whatever the store carries besides its content (permissions).
    fn prepare(&mut self, store: &S) -> io::Result<()>;
    /// Move the target over `path`. On failure the target is handed back.
    fn swap(self, path: &Path) -> Result<(), (Self, io::Error)>;
}

impl Replacement<FileStore> for NamedTempFile {
    fn prepare(&mut self, store: &FileStore) -> io::Result<()> {
        self.as_file().sync_all()?;
        let permissions = store.file().metadata()?.permissions();
        self.as_file().set_permissions(permissions)
    }

    fn swap(self, path: &Path) -> Result<(), (Self, io::Error)> {
        self.persist(path).map(drop).map_err(|e| (e.file, e.error))
    }
}

/// Create the rewrite target in the same directory as the store so it can be
/// renamed over it.
fn sibling_temp(path: &Path) -> io::Result<NamedTempFile> {
    let dir = match path.parent() {
        Some(d) if !d.as_os_str().is_empty() => d,
        _ => Path::new("."),
    };
    tempfile::Builder::new().prefix(".hosts.").tempfile_in(dir)
}

/// Remove every entry for `name` from the hosts file. Returns how many records changed.
///
/// A symlinked hosts file is resolved first, so the link itself survives.
pub fn remove_host(path: &Path, name: &str) -> Result<usize> {
    validate_name(name)?;
    let target = fs::canonicalize(path)?;
    let mut editor = Editor::new(FileStore::open_rw(&target)?);
    remove_through(&mut editor, sibling_temp(&target), &target, name)
}

/// Rewrite the store without `name` into `temp`, then swap `temp` in at `path`.
///
/// Where no replacement could be created, or it cannot be prepared or swapped
/// (read-only directory, bind-mounted file), the store is rewritten in place from
/// the rewritten copy instead. A failed rewrite leaves the store untouched and the
/// replacement is discarded.
pub fn remove_through<S, T>(
    editor: &mut Editor<S>,
    temp: io::Result<T>,
    path: &Path,
    name: &str,
) -> Result<usize>
where
    S: Store,
    T: Replacement<S>,
{
    let mut temp = match temp {
        Ok(t) => t,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "no temp file beside hosts file, rewriting in place");
            let mut scratch = tempfile::tempfile()?;
            return editor.remove(&mut scratch, name);
        }
    };

    let removed = editor.rewrite_without(&mut temp, name)?;
    if let Err(e) = temp.prepare(editor.store()) {
        warn!(path = %path.display(), error = %e, "cannot prepare replacement, rewriting in place");
        editor.replace_with(&mut temp)?;
        return Ok(removed);
    }

    match temp.swap(path) {
        Ok(()) => {
            debug!(path = %path.display(), name, removed, "replaced hosts file by rename");
            Ok(removed)
        }
        Err((mut temp, e)) => {
            warn!(path = %path.display(), error = %e, "rename over hosts file failed, rewriting in place");
            editor.replace_with(&mut temp)?;
            Ok(removed)
        }
    }
}
