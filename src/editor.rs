//! Record editor: add, list and remove entries on top of the line classifier.

use std::io::{self, BufReader, BufWriter, Read, Seek, SeekFrom, Write};

use tracing::debug;

use crate::error::{HostsError, Result};
use crate::line::{for_each_line, Line, Record};
use crate::store::Store;

/// Reject names that cannot round-trip as a single hosts file token.
pub fn validate_name(name: &str) -> Result<()> {
    if name.is_empty() || name.contains('#') || name.chars().any(char::is_whitespace) {
        return Err(HostsError::InvalidName(name.to_string()));
    }
    Ok(())
}

/// Edits one hosts store. Untouched lines always keep their relative order.
#[derive(Debug)]
pub struct Editor<S> {
    store: S,
}

impl<S: Store> Editor<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_inner(self) -> S {
        self.store
    }

    /// Append `<address>\t<name>\n` at the end of the store. Duplicates are not checked.
    pub fn add(&mut self, name: &str, address: &str) -> Result<()> {
        validate_name(name)?;
        let line = format!("{}\n", Record::new(address, name));
        self.append(&line)?;
        debug!(path = ?self.store.path(), name, address, "appended record");
        Ok(())
    }

    /// Like [`Editor::add`], with a `# comment` line written right above the record.
    pub fn add_with_comment(&mut self, name: &str, address: &str, comment: &str) -> Result<()> {
        validate_name(name)?;
        if comment.contains(|c: char| c == '\n' || c == '\r') {
            return Err(HostsError::InvalidComment(comment.to_string()));
        }
        let comment = comment.trim();
        let comment = comment.strip_prefix('#').unwrap_or(comment).trim_start();
        let lines = format!("# {comment}\n{}\n", Record::new(address, name));
        self.append(&lines)?;
        debug!(path = ?self.store.path(), name, address, comment, "appended commented record");
        Ok(())
    }

    /// Write `text` at the end, first terminating an unfinished last line.
    fn append(&mut self, text: &str) -> io::Result<()> {
        let end = self.store.seek(SeekFrom::End(0))?;
        let mut buf = String::with_capacity(text.len() + 1);
        if end > 0 {
            self.store.seek(SeekFrom::End(-1))?;
            let mut last = [0u8; 1];
            self.store.read_exact(&mut last)?;
            if last[0] != b'\n' {
                buf.push('\n');
            }
        }
        buf.push_str(text);
        self.store.seek(SeekFrom::End(0))?;
        self.store.write_all(buf.as_bytes())?;
        self.store.flush()
    }

    /// Hand every record (comments excluded) to `handler`, in file order.
    ///
    /// A record carries its aliases and trailing comment; re-adding it from
    /// `name()` and `address()` alone writes a bare `<address>\t<name>` line.
    pub fn list<F, E>(&mut self, handler: F) -> Result<(), E>
    where
        F: FnMut(Line<'_>) -> Result<(), E>,
        E: From<io::Error>,
    {
        self.walk(false, handler)
    }

    /// Hand every non-blank line, comments included, to `handler`.
    pub fn list_all<F, E>(&mut self, handler: F) -> Result<(), E>
    where
        F: FnMut(Line<'_>) -> Result<(), E>,
        E: From<io::Error>,
    {
        self.walk(true, handler)
    }

    fn walk<F, E>(&mut self, include_comments: bool, handler: F) -> Result<(), E>
    where
        F: FnMut(Line<'_>) -> Result<(), E>,
        E: From<io::Error>,
    {
        self.store.seek(SeekFrom::Start(0))?;
        for_each_line(BufReader::new(&mut self.store), include_comments, handler)
    }

    /// Stream the store into `target` without any entry for `name`.
    ///
    /// Records whose host name is `name` are dropped, all of them. A record that
    /// only carries `name` as an alias keeps its line with that alias removed.
    /// Comments and invalid lines are copied verbatim, blank lines are dropped and
    /// every record is written in canonical form. Returns how many records changed.
    pub fn rewrite_without<W: Write>(&mut self, target: &mut W, name: &str) -> Result<usize> {
        validate_name(name)?;
        let mut out = BufWriter::new(target);
        let mut removed = 0;
        self.walk(true, |line| -> io::Result<()> {
            match line {
                Line::Comment(text) | Line::Invalid(text) => writeln!(out, "{text}"),
                Line::Record(r) if r.name() == name => {
                    removed += 1;
                    Ok(())
                }
                Line::Record(r) if r.has_alias(name) => {
                    removed += 1;
                    writeln!(out, "{}", r.without_alias(name))
                }
                Line::Record(r) => writeln!(out, "{r}"),
            }
        })?;
        out.flush()?;
        Ok(removed)
    }

    /// Remove every entry for `name`, rewriting the store in place through `temp`.
    ///
    /// The store is only truncated once the complete new content sits in `temp`;
    /// an error before that point leaves the store untouched.
    pub fn remove<T: Store>(&mut self, temp: &mut T, name: &str) -> Result<usize> {
        temp.truncate(0)?;
        temp.seek(SeekFrom::Start(0))?;
        let removed = self.rewrite_without(temp, name)?;
        self.replace_with(temp)?;
        debug!(path = ?self.store.path(), name, removed, "rewrote store in place");
        Ok(removed)
    }

    /// Overwrite the whole store with the whole content of `temp`.
    pub fn replace_with<T: Store>(&mut self, temp: &mut T) -> Result<u64> {
        temp.flush()?;
        let len = temp.seek(SeekFrom::End(0))?;
        temp.seek(SeekFrom::Start(0))?;

        self.store.truncate(0)?;
        self.store.seek(SeekFrom::Start(0))?;
        let copied = io::copy(&mut (&mut *temp).take(len), &mut self.store)?;
        self.store.flush()?;
        if copied != len {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                format!("temporary copy ended after {copied} of {len} bytes"),
            )
            .into());
        }
        Ok(len)
    }
}
