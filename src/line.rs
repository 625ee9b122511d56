//! Line classifier: streams a hosts file and hands each meaningful line to a handler.
//!
//! The reader is consumed one line at a time through a single reused buffer, so a
//! store of any size is walked without being loaded into memory.

use std::fmt;
use std::io::{self, BufRead};

/// UTF-8 byte-order mark, only honoured on the first line.
const BOM: &str = "\u{feff}";

fn is_blank(c: char) -> bool {
    c == ' ' || c == '\t'
}

/// Split off the first space/tab delimited token; the remainder has its leading
/// blanks removed.
fn split_token(s: &str) -> (&str, &str) {
    match s.find(is_blank) {
        Some(i) => (&s[..i], s[i..].trim_start_matches(is_blank)),
        None => (s, ""),
    }
}

/// Split at the first token starting with `#`: `(aliases, trailing comment)`.
fn split_comment(s: &str) -> (&str, &str) {
    let mut after_blank = true;
    for (i, c) in s.char_indices() {
        if c == '#' && after_blank {
            return (s[..i].trim_end_matches(is_blank), &s[i..]);
        }
        after_blank = is_blank(c);
    }
    (s, "")
}

/// One `<address> <name> [aliases...] [# comment]` mapping, borrowed from the current line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Record<'a> {
    address: &'a str,
    name: &'a str,
    aliases: &'a str,
    comment: &'a str,
}

impl<'a> Record<'a> {
    pub fn new(address: &'a str, name: &'a str) -> Self {
        Self {
            address,
            name,
            aliases: "",
            comment: "",
        }
    }

    pub fn address(&self) -> &'a str {
        self.address
    }

    pub fn name(&self) -> &'a str {
        self.name
    }

    /// Extra host names that follow the primary name on the same line.
    pub fn aliases(&self) -> impl Iterator<Item = &'a str> {
        self.aliases.split(is_blank).filter(|t| !t.is_empty())
    }

    /// Trailing `# ...` text after the host names, kept verbatim.
    pub fn comment(&self) -> Option<&'a str> {
        Some(self.comment).filter(|c| !c.is_empty())
    }

    pub fn has_alias(&self, name: &str) -> bool {
        self.aliases().any(|a| a == name)
    }

    /// Canonical form of this record with one alias left out.
    pub fn without_alias<'r>(&'r self, alias: &'r str) -> Canonical<'r, 'a> {
        Canonical {
            record: self,
            skip: Some(alias),
        }
    }
}

/// Canonical `<address>\t<name>[ <alias>...][ # comment]` rendering of a record.
pub struct Canonical<'r, 'a> {
    record: &'r Record<'a>,
    skip: Option<&'r str>,
}

impl fmt::Display for Canonical<'_, '_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\t{}", self.record.address, self.record.name)?;
        for alias in self.record.aliases() {
            if Some(alias) == self.skip {
                continue;
            }
            write!(f, " {alias}")?;
        }
        if let Some(comment) = self.record.comment() {
            write!(f, " {comment}")?;
        }
        Ok(())
    }
}

impl fmt::Display for Record<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Canonical {
            record: self,
            skip: None,
        }
        .fmt(f)
    }
}

/// A classified, non-blank line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Line<'a> {
    /// Trimmed text starting with `#`.
    Comment(&'a str),
    Record(Record<'a>),
    /// A lone token (or a token followed only by a comment) with no host name;
    /// carried through untouched.
    Invalid(&'a str),
}

impl<'a> Line<'a> {
    /// Host name of a record, or the raw text of a comment/invalid line.
    pub fn name(&self) -> &'a str {
        match self {
            Line::Record(r) => r.name(),
            Line::Comment(text) | Line::Invalid(text) => text,
        }
    }

    /// Address of a record; empty for anything else.
    pub fn address(&self) -> &'a str {
        match self {
            Line::Record(r) => r.address(),
            Line::Comment(_) | Line::Invalid(_) => "",
        }
    }

    pub fn is_comment(&self) -> bool {
        !matches!(self, Line::Record(_))
    }
}

/// Classify one raw line (BOM already removed). Blank lines yield `None`.
pub fn classify(raw: &str) -> Option<Line<'_>> {
    let line = raw.trim();
    if line.is_empty() {
        return None;
    }
    if line.starts_with('#') {
        return Some(Line::Comment(line));
    }

    let (address, rest) = split_token(line);
    if rest.is_empty() || rest.starts_with('#') {
        return Some(Line::Invalid(line));
    }
    let (name, rest) = split_token(rest);
    let (aliases, comment) = split_comment(rest);
    Some(Line::Record(Record {
        address,
        name,
        aliases,
        comment,
    }))
}

/// Walk `reader` line by line, calling `handler` once per comment or record line.
///
/// Blank lines never reach the handler. Comment and invalid lines are only
/// delivered when `include_comments` is set. The first error returned by the
/// handler stops the walk and is returned unchanged; read errors (including
/// non-UTF-8 input) are converted through `E: From<io::Error>`.
pub fn for_each_line<R, F, E>(mut reader: R, include_comments: bool, mut handler: F) -> Result<(), E>
where
    R: BufRead,
    F: FnMut(Line<'_>) -> Result<(), E>,
    E: From<io::Error>,
{
    let mut buf = String::new();
    let mut first = true;
    loop {
        buf.clear();
        if reader.read_line(&mut buf)? == 0 {
            return Ok(());
        }
        let mut raw = buf.as_str();
        if first {
            raw = raw.strip_prefix(BOM).unwrap_or(raw);
            first = false;
        }
        match classify(raw) {
            Some(line @ Line::Record(_)) => handler(line)?,
            Some(line) if include_comments => handler(line)?,
            _ => {}
        }
    }
}
