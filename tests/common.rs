//! Shared test helpers.

#![allow(dead_code)]

use std::fs;
use std::io;
use std::path::PathBuf;

use hostsfile::line::for_each_line;
use tempfile::TempDir;

/// Create a temp directory to hold a hosts file.
pub fn temp_hosts_dir() -> TempDir {
    tempfile::Builder::new()
        .prefix("hosts_test_")
        .tempdir()
        .expect("temp dir")
}

/// Write `content` to `<dir>/hosts` and return its path.
pub fn write_hosts(dir: &TempDir, content: &str) -> PathBuf {
    let path = dir.path().join("hosts");
    fs::write(&path, content).expect("write hosts");
    path
}

/// Every handler call as `(name, address, is_comment)`.
pub fn classify_all(input: &[u8], include_comments: bool) -> Vec<(String, String, bool)> {
    let mut calls = Vec::new();
    for_each_line(input, include_comments, |line| {
        calls.push((
            line.name().to_string(),
            line.address().to_string(),
            line.is_comment(),
        ));
        Ok::<_, io::Error>(())
    })
    .expect("iterate");
    calls
}

pub fn call(name: &str, address: &str, is_comment: bool) -> (String, String, bool) {
    (name.to_string(), address.to_string(), is_comment)
}
