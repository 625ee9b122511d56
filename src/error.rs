//! Error types for hosts file operations.

use std::io;
use std::path::PathBuf;

/// Exit code for runtime failures (I/O, config).
pub const EXIT_ERROR: i32 = 1;
/// Exit code for rejected user input.
pub const EXIT_USAGE: i32 = 2;

/// Errors raised by the hosts file core.
#[derive(Debug, thiserror::Error)]
pub enum HostsError {
    /// Open/read/write/seek/truncate/rename failure, passed through as-is.
    #[error(transparent)]
    Io(#[from] io::Error),

    #[error("invalid host name {0:?}: must be non-empty and contain no whitespace or '#'")]
    InvalidName(String),

    #[error("invalid comment {0:?}: must fit on a single line")]
    InvalidComment(String),

    #[error("invalid IP address {0:?}")]
    InvalidAddress(String),

    #[error("failed to parse config file {}: {source}", .path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

impl HostsError {
    /// Process exit code the CLI should use for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            HostsError::InvalidName(_)
            | HostsError::InvalidComment(_)
            | HostsError::InvalidAddress(_) => EXIT_USAGE,
            HostsError::Io(_) | HostsError::Config { .. } => EXIT_ERROR,
        }
    }
}

pub type Result<T, E = HostsError> = std::result::Result<T, E>;
