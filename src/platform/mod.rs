//! Platform defaults for the hosts file location.

use std::path::PathBuf;

#[cfg(windows)]
pub const DEFAULT_HOSTS_PATH: &str = r"C:\Windows\System32\drivers\etc\hosts";

#[cfg(not(windows))]
pub const DEFAULT_HOSTS_PATH: &str = "/etc/hosts";

/// Get the platform hosts file path.
pub fn default_hosts_path() -> PathBuf {
    PathBuf::from(DEFAULT_HOSTS_PATH)
}
