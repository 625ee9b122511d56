//! Configuration loading and hosts path resolution.
//!
//! Supports HOSTS_CONFIG and HOSTS_FILE env var overrides (used by tests).

use std::fs;
use std::net::{IpAddr, Ipv4Addr};
use std::path::{Path, PathBuf};

use crate::error::{HostsError, Result};
use crate::platform;

/// Optional `config.toml` contents.
#[derive(Debug, Clone, Default, PartialEq, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Hosts file to operate on instead of the platform default.
    #[serde(default)]
    pub file: Option<PathBuf>,
    /// Address used by `add` when none is given on the command line.
    #[serde(default)]
    pub default_address: Option<IpAddr>,
}

impl ConfigFile {
    /// Load config from `path`; a missing file is an empty config.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Ok(Self::default());
        }
        let s = fs::read_to_string(path)?;
        toml::from_str(&s).map_err(|source| HostsError::Config {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Default config file location (respects HOSTS_CONFIG).
pub fn config_path() -> Option<PathBuf> {
    if let Ok(p) = std::env::var("HOSTS_CONFIG") {
        return Some(PathBuf::from(p));
    }
    directories::ProjectDirs::from("", "", "hosts").map(|dirs| dirs.config_dir().join("config.toml"))
}

/// Everything one invocation needs, resolved once and passed down explicitly.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub hosts_file: PathBuf,
    pub default_address: IpAddr,
}

impl Settings {
    /// Resolve settings. The hosts path comes from, in order: the explicit flag,
    /// `env_file` (HOSTS_FILE), the config file, the platform default.
    pub fn resolve(flag: Option<PathBuf>, env_file: Option<PathBuf>, config: &ConfigFile) -> Self {
        let hosts_file = flag
            .or(env_file)
            .or_else(|| config.file.clone())
            .unwrap_or_else(platform::default_hosts_path);
        let default_address = config
            .default_address
            .unwrap_or(IpAddr::V4(Ipv4Addr::LOCALHOST));
        Self {
            hosts_file,
            default_address,
        }
    }

    /// Resolve settings from the process environment and the default config file.
    pub fn from_env(flag: Option<PathBuf>) -> Result<Self> {
        let config = match config_path() {
            Some(p) => ConfigFile::load(&p)?,
            None => ConfigFile::default(),
        };
        let env_file = std::env::var_os("HOSTS_FILE")
            .filter(|v| !v.is_empty())
            .map(PathBuf::from);
        Ok(Self::resolve(flag, env_file, &config))
    }
}

/// Parse a user-supplied IP literal.
pub fn parse_address(s: &str) -> Result<IpAddr> {
    s.trim()
        .parse()
        .map_err(|_| HostsError::InvalidAddress(s.to_string()))
}
