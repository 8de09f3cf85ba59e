//! Configuration loading and data folder resolution

use crate::{Error, Result};
use serde::Deserialize;
use std::path::PathBuf;
use std::str::FromStr;

const DEFAULT_BASE_URL: &str = "https://younite.uk/api";
const DEFAULT_MEDIA_BASE_URL: &str = "https://younite.uk/images";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 15;

/// What the resolver does when one code maps to more than one record.
///
/// The backend guarantees at most one match per code at lookup time; `First`
/// takes the backend's first element deterministically if that guarantee ever
/// breaks, `Reject` classifies the response as an error instead of silently
/// discarding the rest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MultiMatchPolicy {
    #[default]
    First,
    Reject,
}

impl FromStr for MultiMatchPolicy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "first" => Ok(MultiMatchPolicy::First),
            "reject" => Ok(MultiMatchPolicy::Reject),
            other => Err(Error::Config(format!(
                "invalid multi_match policy '{}' (expected 'first' or 'reject')",
                other
            ))),
        }
    }
}

/// Resolved client configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Backend API base, e.g. `https://younite.uk/api`
    pub base_url: String,
    /// Base for story/banner image references
    pub media_base_url: String,
    /// Folder holding the SQLite database
    pub data_dir: PathBuf,
    /// Per-request timeout; expiry is reported as a backend error
    pub request_timeout_secs: u64,
    pub multi_match: MultiMatchPolicy,
}

/// Per-key overrides from the command line (highest priority)
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub base_url: Option<String>,
    pub data_dir: Option<PathBuf>,
    pub multi_match: Option<MultiMatchPolicy>,
}

/// On-disk config file shape (all keys optional)
#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    base_url: Option<String>,
    media_base_url: Option<String>,
    data_dir: Option<PathBuf>,
    request_timeout_secs: Option<u64>,
    multi_match: Option<MultiMatchPolicy>,
}

impl Config {
    /// Resolve configuration following the priority order:
    /// 1. Command-line argument (highest priority)
    /// 2. Environment variable (`GIVTRACK_*`)
    /// 3. TOML config file
    /// 4. Compiled default (fallback)
    pub fn resolve(overrides: ConfigOverrides) -> Result<Self> {
        let file = load_config_file()
            .and_then(|path| {
                let toml_content = std::fs::read_to_string(&path)?;
                toml::from_str::<FileConfig>(&toml_content)
                    .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))
            })
            .unwrap_or_default();

        let base_url = overrides
            .base_url
            .or_else(|| std::env::var("GIVTRACK_BASE_URL").ok())
            .or(file.base_url)
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let media_base_url = std::env::var("GIVTRACK_MEDIA_BASE_URL")
            .ok()
            .or(file.media_base_url)
            .unwrap_or_else(|| DEFAULT_MEDIA_BASE_URL.to_string());

        let data_dir = overrides
            .data_dir
            .or_else(|| std::env::var("GIVTRACK_DATA_DIR").ok().map(PathBuf::from))
            .or(file.data_dir)
            .unwrap_or_else(default_data_dir);

        let request_timeout_secs = match std::env::var("GIVTRACK_TIMEOUT_SECS") {
            Ok(v) => v
                .parse()
                .map_err(|_| Error::Config(format!("invalid GIVTRACK_TIMEOUT_SECS '{}'", v)))?,
            Err(_) => file
                .request_timeout_secs
                .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS),
        };

        let multi_match = match overrides.multi_match {
            Some(policy) => policy,
            None => match std::env::var("GIVTRACK_MULTI_MATCH") {
                Ok(v) => v.parse()?,
                Err(_) => file.multi_match.unwrap_or_default(),
            },
        };

        Ok(Config {
            base_url,
            media_base_url,
            data_dir,
            request_timeout_secs,
            multi_match,
        })
    }

    /// Path of the SQLite database within the data folder
    pub fn database_path(&self) -> PathBuf {
        self.data_dir.join("givtrack.db")
    }

    /// Join a story image reference onto the media base
    pub fn image_url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.media_base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

/// Locate the configuration file for the platform
fn load_config_file() -> Result<PathBuf> {
    if cfg!(target_os = "linux") {
        // Try ~/.config/givtrack/config.toml first, then /etc/givtrack/config.toml
        if let Some(path) = dirs::config_dir().map(|d| d.join("givtrack").join("config.toml")) {
            if path.exists() {
                return Ok(path);
            }
        }
        let system_config = PathBuf::from("/etc/givtrack/config.toml");
        if system_config.exists() {
            return Ok(system_config);
        }
        Err(Error::Config("No config file found".to_string()))
    } else {
        let path = dirs::config_dir()
            .map(|d| d.join("givtrack").join("config.toml"))
            .ok_or_else(|| Error::Config("Could not determine config directory".to_string()))?;
        if path.exists() {
            Ok(path)
        } else {
            Err(Error::Config(format!("Config file not found: {:?}", path)))
        }
    }
}

/// OS-dependent default data folder
fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .map(|d| d.join("givtrack"))
        .unwrap_or_else(|| PathBuf::from("./givtrack_data"))
}
