//! Layered configuration for pgmirror.
//!
//! Values are resolved in order, later layers overriding earlier ones:
//!
//! 1. built-in defaults ([`Config::default`]),
//! 2. a configuration file (TOML, YAML or JSON, chosen by extension),
//! 3. environment variables prefixed `PGMIRROR_`, using `__` to separate
//!    nested keys (e.g. `PGMIRROR_SYNC__POLL_INTERVAL_SECS=3600`).

pub mod error;

use crate::error::{ErrorKind, Result};
use directories::ProjectDirs;
use exn::ResultExt;
use figment::Figment;
use figment::providers::{Env, Format, Json, Serialized, Toml, Yaml};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

const ENV_PREFIX: &str = "PGMIRROR_";

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub mirror: MirrorConfig,
    pub sync: SyncConfig,
}

/// Where the catalog archive lives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MirrorConfig {
    /// Scheme and host of the mirror, e.g. `https://www.gutenberg.org`
    pub base_url: String,
    /// Path of the compressed RDF archive under `base_url`
    pub archive_path: String,
}
impl Default for MirrorConfig {
    fn default() -> Self {
        Self {
            base_url: "https://www.gutenberg.org".to_string(),
            archive_path: "/cache/epub/feeds/rdf-files.tar.bz2".to_string(),
        }
    }
}
impl MirrorConfig {
    /// Full address of the archive.
    pub fn archive_url(&self) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), self.archive_path.trim_start_matches('/'))
    }
}

/// How and when synchronization passes run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncConfig {
    /// Seconds between scheduled passes
    pub poll_interval_secs: u64,
    /// Seconds to wait for the archive response headers, per attempt
    pub fetch_timeout_secs: u64,
    /// Seconds a download may go without receiving any data before the pass
    /// is abandoned
    pub read_timeout_secs: u64,
    /// Extra fetch attempts after a retryable failure
    pub retries: u32,
    /// Seconds before the first retry; doubles on each further retry
    pub retry_backoff_secs: u64,
    /// Record ids known to be stubs or templates
    pub ignore: Vec<u64>,
}
impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            poll_interval_secs: 24 * 60 * 60,
            fetch_timeout_secs: 60,
            read_timeout_secs: 120,
            retries: 3,
            retry_backoff_secs: 5,
            // The published dump ships a template record (0) and a test record (999999).
            ignore: vec![0, 999_999],
        }
    }
}
impl SyncConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }

    pub fn read_timeout(&self) -> Duration {
        Duration::from_secs(self.read_timeout_secs)
    }

    pub fn retry_backoff(&self) -> Duration {
        Duration::from_secs(self.retry_backoff_secs)
    }
}

impl Config {
    /// Platform-specific default location of the configuration file, if a
    /// home directory can be determined.
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("org", "gutenberg", "pgmirror").map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// The layered [`Figment`] before extraction. `file` is only merged if it
    /// exists.
    pub fn figment(file: Option<&Path>) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Config::default()));
        if let Some(path) = file.filter(|p| p.is_file()) {
            figment = match path.extension().and_then(|ext| ext.to_str()) {
                Some("yaml" | "yml") => figment.merge(Yaml::file_exact(path)),
                Some("json") => figment.merge(Json::file_exact(path)),
                _ => figment.merge(Toml::file_exact(path)),
            };
        }
        figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Load and validate configuration.
    ///
    /// An explicitly given `file` must exist; without one, the
    /// [default path](Self::default_path) is used when present.
    pub fn load(file: Option<&Path>) -> Result<Self> {
        let file = match file {
            Some(path) if !path.is_file() => exn::bail!(ErrorKind::Invalid {
                field: "path",
                reason: format!("configuration file not found: {}", path.display()),
            }),
            Some(path) => Some(path.to_path_buf()),
            None => Self::default_path(),
        };
        if let Some(path) = &file {
            tracing::debug!(path = %path.display(), exists = path.is_file(), "Loading configuration");
        }
        let config: Config = Self::figment(file.as_deref()).extract().or_raise(|| ErrorKind::Load)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values that would make every pass fail or spin.
    pub fn validate(&self) -> Result<()> {
        let base = &self.mirror.base_url;
        if !(base.starts_with("http://") || base.starts_with("https://")) {
            exn::bail!(ErrorKind::Invalid {
                field: "mirror.base_url",
                reason: format!("expected an http(s) URL, found {base:?}"),
            });
        }
        if self.mirror.archive_path.trim_matches('/').is_empty() {
            exn::bail!(ErrorKind::Invalid {
                field: "mirror.archive_path",
                reason: "must not be empty".to_string(),
            });
        }
        if self.sync.poll_interval_secs == 0 {
            exn::bail!(ErrorKind::Invalid {
                field: "sync.poll_interval_secs",
                reason: "must be greater than zero".to_string(),
            });
        }
        if self.sync.read_timeout_secs == 0 {
            exn::bail!(ErrorKind::Invalid {
                field: "sync.read_timeout_secs",
                reason: "must be greater than zero".to_string(),
            });
        }
        Ok(())
    }
}
