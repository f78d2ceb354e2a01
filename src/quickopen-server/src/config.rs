//! Server configuration.

use std::path::PathBuf;

use quickopen_scan::{DEFAULT_HIDE_GLOBS, DEFAULT_MAX_LOAD, FsPolicy, UnreadableDirPolicy};
use serde::{Deserialize, Serialize};

/// Server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Listen address (e.g., "127.0.0.1:8888").
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,

    /// Directory every scan is rooted at.
    #[serde(default = "default_root_dir")]
    pub root_dir: PathBuf,

    /// Show entries the host considers hidden (dot files).
    #[serde(default)]
    pub allow_hidden: bool,

    /// Names the host never lists.
    #[serde(default = "default_hide_globs")]
    pub hide_globs: Vec<String>,

    /// Cap applied when a request gives no positive `max_load`.
    #[serde(default = "default_max_load")]
    pub default_max_load: usize,

    /// What to do with subdirectories that cannot be read.
    #[serde(default)]
    pub unreadable_dirs: UnreadableDirPolicy,

    /// Authentication configuration.
    #[serde(default)]
    pub auth: AuthConfig,

    /// Graceful shutdown timeout in seconds.
    #[serde(default = "default_shutdown_timeout")]
    pub shutdown_timeout: u64,
}

fn default_listen_addr() -> String {
    "127.0.0.1:8888".to_string()
}

fn default_root_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_hide_globs() -> Vec<String> {
    DEFAULT_HIDE_GLOBS.iter().map(|g| g.to_string()).collect()
}

fn default_max_load() -> usize {
    DEFAULT_MAX_LOAD
}

fn default_shutdown_timeout() -> u64 {
    30
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: default_listen_addr(),
            root_dir: default_root_dir(),
            allow_hidden: false,
            hide_globs: default_hide_globs(),
            default_max_load: default_max_load(),
            unreadable_dirs: UnreadableDirPolicy::default(),
            auth: AuthConfig::default(),
            shutdown_timeout: default_shutdown_timeout(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from a JSON file.
    pub fn load(path: impl AsRef<std::path::Path>) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from environment variables.
    pub fn from_env() -> anyhow::Result<Self> {
        let mut config = Self::default();

        if let Ok(addr) = std::env::var("QUICKOPEN_LISTEN_ADDR") {
            config.listen_addr = addr;
        }

        if let Ok(root) = std::env::var("QUICKOPEN_ROOT_DIR") {
            config.root_dir = PathBuf::from(root);
        }

        if let Ok(allow) = std::env::var("QUICKOPEN_ALLOW_HIDDEN") {
            config.allow_hidden = allow.parse().map_err(|_| {
                anyhow::anyhow!("QUICKOPEN_ALLOW_HIDDEN must be true or false, got {allow:?}")
            })?;
        }

        if let Ok(max_load) = std::env::var("QUICKOPEN_DEFAULT_MAX_LOAD") {
            config.default_max_load = max_load.parse().map_err(|_| {
                anyhow::anyhow!("QUICKOPEN_DEFAULT_MAX_LOAD must be a positive integer, got {max_load:?}")
            })?;
        }

        if let Ok(token) = std::env::var("QUICKOPEN_TOKEN") {
            config.auth.enabled = true;
            config.auth.tokens.push(token);
        }

        config.validate()?;
        Ok(config)
    }

    /// Checks values serde alone cannot rule out.
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.default_max_load == 0 {
            anyhow::bail!("default_max_load must be a positive integer, got 0");
        }
        Ok(())
    }

    /// Builds the host policy described by this configuration.
    pub fn policy(&self, root: PathBuf) -> FsPolicy {
        FsPolicy::new(root)
            .with_hide_globs(&self.hide_globs)
            .with_allow_hidden(self.allow_hidden)
    }
}

/// Authentication configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Require a token on scan requests.
    #[serde(default)]
    pub enabled: bool,
    /// Accepted tokens.
    #[serde(default)]
    pub tokens: Vec<String>,
}
