//! Application state management.

use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Context;
use quickopen_scan::HostPolicy;

use crate::config::ServerConfig;

/// Application state shared across request handlers.
pub struct AppState {
    /// Server configuration.
    pub config: ServerConfig,
    /// Host rules every scan runs under.
    pub policy: Arc<dyn HostPolicy>,
    /// Start time.
    start_time: Instant,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("config", &self.config)
            .field("root_dir", &self.policy.root_dir())
            .field("start_time", &self.start_time)
            .finish()
    }
}

impl AppState {
    /// Create application state, resolving the configured root directory.
    pub fn new(config: ServerConfig) -> anyhow::Result<Self> {
        config.validate()?;
        let root = std::fs::canonicalize(&config.root_dir).with_context(|| {
            format!("Failed to resolve root directory {}", config.root_dir.display())
        })?;
        if !root.is_dir() {
            anyhow::bail!("Root directory {} is not a directory", root.display());
        }

        let policy = Arc::new(config.policy(root));
        Ok(Self::with_policy(config, policy))
    }

    /// Create application state around an existing host policy.
    pub fn with_policy(config: ServerConfig, policy: Arc<dyn HostPolicy>) -> Self {
        Self {
            config,
            policy,
            start_time: Instant::now(),
        }
    }

    /// Time since the server started.
    pub fn uptime(&self) -> Duration {
        self.start_time.elapsed()
    }
}
