//! Registry endpoint configuration.
//!
//! The active registry is an explicit value threaded through
//! constructors, never ambient process state, so multiple engines with
//! different endpoints can coexist (and be tested) in one process.
//!
//! Resolution order, first match wins:
//! 1. `--registry` flag (clap also reads `TDK_REGISTRY`)
//! 2. `.tdk/config.yml` under the template root
//! 3. built-in defaults

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TdkError};
use crate::store::WORK_DIR;

/// Config file name inside the `.tdk` work directory.
pub const CONFIG_FILE: &str = "config.yml";

/// Default registry endpoint.
pub const DEFAULT_REGISTRY_URL: &str = "https://registry.tdk.dev";

/// Default per-call timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Registry endpoint settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryConfig {
    /// Base URL of the registry service.
    #[serde(default = "default_url")]
    pub url: String,
    /// Per-call timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_url() -> String {
    DEFAULT_REGISTRY_URL.to_string()
}

fn default_timeout() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            url: default_url(),
            timeout_secs: default_timeout(),
        }
    }
}

impl RegistryConfig {
    /// Load the config file under `root`, falling back to defaults when
    /// absent.
    pub fn load(root: &Path) -> Result<Self> {
        let path = root.join(WORK_DIR).join(CONFIG_FILE);
        if !path.is_file() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path)?;
        serde_yaml::from_str(&content).map_err(|e| TdkError::ConfigError {
            path,
            message: e.to_string(),
        })
    }

    /// Resolve the effective config: file (or defaults) with the CLI
    /// override applied.
    pub fn resolve(root: &Path, url_override: Option<&str>) -> Result<Self> {
        let mut config = Self::load(root)?;
        if let Some(url) = url_override {
            config.url = url.to_string();
        }
        Ok(config)
    }
}
