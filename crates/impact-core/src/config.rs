use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use impact_util::errors::{ImpactError, ImpactResult};

use crate::DEFAULT_SERVICE_URL;

/// Global user configuration loaded from `~/.updateimpact/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GlobalConfig {
    #[serde(default)]
    pub submit: SubmitConfig,
}

/// Submission settings from `[submit]` in global config.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SubmitConfig {
    #[serde(default, rename = "api-key")]
    pub api_key: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default, rename = "open-browser")]
    pub open_browser: Option<bool>,
}

impl GlobalConfig {
    /// Load the global configuration, or return defaults if the file doesn't exist.
    pub fn load() -> ImpactResult<Self> {
        Self::load_from(&Self::default_path())
    }

    /// Load configuration from an explicit path, or return defaults if it doesn't exist.
    pub fn load_from(path: &Path) -> ImpactResult<Self> {
        if !path.is_file() {
            tracing::debug!("no config file at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path).map_err(|e| ImpactError::Config {
            message: format!("Failed to read {}: {e}", path.display()),
        })?;
        toml::from_str(&content).map_err(|e| {
            ImpactError::Config {
                message: format!("Failed to parse {}: {e}", path.display()),
            }
            .into()
        })
    }

    /// Returns the default path to the global config file.
    pub fn default_path() -> PathBuf {
        dirs_path().join("config.toml")
    }
}

/// Returns the path to the user data directory (`~/.updateimpact/`).
pub fn dirs_path() -> PathBuf {
    let home = std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .unwrap_or_else(|_| ".".to_string());
    Path::new(&home).join(".updateimpact")
}

/// Values given on the command line or through the environment.
///
/// These win over the config file.
#[derive(Debug, Clone, Default)]
pub struct SettingsOverrides {
    pub api_key: Option<String>,
    pub url: Option<String>,
    pub open_browser: Option<bool>,
}

/// Fully resolved submission settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub api_key: String,
    /// Base URL of the report service, without a trailing slash.
    pub url: String,
    pub open_browser: bool,
}

impl Settings {
    /// Merge overrides over the config file and apply defaults.
    ///
    /// Fails when no non-blank API key is available.
    pub fn resolve(overrides: SettingsOverrides, config: &GlobalConfig) -> ImpactResult<Self> {
        let api_key = overrides
            .api_key
            .or_else(|| config.submit.api_key.clone())
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty())
            .ok_or_else(|| ImpactError::Config {
                message: "no API key configured".to_string(),
            })?;

        let url = overrides
            .url
            .or_else(|| config.submit.url.clone())
            .map(|u| u.trim().trim_end_matches('/').to_string())
            .filter(|u| !u.is_empty())
            .unwrap_or_else(|| DEFAULT_SERVICE_URL.to_string());

        let open_browser = overrides
            .open_browser
            .or(config.submit.open_browser)
            .unwrap_or(true);

        Ok(Self {
            api_key,
            url,
            open_browser,
        })
    }
}
