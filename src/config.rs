//! Remote bin settings
//!
//! Bin ids and the shared credential are resolved at every call, either from
//! the process environment or from fixed values (a TOML file or a test).
//! Nothing is cached between calls.

use crate::error::RemoteError;
use anyhow::{Context, Result};
use chrono::Weekday;
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Base URL of the document store when none is configured
pub const DEFAULT_ENDPOINT: &str = "https://api.jsonbin.io/v3/b";

/// Environment variable holding the Ga tree bin id
pub const TREE_BIN_VAR: &str = "VITE_JSONBIN_BIN_ID";
/// Environment variable holding the week table bin id
pub const WEEK_BIN_VAR: &str = "VITE_JSONBIN_BIN_ID_WEEK";
/// Environment variable holding the credential shared by both bins
pub const API_KEY_VAR: &str = "VITE_JSONBIN_API_KEY";
/// Optional environment variable overriding [`DEFAULT_ENDPOINT`]
pub const ENDPOINT_VAR: &str = "JSONBIN_ENDPOINT";

/// Fully resolved settings for one request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinSettings {
    pub endpoint: String,
    pub bin_id: String,
    pub api_key: String,
}

impl BinSettings {
    pub fn latest_url(&self) -> String {
        format!("{}/latest", self.bin_url())
    }

    pub fn bin_url(&self) -> String {
        format!("{}/{}", self.endpoint.trim_end_matches('/'), self.bin_id)
    }
}

/// Where a store looks up its bin settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingsSource {
    /// Read the named environment variables at call time
    Env { bin_var: String, key_var: String },
    /// Use the given values; `None` behaves like an unset variable
    Fixed {
        endpoint: String,
        bin_id: Option<String>,
        api_key: Option<String>,
    },
}

impl SettingsSource {
    /// Environment lookup for the Ga tree bin
    pub fn tree_env() -> Self {
        Self::Env {
            bin_var: TREE_BIN_VAR.to_string(),
            key_var: API_KEY_VAR.to_string(),
        }
    }

    /// Environment lookup for the week table bin
    pub fn week_env() -> Self {
        Self::Env {
            bin_var: WEEK_BIN_VAR.to_string(),
            key_var: API_KEY_VAR.to_string(),
        }
    }

    pub fn fixed(endpoint: impl Into<String>, bin_id: Option<&str>, api_key: Option<&str>) -> Self {
        Self::Fixed {
            endpoint: endpoint.into(),
            bin_id: bin_id.map(str::to_string),
            api_key: api_key.map(str::to_string),
        }
    }

    /// Resolve the settings for a request about to be made
    ///
    /// Blank values count as missing.
    pub fn resolve(&self) -> Result<BinSettings, RemoteError> {
        let (endpoint, bin_id, api_key, bin_name, key_name) = match self {
            Self::Env { bin_var, key_var } => (
                non_empty(std::env::var(ENDPOINT_VAR).ok())
                    .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string()),
                std::env::var(bin_var).ok(),
                std::env::var(key_var).ok(),
                bin_var.as_str(),
                key_var.as_str(),
            ),
            Self::Fixed {
                endpoint,
                bin_id,
                api_key,
            } => (
                endpoint.clone(),
                bin_id.clone(),
                api_key.clone(),
                "bin_id",
                "api_key",
            ),
        };

        match (non_empty(bin_id), non_empty(api_key)) {
            (Some(bin_id), Some(api_key)) => Ok(BinSettings {
                endpoint,
                bin_id,
                api_key,
            }),
            _ => Err(RemoteError::MissingCredentials {
                bin_var: bin_name.to_string(),
                key_var: key_name.to_string(),
            }),
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Optional TOML configuration file
///
/// ```toml
/// endpoint = "https://api.jsonbin.io/v3/b"
/// api_key = "..."
/// tree_bin_id = "..."
/// week_bin_id = "..."
/// first_day_of_week = "Sunday"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub endpoint: Option<String>,
    pub api_key: Option<String>,
    pub tree_bin_id: Option<String>,
    pub week_bin_id: Option<String>,
    pub first_day_of_week: Option<String>,
}

impl FileConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: FileConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        Ok(config)
    }

    fn endpoint(&self) -> String {
        self.endpoint
            .clone()
            .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string())
    }

    pub fn tree_source(&self) -> SettingsSource {
        SettingsSource::Fixed {
            endpoint: self.endpoint(),
            bin_id: self.tree_bin_id.clone(),
            api_key: self.api_key.clone(),
        }
    }

    pub fn week_source(&self) -> SettingsSource {
        SettingsSource::Fixed {
            endpoint: self.endpoint(),
            bin_id: self.week_bin_id.clone(),
            api_key: self.api_key.clone(),
        }
    }

    /// Parsed `first_day_of_week`, if set
    pub fn first_day(&self) -> Result<Option<Weekday>> {
        self.first_day_of_week
            .as_deref()
            .map(|day| {
                day.parse::<Weekday>()
                    .map_err(|_| anyhow::anyhow!("Invalid first_day_of_week '{}'", day))
            })
            .transpose()
    }
}
