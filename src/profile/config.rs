use std::collections::BTreeMap;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::{Result, UsageError};

pub(crate) const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(300);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AdminAuth {
    #[serde(rename = "api_key_env", alias = "env", alias = "api_key")]
    ApiKeyEnv {
        #[serde(default)]
        keys: Vec<String>,
    },
    #[serde(alias = "auth_command")]
    Command { command: Vec<String> },
}

impl Default for AdminAuth {
    fn default() -> Self {
        Self::ApiKeyEnv { keys: Vec::new() }
    }
}

/// Connection settings for the organization admin API.
///
/// Loaded from TOML; every field is optional and falls back to the public
/// OpenAI endpoint with the admin key taken from the environment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct UsageConfig {
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default)]
    pub api_version: Option<String>,
    #[serde(default)]
    pub http_headers: BTreeMap<String, String>,
    #[serde(default)]
    pub http_query_params: BTreeMap<String, String>,
    #[serde(default)]
    pub http_timeout_secs: Option<u64>,
    #[serde(default)]
    pub auth: Option<AdminAuth>,
}

impl UsageConfig {
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        toml::from_str(contents).map_err(|err| UsageError::Config(err.to_string()))
    }

    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = tokio::fs::read_to_string(path).await?;
        Self::from_toml_str(&contents)
            .map_err(|err| UsageError::Config(format!("{}: {err}", path.display())))
    }

    pub fn http_timeout(&self) -> Duration {
        self.http_timeout_secs
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_HTTP_TIMEOUT)
    }
}
