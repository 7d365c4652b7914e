use reqwest::header::{AUTHORIZATION, HeaderName, HeaderValue};
use serde::Deserialize;

use crate::{Result, UsageError};

use super::config::AdminAuth;
use super::env::Env;

/// Env vars consulted for the admin key when the config names none.
pub const DEFAULT_ADMIN_KEYS: &[&str] = &["OPENAI_ADMIN_KEY", "OPENAI_ADMIN_API_KEY"];

#[derive(Clone)]
pub(crate) struct HttpAuth {
    pub(crate) header: HeaderName,
    pub(crate) value: HeaderValue,
}

impl std::fmt::Debug for HttpAuth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpAuth")
            .field("header", &self.header)
            .field("value", &"<redacted>")
            .finish()
    }
}

impl HttpAuth {
    pub(crate) fn bearer(token: &str) -> Result<Self> {
        let mut value = HeaderValue::from_str(&format!("Bearer {}", token.trim()))
            .map_err(|err| UsageError::Config(format!("invalid admin key header value: {err}")))?;
        value.set_sensitive(true);
        Ok(Self {
            header: AUTHORIZATION,
            value,
        })
    }

    pub(crate) fn apply(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        req.header(self.header.clone(), self.value.clone())
    }
}

pub async fn resolve_admin_key(auth: &AdminAuth, env: &Env) -> Result<String> {
    resolve_admin_key_with_default_keys(auth, env, DEFAULT_ADMIN_KEYS).await
}

pub async fn resolve_admin_key_with_default_keys(
    auth: &AdminAuth,
    env: &Env,
    default_keys: &[&str],
) -> Result<String> {
    match auth {
        AdminAuth::ApiKeyEnv { keys } => {
            let tried: Vec<&str> = if keys.is_empty() {
                default_keys.to_vec()
            } else {
                keys.iter().map(String::as_str).collect()
            };
            env.first_of(tried.iter().copied()).ok_or_else(|| {
                UsageError::AuthCommand(format!(
                    "missing admin key env (tried: {})",
                    tried.join(", ")
                ))
            })
        }
        AdminAuth::Command { command } => {
            let (program, args) = command
                .split_first()
                .ok_or_else(|| UsageError::AuthCommand("command is empty".to_string()))?;
            let output = tokio::process::Command::new(program)
                .args(args)
                .output()
                .await
                .map_err(|err| UsageError::AuthCommand(format!("spawn {program}: {err}")))?;
            if !output.status.success() {
                return Err(UsageError::AuthCommand(format!(
                    "command failed with status {}",
                    output.status
                )));
            }

            #[derive(Deserialize)]
            struct AuthCommandOutput {
                #[serde(default)]
                api_key: Option<String>,
                #[serde(default)]
                token: Option<String>,
            }

            let stdout = String::from_utf8_lossy(&output.stdout);
            let parsed = serde_json::from_str::<AuthCommandOutput>(stdout.trim())?;
            parsed
                .api_key
                .or(parsed.token)
                .map(|token| token.trim().to_string())
                .filter(|token| !token.is_empty())
                .ok_or_else(|| UsageError::AuthCommand("json missing api_key/token".to_string()))
        }
    }
}
