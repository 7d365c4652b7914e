use std::collections::BTreeMap;

use serde_json::Value;

use crate::Result;
use crate::profile::{
    Env, HttpAuth, UsageConfig, apply_http_query_params, build_http_client, resolve_admin_key,
};
use crate::usage::{CostParams, CostQuery};

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com";
pub const DEFAULT_API_VERSION: &str = "v1";

/// HTTP client for the organization admin API, authenticated with an admin key.
#[derive(Clone)]
pub struct AdminClient {
    pub(crate) http: reqwest::Client,
    base_url: String,
    api_version: String,
    auth: Option<HttpAuth>,
    http_query_params: BTreeMap<String, String>,
}

impl std::fmt::Debug for AdminClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminClient")
            .field("base_url", &self.base_url)
            .field("api_version", &self.api_version)
            .field("auth", &self.auth)
            .field("http_query_params", &self.http_query_params)
            .finish_non_exhaustive()
    }
}

fn default_http_client() -> reqwest::Client {
    build_http_client(UsageConfig::default().http_timeout(), &BTreeMap::new())
        .unwrap_or_else(|_| reqwest::Client::new())
}

impl AdminClient {
    /// A blank key sends requests without an `Authorization` header. A key
    /// that is not a valid header value is dropped with a warning; use
    /// [`AdminClient::try_new`] to get the error instead.
    pub fn new(admin_api_key: impl Into<String>) -> Self {
        Self::try_new(admin_api_key).unwrap_or_else(|err| {
            tracing::warn!(error = %err, "admin key rejected; requests will be unauthenticated");
            Self::unauthenticated()
        })
    }

    pub fn try_new(admin_api_key: impl Into<String>) -> Result<Self> {
        let admin_api_key = admin_api_key.into();
        let mut out = Self::unauthenticated();
        if !admin_api_key.trim().is_empty() {
            out.auth = Some(HttpAuth::bearer(&admin_api_key)?);
        }
        Ok(out)
    }

    fn unauthenticated() -> Self {
        Self {
            http: default_http_client(),
            base_url: DEFAULT_BASE_URL.to_string(),
            api_version: DEFAULT_API_VERSION.to_string(),
            auth: None,
            http_query_params: BTreeMap::new(),
        }
    }

    pub fn with_http_client(mut self, http: reqwest::Client) -> Self {
        self.http = http;
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_api_version(mut self, api_version: impl Into<String>) -> Self {
        self.api_version = api_version.into();
        self
    }

    pub async fn from_config(config: &UsageConfig, env: &Env) -> Result<Self> {
        let auth = config.auth.clone().unwrap_or_default();
        let admin_api_key = resolve_admin_key(&auth, env).await?;

        let mut out = Self::try_new(admin_api_key)?;
        out.http_query_params = config.http_query_params.clone();
        out = out.with_http_client(build_http_client(
            config.http_timeout(),
            &config.http_headers,
        )?);
        if let Some(base_url) = config.base_url.as_deref().filter(|s| !s.trim().is_empty()) {
            out = out.with_base_url(base_url.trim());
        }
        if let Some(api_version) = config
            .api_version
            .as_deref()
            .filter(|s| !s.trim().is_empty())
        {
            out = out.with_api_version(api_version.trim());
        }
        Ok(out)
    }

    /// Resolves the admin key from the default env vars only.
    pub async fn from_env(env: &Env) -> Result<Self> {
        Self::from_config(&UsageConfig::default(), env).await
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    pub fn api_version(&self) -> &str {
        self.api_version.as_str()
    }

    /// `{base_url}/{api_version}/{path}`; a base URL that already ends in the
    /// version segment is not doubled up.
    pub(crate) fn endpoint(&self, path: &str) -> String {
        let base = self.base_url.trim_end_matches('/');
        let version = self.api_version.trim_matches('/');
        let path = path.trim_start_matches('/');
        if version.is_empty() || base.ends_with(&format!("/{version}")) {
            format!("{base}/{path}")
        } else {
            format!("{base}/{version}/{path}")
        }
    }

    pub(crate) fn apply_auth(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        let req = match self.auth.as_ref() {
            Some(auth) => auth.apply(req),
            None => req,
        };
        apply_http_query_params(req, &self.http_query_params)
    }

    /// Builds a [`CostQuery`] from `params` and runs it.
    pub async fn costs(&self, params: CostParams) -> Result<Value> {
        CostQuery::fetch(self, params).await
    }
}
