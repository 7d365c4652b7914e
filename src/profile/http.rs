use std::collections::BTreeMap;
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};

use crate::{Result, UsageError};

/// Converts configured `http_headers` into default headers for every
/// admin request. Blank names are skipped.
fn default_headers(headers: &BTreeMap<String, String>) -> Result<HeaderMap> {
    headers
        .iter()
        .map(|(name, value)| (name.trim(), value))
        .filter(|(name, _)| !name.is_empty())
        .map(|(name, value)| {
            let name = HeaderName::from_bytes(name.as_bytes()).map_err(|err| {
                UsageError::Config(format!("http_headers: bad name {name:?}: {err}"))
            })?;
            let value = HeaderValue::from_str(value).map_err(|err| {
                UsageError::Config(format!("http_headers: bad value for {name}: {err}"))
            })?;
            Ok::<_, UsageError>((name, value))
        })
        .collect()
}

pub(crate) fn build_http_client(
    timeout: Duration,
    headers: &BTreeMap<String, String>,
) -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(timeout)
        .default_headers(default_headers(headers)?)
        .build()
        .map_err(UsageError::Http)
}

/// Appends the configured `http_query_params` in one go, ahead of the
/// query's own parameters.
pub(crate) fn apply_http_query_params(
    req: reqwest::RequestBuilder,
    params: &BTreeMap<String, String>,
) -> reqwest::RequestBuilder {
    let pairs: Vec<(&str, &str)> = params
        .iter()
        .map(|(name, value)| (name.trim(), value.as_str()))
        .filter(|(name, _)| !name.is_empty())
        .collect();
    if pairs.is_empty() {
        return req;
    }
    req.query(&pairs)
}
