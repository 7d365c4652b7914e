use serde::de::DeserializeOwned;

use crate::{Result, UsageError};

/// Sends the request and turns any non-2xx status into [`UsageError::Api`]
/// carrying the untouched response body. If that body cannot be read the
/// status is still reported, via [`UsageError::ApiBody`].
pub(crate) async fn send_checked(req: reqwest::RequestBuilder) -> Result<reqwest::Response> {
    let response = req.send().await?;
    let status = response.status();
    if !status.is_success() {
        let body = match response.text().await {
            Ok(body) => body,
            Err(source) => {
                tracing::warn!(%status, error = %source, "admin api error body unreadable");
                return Err(UsageError::ApiBody { status, source });
            }
        };
        tracing::warn!(%status, body_len = body.len(), "admin api request failed");
        return Err(UsageError::Api { status, body });
    }
    Ok(response)
}

pub(crate) async fn send_checked_json<T: DeserializeOwned>(
    req: reqwest::RequestBuilder,
) -> Result<T> {
    let response = send_checked(req).await?;
    Ok(response.json::<T>().await?)
}
