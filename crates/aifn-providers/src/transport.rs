use reqwest::{
    Client as HttpClient,
    header::{HeaderMap, HeaderName, HeaderValue},
};
use serde_json::Value;

use aifn_core::provider::HttpRequestParts;

use crate::error::HttpError;

/// Single-shot JSON POST.
///
/// Wraps a `reqwest::Client`, so cloning is cheap and connections are pooled.
/// Retries and cancellation live in [`crate::AiClient`].
#[derive(Debug, Clone)]
pub struct Transport {
    http: HttpClient,
}

impl Transport {
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }

    /// POST `parts.body` as JSON and decode the JSON reply.
    ///
    /// Non-success statuses become [`HttpError::Api`] with the raw body.
    #[cfg_attr(not(feature = "tracing"), allow(unused_variables))]
    pub async fn post(&self, parts: &HttpRequestParts, attempt: u32) -> Result<Value, HttpError> {
        let headers = header_map(parts)?;

        #[cfg(feature = "tracing")]
        tracing::debug!(attempt, "posting AI request");

        let resp = self
            .http
            .post(&parts.url)
            .headers(headers)
            .json(&parts.body)
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            #[cfg(feature = "tracing")]
            tracing::warn!(attempt, %status, "provider returned non-success status");
            return Err(HttpError::Api { status, body });
        }

        let bytes = resp.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

fn header_map(parts: &HttpRequestParts) -> Result<HeaderMap, HttpError> {
    let mut headers = HeaderMap::with_capacity(parts.headers.len());
    for (name, value) in &parts.headers {
        let name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|_| HttpError::InvalidHeader(name.clone()))?;
        let value = HeaderValue::from_str(value)
            .map_err(|_| HttpError::InvalidHeader(name.as_str().to_owned()))?;
        headers.insert(name, value);
    }
    Ok(headers)
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use serde_json::json;

    use super::*;

    #[test]
    fn header_map_rejects_control_characters() {
        let parts = HttpRequestParts {
            url: "http://localhost".into(),
            headers: BTreeMap::from([("authorization".into(), "Bearer a\nb".into())]),
            body: json!({}),
        };
        let err = header_map(&parts).unwrap_err();
        assert!(matches!(err, HttpError::InvalidHeader(name) if name == "authorization"));
    }

    #[test]
    fn header_map_copies_every_header() {
        let parts = HttpRequestParts {
            url: "http://localhost".into(),
            headers: HttpRequestParts::json_headers(),
            body: json!({}),
        };
        let headers = header_map(&parts).unwrap();
        assert_eq!(headers["content-type"], "application/json");
    }
}
