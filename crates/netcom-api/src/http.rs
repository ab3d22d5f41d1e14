//! # HTTP Transport
//!
//! The one place requests are sent and failures are normalized.
//!
//! ## Request Flow
//! ```text
//! StorefrontClient::line_plan("ln-1")
//!      │
//!      ▼
//! endpoint(["line", "ln-1", "plan"])     ← segments are percent-encoded
//!      │
//!      ▼
//! send() ──── no response ───────────► error! + ApiError::Connection
//!      │
//!      ▼
//! status 2xx? ── no ─────────────────► error! + ApiError::Api { message }
//!      │ yes                               (error / error.message /
//!      ▼                                    message / fallback)
//! serde_json::from_str::<T>
//!      │
//!      ▼
//! T::check() ── violation ───────────► error! + ApiError::InvalidResponse
//!      │
//!      ▼
//!   Ok(T)
//! ```
//!
//! No retry, no backoff and no timeout override: one call, one outcome.

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, error};
use url::Url;

use crate::error::{extract_error_message, ApiError, ApiResult, Operation};
use crate::schema::ResponseCheck;

/// Longest error body copied into a log line.
const MAX_LOGGED_BODY: usize = 512;

/// A reqwest client bound to one base URL and one Authorization header.
#[derive(Debug, Clone)]
pub(crate) struct HttpBackend {
    client: Client,
    base_url: Url,
}

impl HttpBackend {
    pub(crate) fn new(base_url: Url, authorization: HeaderValue) -> ApiResult<Self> {
        if base_url.cannot_be_a_base() {
            return Err(ApiError::Config(format!("{base_url} não pode ser usada como URL base")));
        }

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, authorization);
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| ApiError::Config(format!("falha ao criar o cliente HTTP: {e}")))?;

        Ok(HttpBackend { client, base_url })
    }

    pub(crate) fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Base URL with `segments` appended, each percent-encoded.
    pub(crate) fn endpoint(&self, segments: &[&str]) -> ApiResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ApiError::Config(format!("{} não pode ser usada como URL base", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    pub(crate) async fn get<T>(&self, operation: Operation, url: Url) -> ApiResult<T>
    where
        T: DeserializeOwned + ResponseCheck,
    {
        debug!(operation = %operation, url = %url, "GET");
        self.execute(operation, self.client.get(url)).await
    }

    pub(crate) async fn post<B, T>(&self, operation: Operation, url: Url, body: &B) -> ApiResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned + ResponseCheck,
    {
        debug!(operation = %operation, url = %url, "POST");
        self.execute(operation, self.client.post(url).json(body))
            .await
    }

    async fn execute<T>(&self, operation: Operation, request: RequestBuilder) -> ApiResult<T>
    where
        T: DeserializeOwned + ResponseCheck,
    {
        let response = request.send().await.map_err(|e| {
            error!(operation = %operation, error = %e, "Network or other error");
            ApiError::Connection {
                reason: e.to_string(),
            }
        })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            error!(operation = %operation, status = status.as_u16(), error = %e, "Response body lost");
            ApiError::Connection {
                reason: e.to_string(),
            }
        })?;

        if !status.is_success() {
            error!(
                operation = %operation,
                status = status.as_u16(),
                body = %truncate(&body),
                "API error"
            );
            return Err(ApiError::Api {
                status: status.as_u16(),
                message: extract_error_message(&body, operation),
            });
        }

        decode(operation, &body)
    }
}

/// Decodes and checks a success body.
pub(crate) fn decode<T>(operation: Operation, body: &str) -> ApiResult<T>
where
    T: DeserializeOwned + ResponseCheck,
{
    let value: T = serde_json::from_str(body).map_err(|e| {
        error!(operation = %operation, error = %e, body = %truncate(body), "Undecodable response");
        ApiError::InvalidResponse {
            operation,
            reason: e.to_string(),
        }
    })?;

    value.check().map_err(|reason| {
        error!(operation = %operation, reason = %reason, "Response failed schema check");
        ApiError::InvalidResponse { operation, reason }
    })?;

    Ok(value)
}

/// Rejects blank ids before a request is built.
pub(crate) fn require_id<'a>(kind: &str, id: &'a str) -> ApiResult<&'a str> {
    let id = id.trim();
    if id.is_empty() {
        return Err(ApiError::InvalidRequest(format!("identificador de {kind} não informado")));
    }
    Ok(id)
}

fn truncate(body: &str) -> &str {
    match body.char_indices().nth(MAX_LOGGED_BODY) {
        Some((idx, _)) => &body[..idx],
        None => body,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use netcom_core::LineUsage;

    fn backend(base: &str) -> HttpBackend {
        HttpBackend::new(Url::parse(base).unwrap(), HeaderValue::from_static("Bearer t")).unwrap()
    }

    #[test]
    fn test_endpoint_with_and_without_trailing_slash() {
        let url = backend("https://api.example.com/v1/")
            .endpoint(&["line", "ln-1", "plan"])
            .unwrap();
        assert_eq!(url.as_str(), "https://api.example.com/v1/line/ln-1/plan");

        let url = backend("https://api.example.com/v1")
            .endpoint(&["customer", "c-1"])
            .unwrap();
        assert_eq!(url.as_str(), "https://api.example.com/v1/customer/c-1");
    }

    #[test]
    fn test_endpoint_escapes_ids() {
        let url = backend("https://api.example.com/v1/")
            .endpoint(&["customer", "a/b c"])
            .unwrap();
        assert_eq!(url.as_str(), "https://api.example.com/v1/customer/a%2Fb%20c");
    }

    #[test]
    fn test_decode_rejects_wrong_shape() {
        let result: ApiResult<LineUsage> = decode(Operation::LineUsage, r#"{"remaining":"lots"}"#);
        assert!(matches!(
            result,
            Err(ApiError::InvalidResponse {
                operation: Operation::LineUsage,
                ..
            })
        ));
    }

    #[test]
    fn test_require_id() {
        assert_eq!(require_id("linha", " ln-1 ").unwrap(), "ln-1");
        assert!(matches!(require_id("linha", "  "), Err(ApiError::InvalidRequest(_))));
    }

    #[test]
    fn test_truncate_respects_char_boundaries() {
        let body = "ã".repeat(MAX_LOGGED_BODY + 10);
        assert_eq!(truncate(&body).chars().count(), MAX_LOGGED_BODY);
    }
}
