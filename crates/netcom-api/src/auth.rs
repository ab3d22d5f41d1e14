//! # Backend Credentials
//!
//! The two backends use different credentials, and mixing them up leaks a
//! server-to-server secret to a public endpoint (or the other way round).
//! Each token is its own type, and each client constructor accepts only
//! its own type.
//!
//! ```text
//! ┌────────────────────┐                    ┌────────────────────┐
//! │  StorefrontToken   │──► StorefrontClient ──► GET customer/..  │
//! │  (end-user scope)  │                    │   GET line/..      │
//! └────────────────────┘                    └────────────────────┘
//! ┌────────────────────┐                    ┌────────────────────┐
//! │   PartnerToken     │──► PartnerClient ────► POST user/login   │
//! │ (server-to-server) │                    │   POST user/create │
//! └────────────────────┘                    └────────────────────┘
//! ```

use reqwest::header::HeaderValue;
use secrecy::{ExposeSecret, SecretString};
use std::fmt;

use crate::error::{ApiError, ApiResult};

fn bearer_header(token: &SecretString) -> ApiResult<HeaderValue> {
    let mut value = HeaderValue::from_str(&format!("Bearer {}", token.expose_secret()))
        .map_err(|e| ApiError::Config(format!("token não é um valor de cabeçalho válido: {e}")))?;
    value.set_sensitive(true);
    Ok(value)
}

/// Bearer token for the storefront/billing backend.
#[derive(Clone)]
pub struct StorefrontToken(SecretString);

impl StorefrontToken {
    pub fn new(token: SecretString) -> Self {
        StorefrontToken(token)
    }

    pub(crate) fn authorization(&self) -> ApiResult<HeaderValue> {
        bearer_header(&self.0)
    }
}

impl fmt::Debug for StorefrontToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("StorefrontToken([REDACTED])")
    }
}

/// Bearer token for the partner backend (sign-up and login).
#[derive(Clone)]
pub struct PartnerToken(SecretString);

impl PartnerToken {
    pub fn new(token: SecretString) -> Self {
        PartnerToken(token)
    }

    pub(crate) fn authorization(&self) -> ApiResult<HeaderValue> {
        bearer_header(&self.0)
    }
}

impl fmt::Debug for PartnerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PartnerToken([REDACTED])")
    }
}
