//! # Postal-Code Lookup
//!
//! Sign-up fills street, neighbourhood, city and state from the CEP. The
//! lookup service is an external collaborator; this crate only defines the
//! seam it plugs into.

use async_trait::async_trait;
use netcom_core::PostalAddress;

use crate::error::ApiResult;

/// Resolves a CEP (8 digits) into address fields.
#[async_trait]
pub trait PostalCodeLookup: Send + Sync {
    async fn lookup(&self, cep: &str) -> ApiResult<PostalAddress>;
}
