//! # Partner Client
//!
//! Sign-up and login against the partner backend, authorized with the
//! server-to-server [`PartnerToken`].
//!
//! ## Login Workflow
//! ```text
//! netcom login --cpf ... --password ...
//!      │
//!      ▼
//! validate_login()                 ← netcom-core, no request on failure
//!      │
//!      ▼
//! PartnerClient::login()  POST user/login {cpf, password}
//!      │
//!      ├── 4xx {message}  → ApiError::Api("Senha incorreta")
//!      ├── no response    → ApiError::Connection
//!      └── 200 {message, user, token}
//!              │
//!              ▼
//!      AuthStore::login(user, token)
//! ```

use netcom_core::{CreateCustomerRequest, CreatedCustomer, LoginRequest, LoginResponse};
use tracing::{info, instrument};
use url::Url;

use crate::auth::PartnerToken;
use crate::config::ApiConfig;
use crate::error::{ApiResult, Operation};
use crate::http::HttpBackend;

/// Client for the partner backend. Cheap to clone.
#[derive(Debug, Clone)]
pub struct PartnerClient {
    http: HttpBackend,
}

impl PartnerClient {
    pub fn new(base_url: Url, token: &PartnerToken) -> ApiResult<Self> {
        Ok(PartnerClient {
            http: HttpBackend::new(base_url, token.authorization()?)?,
        })
    }

    /// Builds the client from configuration. Fails when the partner token
    /// is not configured.
    pub fn from_config(config: &ApiConfig) -> ApiResult<Self> {
        Self::new(config.partner.url()?, &config.partner_token()?)
    }

    pub fn base_url(&self) -> &Url {
        self.http.base_url()
    }

    /// Creates a customer account from a completed sign-up draft.
    #[instrument(skip_all, fields(cpf = %payload.cpf))]
    pub async fn create_customer(&self, payload: &CreateCustomerRequest) -> ApiResult<CreatedCustomer> {
        let url = self.http.endpoint(&["user", "create"])?;
        let created: CreatedCustomer = self
            .http
            .post(Operation::CreateCustomer, url, payload)
            .await?;

        info!("Customer created");
        Ok(created)
    }

    /// Exchanges CPF and password for a user record and session token.
    #[instrument(skip_all, fields(cpf = %request.cpf))]
    pub async fn login(&self, request: &LoginRequest) -> ApiResult<LoginResponse> {
        let url = self.http.endpoint(&["user", "login"])?;
        let response: LoginResponse = self.http.post(Operation::Login, url, request).await?;

        info!(user_id = %response.user.id, "Login succeeded");
        Ok(response)
    }
}
