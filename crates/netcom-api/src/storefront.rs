//! # Storefront Client
//!
//! Read-only calls against the storefront/billing backend, authorized with
//! the end-user [`StorefrontToken`].
//!
//! | Method            | Request                   | Response              |
//! |-------------------|---------------------------|-----------------------|
//! | `customer`        | `GET customer/{id}`       | `Customer`            |
//! | `lines`           | `GET customer/{id}`       | `Vec<Line>`           |
//! | `line_plan`       | `GET line/{id}/plan`      | `Page<PlanItem>`      |
//! | `line_usage`      | `GET line/{id}/usage`     | `LineUsage`           |
//! | `line_payments`   | `GET line/{id}/payment`   | `Page<Payment>`       |
//! | `products`        | `GET product`             | `Page<ProductPlan>`   |

use netcom_core::{Customer, Line, LineUsage, Page, Payment, PlanItem, ProductPlan};
use tracing::{info, instrument};
use url::Url;

use crate::auth::StorefrontToken;
use crate::config::ApiConfig;
use crate::error::{ApiResult, Operation};
use crate::http::{require_id, HttpBackend};

/// Client for the storefront backend. Cheap to clone.
#[derive(Debug, Clone)]
pub struct StorefrontClient {
    http: HttpBackend,
}

impl StorefrontClient {
    pub fn new(base_url: Url, token: &StorefrontToken) -> ApiResult<Self> {
        Ok(StorefrontClient {
            http: HttpBackend::new(base_url, token.authorization()?)?,
        })
    }

    /// Builds the client from configuration. Fails when the storefront
    /// token is not configured.
    pub fn from_config(config: &ApiConfig) -> ApiResult<Self> {
        Self::new(config.storefront.url()?, &config.storefront_token()?)
    }

    pub fn base_url(&self) -> &Url {
        self.http.base_url()
    }

    /// Full customer record, lines included.
    #[instrument(skip(self))]
    pub async fn customer(&self, customer_id: &str) -> ApiResult<Customer> {
        let id = require_id("cliente", customer_id)?;
        let url = self.http.endpoint(&["customer", id])?;
        self.http.get(Operation::Customer, url).await
    }

    /// Lines owned by the customer.
    #[instrument(skip(self))]
    pub async fn lines(&self, customer_id: &str) -> ApiResult<Vec<Line>> {
        let customer = self.customer(customer_id).await?;

        info!(count = customer.lines.len(), "Fetched customer lines");
        Ok(customer.lines)
    }

    /// Plan instances attached to a line.
    #[instrument(skip(self))]
    pub async fn line_plan(&self, line_id: &str) -> ApiResult<Page<PlanItem>> {
        let id = require_id("linha", line_id)?;
        let url = self.http.endpoint(&["line", id, "plan"])?;
        self.http.get(Operation::LinePlan, url).await
    }

    /// Current data allowance snapshot of a line.
    #[instrument(skip(self))]
    pub async fn line_usage(&self, line_id: &str) -> ApiResult<LineUsage> {
        let id = require_id("linha", line_id)?;
        let url = self.http.endpoint(&["line", id, "usage"])?;
        self.http.get(Operation::LineUsage, url).await
    }

    /// Payment history of a line.
    #[instrument(skip(self))]
    pub async fn line_payments(&self, line_id: &str) -> ApiResult<Page<Payment>> {
        let id = require_id("linha", line_id)?;
        let url = self.http.endpoint(&["line", id, "payment"])?;
        self.http.get(Operation::LinePayments, url).await
    }

    /// The whole catalog, inactive products included.
    #[instrument(skip(self))]
    pub async fn products(&self) -> ApiResult<Page<ProductPlan>> {
        let url = self.http.endpoint(&["product"])?;
        self.http.get(Operation::Products, url).await
    }

    /// Catalog filtered to what the store offers.
    pub async fn active_products(&self) -> ApiResult<Vec<ProductPlan>> {
        let page = self.products().await?;
        Ok(page.items.into_iter().filter(ProductPlan::is_active).collect())
    }
}
