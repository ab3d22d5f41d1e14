//! # Screen Aggregates
//!
//! Two views need two independent calls each. Both calls are issued at
//! once and the view either gets both results or the first error.
//!
//! ```text
//!                ┌──► line_plan(id) ──┐
//! fetch(id) ─────┤                    ├──► LineOverview / PlanDetails
//!                └──► line_usage(id) ─┘       or the first ApiError
//!                     line_payments(id)
//! ```

use netcom_core::{LineUsage, Page, Payment, PlanItem};
use tracing::instrument;

use crate::error::ApiResult;
use crate::storefront::StorefrontClient;

/// Status of the plan instance the customer is currently on.
const ACTIVE: &str = "ACTIVE";

fn current_plan(plan: &Page<PlanItem>) -> Option<&PlanItem> {
    plan.items
        .iter()
        .find(|item| item.status == ACTIVE)
        .or_else(|| plan.items.first())
}

/// Line detail view: plan plus data usage.
#[derive(Debug, Clone)]
pub struct LineOverview {
    pub plan: Page<PlanItem>,
    pub usage: LineUsage,
}

impl LineOverview {
    #[instrument(skip(client))]
    pub async fn fetch(client: &StorefrontClient, line_id: &str) -> ApiResult<Self> {
        let (plan, usage) = tokio::try_join!(client.line_plan(line_id), client.line_usage(line_id))?;
        Ok(LineOverview { plan, usage })
    }

    /// The active plan instance, or the first one when none is active.
    pub fn current_plan(&self) -> Option<&PlanItem> {
        current_plan(&self.plan)
    }
}

/// Plan detail view: plan plus payment history.
#[derive(Debug, Clone)]
pub struct PlanDetails {
    pub plan: Page<PlanItem>,
    pub payments: Page<Payment>,
}

impl PlanDetails {
    #[instrument(skip(client))]
    pub async fn fetch(client: &StorefrontClient, line_id: &str) -> ApiResult<Self> {
        let (plan, payments) =
            tokio::try_join!(client.line_plan(line_id), client.line_payments(line_id))?;
        Ok(PlanDetails { plan, payments })
    }

    pub fn current_plan(&self) -> Option<&PlanItem> {
        current_plan(&self.plan)
    }
}
