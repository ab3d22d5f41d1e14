//! # Line Commands
//!
//! Read-only views over the customer's lines, plans and the catalog.
//!
//! ## Screens
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  netcom lines                                                          │
//! │    ln-1  (11) 98765-4321  ACTIVE  ICCID 8955010000000000001            │
//! │                                                                         │
//! │  netcom usage ln-1                 plan + usage, fetched together      │
//! │    Netcom 20GB  R$ 49,90 / 30 dias                                     │
//! │    Restante: 5.00 GB de 20.00 GB (75% usado)                           │
//! │                                                                         │
//! │  netcom plan ln-1                  plan + payments, fetched together   │
//! │    Outubro de 2026                                                     │
//! │      R$ 49,90  Pago  05/10/2026                                        │
//! │                                                                         │
//! │  netcom products                   ACTIVE products only                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{Local, TimeZone};
use netcom_api::{LineOverview, PlanDetails, StorefrontClient};
use netcom_core::format::{bytes_to_gb_display, format_msisdn};
use netcom_core::payments::{group_by_month, MonthSection};
use netcom_core::{Line, LineUsage, PlanItem, ProductPlan};
use serde::Serialize;
use std::fmt;

use crate::context::AppContext;
use crate::error::CommandResult;

// =============================================================================
// Views
// =============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct LinesView {
    pub lines: Vec<Line>,
}

impl fmt::Display for LinesView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.lines.is_empty() {
            return f.write_str("Nenhuma linha encontrada.");
        }
        for (i, line) in self.lines.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(
                f,
                "{}  {}  {}  ICCID {}",
                line.id,
                format_msisdn(&line.msisdn),
                line.status,
                line.iccid
            )?;
        }
        Ok(())
    }
}

fn write_plan(f: &mut fmt::Formatter<'_>, plan: Option<&PlanItem>) -> fmt::Result {
    match plan {
        Some(item) => write!(
            f,
            "{}  {} / {} dias  ({})",
            item.product.title, item.product.price, item.product.cicle, item.status
        ),
        None => f.write_str("Nenhum plano ativo."),
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct UsageView {
    pub line_id: String,
    pub plan: Option<PlanItem>,
    pub usage: LineUsage,
}

impl fmt::Display for UsageView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_plan(f, self.plan.as_ref())?;
        writeln!(f)?;
        write!(
            f,
            "Restante: {} de {} ({:.0}% usado)",
            bytes_to_gb_display(self.usage.remaining),
            bytes_to_gb_display(self.usage.total),
            self.usage.used_fraction() * 100.0
        )?;
        for category in &self.usage.categories {
            write!(
                f,
                "\n  {}: {} de {}",
                category.name,
                bytes_to_gb_display(category.remaining),
                bytes_to_gb_display(category.total)
            )?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PlanView {
    pub line_id: String,
    pub plan: Option<PlanItem>,
    pub history: Vec<MonthSection>,
}

impl fmt::Display for PlanView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_plan(f, self.plan.as_ref())?;
        if let Some(plan) = &self.plan {
            let headline = plan.product.headline();
            if !headline.is_empty() {
                write!(f, "\n  {headline}")?;
            }
            for detail in plan.product.details() {
                write!(f, "\n  • {detail}")?;
            }
        }

        if self.history.is_empty() {
            return f.write_str("\n\nNenhum pagamento encontrado.");
        }
        for section in &self.history {
            write!(f, "\n\n{}", section.title)?;
            for payment in &section.items {
                write!(f, "\n  {}  {}", payment.amount, payment.status.label())?;
                if let Some(at) = payment.payed_at {
                    write!(f, "  {}", at.with_timezone(&Local).format("%d/%m/%Y"))?;
                }
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ProductsView {
    pub products: Vec<ProductPlan>,
}

impl fmt::Display for ProductsView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.products.is_empty() {
            return f.write_str("Nenhum produto disponível.");
        }
        for (i, product) in self.products.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(
                f,
                "{}  {} / {} dias",
                product.title, product.price, product.cicle
            )?;
            let headline = product.headline();
            if !headline.is_empty() {
                write!(f, "\n  {headline}")?;
            }
        }
        Ok(())
    }
}

// =============================================================================
// Commands
// =============================================================================

pub async fn lines(ctx: &AppContext, storefront: &StorefrontClient) -> CommandResult<LinesView> {
    let user = ctx.require_user()?;
    let lines = storefront.lines(&user.id).await?;
    Ok(LinesView { lines })
}

pub async fn usage(
    ctx: &AppContext,
    storefront: &StorefrontClient,
    line_id: &str,
) -> CommandResult<UsageView> {
    ctx.require_user()?;
    let overview = LineOverview::fetch(storefront, line_id).await?;
    Ok(UsageView {
        line_id: line_id.to_string(),
        plan: overview.current_plan().cloned(),
        usage: overview.usage,
    })
}

/// Plan and payment history, grouped by month in `tz`.
pub async fn plan<Tz: TimeZone>(
    ctx: &AppContext,
    storefront: &StorefrontClient,
    line_id: &str,
    tz: &Tz,
) -> CommandResult<PlanView> {
    ctx.require_user()?;
    let details = PlanDetails::fetch(storefront, line_id).await?;
    Ok(PlanView {
        line_id: line_id.to_string(),
        plan: details.current_plan().cloned(),
        history: group_by_month(&details.payments.items, tz),
    })
}

pub async fn products(storefront: &StorefrontClient) -> CommandResult<ProductsView> {
    Ok(ProductsView {
        products: storefront.active_products().await?,
    })
}
