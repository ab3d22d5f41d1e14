//! # Payment History
//!
//! Presentation rules for a line's payments: the Portuguese status label
//! and the "one section per month" grouping of the history screen.
//!
//! ```text
//! [pay-3 Oct, pay-2 Oct, pay-1 Sep]
//!         │
//!         ▼  group_by_month(.., tz)
//! ┌──────────────────────┐
//! │ Outubro de 2026      │  pay-3, pay-2
//! ├──────────────────────┤
//! │ Setembro de 2026     │  pay-1
//! └──────────────────────┘
//! ```

use chrono::{Datelike, TimeZone};
use serde::Serialize;

use crate::types::{Payment, PaymentStatus};

/// Section title for payments the backend sent without a date.
pub const UNDATED_SECTION: &str = "Data indisponível";

const MONTHS_PT_BR: [&str; 12] = [
    "Janeiro", "Fevereiro", "Março", "Abril", "Maio", "Junho", "Julho", "Agosto", "Setembro",
    "Outubro", "Novembro", "Dezembro",
];

impl PaymentStatus {
    /// Label shown next to a payment.
    pub fn label(&self) -> &'static str {
        match self {
            PaymentStatus::Captured => "Pago",
            PaymentStatus::Refunded => "Estornado",
            PaymentStatus::Canceled => "Cancelado",
            PaymentStatus::Denied => "Recusado",
            PaymentStatus::Blocked | PaymentStatus::InsufficientPartnerBalance => "Falhou",
            PaymentStatus::Processing => "Processando",
            PaymentStatus::Created | PaymentStatus::Scheduled => "Agendado",
            PaymentStatus::Unknown => "Pendente",
        }
    }
}

/// Payments that share a calendar month.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthSection {
    pub title: String,
    pub items: Vec<Payment>,
}

/// `"Outubro de 2026"`.
pub fn month_title(month: u32, year: i32) -> String {
    let name = MONTHS_PT_BR
        .get(month.saturating_sub(1) as usize)
        .copied()
        .unwrap_or("?");
    format!("{name} de {year}")
}

/// Groups payments by the month they were paid in, as seen in `tz`.
///
/// Sections appear in the order their first payment appears in `items`;
/// payments keep their relative order inside a section. Payments without
/// a date land in [`UNDATED_SECTION`].
pub fn group_by_month<Tz: TimeZone>(items: &[Payment], tz: &Tz) -> Vec<MonthSection> {
    let mut sections: Vec<MonthSection> = Vec::new();

    for payment in items {
        let title = match payment.payed_at {
            Some(at) => {
                let local = at.with_timezone(tz);
                month_title(local.month(), local.year())
            }
            None => UNDATED_SECTION.to_string(),
        };

        match sections.iter_mut().find(|s| s.title == title) {
            Some(section) => section.items.push(payment.clone()),
            None => sections.push(MonthSection {
                title,
                items: vec![payment.clone()],
            }),
        }
    }

    sections
}

// =============================================================================
// Unit Tests
// =============================================================================
