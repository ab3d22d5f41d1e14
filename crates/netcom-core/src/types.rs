//! # Domain Types
//!
//! Wire types for the two backends the client talks to, plus the records
//! the client keeps on the device.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  Storefront (GET, camelCase JSON)                                       │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Customer     │──►│      Line       │──►│    PlanItem     │       │
//! │  │  id, cpf, name  │   │  iccid, msisdn  │   │ status, endDate │       │
//! │  │  lines[]        │   │  status         │   │ product ────────┼──┐    │
//! │  └─────────────────┘   └───────┬─────────┘   └─────────────────┘  │    │
//! │                                │                    ┌─────────────▼──┐ │
//! │                        ┌───────┴─────────┐          │  ProductPlan   │ │
//! │                        │ LineUsage       │          │ title, price   │ │
//! │                        │ Payment         │          │ cicle (days)   │ │
//! │                        └─────────────────┘          └────────────────┘ │
//! │                                                                         │
//! │  Partner (POST)                  Device only                            │
//! │  ┌─────────────────┐             ┌─────────────────┐                    │
//! │  │ LoginRequest    │             │      Card       │                    │
//! │  │ LoginResponse   │             │ id = millis     │                    │
//! │  │ CreateCustomer  │             │ number, cvv ... │                    │
//! │  └─────────────────┘             └─────────────────┘                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every entity is read-only on the client except [`Card`], which never
//! leaves the device.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Pagination
// =============================================================================

/// Paginated envelope used by every storefront list endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub count: u64,
}

impl<T> Page<T> {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

// =============================================================================
// Customer & Lines
// =============================================================================

/// The logged-in user, as returned by the partner login.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub cpf: String,
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birthdate: Option<String>,
}

/// Full customer record from `GET customer/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: String,
    pub name: String,
    pub email: String,
    pub cpf: String,
    pub status: String,
    #[serde(default)]
    pub birthdate: Option<String>,
    #[serde(default)]
    #[ts(as = "Option<String>")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    #[ts(as = "Option<String>")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub lines: Vec<Line>,
}

/// A mobile line (SIM) owned by the customer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Line {
    pub id: String,
    pub iccid: String,
    pub msisdn: String,
    pub status: String,
}

// =============================================================================
// Plans & Products
// =============================================================================

/// A sellable plan from the storefront catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ProductPlan {
    pub id: String,
    pub title: String,
    /// First line is the headline, following lines are bullet details.
    pub subtitle: String,
    /// Sent as decimal reais on the wire.
    #[serde(with = "crate::money::reais")]
    #[ts(type = "number")]
    pub price: Money,
    /// Billing cycle in days. The backend spells it `cicle`.
    pub cicle: u32,
    pub status: String,
}

impl ProductPlan {
    /// Only `ACTIVE` products are offered in the store.
    pub fn is_active(&self) -> bool {
        self.status == "ACTIVE"
    }

    pub fn headline(&self) -> &str {
        self.subtitle.lines().next().unwrap_or("").trim()
    }

    pub fn details(&self) -> impl Iterator<Item = &str> {
        self.subtitle
            .lines()
            .skip(1)
            .map(str::trim)
            .filter(|l| !l.is_empty())
    }
}

/// A plan instance attached to a line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PlanItem {
    pub id: String,
    pub recurring: bool,
    #[serde(default)]
    #[ts(as = "Option<String>")]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(default)]
    #[ts(as = "Option<String>")]
    pub end_date: Option<DateTime<Utc>>,
    pub status: String,
    pub payment_method: String,
    pub line_id: String,
    pub product: ProductPlan,
}

// =============================================================================
// Usage
// =============================================================================

/// Data allowance snapshot for a line, in bytes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LineUsage {
    pub remaining: u64,
    pub total: u64,
    #[serde(default)]
    pub categories: Vec<UsageCategory>,
}

impl LineUsage {
    pub fn used(&self) -> u64 {
        self.total.saturating_sub(self.remaining)
    }

    /// Used share of the allowance in `0.0..=1.0`; zero when there is no
    /// allowance.
    pub fn used_fraction(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        (self.used() as f64 / self.total as f64).clamp(0.0, 1.0)
    }
}

/// One bucket of the usage breakdown (e.g. social apps, roaming).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct UsageCategory {
    pub name: String,
    pub remaining: u64,
    pub total: u64,
}

// =============================================================================
// Payments
// =============================================================================

/// Billing state of a payment. Unknown values from the backend are kept as
/// [`PaymentStatus::Unknown`] instead of failing the whole page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentStatus {
    Created,
    Processing,
    Captured,
    Scheduled,
    Canceled,
    Denied,
    Refunded,
    Blocked,
    InsufficientPartnerBalance,
    #[serde(other)]
    Unknown,
}

/// A payment against a line's plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    pub id: String,
    #[serde(with = "crate::money::reais")]
    #[ts(type = "number")]
    pub amount: Money,
    pub status: PaymentStatus,
    #[serde(default)]
    #[ts(as = "Option<String>")]
    pub payed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    #[ts(as = "Option<String>")]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(default)]
    #[ts(as = "Option<String>")]
    pub end_date: Option<DateTime<Utc>>,
}

// =============================================================================
// Partner Backend: Login & Sign-up
// =============================================================================

/// Body of `POST user/login`.
#[derive(Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LoginRequest {
    pub cpf: String,
    pub password: String,
}

impl fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginRequest")
            .field("cpf", &self.cpf)
            .field("password", &"***")
            .finish()
    }
}

/// Response of `POST user/login`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LoginResponse {
    #[serde(default)]
    pub message: Option<String>,
    pub user: User,
    pub token: String,
}

/// Body of `POST user/create`.
#[derive(Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CreateCustomerRequest {
    pub name: String,
    /// Digits only.
    pub cpf: String,
    /// As typed by the customer, `DD/MM/YYYY`.
    pub birthdate: String,
    pub email: String,
    pub password: String,
    pub gender: String,
    pub line: LineRef,
    pub address: CustomerAddress,
}

impl fmt::Debug for CreateCustomerRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CreateCustomerRequest")
            .field("name", &self.name)
            .field("cpf", &self.cpf)
            .field("email", &self.email)
            .field("line", &self.line)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LineRef {
    pub iccid: String,
}

/// Address block sent at sign-up. `zip_code` carries digits only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CustomerAddress {
    pub street: String,
    pub city: String,
    pub state: String,
    pub neighbourhood: String,
    pub zip_code: String,
    pub number: String,
    pub complement: String,
}

/// What the partner backend echoes back after creating a customer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CreatedCustomer {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub user: Option<User>,
}

/// Address fields returned by a postal-code lookup.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PostalAddress {
    pub street: String,
    pub neighbourhood: String,
    pub city: String,
    pub state: String,
}

// =============================================================================
// Saved Cards (device only)
// =============================================================================

/// A payment card saved on the device.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Card {
    /// Milliseconds since the epoch at creation, as a string.
    pub id: String,
    pub number: String,
    pub name: String,
    pub expiry: String,
    pub cvv: String,
    pub cpf: String,
}

impl Card {
    pub fn from_new(id: String, card: NewCard) -> Self {
        Card {
            id,
            number: card.number,
            name: card.name,
            expiry: card.expiry,
            cvv: card.cvv,
            cpf: card.cpf,
        }
    }

    /// Last four digits with the rest hidden: `•••• 1111`.
    pub fn masked_number(&self) -> String {
        let digits: Vec<char> = self.number.chars().filter(|c| c.is_ascii_digit()).collect();
        let tail: String = digits[digits.len().saturating_sub(4)..].iter().collect();
        format!("•••• {tail}")
    }
}

impl fmt::Debug for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Card")
            .field("id", &self.id)
            .field("number", &self.masked_number())
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// Card form input before an id is assigned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct NewCard {
    pub number: String,
    pub name: String,
    pub expiry: String,
    pub cvv: String,
    pub cpf: String,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plan_item_from_storefront_json() {
        let json = r#"{
            "id": "pi-1",
            "recurring": true,
            "endDate": "2026-11-01T00:00:00.000Z",
            "status": "ACTIVE",
            "paymentMethod": "CREDIT_CARD",
            "lineId": "ln-1",
            "product": {
                "id": "p-1",
                "title": "Netcom 20GB",
                "subtitle": "20GB de internet\nLigações ilimitadas\n WhatsApp grátis ",
                "price": 49.9,
                "cicle": 30,
                "status": "ACTIVE"
            }
        }"#;

        let item: PlanItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.line_id, "ln-1");
        assert!(item.start_date.is_none());
        assert!(item.end_date.is_some());
        assert_eq!(item.product.price.centavos(), 4990);
        assert_eq!(item.product.headline(), "20GB de internet");
        assert_eq!(
            item.product.details().collect::<Vec<_>>(),
            vec!["Ligações ilimitadas", "WhatsApp grátis"]
        );
    }

    #[test]
    fn test_payment_status_unknown_value_tolerated() {
        let json = r#"{"id":"pay-1","amount":10,"status":"CHARGEBACK"}"#;
        let payment: Payment = serde_json::from_str(json).unwrap();
        assert_eq!(payment.status, PaymentStatus::Unknown);
        assert!(payment.payed_at.is_none());

        let json = r#"{"id":"pay-2","amount":10,"status":"INSUFFICIENT_PARTNER_BALANCE"}"#;
        let payment: Payment = serde_json::from_str(json).unwrap();
        assert_eq!(payment.status, PaymentStatus::InsufficientPartnerBalance);
    }

    #[test]
    fn test_customer_lines_default_empty() {
        let json = r#"{"id":"c1","name":"Ana","email":"a@b.co","cpf":"11144477735","status":"ACTIVE"}"#;
        let customer: Customer = serde_json::from_str(json).unwrap();
        assert!(customer.lines.is_empty());
    }

    #[test]
    fn test_line_usage_fraction() {
        let usage = LineUsage {
            remaining: 25,
            total: 100,
            categories: vec![],
        };
        assert_eq!(usage.used(), 75);
        assert!((usage.used_fraction() - 0.75).abs() < f64::EPSILON);

        let empty = LineUsage {
            remaining: 0,
            total: 0,
            categories: vec![],
        };
        assert_eq!(empty.used_fraction(), 0.0);
    }

    #[test]
    fn test_create_customer_request_wire_names() {
        let req = CreateCustomerRequest {
            name: "Ana".into(),
            cpf: "11144477735".into(),
            birthdate: "01/01/1990".into(),
            email: "a@b.co".into(),
            password: "segredo".into(),
            gender: "F".into(),
            line: LineRef {
                iccid: "89551094260145182086".into(),
            },
            address: CustomerAddress {
                street: "Av. Paulista".into(),
                city: "São Paulo".into(),
                state: "SP".into(),
                neighbourhood: "Bela Vista".into(),
                zip_code: "01310100".into(),
                number: "1000".into(),
                complement: String::new(),
            },
        };
        let value = serde_json::to_value(&req).unwrap();
        assert_eq!(value["address"]["zipCode"], "01310100");
        assert_eq!(value["address"]["neighbourhood"], "Bela Vista");
        assert_eq!(value["line"]["iccid"], "89551094260145182086");
        assert!(!format!("{req:?}").contains("segredo"));
    }

    #[test]
    fn test_login_request_debug_hides_password() {
        let req = LoginRequest {
            cpf: "11144477735".into(),
            password: "segredo".into(),
        };
        assert!(!format!("{req:?}").contains("segredo"));
    }

    #[test]
    fn test_card_masked_number() {
        let card = Card {
            id: "1".into(),
            number: "4111 1111 1111 1234".into(),
            name: "ANA".into(),
            expiry: "08/29".into(),
            cvv: "123".into(),
            cpf: "11144477735".into(),
        };
        assert_eq!(card.masked_number(), "•••• 1234");
        assert!(!format!("{card:?}").contains("4111"));
    }
}
