//! # Response Checks
//!
//! serde rejects bodies with the wrong shape; these checks reject bodies
//! with the right shape but unusable content (an empty token, a user with
//! no id). Both failures surface as `ApiError::InvalidResponse`.

use netcom_core::{
    CreatedCustomer, Customer, Line, LineUsage, LoginResponse, Page, Payment, PlanItem,
    ProductPlan,
};

/// Semantic validation of a decoded response body.
pub trait ResponseCheck {
    /// `Err(reason)` when the value must not be handed to the caller.
    fn check(&self) -> Result<(), String> {
        Ok(())
    }
}

fn non_empty(what: &str, value: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        return Err(format!("{what} vazio"));
    }
    Ok(())
}

impl ResponseCheck for LoginResponse {
    fn check(&self) -> Result<(), String> {
        non_empty("token", &self.token)?;
        non_empty("user.id", &self.user.id)
    }
}

impl ResponseCheck for CreatedCustomer {
    fn check(&self) -> Result<(), String> {
        match &self.user {
            Some(user) => non_empty("user.id", &user.id),
            None => Ok(()),
        }
    }
}

impl ResponseCheck for Customer {
    fn check(&self) -> Result<(), String> {
        non_empty("customer.id", &self.id)?;
        self.lines.iter().try_for_each(ResponseCheck::check)
    }
}

impl ResponseCheck for Line {
    fn check(&self) -> Result<(), String> {
        non_empty("line.id", &self.id)
    }
}

impl ResponseCheck for PlanItem {
    fn check(&self) -> Result<(), String> {
        non_empty("plan.id", &self.id)?;
        self.product.check()
    }
}

impl ResponseCheck for ProductPlan {
    fn check(&self) -> Result<(), String> {
        non_empty("product.id", &self.id)?;
        if self.price.is_negative() {
            return Err(format!("produto {} com preço negativo", self.id));
        }
        Ok(())
    }
}

impl ResponseCheck for Payment {
    fn check(&self) -> Result<(), String> {
        non_empty("payment.id", &self.id)
    }
}

impl ResponseCheck for LineUsage {}

impl<T: ResponseCheck> ResponseCheck for Page<T> {
    fn check(&self) -> Result<(), String> {
        self.items.iter().try_for_each(ResponseCheck::check)
    }
}
