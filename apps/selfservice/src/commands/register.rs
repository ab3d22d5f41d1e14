//! # Sign-up Commands
//!
//! One command per sign-up step. Each step checks its own fields before
//! writing them to the draft; `submit` runs the cross-field checks and
//! creates the account.
//!
//! ## User Workflow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  register credentials --email --password --confirm-password            │
//! │      │  validate_email_password                                        │
//! │      ▼                                                                  │
//! │  register personal --name --cpf --birth-date [--gender]                │
//! │      │  validate_full_name, validate_cpf, validate_birth_date          │
//! │      ▼                                                                  │
//! │  register address --cep --number [--complement] [--street ...]         │
//! │      │  validate_cep, then optional postal-code lookup                 │
//! │      ▼                                                                  │
//! │  register line --iccid                                                 │
//! │      │  validate_iccid                                                 │
//! │      ▼                                                                  │
//! │  register show        (draft summary, passwords hidden)                │
//! │  register submit [--password --confirm-password]                       │
//! │      └──► build_payload ──► POST user/create ──► reset                 │
//! │              │ invalid: nothing sent, draft kept                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The draft is saved between invocations but the password pair is not, so
//! a `submit` in a later run passes the passwords again.

use chrono::NaiveDate;
use netcom_api::{PartnerClient, PostalCodeLookup};
use netcom_core::format::{format_cep, format_cpf};
use netcom_core::validation::{
    validate_birth_date, validate_cep, validate_cpf, validate_email_password, validate_full_name,
    validate_iccid,
};
use netcom_core::{DraftField, RegistrationDraft};
use serde::Serialize;
use std::fmt;
use tracing::{info, warn};

use crate::context::AppContext;
use crate::error::CommandResult;
use crate::state::AddressStep;

/// Draft summary. Passwords never leave the store through this view.
#[derive(Debug, Clone, Serialize)]
pub struct DraftView {
    pub email: String,
    pub full_name: String,
    pub cpf: String,
    pub birth_date: String,
    pub gender: String,
    pub iccid: String,
    pub cep: String,
    pub street: String,
    pub number: String,
    pub complement: String,
    pub neighbourhood: String,
    pub city: String,
    pub state: String,
    pub password_set: bool,
}

impl From<&RegistrationDraft> for DraftView {
    fn from(d: &RegistrationDraft) -> Self {
        DraftView {
            email: d.email.clone(),
            full_name: d.full_name.clone(),
            cpf: d.cpf.clone(),
            birth_date: d.birth_date.clone(),
            gender: d.gender.clone(),
            iccid: d.iccid.clone(),
            cep: d.cep.clone(),
            street: d.street.clone(),
            number: d.number.clone(),
            complement: d.complement.clone(),
            neighbourhood: d.neighbourhood.clone(),
            city: d.city.clone(),
            state: d.state.clone(),
            password_set: !d.password.is_empty(),
        }
    }
}

impl fmt::Display for DraftView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let or_dash = |v: &str| if v.is_empty() { "-".to_string() } else { v.to_string() };
        writeln!(f, "E-mail:          {}", or_dash(&self.email))?;
        writeln!(
            f,
            "Senha:           {}",
            if self.password_set { "definida" } else { "-" }
        )?;
        writeln!(f, "Nome:            {}", or_dash(&self.full_name))?;
        writeln!(f, "CPF:             {}", or_dash(&format_cpf(&self.cpf)))?;
        writeln!(f, "Nascimento:      {}", or_dash(&self.birth_date))?;
        writeln!(f, "Gênero:          {}", or_dash(&self.gender))?;
        writeln!(f, "ICCID:           {}", or_dash(&self.iccid))?;
        writeln!(f, "CEP:             {}", or_dash(&format_cep(&self.cep)))?;
        writeln!(
            f,
            "Endereço:        {}, {} {}",
            or_dash(&self.street),
            or_dash(&self.number),
            self.complement
        )?;
        write!(
            f,
            "                 {} - {}/{}",
            or_dash(&self.neighbourhood),
            or_dash(&self.city),
            or_dash(&self.state)
        )
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Submitted {
    pub message: String,
}

impl fmt::Display for Submitted {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

fn show(ctx: &AppContext) -> DraftView {
    DraftView::from(&ctx.registration.draft())
}

// =============================================================================
// Steps
// =============================================================================

pub async fn credentials(
    ctx: &AppContext,
    email: &str,
    password: &str,
    confirm_password: &str,
) -> CommandResult<DraftView> {
    validate_email_password(email, password, confirm_password)?;
    ctx.registration
        .set_credentials(email, password, confirm_password)
        .await?;
    Ok(show(ctx))
}

pub async fn personal(
    ctx: &AppContext,
    full_name: &str,
    cpf: &str,
    birth_date: &str,
    gender: Option<&str>,
    today: NaiveDate,
) -> CommandResult<DraftView> {
    validate_full_name(full_name)?;
    validate_cpf(cpf)?;
    validate_birth_date(birth_date, today)?;
    ctx.registration
        .set_personal(full_name, cpf, birth_date, gender)
        .await?;
    Ok(show(ctx))
}

/// Address step. When a lookup is available its result fills the fields
/// the caller left out; a failed lookup is logged and the step continues
/// with what was typed.
pub async fn address(
    ctx: &AppContext,
    step: AddressStep,
    lookup: Option<&dyn PostalCodeLookup>,
) -> CommandResult<DraftView> {
    let cep = validate_cep(&step.cep)?;

    let typed_street = step.street.is_some();
    ctx.registration.set_address(step).await?;

    if let Some(lookup) = lookup.filter(|_| !typed_street) {
        match lookup.lookup(&cep).await {
            Ok(address) => ctx.registration.apply_postal_address(address).await?,
            Err(e) => warn!(cep = %cep, error = %e, "Postal-code lookup failed"),
        }
    }
    Ok(show(ctx))
}

pub async fn line(ctx: &AppContext, iccid: &str) -> CommandResult<DraftView> {
    let iccid = validate_iccid(iccid)?;
    ctx.registration.set_line(&iccid).await?;
    Ok(show(ctx))
}

/// Single-field edit, for corrections from the summary.
pub async fn set_field(ctx: &AppContext, field: &str, value: &str) -> CommandResult<DraftView> {
    let field: DraftField = field.parse()?;
    ctx.registration.update_field(field, value).await?;
    Ok(show(ctx))
}

pub fn summary(ctx: &AppContext) -> DraftView {
    show(ctx)
}

pub async fn submit(
    ctx: &AppContext,
    partner: &PartnerClient,
    password: Option<(&str, &str)>,
    today: NaiveDate,
) -> CommandResult<Submitted> {
    if let Some((password, confirm_password)) = password {
        ctx.registration
            .set_password(password, confirm_password)
            .await?;
    }
    let payload = ctx.registration.build_payload(today)?;
    let created = partner.create_customer(&payload).await?;

    ctx.registration.reset().await?;
    info!(user_id = ?created.user.as_ref().map(|u| &u.id), "Account created");

    Ok(Submitted {
        message: created
            .message
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| "Conta criada com sucesso.".to_string()),
    })
}

pub async fn reset(ctx: &AppContext) -> CommandResult<DraftView> {
    ctx.registration.reset().await?;
    Ok(show(ctx))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use crate::state::MemoryStorage;
    use async_trait::async_trait;
    use netcom_api::{ApiConfig, ApiResult};
    use netcom_core::PostalAddress;
    use std::sync::Arc;

    struct FixedLookup;

    #[async_trait]
    impl PostalCodeLookup for FixedLookup {
        async fn lookup(&self, cep: &str) -> ApiResult<PostalAddress> {
            assert_eq!(cep, "01310100");
            Ok(PostalAddress {
                street: "Avenida Paulista".into(),
                neighbourhood: "Bela Vista".into(),
                city: "São Paulo".into(),
                state: "SP".into(),
            })
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
    }

    async fn ctx() -> AppContext {
        AppContext::with_storage(Arc::new(MemoryStorage::new()), ApiConfig::default())
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_step_validation_blocks_write() {
        let ctx = ctx().await;
        let err = credentials(&ctx, "maria@example.com", "segredo1", "outra123")
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(
            err.message,
            "Os campos Senha e Confirmação de senha não coincidem."
        );
        assert!(ctx.registration.draft().email.is_empty());

        assert!(personal(&ctx, "Maria", "11111111111", "10/05/1990", None, today())
            .await
            .is_err());
        assert!(personal(&ctx, "Maria", "11144477735", "01/01/2010", None, today())
            .await
            .is_err());
        assert!(ctx.registration.draft().cpf.is_empty());
    }

    #[tokio::test]
    async fn test_address_uses_lookup() {
        let ctx = ctx().await;
        let view = address(
            &ctx,
            AddressStep {
                cep: "01310-100".into(),
                number: "1000".into(),
                ..AddressStep::default()
            },
            Some(&FixedLookup),
        )
        .await
        .unwrap();
        assert_eq!(view.street, "Avenida Paulista");
        assert_eq!(view.number, "1000");
    }

    #[tokio::test]
    async fn test_show_hides_password() {
        let ctx = ctx().await;
        credentials(&ctx, "maria@example.com", "segredo1", "segredo1")
            .await
            .unwrap();
        let view = summary(&ctx);
        assert!(view.password_set);
        let text = format!("{view}");
        assert!(!text.contains("segredo1"));
        assert!(!serde_json::to_string(&view).unwrap().contains("segredo1"));
    }

    #[tokio::test]
    async fn test_set_field_rejects_unknown_field() {
        let ctx = ctx().await;
        let err = set_field(&ctx, "shoe-size", "42").await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);

        set_field(&ctx, "neighborhood", "Centro").await.unwrap();
        assert_eq!(ctx.registration.draft().neighbourhood, "Centro");
    }
}
