//! # Session Commands
//!
//! ## Login Flow
//! ```text
//! netcom login --cpf 111.444.777-35 --password ******
//!      │
//!      ▼
//! validate_login()  ── invalid ──► VALIDATION_ERROR, nothing sent
//!      │
//!      ▼
//! PartnerClient::login() ── error ──► API_ERROR / CONNECTION_ERROR
//!      │                              (previous session untouched)
//!      ▼
//! AuthStore::login(user, token)
//!      │
//!      ▼
//! "Bem-vinda(o), Maria Silva"
//! ```

use netcom_api::PartnerClient;
use netcom_core::format::format_cpf;
use netcom_core::validation::validate_login;
use netcom_core::{LoginRequest, User};
use serde::Serialize;
use std::fmt;
use tracing::info;

use crate::context::AppContext;
use crate::error::CommandResult;

/// The logged-in user, as shown by `login` and `whoami`.
#[derive(Debug, Clone, Serialize)]
pub struct SessionView {
    pub user: User,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl fmt::Display for SessionView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(message) = &self.message {
            writeln!(f, "{message}")?;
        }
        writeln!(f, "{}", self.user.name)?;
        writeln!(f, "  E-mail: {}", self.user.email)?;
        write!(f, "  CPF:    {}", format_cpf(&self.user.cpf))
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct LoggedOut {
    pub was_authenticated: bool,
}

impl fmt::Display for LoggedOut {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.was_authenticated {
            f.write_str("Sessão encerrada.")
        } else {
            f.write_str("Nenhuma sessão ativa.")
        }
    }
}

pub async fn login(
    ctx: &AppContext,
    partner: &PartnerClient,
    cpf: &str,
    password: &str,
) -> CommandResult<SessionView> {
    let cpf = validate_login(cpf, password)?;

    let response = partner
        .login(&LoginRequest {
            cpf,
            password: password.to_string(),
        })
        .await?;

    ctx.auth
        .login(response.user.clone(), response.token)
        .await?;

    info!(user_id = %response.user.id, "Logged in");
    Ok(SessionView {
        user: response.user,
        message: response.message.filter(|m| !m.trim().is_empty()),
    })
}

pub async fn logout(ctx: &AppContext) -> CommandResult<LoggedOut> {
    let was_authenticated = ctx.auth.is_authenticated();
    ctx.auth.logout().await?;
    Ok(LoggedOut { was_authenticated })
}

pub fn whoami(ctx: &AppContext) -> CommandResult<SessionView> {
    Ok(SessionView {
        user: ctx.require_user()?,
        message: None,
    })
}
