//! # Commands Module
//!
//! One function per screen action. Each returns a view that prints as text
//! or, with `--json`, as JSON.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs       ◄─── You are here (dispatch)
//! ├── validate.rs  ◄─── cpf, birth-date
//! ├── auth.rs      ◄─── login, logout, whoami
//! ├── lines.rs     ◄─── lines, usage, plan, products
//! ├── register.rs  ◄─── sign-up steps and submit
//! └── cards.rs     ◄─── saved cards
//! ```
//!
//! ## How Commands Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Cli::parse()                                                           │
//! │      │                                                                  │
//! │      ▼                                                                  │
//! │  dispatch(ctx, command, json)                                           │
//! │      │   builds only the client the command needs                       │
//! │      ▼                                                                  │
//! │  lines::usage(ctx, &storefront, "ln-1") -> CommandResult<UsageView>     │
//! │      │                                                                  │
//! │      ▼                                                                  │
//! │  render(view, json) -> String ──► stdout                                │
//! │  CommandError ───────────────────► stderr, exit 1                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod auth;
pub mod cards;
pub mod lines;
pub mod register;
pub mod validate;

use chrono::{Local, NaiveDate};
use netcom_api::StorefrontClient;
use netcom_core::NewCard;
use serde::Serialize;
use std::fmt;

use crate::cli::{CardsCommand, Command, RegisterCommand, ValidateCommand};
use crate::context::AppContext;
use crate::error::{CommandError, CommandResult};
use crate::state::AddressStep;

/// Text or pretty JSON.
pub fn render<T: Serialize + fmt::Display>(value: &T, json: bool) -> CommandResult<String> {
    if json {
        serde_json::to_string_pretty(value).map_err(|e| CommandError::internal(e.to_string()))
    } else {
        Ok(value.to_string())
    }
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Runs one command and returns its rendered output.
pub async fn dispatch(ctx: &AppContext, command: Command, json: bool) -> CommandResult<String> {
    match command {
        Command::Validate(ValidateCommand::Cpf { value }) => {
            render(&validate::cpf(&value)?, json)
        }
        Command::Validate(ValidateCommand::BirthDate { value }) => {
            render(&validate::birth_date(&value, today())?, json)
        }

        Command::Login { cpf, password } => {
            let partner = ctx.partner()?;
            render(&auth::login(ctx, &partner, &cpf, &password).await?, json)
        }
        Command::Logout => render(&auth::logout(ctx).await?, json),
        Command::Whoami => render(&auth::whoami(ctx)?, json),

        Command::Lines => {
            let storefront = gated_storefront(ctx)?;
            render(&lines::lines(ctx, &storefront).await?, json)
        }
        Command::Usage { line_id } => {
            let storefront = gated_storefront(ctx)?;
            render(&lines::usage(ctx, &storefront, &line_id).await?, json)
        }
        Command::Plan { line_id } => {
            let storefront = gated_storefront(ctx)?;
            render(&lines::plan(ctx, &storefront, &line_id, &Local).await?, json)
        }
        Command::Products => {
            let storefront = ctx.storefront()?;
            render(&lines::products(&storefront).await?, json)
        }

        Command::Register(step) => dispatch_register(ctx, step, json).await,

        Command::Cards(CardsCommand::List) => render(&cards::list(ctx), json),
        Command::Cards(CardsCommand::Add {
            number,
            name,
            expiry,
            cvv,
            cpf,
        }) => {
            let card = NewCard {
                number,
                name,
                expiry,
                cvv,
                cpf,
            };
            render(&cards::add(ctx, card).await?, json)
        }
        Command::Cards(CardsCommand::Remove { id }) => render(&cards::remove(ctx, &id).await?, json),
    }
}

/// Storefront client for a session-gated command. Checks the session
/// before the client config.
fn gated_storefront(ctx: &AppContext) -> CommandResult<StorefrontClient> {
    ctx.require_user()?;
    ctx.storefront()
}

async fn dispatch_register(
    ctx: &AppContext,
    step: RegisterCommand,
    json: bool,
) -> CommandResult<String> {
    match step {
        RegisterCommand::Credentials {
            email,
            password,
            confirm_password,
        } => render(
            &register::credentials(ctx, &email, &password, &confirm_password).await?,
            json,
        ),
        RegisterCommand::Personal {
            name,
            cpf,
            birth_date,
            gender,
        } => render(
            &register::personal(ctx, &name, &cpf, &birth_date, gender.as_deref(), today()).await?,
            json,
        ),
        RegisterCommand::Address(args) => {
            let step = AddressStep {
                cep: args.cep,
                number: args.number,
                complement: args.complement,
                street: args.street,
                neighbourhood: args.neighbourhood,
                city: args.city,
                state: args.state,
            };
            // No postal-code service is wired into the CLI.
            render(&register::address(ctx, step, None).await?, json)
        }
        RegisterCommand::Line { iccid } => render(&register::line(ctx, &iccid).await?, json),
        RegisterCommand::Set { field, value } => {
            render(&register::set_field(ctx, &field, &value).await?, json)
        }
        RegisterCommand::Show => render(&register::summary(ctx), json),
        RegisterCommand::Submit {
            password,
            confirm_password,
        } => {
            let partner = ctx.partner()?;
            let password = password.as_deref().zip(confirm_password.as_deref());
            render(&register::submit(ctx, &partner, password, today()).await?, json)
        }
        RegisterCommand::Reset => render(&register::reset(ctx).await?, json),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Cli;
    use crate::error::ErrorCode;
    use crate::state::MemoryStorage;
    use clap::Parser;
    use netcom_api::ApiConfig;
    use std::sync::Arc;

    async fn ctx() -> AppContext {
        AppContext::with_storage(Arc::new(MemoryStorage::new()), ApiConfig::default())
            .await
            .unwrap()
    }

    async fn run(ctx: &AppContext, args: &[&str]) -> CommandResult<String> {
        let cli = Cli::try_parse_from(args).unwrap();
        dispatch(ctx, cli.command, cli.json).await
    }

    #[tokio::test]
    async fn test_validate_renders_text_and_json() {
        let ctx = ctx().await;
        let text = run(&ctx, &["netcom", "validate", "cpf", "11144477735"])
            .await
            .unwrap();
        assert_eq!(text, "CPF válido: 111.444.777-35");

        let json = run(&ctx, &["netcom", "--json", "validate", "cpf", "529.982.247-25"])
            .await
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["digits"], "52998224725");
    }

    #[tokio::test]
    async fn test_gated_commands_refuse_without_session() {
        let ctx = ctx().await;
        for args in [
            &["netcom", "whoami"][..],
            &["netcom", "lines"][..],
            &["netcom", "usage", "ln-1"][..],
            &["netcom", "plan", "ln-1"][..],
        ] {
            let err = match run(&ctx, args).await {
                Err(err) => err,
                Ok(out) => panic!("expected an error, got {out}"),
            };
            // no storefront token is configured either; the session wins
            assert_eq!(err.code, ErrorCode::NotAuthenticated, "{args:?}");
        }
    }

    #[tokio::test]
    async fn test_cards_round_trip() {
        let ctx = ctx().await;
        let added = run(
            &ctx,
            &[
                "netcom", "--json", "cards", "add", "--number", "4111111111111111", "--name",
                "MARIA SILVA", "--expiry", "12/29", "--cvv", "123", "--cpf", "11144477735",
            ],
        )
        .await
        .unwrap();
        let id = serde_json::from_str::<serde_json::Value>(&added).unwrap()["id"]
            .as_str()
            .unwrap()
            .to_string();

        run(&ctx, &["netcom", "cards", "remove", &id]).await.unwrap();
        assert_eq!(
            run(&ctx, &["netcom", "cards", "list"]).await.unwrap(),
            "Nenhum cartão salvo."
        );
    }
}
