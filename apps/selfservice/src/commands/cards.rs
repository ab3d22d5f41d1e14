//! # Card Commands
//!
//! Saved cards live on this device only. Listing shows the masked number;
//! the full number and CVV are never printed.

use netcom_core::{Card, NewCard};
use serde::Serialize;
use std::fmt;

use crate::context::AppContext;
use crate::error::{CommandError, CommandResult, ErrorCode};

/// A card as shown to the customer.
#[derive(Debug, Clone, Serialize)]
pub struct CardView {
    pub id: String,
    pub number: String,
    pub name: String,
    pub expiry: String,
}

impl From<&Card> for CardView {
    fn from(card: &Card) -> Self {
        CardView {
            id: card.id.clone(),
            number: card.masked_number(),
            name: card.name.clone(),
            expiry: card.expiry.clone(),
        }
    }
}

impl fmt::Display for CardView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}  {}  {}  {}",
            self.id, self.number, self.name, self.expiry
        )
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CardList {
    pub cards: Vec<CardView>,
}

impl fmt::Display for CardList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.cards.is_empty() {
            return f.write_str("Nenhum cartão salvo.");
        }
        for (i, card) in self.cards.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{card}")?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CardRemoved {
    pub id: String,
}

impl fmt::Display for CardRemoved {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Cartão {} removido.", self.id)
    }
}

pub fn list(ctx: &AppContext) -> CardList {
    CardList {
        cards: ctx.cards.cards().iter().map(CardView::from).collect(),
    }
}

/// Saves a card. The holder CPF defaults to the logged-in user's.
pub async fn add(ctx: &AppContext, mut card: NewCard) -> CommandResult<CardView> {
    if card.cpf.trim().is_empty() {
        if let Some(user) = ctx.auth.user() {
            card.cpf = user.cpf;
        }
    }
    let card = ctx.cards.add(card).await?;
    Ok(CardView::from(&card))
}

/// Removes a card by id. An unknown id is reported, and nothing is
/// written.
pub async fn remove(ctx: &AppContext, id: &str) -> CommandResult<CardRemoved> {
    if ctx.cards.remove(id).await? {
        Ok(CardRemoved { id: id.to_string() })
    } else {
        Err(CommandError::new(
            ErrorCode::ValidationError,
            format!("Cartão {id} não encontrado."),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::MemoryStorage;
    use netcom_api::ApiConfig;
    use netcom_core::User;
    use std::sync::Arc;

    async fn ctx() -> AppContext {
        AppContext::with_storage(Arc::new(MemoryStorage::new()), ApiConfig::default())
            .await
            .unwrap()
    }

    fn new_card(cpf: &str) -> NewCard {
        NewCard {
            number: "4111111111111111".into(),
            name: "MARIA SILVA".into(),
            expiry: "12/29".into(),
            cvv: "123".into(),
            cpf: cpf.into(),
        }
    }

    #[tokio::test]
    async fn test_list_masks_numbers() {
        let ctx = ctx().await;
        add(&ctx, new_card("11144477735")).await.unwrap();

        let list = list(&ctx);
        assert_eq!(list.cards.len(), 1);
        assert_eq!(list.cards[0].number, "•••• 1111");
        let text = list.to_string();
        assert!(!text.contains("4111111111111111"));
    }

    #[tokio::test]
    async fn test_missing_cpf_without_session_is_rejected() {
        let ctx = ctx().await;
        assert!(add(&ctx, new_card("")).await.is_err());
        assert!(list(&ctx).cards.is_empty());
    }

    #[tokio::test]
    async fn test_default_cpf_matches_typed_cpf() {
        let ctx = ctx().await;
        ctx.auth
            .login(
                User {
                    id: "u-1".into(),
                    name: "Maria Silva".into(),
                    email: "maria@example.com".into(),
                    cpf: "11144477735".into(),
                    status: "ACTIVE".into(),
                    birthdate: None,
                },
                "session-1".into(),
            )
            .await
            .unwrap();

        add(&ctx, new_card("")).await.unwrap();
        add(&ctx, new_card("111.444.777-35")).await.unwrap();
        add(&ctx, new_card("11144477735")).await.unwrap();

        let cards = ctx.cards.cards();
        assert_eq!(cards.len(), 3);
        assert!(cards.iter().all(|c| c.cpf == "111.444.777-35"));
    }

    #[tokio::test]
    async fn test_remove_unknown_id() {
        let ctx = ctx().await;
        let err = remove(&ctx, "123").await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
    }
}
