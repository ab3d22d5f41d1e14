//! # Card Store
//!
//! Payment cards saved on the device, persisted as one list under
//! `netcom:cards`. Cards are not sent anywhere.
//!
//! ## Holder CPF
//! Stored masked (`111.444.777-35`) whether it was typed with or without
//! the mask.
//!
//! ## Ids
//! A card id is the creation time in milliseconds. Two cards added within
//! the same millisecond get consecutive ids, so ids stay unique.

use chrono::Utc;
use netcom_core::format::format_cpf;
use netcom_core::validation::validate_new_card;
use netcom_core::{Card, NewCard};
use std::sync::Arc;
use tracing::info;

use super::cell::PersistedCell;
use super::error::StateResult;
use super::storage::StateStorage;

pub const CARDS_KEY: &str = "netcom:cards";

/// First free id at or after `now_ms`.
fn next_card_id(now_ms: i64, cards: &[Card]) -> String {
    let mut candidate = now_ms;
    while cards.iter().any(|c| c.id == candidate.to_string()) {
        candidate += 1;
    }
    candidate.to_string()
}

pub struct CardStore {
    cell: PersistedCell<Vec<Card>>,
}

impl CardStore {
    pub fn new(storage: Arc<dyn StateStorage>) -> Self {
        CardStore {
            cell: PersistedCell::new(CARDS_KEY, storage),
        }
    }

    pub async fn hydrate(&self) -> StateResult<()> {
        self.cell.hydrate(|cards| cards).await
    }

    pub fn has_hydrated(&self) -> bool {
        self.cell.has_hydrated()
    }

    pub fn cards(&self) -> Vec<Card> {
        self.cell.read(Vec::clone)
    }

    /// Validates and appends a card. Returns the stored card with its id.
    pub async fn add(&self, mut card: NewCard) -> StateResult<Card> {
        validate_new_card(&card)?;
        card.cpf = format_cpf(card.cpf.trim());

        let now_ms = Utc::now().timestamp_millis();
        let card = self
            .cell
            .update(|cards| {
                let card = Card::from_new(next_card_id(now_ms, cards), card);
                cards.push(card.clone());
                Ok(card)
            })
            .await?;

        info!(card_id = %card.id, "Card saved");
        Ok(card)
    }

    /// Removes the card with `id`. Unknown ids leave the list and the
    /// storage untouched and return `false`.
    pub async fn remove(&self, id: &str) -> StateResult<bool> {
        let removed = self
            .cell
            .modify(|cards| {
                let before = cards.len();
                cards.retain(|c| c.id != id);
                Ok((cards.len() != before).then_some(()))
            })
            .await?
            .is_some();

        if removed {
            info!(card_id = %id, "Card removed");
        }
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::storage::MemoryStorage;
    use crate::state::StateError;

    fn new_card() -> NewCard {
        NewCard {
            number: "4111 1111 1111 1111".into(),
            name: "MARIA SILVA".into(),
            expiry: "12/29".into(),
            cvv: "123".into(),
            cpf: "11144477735".into(),
        }
    }

    async fn store(storage: &Arc<MemoryStorage>) -> CardStore {
        let store = CardStore::new(storage.clone());
        store.hydrate().await.unwrap();
        store
    }

    #[test]
    fn test_next_card_id_bumps_on_collision() {
        let existing = Card::from_new("1000".into(), new_card());
        let taken = Card::from_new("1001".into(), new_card());
        assert_eq!(next_card_id(999, &[existing.clone()]), "999");
        assert_eq!(next_card_id(1000, &[existing, taken]), "1002");
    }

    #[tokio::test]
    async fn test_add_then_remove_leaves_empty_persisted_list() {
        let storage = Arc::new(MemoryStorage::new());
        let store = store(&storage).await;

        let card = store.add(new_card()).await.unwrap();
        assert_eq!(store.cards().len(), 1);

        assert!(store.remove(&card.id).await.unwrap());
        assert!(store.cards().is_empty());

        let reopened = CardStore::new(storage.clone());
        reopened.hydrate().await.unwrap();
        assert!(reopened.cards().is_empty());
    }

    #[tokio::test]
    async fn test_holder_cpf_stored_masked() {
        let storage = Arc::new(MemoryStorage::new());
        let store = store(&storage).await;

        let plain = store.add(new_card()).await.unwrap();
        let mut typed = new_card();
        typed.cpf = " 111.444.777-35 ".into();
        let typed = store.add(typed).await.unwrap();

        assert_eq!(plain.cpf, "111.444.777-35");
        assert_eq!(typed.cpf, plain.cpf);
        assert!(store.cards().iter().all(|c| c.cpf == "111.444.777-35"));
    }

    #[tokio::test]
    async fn test_remove_unknown_id_changes_nothing() {
        let storage = Arc::new(MemoryStorage::new());
        let store = store(&storage).await;
        store.add(new_card()).await.unwrap();
        let writes = storage.write_count();

        assert!(!store.remove("nope").await.unwrap());
        assert_eq!(store.cards().len(), 1);
        assert_eq!(storage.write_count(), writes);
    }

    #[tokio::test]
    async fn test_ids_unique_for_rapid_adds() {
        let storage = Arc::new(MemoryStorage::new());
        let store = store(&storage).await;

        let a = store.add(new_card()).await.unwrap();
        let b = store.add(new_card()).await.unwrap();
        let c = store.add(new_card()).await.unwrap();
        assert_ne!(a.id, b.id);
        assert_ne!(b.id, c.id);
        assert_ne!(a.id, c.id);
    }

    #[tokio::test]
    async fn test_invalid_card_is_not_stored() {
        let storage = Arc::new(MemoryStorage::new());
        let store = store(&storage).await;

        let mut card = new_card();
        card.cvv = "12".into();
        assert!(matches!(store.add(card).await, Err(StateError::Validation(_))));
        assert!(store.cards().is_empty());
        assert_eq!(storage.write_count(), 0);
    }

    #[tokio::test]
    async fn test_failed_write_does_not_add() {
        let storage = Arc::new(MemoryStorage::new());
        let store = store(&storage).await;
        storage.set_fail_writes(true);

        assert!(store.add(new_card()).await.is_err());
        assert!(store.cards().is_empty());
    }
}
