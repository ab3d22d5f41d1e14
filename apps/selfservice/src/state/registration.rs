//! # Registration Store
//!
//! The sign-up draft, persisted under `netcom:registration` so a sign-up
//! can be continued across invocations. Cleared by `reset()` once the
//! account is created.
//!
//! The password pair lives in memory only. After a restart the draft comes
//! back without it and has to be given again before submitting.

use chrono::NaiveDate;
use netcom_core::{CreateCustomerRequest, DraftField, PostalAddress, RegistrationDraft};
use std::sync::Arc;
use tracing::info;

use super::cell::PersistedCell;
use super::error::StateResult;
use super::storage::StateStorage;

pub const REGISTRATION_KEY: &str = "netcom:registration";

/// Address step input. Street, neighbourhood, city and state may come
/// from a postal-code lookup instead.
#[derive(Debug, Clone, Default)]
pub struct AddressStep {
    pub cep: String,
    pub number: String,
    pub complement: String,
    pub street: Option<String>,
    pub neighbourhood: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
}

pub struct RegistrationStore {
    cell: PersistedCell<RegistrationDraft>,
}

impl RegistrationStore {
    pub fn new(storage: Arc<dyn StateStorage>) -> Self {
        RegistrationStore {
            cell: PersistedCell::new(REGISTRATION_KEY, storage),
        }
    }

    pub async fn hydrate(&self) -> StateResult<()> {
        self.cell.hydrate(|draft| draft).await
    }

    pub fn has_hydrated(&self) -> bool {
        self.cell.has_hydrated()
    }

    pub fn draft(&self) -> RegistrationDraft {
        self.cell.read(RegistrationDraft::clone)
    }

    pub async fn set_credentials(
        &self,
        email: &str,
        password: &str,
        confirm_password: &str,
    ) -> StateResult<()> {
        self.write(|d| {
            d.set(DraftField::Email, email.trim());
            d.set(DraftField::Password, password);
            d.set(DraftField::ConfirmPassword, confirm_password);
        })
        .await
    }

    pub async fn set_password(&self, password: &str, confirm_password: &str) -> StateResult<()> {
        self.write(|d| {
            d.set(DraftField::Password, password);
            d.set(DraftField::ConfirmPassword, confirm_password);
        })
        .await
    }

    pub async fn set_personal(
        &self,
        full_name: &str,
        cpf: &str,
        birth_date: &str,
        gender: Option<&str>,
    ) -> StateResult<()> {
        self.write(|d| {
            d.set(DraftField::FullName, full_name.trim());
            d.set(DraftField::Cpf, cpf.trim());
            d.set(DraftField::BirthDate, birth_date.trim());
            if let Some(gender) = gender {
                d.set(DraftField::Gender, gender.trim());
            }
        })
        .await
    }

    /// Writes the address step. Fields left as `None` keep what is already
    /// in the draft.
    pub async fn set_address(&self, step: AddressStep) -> StateResult<()> {
        self.write(move |d| {
            d.set(DraftField::Cep, step.cep.trim());
            d.set(DraftField::Number, step.number.trim());
            d.set(DraftField::Complement, step.complement.trim());
            for (field, value) in [
                (DraftField::Street, step.street),
                (DraftField::Neighbourhood, step.neighbourhood),
                (DraftField::City, step.city),
                (DraftField::State, step.state),
            ] {
                if let Some(value) = value {
                    d.set(field, value.trim());
                }
            }
        })
        .await
    }

    pub async fn apply_postal_address(&self, address: PostalAddress) -> StateResult<()> {
        self.write(move |d| d.apply_postal_address(address)).await
    }

    pub async fn set_line(&self, iccid: &str) -> StateResult<()> {
        self.write(|d| d.set(DraftField::Iccid, iccid.trim())).await
    }

    pub async fn update_field(&self, field: DraftField, value: &str) -> StateResult<()> {
        self.write(|d| d.set(field, value)).await
    }

    /// Cross-field validation of the whole draft.
    pub fn build_payload(&self, today: NaiveDate) -> StateResult<CreateCustomerRequest> {
        Ok(self.cell.read(|d| d.build_payload(today))?)
    }

    pub async fn reset(&self) -> StateResult<()> {
        self.cell.replace(RegistrationDraft::default()).await?;
        info!(key = %self.cell.key(), "Registration draft cleared");
        Ok(())
    }

    async fn write(&self, f: impl FnOnce(&mut RegistrationDraft)) -> StateResult<()> {
        self.cell
            .update(|draft| {
                f(draft);
                Ok(())
            })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::storage::MemoryStorage;
    use crate::state::StateError;
    use netcom_core::{CoreError, DEFAULT_GENDER};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
    }

    async fn store(storage: &Arc<MemoryStorage>) -> RegistrationStore {
        let store = RegistrationStore::new(storage.clone());
        store.hydrate().await.unwrap();
        store
    }

    async fn fill(store: &RegistrationStore) {
        store
            .set_credentials("maria@example.com", "segredo1", "segredo1")
            .await
            .unwrap();
        store
            .set_personal("Maria Silva", "111.444.777-35", "10/05/1990", None)
            .await
            .unwrap();
        store
            .set_address(AddressStep {
                cep: "01310-100".into(),
                number: "1000".into(),
                complement: "ap 12".into(),
                ..AddressStep::default()
            })
            .await
            .unwrap();
        store
            .apply_postal_address(PostalAddress {
                street: "Avenida Paulista".into(),
                neighbourhood: "Bela Vista".into(),
                city: "São Paulo".into(),
                state: "SP".into(),
            })
            .await
            .unwrap();
        store.set_line("8955010000000000001").await.unwrap();
    }

    #[tokio::test]
    async fn test_draft_survives_reopen() {
        let storage = Arc::new(MemoryStorage::new());
        fill(&store(&storage).await).await;

        let reopened = store(&storage).await;
        let draft = reopened.draft();
        assert_eq!(draft.full_name, "Maria Silva");
        assert_eq!(draft.city, "São Paulo");
        assert_eq!(draft.gender, DEFAULT_GENDER);
    }

    #[tokio::test]
    async fn test_password_never_reaches_storage() {
        let storage = Arc::new(MemoryStorage::new());
        let store = store(&storage).await;
        fill(&store).await;
        assert_eq!(store.draft().password, "segredo1");

        let raw = storage.raw(REGISTRATION_KEY).unwrap();
        assert!(raw.contains("maria@example.com"));
        assert!(!raw.contains("segredo1"));

        let reopened = self::store(&storage).await;
        let draft = reopened.draft();
        assert_eq!(draft.email, "maria@example.com");
        assert!(draft.password.is_empty());
        assert!(draft.confirm_password.is_empty());

        // the rest of the draft still builds once the password is given again
        assert!(reopened.build_payload(today()).is_err());
        reopened.set_password("segredo1", "segredo1").await.unwrap();
        assert!(!storage.raw(REGISTRATION_KEY).unwrap().contains("segredo1"));
        assert_eq!(reopened.build_payload(today()).unwrap().password, "segredo1");
    }

    #[tokio::test]
    async fn test_build_payload_from_steps() {
        let storage = Arc::new(MemoryStorage::new());
        let store = store(&storage).await;
        fill(&store).await;

        let payload = store.build_payload(today()).unwrap();
        assert_eq!(payload.cpf, "11144477735");
        assert_eq!(payload.address.zip_code, "01310100");
        assert_eq!(payload.line.iccid, "8955010000000000001");
    }

    #[tokio::test]
    async fn test_incomplete_draft_fails_validation() {
        let storage = Arc::new(MemoryStorage::new());
        let store = store(&storage).await;
        store
            .set_credentials("maria@example.com", "segredo1", "segredo1")
            .await
            .unwrap();

        assert!(matches!(
            store.build_payload(today()),
            Err(StateError::Core(CoreError::Validation(_)))
        ));
    }

    #[tokio::test]
    async fn test_address_step_keeps_lookup_fields() {
        let storage = Arc::new(MemoryStorage::new());
        let store = store(&storage).await;
        fill(&store).await;

        store
            .set_address(AddressStep {
                cep: "01310100".into(),
                number: "2000".into(),
                complement: String::new(),
                ..AddressStep::default()
            })
            .await
            .unwrap();
        let draft = store.draft();
        assert_eq!(draft.number, "2000");
        assert_eq!(draft.street, "Avenida Paulista");
    }

    #[tokio::test]
    async fn test_reset_clears_persisted_draft() {
        let storage = Arc::new(MemoryStorage::new());
        let store = store(&storage).await;
        fill(&store).await;
        store.reset().await.unwrap();

        assert_eq!(store.draft(), RegistrationDraft::default());
        let reopened = RegistrationStore::new(storage.clone());
        reopened.hydrate().await.unwrap();
        assert_eq!(reopened.draft(), RegistrationDraft::default());
    }
}
