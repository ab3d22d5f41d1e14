//! # Registration Draft
//!
//! The sign-up form spans several steps. Each step writes its fields into a
//! [`RegistrationDraft`]; nothing is cross-checked until the last step calls
//! [`RegistrationDraft::build_payload`].
//!
//! ## User Workflow
//! ```text
//! credentials ──► personal ──► address (CEP lookup) ──► line ──► summary
//!  email/pwd      name/cpf      street, city, ...       ICCID      │
//!                 birth date                                       ▼
//!                                                  build_payload(today)
//!                                                          │
//!                                     ValidationError ◄────┴────► CreateCustomerRequest
//! ```

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::{CoreResult, ValidationError};
use crate::types::{CreateCustomerRequest, CustomerAddress, LineRef, PostalAddress};
use crate::validation::{
    validate_birth_date, validate_cep, validate_cpf, validate_email_password, validate_full_name,
    validate_iccid,
};
use crate::DEFAULT_GENDER;

/// Sign-up fields collected so far. Empty strings mean "not filled in yet".
///
/// The password pair is never serialized: a draft read back from storage
/// always has both empty.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(default)]
pub struct RegistrationDraft {
    pub email: String,
    #[serde(skip)]
    pub password: String,
    #[serde(skip)]
    pub confirm_password: String,
    pub full_name: String,
    pub cpf: String,
    pub birth_date: String,
    pub gender: String,
    pub iccid: String,
    pub cep: String,
    pub street: String,
    pub neighbourhood: String,
    pub number: String,
    pub complement: String,
    pub city: String,
    pub state: String,
}

impl Default for RegistrationDraft {
    fn default() -> Self {
        RegistrationDraft {
            email: String::new(),
            password: String::new(),
            confirm_password: String::new(),
            full_name: String::new(),
            cpf: String::new(),
            birth_date: String::new(),
            gender: DEFAULT_GENDER.to_string(),
            iccid: String::new(),
            cep: String::new(),
            street: String::new(),
            neighbourhood: String::new(),
            number: String::new(),
            complement: String::new(),
            city: String::new(),
            state: String::new(),
        }
    }
}

impl fmt::Debug for RegistrationDraft {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegistrationDraft")
            .field("email", &self.email)
            .field("full_name", &self.full_name)
            .field("cpf", &self.cpf)
            .field("birth_date", &self.birth_date)
            .field("iccid", &self.iccid)
            .field("cep", &self.cep)
            .finish_non_exhaustive()
    }
}

/// Addressable draft fields, for generic single-field updates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftField {
    Email,
    Password,
    ConfirmPassword,
    FullName,
    Cpf,
    BirthDate,
    Gender,
    Iccid,
    Cep,
    Street,
    Neighbourhood,
    Number,
    Complement,
    City,
    State,
}

impl FromStr for DraftField {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let field = match s.replace('-', "_").as_str() {
            "email" => DraftField::Email,
            "password" => DraftField::Password,
            "confirm_password" => DraftField::ConfirmPassword,
            "full_name" | "name" => DraftField::FullName,
            "cpf" => DraftField::Cpf,
            "birth_date" | "birthdate" => DraftField::BirthDate,
            "gender" => DraftField::Gender,
            "iccid" => DraftField::Iccid,
            "cep" => DraftField::Cep,
            "street" => DraftField::Street,
            "neighbourhood" | "neighborhood" => DraftField::Neighbourhood,
            "number" => DraftField::Number,
            "complement" => DraftField::Complement,
            "city" => DraftField::City,
            "state" => DraftField::State,
            other => return Err(ValidationError::invalid(other, "campo desconhecido")),
        };
        Ok(field)
    }
}

impl RegistrationDraft {
    /// Writes one field.
    pub fn set(&mut self, field: DraftField, value: impl Into<String>) {
        let value = value.into();
        let slot = match field {
            DraftField::Email => &mut self.email,
            DraftField::Password => &mut self.password,
            DraftField::ConfirmPassword => &mut self.confirm_password,
            DraftField::FullName => &mut self.full_name,
            DraftField::Cpf => &mut self.cpf,
            DraftField::BirthDate => &mut self.birth_date,
            DraftField::Gender => &mut self.gender,
            DraftField::Iccid => &mut self.iccid,
            DraftField::Cep => &mut self.cep,
            DraftField::Street => &mut self.street,
            DraftField::Neighbourhood => &mut self.neighbourhood,
            DraftField::Number => &mut self.number,
            DraftField::Complement => &mut self.complement,
            DraftField::City => &mut self.city,
            DraftField::State => &mut self.state,
        };
        *slot = value;
    }

    /// Copies the fields a postal-code lookup resolved. Number and
    /// complement are left alone since the lookup never knows them.
    pub fn apply_postal_address(&mut self, address: PostalAddress) {
        self.street = address.street;
        self.neighbourhood = address.neighbourhood;
        self.city = address.city;
        self.state = address.state;
    }

    /// Runs every cross-field check and produces the sign-up payload.
    ///
    /// CPF and CEP are sent as digits only; the birth date is sent as typed.
    pub fn build_payload(&self, today: NaiveDate) -> CoreResult<CreateCustomerRequest> {
        validate_email_password(&self.email, &self.password, &self.confirm_password)?;
        validate_full_name(&self.full_name)?;
        let cpf = validate_cpf(&self.cpf)?;
        validate_birth_date(&self.birth_date, today)?;
        let zip_code = validate_cep(&self.cep)?;
        let iccid = validate_iccid(&self.iccid)?;

        for (field, value) in [
            ("street", &self.street),
            ("number", &self.number),
            ("neighbourhood", &self.neighbourhood),
            ("city", &self.city),
            ("state", &self.state),
        ] {
            if value.trim().is_empty() {
                return Err(ValidationError::required(field).into());
            }
        }

        let gender = if self.gender.trim().is_empty() {
            DEFAULT_GENDER.to_string()
        } else {
            self.gender.trim().to_string()
        };

        Ok(CreateCustomerRequest {
            name: self.full_name.trim().to_string(),
            cpf,
            birthdate: self.birth_date.clone(),
            email: self.email.trim().to_string(),
            password: self.password.clone(),
            gender,
            line: LineRef { iccid },
            address: CustomerAddress {
                street: self.street.trim().to_string(),
                city: self.city.trim().to_string(),
                state: self.state.trim().to_string(),
                neighbourhood: self.neighbourhood.trim().to_string(),
                zip_code,
                number: self.number.trim().to_string(),
                complement: self.complement.trim().to_string(),
            },
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
