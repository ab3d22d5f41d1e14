//! # Validation Module
//!
//! Form validation for the self-service flows: sign-up, login and saved
//! cards. Every check here is synchronous and gates submission; nothing in
//! this module builds a request.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Field checks (this module)                                   │
//! │  ├── CPF check digits, DD/MM/YYYY + age gate                           │
//! │  └── CEP, ICCID, card number / expiry / CVV masks                      │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Cross-field checks at final submission                       │
//! │  └── password == confirmation, draft completeness                      │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Backend                                                      │
//! │  └── Duplicate CPF, ICCID ownership (reported as ApiError)             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use chrono::NaiveDate;
//! use netcom_core::validation::{is_valid_birth_date_on, is_valid_cpf};
//!
//! assert!(is_valid_cpf("11144477735"));
//!
//! let today = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
//! assert!(is_valid_birth_date_on("18/10/2008", today));
//! assert!(!is_valid_birth_date_on("31/02/2000", today));
//! ```

use chrono::{Datelike, Local, NaiveDate};

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::format::digits_only;
use crate::types::NewCard;
use crate::{MINIMUM_AGE, MIN_PASSWORD_LEN};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Number of digits in a CPF.
pub const CPF_LEN: usize = 11;

/// Number of digits in a CEP (postal code).
pub const CEP_LEN: usize = 8;

/// Maximum length of a customer's full name.
pub const MAX_NAME_LEN: usize = 120;

// =============================================================================
// CPF
// =============================================================================

/// Checks a CPF (Brazilian individual taxpayer id) against its check digits.
///
/// ## Rules
/// - Every non-digit character is ignored (`111.444.777-35` is fine)
/// - Exactly 11 digits must remain
/// - All-identical sequences (`000...`, `111...`) are rejected
/// - Digit 10 and digit 11 must match the two mod-11 check digits
///
/// Never panics; any malformed input is simply `false`.
///
/// ## Example
/// ```rust
/// use netcom_core::validation::is_valid_cpf;
///
/// assert!(is_valid_cpf("11144477735"));
/// assert!(!is_valid_cpf("11144477736"));
/// assert!(!is_valid_cpf("1114447773"));
/// ```
pub fn is_valid_cpf(input: &str) -> bool {
    let digits: Vec<u32> = input.chars().filter_map(|c| c.to_digit(10)).collect();

    if digits.len() != CPF_LEN {
        return false;
    }

    if digits.iter().all(|&d| d == digits[0]) {
        return false;
    }

    check_digit(&digits[..9]) == digits[9] && check_digit(&digits[..10]) == digits[10]
}

/// Mod-11 check digit over `prefix`, weighted from `len + 1` down to 2.
fn check_digit(prefix: &[u32]) -> u32 {
    let top = prefix.len() as u32 + 1;
    let sum: u32 = prefix
        .iter()
        .enumerate()
        .map(|(i, d)| d * (top - i as u32))
        .sum();

    match (sum * 10) % 11 {
        10 | 11 => 0,
        r => r,
    }
}

/// Validates a CPF field and returns its 11 normalized digits.
///
/// Same rule as [`is_valid_cpf`], with an error that names the field for
/// inline feedback.
pub fn validate_cpf(input: &str) -> ValidationResult<String> {
    if input.trim().is_empty() {
        return Err(ValidationError::required("cpf"));
    }

    if !is_valid_cpf(input) {
        return Err(ValidationError::invalid("cpf", "dígitos verificadores não conferem"));
    }

    Ok(digits_only(input))
}

// =============================================================================
// Birth Date
// =============================================================================

/// Checks a `DD/MM/YYYY` birth date against today's local date.
///
/// Thin wrapper over [`is_valid_birth_date_on`]; prefer that one in tests.
pub fn is_valid_birth_date(input: &str) -> bool {
    is_valid_birth_date_on(input, Local::now().date_naive())
}

/// Checks a `DD/MM/YYYY` birth date, evaluated on `today`.
///
/// ## Rules
/// - The shape is exactly two digits, slash, two digits, slash, four digits
/// - The date must exist on the calendar (`31/02/2000` does not)
/// - Age in whole years, counting the birthday only once it has passed
///   this year, must be at least [`MINIMUM_AGE`]
///
/// ## User Workflow
/// ```text
/// Sign-up, step 2: "Data de nascimento"
///      │
///      ▼
/// is_valid_birth_date_on("18/10/2008", 2026-10-19) ← THIS FUNCTION
///      │
///      ├── bad shape / impossible date → false
///      ├── age < 18                    → false
///      └── otherwise                   → true, "Continuar" enabled
/// ```
pub fn is_valid_birth_date_on(input: &str, today: NaiveDate) -> bool {
    validate_birth_date(input, today).is_ok()
}

/// Parses and age-checks a birth date, returning the date on success.
///
/// Shape and calendar failures come back as [`CoreError::Validation`];
/// an existing date that is too recent is [`CoreError::Underage`].
pub fn validate_birth_date(input: &str, today: NaiveDate) -> CoreResult<NaiveDate> {
    let birth = parse_birth_date(input)?;
    let age = age_on(birth, today);

    if age < MINIMUM_AGE {
        return Err(CoreError::Underage {
            age,
            minimum: MINIMUM_AGE,
        });
    }

    Ok(birth)
}

/// Parses `DD/MM/YYYY` into a calendar date.
pub fn parse_birth_date(input: &str) -> ValidationResult<NaiveDate> {
    if input.is_empty() {
        return Err(ValidationError::required("birth_date"));
    }

    let bytes = input.as_bytes();
    let shape_ok = bytes.len() == 10
        && bytes[2] == b'/'
        && bytes[5] == b'/'
        && bytes
            .iter()
            .enumerate()
            .all(|(i, b)| i == 2 || i == 5 || b.is_ascii_digit());

    if !shape_ok {
        return Err(ValidationError::invalid("birth_date", "use o formato DD/MM/AAAA"));
    }

    // The shape check guarantees ASCII digits, so these parses cannot fail.
    let day: u32 = input[0..2].parse().unwrap_or(0);
    let month: u32 = input[3..5].parse().unwrap_or(0);
    let year: i32 = input[6..10].parse().unwrap_or(0);

    NaiveDate::from_ymd_opt(year, month, day)
        .ok_or_else(|| ValidationError::invalid("birth_date", "data inexistente"))
}

/// Age in whole years on `today`.
pub fn age_on(birth: NaiveDate, today: NaiveDate) -> i32 {
    let mut age = today.year() - birth.year();
    if (today.month(), today.day()) < (birth.month(), birth.day()) {
        age -= 1;
    }
    age
}

// =============================================================================
// Sign-up Fields
// =============================================================================

/// Validates the first sign-up step: e-mail and password pair.
///
/// ## Rules
/// - All three fields are required; a blank password counts as missing
/// - E-mail needs a local part and a dotted domain
/// - Password and confirmation must be equal
/// - Password must be at least [`MIN_PASSWORD_LEN`] characters
pub fn validate_email_password(
    email: &str,
    password: &str,
    confirm: &str,
) -> ValidationResult<()> {
    validate_email(email)?;

    if password.trim().is_empty() {
        return Err(ValidationError::required("password"));
    }
    if confirm.trim().is_empty() {
        return Err(ValidationError::required("confirm_password"));
    }
    if password != confirm {
        return Err(ValidationError::Mismatch {
            field: "confirm_password".to_string(),
            other: "password".to_string(),
        });
    }
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(ValidationError::TooShort {
            field: "password".to_string(),
            min: MIN_PASSWORD_LEN,
        });
    }

    Ok(())
}

/// Validates an e-mail address (structure only).
pub fn validate_email(email: &str) -> ValidationResult<()> {
    let email = email.trim();
    if email.is_empty() {
        return Err(ValidationError::required("email"));
    }

    let valid = match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain.split('.').count() >= 2
                && domain.split('.').all(|part| !part.is_empty())
        }
        None => false,
    };

    if !valid {
        return Err(ValidationError::invalid("email", "informe um endereço como nome@dominio.com"));
    }
    Ok(())
}

/// Validates the customer's full name.
pub fn validate_full_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ValidationError::required("full_name"));
    }
    if name.chars().count() > MAX_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: "full_name".to_string(),
            max: MAX_NAME_LEN,
        });
    }
    Ok(())
}

/// Validates a CEP and returns its 8 digits (`01310-100` → `01310100`).
pub fn validate_cep(input: &str) -> ValidationResult<String> {
    if input.trim().is_empty() {
        return Err(ValidationError::required("cep"));
    }
    let digits = digits_only(input);
    if digits.len() != CEP_LEN {
        return Err(ValidationError::invalid("cep", "deve ter 8 dígitos"));
    }
    Ok(digits)
}

/// Validates a SIM card ICCID (19 or 20 digits).
pub fn validate_iccid(input: &str) -> ValidationResult<String> {
    let input = input.trim();
    if input.is_empty() {
        return Err(ValidationError::required("iccid"));
    }
    if !input.chars().all(|c| c.is_ascii_digit()) || !(19..=20).contains(&input.len()) {
        return Err(ValidationError::invalid("iccid", "deve ter 19 ou 20 dígitos"));
    }
    Ok(input.to_string())
}

/// Validates the login form. Returns the normalized CPF.
pub fn validate_login(cpf: &str, password: &str) -> ValidationResult<String> {
    let cpf = validate_cpf(cpf)?;
    if password.is_empty() {
        return Err(ValidationError::required("password"));
    }
    Ok(cpf)
}

// =============================================================================
// Card Fields
// =============================================================================

/// Validates a card before it is saved on the device.
///
/// ## Rules
/// - Number: 16 digits once spaces are removed (`9999 9999 9999 9999`)
/// - Holder name: required
/// - Expiry: `MM/YY` with month 01-12
/// - CVV: 3 digits
/// - Holder CPF: valid check digits
pub fn validate_new_card(card: &NewCard) -> ValidationResult<()> {
    let number = card.number.trim();
    if number.is_empty() {
        return Err(ValidationError::required("number"));
    }
    let number_digits = digits_only(number);
    if number_digits.len() != 16 || number.chars().any(|c| !c.is_ascii_digit() && c != ' ') {
        return Err(ValidationError::invalid("number", "deve ter 16 dígitos"));
    }

    if card.name.trim().is_empty() {
        return Err(ValidationError::required("name"));
    }

    validate_expiry(&card.expiry)?;

    let cvv = card.cvv.trim();
    if cvv.is_empty() {
        return Err(ValidationError::required("cvv"));
    }
    if cvv.len() != 3 || !cvv.chars().all(|c| c.is_ascii_digit()) {
        return Err(ValidationError::invalid("cvv", "deve ter 3 dígitos"));
    }

    validate_cpf(&card.cpf)?;
    Ok(())
}

/// Validates a card expiry in `MM/YY` form.
pub fn validate_expiry(input: &str) -> ValidationResult<()> {
    let input = input.trim();
    if input.is_empty() {
        return Err(ValidationError::required("expiry"));
    }

    let (month, _) = input
        .split_once('/')
        .filter(|(m, y)| {
            m.len() == 2
                && y.len() == 2
                && m.chars().chain(y.chars()).all(|c| c.is_ascii_digit())
        })
        .ok_or_else(|| ValidationError::invalid("expiry", "use o formato MM/AA"))?;

    let month: i64 = month.parse().unwrap_or(0);
    if !(1..=12).contains(&month) {
        return Err(ValidationError::OutOfRange {
            field: "expiry month".to_string(),
            min: 1,
            max: 12,
        });
    }
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
