//! # Validate Commands
//!
//! Run a form validator on its own, the way a field shows inline feedback
//! while the customer types.
//!
//! ```text
//! netcom validate cpf 111.444.777-35     → CPF válido: 111.444.777-35
//! netcom validate cpf 11111111111        → error, exit 1
//! netcom validate birth-date 10/05/1990  → Data válida (36 anos)
//! ```

use chrono::NaiveDate;
use netcom_core::format::format_cpf;
use netcom_core::validation::{age_on, validate_birth_date, validate_cpf};
use serde::Serialize;
use std::fmt;

use crate::error::CommandResult;

#[derive(Debug, Clone, Serialize)]
pub struct CpfCheck {
    pub digits: String,
    pub formatted: String,
}

impl fmt::Display for CpfCheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CPF válido: {}", self.formatted)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct BirthDateCheck {
    pub date: NaiveDate,
    pub age: i32,
}

impl fmt::Display for BirthDateCheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Data válida ({} anos)", self.age)
    }
}

pub fn cpf(input: &str) -> CommandResult<CpfCheck> {
    let digits = validate_cpf(input)?;
    Ok(CpfCheck {
        formatted: format_cpf(&digits),
        digits,
    })
}

pub fn birth_date(input: &str, today: NaiveDate) -> CommandResult<BirthDateCheck> {
    let date = validate_birth_date(input, today)?;
    Ok(BirthDateCheck {
        date,
        age: age_on(date, today),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
    }

    #[test]
    fn test_cpf_ok() {
        let check = cpf("11144477735").unwrap();
        assert_eq!(check.to_string(), "CPF válido: 111.444.777-35");
    }

    #[test]
    fn test_cpf_rejected() {
        let err = cpf("11111111111").unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
    }

    #[test]
    fn test_birth_date() {
        let check = birth_date("10/05/1990", today()).unwrap();
        assert_eq!(check.age, 36);

        let err = birth_date("01/01/2010", today()).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert!(birth_date("31/02/2000", today()).is_err());
    }
}
