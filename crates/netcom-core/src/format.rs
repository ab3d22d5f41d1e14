//! # Display Formatting
//!
//! Masks applied when values are shown back to the customer. The inverse
//! ([`digits_only`]) is applied before anything is sent to a backend.

/// Bytes in one gigabyte, as the usage screen counts them (binary GB).
pub const BYTES_PER_GB: f64 = 1024.0 * 1024.0 * 1024.0;

/// Keeps only ASCII digits.
///
/// ```rust
/// use netcom_core::format::digits_only;
///
/// assert_eq!(digits_only("111.444.777-35"), "11144477735");
/// ```
pub fn digits_only(input: &str) -> String {
    input.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// `11144477735` → `111.444.777-35`. Anything that is not 11 digits is
/// returned unchanged.
pub fn format_cpf(input: &str) -> String {
    let d = digits_only(input);
    if d.len() != 11 {
        return input.to_string();
    }
    format!("{}.{}.{}-{}", &d[0..3], &d[3..6], &d[6..9], &d[9..11])
}

/// `11987654321` → `(11) 98765-4321`.
///
/// Only 11-digit mobile numbers are masked; other inputs come back as-is.
pub fn format_msisdn(input: &str) -> String {
    let d = digits_only(input);
    if d.len() != 11 {
        return input.to_string();
    }
    format!("({}) {}-{}", &d[0..2], &d[2..7], &d[7..11])
}

/// `01310100` → `01310-100`.
pub fn format_cep(input: &str) -> String {
    let d = digits_only(input);
    if d.len() != 8 {
        return input.to_string();
    }
    format!("{}-{}", &d[0..5], &d[5..8])
}

/// Byte count as gigabytes with two decimals, e.g. `"1.50 GB"`.
pub fn bytes_to_gb_display(bytes: u64) -> String {
    format!("{:.2} GB", bytes as f64 / BYTES_PER_GB)
}

// =============================================================================
// Unit Tests
// =============================================================================
