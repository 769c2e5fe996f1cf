//! Field validators shared by the login, register and friend forms.

#[cfg(test)]
#[path = "validate_test.rs"]
mod validate_test;

use chrono::NaiveDate;

use crate::error::FieldError;

pub const MIN_NAME_LEN: usize = 2;
pub const MIN_PASSWORD_LEN: usize = 6;

/// Non-blank after trimming.
///
/// # Errors
///
/// `FieldError::Required` for empty or whitespace-only input.
pub fn required(value: &str) -> Result<&str, FieldError> {
    let trimmed = value.trim();
    if trimmed.is_empty() { Err(FieldError::Required) } else { Ok(trimmed) }
}

/// Required and at least `min` characters (not bytes).
///
/// # Errors
///
/// `FieldError::Required` or `FieldError::TooShort(min)`.
pub fn min_chars(value: &str, min: usize) -> Result<&str, FieldError> {
    let trimmed = required(value)?;
    if trimmed.chars().count() < min { Err(FieldError::TooShort(min)) } else { Ok(trimmed) }
}

/// Required and at least `MIN_PASSWORD_LEN` characters. Passwords are not trimmed.
///
/// # Errors
///
/// `FieldError::Required` or `FieldError::TooShort`.
pub fn password(value: &str) -> Result<&str, FieldError> {
    if value.is_empty() {
        return Err(FieldError::Required);
    }
    if value.chars().count() < MIN_PASSWORD_LEN { Err(FieldError::TooShort(MIN_PASSWORD_LEN)) } else { Ok(value) }
}

/// Romanian mobile number: `07` followed by exactly eight digits.
pub fn is_mobile_phone(value: &str) -> bool {
    value.len() == 10 && value.starts_with("07") && value.bytes().all(|b| b.is_ascii_digit())
}

/// # Errors
///
/// `FieldError::Required` when blank, `FieldError::InvalidPhone` otherwise.
pub fn phone(value: &str) -> Result<&str, FieldError> {
    if value.is_empty() {
        return Err(FieldError::Required);
    }
    if is_mobile_phone(value) { Ok(value) } else { Err(FieldError::InvalidPhone) }
}

/// Loose shape check: one `@`, non-empty local part and domain, no whitespace.
pub fn is_email(value: &str) -> bool {
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.is_empty()
        && !domain.contains('@')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && !value.chars().any(char::is_whitespace)
}

/// # Errors
///
/// `FieldError::Required` when blank, `FieldError::InvalidEmail` otherwise.
pub fn email(value: &str) -> Result<&str, FieldError> {
    let trimmed = required(value)?;
    if is_email(trimmed) { Ok(trimmed) } else { Err(FieldError::InvalidEmail) }
}

/// ISO `YYYY-MM-DD` date, as produced by `<input type="date">`.
///
/// # Errors
///
/// `FieldError::Required` when blank, `FieldError::InvalidDate` otherwise.
pub fn iso_date(value: &str) -> Result<NaiveDate, FieldError> {
    let trimmed = required(value)?;
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d").map_err(|_| FieldError::InvalidDate)
}
