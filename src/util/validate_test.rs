use super::*;

// =============================================================
// phone
// =============================================================

#[test]
fn phone_accepts_07_plus_eight_digits() {
    assert!(is_mobile_phone("0712345678"));
    assert_eq!(phone("0722123456"), Ok("0722123456"));
}

#[test]
fn phone_rejects_wrong_prefix_or_length() {
    assert_eq!(phone("123456789"), Err(FieldError::InvalidPhone));
    assert_eq!(phone("0812345678"), Err(FieldError::InvalidPhone));
    assert_eq!(phone("071234567"), Err(FieldError::InvalidPhone));
    assert_eq!(phone("07123456789"), Err(FieldError::InvalidPhone));
    assert_eq!(phone("07123a5678"), Err(FieldError::InvalidPhone));
    assert_eq!(phone(" 0712345678"), Err(FieldError::InvalidPhone));
}

#[test]
fn phone_blank_is_required() {
    assert_eq!(phone(""), Err(FieldError::Required));
}

// =============================================================
// min_chars / required
// =============================================================

#[test]
fn min_chars_counts_characters_after_trim() {
    assert_eq!(min_chars("Ăl", 2), Ok("Ăl"));
    assert_eq!(min_chars(" J ", 2), Err(FieldError::TooShort(2)));
    assert_eq!(min_chars("   ", 2), Err(FieldError::Required));
}

#[test]
fn required_trims() {
    assert_eq!(required("  Cluj "), Ok("Cluj"));
    assert_eq!(required(""), Err(FieldError::Required));
}

// =============================================================
// email
// =============================================================

#[test]
fn email_shape() {
    assert!(is_email("ana@example.com"));
    assert!(is_email("ana@localhost"));
    assert!(!is_email("ana.example.com"));
    assert!(!is_email("@example.com"));
    assert!(!is_email("ana@"));
    assert!(!is_email("ana@@example.com"));
    assert!(!is_email("an a@example.com"));
    assert_eq!(email(""), Err(FieldError::Required));
    assert_eq!(email("nope"), Err(FieldError::InvalidEmail));
}

// =============================================================
// iso_date
// =============================================================

#[test]
fn iso_date_parses_calendar_dates() {
    assert_eq!(iso_date("1990-05-15"), Ok(NaiveDate::from_ymd_opt(1990, 5, 15).unwrap()));
    assert_eq!(iso_date("1990-02-30"), Err(FieldError::InvalidDate));
    assert_eq!(iso_date("15/05/1990"), Err(FieldError::InvalidDate));
    assert_eq!(iso_date(""), Err(FieldError::Required));
}

// =============================================================
// password
// =============================================================

#[test]
fn password_needs_six_characters_untrimmed() {
    assert_eq!(password("secret"), Ok("secret"));
    assert_eq!(password(" abc  "), Ok(" abc  "));
    assert_eq!(password("abc"), Err(FieldError::TooShort(6)));
    assert_eq!(password(""), Err(FieldError::Required));
}
