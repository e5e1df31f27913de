//! Validation and normalization helpers for DTOs.

use validator::ValidationError;

/// Strip everything but ASCII digits from a phone string.
///
/// Duplicate detection compares these digit strings, so `"11999990000"` and
/// `"(11) 9 9999-0000"` are the same number.
pub fn normalize_phone(phone: &str) -> String {
    phone.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Reject phone strings containing letters. Punctuation and spacing are
/// allowed because the form stores the number as typed.
pub fn validate_phone(phone: &str) -> Result<(), ValidationError> {
    if phone.chars().any(|c| c.is_alphabetic()) {
        let mut err = ValidationError::new("phone_format");
        err.message = Some("Phone number must not contain letters".into());
        return Err(err);
    }
    Ok(())
}

/// Format a digit string the way the participant form displays it:
/// `(XX) X XXXX-XXXX` for mobile numbers, `(XX) XXXX-XXXX` for landlines.
/// Anything else is returned as bare digits.
pub fn format_display_phone(phone: &str) -> String {
    let digits = normalize_phone(phone);
    match digits.len() {
        11 => format!(
            "({}) {} {}-{}",
            &digits[0..2],
            &digits[2..3],
            &digits[3..7],
            &digits[7..11]
        ),
        10 => format!("({}) {}-{}", &digits[0..2], &digits[2..6], &digits[6..10]),
        _ => digits,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_strips_punctuation() {
        assert_eq!(normalize_phone("(11) 9 9999-0000"), "11999990000");
        assert_eq!(normalize_phone("11999990000"), "11999990000");
        assert_eq!(normalize_phone(""), "");
    }

    #[test]
    fn phones_with_letters_are_rejected() {
        assert!(validate_phone("(11) 9 9999-0000").is_ok());
        assert!(validate_phone("").is_ok());
        assert!(validate_phone("11 CALL-ME").is_err());
    }

    #[test]
    fn display_format_matches_the_form_mask() {
        assert_eq!(format_display_phone("11999990000"), "(11) 9 9999-0000");
        assert_eq!(format_display_phone("1133334444"), "(11) 3333-4444");
        assert_eq!(format_display_phone("999"), "999");
    }
}
