//! Common validation utilities.

use validator::ValidationError;

/// Validates that a required text value is present (not empty or whitespace).
pub fn validate_present(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut err = ValidationError::new("required");
        err.message = Some("Value is required".into());
        Err(err)
    } else {
        Ok(())
    }
}

/// Validates an integer-like string field.
///
/// An empty value is accepted (the field is simply unset); anything else must
/// parse as a non-negative integer.
pub fn validate_numeric_text(value: &str) -> Result<(), ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(());
    }

    match trimmed.parse::<u64>() {
        Ok(_) => Ok(()),
        Err(_) => {
            let mut err = ValidationError::new("numeric");
            err.message = Some("Value must be a whole number".into());
            Err(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_present() {
        assert!(validate_present("Ana").is_ok());
        assert!(validate_present(" x ").is_ok());
        assert!(validate_present("").is_err());
        assert!(validate_present("   ").is_err());
    }

    #[test]
    fn test_validate_present_error_message() {
        let err = validate_present("").unwrap_err();
        assert_eq!(err.message.unwrap().to_string(), "Value is required");
    }

    #[test]
    fn test_validate_numeric_text() {
        assert!(validate_numeric_text("").is_ok());
        assert!(validate_numeric_text("0").is_ok());
        assert!(validate_numeric_text("3").is_ok());
        assert!(validate_numeric_text(" 12 ").is_ok());
        assert!(validate_numeric_text("three").is_err());
        assert!(validate_numeric_text("-1").is_err());
        assert!(validate_numeric_text("1.5").is_err());
    }

    #[test]
    fn test_validate_numeric_text_has_no_upper_bound() {
        assert!(validate_numeric_text("20000").is_ok());
        let err = validate_numeric_text("2.0").unwrap_err();
        assert_eq!(err.code, "numeric");
    }
}
