use crate::utils::error::ValidationError;
use rust_decimal::Decimal;
use std::fmt::Display;

/// Literal the CSV output uses for "no such reference"; never a legal name.
pub const RESERVED_NAME: &str = "None";

pub trait Validate {
    fn validate(&self) -> std::result::Result<(), ValidationError>;
}

pub fn validate_name(field_name: &str, value: &str, max_len: usize) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Err(ValidationError::Empty {
            field: field_name.to_string(),
        });
    }

    validate_max_chars(field_name, value, max_len)?;

    if value == RESERVED_NAME {
        return Err(ValidationError::ReservedName {
            field: field_name.to_string(),
        });
    }
    Ok(())
}

pub fn validate_max_chars(field_name: &str, value: &str, max_len: usize) -> Result<(), ValidationError> {
    let len = value.chars().count();
    if len > max_len {
        return Err(ValidationError::TooLong {
            field: field_name.to_string(),
            max: max_len,
            len,
        });
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<(), ValidationError> {
    if value < min || value > max {
        return Err(ValidationError::OutOfRange {
            field: field_name.to_string(),
            value: value.to_string(),
            min: min.to_string(),
            max: max.to_string(),
        });
    }
    Ok(())
}

pub fn validate_non_negative(field_name: &str, value: Decimal) -> Result<(), ValidationError> {
    if value < Decimal::ZERO {
        return Err(ValidationError::OutOfRange {
            field: field_name.to_string(),
            value: value.to_string(),
            min: "0".to_string(),
            max: "inf".to_string(),
        });
    }
    Ok(())
}

pub fn validate_multiple_of(field_name: &str, value: Decimal, step: Decimal) -> Result<(), ValidationError> {
    if !(value % step).is_zero() {
        return Err(ValidationError::NotMultiple {
            field: field_name.to_string(),
            value: value.to_string(),
            step: step.to_string(),
        });
    }
    Ok(())
}

pub fn validate_max_entries<T>(field_name: &str, items: &[T], max: usize) -> Result<(), ValidationError> {
    if items.len() > max {
        return Err(ValidationError::TooMany {
            field: field_name.to_string(),
            max,
            len: items.len(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_name() {
        assert!(validate_name("contact.name", "Fire Dept", 16).is_ok());
        assert!(matches!(
            validate_name("contact.name", "", 16),
            Err(ValidationError::Empty { .. })
        ));
        assert!(matches!(
            validate_name("contact.name", "None", 16),
            Err(ValidationError::ReservedName { .. })
        ));
        assert!(matches!(
            validate_name("contact.name", "Seventeen chars!!", 16),
            Err(ValidationError::TooLong { max: 16, len: 17, .. })
        ));
        // "none" in another case is an ordinary name
        assert!(validate_name("contact.name", "none", 16).is_ok());
    }

    #[test]
    fn test_validate_name_counts_chars_not_bytes() {
        assert!(validate_name("zone.name", "Zürich Süd", 10).is_ok());
    }

    #[test]
    fn test_validate_range() {
        assert!(validate_range("aprs.tx_ssid", 15u8, 0, 15).is_ok());
        assert!(validate_range("aprs.tx_ssid", 0u8, 0, 15).is_ok());
        let err = validate_range("aprs.tx_ssid", 16u8, 0, 15).unwrap_err();
        assert_eq!(err.to_string(), "aprs.tx_ssid must be between 0 and 15, got 16");
    }

    #[test]
    fn test_validate_multiple_of() {
        let step = Decimal::new(5, 2);
        assert!(validate_multiple_of("squelch", Decimal::new(25, 2), step).is_ok());
        assert!(validate_multiple_of("squelch", Decimal::ZERO, step).is_ok());
        assert!(validate_multiple_of("squelch", Decimal::new(7, 2), step).is_err());
    }

    #[test]
    fn test_validate_non_negative() {
        assert!(validate_non_negative("rx_frequency", Decimal::ZERO).is_ok());
        assert!(validate_non_negative("rx_frequency", Decimal::new(44600625, 5)).is_ok());
        assert!(validate_non_negative("rx_frequency", Decimal::new(-1, 3)).is_err());
    }

    #[test]
    fn test_validate_max_entries() {
        assert!(validate_max_entries("zone.channels", &[1, 2, 3], 3).is_ok());
        assert!(matches!(
            validate_max_entries("zone.channels", &[1, 2, 3, 4], 3),
            Err(ValidationError::TooMany { max: 3, len: 4, .. })
        ));
    }
}
