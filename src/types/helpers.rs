//! Literal grammar helpers
//!
//! This module provides the lexical validators used to turn raw literal
//! strings into typed values.

use crate::error::{Error, Result};
use crate::names::is_valid_identifier;
use base64::Engine;
use rust_decimal::Decimal;
use std::str::FromStr;

// =============================================================================
// Numeric Validators
// =============================================================================

/// Parse an integer literal into a wide intermediate
///
/// Accepts an optional sign followed by decimal digits, `0x` hexadecimal
/// digits, or `0`-prefixed octal digits.
pub fn integer_literal(value: &str) -> Result<i128> {
    let (negative, digits) = match value.as_bytes().first() {
        Some(b'-') => (true, &value[1..]),
        Some(b'+') => (false, &value[1..]),
        _ => (false, value),
    };

    let (radix, body) = if let Some(hex) = digits
        .strip_prefix("0x")
        .or_else(|| digits.strip_prefix("0X"))
    {
        (16, hex)
    } else if digits.len() > 1 && digits.starts_with('0') {
        (8, &digits[1..])
    } else {
        (10, digits)
    };

    if body.is_empty() || !body.chars().all(|c| c.is_digit(radix)) {
        return Err(Error::LiteralFormat(format!(
            "'{}' is not a valid integer literal",
            value
        )));
    }

    let magnitude = i128::from_str_radix(body, radix).map_err(|_| {
        Error::LiteralFormat(format!("'{}' overflows the integer range", value))
    })?;

    Ok(if negative { -magnitude } else { magnitude })
}

/// Parse an integer literal and narrow it to a storage width
pub fn integer_in_width<T>(value: &str, type_name: &str) -> Result<T>
where
    T: TryFrom<i128>,
{
    let wide = integer_literal(value)?;
    T::try_from(wide).map_err(|_| {
        Error::LiteralFormat(format!(
            "value '{}' is out of the {} value space",
            value, type_name
        ))
    })
}

/// Largest number of fraction digits a decimal64 can carry
pub const DECIMAL64_MAX_FRACTION_DIGITS: u32 = 18;

/// Validate a decimal64 value
///
/// A decimal64 is an int64 scaled by its fraction digits, so the literal's
/// digits (decimal point removed) must fit in an `i64` and it may carry at
/// most 18 fraction digits.
pub fn decimal_validator(value: &str) -> Result<Decimal> {
    if value.is_empty() || value.ends_with('.') || value.starts_with('.') {
        return Err(Error::LiteralFormat(format!(
            "'{}' is not a valid decimal64 literal",
            value
        )));
    }
    let decimal = Decimal::from_str(value).map_err(|_| {
        Error::LiteralFormat(format!("'{}' is not a valid decimal64 literal", value))
    })?;
    if decimal.scale() > DECIMAL64_MAX_FRACTION_DIGITS || i64::try_from(decimal.mantissa()).is_err()
    {
        return Err(Error::LiteralFormat(format!(
            "value '{}' is out of the decimal64 value space",
            value
        )));
    }
    Ok(decimal)
}

// =============================================================================
// Text Validators
// =============================================================================

/// Convert a YANG boolean string to a Rust bool
pub fn boolean_validator(value: &str) -> Result<bool> {
    match value {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(Error::LiteralFormat(format!(
            "'{}' is not a valid boolean value",
            value
        ))),
    }
}

/// Validate a base64 binary value
pub fn binary_validator(value: &str) -> Result<Vec<u8>> {
    let cleaned: String = value.chars().filter(|c| !c.is_whitespace()).collect();
    if cleaned.is_empty() {
        return Ok(Vec::new());
    }

    base64::engine::general_purpose::STANDARD
        .decode(&cleaned)
        .map_err(|_| Error::LiteralFormat("not a valid base64 encoding".to_string()))
}

/// Encode bytes as base64 text
pub fn binary_to_text(value: &[u8]) -> String {
    base64::engine::general_purpose::STANDARD.encode(value)
}

/// Validate a bits value: whitespace separated bit names
pub fn bits_validator(value: &str) -> Result<Vec<String>> {
    let mut bits = Vec::new();
    for name in value.split_whitespace() {
        if !is_valid_identifier(name) {
            return Err(Error::LiteralFormat(format!(
                "'{}' is not a valid bit name",
                name
            )));
        }
        if !bits.iter().any(|b: &String| b == name) {
            bits.push(name.to_string());
        }
    }
    Ok(bits)
}

/// Validate an enumeration value
pub fn enumeration_validator(value: &str) -> Result<()> {
    if value.is_empty() || value.trim() != value {
        return Err(Error::LiteralFormat(format!(
            "'{}' is not a valid enum name",
            value
        )));
    }
    Ok(())
}

/// Validate an identityref value: `[prefix:]identifier`
pub fn identityref_validator(value: &str) -> Result<()> {
    let valid = match value.split_once(':') {
        Some((prefix, name)) => is_valid_identifier(prefix) && is_valid_identifier(name),
        None => is_valid_identifier(value),
    };
    if valid {
        Ok(())
    } else {
        Err(Error::LiteralFormat(format!(
            "'{}' is not a valid identity reference",
            value
        )))
    }
}

/// Validate an instance-identifier value
pub fn instance_identifier_validator(value: &str) -> Result<()> {
    if value.starts_with('/') && value.len() > 1 {
        Ok(())
    } else {
        Err(Error::LiteralFormat(format!(
            "'{}' is not an absolute instance identifier",
            value
        )))
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integer_literal_radixes() {
        assert_eq!(integer_literal("42").unwrap(), 42);
        assert_eq!(integer_literal("-42").unwrap(), -42);
        assert_eq!(integer_literal("+7").unwrap(), 7);
        assert_eq!(integer_literal("0x1F").unwrap(), 31);
        assert_eq!(integer_literal("017").unwrap(), 15);
        assert_eq!(integer_literal("0").unwrap(), 0);
    }

    #[test]
    fn test_integer_literal_rejects_garbage() {
        assert!(integer_literal("").is_err());
        assert!(integer_literal("-").is_err());
        assert!(integer_literal("12a").is_err());
        assert!(integer_literal("08").is_err());
        assert!(integer_literal(" 1").is_err());
        assert!(integer_literal("1.0").is_err());
    }

    #[test]
    fn test_integer_in_width() {
        assert_eq!(integer_in_width::<i8>("127", "int8").unwrap(), 127);
        assert!(integer_in_width::<i8>("128", "int8").is_err());
        assert!(integer_in_width::<u8>("-1", "uint8").is_err());
        assert_eq!(
            integer_in_width::<u64>("18446744073709551615", "uint64").unwrap(),
            u64::MAX
        );
    }

    #[test]
    fn test_decimal_validator() {
        assert_eq!(decimal_validator("3.14").unwrap().to_string(), "3.14");
        assert!(decimal_validator("-0.5").is_ok());
        assert!(decimal_validator("1.").is_err());
        assert!(decimal_validator("abc").is_err());
    }

    #[test]
    fn test_decimal_validator_bounds() {
        assert!(decimal_validator("9223372036854775807").is_ok());
        assert!(decimal_validator("-922337203685477580.8").is_ok());
        assert!(decimal_validator("0.000000000000000001").is_ok());

        assert!(matches!(
            decimal_validator("99999999999999999999"),
            Err(Error::LiteralFormat(_))
        ));
        assert!(decimal_validator("9223372036854775808").is_err());
        assert!(decimal_validator("922337203685477580.8").is_err());
        assert!(decimal_validator("0.0000000000000000001").is_err());
    }

    #[test]
    fn test_boolean_validator() {
        assert!(boolean_validator("true").unwrap());
        assert!(!boolean_validator("false").unwrap());
        assert!(boolean_validator("1").is_err());
        assert!(boolean_validator("True").is_err());
    }

    #[test]
    fn test_binary_validator() {
        assert_eq!(binary_validator("SGVsbG8=").unwrap(), b"Hello");
        assert_eq!(binary_to_text(b"Hello"), "SGVsbG8=");
        assert!(binary_validator("!!!").is_err());
        assert!(binary_validator("").unwrap().is_empty());
    }

    #[test]
    fn test_bits_validator() {
        assert_eq!(
            bits_validator("up  running up").unwrap(),
            vec!["up".to_string(), "running".to_string()]
        );
        assert!(bits_validator("ok 1bad").is_err());
    }

    #[test]
    fn test_reference_validators() {
        assert!(identityref_validator("ianaift:ethernetCsmacd").is_ok());
        assert!(identityref_validator("ethernet").is_ok());
        assert!(identityref_validator("a:b:c").is_err());
        assert!(instance_identifier_validator("/if:interfaces/if:interface").is_ok());
        assert!(instance_identifier_validator("interfaces").is_err());
        assert!(enumeration_validator("up").is_ok());
        assert!(enumeration_validator(" up").is_err());
    }
}
