//! YANG identifier, model id and revision utilities
//!
//! This module provides validation for YANG identifiers, normalization of
//! free-text model ids, the camel-cased attribute names used when matching
//! caller-supplied path segments, and revision date handling.

use crate::error::{Error, Result};
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

static IDENTIFIER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_.\-]*$").unwrap());

static MODEL_ID: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z0-9_.\-]+$").unwrap());

// Anything that may not appear inside a model id token. Underscore is a
// separator too, so "a_ b" and "a b" normalize alike.
static MODEL_ID_SEPARATOR: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^A-Za-z0-9.\-]+").unwrap());

static REVISION_DATE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").unwrap());

static REVISION_SEGMENT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^rev([12]\d{3}(0[1-9]|1[0-2])(0[1-9]|[12]\d|3[01]))$").unwrap()
});

/// Check if a string is a valid YANG identifier
pub fn is_valid_identifier(name: &str) -> bool {
    IDENTIFIER.is_match(name)
}

/// Validate a YANG identifier and return an error if invalid
pub fn validate_identifier(name: &str) -> Result<()> {
    if is_valid_identifier(name) {
        Ok(())
    } else {
        Err(Error::Schema(format!("Invalid YANG identifier: '{}'", name)))
    }
}

/// Check if a string is a legal model id
pub fn is_valid_model_id(id: &str) -> bool {
    MODEL_ID.is_match(id) && id.chars().any(|c| c.is_ascii_alphanumeric())
}

/// Turn free text into a legal model id
///
/// Runs of characters that may not appear in a model id collapse into a
/// single `_`, and leading/trailing runs are dropped:
///
/// ```
/// use yangschema::names::normalize_model_id;
///
/// assert_eq!(normalize_model_id("onos-yang     runtime  ").unwrap(), "onos-yang_runtime");
/// assert_eq!(normalize_model_id("[]   xyz  []").unwrap(), "xyz");
/// ```
pub fn normalize_model_id(raw: &str) -> Result<String> {
    let id = MODEL_ID_SEPARATOR
        .split(raw)
        .filter(|token| !token.is_empty())
        .collect::<Vec<_>>()
        .join("_");

    if is_valid_model_id(&id) {
        Ok(id)
    } else {
        Err(Error::InvalidModel(format!("Invalid model id {}", raw)))
    }
}

/// Camel-cased attribute name of a node identifier
///
/// `interface-name` becomes `interfaceName`. Path segments are matched
/// against this form case-insensitively.
pub fn attribute_name(identifier: &str) -> String {
    let mut out = String::with_capacity(identifier.len());
    let mut upper_next = false;

    for c in identifier.chars() {
        if matches!(c, '-' | '_' | '.' | ' ') {
            upper_next = !out.is_empty();
            continue;
        }
        if out.is_empty() {
            out.extend(c.to_lowercase());
        } else if upper_next {
            out.extend(c.to_uppercase());
        } else {
            out.push(c);
        }
        upper_next = false;
    }

    out
}

/// Compare a caller-supplied path segment with a node identifier
pub fn segment_matches(segment: &str, identifier: &str) -> bool {
    attribute_name(segment).eq_ignore_ascii_case(&attribute_name(identifier))
}

/// Parse a revision from either `YYYY-MM-DD` or the compact `revYYYYMMDD`
/// segment form, returning the canonical `YYYY-MM-DD` text
pub fn parse_revision(value: &str) -> Option<String> {
    let date = if REVISION_DATE.is_match(value) {
        NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()?
    } else if let Some(caps) = REVISION_SEGMENT.captures(value) {
        NaiveDate::parse_from_str(&caps[1], "%Y%m%d").ok()?
    } else {
        return None;
    };
    Some(date.format("%Y-%m-%d").to_string())
}

/// Check whether a path segment is a revision date
pub fn is_revision_segment(value: &str) -> bool {
    parse_revision(value).is_some()
}

/// Validate a revision date and return the canonical form
pub fn validate_revision(value: &str) -> Result<String> {
    parse_revision(value)
        .ok_or_else(|| Error::Schema(format!("Invalid revision date: '{}'", value)))
}
