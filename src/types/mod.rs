//! YANG type system
//!
//! This module contains the built-in type catalogue, literal conversion into
//! typed values, range restrictions and resolved type specifications.

pub mod builtins;
pub mod helpers;
pub mod range;
pub mod typedef;
pub mod values;

// Re-exports
pub use builtins::{BuiltinType, NativeRepr};
pub use range::{RangeInterval, RangeRestriction};
pub use typedef::{TypeDef, TypeSpec};
pub use values::TypedValue;

use crate::error::Result;

/// Convert a literal according to a resolved type specification
///
/// Shorthand for [`TypeSpec::parse_value`].
pub fn parse(raw: &str, spec: &TypeSpec) -> Result<TypedValue> {
    spec.parse_value(raw)
}
