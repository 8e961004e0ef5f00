//! Typed values
//!
//! A [`TypedValue`] is a literal after lexical conversion, tagged by the
//! built-in type that produced it. Numeric values compare by magnitude
//! regardless of their storage width.

use crate::error::{Error, Result};
use crate::types::builtins::BuiltinType;
use crate::types::helpers::{
    binary_to_text, binary_validator, bits_validator, boolean_validator, decimal_validator,
    enumeration_validator, identityref_validator, instance_identifier_validator,
    integer_in_width,
};
use rust_decimal::Decimal;
use serde_json::Value as JsonValue;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

/// A parsed literal, tagged by its built-in type
#[derive(Debug, Clone)]
pub enum TypedValue {
    /// int8 value
    Int8(i8),
    /// int16 value
    Int16(i16),
    /// int32 value
    Int32(i32),
    /// int64 value
    Int64(i64),
    /// uint8 value
    Uint8(u8),
    /// uint16 value
    Uint16(u16),
    /// uint32 value
    Uint32(u32),
    /// uint64 value
    Uint64(u64),
    /// decimal64 value
    Decimal64(Decimal),
    /// string value
    String(String),
    /// boolean value
    Boolean(bool),
    /// binary value (base64 decoded)
    Binary(Vec<u8>),
    /// bits value: the set bit names, in literal order
    Bits(Vec<String>),
    /// enumeration value
    Enumeration(String),
    /// identityref value
    IdentityRef(String),
    /// instance-identifier value
    InstanceIdentifier(String),
    /// empty value (null marker)
    Empty,
}

impl TypedValue {
    /// Parse a literal against a direct built-in type
    ///
    /// Indirect kinds (derived, leafref, union) need their resolved type
    /// information; use [`crate::types::TypeSpec::parse_value`] for those.
    pub fn parse(raw: &str, kind: BuiltinType) -> Result<Self> {
        let value = match kind {
            BuiltinType::Int8 => TypedValue::Int8(integer_in_width(raw, "int8")?),
            BuiltinType::Int16 => TypedValue::Int16(integer_in_width(raw, "int16")?),
            BuiltinType::Int32 => TypedValue::Int32(integer_in_width(raw, "int32")?),
            BuiltinType::Int64 => TypedValue::Int64(integer_in_width(raw, "int64")?),
            BuiltinType::Uint8 => TypedValue::Uint8(integer_in_width(raw, "uint8")?),
            BuiltinType::Uint16 => TypedValue::Uint16(integer_in_width(raw, "uint16")?),
            BuiltinType::Uint32 => TypedValue::Uint32(integer_in_width(raw, "uint32")?),
            BuiltinType::Uint64 => TypedValue::Uint64(integer_in_width(raw, "uint64")?),
            BuiltinType::Decimal64 => TypedValue::Decimal64(decimal_validator(raw)?),
            BuiltinType::String => TypedValue::String(raw.to_string()),
            BuiltinType::Boolean => TypedValue::Boolean(boolean_validator(raw)?),
            BuiltinType::Binary => TypedValue::Binary(binary_validator(raw)?),
            BuiltinType::Bits => TypedValue::Bits(bits_validator(raw)?),
            BuiltinType::Enumeration => {
                enumeration_validator(raw)?;
                TypedValue::Enumeration(raw.to_string())
            }
            BuiltinType::IdentityRef => {
                identityref_validator(raw)?;
                TypedValue::IdentityRef(raw.to_string())
            }
            BuiltinType::InstanceIdentifier => {
                instance_identifier_validator(raw)?;
                TypedValue::InstanceIdentifier(raw.to_string())
            }
            // Legacy encoders wrote "true"/"false" for empty leaves; those
            // are still accepted and surface as booleans.
            BuiltinType::Empty => match raw {
                "" => TypedValue::Empty,
                "true" | "false" => TypedValue::Boolean(boolean_validator(raw)?),
                _ => {
                    return Err(Error::LiteralFormat(format!(
                        "'{}' is not a valid empty value",
                        raw
                    )))
                }
            },
            BuiltinType::Leafref | BuiltinType::Derived | BuiltinType::Union => {
                return Err(Error::LiteralFormat(format!(
                    "type {} needs resolved type information to parse '{}'",
                    kind, raw
                )))
            }
        };
        Ok(value)
    }

    /// Built-in type that produced this value
    pub fn builtin_type(&self) -> BuiltinType {
        match self {
            TypedValue::Int8(_) => BuiltinType::Int8,
            TypedValue::Int16(_) => BuiltinType::Int16,
            TypedValue::Int32(_) => BuiltinType::Int32,
            TypedValue::Int64(_) => BuiltinType::Int64,
            TypedValue::Uint8(_) => BuiltinType::Uint8,
            TypedValue::Uint16(_) => BuiltinType::Uint16,
            TypedValue::Uint32(_) => BuiltinType::Uint32,
            TypedValue::Uint64(_) => BuiltinType::Uint64,
            TypedValue::Decimal64(_) => BuiltinType::Decimal64,
            TypedValue::String(_) => BuiltinType::String,
            TypedValue::Boolean(_) => BuiltinType::Boolean,
            TypedValue::Binary(_) => BuiltinType::Binary,
            TypedValue::Bits(_) => BuiltinType::Bits,
            TypedValue::Enumeration(_) => BuiltinType::Enumeration,
            TypedValue::IdentityRef(_) => BuiltinType::IdentityRef,
            TypedValue::InstanceIdentifier(_) => BuiltinType::InstanceIdentifier,
            TypedValue::Empty => BuiltinType::Empty,
        }
    }

    /// Numeric magnitude of an integer or decimal64 value
    ///
    /// Every integer width fits the 96-bit decimal mantissa exactly.
    pub fn as_decimal(&self) -> Option<Decimal> {
        match self {
            TypedValue::Int8(v) => Some(Decimal::from(*v)),
            TypedValue::Int16(v) => Some(Decimal::from(*v)),
            TypedValue::Int32(v) => Some(Decimal::from(*v)),
            TypedValue::Int64(v) => Some(Decimal::from(*v)),
            TypedValue::Uint8(v) => Some(Decimal::from(*v)),
            TypedValue::Uint16(v) => Some(Decimal::from(*v)),
            TypedValue::Uint32(v) => Some(Decimal::from(*v)),
            TypedValue::Uint64(v) => Some(Decimal::from(*v)),
            TypedValue::Decimal64(v) => Some(*v),
            _ => None,
        }
    }

    /// Check if this value is ordered by magnitude
    pub fn is_numeric(&self) -> bool {
        self.as_decimal().is_some()
    }

    /// Canonical JSON form of this value
    ///
    /// 64-bit integers and decimals are strings, as JSON numbers cannot
    /// carry them without loss; empty is `[null]`.
    pub fn to_json(&self) -> JsonValue {
        match self {
            TypedValue::Int8(v) => JsonValue::from(*v),
            TypedValue::Int16(v) => JsonValue::from(*v),
            TypedValue::Int32(v) => JsonValue::from(*v),
            TypedValue::Uint8(v) => JsonValue::from(*v),
            TypedValue::Uint16(v) => JsonValue::from(*v),
            TypedValue::Uint32(v) => JsonValue::from(*v),
            TypedValue::Boolean(v) => JsonValue::Bool(*v),
            TypedValue::Empty => JsonValue::Array(vec![JsonValue::Null]),
            other => JsonValue::String(other.to_string()),
        }
    }
}

impl PartialEq for TypedValue {
    fn eq(&self, other: &Self) -> bool {
        match (self.as_decimal(), other.as_decimal()) {
            (Some(a), Some(b)) => a == b,
            (None, None) => match (self, other) {
                (TypedValue::String(a), TypedValue::String(b)) => a == b,
                (TypedValue::Boolean(a), TypedValue::Boolean(b)) => a == b,
                (TypedValue::Binary(a), TypedValue::Binary(b)) => a == b,
                (TypedValue::Bits(a), TypedValue::Bits(b)) => a == b,
                (TypedValue::Enumeration(a), TypedValue::Enumeration(b)) => a == b,
                (TypedValue::IdentityRef(a), TypedValue::IdentityRef(b)) => a == b,
                (TypedValue::InstanceIdentifier(a), TypedValue::InstanceIdentifier(b)) => a == b,
                (TypedValue::Empty, TypedValue::Empty) => true,
                _ => false,
            },
            _ => false,
        }
    }
}

impl Eq for TypedValue {}

impl Hash for TypedValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // Numerics hash by normalized magnitude so equal values of
        // different widths collide.
        if let Some(d) = self.as_decimal() {
            0u8.hash(state);
            d.normalize().hash(state);
            return;
        }
        std::mem::discriminant(self).hash(state);
        match self {
            TypedValue::String(s)
            | TypedValue::Enumeration(s)
            | TypedValue::IdentityRef(s)
            | TypedValue::InstanceIdentifier(s) => s.hash(state),
            TypedValue::Boolean(b) => b.hash(state),
            TypedValue::Binary(b) => b.hash(state),
            TypedValue::Bits(b) => b.hash(state),
            _ => {}
        }
    }
}

impl PartialOrd for TypedValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self.as_decimal(), other.as_decimal()) {
            (Some(a), Some(b)) => Some(a.cmp(&b)),
            (None, None) => match (self, other) {
                (TypedValue::String(a), TypedValue::String(b)) => Some(a.cmp(b)),
                (TypedValue::Boolean(a), TypedValue::Boolean(b)) => Some(a.cmp(b)),
                _ if self == other => Some(Ordering::Equal),
                _ => None,
            },
            _ => None,
        }
    }
}

impl fmt::Display for TypedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypedValue::Int8(v) => write!(f, "{}", v),
            TypedValue::Int16(v) => write!(f, "{}", v),
            TypedValue::Int32(v) => write!(f, "{}", v),
            TypedValue::Int64(v) => write!(f, "{}", v),
            TypedValue::Uint8(v) => write!(f, "{}", v),
            TypedValue::Uint16(v) => write!(f, "{}", v),
            TypedValue::Uint32(v) => write!(f, "{}", v),
            TypedValue::Uint64(v) => write!(f, "{}", v),
            TypedValue::Decimal64(v) => write!(f, "{}", v),
            TypedValue::Boolean(b) => write!(f, "{}", if *b { "true" } else { "false" }),
            TypedValue::Binary(b) => write!(f, "{}", binary_to_text(b)),
            TypedValue::Bits(bits) => write!(f, "{}", bits.join(" ")),
            TypedValue::String(s)
            | TypedValue::Enumeration(s)
            | TypedValue::IdentityRef(s)
            | TypedValue::InstanceIdentifier(s) => write!(f, "{}", s),
            TypedValue::Empty => Ok(()),
        }
    }
}

macro_rules! typed_value_from {
    ($($native:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$native> for TypedValue {
                fn from(v: $native) -> Self {
                    TypedValue::$variant(v)
                }
            }
        )*
    };
}

typed_value_from! {
    i8 => Int8,
    i16 => Int16,
    i32 => Int32,
    i64 => Int64,
    u8 => Uint8,
    u16 => Uint16,
    u32 => Uint32,
    u64 => Uint64,
    Decimal => Decimal64,
    bool => Boolean,
    String => String,
}

impl From<&str> for TypedValue {
    fn from(v: &str) -> Self {
        TypedValue::String(v.to_string())
    }
}
