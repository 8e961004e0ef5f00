//! YANG built-in types
//!
//! This module defines the closed set of built-in types and the pure
//! classification of each one into the native representation a code
//! generator should use for it.

use crate::types::values::TypedValue;
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::fmt;

// =============================================================================
// Type keywords
// =============================================================================

/// YANG int8 keyword
pub const YANG_INT8: &str = "int8";
/// YANG int16 keyword
pub const YANG_INT16: &str = "int16";
/// YANG int32 keyword
pub const YANG_INT32: &str = "int32";
/// YANG int64 keyword
pub const YANG_INT64: &str = "int64";
/// YANG uint8 keyword
pub const YANG_UINT8: &str = "uint8";
/// YANG uint16 keyword
pub const YANG_UINT16: &str = "uint16";
/// YANG uint32 keyword
pub const YANG_UINT32: &str = "uint32";
/// YANG uint64 keyword
pub const YANG_UINT64: &str = "uint64";
/// YANG decimal64 keyword
pub const YANG_DECIMAL64: &str = "decimal64";
/// YANG string keyword
pub const YANG_STRING: &str = "string";
/// YANG boolean keyword
pub const YANG_BOOLEAN: &str = "boolean";
/// YANG binary keyword
pub const YANG_BINARY: &str = "binary";
/// YANG bits keyword
pub const YANG_BITS: &str = "bits";
/// YANG enumeration keyword
pub const YANG_ENUMERATION: &str = "enumeration";
/// YANG identityref keyword
pub const YANG_IDENTITYREF: &str = "identityref";
/// YANG instance-identifier keyword
pub const YANG_INSTANCE_IDENTIFIER: &str = "instance-identifier";
/// YANG leafref keyword
pub const YANG_LEAFREF: &str = "leafref";
/// YANG union keyword
pub const YANG_UNION: &str = "union";
/// YANG empty keyword
pub const YANG_EMPTY: &str = "empty";

lazy_static::lazy_static! {
    /// Built-in types indexed by keyword
    static ref KEYWORDS: HashMap<&'static str, BuiltinType> = {
        let mut m = HashMap::new();
        for kind in BuiltinType::ALL {
            if let Some(keyword) = kind.keyword() {
                m.insert(keyword, kind);
            }
        }
        m
    };
}

// =============================================================================
// Built-in type
// =============================================================================

/// Closed enumeration of YANG built-in types
///
/// `Derived` stands for a reference to a typedef; it has no keyword of its
/// own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuiltinType {
    /// 8-bit signed integer
    Int8,
    /// 16-bit signed integer
    Int16,
    /// 32-bit signed integer
    Int32,
    /// 64-bit signed integer
    Int64,
    /// 8-bit unsigned integer
    Uint8,
    /// 16-bit unsigned integer
    Uint16,
    /// 32-bit unsigned integer
    Uint32,
    /// 64-bit unsigned integer
    Uint64,
    /// Decimal number with up to 18 fraction digits
    Decimal64,
    /// Human readable string
    String,
    /// "true" or "false"
    Boolean,
    /// Any binary data, base64 encoded in text
    Binary,
    /// Set of bit names
    Bits,
    /// One of an enumerated set of names
    Enumeration,
    /// Reference to an abstract identity
    IdentityRef,
    /// Reference to a data tree node
    InstanceIdentifier,
    /// Reference to another leaf's value space
    Leafref,
    /// Reference to a typedef
    Derived,
    /// Choice of member types
    Union,
    /// Leaf without a value
    Empty,
}

impl BuiltinType {
    /// Every built-in type, in declaration order
    pub const ALL: [BuiltinType; 20] = [
        BuiltinType::Int8,
        BuiltinType::Int16,
        BuiltinType::Int32,
        BuiltinType::Int64,
        BuiltinType::Uint8,
        BuiltinType::Uint16,
        BuiltinType::Uint32,
        BuiltinType::Uint64,
        BuiltinType::Decimal64,
        BuiltinType::String,
        BuiltinType::Boolean,
        BuiltinType::Binary,
        BuiltinType::Bits,
        BuiltinType::Enumeration,
        BuiltinType::IdentityRef,
        BuiltinType::InstanceIdentifier,
        BuiltinType::Leafref,
        BuiltinType::Derived,
        BuiltinType::Union,
        BuiltinType::Empty,
    ];

    /// Look up a built-in type by its YANG keyword
    ///
    /// Returns `None` for anything else, which callers treat as a typedef
    /// reference.
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        KEYWORDS.get(keyword).copied()
    }

    /// YANG keyword of this type
    pub fn keyword(&self) -> Option<&'static str> {
        match self {
            BuiltinType::Int8 => Some(YANG_INT8),
            BuiltinType::Int16 => Some(YANG_INT16),
            BuiltinType::Int32 => Some(YANG_INT32),
            BuiltinType::Int64 => Some(YANG_INT64),
            BuiltinType::Uint8 => Some(YANG_UINT8),
            BuiltinType::Uint16 => Some(YANG_UINT16),
            BuiltinType::Uint32 => Some(YANG_UINT32),
            BuiltinType::Uint64 => Some(YANG_UINT64),
            BuiltinType::Decimal64 => Some(YANG_DECIMAL64),
            BuiltinType::String => Some(YANG_STRING),
            BuiltinType::Boolean => Some(YANG_BOOLEAN),
            BuiltinType::Binary => Some(YANG_BINARY),
            BuiltinType::Bits => Some(YANG_BITS),
            BuiltinType::Enumeration => Some(YANG_ENUMERATION),
            BuiltinType::IdentityRef => Some(YANG_IDENTITYREF),
            BuiltinType::InstanceIdentifier => Some(YANG_INSTANCE_IDENTIFIER),
            BuiltinType::Leafref => Some(YANG_LEAFREF),
            BuiltinType::Union => Some(YANG_UNION),
            BuiltinType::Empty => Some(YANG_EMPTY),
            BuiltinType::Derived => None,
        }
    }

    /// Check if this type is one of the integer types
    pub fn is_integer(&self) -> bool {
        matches!(
            self,
            BuiltinType::Int8
                | BuiltinType::Int16
                | BuiltinType::Int32
                | BuiltinType::Int64
                | BuiltinType::Uint8
                | BuiltinType::Uint16
                | BuiltinType::Uint32
                | BuiltinType::Uint64
        )
    }

    /// Check if values of this type are totally ordered by magnitude
    pub fn is_numeric(&self) -> bool {
        self.is_integer() || *self == BuiltinType::Decimal64
    }

    /// Check if this type only points at another type
    pub fn is_indirect(&self) -> bool {
        matches!(
            self,
            BuiltinType::Leafref | BuiltinType::Derived | BuiltinType::Union
        )
    }

    /// Default range of a numeric type: the bounds of its storage width
    pub fn default_bounds(&self) -> Option<(TypedValue, TypedValue)> {
        let bounds = match self {
            BuiltinType::Int8 => (TypedValue::Int8(i8::MIN), TypedValue::Int8(i8::MAX)),
            BuiltinType::Int16 => (TypedValue::Int16(i16::MIN), TypedValue::Int16(i16::MAX)),
            BuiltinType::Int32 => (TypedValue::Int32(i32::MIN), TypedValue::Int32(i32::MAX)),
            BuiltinType::Int64 => (TypedValue::Int64(i64::MIN), TypedValue::Int64(i64::MAX)),
            BuiltinType::Uint8 => (TypedValue::Uint8(u8::MIN), TypedValue::Uint8(u8::MAX)),
            BuiltinType::Uint16 => (TypedValue::Uint16(u16::MIN), TypedValue::Uint16(u16::MAX)),
            BuiltinType::Uint32 => (TypedValue::Uint32(u32::MIN), TypedValue::Uint32(u32::MAX)),
            BuiltinType::Uint64 => (TypedValue::Uint64(u64::MIN), TypedValue::Uint64(u64::MAX)),
            BuiltinType::Decimal64 => (
                TypedValue::Decimal64(Decimal::from(i64::MIN)),
                TypedValue::Decimal64(Decimal::from(i64::MAX)),
            ),
            _ => return None,
        };
        Some(bounds)
    }

    /// Native representation a code generator should emit for this type
    pub fn native_repr(&self) -> NativeRepr {
        match self {
            BuiltinType::Int8 => NativeRepr::SignedInt(8),
            BuiltinType::Int16 => NativeRepr::SignedInt(16),
            BuiltinType::Int32 => NativeRepr::SignedInt(32),
            BuiltinType::Int64 => NativeRepr::SignedInt(64),
            // Unsigned kinds widen into the next signed carrier
            BuiltinType::Uint8 => NativeRepr::SignedInt(16),
            BuiltinType::Uint16 => NativeRepr::SignedInt(32),
            BuiltinType::Uint32 => NativeRepr::SignedInt(64),
            BuiltinType::Uint64 => NativeRepr::BigInteger,
            BuiltinType::Decimal64 => NativeRepr::Decimal,
            BuiltinType::String | BuiltinType::InstanceIdentifier => NativeRepr::Text,
            BuiltinType::Boolean | BuiltinType::Empty => NativeRepr::Flag,
            BuiltinType::Binary => NativeRepr::Bytes,
            BuiltinType::Bits => NativeRepr::BitSet,
            BuiltinType::Enumeration => NativeRepr::Enumerated,
            BuiltinType::IdentityRef => NativeRepr::Identity,
            BuiltinType::Leafref | BuiltinType::Derived | BuiltinType::Union => {
                NativeRepr::Indirect
            }
        }
    }
}

impl fmt::Display for BuiltinType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.keyword().unwrap_or("derived"))
    }
}

/// Native representation category of a built-in type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NativeRepr {
    /// Signed integer carrier of the given bit width
    SignedInt(u8),
    /// Arbitrary precision integer
    BigInteger,
    /// Arbitrary precision decimal
    Decimal,
    /// Text
    Text,
    /// Boolean flag
    Flag,
    /// Byte buffer
    Bytes,
    /// Set of named bits
    BitSet,
    /// Generated enumeration
    Enumerated,
    /// Generated identity reference
    Identity,
    /// Resolved through another type definition
    Indirect,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_round_trip() {
        for kind in BuiltinType::ALL {
            if let Some(keyword) = kind.keyword() {
                assert_eq!(BuiltinType::from_keyword(keyword), Some(kind));
            }
        }
        assert_eq!(BuiltinType::from_keyword("inet:ipv4-address"), None);
        assert_eq!(BuiltinType::from_keyword("Int8"), None);
    }

    #[test]
    fn test_native_repr_widens_unsigned() {
        assert_eq!(BuiltinType::Uint8.native_repr(), NativeRepr::SignedInt(16));
        assert_eq!(BuiltinType::Uint32.native_repr(), NativeRepr::SignedInt(64));
        assert_eq!(BuiltinType::Uint64.native_repr(), NativeRepr::BigInteger);
        assert_eq!(BuiltinType::Empty.native_repr(), NativeRepr::Flag);
        assert_eq!(BuiltinType::Union.native_repr(), NativeRepr::Indirect);
    }

    #[test]
    fn test_default_bounds() {
        let (min, max) = BuiltinType::Uint8.default_bounds().unwrap();
        assert_eq!(min, TypedValue::Uint8(0));
        assert_eq!(max, TypedValue::Uint8(255));
        assert!(BuiltinType::String.default_bounds().is_none());
    }

    #[test]
    fn test_classification() {
        assert!(BuiltinType::Decimal64.is_numeric());
        assert!(!BuiltinType::Decimal64.is_integer());
        assert!(BuiltinType::Derived.is_indirect());
        assert!(!BuiltinType::Bits.is_numeric());
        assert_eq!(BuiltinType::Derived.to_string(), "derived");
        assert_eq!(BuiltinType::InstanceIdentifier.to_string(), "instance-identifier");
    }
}
