//! Type system tests
//!
//! Literal conversion through built-in, derived and union types, and the
//! ordering and narrowing rules of range restrictions.

use pretty_assertions::assert_eq;
use proptest::prelude::*;
use std::sync::Arc;
use yangschema::types::{
    self, BuiltinType, NativeRepr, RangeInterval, RangeRestriction, TypeDef, TypeSpec, TypedValue,
};
use yangschema::Error;

fn interval(start: i32, end: i32) -> RangeInterval {
    RangeInterval::new(TypedValue::from(start), TypedValue::from(end)).unwrap()
}

#[test]
fn test_union_tries_members_in_order() {
    let spec = TypeSpec::union(vec![
        TypeSpec::builtin(BuiltinType::Int8),
        TypeSpec::builtin(BuiltinType::String),
    ]);
    assert_eq!(types::parse("500", &spec).unwrap(), TypedValue::from("500"));
    assert_eq!(types::parse("-12", &spec).unwrap(), TypedValue::Int8(-12));
}

#[test]
fn test_union_without_match() {
    let spec = TypeSpec::union(vec![
        TypeSpec::builtin(BuiltinType::Int8),
        TypeSpec::builtin(BuiltinType::Boolean),
    ]);
    assert!(matches!(
        types::parse("maybe", &spec),
        Err(Error::NoUnionMemberMatched(_))
    ));
}

#[test]
fn test_range_membership() {
    let mut range = RangeRestriction::new();
    range.add_interval(interval(1, 10)).unwrap();

    assert!(range.is_valid(&TypedValue::from(1)).unwrap());
    assert!(range.is_valid(&TypedValue::from(10)).unwrap());
    assert!(!range.is_valid(&TypedValue::from(11)).unwrap());
}

#[test]
fn test_range_intervals_must_ascend() {
    let mut range = RangeRestriction::new();
    range.add_interval(interval(1, 10)).unwrap();

    let err = range.add_interval(interval(5, 20)).unwrap_err();
    assert!(matches!(err, Error::OutOfOrder(_)));
    assert_eq!(range.intervals().len(), 1);

    range.add_interval(interval(11, 20)).unwrap();
    assert_eq!(range.max().unwrap(), &TypedValue::from(20));
    assert_eq!(range.min().unwrap(), &TypedValue::from(1));
}

#[test]
fn test_empty_restriction_has_no_bounds() {
    let range = RangeRestriction::new();
    assert!(matches!(range.min(), Err(Error::EmptyRestriction(_))));
    assert!(matches!(range.max(), Err(Error::EmptyRestriction(_))));
}

#[test]
fn test_derived_type_range_narrowing() {
    let percent = Arc::new(
        TypeDef::new("percent", TypeSpec::builtin(BuiltinType::Uint8))
            .with_range("0..100")
            .unwrap(),
    );
    let spec = TypeSpec::derived(Arc::clone(&percent));
    assert_eq!(spec.parse_value("42").unwrap(), TypedValue::Uint8(42));
    assert!(matches!(
        spec.parse_value("101"),
        Err(Error::RangeViolation(_))
    ));

    let small = TypeSpec::derived(percent.clone()).with_range("min..10").unwrap();
    assert!(small.parse_value("10").is_ok());
    assert!(small.parse_value("11").is_err());

    let widened = TypeSpec::derived(percent).with_range("50..200");
    assert!(matches!(widened, Err(Error::RestrictionNarrowing(_))));
}

#[test]
fn test_native_repr_follows_base() {
    let counter = Arc::new(TypeDef::new("counter", TypeSpec::builtin(BuiltinType::Uint64)));
    let spec = TypeSpec::derived(counter);
    assert_eq!(spec.data_type(), BuiltinType::Derived);
    assert_eq!(spec.effective_builtin(), BuiltinType::Uint64);
    assert_eq!(spec.native_repr(), BuiltinType::Uint64.native_repr());
    assert_eq!(
        TypeSpec::builtin(BuiltinType::Boolean).native_repr(),
        NativeRepr::Flag
    );
}

#[test]
fn test_builtin_literals() {
    assert_eq!(
        TypedValue::parse("true", BuiltinType::Boolean).unwrap(),
        TypedValue::Boolean(true)
    );
    assert!(TypedValue::parse("yes", BuiltinType::Boolean).is_err());
    assert!(TypedValue::parse("256", BuiltinType::Uint8).is_err());
    assert_eq!(
        TypedValue::parse("18446744073709551615", BuiltinType::Uint64).unwrap(),
        TypedValue::Uint64(u64::MAX)
    );
}

proptest! {
    #[test]
    fn prop_int8_literals_match_native_parse(n in any::<i8>()) {
        let parsed = TypedValue::parse(&n.to_string(), BuiltinType::Int8).unwrap();
        prop_assert_eq!(parsed, TypedValue::Int8(n));
    }

    #[test]
    fn prop_range_membership_matches_bounds(lo in -1000i32..0, hi in 0i32..1000, v in -2000i32..2000) {
        let mut range = RangeRestriction::new();
        range.add_interval(interval(lo, hi)).unwrap();
        prop_assert_eq!(range.is_valid(&TypedValue::from(v)).unwrap(), lo <= v && v <= hi);
    }
}
