//! Schema context resolution tests
//!
//! Structured paths resolved through a registry, including nodes reached
//! through augments of imported modules and through anydata registrations.

mod common;

use pretty_assertions::assert_eq;
use yangschema::schema::{NodeKind, SchemaPath};
use yangschema::Error;

#[test]
fn test_resolves_own_module_path() {
    let (fixture, registry) = common::registry();
    let path = SchemaPath::new("ietf-interfaces", ["interfaces", "interface", "enabled"]);
    let info = registry.resolve_context(&path).unwrap();

    let tree = registry.tree();
    assert_eq!(tree.node(info.schema_node()).name(), "enabled");
    assert_eq!(tree.node(info.schema_node()).parent(), Some(fixture.interface));
    assert_eq!(info.context_switched_node(), None);
    assert!(!info.is_anydata_parent());
}

#[test]
fn test_segments_match_case_insensitively() {
    let (_, registry) = common::registry();
    let path = SchemaPath::new("ietf-interfaces", ["INTERFACES", "Interface", "ipv4address"]);
    let info = registry.resolve_context(&path).unwrap();
    assert_eq!(registry.tree().node(info.schema_node()).name(), "ipv4-address");
}

#[test]
fn test_augment_resolves_through_import() {
    let (fixture, registry) = common::registry();
    let path = SchemaPath::from_segments([
        "ext-ip",
        "rev20160301",
        "interfaces",
        "interface",
        "augmentedInterface",
        "ipv4Address",
    ])
    .unwrap();
    assert_eq!(path.revision(), Some("2016-03-01"));

    let info = registry.resolve_context(&path).unwrap();
    assert_eq!(info.schema_node(), fixture.ipv4_address);
    assert_eq!(info.context_switched_node(), Some(fixture.ip_augment));
}

#[test]
fn test_augmented_container_children() {
    let (_, registry) = common::registry();
    let path = SchemaPath::new(
        "ietf-interfaces",
        ["interfaces", "interface", "statistics", "inOctets"],
    );
    let info = registry.resolve_context(&path).unwrap();
    let node = registry.tree().node(info.schema_node());
    assert_eq!(node.name(), "in-octets");
    assert_eq!(node.namespace(), common::IP_NS);
}

#[test]
fn test_unresolvable_path() {
    let (_, registry) = common::registry();
    let path = SchemaPath::new("ietf-interfaces", ["interfaces", "nothing-here"]);
    let err = registry.resolve_context(&path).unwrap_err();
    assert!(matches!(err, Error::UnresolvedSchemaPath(_)));
}

#[test]
fn test_unregistered_module_path() {
    let (_, registry) = common::registry();
    let path = SchemaPath::new("not-loaded", ["anything"]);
    assert!(matches!(
        registry.resolve_context(&path),
        Err(Error::ModelNotFound(_))
    ));
}

#[test]
fn test_resolution_through_anydata() {
    let (fixture, registry) = common::registry();
    let payload = SchemaPath::new("app", ["holder", "payload"]);
    let through = SchemaPath::new("app", ["holder", "payload", "noteBox", "text"]);

    // nothing registered yet
    assert!(registry.resolve_context(&through).is_err());

    registry
        .register_anydata_schema(&payload, &[SchemaPath::new("app", ["note-box"])])
        .unwrap();

    let member = registry
        .resolve_context(&SchemaPath::new("app", ["holder", "payload", "noteBox"]))
        .unwrap();
    assert!(member.is_anydata_parent());
    assert_eq!(registry.tree().node(member.schema_node()).kind(), NodeKind::Container);

    let info = registry.resolve_context(&through).unwrap();
    assert_eq!(info.schema_node(), fixture.note_text);
}

#[test]
fn test_anydata_registration_requires_anydata_target() {
    let (_, registry) = common::registry();
    let err = registry
        .register_anydata_schema(
            &SchemaPath::new("app", ["holder"]),
            &[SchemaPath::new("app", ["note-box"])],
        )
        .unwrap_err();
    assert!(matches!(err, Error::Schema(_)));
}
