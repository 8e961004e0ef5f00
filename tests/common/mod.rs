//! Shared schema fixture for integration tests
//!
//! Three modules:
//! - `ietf-interfaces`: an `interfaces/interface` list keyed by `name`
//! - `ext-ip`: imports `ietf-interfaces` and augments `interface` with
//!   `ipv4-address` and a `statistics` container
//! - `app`: a `holder` container with an anydata `payload`, and a
//!   `note-box` container that can be registered under it

#![allow(dead_code)]

use std::sync::Arc;
use yangschema::runtime::{ModelRegistrationParam, ModelRegistry, ModuleId, RegistryConfig};
use yangschema::schema::{NodeId, SchemaTree, SchemaTreeBuilder};
use yangschema::types::{BuiltinType, TypeDef, TypeSpec};

pub const IF_NS: &str = "urn:ietf:params:xml:ns:yang:ietf-interfaces";
pub const IP_NS: &str = "urn:example:ext-ip";
pub const APP_NS: &str = "urn:example:app";

pub struct Fixture {
    pub tree: SchemaTree,
    pub interface: NodeId,
    pub ip_augment: NodeId,
    pub ipv4_address: NodeId,
    pub payload: NodeId,
    pub note_text: NodeId,
}

pub fn fixture() -> Fixture {
    let mut b = SchemaTreeBuilder::new();

    let ifm = b
        .add_module("ietf-interfaces", IF_NS, "if", Some("2014-05-08"))
        .unwrap();
    let interfaces = b.add_container(ifm, "interfaces").unwrap();
    let interface = b.add_list(interfaces, "interface", &["name"]).unwrap();
    b.add_leaf(interface, "name", TypeSpec::builtin(BuiltinType::String))
        .unwrap();
    b.add_leaf(interface, "enabled", TypeSpec::builtin(BuiltinType::Boolean))
        .unwrap();
    let mtu = Arc::new(
        TypeDef::new("mtu-size", TypeSpec::builtin(BuiltinType::Uint16))
            .with_range("68..9000")
            .unwrap(),
    );
    b.add_leaf(interface, "mtu", TypeSpec::derived(mtu)).unwrap();
    b.add_leaf(
        interface,
        "label",
        TypeSpec::union(vec![
            TypeSpec::builtin(BuiltinType::Int8),
            TypeSpec::builtin(BuiltinType::String),
        ]),
    )
    .unwrap();
    b.add_leaf(interface, "loopback", TypeSpec::builtin(BuiltinType::Empty))
        .unwrap();
    b.add_leaf_list(interface, "tag", TypeSpec::builtin(BuiltinType::String))
        .unwrap();

    let ip = b
        .add_module("ext-ip", IP_NS, "eip", Some("2016-03-01"))
        .unwrap();
    b.add_import(ip, ifm).unwrap();
    let ip_augment = b.add_augment(ip, "augmented-interface", interface).unwrap();
    let ipv4_address = b
        .add_leaf(ip_augment, "ipv4-address", TypeSpec::builtin(BuiltinType::String))
        .unwrap();
    let stats = b.add_container(ip_augment, "statistics").unwrap();
    b.add_leaf(stats, "in-octets", TypeSpec::builtin(BuiltinType::Uint64))
        .unwrap();

    let app = b.add_module("app", APP_NS, "app", None).unwrap();
    let holder = b.add_container(app, "holder").unwrap();
    let payload = b.add_anydata(holder, "payload").unwrap();
    let note_box = b.add_container(app, "note-box").unwrap();
    let note_text = b
        .add_leaf(note_box, "text", TypeSpec::builtin(BuiltinType::String))
        .unwrap();

    Fixture {
        tree: b.build().unwrap(),
        interface,
        ip_augment,
        ipv4_address,
        payload,
        note_text,
    }
}

/// Registry with every fixture module registered under one model
pub fn registry() -> (Fixture, Arc<ModelRegistry>) {
    let fixture = fixture();
    let registry = Arc::new(ModelRegistry::new(
        Arc::new(fixture.tree.clone()),
        RegistryConfig::default(),
    ));
    registry
        .register_model(
            &ModelRegistrationParam::new("fixture")
                .with_module(ModuleId::new("ietf-interfaces", None))
                .with_module(ModuleId::new("ext-ip", None))
                .with_module(ModuleId::new("app", None)),
        )
        .unwrap();
    (fixture, registry)
}
