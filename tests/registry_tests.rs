//! Model registry tests
//!
//! Registration lifecycle, module lookup, and concurrent access from
//! several threads.

mod common;

use pretty_assertions::assert_eq;
use std::sync::Arc;
use std::thread;
use yangschema::runtime::{ModelRegistrationParam, ModelRegistry, ModuleId, RegistryConfig};
use yangschema::schema::SchemaPath;
use yangschema::Error;

fn empty_registry() -> ModelRegistry {
    ModelRegistry::new(Arc::new(common::fixture().tree), RegistryConfig::default())
}

fn interfaces_model(id: &str) -> ModelRegistrationParam {
    ModelRegistrationParam::new(id)
        .with_module(ModuleId::new("ietf-interfaces", Some("2014-05-08")))
        .with_module(ModuleId::new("ext-ip", None))
}

#[test]
fn test_register_and_lookup() {
    let registry = empty_registry();
    let model = registry.register_model(&interfaces_model("interfaces")).unwrap();
    assert_eq!(model.modules().len(), 2);

    let module = registry
        .get_module(&ModuleId::new("ext-ip", None))
        .unwrap();
    assert_eq!(module.id().revision(), Some("2016-03-01"));
    assert_eq!(module.namespace(), common::IP_NS);

    let by_name = registry
        .get_module_by_qualified_name("ietf-interfaces@2014-05-08")
        .unwrap();
    assert_eq!(by_name.namespace(), common::IF_NS);

    assert_eq!(
        registry
            .module_ids()
            .iter()
            .map(|id| id.to_string())
            .collect::<Vec<_>>(),
        vec!["ext-ip@2016-03-01", "ietf-interfaces@2014-05-08"]
    );
}

#[test]
fn test_unregister_is_idempotent() {
    let registry = empty_registry();
    let param = interfaces_model("interfaces");
    registry.register_model(&param).unwrap();

    assert!(registry.unregister_model(&param).is_some());
    assert!(registry.unregister_model(&param).is_none());
    assert!(registry.get_model("interfaces").is_none());
    assert!(registry.get_module(&ModuleId::new("ext-ip", None)).is_none());

    // modules are free again
    registry.register_model(&interfaces_model("again")).unwrap();
}

#[test]
fn test_duplicate_model() {
    let registry = empty_registry();
    registry.register_model(&interfaces_model("interfaces")).unwrap();
    let err = registry
        .register_model(&interfaces_model("interfaces"))
        .unwrap_err();
    assert!(matches!(err, Error::DuplicateModel(_)));
}

#[test]
fn test_module_owned_by_other_model_rolls_back() {
    let registry = empty_registry();
    registry
        .register_model(
            &ModelRegistrationParam::new("ip").with_module(ModuleId::new("ext-ip", None)),
        )
        .unwrap();

    let err = registry
        .register_model(&interfaces_model("interfaces"))
        .unwrap_err();
    assert!(matches!(err, Error::InvalidModel(_)));
    assert!(registry.get_model("interfaces").is_none());
    assert!(registry
        .get_module(&ModuleId::new("ietf-interfaces", None))
        .is_none());
}

#[test]
fn test_invalid_registrations() {
    let registry = empty_registry();
    assert!(matches!(
        registry.register_model(&ModelRegistrationParam::new("no-modules")),
        Err(Error::InvalidModel(_))
    ));
    assert!(matches!(
        registry.register_model(
            &ModelRegistrationParam::new("missing").with_module(ModuleId::new("absent", None))
        ),
        Err(Error::InvalidModel(_))
    ));
    assert!(matches!(
        registry.register_model(
            &ModelRegistrationParam::new("bad id!").with_module(ModuleId::new("app", None))
        ),
        Err(Error::InvalidModel(_))
    ));
}

#[test]
fn test_normalized_model_id() {
    let registry = empty_registry();
    let param = ModelRegistrationParam::normalized("onos-yang     runtime  ")
        .unwrap()
        .with_module(ModuleId::new("app", None));
    let model = registry.register_model(&param).unwrap();
    assert_eq!(model.id(), "onos-yang_runtime");
}

#[test]
fn test_get_models_sorted() {
    let registry = empty_registry();
    registry
        .register_model(&ModelRegistrationParam::new("zeta").with_module(ModuleId::new("app", None)))
        .unwrap();
    registry.register_model(&interfaces_model("alpha")).unwrap();

    let ids: Vec<_> = registry
        .get_models()
        .iter()
        .map(|m| m.id().to_string())
        .collect();
    assert_eq!(ids, vec!["alpha", "zeta"]);
}

#[test]
fn test_unregister_drops_anydata_registrations() {
    let (_, registry) = common::registry();
    let payload = SchemaPath::new("app", ["holder", "payload"]);
    registry
        .register_anydata_schema(&payload, &[SchemaPath::new("app", ["note-box"])])
        .unwrap();

    let fixture_param = ModelRegistrationParam::new("fixture");
    registry.unregister_model(&fixture_param).unwrap();
    registry
        .register_model(&fixture_param.with_module(ModuleId::new("app", None)))
        .unwrap();

    let through = SchemaPath::new("app", ["holder", "payload", "noteBox"]);
    assert!(registry.resolve_context(&through).is_err());
}

#[test]
fn test_concurrent_registration_of_one_model() {
    let registry = Arc::new(empty_registry());
    let handles: Vec<_> = (0..8)
        .map(|_| {
            let registry = Arc::clone(&registry);
            thread::spawn(move || registry.register_model(&interfaces_model("shared")).is_ok())
        })
        .collect();

    let successes = handles
        .into_iter()
        .map(|h| h.join().unwrap())
        .filter(|ok| *ok)
        .count();
    assert_eq!(successes, 1);
    assert_eq!(registry.get_models().len(), 1);
}

#[test]
fn test_concurrent_readers() {
    let (_, registry) = common::registry();
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let registry = Arc::clone(&registry);
            thread::spawn(move || {
                let path = SchemaPath::new("ietf-interfaces", ["interfaces", "interface", "mtu"]);
                (0..100).all(|_| registry.resolve_context(&path).is_ok())
            })
        })
        .collect();
    for handle in handles {
        assert!(handle.join().unwrap());
    }
}
