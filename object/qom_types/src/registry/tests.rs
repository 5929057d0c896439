use super::*;
use pretty_assertions::assert_eq;

#[test]
fn new_registry_holds_roots() {
    let registry = TypeRegistry::new();
    assert_eq!(registry.type_names(), vec![TYPE_INTERFACE, TYPE_OBJECT]);
    assert!(registry.contains(TYPE_OBJECT));
    assert!(registry
        .lookup(TYPE_INTERFACE)
        .expect("interface root")
        .is_abstract());
}

#[test]
fn register_and_lookup() {
    let registry = TypeRegistry::new();
    registry
        .register(TypeInfo::new("device").instance_size(8).abstract_type())
        .expect("register device");

    let info = registry.lookup("device").expect("device is registered");
    assert_eq!(info.name, "device");
    assert_eq!(info.instance_size, Some(8));
    assert!(info.is_abstract());
}

#[test]
fn lookup_unknown_type_fails() {
    let registry = TypeRegistry::new();
    assert_eq!(
        registry.lookup("isa-bus").map(|_| ()),
        Err(ObjectError::UnknownType {
            name: "isa-bus".into()
        })
    );
}

#[test]
fn duplicate_registration_keeps_original() {
    let registry = TypeRegistry::new();
    registry
        .register(TypeInfo::new("cpu").instance_size(16))
        .expect("first registration");

    let err = registry
        .register(TypeInfo::new("cpu").instance_size(64))
        .expect_err("second registration must fail");
    assert_eq!(err, ObjectError::DuplicateType { name: "cpu".into() });

    let info = registry.lookup("cpu").expect("original kept");
    assert_eq!(info.instance_size, Some(16));
}

#[test]
fn roots_cannot_be_redefined() {
    let registry = TypeRegistry::new();
    assert!(matches!(
        registry.register(TypeInfo::new(TYPE_OBJECT)),
        Err(ObjectError::DuplicateType { .. })
    ));
}

#[test]
fn parentless_types_derive_from_object() {
    let registry = TypeRegistry::new();
    registry
        .register(TypeInfo::new("device"))
        .expect("register device");

    let entry = registry.entry("device").expect("entry exists");
    assert_eq!(entry.parent, Some(registry.object_root));
}

#[test]
fn registration_order_is_insignificant() {
    let registry = TypeRegistry::new();
    registry
        .register(TypeInfo::new("m68k-cpu").parent("cpu"))
        .expect("child before parent");
    registry
        .register(TypeInfo::new("cpu"))
        .expect("parent after child");
    assert_eq!(registry.len(), 4);
}

#[test]
fn sealed_registry_rejects_when_late_registration_is_off() {
    let registry = TypeRegistry::with_config(RegistryConfig {
        late_registration: false,
    });
    registry.seal();
    assert!(registry.is_sealed());
    assert_eq!(
        registry.register(TypeInfo::new("late-device")),
        Err(ObjectError::RegistrySealed {
            name: "late-device".into()
        })
    );
}

#[test]
fn sealed_registry_accepts_late_plugins_by_default() {
    let registry = TypeRegistry::new();
    registry.seal();
    assert!(registry.register(TypeInfo::new("late-device")).is_ok());
    assert!(registry.contains("late-device"));
}

#[test]
fn type_names_are_sorted() {
    let registry = TypeRegistry::new();
    for name in ["m68020-m68k-cpu", "cpu", "device"] {
        registry.register(TypeInfo::new(name)).expect("register");
    }
    assert_eq!(
        registry.type_names(),
        vec!["cpu", "device", "interface", "m68020-m68k-cpu", "object"]
    );
}
