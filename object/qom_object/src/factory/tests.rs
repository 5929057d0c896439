use std::sync::Arc;

use pretty_assertions::assert_eq;

use qom_types::{ObjectError, TypeInfo, TypeRegistry};

use super::Factory;

fn registry() -> TypeRegistry {
    let registry = TypeRegistry::new();
    registry
        .register(TypeInfo::new("serial").instance_size(16).instance_init(|view| {
            view.write(0, 0x3f8_u32)?;
            view.write(4, 4_u8)
        }))
        .expect("register serial");
    registry
}

#[test]
fn instantiate_resolves_and_initializes() {
    let registry = registry();
    let factory = Factory::new(&registry);
    assert_eq!(registry.resolved_count(), 0);

    let mut obj = factory.instantiate("serial").expect("create serial");
    assert_eq!(registry.resolved_count(), 2);

    let data = obj.data().expect("live");
    assert_eq!(data.len(), 16);
    assert_eq!(data.read::<u32>(0), Ok(0x3f8));
    assert_eq!(data.read::<u8>(4), Ok(4));

    factory.finalize(&mut obj).expect("finalize");
}

#[test]
fn objects_share_one_class() {
    let registry = registry();
    let factory = Factory::new(&registry);

    let mut first = factory.instantiate("serial").expect("first");
    let mut second = factory
        .instantiate_class(Arc::clone(first.class_arc()))
        .expect("second");
    assert!(Arc::ptr_eq(first.class_arc(), second.class_arc()));

    first
        .data_mut()
        .expect("live")
        .write(8, 1_u64)
        .expect("write");
    assert_eq!(second.data().expect("live").read::<u64>(8), Ok(0));

    factory.finalize(&mut first).expect("finalize first");
    factory.finalize(&mut second).expect("finalize second");
}

#[test]
fn instantiate_unknown_type_fails() {
    let registry = registry();
    assert_eq!(
        Factory::new(&registry).instantiate("virtio-blk").map(|_| ()),
        Err(ObjectError::UnknownType {
            name: "virtio-blk".into()
        })
    );
}

#[test]
fn hook_writes_outside_own_range_fail() {
    let registry = registry();
    registry
        .register(
            TypeInfo::new("serial-16550")
                .parent("serial")
                .instance_size(20)
                .instance_init(|view| view.write(0, 1_u32)),
        )
        .expect("register serial-16550");

    let err = Factory::new(&registry)
        .instantiate("serial-16550")
        .expect_err("parent fields are read-only");
    assert_eq!(
        err,
        ObjectError::FieldOutOfBounds {
            offset: 0,
            len: 4,
            start: 16,
            end: 20,
        }
    );
}
