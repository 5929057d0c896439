//! End-to-end object lifecycle: registration, resolution, construction,
//! casts, and teardown through the public API.

#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]

use std::sync::Arc;

use parking_lot::Mutex;
use pretty_assertions::assert_eq;

use qom_object::{init_tracing, Factory, ObjectError, ObjectState, TypeInfo, TypeRegistry};

type Log = Arc<Mutex<Vec<String>>>;

/// a <- b <- c, each type logging its instance init and finalize.
fn abc(log: &Log) -> TypeRegistry {
    let registry = TypeRegistry::new();
    for (name, parent, size) in [("a", None, 4), ("b", Some("a"), 8), ("c", Some("b"), 12)] {
        let (init_log, fin_log) = (Arc::clone(log), Arc::clone(log));
        let mut info = TypeInfo::new(name)
            .instance_size(size)
            .class_size(size)
            .instance_init(move |view| {
                init_log.lock().push(view.owner().to_owned());
                let start = view.own_range().start;
                view.write(start, u32::try_from(start).unwrap_or(u32::MAX))
            })
            .instance_finalize(move |view| {
                fin_log.lock().push(view.owner().to_owned());
                Ok(())
            });
        if let Some(parent) = parent {
            info = info.parent(parent);
        }
        registry.register(info).expect("register");
    }
    registry
}

#[test]
fn init_runs_root_to_leaf_and_finalize_leaf_to_root() {
    init_tracing();
    let log = Log::default();
    let registry = abc(&log);
    let factory = Factory::new(&registry);

    let mut obj = factory.instantiate("c").expect("create c");
    assert_eq!(*log.lock(), vec!["a", "b", "c"]);

    let data = obj.data().expect("live");
    assert_eq!(data.len(), 12);
    assert_eq!(data.read::<u32>(0), Ok(0));
    assert_eq!(data.read::<u32>(4), Ok(4));
    assert_eq!(data.read::<u32>(8), Ok(8));

    log.lock().clear();
    factory.finalize(&mut obj).expect("finalize");
    assert_eq!(*log.lock(), vec!["c", "b", "a"]);
    assert_eq!(obj.state(), ObjectState::Finalized);
}

#[test]
fn casts_on_a_live_object() {
    let registry = abc(&Log::default());
    let mut obj = Factory::new(&registry).instantiate("c").expect("create c");

    {
        let handle = obj.handle().expect("live");
        assert!(handle.is_a("a"));
        assert!(handle.is_a("object"));
        assert!(!handle.is_a("interface"));
        assert_eq!(handle.cast("a").expect("upcast").static_type(), "a");
    }

    let mut a = Factory::new(&registry).instantiate("a").expect("create a");
    assert_eq!(
        a.handle().expect("live").cast("c").map(|h| h.static_type()),
        Err(ObjectError::TypeMismatch {
            actual: "a".into(),
            target: "c".into(),
        })
    );

    a.finalize().expect("finalize a");
    obj.finalize().expect("finalize c");
}

#[test]
fn finalized_object_rejects_every_access() {
    let registry = abc(&Log::default());
    let factory = Factory::new(&registry);
    let mut obj = factory.instantiate("b").expect("create b");
    factory.finalize(&mut obj).expect("finalize");

    let expected = ObjectError::UseAfterFinalize { name: "b".into() };
    assert_eq!(obj.data().map(|_| ()), Err(expected.clone()));
    assert_eq!(obj.handle().map(|_| ()), Err(expected.clone()));
    assert_eq!(factory.finalize(&mut obj), Err(expected));
    assert!(!obj.is_a("a"));
}

#[test]
fn abstract_type_is_a_target_but_not_instantiable() {
    let registry = TypeRegistry::new();
    registry
        .register(TypeInfo::new("device").instance_size(8).abstract_type())
        .expect("register device");
    registry
        .register(TypeInfo::new("uart").parent("device").instance_size(16))
        .expect("register uart");
    let factory = Factory::new(&registry);

    assert_eq!(
        factory.instantiate("device").map(|_| ()),
        Err(ObjectError::AbstractType {
            name: "device".into()
        })
    );

    let mut uart = factory.instantiate("uart").expect("create uart");
    assert!(uart.is_a("device"));
    uart.finalize().expect("finalize");
}

#[test]
fn class_data_is_shared_and_inherited() {
    let registry = TypeRegistry::new();
    registry
        .register(
            TypeInfo::new("cpu")
                .class_size(8)
                .abstract_type()
                .class_init(|class| class.write(0, 32_u32)),
        )
        .expect("register cpu");
    registry
        .register(
            TypeInfo::new("fast-cpu")
                .parent("cpu")
                .class_size(12)
                .class_init(|class| {
                    let width = class.read::<u32>(0)?;
                    class.write(8, width * 2)
                }),
        )
        .expect("register fast-cpu");
    let factory = Factory::new(&registry);

    let mut first = factory.instantiate("fast-cpu").expect("first");
    let mut second = factory.instantiate("fast-cpu").expect("second");
    assert!(Arc::ptr_eq(first.class_arc(), second.class_arc()));
    assert_eq!(first.class().read::<u32>(0), Ok(32));
    assert_eq!(first.class().read::<u32>(8), Ok(64));

    let cpu = registry.resolve("cpu").expect("resolve cpu");
    assert_eq!(cpu.class_size(), 8);
    assert_eq!(first.class().parent().map(|p| p.type_name()), Some("cpu"));

    first.finalize().expect("finalize first");
    second.finalize().expect("finalize second");
}

#[test]
fn objects_can_be_built_across_threads() {
    let registry = Arc::new(abc(&Log::default()));
    let handles: Vec<_> = (0..8)
        .map(|_| {
            let registry = Arc::clone(&registry);
            std::thread::spawn(move || {
                let mut obj = Factory::new(&registry).instantiate("c").expect("create");
                let size = obj.data().expect("live").len();
                obj.finalize().expect("finalize");
                size
            })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().expect("thread"), 12);
    }
    assert_eq!(registry.resolved_count(), 4);
}
