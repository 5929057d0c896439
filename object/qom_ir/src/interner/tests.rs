use super::*;
use pretty_assertions::assert_eq;

#[test]
fn intern_and_lookup() {
    let interner = StringInterner::new();

    let cpu = interner.intern("cpu");
    let device = interner.intern("device");
    let cpu2 = interner.intern("cpu");

    assert_eq!(cpu, cpu2);
    assert_ne!(cpu, device);

    assert_eq!(interner.lookup(cpu), "cpu");
    assert_eq!(interner.lookup(device), "device");
}

#[test]
fn empty_string_is_pre_interned() {
    let interner = StringInterner::new();
    assert_eq!(interner.intern(""), Name::EMPTY);
    assert_eq!(interner.lookup(Name::EMPTY), "");
}

#[test]
fn root_type_names_are_pre_interned() {
    let interner = StringInterner::new();
    assert_eq!(interner.len(), 3);

    let object = interner.get(TYPE_OBJECT).expect("object is pre-interned");
    let interface = interner
        .get(TYPE_INTERFACE)
        .expect("interface is pre-interned");
    assert_eq!(interner.lookup(object), TYPE_OBJECT);
    assert_eq!(interner.lookup(interface), TYPE_INTERFACE);
}

#[test]
fn get_does_not_intern() {
    let interner = StringInterner::new();
    let before = interner.len();

    assert_eq!(interner.get("m68k-cpu"), None);
    assert_eq!(interner.len(), before);

    let name = interner.intern("m68k-cpu");
    assert_eq!(interner.get("m68k-cpu"), Some(name));
    assert_eq!(interner.len(), before + 1);
}

#[test]
fn shared_interner_clones_share_storage() {
    let interner = SharedInterner::new();
    let interner2 = interner.clone();

    let name1 = interner.intern("m68020-m68k-cpu");
    let name2 = interner2.intern("m68020-m68k-cpu");

    assert_eq!(name1, name2);
}

#[test]
fn lookup_static_outlives_interner() {
    let leaked = {
        let interner = StringInterner::new();
        let name = interner.intern("cfv4e-m68k-cpu");
        interner.lookup_static(name)
    };
    assert_eq!(leaked, "cfv4e-m68k-cpu");
}

#[test]
fn concurrent_interning_converges() {
    let interner = SharedInterner::new();
    let names: Vec<Name> = std::thread::scope(|s| {
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let interner = interner.clone();
                s.spawn(move || interner.intern("any-m68k-cpu"))
            })
            .collect();
        handles
            .into_iter()
            .map(|h| h.join().expect("interning thread panicked"))
            .collect()
    });

    assert!(names.windows(2).all(|w| w[0] == w[1]));
    assert_eq!(interner.lookup(names[0]), "any-m68k-cpu");
}
