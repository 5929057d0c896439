use pretty_assertions::assert_eq;

use qom_object::{Factory, ObjectError, TypeInfo, TypeRegistry};

use super::*;

#[test]
fn realize_sets_flag_on_devices_only() {
    let registry = TypeRegistry::new();
    registry.register(type_info()).expect("register device");
    registry
        .register(TypeInfo::new("led").parent(TYPE_DEVICE))
        .expect("register led");
    registry
        .register(TypeInfo::new("clock"))
        .expect("register clock");
    let factory = Factory::new(&registry);

    let mut led = factory.instantiate("led").expect("create led");
    assert_eq!(device_is_realized(&led), Ok(false));
    device_realize(&mut led).expect("realize");
    assert_eq!(device_is_realized(&led), Ok(true));
    assert_eq!(led.class().read::<u8>(DEVICE_CLASS_HOTPLUGGABLE), Ok(1));

    let mut clock = factory.instantiate("clock").expect("create clock");
    assert_eq!(
        device_realize(&mut clock),
        Err(ObjectError::TypeMismatch {
            actual: "clock".into(),
            target: TYPE_DEVICE.into(),
        })
    );

    led.finalize().expect("finalize led");
    clock.finalize().expect("finalize clock");
}
