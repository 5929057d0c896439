/// Declare compile-time markers for a registered type.
///
/// Expands to an uninhabited instance marker implementing
/// [`ObjectType`](crate::ObjectType) and a class marker implementing
/// [`ClassType`](crate::ClassType).
///
/// ```
/// qom_object::declare_object_type!(pub Device, DeviceClass, "device");
///
/// use qom_object::ObjectType;
/// assert_eq!(Device::TYPE_NAME, "device");
/// ```
#[macro_export]
macro_rules! declare_object_type {
    ($(#[$meta:meta])* $vis:vis $instance:ident, $class:ident, $type_name:expr) => {
        $(#[$meta])*
        #[derive(Debug)]
        $vis enum $instance {}

        impl $crate::ObjectType for $instance {
            const TYPE_NAME: &'static str = $type_name;
        }

        #[derive(Debug)]
        $vis enum $class {}

        impl $crate::ClassType for $class {
            type Instance = $instance;
        }
    };
}
