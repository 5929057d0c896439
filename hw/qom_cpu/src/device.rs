//! The abstract `device` type.

use qom_object::{declare_object_type, Object, ObjectResult, ObjectType, TypeInfo};

pub const TYPE_DEVICE: &str = "device";

/// Instance offset of the realized flag (`u8`).
pub const DEVICE_REALIZED: usize = 0;
pub const DEVICE_INSTANCE_SIZE: usize = 8;

/// Class offset of the hotpluggable flag (`u8`).
pub const DEVICE_CLASS_HOTPLUGGABLE: usize = 0;
pub const DEVICE_CLASS_SIZE: usize = 8;

declare_object_type!(
    /// Marker for `device` instances.
    pub Device, DeviceClass, TYPE_DEVICE
);

pub(crate) fn type_info() -> TypeInfo {
    TypeInfo::new(TYPE_DEVICE)
        .abstract_type()
        .instance_size(DEVICE_INSTANCE_SIZE)
        .class_size(DEVICE_CLASS_SIZE)
        .class_init(|class| class.write(DEVICE_CLASS_HOTPLUGGABLE, 1_u8))
}

/// Mark `object` realized. Fails unless it is a live device.
pub fn device_realize(object: &mut Object) -> ObjectResult<()> {
    let mut device = Device::cast_mut(object)?;
    device.data_mut().write(DEVICE_REALIZED, 1_u8)?;
    tracing::debug!(type_name = device.class().type_name(), "device realized");
    Ok(())
}

pub fn device_is_realized(object: &Object) -> ObjectResult<bool> {
    let device = Device::cast(object)?;
    Ok(device.data().read::<u8>(DEVICE_REALIZED)? != 0)
}

#[cfg(test)]
#[expect(clippy::expect_used, reason = "Test code uses expect for clarity")]
mod tests;
