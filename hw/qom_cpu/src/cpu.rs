//! The abstract `cpu` type, its reset interface, and model lookup.

use std::sync::Arc;

use qom_object::qom_types::TYPE_INTERFACE;
use qom_object::{
    declare_object_type, Class, Object, ObjectResult, ObjectType, TypeInfo, TypeRegistry,
};

use crate::device::{DEVICE_CLASS_SIZE, DEVICE_INSTANCE_SIZE, TYPE_DEVICE};

pub const TYPE_CPU: &str = "cpu";
pub const TYPE_RESETTABLE: &str = "resettable";

/// Instance offset of the CPU index (`u32`).
pub const CPU_INDEX: usize = DEVICE_INSTANCE_SIZE;
/// Instance offset of the halted flag (`u8`).
pub const CPU_HALTED: usize = DEVICE_INSTANCE_SIZE + 4;
pub const CPU_INSTANCE_SIZE: usize = DEVICE_INSTANCE_SIZE + 8;

/// Class offset of the number of core registers exposed to debuggers (`u32`).
pub const CPU_CLASS_NUM_CORE_REGS: usize = DEVICE_CLASS_SIZE;
/// Class offset of the target page size, in bits (`u32`).
pub const CPU_CLASS_PAGE_BITS: usize = DEVICE_CLASS_SIZE + 4;
pub const CPU_CLASS_SIZE: usize = DEVICE_CLASS_SIZE + 8;

/// CPU index of a CPU not yet plugged into a board.
pub const UNASSIGNED_CPU_INDEX: u32 = u32::MAX;

declare_object_type!(
    /// Marker for `cpu` instances.
    pub Cpu, CpuClass, TYPE_CPU
);

/// Vtable of the `resettable` interface.
#[derive(Clone, Copy, Debug)]
pub struct ResetVtable {
    /// Bring the object back to its power-on state.
    pub reset: fn(&mut Object) -> ObjectResult<()>,
}

pub(crate) fn resettable_type_info() -> TypeInfo {
    TypeInfo::new(TYPE_RESETTABLE).parent(TYPE_INTERFACE)
}

pub(crate) fn type_info() -> TypeInfo {
    TypeInfo::new(TYPE_CPU)
        .parent(TYPE_DEVICE)
        .abstract_type()
        .instance_size(CPU_INSTANCE_SIZE)
        .class_size(CPU_CLASS_SIZE)
        .instance_init(|cpu| cpu.write(CPU_INDEX, UNASSIGNED_CPU_INDEX))
        .class_init(|class| {
            // Models without a page size of their own get 4 KiB pages.
            class.write(CPU_CLASS_PAGE_BITS, 12_u32)
        })
}

/// Reset `object`, which must be a live CPU.
///
/// Clears the halted flag, then runs the `resettable` vtable of the CPU's
/// class if it has one.
pub fn cpu_reset(object: &mut Object) -> ObjectResult<()> {
    Cpu::cast_mut(object)?
        .data_mut()
        .write(CPU_HALTED, 0_u8)?;

    let model_reset = object
        .class()
        .interface::<ResetVtable>(TYPE_RESETTABLE)
        .map(|vtable| vtable.reset);
    if let Some(reset) = model_reset {
        reset(object)?;
    }
    tracing::debug!(type_name = object.type_name(), "cpu reset");
    Ok(())
}

/// Map a CPU model name to its class.
///
/// Looks up `<model><suffix>`. Returns `None` when no such type exists, when
/// it is abstract, or when it does not derive from `base`.
pub fn cpu_class_by_name(
    registry: &TypeRegistry,
    base: &str,
    model: &str,
    suffix: &str,
) -> ObjectResult<Option<Arc<Class>>> {
    let type_name = format!("{model}{suffix}");
    let Some(class) = registry.class_by_name(&type_name)? else {
        return Ok(None);
    };
    if class.is_abstract() || !class.is_a(base) {
        tracing::debug!(type_name, base, "not a usable cpu model");
        return Ok(None);
    }
    Ok(Some(class))
}

/// Names of the concrete models deriving from `base`, with `suffix`
/// stripped, sorted by name.
pub fn cpu_model_list(
    registry: &TypeRegistry,
    base: &str,
    suffix: &str,
) -> ObjectResult<Vec<&'static str>> {
    let models = registry
        .class_list(base, false)?
        .iter()
        .map(|class| {
            let name = class.type_name();
            name.strip_suffix(suffix).unwrap_or(name)
        })
        .collect();
    Ok(models)
}
