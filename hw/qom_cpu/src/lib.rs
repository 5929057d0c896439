//! Base `device` and `cpu` types for QOM boards.
//!
//! ```text
//! object
//!   └── device (abstract)
//!         └── cpu (abstract, family roots and models below)
//! interface
//!   └── resettable
//! ```
//!
//! CPU families register their own abstract root under `cpu` and one
//! concrete type per model, named `<model><suffix>`.

mod cpu;
mod device;

pub use cpu::{
    cpu_class_by_name, cpu_model_list, cpu_reset, Cpu, CpuClass, ResetVtable,
    CPU_CLASS_NUM_CORE_REGS, CPU_CLASS_PAGE_BITS, CPU_CLASS_SIZE, CPU_HALTED, CPU_INDEX,
    CPU_INSTANCE_SIZE, TYPE_CPU, TYPE_RESETTABLE, UNASSIGNED_CPU_INDEX,
};
pub use device::{
    device_is_realized, device_realize, Device, DeviceClass, DEVICE_CLASS_HOTPLUGGABLE,
    DEVICE_CLASS_SIZE, DEVICE_INSTANCE_SIZE, DEVICE_REALIZED, TYPE_DEVICE,
};

use qom_object::{ObjectResult, TypeRegistry};

/// Register `device`, `cpu`, and `resettable`.
pub fn register_types(registry: &TypeRegistry) -> ObjectResult<()> {
    registry.register(device::type_info())?;
    registry.register(cpu::resettable_type_info())?;
    registry.register(cpu::type_info())?;
    tracing::debug!("registered device and cpu base types");
    Ok(())
}
