//! Motorola 68k CPU family.
//!
//! Registers the abstract `m68k-cpu` type under `cpu` and one concrete type
//! per model, named `<model>-m68k-cpu`. Each model's class carries its
//! [`M68kFeatures`]; instances carry the architectural registers.

mod cpu;
mod features;

pub use cpu::{
    m68k_cpu_class_by_name, m68k_cpu_list, m68k_cpu_reset, m68k_features, register_types,
    M68kRegs, M68K_CLASS_FEATURES, M68K_CLASS_SIZE, M68K_INSTANCE_SIZE, M68K_MODELS, M68K_PC,
    M68K_REGS_A, M68K_REGS_D, M68K_SR, M68K_SR_RESET, M68K_VBR,
};
pub use features::M68kFeatures;

use qom_object::declare_object_type;

pub const TYPE_M68K_CPU: &str = "m68k-cpu";
pub const M68K_CPU_TYPE_SUFFIX: &str = "-m68k-cpu";

/// Type name of the m68k CPU model `model`.
pub fn m68k_cpu_type_name(model: &str) -> String {
    format!("{model}{M68K_CPU_TYPE_SUFFIX}")
}

declare_object_type!(
    /// Marker for `m68k-cpu` instances.
    pub M68kCpu, M68kCpuClass, TYPE_M68K_CPU
);
