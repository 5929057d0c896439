//! The `m68k-cpu` family type and its models.

use std::sync::Arc;

use qom_cpu::{
    cpu_class_by_name, cpu_model_list, ResetVtable, CPU_CLASS_NUM_CORE_REGS, CPU_CLASS_PAGE_BITS,
    CPU_CLASS_SIZE, CPU_INSTANCE_SIZE, TYPE_CPU, TYPE_RESETTABLE,
};
use qom_object::{
    Class, ClassType, DataBlock, Object, ObjectResult, ObjectType, TypeInfo, TypeRegistry,
};

use crate::{
    m68k_cpu_type_name, M68kCpu, M68kCpuClass, M68kFeatures, M68K_CPU_TYPE_SUFFIX, TYPE_M68K_CPU,
};

/// Instance offset of D0..D7 (`u32` each).
pub const M68K_REGS_D: usize = CPU_INSTANCE_SIZE;
/// Instance offset of A0..A7 (`u32` each).
pub const M68K_REGS_A: usize = M68K_REGS_D + 32;
pub const M68K_PC: usize = M68K_REGS_A + 32;
/// Status register (`u16`).
pub const M68K_SR: usize = M68K_PC + 4;
/// Vector base register (`u32`).
pub const M68K_VBR: usize = M68K_SR + 4;
pub const M68K_INSTANCE_SIZE: usize = M68K_VBR + 8;

/// Class offset of the model's [`M68kFeatures`] (`u64`).
pub const M68K_CLASS_FEATURES: usize = CPU_CLASS_SIZE;
pub const M68K_CLASS_SIZE: usize = CPU_CLASS_SIZE + 8;

/// Supervisor mode, interrupts masked.
pub const M68K_SR_RESET: u16 = 0x2700;

/// D0-D7, A0-A7, PC, SR.
const M68K_NUM_CORE_REGS: u32 = 18;
const M68K_PAGE_BITS: u32 = 12;

/// Registered models and their feature sets.
pub const M68K_MODELS: &[(&str, M68kFeatures)] = &[
    ("m68000", M68kFeatures::M68000),
    ("m68020", M68kFeatures::M68020),
    ("m68040", M68kFeatures::M68040),
    ("cfv4e", M68kFeatures::CFV4E),
    ("any", M68kFeatures::all()),
];

/// Architectural register file of an m68k CPU.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct M68kRegs {
    pub d: [u32; 8],
    pub a: [u32; 8],
    pub pc: u32,
    pub sr: u16,
    pub vbr: u32,
}

impl M68kRegs {
    /// Power-on register state.
    pub fn reset_state() -> Self {
        M68kRegs {
            sr: M68K_SR_RESET,
            ..M68kRegs::default()
        }
    }

    /// Read the registers of a live m68k CPU.
    pub fn load(object: &Object) -> ObjectResult<Self> {
        let cpu = M68kCpu::cast(object)?;
        let data = cpu.data();
        let mut regs = M68kRegs {
            pc: data.read(M68K_PC)?,
            sr: data.read(M68K_SR)?,
            vbr: data.read(M68K_VBR)?,
            ..M68kRegs::default()
        };
        for (n, (d, a)) in regs.d.iter_mut().zip(regs.a.iter_mut()).enumerate() {
            *d = data.read(M68K_REGS_D + 4 * n)?;
            *a = data.read(M68K_REGS_A + 4 * n)?;
        }
        Ok(regs)
    }

    /// Write the registers into a live m68k CPU.
    pub fn store(&self, object: &mut Object) -> ObjectResult<()> {
        let mut cpu = M68kCpu::cast_mut(object)?;
        let data: &mut DataBlock = cpu.data_mut();
        for (n, (d, a)) in self.d.iter().zip(&self.a).enumerate() {
            data.write(M68K_REGS_D + 4 * n, *d)?;
            data.write(M68K_REGS_A + 4 * n, *a)?;
        }
        data.write(M68K_PC, self.pc)?;
        data.write(M68K_SR, self.sr)?;
        data.write(M68K_VBR, self.vbr)
    }
}

/// Reset vtable entry of every m68k model.
pub fn m68k_cpu_reset(object: &mut Object) -> ObjectResult<()> {
    M68kRegs::reset_state().store(object)?;
    tracing::trace!(type_name = object.type_name(), "m68k registers reset");
    Ok(())
}

fn family_type_info() -> TypeInfo {
    TypeInfo::new(TYPE_M68K_CPU)
        .parent(TYPE_CPU)
        .abstract_type()
        .instance_size(M68K_INSTANCE_SIZE)
        .class_size(M68K_CLASS_SIZE)
        .instance_init(|cpu| cpu.write(M68K_SR, M68K_SR_RESET))
        .class_init(|class| {
            class.write(CPU_CLASS_NUM_CORE_REGS, M68K_NUM_CORE_REGS)?;
            class.write(CPU_CLASS_PAGE_BITS, M68K_PAGE_BITS)
        })
        .interface(
            TYPE_RESETTABLE,
            ResetVtable {
                reset: m68k_cpu_reset,
            },
        )
}

fn model_type_info(model: &str, features: M68kFeatures) -> TypeInfo {
    TypeInfo::new(m68k_cpu_type_name(model))
        .parent(TYPE_M68K_CPU)
        .class_init(move |class| class.write(M68K_CLASS_FEATURES, features.bits()))
}

/// Register `m68k-cpu` and every model in [`M68K_MODELS`].
///
/// The base `device` and `cpu` types come from [`qom_cpu::register_types`];
/// they may be registered before or after this call.
pub fn register_types(registry: &TypeRegistry) -> ObjectResult<()> {
    registry.register(family_type_info())?;
    for &(model, features) in M68K_MODELS {
        registry.register(model_type_info(model, features))?;
    }
    tracing::debug!(models = M68K_MODELS.len(), "registered m68k cpu models");
    Ok(())
}

/// Feature set stored in an m68k class.
pub fn m68k_features(class: &Class) -> ObjectResult<M68kFeatures> {
    let bits = M68kCpuClass::cast(class)?.read::<u64>(M68K_CLASS_FEATURES)?;
    Ok(M68kFeatures::from_bits_truncate(bits))
}

/// Class of the m68k model `model`, or `None` if there is no such model.
pub fn m68k_cpu_class_by_name(
    registry: &TypeRegistry,
    model: &str,
) -> ObjectResult<Option<Arc<Class>>> {
    cpu_class_by_name(registry, TYPE_M68K_CPU, model, M68K_CPU_TYPE_SUFFIX)
}

/// Model names sorted alphabetically, with `any` last.
pub fn m68k_cpu_list(registry: &TypeRegistry) -> ObjectResult<Vec<&'static str>> {
    let mut models = cpu_model_list(registry, TYPE_M68K_CPU, M68K_CPU_TYPE_SUFFIX)?;
    models.sort_by_key(|model| *model == "any");
    Ok(models)
}

#[cfg(test)]
#[expect(clippy::expect_used, reason = "Test code uses expect for clarity")]
mod tests;
