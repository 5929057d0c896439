use pretty_assertions::assert_eq;

use super::*;

#[test]
fn register_file_layout_fits_instance() {
    assert_eq!(M68K_REGS_D, 16);
    assert_eq!(M68K_REGS_A, 48);
    assert_eq!(M68K_PC, 80);
    assert_eq!(M68K_SR, 84);
    assert_eq!(M68K_VBR, 88);
    assert_eq!(M68K_INSTANCE_SIZE, 96);
    assert_eq!(M68K_CLASS_FEATURES, 16);
}

#[test]
fn reset_state_is_supervisor_with_masked_interrupts() {
    let regs = M68kRegs::reset_state();
    assert_eq!(regs.sr, 0x2700);
    assert_eq!(regs.pc, 0);
    assert_eq!(regs.d, [0; 8]);
}

#[test]
fn model_table_is_consistent() {
    assert_eq!(M68K_MODELS.len(), 5);
    for &(model, features) in M68K_MODELS {
        assert!(!features.is_empty(), "{model} has no features");
    }
    let coldfire: Vec<&str> = M68K_MODELS
        .iter()
        .filter(|(_, features)| features.is_coldfire())
        .map(|&(model, _)| model)
        .collect();
    assert_eq!(coldfire, vec!["cfv4e", "any"]);
}

#[test]
fn registration_without_base_types_fails_on_resolve() {
    let registry = TypeRegistry::new();
    register_types(&registry).expect("register m68k");
    assert!(registry.resolve(&m68k_cpu_type_name("m68000")).is_err());
}
