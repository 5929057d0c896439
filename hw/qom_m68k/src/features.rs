use bitflags::bitflags;

bitflags! {
    /// Optional instruction set features of an m68k model.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
    pub struct M68kFeatures: u64 {
        /// Base 68000 instruction set.
        const M68K = 1 << 0;
        const MOVEP = 1 << 1;
        /// Scaled index addressing modes.
        const SCALED_INDEX = 1 << 2;
        /// 32-bit multiply and divide.
        const LONG_MULDIV = 1 << 3;
        const BITFIELD = 1 << 4;
        const CAS = 1 << 5;
        const BKPT = 1 << 6;
        const RTD = 1 << 7;
        const CHK2 = 1 << 8;
        const MOVEC = 1 << 9;
        /// `bra.l` with a 32-bit displacement.
        const BRAL = 1 << 10;
        /// On-chip 68881/68882 compatible FPU.
        const FPU = 1 << 11;
        /// ColdFire ISA revisions.
        const CF_ISA_A = 1 << 12;
        const CF_ISA_B = 1 << 13;
        const CF_FPU = 1 << 14;
        /// Enhanced multiply-accumulate unit.
        const CF_EMAC = 1 << 15;
        /// Separate user stack pointer.
        const USP = 1 << 16;
    }
}

impl M68kFeatures {
    pub const M68000: Self = Self::M68K.union(Self::MOVEP);

    pub const M68020: Self = Self::M68000
        .union(Self::SCALED_INDEX)
        .union(Self::LONG_MULDIV)
        .union(Self::BITFIELD)
        .union(Self::CAS)
        .union(Self::BKPT)
        .union(Self::RTD)
        .union(Self::CHK2)
        .union(Self::MOVEC)
        .union(Self::BRAL);

    pub const M68040: Self = Self::M68020.union(Self::FPU);

    pub const CFV4E: Self = Self::CF_ISA_A
        .union(Self::CF_ISA_B)
        .union(Self::BRAL)
        .union(Self::CF_FPU)
        .union(Self::CF_EMAC)
        .union(Self::USP);

    /// Whether this is a ColdFire feature set.
    pub fn is_coldfire(self) -> bool {
        self.contains(Self::CF_ISA_A)
    }
}
