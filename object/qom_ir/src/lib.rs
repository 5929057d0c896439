//! QOM IR - shared identifiers for the object model.
//!
//! Type names are looked up on every registration, resolution, and cast, so
//! they are interned once into compact [`Name`] handles:
//!
//! - **Intern Everything**: type names become `Name(u32)`, compared in O(1)
//! - **Process lifetime**: interned strings are leaked, so a resolved class
//!   can hand out its name as `&'static str` without borrowing the registry
//!
//! The well-known root type names live here too so every crate agrees on them.

mod interner;
mod name;

pub use interner::{InternError, SharedInterner, StringInterner};
pub use name::Name;

/// Name of the universal root of every instantiable type.
pub const TYPE_OBJECT: &str = "object";

/// Name of the abstract root of every interface type.
pub const TYPE_INTERFACE: &str = "interface";

/// Compile-time assertion that a type has a specific size.
///
/// Used to keep hot handle types from growing by accident.
#[macro_export]
macro_rules! static_assert_size {
    ($ty:ty, $size:expr) => {
        const _: [(); $size] = [(); ::std::mem::size_of::<$ty>()];
    };
}

#[cfg(target_pointer_width = "64")]
mod size_asserts {
    use super::Name;
    static_assert_size!(Name, 4);
    static_assert_size!(Option<Name>, 8);
}
