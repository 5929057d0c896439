//! Type registry and class model for QOM.
//!
//! Modules register [`TypeInfo`] descriptors with a [`TypeRegistry`]; the
//! registry lazily resolves each type into a shared [`Class`].
//!
//! # Architecture
//!
//! ```text
//! TypeRegistry (descriptors by Name)
//!     └── resolver (walk -> plan -> materialize)
//!             └── Class (class block, interface table, parent link)
//! ```
//!
//! Instances, factories, and casts on instances live in `qom_object`.

mod class;
mod data;
mod error;
mod info;
mod registry;
mod resolver;
mod view;

pub use class::{Ancestors, Class, InterfaceEntry};
pub use data::{DataBlock, Scalar};
pub use error::{HookResult, ObjectError, ObjectResult};
pub use info::{ClassHook, InstanceHook, InterfaceImpl, TypeFlags, TypeInfo, Vtable};
pub use registry::{RegistryConfig, TypeRegistry};
pub use view::{ClassView, InstanceView};

pub use qom_ir::{Name, TYPE_INTERFACE, TYPE_OBJECT};
