//! Type descriptors.
//!
//! A [`TypeInfo`] is the static declaration an architecture or device module
//! hands to the registry: name, parent, block sizes, lifecycle hooks, and the
//! interfaces it implements. It is immutable once registered.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use bitflags::bitflags;

use crate::{ClassView, HookResult, InstanceView};

/// Hook run over a class block (`class_init`, `class_base_init`).
pub type ClassHook = Arc<dyn Fn(&mut ClassView<'_>) -> HookResult + Send + Sync>;

/// Hook run over an instance block (`instance_init`, `instance_post_init`,
/// `instance_finalize`).
pub type InstanceHook = Arc<dyn Fn(&mut InstanceView<'_>) -> HookResult + Send + Sync>;

/// Interface vtable, downcast by the caller to its concrete table type.
pub type Vtable = Arc<dyn Any + Send + Sync>;

bitflags! {
    /// Properties of a type, declared or derived at resolution.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
    pub struct TypeFlags: u8 {
        /// Cannot be instantiated.
        const ABSTRACT = 1 << 0;
        /// Descends from the interface root.
        const INTERFACE = 1 << 1;
    }
}

/// One implemented interface and its vtable.
#[derive(Clone)]
pub struct InterfaceImpl {
    /// Name of the interface type.
    pub name: String,
    /// Function table for this implementor.
    pub vtable: Vtable,
}

impl InterfaceImpl {
    /// Pair an interface type name with its vtable.
    pub fn new<V: Any + Send + Sync>(name: impl Into<String>, vtable: V) -> Self {
        InterfaceImpl {
            name: name.into(),
            vtable: Arc::new(vtable),
        }
    }
}

impl fmt::Debug for InterfaceImpl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InterfaceImpl")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// A type descriptor.
///
/// `parent: None` derives from the universal `object` root. `None` sizes
/// inherit the parent's resolved size.
#[derive(Clone, Default)]
pub struct TypeInfo {
    pub name: String,
    pub parent: Option<String>,
    pub instance_size: Option<usize>,
    pub class_size: Option<usize>,
    pub flags: TypeFlags,
    pub instance_init: Option<InstanceHook>,
    pub instance_post_init: Option<InstanceHook>,
    pub instance_finalize: Option<InstanceHook>,
    pub class_base_init: Option<ClassHook>,
    pub class_init: Option<ClassHook>,
    pub interfaces: Vec<InterfaceImpl>,
}

impl TypeInfo {
    /// Start a descriptor for `name`.
    pub fn new(name: impl Into<String>) -> Self {
        TypeInfo {
            name: name.into(),
            ..TypeInfo::default()
        }
    }

    #[must_use]
    pub fn parent(mut self, parent: impl Into<String>) -> Self {
        self.parent = Some(parent.into());
        self
    }

    #[must_use]
    pub fn instance_size(mut self, size: usize) -> Self {
        self.instance_size = Some(size);
        self
    }

    #[must_use]
    pub fn class_size(mut self, size: usize) -> Self {
        self.class_size = Some(size);
        self
    }

    /// Mark the type abstract.
    #[must_use]
    pub fn abstract_type(mut self) -> Self {
        self.flags |= TypeFlags::ABSTRACT;
        self
    }

    #[must_use]
    pub fn instance_init(
        mut self,
        hook: impl Fn(&mut InstanceView<'_>) -> HookResult + Send + Sync + 'static,
    ) -> Self {
        self.instance_init = Some(Arc::new(hook));
        self
    }

    /// Hook run after every ancestor's `instance_init` completed.
    #[must_use]
    pub fn instance_post_init(
        mut self,
        hook: impl Fn(&mut InstanceView<'_>) -> HookResult + Send + Sync + 'static,
    ) -> Self {
        self.instance_post_init = Some(Arc::new(hook));
        self
    }

    #[must_use]
    pub fn instance_finalize(
        mut self,
        hook: impl Fn(&mut InstanceView<'_>) -> HookResult + Send + Sync + 'static,
    ) -> Self {
        self.instance_finalize = Some(Arc::new(hook));
        self
    }

    /// Hook run on the class of this type and of every descendant, before
    /// the descendant's own `class_init`.
    #[must_use]
    pub fn class_base_init(
        mut self,
        hook: impl Fn(&mut ClassView<'_>) -> HookResult + Send + Sync + 'static,
    ) -> Self {
        self.class_base_init = Some(Arc::new(hook));
        self
    }

    #[must_use]
    pub fn class_init(
        mut self,
        hook: impl Fn(&mut ClassView<'_>) -> HookResult + Send + Sync + 'static,
    ) -> Self {
        self.class_init = Some(Arc::new(hook));
        self
    }

    /// Implement the interface `name` with `vtable`.
    #[must_use]
    pub fn interface<V: Any + Send + Sync>(mut self, name: impl Into<String>, vtable: V) -> Self {
        self.interfaces.push(InterfaceImpl::new(name, vtable));
        self
    }

    /// Whether the type was declared abstract.
    pub fn is_abstract(&self) -> bool {
        self.flags.contains(TypeFlags::ABSTRACT)
    }
}

impl fmt::Debug for TypeInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeInfo")
            .field("name", &self.name)
            .field("parent", &self.parent)
            .field("instance_size", &self.instance_size)
            .field("class_size", &self.class_size)
            .field("flags", &self.flags)
            .field("instance_init", &self.instance_init.is_some())
            .field("instance_post_init", &self.instance_post_init.is_some())
            .field("instance_finalize", &self.instance_finalize.is_some())
            .field("class_base_init", &self.class_base_init.is_some())
            .field("class_init", &self.class_init.is_some())
            .field("interfaces", &self.interfaces)
            .finish()
    }
}
