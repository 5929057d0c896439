//! Resolved classes.
//!
//! A [`Class`] is the shared runtime form of a type: its merged class
//! block, its interface table, and a link to its parent class. One class
//! exists per type name per registry and is shared by every instance.

use std::any::Any;
use std::fmt;
use std::ops::Range;
use std::sync::Arc;

use qom_ir::Name;

use crate::{DataBlock, ObjectResult, Scalar, TypeFlags, TypeInfo, Vtable};

/// An entry in a class's interface table.
#[derive(Clone)]
pub struct InterfaceEntry {
    /// The resolved interface class.
    pub interface: Arc<Class>,
    /// Type that supplied the vtable (the class itself or an ancestor).
    pub provider: &'static str,
    /// The vtable.
    pub vtable: Vtable,
}

impl fmt::Debug for InterfaceEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InterfaceEntry")
            .field("interface", &self.interface.type_name())
            .field("provider", &self.provider)
            .finish_non_exhaustive()
    }
}

/// A resolved class.
pub struct Class {
    pub(crate) name: Name,
    pub(crate) type_name: &'static str,
    pub(crate) parent: Option<Arc<Class>>,
    pub(crate) info: Arc<TypeInfo>,
    pub(crate) flags: TypeFlags,
    pub(crate) depth: usize,
    pub(crate) instance_size: usize,
    pub(crate) class_data: DataBlock,
    /// Interfaces in provision order, ancestors first.
    pub(crate) interfaces: Vec<InterfaceEntry>,
}

impl Class {
    /// Interned name of this type.
    #[inline]
    pub fn name(&self) -> Name {
        self.name
    }

    /// Name of this type.
    #[inline]
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Parent class, `None` for the roots.
    #[inline]
    pub fn parent(&self) -> Option<&Class> {
        self.parent.as_deref()
    }

    /// Shared handle to the parent class.
    pub fn parent_arc(&self) -> Option<&Arc<Class>> {
        self.parent.as_ref()
    }

    /// Descriptor this class was built from.
    pub fn info(&self) -> &TypeInfo {
        &self.info
    }

    pub fn flags(&self) -> TypeFlags {
        self.flags
    }

    pub fn is_abstract(&self) -> bool {
        self.flags.contains(TypeFlags::ABSTRACT)
    }

    pub fn is_interface(&self) -> bool {
        self.flags.contains(TypeFlags::INTERFACE)
    }

    /// Number of ancestors (0 for a root).
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Size of instance blocks of this type.
    pub fn instance_size(&self) -> usize {
        self.instance_size
    }

    /// Byte range of the instance block this type itself declared.
    pub fn own_instance_range(&self) -> Range<usize> {
        let start = self.parent().map_or(0, Class::instance_size);
        start..self.instance_size
    }

    /// The merged class block.
    pub fn class_data(&self) -> &DataBlock {
        &self.class_data
    }

    /// Size of the class block.
    pub fn class_size(&self) -> usize {
        self.class_data.len()
    }

    /// Read a scalar from the class block.
    pub fn read<T: Scalar>(&self, offset: usize) -> ObjectResult<T> {
        self.class_data.read(offset)
    }

    /// Iterate from this class up to the root.
    pub fn ancestors(&self) -> Ancestors<'_> {
        Ancestors { next: Some(self) }
    }

    /// The chain from the root down to this class.
    pub fn lineage(&self) -> Vec<&Class> {
        let mut chain: Vec<&Class> = self.ancestors().collect();
        chain.reverse();
        chain
    }

    /// Interface table, ancestors' entries first.
    pub fn interfaces(&self) -> &[InterfaceEntry] {
        &self.interfaces
    }

    /// Whether this class is `target` or a descendant of it.
    pub fn inherits(&self, target: &str) -> bool {
        self.ancestors().any(|c| c.type_name == target)
    }

    /// Find the class a cast to `target` lands on.
    ///
    /// Returns the matching ancestor class, or the implemented interface
    /// class when `target` is an interface (or an ancestor interface) in the
    /// table. O(depth).
    pub fn cast_target(&self, target: &str) -> Option<&Class> {
        if let Some(ancestor) = self.ancestors().find(|c| c.type_name == target) {
            return Some(ancestor);
        }
        self.interface_entry(target)
            .and_then(|entry| entry.interface.ancestors().find(|c| c.type_name == target))
    }

    /// Whether an instance of this class may be viewed as `target`.
    pub fn is_a(&self, target: &str) -> bool {
        self.cast_target(target).is_some()
    }

    /// Interface table entry satisfying `interface`.
    pub fn interface_entry(&self, interface: &str) -> Option<&InterfaceEntry> {
        self.interfaces
            .iter()
            .find(|entry| entry.interface.inherits(interface))
    }

    /// Typed vtable for `interface`, if implemented with a `V` table.
    pub fn interface<V: Any>(&self, interface: &str) -> Option<&V> {
        self.interface_entry(interface)
            .and_then(|entry| entry.vtable.downcast_ref::<V>())
    }
}

impl fmt::Debug for Class {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Class")
            .field("type_name", &self.type_name)
            .field("parent", &self.parent().map(Class::type_name))
            .field("flags", &self.flags)
            .field("instance_size", &self.instance_size)
            .field("class_size", &self.class_data.len())
            .field("interfaces", &self.interfaces)
            .finish()
    }
}

/// Iterator from a class to the root, see [`Class::ancestors`].
pub struct Ancestors<'a> {
    next: Option<&'a Class>,
}

impl<'a> Iterator for Ancestors<'a> {
    type Item = &'a Class;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = current.parent();
        Some(current)
    }
}
