//! Views handed to class and instance hooks.
//!
//! A hook never sees a raw [`DataBlock`]. Class hooks get a [`ClassView`]
//! over the whole class block being built, so a descendant may override
//! fields an ancestor set. Instance hooks get an [`InstanceView`] that may
//! write only the byte range the hook's own type declared and read
//! everything up to the end of that range.

use std::ops::Range;

use crate::{Class, DataBlock, ObjectError, ObjectResult, Scalar};

/// Mutable access to a class block while its class is being built.
pub struct ClassView<'a> {
    type_name: &'static str,
    data: &'a mut DataBlock,
    parent: Option<&'a Class>,
}

impl<'a> ClassView<'a> {
    pub(crate) fn new(
        type_name: &'static str,
        data: &'a mut DataBlock,
        parent: Option<&'a Class>,
    ) -> Self {
        ClassView {
            type_name,
            data,
            parent,
        }
    }

    /// Name of the class being built.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// The already-resolved parent class, if any.
    pub fn parent(&self) -> Option<&'a Class> {
        self.parent
    }

    /// Size of the class block.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the class block is empty.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Read a scalar from the class block.
    pub fn read<T: Scalar>(&self, offset: usize) -> ObjectResult<T> {
        self.data.read(offset)
    }

    /// Write a scalar into the class block.
    pub fn write<T: Scalar>(&mut self, offset: usize, value: T) -> ObjectResult<()> {
        self.data.write(offset, value)
    }

    /// Build a hook failure attributed to this class.
    pub fn fail(&self, message: impl Into<String>) -> ObjectError {
        ObjectError::hook(self.type_name, message)
    }
}

/// Range-restricted access to an instance block during init or finalize.
pub struct InstanceView<'a> {
    class: &'a Class,
    owner: &'static str,
    data: &'a mut DataBlock,
    own: Range<usize>,
}

impl<'a> InstanceView<'a> {
    /// Create a view for the hook of `owner`, which declared `own`.
    ///
    /// `class` is the concrete class of the object being built, which may be
    /// a descendant of `owner`.
    pub fn new(
        class: &'a Class,
        owner: &'static str,
        data: &'a mut DataBlock,
        own: Range<usize>,
    ) -> Self {
        InstanceView {
            class,
            owner,
            data,
            own,
        }
    }

    /// Concrete class of the object.
    pub fn class(&self) -> &'a Class {
        self.class
    }

    /// Type whose hook is running.
    pub fn owner(&self) -> &'static str {
        self.owner
    }

    /// Byte range this hook's type declared.
    pub fn own_range(&self) -> Range<usize> {
        self.own.clone()
    }

    /// Read a scalar from this type's fields or an ancestor's.
    pub fn read<T: Scalar>(&self, offset: usize) -> ObjectResult<T> {
        let range = self.data.checked(offset, T::SIZE, 0..self.own.end)?;
        self.data.read(range.start)
    }

    /// Write a scalar into this type's own fields.
    pub fn write<T: Scalar>(&mut self, offset: usize, value: T) -> ObjectResult<()> {
        let range = self.data.checked(offset, T::SIZE, self.own.clone())?;
        self.data.write(range.start, value)
    }

    /// Build a hook failure attributed to the owning type.
    pub fn fail(&self, message: impl Into<String>) -> ObjectError {
        ObjectError::hook(self.owner, message)
    }
}
