//! Checked casts between object handles.
//!
//! A handle borrows an [`Object`] and records the static type the caller
//! believes it has. Casting to any ancestor, back down to any type between
//! the static type and the concrete type, or to an implemented interface
//! succeeds; everything else is a recoverable
//! [`ObjectError::TypeMismatch`]. Checks walk the class chain, so they cost
//! O(depth).
//!
//! Typed casts go through marker types implementing [`ObjectType`],
//! normally declared with [`declare_object_type!`](crate::declare_object_type).

use std::fmt;
use std::marker::PhantomData;
use std::ops::{Deref, DerefMut};

use qom_types::{Class, DataBlock, ObjectError, ObjectResult};

use crate::Object;

/// A QOM type known at compile time.
pub trait ObjectType {
    /// Registered type name.
    const TYPE_NAME: &'static str;

    /// Checked cast of `object` to this type.
    fn cast(object: &Object) -> ObjectResult<TypedHandle<'_, Self>>
    where
        Self: Sized,
    {
        object.handle()?.downcast::<Self>()
    }

    /// Checked mutable cast of `object` to this type.
    fn cast_mut(object: &mut Object) -> ObjectResult<TypedHandleMut<'_, Self>>
    where
        Self: Sized,
    {
        object.handle_mut()?.downcast::<Self>()
    }

    /// Class of `object`, checked to be-a this type.
    fn class_of(object: &Object) -> ObjectResult<&Class> {
        object.ensure_live()?;
        check(object.class(), Self::TYPE_NAME).map(|_| object.class())
    }
}

/// The class side of an [`ObjectType`].
pub trait ClassType {
    type Instance: ObjectType;

    /// Checked cast of a class to this class type.
    fn cast(class: &Class) -> ObjectResult<&Class> {
        check(class, <Self::Instance as ObjectType>::TYPE_NAME).map(|_| class)
    }
}

/// Resolve `target` against `class`, returning the static name it lands on.
fn check(class: &Class, target: &str) -> ObjectResult<&'static str> {
    let landed = class.cast_target(target).map(Class::type_name);
    tracing::trace!(
        actual = class.type_name(),
        target,
        ok = landed.is_some(),
        "cast check"
    );
    landed.ok_or_else(|| ObjectError::TypeMismatch {
        actual: class.type_name().to_owned(),
        target: target.to_owned(),
    })
}

/// Checked cast of `handle` to `target`.
pub fn cast<'a>(handle: &Handle<'a>, target: &str) -> ObjectResult<Handle<'a>> {
    handle.cast(target)
}

/// Whether `handle` may be viewed as `target`. Never fails.
pub fn is_a(handle: &Handle<'_>, target: &str) -> bool {
    handle.is_a(target)
}

/// Shared reference to a live object plus its static type.
#[derive(Clone, Copy)]
pub struct Handle<'a> {
    object: &'a Object,
    static_type: &'static str,
}

impl<'a> Handle<'a> {
    pub(crate) fn new(object: &'a Object, static_type: &'static str) -> Self {
        Handle {
            object,
            static_type,
        }
    }

    pub fn object(&self) -> &'a Object {
        self.object
    }

    /// Type the holder currently treats the object as.
    pub fn static_type(&self) -> &'static str {
        self.static_type
    }

    /// Concrete class of the object.
    pub fn class(&self) -> &'a Class {
        self.object.class()
    }

    /// Instance block.
    pub fn data(&self) -> &'a DataBlock {
        self.object.raw_data()
    }

    pub fn is_a(&self, target: &str) -> bool {
        self.class().is_a(target)
    }

    /// Retype the handle as `target`.
    pub fn cast(&self, target: &str) -> ObjectResult<Handle<'a>> {
        let static_type = check(self.class(), target)?;
        Ok(Handle::new(self.object, static_type))
    }

    /// Retype the handle as `T`.
    pub fn downcast<T: ObjectType>(&self) -> ObjectResult<TypedHandle<'a, T>> {
        let handle = self.cast(T::TYPE_NAME)?;
        Ok(TypedHandle {
            handle,
            _marker: PhantomData,
        })
    }
}

impl fmt::Debug for Handle<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Handle")
            .field("static_type", &self.static_type)
            .field("type_name", &self.object.type_name())
            .finish()
    }
}

/// Exclusive reference to a live object plus its static type.
pub struct HandleMut<'a> {
    object: &'a mut Object,
    static_type: &'static str,
}

impl<'a> HandleMut<'a> {
    pub(crate) fn new(object: &'a mut Object, static_type: &'static str) -> Self {
        HandleMut {
            object,
            static_type,
        }
    }

    pub fn static_type(&self) -> &'static str {
        self.static_type
    }

    pub fn class(&self) -> &Class {
        self.object.class()
    }

    /// Shared view of the same object.
    pub fn as_handle(&self) -> Handle<'_> {
        Handle::new(&*self.object, self.static_type)
    }

    pub fn data(&self) -> &DataBlock {
        self.object.raw_data()
    }

    pub fn data_mut(&mut self) -> &mut DataBlock {
        self.object.raw_data_mut()
    }

    pub fn is_a(&self, target: &str) -> bool {
        self.class().is_a(target)
    }

    /// Retype the handle as `target`, consuming it.
    pub fn cast(self, target: &str) -> ObjectResult<HandleMut<'a>> {
        let static_type = check(self.object.class(), target)?;
        Ok(HandleMut::new(self.object, static_type))
    }

    /// Retype the handle as `T`, consuming it.
    pub fn downcast<T: ObjectType>(self) -> ObjectResult<TypedHandleMut<'a, T>> {
        let handle = self.cast(T::TYPE_NAME)?;
        Ok(TypedHandleMut {
            handle,
            _marker: PhantomData,
        })
    }
}

impl fmt::Debug for HandleMut<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandleMut")
            .field("static_type", &self.static_type)
            .field("type_name", &self.object.type_name())
            .finish()
    }
}

/// A [`Handle`] whose static type is `T`.
pub struct TypedHandle<'a, T> {
    handle: Handle<'a>,
    _marker: PhantomData<fn() -> T>,
}

impl<'a, T: ObjectType> TypedHandle<'a, T> {
    /// Forget the static type.
    pub fn into_handle(self) -> Handle<'a> {
        self.handle
    }

    /// Retype as another compile-time type.
    pub fn upcast<U: ObjectType>(&self) -> ObjectResult<TypedHandle<'a, U>> {
        self.handle.downcast::<U>()
    }
}

impl<T> Clone for TypedHandle<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for TypedHandle<'_, T> {}

impl<'a, T> Deref for TypedHandle<'a, T> {
    type Target = Handle<'a>;

    fn deref(&self) -> &Self::Target {
        &self.handle
    }
}

impl<T> fmt::Debug for TypedHandle<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.handle, f)
    }
}

/// A [`HandleMut`] whose static type is `T`.
pub struct TypedHandleMut<'a, T> {
    handle: HandleMut<'a>,
    _marker: PhantomData<fn() -> T>,
}

impl<'a, T: ObjectType> TypedHandleMut<'a, T> {
    pub fn into_handle(self) -> HandleMut<'a> {
        self.handle
    }
}

impl<'a, T> Deref for TypedHandleMut<'a, T> {
    type Target = HandleMut<'a>;

    fn deref(&self) -> &Self::Target {
        &self.handle
    }
}

impl<T> DerefMut for TypedHandleMut<'_, T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.handle
    }
}

impl<T> fmt::Debug for TypedHandleMut<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.handle, f)
    }
}
