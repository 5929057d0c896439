//! Object construction on top of a [`TypeRegistry`].

use std::sync::Arc;

use qom_types::{Class, ObjectResult, TypeRegistry};

use crate::Object;

/// Creates and destroys objects of registered types.
///
/// Cheap to construct; it only borrows the registry. Classes are resolved
/// on first use and shared by every object of the same type.
#[derive(Clone, Copy, Debug)]
pub struct Factory<'r> {
    registry: &'r TypeRegistry,
}

impl<'r> Factory<'r> {
    pub fn new(registry: &'r TypeRegistry) -> Self {
        Factory { registry }
    }

    pub fn registry(&self) -> &'r TypeRegistry {
        self.registry
    }

    /// Create a fully initialized instance of `name`.
    ///
    /// Resolves the class if needed, zero-fills an instance block of the
    /// class's instance size, and runs the init chain root-to-leaf. Fails
    /// with `AbstractType` for abstract and interface types, or with the
    /// first resolution or hook error.
    #[tracing::instrument(level = "debug", skip(self))]
    pub fn instantiate(&self, name: &str) -> ObjectResult<Object> {
        let class = self.registry.resolve(name)?;
        Object::construct(class)
    }

    /// Create an instance of an already resolved class.
    pub fn instantiate_class(&self, class: Arc<Class>) -> ObjectResult<Object> {
        Object::construct(class)
    }

    /// Run the finalize chain of `object`. Fails with `UseAfterFinalize`
    /// when called twice.
    pub fn finalize(&self, object: &mut Object) -> ObjectResult<()> {
        object.finalize()
    }
}

#[cfg(test)]
#[expect(clippy::expect_used, reason = "Test code uses expect for clarity")]
mod tests;
