//! Errors raised by registration, resolution, instantiation, and casting.

use qom_ir::InternError;
use thiserror::Error;

/// Result alias used throughout the object model.
pub type ObjectResult<T> = Result<T, ObjectError>;

/// Result returned by class and instance hooks.
pub type HookResult = ObjectResult<()>;

/// Every failure the object model reports.
///
/// Registration and resolution errors (see [`ObjectError::is_fatal`]) mean
/// the type graph is broken and the embedding framework should stop.
/// Cast errors are recoverable and meant to be branched on.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ObjectError {
    /// A type with this name is already registered.
    #[error("type `{name}` is already registered")]
    DuplicateType { name: String },

    /// No type with this name is registered.
    #[error("unknown type `{name}`")]
    UnknownType { name: String },

    /// A type names a parent that was never registered.
    #[error("type `{name}` has unregistered parent `{parent}`")]
    InvalidAncestor { name: String, parent: String },

    /// Walking the parent chain revisited a type.
    #[error("cyclic type hierarchy: {}", path.join(" -> "))]
    CyclicHierarchy { name: String, path: Vec<String> },

    /// A declared class size is smaller than the parent's.
    #[error(
        "class size of `{name}` ({size} bytes) is smaller than parent `{parent}` ({parent_size} bytes)"
    )]
    InvalidClassSize {
        name: String,
        size: usize,
        parent: String,
        parent_size: usize,
    },

    /// A declared instance size is smaller than the parent's.
    #[error(
        "instance size of `{name}` ({size} bytes) is smaller than parent `{parent}` ({parent_size} bytes)"
    )]
    InvalidInstanceSize {
        name: String,
        size: usize,
        parent: String,
        parent_size: usize,
    },

    /// A type provides an interface that an ancestor (or itself) already provides.
    #[error("type `{name}` redefines interface `{interface}` already provided by `{provider}`")]
    InterfaceConflict {
        name: String,
        interface: String,
        provider: String,
    },

    /// An interface entry is not usable as an interface.
    #[error("type `{name}` has invalid interface `{interface}`: {reason}")]
    InvalidInterface {
        name: String,
        interface: String,
        reason: &'static str,
    },

    /// The object is neither the target type, a descendant, nor an implementor.
    #[error("cannot cast object of type `{actual}` to `{target}`")]
    TypeMismatch { actual: String, target: String },

    /// An object was used after its finalize chain ran.
    #[error("object of type `{name}` used after finalize")]
    UseAfterFinalize { name: String },

    /// Abstract and interface types cannot be instantiated.
    #[error("cannot instantiate abstract type `{name}`")]
    AbstractType { name: String },

    /// The registry was sealed and no longer accepts types.
    #[error("cannot register `{name}`: registry is sealed")]
    RegistrySealed { name: String },

    /// A data access fell outside the range the caller may touch.
    #[error("access of {len} bytes at offset {offset} is outside {start}..{end}")]
    FieldOutOfBounds {
        offset: usize,
        len: usize,
        start: usize,
        end: usize,
    },

    /// The name table could not hold another type name.
    #[error("cannot register `{name}`: {source}")]
    NameTableFull {
        name: String,
        #[source]
        source: InternError,
    },

    /// A user hook reported a failure.
    #[error("hook of `{name}` failed: {message}")]
    Hook { name: String, message: String },
}

impl ObjectError {
    /// Build a hook failure for the type `name`.
    pub fn hook(name: impl Into<String>, message: impl Into<String>) -> Self {
        ObjectError::Hook {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Whether this error means the type graph itself is broken.
    ///
    /// These come from registration and resolution; the process should not
    /// continue with them.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            ObjectError::DuplicateType { .. }
                | ObjectError::UnknownType { .. }
                | ObjectError::InvalidAncestor { .. }
                | ObjectError::CyclicHierarchy { .. }
                | ObjectError::InvalidClassSize { .. }
                | ObjectError::InvalidInstanceSize { .. }
                | ObjectError::InterfaceConflict { .. }
                | ObjectError::InvalidInterface { .. }
                | ObjectError::RegistrySealed { .. }
                | ObjectError::NameTableFull { .. }
        )
    }
}
