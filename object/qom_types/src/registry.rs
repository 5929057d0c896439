//! The type descriptor registry.
//!
//! The `TypeRegistry` maps unique type names to their descriptors and owns
//! the memoized classes built from them. It is an explicit object: the
//! embedding framework creates one at start-up and passes it by reference,
//! and tests build isolated registries.
//!
//! # Design
//!
//! - Names are interned; both tables are keyed by `Name`
//! - `RwLock` on the descriptor table so late plugin registration can race
//!   with lookups
//! - Registration order is insignificant: parents are only looked up when a
//!   class is first resolved (see `resolver`)
//! - Every registry starts with the `object` and `interface` roots

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use parking_lot::{Mutex, RwLock};
use qom_ir::{Name, SharedInterner, TYPE_INTERFACE, TYPE_OBJECT};
use rustc_hash::FxHashMap;

use crate::{Class, ObjectError, ObjectResult, TypeInfo};

/// Registry behavior knobs.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct RegistryConfig {
    /// Accept registrations after [`TypeRegistry::seal`].
    ///
    /// When off, a sealed registry rejects new types with
    /// [`ObjectError::RegistrySealed`].
    pub late_registration: bool,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        RegistryConfig {
            late_registration: true,
        }
    }
}

/// A registered descriptor with its interned names.
#[derive(Debug)]
pub(crate) struct TypeEntry {
    pub(crate) name: Name,
    pub(crate) type_name: &'static str,
    /// `None` only for the two roots.
    pub(crate) parent: Option<Name>,
    pub(crate) info: Arc<TypeInfo>,
}

/// Process-wide table of type descriptors and their resolved classes.
pub struct TypeRegistry {
    pub(crate) names: SharedInterner,
    config: RegistryConfig,
    sealed: AtomicBool,
    pub(crate) types: RwLock<FxHashMap<Name, Arc<TypeEntry>>>,
    /// Memoized classes; read without contention once start-up is over.
    pub(crate) classes: RwLock<FxHashMap<Name, Arc<Class>>>,
    /// Per-type claim tokens serializing first resolution of each type.
    pub(crate) claims: Mutex<FxHashMap<Name, Arc<Mutex<()>>>>,
    pub(crate) object_root: Name,
    pub(crate) interface_root: Name,
}

impl TypeRegistry {
    /// Create a registry holding only the built-in roots.
    pub fn new() -> Self {
        Self::with_config(RegistryConfig::default())
    }

    /// Create a registry with explicit configuration.
    pub fn with_config(config: RegistryConfig) -> Self {
        let names = SharedInterner::new();
        let object_root = names.intern(TYPE_OBJECT);
        let interface_root = names.intern(TYPE_INTERFACE);

        let mut types = FxHashMap::default();
        let object = TypeInfo::new(TYPE_OBJECT).instance_size(0).class_size(0);
        let interface = TypeInfo::new(TYPE_INTERFACE)
            .instance_size(0)
            .class_size(0)
            .abstract_type();
        for (name, info) in [(object_root, object), (interface_root, interface)] {
            types.insert(
                name,
                Arc::new(TypeEntry {
                    name,
                    type_name: names.lookup_static(name),
                    parent: None,
                    info: Arc::new(info),
                }),
            );
        }

        TypeRegistry {
            names,
            config,
            sealed: AtomicBool::new(false),
            types: RwLock::new(types),
            classes: RwLock::new(FxHashMap::default()),
            claims: Mutex::new(FxHashMap::default()),
            object_root,
            interface_root,
        }
    }

    /// The interner names in this registry come from.
    pub fn names(&self) -> &SharedInterner {
        &self.names
    }

    pub fn config(&self) -> RegistryConfig {
        self.config
    }

    /// Register a type descriptor.
    ///
    /// The parent does not have to be registered yet. A duplicate name is
    /// rejected and leaves the original registration untouched.
    pub fn register(&self, info: TypeInfo) -> ObjectResult<Name> {
        let sealed = self.is_sealed();
        if sealed && !self.config.late_registration {
            return Err(ObjectError::RegistrySealed { name: info.name });
        }

        let intern = |s: &str| {
            self.names
                .try_intern(s)
                .map_err(|source| ObjectError::NameTableFull {
                    name: info.name.clone(),
                    source,
                })
        };
        let name = intern(&info.name)?;
        let parent = match info.parent.as_deref() {
            Some(parent) => intern(parent)?,
            None => self.object_root,
        };

        {
            let mut types = self.types.write();
            if types.contains_key(&name) {
                return Err(ObjectError::DuplicateType { name: info.name });
            }
            types.insert(
                name,
                Arc::new(TypeEntry {
                    name,
                    type_name: self.names.lookup_static(name),
                    parent: Some(parent),
                    info: Arc::new(info),
                }),
            );
        }

        let type_name = self.names.lookup_static(name);
        if sealed {
            tracing::warn!(type_name, "type registered after the registry was sealed");
        } else {
            tracing::debug!(type_name, "type registered");
        }
        Ok(name)
    }

    /// Look up a descriptor by name.
    pub fn lookup(&self, name: &str) -> ObjectResult<Arc<TypeInfo>> {
        self.entry(name)
            .map(|entry| Arc::clone(&entry.info))
            .ok_or_else(|| ObjectError::UnknownType {
                name: name.to_owned(),
            })
    }

    /// Whether a type with this name is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.entry(name).is_some()
    }

    /// Number of registered types, roots included.
    pub fn len(&self) -> usize {
        self.types.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All registered type names, sorted.
    pub fn type_names(&self) -> Vec<&'static str> {
        let mut names: Vec<&'static str> =
            self.types.read().values().map(|e| e.type_name).collect();
        names.sort_unstable();
        names
    }

    /// Mark start-up as finished.
    pub fn seal(&self) {
        self.sealed.store(true, Ordering::Release);
        tracing::debug!(types = self.len(), "type registry sealed");
    }

    pub fn is_sealed(&self) -> bool {
        self.sealed.load(Ordering::Acquire)
    }

    pub(crate) fn entry(&self, name: &str) -> Option<Arc<TypeEntry>> {
        let name = self.names.get(name)?;
        self.types.read().get(&name).cloned()
    }
}

impl Default for TypeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for TypeRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TypeRegistry")
            .field("types", &self.len())
            .field("classes", &self.classes.read().len())
            .field("sealed", &self.is_sealed())
            .field("config", &self.config)
            .finish()
    }
}

#[cfg(test)]
#[expect(clippy::expect_used, reason = "Test code uses expect for clarity")]
mod tests;
