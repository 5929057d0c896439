//! Hierarchy resolution.
//!
//! Turns a registered type into its [`Class`]:
//!
//! 1. **Walk** parent links to the root, detecting cycles and missing
//!    parents before any hook runs.
//! 2. **Plan** sizes, flags, and interface entries root-to-leaf, rejecting
//!    shrinking blocks and interface conflicts.
//! 3. **Materialize** each class root-to-leaf. A class block starts as a
//!    copy of the parent's block, then every ancestor's `class_base_init`
//!    and the type's own `class_init` run over it. The result is the same as
//!    running every ancestor's `class_init` over one shared buffer, but each
//!    hook runs exactly once per registry.
//!
//! Materialized classes are memoized. First resolution of a type is
//! serialized through a per-type claim token, so concurrent callers
//! converge on one class.

use std::sync::Arc;

use rustc_hash::FxHashSet;

use crate::registry::TypeEntry;
use crate::{
    Class, ClassView, DataBlock, InterfaceEntry, ObjectError, ObjectResult, TypeFlags,
    TypeRegistry,
};

/// Sizes, flags, and new interface entries computed for one chain link.
struct LinkPlan {
    class_size: usize,
    instance_size: usize,
    flags: TypeFlags,
    interfaces: Vec<InterfaceEntry>,
}

impl TypeRegistry {
    /// Resolve `name` to its class, building it on first use.
    #[tracing::instrument(level = "debug", skip(self))]
    pub fn resolve(&self, name: &str) -> ObjectResult<Arc<Class>> {
        if let Some(class) = self.memoized(name) {
            return Ok(class);
        }

        let chain = self.walk(name)?;
        let plan = self.plan(&chain)?;

        let mut resolved: Option<Arc<Class>> = None;
        for (entry, link) in chain.iter().zip(plan) {
            resolved = Some(self.materialize(entry, link, resolved)?);
        }
        resolved.ok_or_else(|| ObjectError::UnknownType {
            name: name.to_owned(),
        })
    }

    /// Resolve `name`, mapping an unknown type to `None`.
    pub fn class_by_name(&self, name: &str) -> ObjectResult<Option<Arc<Class>>> {
        match self.resolve(name) {
            Ok(class) => Ok(Some(class)),
            Err(ObjectError::UnknownType { name: missing }) if missing == name => Ok(None),
            Err(err) => Err(err),
        }
    }

    /// Every registered class that is-a `implements`, sorted by name.
    ///
    /// Resolves each registered type; a broken type graph is reported
    /// rather than skipped. An unknown `implements` yields an empty list.
    pub fn class_list(
        &self,
        implements: &str,
        include_abstract: bool,
    ) -> ObjectResult<Vec<Arc<Class>>> {
        if !self.contains(implements) {
            return Ok(Vec::new());
        }

        let mut classes = Vec::new();
        for type_name in self.type_names() {
            let class = self.resolve(type_name)?;
            if class.is_a(implements) && (include_abstract || !class.is_abstract()) {
                classes.push(class);
            }
        }
        Ok(classes)
    }

    /// Number of classes materialized so far.
    pub fn resolved_count(&self) -> usize {
        self.classes.read().len()
    }

    fn memoized(&self, name: &str) -> Option<Arc<Class>> {
        let name = self.names.get(name)?;
        self.classes.read().get(&name).cloned()
    }

    /// Collect the parent chain of `name`, root first.
    fn walk(&self, name: &str) -> ObjectResult<Vec<Arc<TypeEntry>>> {
        let types = self.types.read();
        let mut current = self
            .names
            .get(name)
            .and_then(|n| types.get(&n))
            .cloned()
            .ok_or_else(|| ObjectError::UnknownType {
                name: name.to_owned(),
            })?;

        let mut chain: Vec<Arc<TypeEntry>> = Vec::new();
        let mut seen = FxHashSet::default();
        loop {
            if !seen.insert(current.name) {
                let start = chain
                    .iter()
                    .position(|e| e.name == current.name)
                    .unwrap_or(0);
                let mut path: Vec<String> =
                    chain[start..].iter().map(|e| e.type_name.to_owned()).collect();
                path.push(current.type_name.to_owned());
                return Err(ObjectError::CyclicHierarchy {
                    name: name.to_owned(),
                    path,
                });
            }

            let parent = current.parent;
            let child = current.type_name;
            chain.push(current);
            let Some(parent) = parent else { break };

            current = types
                .get(&parent)
                .cloned()
                .ok_or_else(|| ObjectError::InvalidAncestor {
                    name: child.to_owned(),
                    parent: self.names.lookup(parent).to_owned(),
                })?;
        }

        chain.reverse();
        Ok(chain)
    }

    /// Compute sizes, flags, and interface entries for every link.
    fn plan(&self, chain: &[Arc<TypeEntry>]) -> ObjectResult<Vec<LinkPlan>> {
        let interface_tree = chain
            .first()
            .is_some_and(|root| root.name == self.interface_root);

        let mut plans: Vec<LinkPlan> = Vec::with_capacity(chain.len());
        // Interfaces provided so far along the chain, with their provider.
        let mut provided: Vec<(Arc<Class>, &'static str)> = Vec::new();
        let mut parent: Option<(&'static str, usize, usize)> = None;

        for entry in chain {
            let info = &entry.info;
            let (parent_name, parent_class, parent_instance) = parent.unwrap_or(("", 0, 0));

            let class_size = info.class_size.unwrap_or(parent_class);
            if class_size < parent_class {
                return Err(ObjectError::InvalidClassSize {
                    name: entry.type_name.to_owned(),
                    size: class_size,
                    parent: parent_name.to_owned(),
                    parent_size: parent_class,
                });
            }

            let instance_size = info.instance_size.unwrap_or(parent_instance);
            if instance_size < parent_instance {
                return Err(ObjectError::InvalidInstanceSize {
                    name: entry.type_name.to_owned(),
                    size: instance_size,
                    parent: parent_name.to_owned(),
                    parent_size: parent_instance,
                });
            }

            let mut flags = info.flags;
            if interface_tree {
                flags |= TypeFlags::INTERFACE;
                if let Some(first) = info.interfaces.first() {
                    return Err(ObjectError::InvalidInterface {
                        name: entry.type_name.to_owned(),
                        interface: first.name.clone(),
                        reason: "interface types cannot implement interfaces",
                    });
                }
                if instance_size > 0 {
                    return Err(ObjectError::InvalidInterface {
                        name: entry.type_name.to_owned(),
                        interface: entry.type_name.to_owned(),
                        reason: "interface types cannot declare instance state",
                    });
                }
            }

            let mut interfaces = Vec::with_capacity(info.interfaces.len());
            for imp in &info.interfaces {
                let interface = self.resolve_interface(entry.type_name, &imp.name)?;
                // A sub-interface satisfies its parents, so overlap in either
                // direction would shadow one of the two vtables.
                let overlap = provided.iter().find(|(existing, _)| {
                    existing.inherits(interface.type_name())
                        || interface.inherits(existing.type_name())
                });
                if let Some((_, provider)) = overlap {
                    return Err(ObjectError::InterfaceConflict {
                        name: entry.type_name.to_owned(),
                        interface: imp.name.clone(),
                        provider: (*provider).to_owned(),
                    });
                }
                provided.push((Arc::clone(&interface), entry.type_name));
                interfaces.push(InterfaceEntry {
                    interface,
                    provider: entry.type_name,
                    vtable: Arc::clone(&imp.vtable),
                });
            }

            plans.push(LinkPlan {
                class_size,
                instance_size,
                flags,
                interfaces,
            });
            parent = Some((entry.type_name, class_size, instance_size));
        }

        Ok(plans)
    }

    /// Resolve an interface named by `implementor`.
    ///
    /// The chain is checked to be interface-rooted before resolving, so a
    /// type naming itself (or any object type) as an interface cannot
    /// recurse.
    fn resolve_interface(&self, implementor: &str, interface: &str) -> ObjectResult<Arc<Class>> {
        let chain = self.walk(interface)?;
        let rooted = chain
            .first()
            .is_some_and(|root| root.name == self.interface_root);
        if !rooted || chain.len() < 2 {
            return Err(ObjectError::InvalidInterface {
                name: implementor.to_owned(),
                interface: interface.to_owned(),
                reason: "not an interface type",
            });
        }
        self.resolve(interface)
    }

    /// Build (or fetch) the class for one chain link.
    fn materialize(
        &self,
        entry: &TypeEntry,
        link: LinkPlan,
        parent: Option<Arc<Class>>,
    ) -> ObjectResult<Arc<Class>> {
        if let Some(class) = self.classes.read().get(&entry.name) {
            return Ok(Arc::clone(class));
        }

        let claim = Arc::clone(self.claims.lock().entry(entry.name).or_default());
        let _claimed = claim.lock();

        // Another caller may have finished while we waited for the claim.
        if let Some(class) = self.classes.read().get(&entry.name) {
            return Ok(Arc::clone(class));
        }

        let mut class_data = match parent.as_deref() {
            Some(parent) => DataBlock::with_prefix(link.class_size, parent.class_data()),
            None => DataBlock::zeroed(link.class_size),
        };

        {
            let mut view = ClassView::new(entry.type_name, &mut class_data, parent.as_deref());
            if let Some(parent) = parent.as_deref() {
                for ancestor in parent.lineage() {
                    if let Some(base_init) = &ancestor.info().class_base_init {
                        base_init(&mut view)?;
                    }
                }
            }
            if let Some(class_init) = &entry.info.class_init {
                class_init(&mut view)?;
            }
        }

        let mut interfaces = parent
            .as_deref()
            .map(|p| p.interfaces().to_vec())
            .unwrap_or_default();
        interfaces.extend(link.interfaces);

        let depth = parent.as_deref().map_or(0, |p| p.depth() + 1);
        let class = Arc::new(Class {
            name: entry.name,
            type_name: entry.type_name,
            parent,
            info: Arc::clone(&entry.info),
            flags: link.flags,
            depth,
            instance_size: link.instance_size,
            class_data,
            interfaces,
        });

        self.classes.write().insert(entry.name, Arc::clone(&class));
        tracing::debug!(
            type_name = entry.type_name,
            class_size = class.class_size(),
            instance_size = class.instance_size(),
            interfaces = class.interfaces().len(),
            "class resolved"
        );
        Ok(class)
    }
}
