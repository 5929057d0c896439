//! Instances and their lifecycle.
//!
//! # State machine
//!
//! ```text
//! Uninitialized --instance_init chain--> Initialized --finalize chain--> Finalized
//! ```
//!
//! `Uninitialized` only exists while the factory runs the init chain.
//! `Finalized` is terminal: the data block is released and every access
//! reports `UseAfterFinalize`. Shared class data is never touched by a
//! finalized object.

use std::sync::Arc;

use qom_types::{Class, DataBlock, InstanceHook, InstanceView, ObjectError, ObjectResult};

use crate::{Handle, HandleMut};

/// Lifecycle state of an [`Object`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ObjectState {
    Uninitialized,
    Initialized,
    Finalized,
}

/// An instance bound to its class.
pub struct Object {
    class: Arc<Class>,
    data: DataBlock,
    state: ObjectState,
}

/// Which hook of a type to run.
#[derive(Copy, Clone)]
enum Phase {
    Init,
    PostInit,
    Finalize,
}

impl Phase {
    fn hook(self, class: &Class) -> Option<&InstanceHook> {
        let info = class.info();
        match self {
            Phase::Init => info.instance_init.as_ref(),
            Phase::PostInit => info.instance_post_init.as_ref(),
            Phase::Finalize => info.instance_finalize.as_ref(),
        }
    }
}

impl Object {
    /// Allocate and initialize an instance of `class`.
    ///
    /// Runs every `instance_init` root-to-leaf, then every
    /// `instance_post_init` root-to-leaf. If a hook fails, the finalizers of
    /// the types whose init already completed run leaf-to-root before the
    /// error is returned.
    pub(crate) fn construct(class: Arc<Class>) -> ObjectResult<Object> {
        if class.is_abstract() || class.is_interface() {
            return Err(ObjectError::AbstractType {
                name: class.type_name().to_owned(),
            });
        }

        let mut object = Object {
            data: DataBlock::zeroed(class.instance_size()),
            class,
            state: ObjectState::Uninitialized,
        };

        let class = Arc::clone(&object.class);
        let lineage = class.lineage();
        for (level, owner) in lineage.iter().enumerate() {
            if let Err(err) = run_hook(Phase::Init, &class, owner, &mut object.data) {
                // The init error is the one reported; unwind failures are logged.
                let _ = unwind(&class, &lineage[..level], &mut object.data);
                return Err(err);
            }
        }
        for owner in &lineage {
            if let Err(err) = run_hook(Phase::PostInit, &class, owner, &mut object.data) {
                let _ = unwind(&class, &lineage, &mut object.data);
                return Err(err);
            }
        }

        object.state = ObjectState::Initialized;
        tracing::debug!(
            type_name = object.type_name(),
            instance_size = object.data.len(),
            "object initialized"
        );
        Ok(object)
    }

    /// Run the finalize chain leaf-to-root and release the data block.
    ///
    /// Every finalizer runs and the object ends up `Finalized` either way.
    /// The first finalizer failure is returned.
    pub fn finalize(&mut self) -> ObjectResult<()> {
        self.ensure_live()?;
        let class = Arc::clone(&self.class);
        let result = unwind(&class, &class.lineage(), &mut self.data);
        self.data = DataBlock::default();
        self.state = ObjectState::Finalized;
        tracing::debug!(
            type_name = self.type_name(),
            ok = result.is_ok(),
            "object finalized"
        );
        result
    }

    pub fn class(&self) -> &Class {
        &self.class
    }

    /// Shared handle to the class.
    pub fn class_arc(&self) -> &Arc<Class> {
        &self.class
    }

    /// Concrete type name.
    pub fn type_name(&self) -> &'static str {
        self.class.type_name()
    }

    pub fn state(&self) -> ObjectState {
        self.state
    }

    pub fn is_live(&self) -> bool {
        self.state == ObjectState::Initialized
    }

    /// Fail with `UseAfterFinalize` unless the object is initialized.
    pub fn ensure_live(&self) -> ObjectResult<()> {
        if self.is_live() {
            Ok(())
        } else {
            Err(ObjectError::UseAfterFinalize {
                name: self.type_name().to_owned(),
            })
        }
    }

    /// Instance block.
    pub fn data(&self) -> ObjectResult<&DataBlock> {
        self.ensure_live()?;
        Ok(&self.data)
    }

    /// Mutable instance block.
    pub fn data_mut(&mut self) -> ObjectResult<&mut DataBlock> {
        self.ensure_live()?;
        Ok(&mut self.data)
    }

    /// Whether this object may be viewed as `target`. Never fails; a
    /// finalized object is-a nothing.
    pub fn is_a(&self, target: &str) -> bool {
        self.is_live() && self.class.is_a(target)
    }

    /// Handle typed as the object's concrete type.
    pub fn handle(&self) -> ObjectResult<Handle<'_>> {
        self.ensure_live()?;
        Ok(Handle::new(self, self.type_name()))
    }

    /// Mutable handle typed as the object's concrete type.
    pub fn handle_mut(&mut self) -> ObjectResult<HandleMut<'_>> {
        self.ensure_live()?;
        let type_name = self.type_name();
        Ok(HandleMut::new(self, type_name))
    }

    /// Instance block without a state check; handles guarantee liveness.
    pub(crate) fn raw_data(&self) -> &DataBlock {
        &self.data
    }

    pub(crate) fn raw_data_mut(&mut self) -> &mut DataBlock {
        &mut self.data
    }
}

/// Run the `phase` hook `owner` declared over an instance of `class`.
fn run_hook(phase: Phase, class: &Class, owner: &Class, data: &mut DataBlock) -> ObjectResult<()> {
    let Some(hook) = phase.hook(owner) else {
        return Ok(());
    };
    let mut view = InstanceView::new(class, owner.type_name(), data, owner.own_instance_range());
    hook(&mut view)
}

/// Run the finalizers of `owners` leaf-to-root.
///
/// A failing finalizer does not stop teardown; the first failure is returned.
fn unwind(class: &Class, owners: &[&Class], data: &mut DataBlock) -> ObjectResult<()> {
    let mut first_err = None;
    for owner in owners.iter().rev() {
        if let Err(err) = run_hook(Phase::Finalize, class, owner, data) {
            tracing::warn!(
                type_name = class.type_name(),
                owner = owner.type_name(),
                %err,
                "instance finalizer failed"
            );
            first_err.get_or_insert(err);
        }
    }
    first_err.map_or(Ok(()), Err)
}

impl Drop for Object {
    fn drop(&mut self) {
        if self.state == ObjectState::Initialized {
            tracing::warn!(
                type_name = self.type_name(),
                "object dropped without finalize"
            );
        }
    }
}

impl std::fmt::Debug for Object {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Object")
            .field("type_name", &self.type_name())
            .field("state", &self.state)
            .field("data", &self.data)
            .finish()
    }
}
