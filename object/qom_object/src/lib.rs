//! Objects for QOM: instantiation, lifecycle, and checked casts.
//!
//! Built on the registry and class model in [`qom_types`]:
//!
//! ```text
//! TypeRegistry --resolve--> Arc<Class> --Factory--> Object --handle--> Handle / HandleMut
//! ```
//!
//! An [`Object`] owns its instance block and shares its class. Objects are
//! created by a [`Factory`], used through handles that carry a static type,
//! and torn down with [`Object::finalize`].

mod cast;
mod factory;
mod macros;
mod object;

use std::sync::Once;

pub use cast::{cast, is_a, ClassType, Handle, HandleMut, ObjectType, TypedHandle, TypedHandleMut};
pub use factory::Factory;
pub use object::{Object, ObjectState};

pub use qom_types;
pub use qom_types::{
    Class, ClassView, DataBlock, InstanceView, ObjectError, ObjectResult, TypeInfo, TypeRegistry,
};

static TRACING_INIT: Once = Once::new();

/// Install a `tracing` subscriber driven by `RUST_LOG`.
///
/// Does nothing unless `RUST_LOG` is set, and nothing after the first call.
/// Embedders with their own subscriber should not call this.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            // A subscriber installed elsewhere wins.
            let _ = tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .try_init();
        }
    });
}
