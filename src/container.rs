//! # Typed dependency container.
//!
//! [`Container`] is a registry of singletons keyed by their Rust type. The
//! application fills it in the configure callback (before any task starts);
//! the entry point resolves what it needs.
//!
//! The application task registers its own [`Context`] right before the entry
//! point runs, so [`Container::context`] (and anything built from it inside
//! the entry point) observes the task's cancellation scope.
//!
//! ## Example
//! ```rust
//! use runvisor::Container;
//!
//! struct Settings { port: u16 }
//!
//! let c = Container::new();
//! c.singleton(Settings { port: 8080 });
//!
//! assert_eq!(c.require::<Settings>().unwrap().port, 8080);
//! assert!(c.resolve::<String>().is_none());
//! ```

use std::any::{type_name, Any, TypeId};
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use crate::context::Context;
use crate::error::TaskError;

type Entry = Arc<dyn Any + Send + Sync>;

/// Singleton registry keyed by type.
#[derive(Default)]
pub struct Container {
    entries: RwLock<HashMap<TypeId, Entry>>,
}

impl Container {
    /// Empty container.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `value` as the singleton of type `T`, replacing any previous one.
    pub fn singleton<T: Send + Sync + 'static>(&self, value: T) {
        self.singleton_arc(Arc::new(value));
    }

    /// Registers an already shared singleton of type `T`.
    pub fn singleton_arc<T: Send + Sync + 'static>(&self, value: Arc<T>) {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(TypeId::of::<T>(), value);
    }

    /// Returns the singleton of type `T`, if registered.
    pub fn resolve<T: Send + Sync + 'static>(&self) -> Option<Arc<T>> {
        let entry = self
            .entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&TypeId::of::<T>())
            .cloned()?;
        entry.downcast::<T>().ok()
    }

    /// Like [`Container::resolve`], but a missing entry is a [`TaskError::MissingDependency`].
    pub fn require<T: Send + Sync + 'static>(&self) -> Result<Arc<T>, TaskError> {
        self.resolve::<T>().ok_or(TaskError::MissingDependency {
            type_name: type_name::<T>(),
        })
    }

    /// Whether a singleton of type `T` is registered.
    pub fn contains<T: Send + Sync + 'static>(&self) -> bool {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(&TypeId::of::<T>())
    }

    /// The currently registered execution context.
    pub fn context(&self) -> Option<Context> {
        self.resolve::<Context>().map(|ctx| Context::clone(&ctx))
    }

    /// Number of registered singletons.
    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Whether nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl std::fmt::Debug for Container {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Container")
            .field("entries", &self.len())
            .finish()
    }
}
