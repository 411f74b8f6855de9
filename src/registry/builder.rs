//! Construction of registries.

use std::sync::Arc;

use parking_lot::RwLock;
use rustc_hash::FxHashMap;

use super::{EntryOptions, FunctionEntry, Registry, RegistryInner};
use crate::function::Function;

/// Collects function entries for a [`Registry`].
///
/// # Examples
///
/// ```rust
/// use lambars_dispatch::function::Function;
/// use lambars_dispatch::registry::{EntryOptions, Registry};
/// use lambars_dispatch::value::Value;
///
/// let registry = Registry::builder("strings")
///     .register("concat", Function::native(|first: Value, second: Value| {
///         Value::from(format!("{first}{second}"))
///     }))
///     .register_with("len", Function::native(|text: Value| {
///         Value::from(text.as_str().map_or(0, |text| text.chars().count() as i64))
///     }), EntryOptions::memoized())
///     .build();
///
/// assert_eq!(registry.names(), vec!["concat", "len"]);
/// ```
#[derive(Debug, Clone)]
pub struct RegistryBuilder {
    name: Arc<str>,
    entries: Vec<FunctionEntry>,
}

impl RegistryBuilder {
    pub(super) fn new(name: impl Into<Arc<str>>) -> Self {
        Self {
            name: name.into(),
            entries: Vec::new(),
        }
    }

    /// Registers a function with default options.
    #[must_use]
    pub fn register(self, name: impl Into<Arc<str>>, function: Function) -> Self {
        self.register_with(name, function, EntryOptions::default())
    }

    /// Registers a function with explicit options.
    #[must_use]
    pub fn register_with(
        self,
        name: impl Into<Arc<str>>,
        function: Function,
        options: EntryOptions,
    ) -> Self {
        self.entry(FunctionEntry::new(name, function, options))
    }

    /// Registers a prepared entry.
    #[must_use]
    pub fn entry(mut self, entry: FunctionEntry) -> Self {
        self.entries.push(entry);
        self
    }

    /// Builds the registry.
    ///
    /// When a name is registered more than once, the last registration wins.
    pub fn build(self) -> Registry {
        let entries: FxHashMap<Arc<str>, FunctionEntry> = self
            .entries
            .into_iter()
            .map(|entry| (Arc::clone(entry.shared_name()), entry))
            .collect();

        tracing::debug!(registry = %self.name, entries = entries.len(), "registry built");

        Registry {
            inner: Arc::new(RegistryInner {
                name: self.name,
                entries,
                resolved: RwLock::default(),
            }),
        }
    }
}
