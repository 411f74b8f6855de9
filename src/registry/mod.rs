//! Named function registries.
//!
//! A [`Registry`] is a table of [`FunctionEntry`] values built once and read
//! only afterwards. Callers [`resolve`](Registry::resolve) names into
//! callables:
//!
//! - by default, a curried function collecting the implementation's arity;
//! - for [`memoize`](EntryOptions::memoize) entries, the implementation is
//!   wrapped in a result cache before it is curried;
//! - for [`curry_exempt`](EntryOptions::curry_exempt) entries, the
//!   implementation itself, which takes all of its arguments at once.
//!
//! # Resolution identity
//!
//! Resolving the same name twice on the same registry returns the same
//! function, not an equivalent one. Memoized entries therefore share one
//! cache across every call site. Clones of a registry share its tables.
//!
//! # Examples
//!
//! ```rust
//! use lambars_dispatch::function::Function;
//! use lambars_dispatch::registry::{EntryOptions, Registry};
//! use lambars_dispatch::value::Value;
//!
//! fn add(first: Value, second: Value) -> Value {
//!     Value::from(first.as_int().unwrap_or(0) + second.as_int().unwrap_or(0))
//! }
//!
//! let registry = Registry::builder("math").register("add", Function::native(add)).build();
//!
//! let add = registry.resolve("add").unwrap();
//! let increment = add.call(&[Value::from(1)]).unwrap();
//! assert_eq!(increment.call(&[Value::from(41)]), Ok(Value::from(42)));
//! assert!(add.ptr_eq(&registry.resolve("add").unwrap()));
//! ```

mod builder;
mod entry;

pub use builder::RegistryBuilder;
pub use entry::{EntryOptions, FunctionEntry};

use std::sync::Arc;

use parking_lot::RwLock;
use rustc_hash::FxHashMap;

use crate::error::{Error, Result};
use crate::function::Function;

/// A named table of functions with a resolution cache.
#[derive(Clone)]
pub struct Registry {
    inner: Arc<RegistryInner>,
}

struct RegistryInner {
    name: Arc<str>,
    entries: FxHashMap<Arc<str>, FunctionEntry>,
    resolved: RwLock<FxHashMap<Arc<str>, Function>>,
}

static_assertions::assert_impl_all!(Registry: Send, Sync);

/// The result of resolving several names at once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolved {
    /// Exactly one name was requested.
    One(Function),
    /// Zero or several names were requested, in request order.
    Many(Vec<Function>),
}

impl Resolved {
    /// Returns the functions as a vector, in request order.
    pub fn into_vec(self) -> Vec<Function> {
        match self {
            Self::One(function) => vec![function],
            Self::Many(functions) => functions,
        }
    }

    /// Returns the single function, if exactly one name was requested.
    pub fn into_one(self) -> Option<Function> {
        match self {
            Self::One(function) => Some(function),
            Self::Many(_) => None,
        }
    }
}

impl Registry {
    /// Starts building a registry with the given name.
    pub fn builder(name: impl Into<Arc<str>>) -> RegistryBuilder {
        RegistryBuilder::new(name)
    }

    /// The registry name.
    pub fn name(&self) -> &str {
        &self.inner.name
    }

    /// Returns `true` if `name` is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.inner.entries.contains_key(name)
    }

    /// The registered entry for `name`.
    pub fn entry(&self, name: &str) -> Option<&FunctionEntry> {
        self.inner.entries.get(name)
    }

    /// The registered names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.inner.entries.keys().map(|name| &**name).collect();
        names.sort_unstable();
        names
    }

    /// The number of registered functions.
    pub fn len(&self) -> usize {
        self.inner.entries.len()
    }

    /// Returns `true` if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.inner.entries.is_empty()
    }

    /// Resolves a name into a callable.
    ///
    /// # Errors
    ///
    /// Returns [`Error::FunctionNotFound`] when `name` is not registered.
    pub fn resolve(&self, name: &str) -> Result<Function> {
        if let Some(function) = self.inner.resolved.read().get(name) {
            tracing::trace!(registry = %self.inner.name, function = name, "resolved from cache");
            return Ok(function.clone());
        }

        let entry = self
            .inner
            .entries
            .get(name)
            .ok_or_else(|| Error::FunctionNotFound {
                name: name.to_string(),
                registry: self.inner.name.to_string(),
            })?;

        let mut resolved = self.inner.resolved.write();
        let function = resolved
            .entry(Arc::clone(entry.shared_name()))
            .or_insert_with(|| {
                let options = entry.options();
                tracing::debug!(
                    registry = %self.inner.name,
                    function = name,
                    memoize = options.memoize,
                    curry_exempt = options.curry_exempt,
                    "function resolved"
                );
                entry.resolve()
            })
            .clone();
        Ok(function)
    }

    /// Resolves several names, in request order.
    ///
    /// A single name yields [`Resolved::One`], anything else
    /// [`Resolved::Many`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::FunctionNotFound`] for the first name that is not
    /// registered; nothing is returned for the other names.
    pub fn resolve_many(&self, names: &[&str]) -> Result<Resolved> {
        let functions = names
            .iter()
            .map(|name| self.resolve(name))
            .collect::<Result<Vec<_>>>()?;

        if let [function] = functions.as_slice() {
            return Ok(Resolved::One(function.clone()));
        }
        Ok(Resolved::Many(functions))
    }
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("Registry")
            .field("name", &self.inner.name)
            .field("entries", &self.names())
            .field("resolved", &self.inner.resolved.read().len())
            .finish()
    }
}
