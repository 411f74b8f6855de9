//! Result caching keyed by argument tuples.
//!
//! # Concurrency
//!
//! Each argument tuple owns a slot guarded by its own mutex. The table of
//! slots is locked only long enough to find or insert a slot, so calls with
//! different arguments proceed in parallel, while concurrent first calls with
//! equal arguments are serialized on the slot: the target runs at most once
//! per key.
//!
//! Failed calls are not cached; a later call with the same arguments runs
//! the target again. The slot of a failed call is removed from the table, so
//! arguments that keep failing leave no entries behind.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use parking_lot::Mutex;
use rustc_hash::FxHashMap;

use super::{Arity, Callable, Function};
use crate::error::Result;
use crate::value::{MemoKey, Value};

type Slot = Arc<Mutex<Option<Value>>>;

#[derive(Default)]
struct MemoCache {
    slots: Mutex<FxHashMap<MemoKey, Slot>>,
    filled: AtomicUsize,
}

impl MemoCache {
    fn slot(&self, key: &MemoKey) -> Slot {
        let mut slots = self.slots.lock();
        if let Some(slot) = slots.get(key) {
            return Arc::clone(slot);
        }
        Arc::clone(slots.entry(key.clone()).or_default())
    }

    /// Returns `true` while `slot` is the table's slot for `key`.
    fn holds(&self, key: &MemoKey, slot: &Slot) -> bool {
        self.slots
            .lock()
            .get(key)
            .is_some_and(|current| Arc::ptr_eq(current, slot))
    }

    fn discard(&self, key: &MemoKey, slot: &Slot) {
        let mut slots = self.slots.lock();
        if slots.get(key).is_some_and(|current| Arc::ptr_eq(current, slot)) {
            slots.remove(key);
        }
    }
}

/// A function whose results are cached per argument tuple.
///
/// Clones share the cache.
///
/// # Examples
///
/// ```rust
/// use lambars_dispatch::function::{Function, memoize};
/// use lambars_dispatch::value::Value;
/// use std::sync::Arc;
/// use std::sync::atomic::{AtomicUsize, Ordering};
///
/// let calls = Arc::new(AtomicUsize::new(0));
/// let counter = Arc::clone(&calls);
/// let square = memoize(Function::native(move |number: Value| {
///     counter.fetch_add(1, Ordering::SeqCst);
///     Value::from(number.as_int().unwrap_or(0).pow(2))
/// }));
///
/// assert_eq!(square.call(&[Value::from(12)]), Ok(Value::from(144)));
/// assert_eq!(square.call(&[Value::from(12)]), Ok(Value::from(144)));
/// assert_eq!(calls.load(Ordering::SeqCst), 1);
/// ```
#[derive(Clone)]
pub struct Memoized {
    target: Function,
    cache: Arc<MemoCache>,
}

impl Memoized {
    /// The wrapped function.
    pub const fn target(&self) -> &Function {
        &self.target
    }

    /// The number of cached results.
    pub fn cache_len(&self) -> usize {
        self.cache.filled.load(Ordering::Acquire)
    }

    /// Returns the cached result for `arguments`, computing it first if
    /// needed.
    ///
    /// # Errors
    ///
    /// Returns the error produced by the target. Errors are not cached.
    pub fn call(&self, arguments: &[Value]) -> Result<Value> {
        let key = MemoKey::arguments(arguments);
        loop {
            let slot = self.cache.slot(&key);
            let mut cached = slot.lock();
            if let Some(value) = cached.as_ref() {
                tracing::trace!(function = ?self.target.name(), "memo hit");
                return Ok(value.clone());
            }
            // A failed call discarded this slot while we waited on it.
            if !self.cache.holds(&key, &slot) {
                continue;
            }

            return match self.target.call(arguments) {
                Ok(value) => {
                    *cached = Some(value.clone());
                    let size = self.cache.filled.fetch_add(1, Ordering::AcqRel) + 1;
                    tracing::trace!(function = ?self.target.name(), size, "memo miss");
                    Ok(value)
                }
                Err(error) => {
                    self.cache.discard(&key, &slot);
                    tracing::trace!(function = ?self.target.name(), "memo slot discarded after failure");
                    Err(error)
                }
            };
        }
    }
}

impl Callable for Memoized {
    fn arity(&self) -> Arity {
        self.target.arity()
    }

    fn call(&self, arguments: &[Value]) -> Result<Value> {
        Self::call(self, arguments)
    }
}

impl From<Memoized> for Function {
    fn from(memoized: Memoized) -> Self {
        let name = memoized.target.name.clone();
        let function = Self::from_callable(memoized);
        match name {
            Some(name) => function.named(name),
            None => function,
        }
    }
}

/// Wraps a function in a fresh result cache.
pub fn memoize(function: Function) -> Memoized {
    Memoized {
        target: function,
        cache: Arc::default(),
    }
}
