//! Registered function entries.

use std::sync::Arc;

use crate::function::{Arity, Function, curry_with_arity, memoize};

/// Resolution options of a registered function.
///
/// # Examples
///
/// ```rust
/// use lambars_dispatch::registry::EntryOptions;
///
/// let options = EntryOptions::memoized().with_curry_exempt(true);
/// assert!(options.memoize);
/// assert!(options.curry_exempt);
/// assert_eq!(EntryOptions::default(), EntryOptions { memoize: false, curry_exempt: false });
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct EntryOptions {
    /// Cache results per argument tuple.
    pub memoize: bool,
    /// Resolve to a plain function that takes all of its arguments at once.
    pub curry_exempt: bool,
}

impl EntryOptions {
    /// Options with memoization enabled.
    pub const fn memoized() -> Self {
        Self {
            memoize: true,
            curry_exempt: false,
        }
    }

    /// Options with currying disabled.
    pub const fn curry_exempt() -> Self {
        Self {
            memoize: false,
            curry_exempt: true,
        }
    }

    /// Sets the memoization flag.
    #[must_use]
    pub const fn with_memoize(mut self, memoize: bool) -> Self {
        self.memoize = memoize;
        self
    }

    /// Sets the curry exemption flag.
    #[must_use]
    pub const fn with_curry_exempt(mut self, curry_exempt: bool) -> Self {
        self.curry_exempt = curry_exempt;
        self
    }
}

/// A named function implementation with its resolution options.
///
/// Entries are immutable once created.
#[derive(Debug, Clone)]
pub struct FunctionEntry {
    name: Arc<str>,
    function: Function,
    options: EntryOptions,
}

impl FunctionEntry {
    /// Creates an entry.
    pub fn new(name: impl Into<Arc<str>>, function: Function, options: EntryOptions) -> Self {
        Self {
            name: name.into(),
            function,
            options,
        }
    }

    /// The registered name.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub(super) const fn shared_name(&self) -> &Arc<str> {
        &self.name
    }

    /// The implementation.
    pub const fn function(&self) -> &Function {
        &self.function
    }

    /// The declared arity of the implementation.
    pub fn arity(&self) -> Arity {
        self.function.arity()
    }

    /// The resolution options.
    pub const fn options(&self) -> EntryOptions {
        self.options
    }

    /// Builds the callable handed out by a registry.
    ///
    /// Memoization wraps the implementation first; the memoized wrapper is
    /// what gets curried. Curry-exempt entries resolve to the (possibly
    /// memoized) implementation itself, which rejects calls with missing
    /// arguments.
    pub(super) fn resolve(&self) -> Function {
        let target = if self.options.memoize {
            Function::from(memoize(self.function.clone()))
        } else {
            self.function.clone()
        };
        let target = target.named(Arc::clone(&self.name));

        if self.options.curry_exempt {
            target
        } else {
            Function::from(curry_with_arity(target, self.arity().count(), Vec::new()))
        }
    }
}
