//! # lambars-dispatch
//!
//! Curried function registries and structural pattern dispatch over dynamic
//! values.
//!
//! ## Overview
//!
//! This crate is the dispatch core of a functional utility library. Helper
//! functions are registered by name, resolved into curried (and optionally
//! memoized) callables, and combined with pattern dispatchers that select a
//! handler by the runtime shape of their arguments.
//!
//! - **Values**: [`Value`](value::Value), a cheaply clonable dynamic value,
//!   and the [`Object`](value::Object) / [`Extractable`](value::Extractable)
//!   capabilities of collaborator types
//! - **Functions**: arity-aware callables, [`curry`](function::curry) and
//!   [`memoize`](function::memoize)
//! - **Registries**: named tables resolving to stable, cached callables
//! - **Patterns**: first-match dispatch with container unwrapping
//!
//! ## Feature Flags
//!
//! - `registry`: Function registries
//! - `pattern`: Pattern dispatchers
//! - `serde`: `Serialize`/`Deserialize` for values
//! - `full`: Enable all features
//!
//! ## Example
//!
//! ```rust
//! use lambars_dispatch::prelude::*;
//!
//! fn add(first: Value, second: Value) -> Value {
//!     Value::from(first.as_int().unwrap_or(0) + second.as_int().unwrap_or(0))
//! }
//!
//! let registry = Registry::builder("math")
//!     .register("add", Function::native(add))
//!     .build();
//!
//! let increment = registry.resolve("add")?.call(&[Value::from(1)])?;
//!
//! let describe = Dispatcher::builder()
//!     .literal([0], Function::native(|_: Value| "zero"))
//!     .signature([TypeTag::Int], Function::native(|_: Value| "number"))
//!     .build();
//!
//! let next = increment.call(&[Value::from(-1)])?;
//! assert_eq!(describe.call(&[next])?, Value::from("zero"));
//! # Ok::<(), lambars_dispatch::Error>(())
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::redundant_closure_for_method_calls)]

/// Prelude module for convenient imports.
///
/// Re-exports commonly used types and traits.
///
/// # Usage
///
/// ```rust
/// use lambars_dispatch::prelude::*;
/// ```
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::function::{Arity, CurriedFunction, Function, curry, curry_with_arity, memoize};
    pub use crate::value::{Extractable, Object, TypeTag, Value};

    #[cfg(feature = "registry")]
    pub use crate::registry::{EntryOptions, Registry, Resolved};

    #[cfg(feature = "pattern")]
    pub use crate::pattern::{Clause, Dispatcher, Signature};
}

pub mod error;
pub mod function;
pub mod value;

#[cfg(feature = "registry")]
pub mod registry;

#[cfg(feature = "pattern")]
pub mod pattern;

pub use error::{Error, Result};

static_assertions::assert_impl_all!(value::Value: Send, Sync, Clone);
static_assertions::assert_impl_all!(function::Function: Send, Sync, Clone);
