//! Callable values, currying and memoization.
//!
//! A [`Function`] is a reference-counted callable over [`Value`] arguments
//! that knows its own [`Arity`]. Functions are built from Rust closures,
//! wrapped by the combinators of this module, and passed around inside
//! values.
//!
//! # Overview
//!
//! - [`Arity`] and [`arity`]: the declared parameter count of a function
//! - [`Function::native`]: adapts a closure or fn item, reading its arity
//!   from the Rust signature
//! - [`Function::variadic`] and [`Function::with_arity`]: functions over the
//!   raw argument slice with an explicitly declared arity
//! - [`curry`] and [`curry_with_arity`]: incremental application
//! - [`memoize`]: per-argument-tuple result caching
//!
//! # Examples
//!
//! ```rust
//! use lambars_dispatch::function::{Function, curry};
//! use lambars_dispatch::value::Value;
//!
//! let volume = Function::native(|width: Value, height: Value, depth: Value| {
//!     Value::from(width.as_int().unwrap_or(0) * height.as_int().unwrap_or(0) * depth.as_int().unwrap_or(0))
//! });
//!
//! let curried = curry(volume);
//! let with_width = curried.call(&[Value::from(2)]).unwrap();
//! let with_height = with_width.call(&[Value::from(3)]).unwrap();
//! assert_eq!(with_height.call(&[Value::from(4)]), Ok(Value::from(24)));
//! assert_eq!(curried.call(&[Value::from(2), Value::from(3), Value::from(4)]), Ok(Value::from(24)));
//! ```
//!
//! # Laws
//!
//! For a function `f` of arity `k` and any split `k = a + b`:
//!
//! ```text
//! curry(f)(x1..xa)(xa+1..xk) == f(x1..xk)
//! curry(f)(x1..xk)           == f(x1..xk)
//! ```

mod arity;
mod curry;
mod memoize;
mod native;

pub use arity::{Arity, arity};
pub use curry::{CurriedFunction, curry, curry_with_arity};
pub use memoize::{Memoized, memoize};
pub use native::{IntoOutcome, NativeFunction};

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use native::{Native, Raw};

use crate::error::{Error, Result};
use crate::value::Value;

/// The body of a [`Function`].
///
/// Implement this trait to expose a custom callable, then wrap it with
/// [`Function::from_callable`].
pub trait Callable: Send + Sync {
    /// The declared arity.
    fn arity(&self) -> Arity;

    /// Invokes the body.
    ///
    /// # Errors
    ///
    /// Returns whatever error the body produces.
    fn call(&self, arguments: &[Value]) -> Result<Value>;

    /// Returns `true` if calls with fewer than [`Arity::minimum`] arguments
    /// are meaningful, as for partial applications.
    fn accepts_partial(&self) -> bool {
        false
    }
}

/// A reference-counted callable value.
///
/// Cloning a function is cheap and yields the *same* function:
/// [`ptr_eq`](Function::ptr_eq), [`PartialEq`] and [`Hash`] all compare
/// identity, never behavior.
#[derive(Clone)]
pub struct Function {
    name: Option<Arc<str>>,
    body: Arc<dyn Callable>,
}

impl Function {
    /// Creates a function from a closure or fn item taking up to six
    /// [`Value`] parameters.
    ///
    /// The arity is the number of parameters in the Rust signature.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lambars_dispatch::function::{Arity, Function};
    /// use lambars_dispatch::value::Value;
    ///
    /// let negate = Function::native(|number: Value| Value::from(-number.as_int().unwrap_or(0)));
    /// assert_eq!(negate.arity(), Arity::fixed(1));
    /// assert_eq!(negate.call(&[Value::from(4)]), Ok(Value::from(-4)));
    /// ```
    pub fn native<F, M>(function: F) -> Self
    where
        F: NativeFunction<M>,
        M: 'static,
    {
        Self::from_callable(Native::new(function))
    }

    /// Creates a function whose last of `count` parameters is a rest
    /// parameter.
    ///
    /// The closure receives the whole argument slice.
    pub fn variadic<F, R>(count: usize, function: F) -> Self
    where
        F: Fn(&[Value]) -> R + Send + Sync + 'static,
        R: IntoOutcome + 'static,
    {
        Self::with_arity(Arity::variadic(count), function)
    }

    /// Creates a function over the raw argument slice with a declared arity.
    pub fn with_arity<F, R>(arity: Arity, function: F) -> Self
    where
        F: Fn(&[Value]) -> R + Send + Sync + 'static,
        R: IntoOutcome + 'static,
    {
        Self::from_callable(Raw::new(arity, function))
    }

    /// Wraps a custom [`Callable`].
    pub fn from_callable<C: Callable + 'static>(callable: C) -> Self {
        Self {
            name: None,
            body: Arc::new(callable),
        }
    }

    /// Attaches a diagnostic name.
    ///
    /// The renamed function shares its body, and therefore its identity,
    /// with `self`.
    #[must_use]
    pub fn named(mut self, name: impl Into<Arc<str>>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// The diagnostic name, if any.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// The declared arity.
    pub fn arity(&self) -> Arity {
        self.body.arity()
    }

    /// Calls the function.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ArgumentCount`] when fewer arguments than
    /// [`Arity::minimum`] are supplied to a function that does not accept
    /// partial application, and otherwise the error of the body.
    pub fn call(&self, arguments: &[Value]) -> Result<Value> {
        let arity = self.body.arity();
        if !self.body.accepts_partial() && arguments.len() < arity.minimum() {
            return Err(Error::ArgumentCount {
                function: self.name().unwrap_or("<anonymous>").to_string(),
                expected: arity.minimum(),
                given: arguments.len(),
            });
        }
        self.body.call(arguments)
    }

    /// Returns `true` if both handles refer to the same function.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        std::ptr::addr_eq(Arc::as_ptr(&self.body), Arc::as_ptr(&other.body))
    }
}

impl PartialEq for Function {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl Eq for Function {}

impl Hash for Function {
    fn hash<H: Hasher>(&self, state: &mut H) {
        Arc::as_ptr(&self.body).cast::<()>().hash(state);
    }
}

impl fmt::Debug for Function {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Function")
            .field("name", &self.name)
            .field("arity", &self.arity())
            .finish_non_exhaustive()
    }
}

impl fmt::Display for Function {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => write!(formatter, "<function {name}/{}>", self.arity()),
            None => write!(formatter, "<function/{}>", self.arity()),
        }
    }
}
