//! Incremental application of functions.
//!
//! A [`CurriedFunction`] accumulates arguments until the target's arity is
//! reached, then invokes the target once with every accumulated argument.
//! Each partial application produces a new value; the original is never
//! modified, so partial applications can be shared and reused freely.

use std::sync::Arc;

use smallvec::SmallVec;

use super::{Arity, Callable, Function};
use crate::error::Result;
use crate::value::Value;

/// Inline capacity for merged argument lists.
const INLINE_ARGUMENTS: usize = 6;

/// A function together with the arguments applied to it so far.
///
/// Invariant: for a curried function obtained from a partial application,
/// `applied().len() < arity()`.
///
/// # Examples
///
/// ```rust
/// use lambars_dispatch::function::{Function, curry};
/// use lambars_dispatch::value::Value;
///
/// let concat = Function::native(|first: Value, second: Value| {
///     Value::from(format!("{first}{second}"))
/// });
///
/// let curried = curry(concat);
/// let hello = curried.call(&[Value::from("Hello, ")]).unwrap();
///
/// assert_eq!(hello.call(&[Value::from("World")]), Ok(Value::from("Hello, World")));
/// assert_eq!(hello.call(&[Value::from("Rust")]), Ok(Value::from("Hello, Rust")));
/// ```
#[derive(Clone)]
pub struct CurriedFunction {
    target: Function,
    arity: usize,
    applied: Arc<[Value]>,
}

impl CurriedFunction {
    /// The wrapped function.
    pub const fn target(&self) -> &Function {
        &self.target
    }

    /// The number of arguments required before the target is invoked.
    pub const fn arity(&self) -> usize {
        self.arity
    }

    /// The arguments applied so far, in order.
    pub fn applied(&self) -> &[Value] {
        &self.applied
    }

    /// The number of arguments still missing.
    pub fn remaining(&self) -> usize {
        self.arity.saturating_sub(self.applied.len())
    }

    /// Applies more arguments.
    ///
    /// When the applied and new arguments together reach the arity, the
    /// target is invoked with all of them and its result is returned.
    /// Otherwise a [`Value::Function`] holding a new partial application is
    /// returned and the target is not invoked.
    ///
    /// # Errors
    ///
    /// Returns the error produced by the target.
    pub fn call(&self, arguments: &[Value]) -> Result<Value> {
        let mut merged: SmallVec<[Value; INLINE_ARGUMENTS]> =
            SmallVec::with_capacity(self.applied.len() + arguments.len());
        merged.extend(self.applied.iter().cloned());
        merged.extend(arguments.iter().cloned());

        if merged.len() >= self.arity {
            return self.target.call(&merged);
        }

        tracing::trace!(
            applied = merged.len(),
            arity = self.arity,
            "partial application"
        );
        let partial = Self {
            target: self.target.clone(),
            arity: self.arity,
            applied: merged.into_iter().collect(),
        };
        Ok(Value::Function(partial.into()))
    }
}

impl Callable for CurriedFunction {
    fn arity(&self) -> Arity {
        Arity::fixed(self.remaining())
    }

    fn call(&self, arguments: &[Value]) -> Result<Value> {
        Self::call(self, arguments)
    }

    fn accepts_partial(&self) -> bool {
        true
    }
}

impl From<CurriedFunction> for Function {
    fn from(curried: CurriedFunction) -> Self {
        let name = curried.target.name.clone();
        let function = Self::from_callable(curried);
        match name {
            Some(name) => function.named(name),
            None => function,
        }
    }
}

/// Curries a function, using its declared arity.
pub fn curry(function: Function) -> CurriedFunction {
    let arity = function.arity().count();
    curry_with_arity(function, arity, Vec::new())
}

/// Curries a function with an explicit arity and initial arguments.
///
/// Used when the natural arity of `function` is not the number of arguments
/// that should be collected, for example for memoized variadic functions.
///
/// When `applied` already holds `arity` or more arguments the result is
/// saturated: [`remaining`](CurriedFunction::remaining) is zero and the next
/// call, even with no arguments, invokes the target with every applied
/// argument. Such a value is never produced by a partial application.
pub fn curry_with_arity(function: Function, arity: usize, applied: Vec<Value>) -> CurriedFunction {
    CurriedFunction {
        target: function,
        arity,
        applied: applied.into(),
    }
}
