//! Adapters from Rust closures to [`Function`](super::Function) bodies.
//!
//! A closure or fn item taking up to six [`Value`] parameters is turned into
//! a function whose arity is read from its Rust signature. The `Marker`
//! parameter of [`NativeFunction`] only disambiguates the implementations
//! for each parameter count; it is always inferred.

use std::marker::PhantomData;

use super::{Arity, Callable};
use crate::error::Result;
use crate::value::Value;

/// Conversion of a native return value into a function outcome.
pub trait IntoOutcome {
    /// Converts `self` into the result of a call.
    ///
    /// # Errors
    ///
    /// Returns the error carried by `self`, if any.
    fn into_outcome(self) -> Result<Value>;
}

impl IntoOutcome for Value {
    #[inline]
    fn into_outcome(self) -> Result<Value> {
        Ok(self)
    }
}

impl<T: Into<Value>> IntoOutcome for Result<T> {
    #[inline]
    fn into_outcome(self) -> Result<Value> {
        self.map(Into::into)
    }
}

macro_rules! impl_into_outcome {
    ($($source:ty),*) => {
        $(
            impl IntoOutcome for $source {
                #[inline]
                fn into_outcome(self) -> Result<Value> {
                    Ok(Value::from(self))
                }
            }
        )*
    };
}

impl_into_outcome!((), bool, i32, i64, f64, String, &'static str, super::Function);

/// A Rust callable with a statically known number of [`Value`] parameters.
///
/// # Examples
///
/// ```rust
/// use lambars_dispatch::function::{Function, NativeFunction};
/// use lambars_dispatch::value::Value;
///
/// fn add(first: Value, second: Value) -> Value {
///     Value::from(first.as_int().unwrap_or(0) + second.as_int().unwrap_or(0))
/// }
///
/// fn arity_of<F: NativeFunction<M>, M>(_: &F) -> usize {
///     F::ARITY
/// }
///
/// assert_eq!(arity_of(&add), 2);
/// assert_eq!(Function::native(add).arity().count(), 2);
/// ```
pub trait NativeFunction<Marker>: Send + Sync + 'static {
    /// The number of parameters.
    const ARITY: usize;

    /// Calls the function with the leading [`ARITY`](Self::ARITY) arguments.
    ///
    /// Missing arguments are passed as `Null`; extra arguments are ignored.
    ///
    /// # Errors
    ///
    /// Returns the error produced by the function.
    fn invoke(&self, arguments: &[Value]) -> Result<Value>;
}

impl<F, R> NativeFunction<fn() -> R> for F
where
    F: Fn() -> R + Send + Sync + 'static,
    R: IntoOutcome,
{
    const ARITY: usize = 0;

    fn invoke(&self, _arguments: &[Value]) -> Result<Value> {
        self().into_outcome()
    }
}

macro_rules! impl_native_function {
    (@value $argument:ident) => {
        Value
    };
    ($count:literal => $($argument:ident),+) => {
        impl<F, R> NativeFunction<fn($(impl_native_function!(@value $argument)),+) -> R> for F
        where
            F: Fn($(impl_native_function!(@value $argument)),+) -> R + Send + Sync + 'static,
            R: IntoOutcome,
        {
            const ARITY: usize = $count;

            fn invoke(&self, arguments: &[Value]) -> Result<Value> {
                let mut arguments = arguments.iter().cloned();
                $(let $argument = arguments.next().unwrap_or_default();)+
                self($($argument),+).into_outcome()
            }
        }
    };
}

impl_native_function!(1 => first);
impl_native_function!(2 => first, second);
impl_native_function!(3 => first, second, third);
impl_native_function!(4 => first, second, third, fourth);
impl_native_function!(5 => first, second, third, fourth, fifth);
impl_native_function!(6 => first, second, third, fourth, fifth, sixth);

/// Body of a function built from a [`NativeFunction`].
pub(super) struct Native<F, M> {
    function: F,
    marker: PhantomData<fn() -> M>,
}

impl<F, M> Native<F, M> {
    pub(super) const fn new(function: F) -> Self {
        Self {
            function,
            marker: PhantomData,
        }
    }
}

impl<F, M> Callable for Native<F, M>
where
    F: NativeFunction<M>,
{
    fn arity(&self) -> Arity {
        Arity::fixed(F::ARITY)
    }

    fn call(&self, arguments: &[Value]) -> Result<Value> {
        self.function.invoke(arguments)
    }
}

/// Body of a function over the raw argument slice.
pub(super) struct Raw<F, R> {
    arity: Arity,
    function: F,
    marker: PhantomData<fn() -> R>,
}

impl<F, R> Raw<F, R> {
    pub(super) const fn new(arity: Arity, function: F) -> Self {
        Self {
            arity,
            function,
            marker: PhantomData,
        }
    }
}

impl<F, R> Callable for Raw<F, R>
where
    F: Fn(&[Value]) -> R + Send + Sync,
    R: IntoOutcome,
{
    fn arity(&self) -> Arity {
        self.arity
    }

    fn call(&self, arguments: &[Value]) -> Result<Value> {
        (self.function)(arguments).into_outcome()
    }
}
