//! Structural pattern dispatch.
//!
//! A [`Dispatcher`] selects one of several handlers by the runtime shape of
//! the call arguments, and optionally unwraps container arguments before
//! continuing.
//!
//! # Overview
//!
//! - [`Signature`]: declared parameter types, or the wildcard
//! - [`Clause`]: a literal tuple or a signature, paired with a handler
//! - [`Dispatcher`]: first-match selection and the unwrap protocol
//!
//! # Unwrap protocol
//!
//! When an argument is [`Extractable`](crate::value::Extractable), the
//! handler is expected to return a *continuation*: a function that receives
//! the unwrapped inner values.
//!
//! ```rust
//! use lambars_dispatch::function::Function;
//! use lambars_dispatch::pattern::Dispatcher;
//! use lambars_dispatch::value::{Extractable, Object, TypeTag, Value};
//!
//! #[derive(Debug)]
//! struct Pair(Value, Value);
//!
//! impl Object for Pair {
//!     fn class_name(&self) -> &str {
//!         "Pair"
//!     }
//!
//!     fn as_extractable(&self) -> Option<&dyn Extractable> {
//!         Some(self)
//!     }
//! }
//!
//! impl Extractable for Pair {
//!     fn extract(&self) -> Value {
//!         Value::list([self.0.clone(), self.1.clone()])
//!     }
//! }
//!
//! let swap = Function::native(|first: Value, second: Value| Value::list([second, first]));
//! let dispatcher = Dispatcher::builder()
//!     .signature([TypeTag::object("Pair")], Function::native(move |_: Value| swap.clone()))
//!     .build();
//!
//! let pair = Value::object(Pair(Value::from(1), Value::from(2)));
//! assert_eq!(dispatcher.call(&[pair]), Ok(Value::from(vec![2, 1])));
//! ```

mod clause;
mod dispatcher;
mod signature;

pub use clause::Clause;
pub use dispatcher::{Dispatcher, DispatcherBuilder};
pub use signature::Signature;
