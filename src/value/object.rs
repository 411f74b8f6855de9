//! Capabilities exposed by collaborator values.

use std::any::Any;
use std::fmt;

use super::Value;

/// A structured value with a class name.
///
/// Collaborator types (`Maybe`, `Either`, `Identity`, ...) implement this
/// trait to travel inside a [`Value`]. Only [`class_name`](Object::class_name)
/// is required; the other methods are optional capabilities.
///
/// # Examples
///
/// ```rust
/// use lambars_dispatch::value::{Extractable, Object, TypeTag, Value};
///
/// #[derive(Debug)]
/// struct Just(Value);
///
/// impl Object for Just {
///     fn class_name(&self) -> &str {
///         "Just"
///     }
///
///     fn state(&self) -> Option<Value> {
///         Some(self.0.clone())
///     }
///
///     fn as_extractable(&self) -> Option<&dyn Extractable> {
///         Some(self)
///     }
/// }
///
/// impl Extractable for Just {
///     fn extract(&self) -> Value {
///         self.0.clone()
///     }
/// }
///
/// let value = Value::object(Just(Value::from(3)));
/// assert_eq!(value.type_tag(), TypeTag::object("Just"));
/// assert_eq!(value.extract(), Some(Value::from(3)));
/// ```
pub trait Object: Any + Send + Sync + fmt::Debug {
    /// The class name, used as the object's [`TypeTag`](super::TypeTag).
    fn class_name(&self) -> &str;

    /// A structural snapshot of the object.
    ///
    /// Objects exposing a state compare loosely by class and state, and
    /// produce structural memo keys. Objects without one are compared and
    /// keyed by identity.
    fn state(&self) -> Option<Value> {
        None
    }

    /// Queries the [`Extractable`] capability.
    fn as_extractable(&self) -> Option<&dyn Extractable> {
        None
    }
}

/// A value that wraps one or more inner values.
///
/// The pattern dispatcher unwraps every extractable argument before handing
/// the inner values to the continuation returned by the matched handler. A
/// [`Value::List`] result is flattened into several inner values.
pub trait Extractable {
    /// Returns the wrapped value or values.
    fn extract(&self) -> Value;
}
