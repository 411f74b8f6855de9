//! Canonical encoding of argument tuples for memoization.

use std::hash::{Hash, Hasher};
use std::sync::Arc;

use super::{Object, Value};
use crate::function::Function;

/// A hashable, canonical encoding of a value or argument tuple.
///
/// Structurally equal values always encode to equal keys:
///
/// - floats are encoded by bit pattern, with `-0.0` folded into `0.0`;
/// - lists encode element by element;
/// - objects exposing a [`state`](Object::state) encode as class name plus
///   state, other objects by identity;
/// - functions encode by identity.
///
/// Identity keys hold a reference to the object or function they describe,
/// so an address can never be reused while the key is alive.
///
/// # Examples
///
/// ```rust
/// use lambars_dispatch::value::{MemoKey, Value};
///
/// let first = MemoKey::arguments(&[Value::from(1), Value::from(vec![2, 3])]);
/// let second = MemoKey::arguments(&[Value::from(1), Value::from(vec![2, 3])]);
/// assert_eq!(first, second);
/// assert_ne!(first, MemoKey::arguments(&[Value::from(1.0)]));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum MemoKey {
    /// `Null`.
    Null,
    /// A boolean.
    Bool(bool),
    /// An integer.
    Int(i64),
    /// The normalized bit pattern of a float.
    Float(u64),
    /// A string.
    String(Arc<str>),
    /// A list or argument tuple.
    List(Vec<MemoKey>),
    /// An object with a structural state.
    Object {
        /// The class name.
        class_name: Arc<str>,
        /// The encoded state.
        state: Box<MemoKey>,
    },
    /// An object without a structural state.
    Instance(Instance),
    /// A function.
    Function(Function),
}

impl MemoKey {
    /// Encodes a single value.
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(flag) => Self::Bool(*flag),
            Value::Int(number) => Self::Int(*number),
            Value::Float(number) => Self::Float(if *number == 0.0 { 0 } else { number.to_bits() }),
            Value::String(text) => Self::String(Arc::clone(text)),
            Value::List(items) => Self::List(items.iter().map(Self::of).collect()),
            Value::Object(object) => match object.state() {
                Some(state) => Self::Object {
                    class_name: Arc::from(object.class_name()),
                    state: Box::new(Self::of(&state)),
                },
                None => Self::Instance(Instance(Arc::clone(object))),
            },
            Value::Function(function) => Self::Function(function.clone()),
        }
    }

    /// Encodes an argument tuple.
    pub fn arguments(arguments: &[Value]) -> Self {
        Self::List(arguments.iter().map(Self::of).collect())
    }
}

/// An object keyed by identity.
#[derive(Debug, Clone)]
pub struct Instance(Arc<dyn Object>);

impl PartialEq for Instance {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::addr_eq(Arc::as_ptr(&self.0), Arc::as_ptr(&other.0))
    }
}

impl Eq for Instance {}

impl Hash for Instance {
    fn hash<H: Hasher>(&self, state: &mut H) {
        Arc::as_ptr(&self.0).cast::<()>().hash(state);
    }
}
