//! Dynamic values passed to curried functions and pattern dispatchers.
//!
//! [`Value`] is the argument and result type of every function this crate
//! manages. Primitive values are stored inline; strings, lists, objects and
//! functions are reference counted, so cloning a value is cheap and never
//! copies its contents.
//!
//! # Overview
//!
//! - [`Value`]: the dynamic value
//! - [`TypeTag`]: the runtime category of a value, used by signature clauses
//! - [`Object`]: structured collaborator values identified by class name
//! - [`Extractable`]: the optional unwrap capability of an object
//! - [`MemoKey`]: canonical encoding of argument tuples for memoization
//!
//! # Equality
//!
//! Values support two equalities. [`PartialEq`] is strict: both sides must
//! be the same variant with equal contents. [`Value::loose_eq`] converts
//! between numbers, numeric strings, booleans and null before comparing, and
//! is what literal pattern clauses use.

mod equality;
mod memo_key;
mod object;
mod type_tag;

pub use memo_key::{Instance, MemoKey};
pub use object::{Extractable, Object};
pub use type_tag::TypeTag;

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use crate::error::{Error, Result};
use crate::function::Function;

/// A dynamically typed value.
///
/// # Examples
///
/// ```rust
/// use lambars_dispatch::value::{TypeTag, Value};
///
/// let list = Value::list([Value::from(1), Value::from("two")]);
/// assert_eq!(list.type_tag(), TypeTag::List);
/// assert_eq!(list.to_string(), "[1, two]");
/// ```
#[derive(Clone, Default)]
pub enum Value {
    /// The absent value.
    #[default]
    Null,
    /// A boolean.
    Bool(bool),
    /// A signed integer.
    Int(i64),
    /// A floating point number.
    Float(f64),
    /// An immutable string.
    String(Arc<str>),
    /// An immutable list.
    List(Arc<[Value]>),
    /// A collaborator object.
    Object(Arc<dyn Object>),
    /// A callable value.
    Function(Function),
}

impl Value {
    /// Creates a string value.
    pub fn string(text: impl Into<Arc<str>>) -> Self {
        Self::String(text.into())
    }

    /// Creates a list value from any sequence of values.
    pub fn list(items: impl IntoIterator<Item = Self>) -> Self {
        Self::List(items.into_iter().collect())
    }

    /// Wraps a collaborator object.
    pub fn object<T: Object>(object: T) -> Self {
        Self::Object(Arc::new(object))
    }

    /// Computes the [`TypeTag`] of this value.
    pub fn type_tag(&self) -> TypeTag {
        match self {
            Self::Null => TypeTag::Null,
            Self::Bool(_) => TypeTag::Bool,
            Self::Int(_) => TypeTag::Int,
            Self::Float(_) => TypeTag::Float,
            Self::String(_) => TypeTag::String,
            Self::List(_) => TypeTag::List,
            Self::Function(_) => TypeTag::Function,
            Self::Object(object) => TypeTag::object(object.class_name()),
        }
    }

    /// Returns `true` for `Null`.
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Truthiness used by loose equality.
    ///
    /// `null`, `false`, `0`, `0.0`, `""`, `"0"` and the empty list are falsy;
    /// everything else is truthy.
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Null => false,
            Self::Bool(flag) => *flag,
            Self::Int(number) => *number != 0,
            Self::Float(number) => *number != 0.0,
            Self::String(text) => !(text.is_empty() || &**text == "0"),
            Self::List(items) => !items.is_empty(),
            Self::Object(_) | Self::Function(_) => true,
        }
    }

    /// Returns the boolean, if this is a `Bool`.
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(flag) => Some(*flag),
            _ => None,
        }
    }

    /// Returns the integer, if this is an `Int`.
    pub const fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(number) => Some(*number),
            _ => None,
        }
    }

    /// Returns the number as a float, if this is an `Int` or a `Float`.
    #[allow(clippy::cast_precision_loss)]
    pub const fn as_float(&self) -> Option<f64> {
        match self {
            Self::Int(number) => Some(*number as f64),
            Self::Float(number) => Some(*number),
            _ => None,
        }
    }

    /// Returns the string slice, if this is a `String`.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(text) => Some(text),
            _ => None,
        }
    }

    /// Returns the items, if this is a `List`.
    pub fn as_list(&self) -> Option<&[Self]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    /// Returns the object, if this is an `Object`.
    pub fn as_object(&self) -> Option<&dyn Object> {
        match self {
            Self::Object(object) => Some(&**object),
            _ => None,
        }
    }

    /// Returns the function, if this is a `Function`.
    pub const fn as_function(&self) -> Option<&Function> {
        match self {
            Self::Function(function) => Some(function),
            _ => None,
        }
    }

    /// Downcasts an object value to its concrete type.
    ///
    /// Returns `None` when the value is not an object or is an object of a
    /// different type.
    pub fn downcast_ref<T: Object>(&self) -> Option<&T> {
        let object: &dyn Any = self.as_object()?;
        object.downcast_ref::<T>()
    }

    /// Calls this value as a function.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotCallable`] when the value is not a function, and
    /// otherwise whatever the function returns.
    pub fn call(&self, arguments: &[Self]) -> Result<Self> {
        match self {
            Self::Function(function) => function.call(arguments),
            other => Err(Error::NotCallable(other.type_tag())),
        }
    }

    /// Unwraps an extractable object.
    ///
    /// Returns `None` when the value does not expose the [`Extractable`]
    /// capability.
    pub fn extract(&self) -> Option<Self> {
        self.as_object()?
            .as_extractable()
            .map(|capability| capability.extract())
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Null, Self::Null) => true,
            (Self::Bool(left), Self::Bool(right)) => left == right,
            (Self::Int(left), Self::Int(right)) => left == right,
            (Self::Float(left), Self::Float(right)) => left == right,
            (Self::String(left), Self::String(right)) => left == right,
            (Self::List(left), Self::List(right)) => left == right,
            (Self::Object(left), Self::Object(right)) => {
                std::ptr::addr_eq(Arc::as_ptr(left), Arc::as_ptr(right))
                    || (left.class_name() == right.class_name()
                        && matches!(
                            (left.state(), right.state()),
                            (Some(left_state), Some(right_state)) if left_state == right_state
                        ))
            }
            (Self::Function(left), Self::Function(right)) => left.ptr_eq(right),
            _ => false,
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => formatter.write_str("Null"),
            Self::Bool(flag) => formatter.debug_tuple("Bool").field(flag).finish(),
            Self::Int(number) => formatter.debug_tuple("Int").field(number).finish(),
            Self::Float(number) => formatter.debug_tuple("Float").field(number).finish(),
            Self::String(text) => formatter.debug_tuple("String").field(text).finish(),
            Self::List(items) => formatter.debug_tuple("List").field(items).finish(),
            Self::Object(object) => formatter.debug_tuple("Object").field(object).finish(),
            Self::Function(function) => formatter.debug_tuple("Function").field(function).finish(),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => formatter.write_str("null"),
            Self::Bool(flag) => write!(formatter, "{flag}"),
            Self::Int(number) => write!(formatter, "{number}"),
            Self::Float(number) => write!(formatter, "{number}"),
            Self::String(text) => formatter.write_str(text),
            Self::List(items) => {
                formatter.write_str("[")?;
                for (index, item) in items.iter().enumerate() {
                    if index > 0 {
                        formatter.write_str(", ")?;
                    }
                    write!(formatter, "{item}")?;
                }
                formatter.write_str("]")
            }
            Self::Object(object) => formatter.write_str(object.class_name()),
            Self::Function(function) => write!(formatter, "{function}"),
        }
    }
}

impl From<()> for Value {
    fn from((): ()) -> Self {
        Self::Null
    }
}

impl From<bool> for Value {
    fn from(flag: bool) -> Self {
        Self::Bool(flag)
    }
}

macro_rules! impl_from_integer {
    ($($integer:ty),*) => {
        $(
            impl From<$integer> for Value {
                fn from(number: $integer) -> Self {
                    Self::Int(i64::from(number))
                }
            }
        )*
    };
}

impl_from_integer!(i8, i16, i32, i64, u8, u16, u32);

impl From<f32> for Value {
    fn from(number: f32) -> Self {
        Self::Float(f64::from(number))
    }
}

impl From<f64> for Value {
    fn from(number: f64) -> Self {
        Self::Float(number)
    }
}

impl From<&str> for Value {
    fn from(text: &str) -> Self {
        Self::String(Arc::from(text))
    }
}

impl From<String> for Value {
    fn from(text: String) -> Self {
        Self::String(Arc::from(text))
    }
}

impl From<Arc<str>> for Value {
    fn from(text: Arc<str>) -> Self {
        Self::String(text)
    }
}

impl<T: Into<Self>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Self::List(items.into_iter().map(Into::into).collect())
    }
}

impl From<Function> for Value {
    fn from(function: Function) -> Self {
        Self::Function(function)
    }
}

impl FromIterator<Self> for Value {
    fn from_iter<I: IntoIterator<Item = Self>>(iterator: I) -> Self {
        Self::list(iterator)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::{SerializeMap, SerializeSeq};

        match self {
            Self::Null => serializer.serialize_unit(),
            Self::Bool(flag) => serializer.serialize_bool(*flag),
            Self::Int(number) => serializer.serialize_i64(*number),
            Self::Float(number) => serializer.serialize_f64(*number),
            Self::String(text) => serializer.serialize_str(text),
            Self::List(items) => {
                let mut sequence = serializer.serialize_seq(Some(items.len()))?;
                for item in items.iter() {
                    sequence.serialize_element(item)?;
                }
                sequence.end()
            }
            Self::Object(object) => {
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry("class", object.class_name())?;
                map.serialize_entry("state", &object.state().unwrap_or_default())?;
                map.end()
            }
            Self::Function(function) => serializer.serialize_str(&function.to_string()),
        }
    }
}

#[cfg(feature = "serde")]
struct ValueVisitor;

#[cfg(feature = "serde")]
impl<'de> serde::de::Visitor<'de> for ValueVisitor {
    type Value = Value;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("null, a boolean, a number, a string or a sequence")
    }

    fn visit_unit<E>(self) -> std::result::Result<Self::Value, E> {
        Ok(Value::Null)
    }

    fn visit_none<E>(self) -> std::result::Result<Self::Value, E> {
        Ok(Value::Null)
    }

    fn visit_some<D>(self, deserializer: D) -> std::result::Result<Self::Value, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        serde::Deserialize::deserialize(deserializer)
    }

    fn visit_bool<E>(self, flag: bool) -> std::result::Result<Self::Value, E> {
        Ok(Value::Bool(flag))
    }

    fn visit_i64<E>(self, number: i64) -> std::result::Result<Self::Value, E> {
        Ok(Value::Int(number))
    }

    fn visit_u64<E>(self, number: u64) -> std::result::Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        i64::try_from(number)
            .map(Value::Int)
            .map_err(|_| E::custom(format!("integer {number} does not fit in i64")))
    }

    fn visit_f64<E>(self, number: f64) -> std::result::Result<Self::Value, E> {
        Ok(Value::Float(number))
    }

    fn visit_str<E>(self, text: &str) -> std::result::Result<Self::Value, E> {
        Ok(Value::from(text))
    }

    fn visit_string<E>(self, text: String) -> std::result::Result<Self::Value, E> {
        Ok(Value::from(text))
    }

    fn visit_seq<A>(self, mut access: A) -> std::result::Result<Self::Value, A::Error>
    where
        A: serde::de::SeqAccess<'de>,
    {
        let mut items = Vec::with_capacity(access.size_hint().unwrap_or(0));
        while let Some(item) = access.next_element()? {
            items.push(item);
        }
        Ok(Value::list(items))
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Value {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        deserializer.deserialize_any(ValueVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[derive(Debug)]
    struct Point {
        x: i64,
        y: i64,
    }

    impl Object for Point {
        fn class_name(&self) -> &str {
            "Point"
        }

        fn state(&self) -> Option<Value> {
            Some(Value::list([Value::from(self.x), Value::from(self.y)]))
        }
    }

    #[derive(Debug)]
    struct Opaque;

    impl Object for Opaque {
        fn class_name(&self) -> &str {
            "Opaque"
        }
    }

    #[rstest]
    #[case(Value::Null, TypeTag::Null)]
    #[case(Value::from(true), TypeTag::Bool)]
    #[case(Value::from(1), TypeTag::Int)]
    #[case(Value::from(1.5), TypeTag::Float)]
    #[case(Value::from("a"), TypeTag::String)]
    #[case(Value::list([]), TypeTag::List)]
    #[case(Value::object(Opaque), TypeTag::object("Opaque"))]
    fn test_type_tag(#[case] value: Value, #[case] expected: TypeTag) {
        assert_eq!(value.type_tag(), expected);
    }

    #[rstest]
    #[case(Value::Null, false)]
    #[case(Value::from(false), false)]
    #[case(Value::from(0), false)]
    #[case(Value::from(0.0), false)]
    #[case(Value::from(""), false)]
    #[case(Value::from("0"), false)]
    #[case(Value::list([]), false)]
    #[case(Value::from(-1), true)]
    #[case(Value::from("0.0"), true)]
    #[case(Value::list([Value::Null]), true)]
    #[case(Value::object(Opaque), true)]
    fn test_truthiness(#[case] value: Value, #[case] expected: bool) {
        assert_eq!(value.is_truthy(), expected);
    }

    #[test]
    fn test_strict_equality_distinguishes_variants() {
        assert_eq!(Value::from(1), Value::from(1));
        assert_ne!(Value::from(1), Value::from(1.0));
        assert_ne!(Value::from("1"), Value::from(1));
    }

    #[test]
    fn test_objects_with_state_compare_structurally() {
        let first = Value::object(Point { x: 1, y: 2 });
        let second = Value::object(Point { x: 1, y: 2 });
        let third = Value::object(Point { x: 2, y: 1 });
        assert_eq!(first, second);
        assert_ne!(first, third);
    }

    #[test]
    fn test_objects_without_state_compare_by_identity() {
        let first = Value::object(Opaque);
        let second = Value::object(Opaque);
        assert_eq!(first, first.clone());
        assert_ne!(first, second);
    }

    #[test]
    fn test_downcast_ref() {
        let value = Value::object(Point { x: 3, y: 4 });
        let point = value.downcast_ref::<Point>().unwrap();
        assert_eq!((point.x, point.y), (3, 4));
        assert!(value.downcast_ref::<Opaque>().is_none());
        assert!(Value::from(1).downcast_ref::<Point>().is_none());
    }

    #[test]
    fn test_call_non_function_is_not_callable() {
        let result = Value::from(3).call(&[]);
        assert_eq!(result, Err(Error::NotCallable(TypeTag::Int)));
    }

    #[test]
    fn test_extract_without_capability_is_none() {
        assert_eq!(Value::object(Opaque).extract(), None);
        assert_eq!(Value::from(1).extract(), None);
    }

    #[test]
    fn test_display() {
        let value = Value::list([
            Value::Null,
            Value::from(true),
            Value::from(2),
            Value::from(2.5),
            Value::from("x"),
            Value::object(Opaque),
        ]);
        assert_eq!(value.to_string(), "[null, true, 2, 2.5, x, Opaque]");
    }

    #[test]
    fn test_from_vec_and_iterator() {
        let from_vec = Value::from(vec![1, 2, 3]);
        let collected: Value = (1..=3).map(Value::from).collect();
        assert_eq!(from_vec, collected);
        assert_eq!(from_vec.as_list().map(<[Value]>::len), Some(3));
    }

    #[test]
    fn test_accessors() {
        assert_eq!(Value::from(2).as_int(), Some(2));
        assert_eq!(Value::from(2).as_float(), Some(2.0));
        assert_eq!(Value::from("s").as_str(), Some("s"));
        assert_eq!(Value::from(true).as_bool(), Some(true));
        assert!(Value::Null.is_null());
        assert!(Value::Null.as_function().is_none());
    }
}
