//! Runtime type categories of [`Value`](super::Value).

use std::fmt;
use std::sync::Arc;

/// The normalized type category of a value.
///
/// Objects are tagged with their class name; every other value is tagged with
/// its primitive category. Two tags are equal only when they name exactly the
/// same category, there is no subtyping between tags.
///
/// # Examples
///
/// ```rust
/// use lambars_dispatch::value::{TypeTag, Value};
///
/// assert_eq!(Value::from(5).type_tag(), TypeTag::Int);
/// assert_eq!(Value::from(5.0).type_tag(), TypeTag::Float);
/// assert_eq!(TypeTag::Float.name(), "float");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeTag {
    /// The absent value.
    Null,
    /// `true` or `false`.
    Bool,
    /// 64-bit signed integers.
    Int,
    /// 64-bit floating point numbers.
    Float,
    /// UTF-8 strings.
    String,
    /// Ordered lists of values.
    List,
    /// Callable values.
    Function,
    /// Objects, identified by class name.
    Object(Arc<str>),
}

impl TypeTag {
    /// Creates an object tag for the given class name.
    pub fn object(class_name: impl Into<Arc<str>>) -> Self {
        Self::Object(class_name.into())
    }

    /// Returns the rendered name of the tag.
    pub fn name(&self) -> &str {
        match self {
            Self::Null => "null",
            Self::Bool => "bool",
            Self::Int => "int",
            Self::Float => "float",
            Self::String => "string",
            Self::List => "list",
            Self::Function => "function",
            Self::Object(class_name) => class_name,
        }
    }

    /// Returns `true` for object tags.
    pub const fn is_object(&self) -> bool {
        matches!(self, Self::Object(_))
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.name())
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for TypeTag {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.name())
    }
}
