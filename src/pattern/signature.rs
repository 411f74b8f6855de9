//! Declared parameter types of signature clauses.

use std::fmt;

use crate::value::TypeTag;

/// The declared parameter types of a handler.
///
/// An empty signature is a wildcard: it accepts any argument list, including
/// the empty one. A non-empty signature accepts exactly as many arguments as
/// it declares, each of exactly the declared type.
///
/// # Examples
///
/// ```rust
/// use lambars_dispatch::pattern::Signature;
/// use lambars_dispatch::value::TypeTag;
///
/// let pair = Signature::new([TypeTag::Int, TypeTag::Int]);
/// assert!(pair.accepts(&[TypeTag::Int, TypeTag::Int]));
/// assert!(!pair.accepts(&[TypeTag::Int, TypeTag::Float]));
/// assert!(Signature::wildcard().accepts(&[]));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Signature {
    params: Vec<TypeTag>,
}

impl Signature {
    /// A signature declaring the given parameter types, in order.
    pub fn new(params: impl IntoIterator<Item = TypeTag>) -> Self {
        Self {
            params: params.into_iter().collect(),
        }
    }

    /// The wildcard signature.
    pub const fn wildcard() -> Self {
        Self { params: Vec::new() }
    }

    /// The declared parameter types.
    pub fn params(&self) -> &[TypeTag] {
        &self.params
    }

    /// Returns `true` for the wildcard signature.
    pub fn is_wildcard(&self) -> bool {
        self.params.is_empty()
    }

    /// Returns `true` if an argument list with the given tags matches.
    ///
    /// Tags must be equal position by position; an `Int` argument never
    /// matches a `Float` parameter and an object never matches a parameter
    /// naming a different class.
    pub fn accepts(&self, tags: &[TypeTag]) -> bool {
        self.is_wildcard() || self.params.as_slice() == tags
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_wildcard() {
            return formatter.write_str("(..)");
        }
        formatter.write_str("(")?;
        for (index, param) in self.params.iter().enumerate() {
            if index > 0 {
                formatter.write_str(", ")?;
            }
            write!(formatter, "{param}")?;
        }
        formatter.write_str(")")
    }
}
