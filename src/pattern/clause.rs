//! Match clauses.

use super::Signature;
use crate::function::Function;
use crate::value::{TypeTag, Value};

/// One candidate handler of a [`Dispatcher`](super::Dispatcher).
///
/// Literal and signature clauses use different equalities on purpose: a
/// literal clause compares argument *values* loosely, so `"1"` matches the
/// literal `1`; a signature clause compares argument *types* exactly, so an
/// `Int` argument never matches a `Float` parameter.
#[derive(Debug, Clone)]
pub enum Clause {
    /// Matches argument lists loosely equal to `values`, position by position.
    Literal {
        /// The literal values.
        values: Vec<Value>,
        /// The handler invoked with the call arguments.
        handler: Function,
    },
    /// Matches argument lists whose type tags satisfy `signature`.
    Signature {
        /// The declared parameter types.
        signature: Signature,
        /// The handler invoked with the call arguments.
        handler: Function,
    },
}

impl Clause {
    /// A literal clause.
    pub fn literal<V: Into<Value>>(values: impl IntoIterator<Item = V>, handler: Function) -> Self {
        Self::Literal {
            values: values.into_iter().map(Into::into).collect(),
            handler,
        }
    }

    /// A signature clause.
    pub fn signature(params: impl IntoIterator<Item = TypeTag>, handler: Function) -> Self {
        Self::Signature {
            signature: Signature::new(params),
            handler,
        }
    }

    /// A signature clause accepting any arguments.
    pub const fn wildcard(handler: Function) -> Self {
        Self::Signature {
            signature: Signature::wildcard(),
            handler,
        }
    }

    /// The handler.
    pub const fn handler(&self) -> &Function {
        match self {
            Self::Literal { handler, .. } | Self::Signature { handler, .. } => handler,
        }
    }

    /// Returns `true` if this clause accepts the arguments.
    ///
    /// `tags` must hold the type tags of `arguments`.
    pub fn applies(&self, arguments: &[Value], tags: &[TypeTag]) -> bool {
        match self {
            Self::Literal { values, .. } => {
                values.len() == arguments.len()
                    && values
                        .iter()
                        .zip(arguments)
                        .all(|(literal, argument)| argument.loose_eq(literal))
            }
            Self::Signature { signature, .. } => signature.accepts(tags),
        }
    }
}
