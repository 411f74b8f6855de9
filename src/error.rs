//! Error types for resolution, currying and pattern dispatch.
//!
//! Every failure in this crate is synchronous and terminal for the call that
//! raised it: nothing is retried and no partial result is returned.

use thiserror::Error;

use crate::value::TypeTag;

/// A specialized [`Result`](std::result::Result) for this crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Represents the errors raised by registries, functions and dispatchers.
///
/// # Examples
///
/// ```rust
/// use lambars_dispatch::Error;
/// use lambars_dispatch::value::TypeTag;
///
/// let error = Error::IncompletePatternMatch {
///     tags: vec![TypeTag::String],
/// };
/// assert_eq!(
///     error.to_string(),
///     "incomplete pattern match: no clause accepts (string)"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The requested name is not registered.
    #[error("function `{name}` is not registered in `{registry}`")]
    FunctionNotFound {
        /// The requested function name.
        name: String,
        /// The name of the registry that was searched.
        registry: String,
    },

    /// No clause accepted the call arguments.
    #[error("incomplete pattern match: no clause accepts {}", render_tags(.tags))]
    IncompletePatternMatch {
        /// The type tags computed for the call arguments.
        tags: Vec<TypeTag>,
    },

    /// At least one argument was unwrapped, but the matched handler did not
    /// return a function to continue with.
    #[error(
        "invalid pattern match: {} requires unwrapping but the handler did not return a function",
        render_tags(.tags)
    )]
    InvalidPatternMatch {
        /// The type tags computed for the call arguments.
        tags: Vec<TypeTag>,
    },

    /// A function was called with fewer arguments than it requires.
    #[error("`{function}` expects at least {expected} argument(s), {given} given")]
    ArgumentCount {
        /// Name of the function, or `<anonymous>`.
        function: String,
        /// Minimum number of arguments.
        expected: usize,
        /// Number of arguments supplied.
        given: usize,
    },

    /// A value that is not a function was called.
    #[error("value of type {0} is not callable")]
    NotCallable(TypeTag),

    /// A function implementation reported a failure.
    #[error("{0}")]
    Failed(String),
}

impl Error {
    /// Creates an [`Error::Failed`] from a message.
    ///
    /// Intended for function implementations that need to reject their
    /// input.
    pub fn failed(message: impl Into<String>) -> Self {
        Self::Failed(message.into())
    }

    /// Returns the type tags carried by pattern match errors.
    pub fn tags(&self) -> Option<&[TypeTag]> {
        match self {
            Self::IncompletePatternMatch { tags } | Self::InvalidPatternMatch { tags } => {
                Some(tags)
            }
            _ => None,
        }
    }
}

fn render_tags(tags: &[TypeTag]) -> String {
    let names: Vec<&str> = tags.iter().map(TypeTag::name).collect();
    format!("({})", names.join(", "))
}
