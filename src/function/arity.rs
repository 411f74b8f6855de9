//! Arity descriptors.

use std::fmt;

use super::Function;

/// The number of positional parameters a function declares.
///
/// A variadic rest parameter counts as one parameter. Consumers treat an
/// argument list as complete once it holds at least [`count`](Arity::count)
/// values, whether or not the function is variadic.
///
/// # Examples
///
/// ```rust
/// use lambars_dispatch::function::Arity;
///
/// let fold = Arity::fixed(3);
/// assert!(!fold.is_satisfied_by(2));
/// assert!(fold.is_satisfied_by(3));
///
/// let sum = Arity::variadic(1);
/// assert_eq!(sum.count(), 1);
/// assert_eq!(sum.minimum(), 0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Arity {
    count: usize,
    variadic: bool,
}

impl Arity {
    /// An arity of exactly `count` parameters.
    pub const fn fixed(count: usize) -> Self {
        Self {
            count,
            variadic: false,
        }
    }

    /// An arity of `count` parameters, the last of which is a rest parameter.
    pub const fn variadic(count: usize) -> Self {
        Self {
            count,
            variadic: true,
        }
    }

    /// The declared parameter count, rest parameter included.
    pub const fn count(self) -> usize {
        self.count
    }

    /// Returns `true` if the last parameter collects any remaining arguments.
    pub const fn is_variadic(self) -> bool {
        self.variadic
    }

    /// The fewest arguments a direct call may supply.
    ///
    /// A rest parameter may receive no arguments at all.
    pub const fn minimum(self) -> usize {
        if self.variadic {
            self.count.saturating_sub(1)
        } else {
            self.count
        }
    }

    /// Returns `true` once `given` arguments are enough to invoke the
    /// function.
    pub const fn is_satisfied_by(self, given: usize) -> bool {
        given >= self.count
    }
}

impl fmt::Display for Arity {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.variadic {
            write!(formatter, "{}..", self.minimum())
        } else {
            write!(formatter, "{}", self.count)
        }
    }
}

/// Returns the declared arity of a function.
///
/// Every [`Function`] carries the signature descriptor it was built with, so
/// this works the same for free functions, method paths and closures.
pub fn arity(function: &Function) -> Arity {
    function.arity()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Value;

    fn concat(first: Value, second: Value) -> Value {
        Value::from(format!("{first}{second}"))
    }

    #[test]
    fn test_fixed_arity() {
        let arity = Arity::fixed(2);
        assert_eq!(arity.count(), 2);
        assert_eq!(arity.minimum(), 2);
        assert!(!arity.is_variadic());
        assert_eq!(arity.to_string(), "2");
    }

    #[test]
    fn test_variadic_arity_counts_rest_parameter_once() {
        let arity = Arity::variadic(2);
        assert_eq!(arity.count(), 2);
        assert_eq!(arity.minimum(), 1);
        assert!(arity.is_satisfied_by(2));
        assert!(arity.is_satisfied_by(7));
        assert!(!arity.is_satisfied_by(1));
        assert_eq!(arity.to_string(), "1..");
    }

    #[test]
    fn test_arity_of_free_function() {
        assert_eq!(arity(&Function::native(concat)), Arity::fixed(2));
    }

    #[test]
    fn test_arity_of_closure() {
        let function = Function::native(|value: Value, _: Value, _: Value| value);
        assert_eq!(arity(&function), Arity::fixed(3));
    }

    #[test]
    fn test_arity_of_zero_argument_function() {
        assert_eq!(arity(&Function::native(|| true)), Arity::fixed(0));
    }

    #[test]
    fn test_arity_of_variadic_function() {
        let function = Function::variadic(1, |arguments: &[Value]| {
            Value::from(i64::try_from(arguments.len()).unwrap_or(i64::MAX))
        });
        assert_eq!(arity(&function), Arity::variadic(1));
    }
}
