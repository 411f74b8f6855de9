//! First-match dispatch over clause lists.

use std::sync::Arc;

use super::Clause;
use crate::error::{Error, Result};
use crate::function::{Arity, Callable, Function};
use crate::value::{TypeTag, Value};

/// An ordered list of clauses, callable as one function.
///
/// # Dispatch
///
/// 1. The type tag of every argument is computed.
/// 2. Clauses are scanned in declaration order; the first one that applies
///    is selected. Later clauses are never consulted, even if they would
///    also apply. When none applies the call fails with
///    [`Error::IncompletePatternMatch`].
/// 3. Every argument exposing the [`Extractable`](crate::value::Extractable)
///    capability is unwrapped, and the inner values are flattened into one
///    list.
/// 4. The selected handler is called with the original arguments. If no
///    argument was unwrapped, its result is returned as is. Otherwise the
///    result must be a function, which is called with the unwrapped values;
///    any other result fails with [`Error::InvalidPatternMatch`].
///
/// # Examples
///
/// ```rust
/// use lambars_dispatch::Error;
/// use lambars_dispatch::function::Function;
/// use lambars_dispatch::pattern::Dispatcher;
/// use lambars_dispatch::value::{TypeTag, Value};
///
/// let describe = Dispatcher::builder()
///     .signature([TypeTag::Int], Function::native(|_: Value| "int"))
///     .signature([TypeTag::Int, TypeTag::Int], Function::native(|_: Value, _: Value| "pair"))
///     .build();
///
/// assert_eq!(describe.call(&[Value::from(5)]), Ok(Value::from("int")));
/// assert_eq!(describe.call(&[Value::from(2), Value::from(3)]), Ok(Value::from("pair")));
/// assert_eq!(
///     describe.call(&[Value::from("x")]),
///     Err(Error::IncompletePatternMatch { tags: vec![TypeTag::String] })
/// );
/// ```
#[derive(Debug, Clone)]
pub struct Dispatcher {
    clauses: Arc<[Clause]>,
}

impl Dispatcher {
    /// Creates a dispatcher from clauses in match order.
    pub fn new(clauses: impl IntoIterator<Item = Clause>) -> Self {
        Self {
            clauses: clauses.into_iter().collect(),
        }
    }

    /// Starts building a dispatcher.
    pub fn builder() -> DispatcherBuilder {
        DispatcherBuilder::default()
    }

    /// The clauses, in match order.
    pub fn clauses(&self) -> &[Clause] {
        &self.clauses
    }

    /// Returns the index of the clause that would handle `arguments`.
    ///
    /// Nothing is invoked.
    pub fn select(&self, arguments: &[Value]) -> Option<usize> {
        let tags = type_tags(arguments);
        self.find(arguments, &tags).map(|(index, _)| index)
    }

    /// Dispatches a call.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IncompletePatternMatch`] when no clause applies,
    /// [`Error::InvalidPatternMatch`] when arguments were unwrapped but the
    /// handler did not return a function, and otherwise the error of the
    /// handler or continuation.
    pub fn call(&self, arguments: &[Value]) -> Result<Value> {
        let tags = type_tags(arguments);
        let Some((index, clause)) = self.find(arguments, &tags) else {
            tracing::debug!(tags = ?tags, "no clause applies");
            return Err(Error::IncompletePatternMatch { tags });
        };
        tracing::debug!(clause = index, tags = ?tags, "clause selected");

        let unwrapped = unwrap_arguments(arguments);
        let result = clause.handler().call(arguments)?;

        match (unwrapped, result) {
            (None, result) => Ok(result),
            (Some(values), Value::Function(continuation)) => {
                tracing::trace!(clause = index, unwrapped = values.len(), "continuing with unwrapped values");
                continuation.call(&values)
            }
            (Some(_), result) => {
                tracing::debug!(clause = index, result = %result.type_tag(), "handler did not return a continuation");
                Err(Error::InvalidPatternMatch { tags })
            }
        }
    }

    /// Exposes the dispatcher as a variadic function.
    pub fn into_function(self) -> Function {
        Function::from_callable(self)
    }

    fn find(&self, arguments: &[Value], tags: &[TypeTag]) -> Option<(usize, &Clause)> {
        self.clauses
            .iter()
            .enumerate()
            .find(|(_, clause)| clause.applies(arguments, tags))
    }
}

impl Callable for Dispatcher {
    fn arity(&self) -> Arity {
        Arity::variadic(1)
    }

    fn call(&self, arguments: &[Value]) -> Result<Value> {
        Self::call(self, arguments)
    }
}

impl From<Dispatcher> for Function {
    fn from(dispatcher: Dispatcher) -> Self {
        dispatcher.into_function()
    }
}

/// Collects clauses for a [`Dispatcher`].
#[derive(Debug, Clone, Default)]
pub struct DispatcherBuilder {
    clauses: Vec<Clause>,
}

impl DispatcherBuilder {
    /// Appends a clause.
    #[must_use]
    pub fn clause(mut self, clause: Clause) -> Self {
        self.clauses.push(clause);
        self
    }

    /// Appends a literal clause.
    #[must_use]
    pub fn literal<V: Into<Value>>(self, values: impl IntoIterator<Item = V>, handler: Function) -> Self {
        self.clause(Clause::literal(values, handler))
    }

    /// Appends a signature clause.
    #[must_use]
    pub fn signature(self, params: impl IntoIterator<Item = TypeTag>, handler: Function) -> Self {
        self.clause(Clause::signature(params, handler))
    }

    /// Appends a wildcard clause.
    #[must_use]
    pub fn wildcard(self, handler: Function) -> Self {
        self.clause(Clause::wildcard(handler))
    }

    /// Builds the dispatcher.
    pub fn build(self) -> Dispatcher {
        Dispatcher::new(self.clauses)
    }
}

fn type_tags(arguments: &[Value]) -> Vec<TypeTag> {
    arguments.iter().map(Value::type_tag).collect()
}

/// Unwraps every extractable argument.
///
/// Returns `None` when no argument is extractable.
fn unwrap_arguments(arguments: &[Value]) -> Option<Vec<Value>> {
    let mut unwrapped = Vec::new();
    let mut extracted = false;
    for inner in arguments.iter().filter_map(Value::extract) {
        extracted = true;
        flatten_into(inner, &mut unwrapped);
    }
    extracted.then_some(unwrapped)
}

fn flatten_into(value: Value, output: &mut Vec<Value>) {
    match value {
        Value::List(items) => {
            for item in items.iter() {
                flatten_into(item.clone(), output);
            }
        }
        other => output.push(other),
    }
}
