//! Collaborator value types shared by the integration tests.

#![allow(dead_code)]

use lambars_dispatch::value::{Extractable, Object, Value};

/// A present optional value.
#[derive(Debug, Clone)]
pub struct Just(pub Value);

impl Object for Just {
    fn class_name(&self) -> &str {
        "Just"
    }

    fn state(&self) -> Option<Value> {
        Some(self.0.clone())
    }

    fn as_extractable(&self) -> Option<&dyn Extractable> {
        Some(self)
    }
}

impl Extractable for Just {
    fn extract(&self) -> Value {
        self.0.clone()
    }
}

/// An absent optional value.
#[derive(Debug, Clone)]
pub struct Nothing;

impl Object for Nothing {
    fn class_name(&self) -> &str {
        "Nothing"
    }

    fn state(&self) -> Option<Value> {
        Some(Value::Null)
    }
}

/// A container holding several values at once.
#[derive(Debug, Clone)]
pub struct Tuple(pub Vec<Value>);

impl Object for Tuple {
    fn class_name(&self) -> &str {
        "Tuple"
    }

    fn as_extractable(&self) -> Option<&dyn Extractable> {
        Some(self)
    }
}

impl Extractable for Tuple {
    fn extract(&self) -> Value {
        Value::list(self.0.iter().cloned())
    }
}

pub fn just(value: impl Into<Value>) -> Value {
    Value::object(Just(value.into()))
}

pub fn nothing() -> Value {
    Value::object(Nothing)
}

pub fn tuple(values: impl IntoIterator<Item = Value>) -> Value {
    Value::object(Tuple(values.into_iter().collect()))
}

pub fn ints(numbers: &[i64]) -> Vec<Value> {
    numbers.iter().copied().map(Value::from).collect()
}

pub fn int(value: &Value) -> i64 {
    value.as_int().unwrap_or_default()
}
