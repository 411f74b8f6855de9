//! Loose value equality used by literal pattern clauses.

use std::sync::Arc;

use super::Value;

impl Value {
    /// Compares two values after converting between compatible categories.
    ///
    /// The rules, applied in order:
    ///
    /// 1. A `Bool` on either side compares truthiness.
    /// 2. `Null` equals `Null` and the empty string, and otherwise any falsy
    ///    value.
    /// 3. Numbers compare numerically, whether `Int` or `Float`.
    /// 4. A number and a numeric string compare numerically; a non-numeric
    ///    string compares against the number's decimal rendering.
    /// 5. Two numeric strings compare numerically, other strings by content.
    /// 6. Lists compare pairwise, loosely.
    /// 7. Objects are equal when identical, or when they share a class and
    ///    both expose loosely equal states.
    /// 8. Functions compare by identity.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lambars_dispatch::value::Value;
    ///
    /// assert!(Value::from(1).loose_eq(&Value::from(1.0)));
    /// assert!(Value::from("10").loose_eq(&Value::from(10)));
    /// assert!(!Value::from("abc").loose_eq(&Value::from(0)));
    /// assert!(Value::from(1) != Value::from(1.0));
    /// ```
    #[allow(clippy::cast_precision_loss)]
    pub fn loose_eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Bool(_), _) | (_, Self::Bool(_)) => self.is_truthy() == other.is_truthy(),
            (Self::Null, Self::Null) => true,
            (Self::Null, Self::String(text)) | (Self::String(text), Self::Null) => text.is_empty(),
            (Self::Null, _) | (_, Self::Null) => !self.is_truthy() && !other.is_truthy(),
            (Self::Int(left), Self::Int(right)) => left == right,
            (Self::Int(integer), Self::Float(float)) | (Self::Float(float), Self::Int(integer)) => {
                *integer as f64 == *float
            }
            (Self::Float(left), Self::Float(right)) => left == right,
            (Self::String(left), Self::String(right)) => {
                match (parse_numeric(left), parse_numeric(right)) {
                    (Some(left_number), Some(right_number)) => left_number == right_number,
                    _ => left == right,
                }
            }
            (Self::String(text), number @ (Self::Int(_) | Self::Float(_)))
            | (number @ (Self::Int(_) | Self::Float(_)), Self::String(text)) => {
                string_eq_number(text, number)
            }
            (Self::List(left), Self::List(right)) => {
                left.len() == right.len()
                    && left
                        .iter()
                        .zip(right.iter())
                        .all(|(left_item, right_item)| left_item.loose_eq(right_item))
            }
            (Self::Object(left), Self::Object(right)) => {
                std::ptr::addr_eq(Arc::as_ptr(left), Arc::as_ptr(right))
                    || (left.class_name() == right.class_name()
                        && matches!(
                            (left.state(), right.state()),
                            (Some(left_state), Some(right_state)) if left_state.loose_eq(&right_state)
                        ))
            }
            (Self::Function(left), Self::Function(right)) => left.ptr_eq(right),
            _ => false,
        }
    }
}

fn string_eq_number(text: &str, number: &Value) -> bool {
    match (parse_numeric(text), number.as_float()) {
        (Some(parsed), Some(expected)) => parsed == expected,
        _ => text == number.to_string(),
    }
}

/// Parses a decimal number, allowing surrounding whitespace.
///
/// Only digits, signs, a decimal point and an exponent are accepted, so
/// spellings such as `inf` or `NaN` are not numeric. Only ASCII whitespace
/// is trimmed.
fn parse_numeric(text: &str) -> Option<f64> {
    let trimmed = text.trim_matches(|character: char| character.is_ascii_whitespace());
    let is_numeric_text = trimmed.bytes().any(|byte| byte.is_ascii_digit())
        && trimmed
            .bytes()
            .all(|byte| byte.is_ascii_digit() || matches!(byte, b'+' | b'-' | b'.' | b'e' | b'E'));
    if !is_numeric_text {
        return None;
    }
    trimmed.parse::<f64>().ok()
}
