use crate::config::TypeOverride;
use serde_json::Value;

/// Apply a user-declared type override to a raw decoded value.
///
/// Returns `None` when the value cannot be coerced, which drops the field
/// from the decoded record entirely: a failed numeric parse must never
/// surface as NaN, and a non-array raw value never satisfies an array
/// override. Array overrides map element-wise, dropping elements that fail.
pub fn apply_override(ty: TypeOverride, raw: &Value) -> Option<Value> {
    match ty {
        TypeOverride::Boolean => Some(Value::Bool(truthy(raw))),
        TypeOverride::Number => coerce_number(raw),
        TypeOverride::String => coerce_string(raw),
        TypeOverride::NumberArray | TypeOverride::StringArray => {
            let Value::Array(items) = raw else {
                return None;
            };
            let element = ty.element();
            Some(Value::Array(
                items
                    .iter()
                    .filter_map(|item| apply_override(element, item))
                    .collect(),
            ))
        }
    }
}

fn truthy(raw: &Value) -> bool {
    match raw {
        Value::Null => false,
        Value::Bool(value) => *value,
        Value::Number(value) => value.as_f64().is_some_and(|n| n != 0.0),
        Value::String(value) => !value.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn coerce_number(raw: &Value) -> Option<Value> {
    match raw {
        Value::Number(_) => Some(raw.clone()),
        Value::String(value) => {
            let parsed: f64 = value.trim().parse().ok()?;
            serde_json::Number::from_f64(parsed).map(Value::Number)
        }
        Value::Bool(value) => Some(Value::Number(serde_json::Number::from(*value as i64))),
        _ => None,
    }
}

fn coerce_string(raw: &Value) -> Option<Value> {
    match raw {
        Value::String(_) => Some(raw.clone()),
        Value::Number(value) => Some(Value::String(value.to_string())),
        Value::Bool(value) => Some(Value::String(value.to_string())),
        _ => None,
    }
}
