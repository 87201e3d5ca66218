//! Raw request fields and their numeric conversion.
//!
//! Both the HTML form and the JSON API hand over loosely typed values keyed by field name.
//! `Fields` gives the calculators a single way to read them with a default for absent keys
//! and a `CardioError::InvalidInput` for anything that does not convert.

use crate::{CardioError, CardioResult};
use serde_json::{Map, Value};
use std::collections::HashMap;

/// Borrowed view over a request's named fields.
#[derive(Clone, Copy, Debug)]
pub enum Fields<'a> {
    /// URL-encoded form values, always text.
    Form(&'a HashMap<String, String>),
    /// Members of a JSON object body.
    Json(&'a Map<String, Value>),
}

impl<'a> Fields<'a> {
    /// View a JSON body as fields. The body must be an object.
    pub fn from_json(body: &'a Value) -> CardioResult<Self> {
        match body {
            Value::Object(map) => Ok(Fields::Json(map)),
            other => Err(CardioError::InvalidBody(format!(
                "expected a JSON object, got {}",
                json_kind(other)
            ))),
        }
    }

    /// Read a floating-point field, falling back to `default` when the key is absent.
    pub fn float_or(&self, field: &str, default: f64) -> CardioResult<f64> {
        Ok(self.float(field)?.unwrap_or(default))
    }

    /// Read an integer field, falling back to `default` when the key is absent.
    ///
    /// Fractional JSON numbers truncate toward zero; text must be an integer literal.
    pub fn int_or(&self, field: &str, default: i64) -> CardioResult<i64> {
        Ok(self.int(field)?.unwrap_or(default))
    }

    /// Read an optional floating-point field.
    pub fn float(&self, field: &str) -> CardioResult<Option<f64>> {
        match *self {
            Fields::Form(map) => map
                .get(field)
                .map(|raw| parse_text_float(field, raw))
                .transpose(),
            Fields::Json(map) => map.get(field).map(|v| json_float(field, v)).transpose(),
        }
    }

    /// Read an optional integer field.
    pub fn int(&self, field: &str) -> CardioResult<Option<i64>> {
        match *self {
            Fields::Form(map) => map
                .get(field)
                .map(|raw| parse_text_int(field, raw))
                .transpose(),
            Fields::Json(map) => map.get(field).map(|v| json_int(field, v)).transpose(),
        }
    }
}

fn parse_text_float(field: &str, raw: &str) -> CardioResult<f64> {
    raw.trim()
        .parse::<f64>()
        .map_err(|_| invalid(field, raw.to_string()))
}

fn parse_text_int(field: &str, raw: &str) -> CardioResult<i64> {
    raw.trim()
        .parse::<i64>()
        .map_err(|_| invalid(field, raw.to_string()))
}

fn json_float(field: &str, value: &Value) -> CardioResult<f64> {
    match value {
        Value::Number(n) => n.as_f64().ok_or_else(|| invalid(field, n.to_string())),
        Value::String(s) => parse_text_float(field, s),
        Value::Bool(b) => Ok(if *b { 1.0 } else { 0.0 }),
        other => Err(invalid(field, other.to_string())),
    }
}

fn json_int(field: &str, value: &Value) -> CardioResult<i64> {
    match value {
        Value::Number(n) => match n.as_i64() {
            Some(i) => Ok(i),
            None => n
                .as_f64()
                .map(|f| f.trunc() as i64)
                .ok_or_else(|| invalid(field, n.to_string())),
        },
        Value::String(s) => parse_text_int(field, s),
        Value::Bool(b) => Ok(i64::from(*b)),
        other => Err(invalid(field, other.to_string())),
    }
}

fn invalid(field: &str, value: String) -> CardioError {
    CardioError::InvalidInput {
        field: field.to_string(),
        value,
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
