//! A single step of a field path.

use std::fmt;

use serde_json::Value;

use crate::FieldPathError;

/// One step in a field path.
///
/// Variants are ordered `Field < Key < Value < Index` and then by content,
/// which fixes the iteration order of a [`crate::Set`].
///
/// `Key` and `Value` hold their JSON in canonical text form (object keys
/// sorted, no whitespace) so that equal JSON always compares equal.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PathElement {
    /// A named struct field, encoded as `f:<name>`.
    Field(String),
    /// An associative list item identified by its key fields, encoded as
    /// `k:{"name":"x"}`. Pairs are sorted by field name.
    Key(Vec<(String, String)>),
    /// A set item identified by its value, encoded as `v:<json>`.
    Value(String),
    /// A positional list item, encoded as `i:<n>`.
    Index(usize),
}

impl PathElement {
    pub fn field(name: impl Into<String>) -> Self {
        PathElement::Field(name.into())
    }

    pub fn key<'a, I>(fields: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a Value)>,
    {
        let mut pairs: Vec<(String, String)> = fields
            .into_iter()
            .map(|(name, value)| (name.to_string(), canonical_json(value)))
            .collect();
        pairs.sort();
        pairs.dedup_by(|a, b| a.0 == b.0);
        PathElement::Key(pairs)
    }

    pub fn value(value: &Value) -> Self {
        PathElement::Value(canonical_json(value))
    }

    pub fn index(index: usize) -> Self {
        PathElement::Index(index)
    }

    /// Encodes the element as a FieldsV1 object key.
    pub fn encode(&self) -> String {
        match self {
            PathElement::Field(name) => format!("f:{name}"),
            PathElement::Key(pairs) => {
                let mut out = String::from("k:{");
                for (i, (name, value)) in pairs.iter().enumerate() {
                    if i > 0 {
                        out.push(',');
                    }
                    out.push_str(&Value::String(name.clone()).to_string());
                    out.push(':');
                    out.push_str(value);
                }
                out.push('}');
                out
            }
            PathElement::Value(value) => format!("v:{value}"),
            PathElement::Index(index) => format!("i:{index}"),
        }
    }

    /// Decodes a FieldsV1 object key.
    pub fn decode(s: &str) -> Result<Self, FieldPathError> {
        if s.len() < 2 {
            return Err(FieldPathError::ElementTooShort(s.to_string()));
        }
        if let Some(name) = s.strip_prefix("f:") {
            return Ok(PathElement::Field(name.to_string()));
        }
        if let Some(raw) = s.strip_prefix("k:") {
            let parsed: Value =
                serde_json::from_str(raw).map_err(|e| FieldPathError::InvalidKey {
                    element: s.to_string(),
                    reason: e.to_string(),
                })?;
            let Value::Object(fields) = parsed else {
                return Err(FieldPathError::InvalidKey {
                    element: s.to_string(),
                    reason: format!("expected an object, found {}", json_kind(&parsed)),
                });
            };
            return Ok(PathElement::key(fields.iter().map(|(k, v)| (k.as_str(), v))));
        }
        if let Some(raw) = s.strip_prefix("v:") {
            let parsed: Value =
                serde_json::from_str(raw).map_err(|e| FieldPathError::InvalidValue {
                    element: s.to_string(),
                    reason: e.to_string(),
                })?;
            return Ok(PathElement::value(&parsed));
        }
        if let Some(raw) = s.strip_prefix("i:") {
            let index = raw
                .parse::<usize>()
                .map_err(|_| FieldPathError::InvalidIndex(s.to_string()))?;
            return Ok(PathElement::Index(index));
        }
        Err(FieldPathError::UnknownPrefix(s.to_string()))
    }
}

impl fmt::Display for PathElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathElement::Field(name) => write!(f, ".{name}"),
            PathElement::Key(pairs) => {
                f.write_str("[")?;
                for (i, (name, value)) in pairs.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{name}={value}")?;
                }
                f.write_str("]")
            }
            PathElement::Value(value) => write!(f, "[={value}]"),
            PathElement::Index(index) => write!(f, "[{index}]"),
        }
    }
}

/// Serializes `value` with object keys sorted and no whitespace.
pub(crate) fn canonical_json(value: &Value) -> String {
    let mut out = String::new();
    write_canonical(value, &mut out);
    out
}

fn write_canonical(value: &Value, out: &mut String) {
    match value {
        Value::Array(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_canonical(item, out);
            }
            out.push(']');
        }
        Value::Object(map) => {
            let mut keys: Vec<&String> = map.keys().collect();
            keys.sort();
            out.push('{');
            for (i, key) in keys.into_iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                out.push_str(&Value::String(key.clone()).to_string());
                out.push(':');
                write_canonical(&map[key.as_str()], out);
            }
            out.push('}');
        }
        scalar => out.push_str(&scalar.to_string()),
    }
}

pub(crate) fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
