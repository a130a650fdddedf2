//! JSON codec for JSON Patch operations.

use serde_json::{Map, Value};

use super::types::{Op, PatchError, Path};

// ── Path helpers ──────────────────────────────────────────────────────────

/// Formats reference tokens as a JSON Pointer (RFC 6901).
pub fn format_pointer(path: &[String]) -> String {
    let mut out = String::new();
    for token in path {
        out.push('/');
        if token.contains('~') || token.contains('/') {
            out.push_str(&token.replace('~', "~0").replace('/', "~1"));
        } else {
            out.push_str(token);
        }
    }
    out
}

/// Parses a JSON Pointer into unescaped reference tokens.
pub fn parse_pointer(pointer: &str) -> Result<Path, PatchError> {
    if pointer.is_empty() {
        return Ok(Vec::new());
    }
    let rest = pointer
        .strip_prefix('/')
        .ok_or_else(|| PatchError::InvalidOp(format!("invalid pointer: {pointer}")))?;
    Ok(rest
        .split('/')
        .map(|token| token.replace("~1", "/").replace("~0", "~"))
        .collect())
}

fn decode_path(op: &Map<String, Value>) -> Result<Path, PatchError> {
    let s = op
        .get("path")
        .and_then(Value::as_str)
        .ok_or_else(|| PatchError::InvalidOp("path must be a string".into()))?;
    parse_pointer(s)
}

fn decode_value(op: &Map<String, Value>) -> Result<Value, PatchError> {
    op.get("value")
        .cloned()
        .ok_or_else(|| PatchError::InvalidOp("missing value".into()))
}

// ── Serialization ─────────────────────────────────────────────────────────

/// Serializes an `Op` in the JSON Patch format. Keys are emitted in
/// `op`, `path`, `value` order.
pub fn to_json(op: &Op) -> Value {
    let mut m = Map::new();
    m.insert("op".into(), Value::String(op.op_name().into()));
    m.insert("path".into(), Value::String(format_pointer(op.path())));
    match op {
        Op::Add { value, .. } | Op::Replace { value, .. } | Op::Test { value, .. } => {
            m.insert("value".into(), value.clone());
        }
        Op::Remove { .. } => {}
    }
    Value::Object(m)
}

pub fn to_json_patch(ops: &[Op]) -> Value {
    Value::Array(ops.iter().map(to_json).collect())
}

// ── Deserialization ───────────────────────────────────────────────────────

pub fn from_json(v: &Value) -> Result<Op, PatchError> {
    let op = v
        .as_object()
        .ok_or_else(|| PatchError::InvalidOp("op must be an object".into()))?;
    let name = op
        .get("op")
        .and_then(Value::as_str)
        .ok_or_else(|| PatchError::InvalidOp("missing op".into()))?;
    let path = decode_path(op)?;
    match name {
        "add" => Ok(Op::Add {
            path,
            value: decode_value(op)?,
        }),
        "remove" => Ok(Op::Remove { path }),
        "replace" => Ok(Op::Replace {
            path,
            value: decode_value(op)?,
        }),
        "test" => Ok(Op::Test {
            path,
            value: decode_value(op)?,
        }),
        other => Err(PatchError::InvalidOp(format!("unsupported op: {other}"))),
    }
}

pub fn from_json_patch(v: &Value) -> Result<Vec<Op>, PatchError> {
    v.as_array()
        .ok_or_else(|| PatchError::InvalidOp("patch must be an array".into()))?
        .iter()
        .map(from_json)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn p(tokens: &[&str]) -> Path {
        tokens.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn pointer_escaping() {
        assert_eq!(format_pointer(&p(&["a/b", "c~d"])), "/a~1b/c~0d");
        assert_eq!(parse_pointer("/a~1b/c~0d").unwrap(), p(&["a/b", "c~d"]));
        assert_eq!(format_pointer(&[]), "");
        assert_eq!(parse_pointer("").unwrap(), Path::new());
        assert!(parse_pointer("nope").is_err());
    }

    #[test]
    fn replace_serializes_in_key_order() {
        let op = Op::Replace {
            path: p(&["metadata", "resourceVersion"]),
            value: json!("7"),
        };
        assert_eq!(
            serde_json::to_string(&to_json(&op)).unwrap(),
            r#"{"op":"replace","path":"/metadata/resourceVersion","value":"7"}"#
        );
    }

    #[test]
    fn remove_has_no_value() {
        let op = Op::Remove { path: p(&["a"]) };
        assert_eq!(to_json(&op), json!({"op": "remove", "path": "/a"}));
    }

    #[test]
    fn decodes_patch_documents() {
        let ops = from_json_patch(&json!([
            {"op": "test", "path": "/a", "value": 1},
            {"op": "add", "path": "/b", "value": [1]},
            {"op": "remove", "path": "/c"},
            {"op": "replace", "path": "", "value": {}}
        ]))
        .unwrap();
        assert_eq!(
            ops,
            vec![
                Op::Test { path: p(&["a"]), value: json!(1) },
                Op::Add { path: p(&["b"]), value: json!([1]) },
                Op::Remove { path: p(&["c"]) },
                Op::Replace { path: vec![], value: json!({}) },
            ]
        );
    }

    #[test]
    fn rejects_malformed_ops() {
        assert!(from_json(&json!({"op": "move", "path": "/a", "from": "/b"})).is_err());
        assert!(from_json(&json!({"op": "add", "path": "/a"})).is_err());
        assert!(from_json(&json!({"path": "/a"})).is_err());
        assert!(from_json_patch(&json!({})).is_err());
    }
}
