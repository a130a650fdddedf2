//! JSON Patch apply logic.

use serde_json::Value;

use super::codec::format_pointer;
use super::types::{Op, PatchError};

// ── Path navigation ───────────────────────────────────────────────────────

fn get_at<'a>(doc: &'a Value, path: &[String]) -> Option<&'a Value> {
    doc.pointer(&format_pointer(path))
}

fn get_mut_at<'a>(doc: &'a mut Value, path: &[String]) -> Result<&'a mut Value, PatchError> {
    doc.pointer_mut(&format_pointer(path))
        .ok_or(PatchError::NotFound)
}

// ── Individual operation applicators ─────────────────────────────────────

fn apply_add(doc: &mut Value, path: &[String], value: Value) -> Result<(), PatchError> {
    let Some((key, parent_path)) = path.split_last() else {
        *doc = value;
        return Ok(());
    };
    match get_mut_at(doc, parent_path)? {
        Value::Object(map) => {
            map.insert(key.clone(), value);
            Ok(())
        }
        Value::Array(arr) => {
            if key == "-" {
                arr.push(value);
                return Ok(());
            }
            let idx: usize = key.parse().map_err(|_| PatchError::InvalidIndex)?;
            if idx > arr.len() {
                return Err(PatchError::InvalidIndex);
            }
            arr.insert(idx, value);
            Ok(())
        }
        _ => Err(PatchError::InvalidTarget),
    }
}

fn apply_remove(doc: &mut Value, path: &[String]) -> Result<(), PatchError> {
    let Some((key, parent_path)) = path.split_last() else {
        return Err(PatchError::InvalidTarget);
    };
    match get_mut_at(doc, parent_path)? {
        Value::Object(map) => map.remove(key).map(|_| ()).ok_or(PatchError::NotFound),
        Value::Array(arr) => {
            let idx: usize = key.parse().map_err(|_| PatchError::InvalidIndex)?;
            if idx >= arr.len() {
                return Err(PatchError::NotFound);
            }
            arr.remove(idx);
            Ok(())
        }
        _ => Err(PatchError::InvalidTarget),
    }
}

/// Replace requires the target to exist.
fn apply_replace(doc: &mut Value, path: &[String], value: Value) -> Result<(), PatchError> {
    let target = get_mut_at(doc, path)?;
    *target = value;
    Ok(())
}

fn apply_test(doc: &Value, path: &[String], value: &Value) -> Result<(), PatchError> {
    let actual = get_at(doc, path).ok_or(PatchError::NotFound)?;
    if actual == value {
        Ok(())
    } else {
        Err(PatchError::Test)
    }
}

// ── Public API ────────────────────────────────────────────────────────────

pub fn apply_op(doc: &mut Value, op: &Op) -> Result<(), PatchError> {
    match op {
        Op::Add { path, value } => apply_add(doc, path, value.clone()),
        Op::Remove { path } => apply_remove(doc, path),
        Op::Replace { path, value } => apply_replace(doc, path, value.clone()),
        Op::Test { path, value } => apply_test(doc, path, value),
    }
}

/// Applies `ops` in order to an owned document. The document is consumed;
/// on error the partially patched copy is dropped.
pub fn apply_patch(mut doc: Value, ops: &[Op]) -> Result<Value, PatchError> {
    for op in ops {
        apply_op(&mut doc, op)?;
    }
    Ok(doc)
}

// ── Tests ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn path(s: &str) -> Vec<String> {
        s.split('/').filter(|p| !p.is_empty()).map(|s| s.to_string()).collect()
    }

    #[test]
    fn add_to_object_and_array() {
        let mut doc = json!({"a": [1, 3]});
        apply_op(&mut doc, &Op::Add { path: path("b"), value: json!(2) }).unwrap();
        apply_op(&mut doc, &Op::Add { path: path("a/1"), value: json!(2) }).unwrap();
        apply_op(&mut doc, &Op::Add { path: path("a/-"), value: json!(4) }).unwrap();
        assert_eq!(doc, json!({"a": [1, 2, 3, 4], "b": 2}));
    }

    #[test]
    fn remove_missing_key_fails() {
        let mut doc = json!({"a": 1});
        assert_eq!(
            apply_op(&mut doc, &Op::Remove { path: path("b") }),
            Err(PatchError::NotFound)
        );
        apply_op(&mut doc, &Op::Remove { path: path("a") }).unwrap();
        assert_eq!(doc, json!({}));
    }

    #[test]
    fn replace_requires_existing_target() {
        let mut doc = json!({"metadata": {"resourceVersion": "1"}});
        apply_op(
            &mut doc,
            &Op::Replace { path: path("metadata/resourceVersion"), value: json!("2") },
        )
        .unwrap();
        assert_eq!(doc["metadata"]["resourceVersion"], json!("2"));
        assert_eq!(
            apply_op(&mut doc, &Op::Replace { path: path("metadata/uid"), value: json!("x") }),
            Err(PatchError::NotFound)
        );
    }

    #[test]
    fn test_op_compares_values() {
        let doc = json!({"a": {"b": [1]}});
        assert!(apply_patch(doc.clone(), &[Op::Test { path: path("a/b"), value: json!([1]) }]).is_ok());
        assert_eq!(
            apply_patch(doc, &[Op::Test { path: path("a/b"), value: json!([2]) }]),
            Err(PatchError::Test)
        );
    }

    #[test]
    fn replace_root() {
        let doc = apply_patch(json!(1), &[Op::Replace { path: vec![], value: json!({"x": 1}) }]).unwrap();
        assert_eq!(doc, json!({"x": 1}));
    }
}
