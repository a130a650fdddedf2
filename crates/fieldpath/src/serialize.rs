//! FieldsV1 JSON codec for [`Set`].
//!
//! ```text
//! {"f:metadata": {"f:labels": {".": {}, "f:app": {}}}}
//! ```
//!
//! Every key is an encoded [`PathElement`]. A node whose object holds no
//! element keys is a member leaf; a node holding `"."` is a member that also
//! has children.

use serde_json::{Map, Value};

use crate::element::json_kind;
use crate::{FieldPathError, PathElement, Set};

const MEMBER_MARKER: &str = ".";

impl Set {
    /// Decodes a FieldsV1 trie. `null` decodes to the empty set.
    pub fn from_json(value: &Value) -> Result<Set, FieldPathError> {
        match value {
            Value::Null => Ok(Set::new()),
            Value::Object(map) => Ok(read_node(map)?.0),
            other => Err(FieldPathError::NotAnObject(json_kind(other))),
        }
    }

    /// Parses and decodes FieldsV1 JSON text.
    pub fn from_json_str(s: &str) -> Result<Set, FieldPathError> {
        let value: Value =
            serde_json::from_str(s).map_err(|e| FieldPathError::InvalidJson(e.to_string()))?;
        Set::from_json(&value)
    }

    /// Encodes the set as a FieldsV1 trie.
    pub fn to_json(&self) -> Value {
        Value::Object(write_node(self))
    }
}

/// Returns the children found under `map` and whether the enclosing element
/// is itself a member.
fn read_node(map: &Map<String, Value>) -> Result<(Set, bool), FieldPathError> {
    let mut set = Set::new();
    let mut marked = false;
    let mut has_elements = false;
    for (key, child) in map {
        if key == MEMBER_MARKER {
            marked = true;
            continue;
        }
        has_elements = true;
        let element = PathElement::decode(key)?;
        let child_map = match child {
            Value::Object(child_map) => child_map,
            other => return Err(FieldPathError::NotAnObject(json_kind(other))),
        };
        let (grandchildren, is_member) = read_node(child_map)?;
        if is_member {
            set.insert_member(element.clone());
        }
        set.insert_child(element, grandchildren);
    }
    Ok((set, marked || !has_elements))
}

fn write_node(set: &Set) -> Map<String, Value> {
    let mut out = Map::new();
    for (element, is_member, child) in set.entries() {
        let mut node = Map::new();
        if let Some(child) = child {
            if is_member {
                node.insert(MEMBER_MARKER.to_string(), Value::Object(Map::new()));
            }
            node.extend(write_node(child));
        }
        out.insert(element.encode(), Value::Object(node));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Path;
    use serde_json::json;

    #[test]
    fn decodes_leaves_and_marked_parents() {
        let set = Set::from_json(&json!({
            "f:metadata": {
                "f:labels": {".": {}, "f:app": {}}
            },
            "f:spec": {"f:replicas": {}}
        }))
        .unwrap();
        assert!(set.has(&Path::fields(["metadata", "labels"])));
        assert!(set.has(&Path::fields(["metadata", "labels", "app"])));
        assert!(set.has(&Path::fields(["spec", "replicas"])));
        assert!(!set.has(&Path::fields(["metadata"])));
        assert!(!set.has(&Path::fields(["spec"])));
        assert_eq!(set.len(), 3);
    }

    #[test]
    fn null_and_empty_object_decode_to_empty_set() {
        assert!(Set::from_json(&Value::Null).unwrap().is_empty());
        assert!(Set::from_json(&json!({})).unwrap().is_empty());
    }

    #[test]
    fn encodes_member_marker_first() {
        let mut set = Set::new();
        set.insert(Path::fields(["metadata", "labels", "app"]));
        set.insert(Path::fields(["metadata", "labels"]));
        let encoded = serde_json::to_string(&set.to_json()).unwrap();
        assert_eq!(encoded, r#"{"f:metadata":{"f:labels":{".":{},"f:app":{}}}}"#);
    }

    #[test]
    fn list_elements_survive_encoding() {
        let raw = json!({
            "f:spec": {
                "f:containers": {
                    "k:{\"name\":\"web\"}": {
                        ".": {},
                        "f:image": {},
                        "f:ports": {"i:0": {}}
                    }
                },
                "f:finalizers": {"v:\"keep\"": {}}
            }
        });
        let set = Set::from_json(&raw).unwrap();
        assert_eq!(set.len(), 4);
        assert_eq!(Set::from_json(&set.to_json()).unwrap(), set);
    }

    #[test]
    fn rejects_non_object_nodes() {
        assert_eq!(
            Set::from_json(&json!([])),
            Err(FieldPathError::NotAnObject("array"))
        );
        assert_eq!(
            Set::from_json(&json!({"f:spec": true})),
            Err(FieldPathError::NotAnObject("boolean"))
        );
    }

    #[test]
    fn rejects_bad_element_keys() {
        assert_eq!(
            Set::from_json(&json!({"q:spec": {}})),
            Err(FieldPathError::UnknownPrefix("q:spec".into()))
        );
    }

    #[test]
    fn from_json_str_parses_text() {
        let set = Set::from_json_str(r#"{"f:data":{"f:key":{}}}"#).unwrap();
        assert!(set.has(&Path::fields(["data", "key"])));
        assert!(Set::from_json_str("{").is_err());
    }
}
