//! Field ownership sets.
//!
//! A [`Set`] records which field paths of an object a writer owns. Sets are
//! stored on objects in the FieldsV1 trie encoding, where every object key
//! is a serialized [`PathElement`] and the special key `"."` marks the
//! enclosing element itself as owned.
//!
//! # Example
//!
//! ```
//! use fieldpath::Set;
//! use serde_json::json;
//!
//! let a = Set::from_json(&json!({"f:spec": {"f:replicas": {}}})).unwrap();
//! let b = Set::from_json(&json!({"f:spec": {"f:paused": {}}})).unwrap();
//!
//! let both = a.union(&b);
//! assert_eq!(both.len(), 2);
//! assert_eq!(
//!     both.to_json(),
//!     json!({"f:spec": {"f:paused": {}, "f:replicas": {}}})
//! );
//! ```

use thiserror::Error;

pub mod element;
pub mod path;
pub mod serialize;
pub mod set;

pub use element::PathElement;
pub use path::Path;
pub use set::Set;

/// Errors produced while decoding a FieldsV1 payload.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FieldPathError {
    #[error("invalid FieldsV1 JSON: {0}")]
    InvalidJson(String),
    #[error("expected a JSON object or null, found {0}")]
    NotAnObject(&'static str),
    #[error("path element is too short: {0:?}")]
    ElementTooShort(String),
    #[error("unknown path element prefix in {0:?}")]
    UnknownPrefix(String),
    #[error("invalid list index in {0:?}")]
    InvalidIndex(String),
    #[error("invalid key element {element:?}: {reason}")]
    InvalidKey { element: String, reason: String },
    #[error("invalid value element {element:?}: {reason}")]
    InvalidValue { element: String, reason: String },
}
