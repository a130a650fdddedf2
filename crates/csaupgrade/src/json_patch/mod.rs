//! JSON Patch (RFC 6902) operations used by managed fields upgrades.
//!
//! Only `add`, `remove`, `replace` and `test` are modelled.

pub mod apply;
pub mod codec;
pub mod types;

pub use apply::{apply_op, apply_patch};
pub use codec::{format_pointer, from_json, from_json_patch, parse_pointer, to_json, to_json_patch};
pub use types::{Op, PatchError, Path};
