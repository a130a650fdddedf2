//! Upgrades client-side-apply managed fields to server-side apply.
//!
//! Objects that were written with imperative updates carry `Update`
//! managed fields entries. Once the same writer switches to server-side
//! apply, those entries must be folded into its `Apply` entry, or fields
//! it stops setting are never removed. This crate computes that migration
//! as either a JSON patch or an in-place update.
//!
//! # Example
//!
//! ```
//! use csaupgrade::upgrade_managed_fields_patch;
//! use serde_json::json;
//!
//! let obj = json!({
//!     "metadata": {
//!         "resourceVersion": "12",
//!         "managedFields": [{
//!             "manager": "operator",
//!             "operation": "Update",
//!             "apiVersion": "v1",
//!             "fieldsType": "FieldsV1",
//!             "fieldsV1": {"f:data": {"f:key": {}}}
//!         }]
//!     }
//! });
//!
//! let patch = upgrade_managed_fields_patch(&obj, ["operator"], "operator-ssa")
//!     .unwrap()
//!     .expect("entries changed");
//! let ops: serde_json::Value = serde_json::from_slice(&patch).unwrap();
//! assert_eq!(ops[0]["value"][0]["manager"], "operator-ssa");
//! assert_eq!(ops[1], json!({"op": "replace", "path": "/metadata/resourceVersion", "value": "12"}));
//!
//! // Already upgraded: no patch.
//! let upgraded = csaupgrade::json_patch::apply_patch(
//!     obj,
//!     &csaupgrade::json_patch::from_json_patch(&ops).unwrap(),
//! ).unwrap();
//! assert!(upgrade_managed_fields_patch(&upgraded, ["operator"], "operator-ssa").unwrap().is_none());
//! ```

pub mod accessor;
pub mod config;
pub mod error;
pub mod json_patch;
pub mod managed_fields;
pub mod upgrade;

pub use accessor::{MetaAccessor, MetaAccessorMut, ObjectMeta};
pub use config::{ConfigError, UpgradeConfig};
pub use error::{AccessorError, CodecError, UpgradeError};
pub use managed_fields::{ManagedFieldsEntry, ManagedFieldsOperation};
pub use upgrade::{
    union_manager_into_index, upgrade_managed_fields, upgrade_managed_fields_patch,
    upgraded_managed_fields,
};
