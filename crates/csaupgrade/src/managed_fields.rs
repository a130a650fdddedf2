//! Managed fields entries: one entry per (manager, operation, apiVersion,
//! subresource) recording which fields that writer owns.
//!
//! An object's entries form an ordered history, most recent first. Nothing
//! here sorts them; searches take the first match as the most recent one.

use std::fmt;

use fieldpath::Set;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::CodecError;

/// How the manager wrote its fields.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ManagedFieldsOperation {
    /// Declarative (server-side apply) write.
    Apply,
    /// Imperative (client-side) write.
    Update,
    /// Any other operation string, carried through unchanged.
    Other(String),
}

impl ManagedFieldsOperation {
    pub fn as_str(&self) -> &str {
        match self {
            ManagedFieldsOperation::Apply => "Apply",
            ManagedFieldsOperation::Update => "Update",
            ManagedFieldsOperation::Other(s) => s,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.as_str().is_empty()
    }
}

impl Default for ManagedFieldsOperation {
    fn default() -> Self {
        ManagedFieldsOperation::Other(String::new())
    }
}

impl From<String> for ManagedFieldsOperation {
    fn from(s: String) -> Self {
        match s.as_str() {
            "Apply" => ManagedFieldsOperation::Apply,
            "Update" => ManagedFieldsOperation::Update,
            _ => ManagedFieldsOperation::Other(s),
        }
    }
}

impl From<ManagedFieldsOperation> for String {
    fn from(op: ManagedFieldsOperation) -> Self {
        match op {
            ManagedFieldsOperation::Other(s) => s,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for ManagedFieldsOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One entry of `metadata.managedFields`.
///
/// Fields serialize in the same order and under the same names as the
/// Kubernetes API, with empty values omitted. `time` and `fields_type` are
/// never interpreted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManagedFieldsEntry {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub manager: String,
    #[serde(default, skip_serializing_if = "ManagedFieldsOperation::is_empty")]
    pub operation: ManagedFieldsOperation,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub api_version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub fields_type: String,
    /// FieldsV1 trie of owned paths.
    #[serde(rename = "fieldsV1", default, skip_serializing_if = "Option::is_none")]
    pub fields_v1: Option<Value>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub subresource: String,
}

impl ManagedFieldsEntry {
    /// True for a main-resource entry written by `manager` with `operation`.
    pub(crate) fn is_main_resource_write(
        &self,
        manager: &str,
        operation: &ManagedFieldsOperation,
    ) -> bool {
        self.manager == manager && &self.operation == operation && self.subresource.is_empty()
    }
}

/// Decodes the entry's FieldsV1 payload into a [`Set`].
pub fn decode_managed_fields_entry_set(entry: &ManagedFieldsEntry) -> Result<Set, CodecError> {
    let raw = entry
        .fields_v1
        .as_ref()
        .ok_or_else(|| CodecError::MissingFields {
            manager: entry.manager.clone(),
        })?;
    Set::from_json(raw).map_err(|source| CodecError::Decode {
        manager: entry.manager.clone(),
        source,
    })
}

/// Stores `set` as the entry's FieldsV1 payload.
pub fn encode_managed_fields_entry_set(entry: &mut ManagedFieldsEntry, set: &Set) {
    entry.fields_v1 = Some(set.to_json());
}
