//! Read and write access to the metadata an upgrade needs.
//!
//! Implemented for typed [`ObjectMeta`] and for untyped JSON objects
//! (`serde_json::Value`), where the metadata lives under `"metadata"`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::AccessorError;
use crate::managed_fields::ManagedFieldsEntry;

pub trait MetaAccessor {
    /// The object's managed fields, or `None` when it has none.
    fn managed_fields(&self) -> Result<Option<Vec<ManagedFieldsEntry>>, AccessorError>;

    /// The optimistic-concurrency token; empty when unset.
    fn resource_version(&self) -> Result<String, AccessorError>;
}

pub trait MetaAccessorMut: MetaAccessor {
    /// Replaces the managed fields; `None` removes them.
    fn set_managed_fields(
        &mut self,
        managed_fields: Option<Vec<ManagedFieldsEntry>>,
    ) -> Result<(), AccessorError>;
}

/// The subset of object metadata this crate reads and writes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectMeta {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub namespace: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub resource_version: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub labels: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub annotations: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub managed_fields: Option<Vec<ManagedFieldsEntry>>,
}

impl MetaAccessor for ObjectMeta {
    fn managed_fields(&self) -> Result<Option<Vec<ManagedFieldsEntry>>, AccessorError> {
        Ok(self.managed_fields.clone())
    }

    fn resource_version(&self) -> Result<String, AccessorError> {
        Ok(self.resource_version.clone())
    }
}

impl MetaAccessorMut for ObjectMeta {
    fn set_managed_fields(
        &mut self,
        managed_fields: Option<Vec<ManagedFieldsEntry>>,
    ) -> Result<(), AccessorError> {
        self.managed_fields = managed_fields;
        Ok(())
    }
}

// ── Untyped JSON objects ──────────────────────────────────────────────────

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn metadata(obj: &Value) -> Result<Option<&Map<String, Value>>, AccessorError> {
    let root = obj
        .as_object()
        .ok_or_else(|| AccessorError::NotAnObject(kind(obj)))?;
    match root.get("metadata") {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Object(meta)) => Ok(Some(meta)),
        Some(_) => Err(AccessorError::InvalidMetadata),
    }
}

fn metadata_mut(obj: &mut Value) -> Result<&mut Map<String, Value>, AccessorError> {
    let found = kind(obj);
    let root = obj
        .as_object_mut()
        .ok_or(AccessorError::NotAnObject(found))?;
    let meta = root
        .entry("metadata")
        .or_insert_with(|| Value::Object(Map::new()));
    if meta.is_null() {
        *meta = Value::Object(Map::new());
    }
    meta.as_object_mut().ok_or(AccessorError::InvalidMetadata)
}

impl MetaAccessor for Value {
    fn managed_fields(&self) -> Result<Option<Vec<ManagedFieldsEntry>>, AccessorError> {
        let Some(meta) = metadata(self)? else {
            return Ok(None);
        };
        match meta.get("managedFields") {
            None | Some(Value::Null) => Ok(None),
            Some(raw) => Vec::<ManagedFieldsEntry>::deserialize(raw)
                .map(Some)
                .map_err(AccessorError::InvalidManagedFields),
        }
    }

    fn resource_version(&self) -> Result<String, AccessorError> {
        let Some(meta) = metadata(self)? else {
            return Ok(String::new());
        };
        match meta.get("resourceVersion") {
            None | Some(Value::Null) => Ok(String::new()),
            Some(Value::String(rv)) => Ok(rv.clone()),
            Some(_) => Err(AccessorError::InvalidResourceVersion),
        }
    }
}

impl MetaAccessorMut for Value {
    fn set_managed_fields(
        &mut self,
        managed_fields: Option<Vec<ManagedFieldsEntry>>,
    ) -> Result<(), AccessorError> {
        let encoded = match managed_fields {
            Some(entries) => {
                Some(serde_json::to_value(entries).map_err(AccessorError::InvalidManagedFields)?)
            }
            None => None,
        };
        let meta = metadata_mut(self)?;
        match encoded {
            Some(value) => {
                meta.insert("managedFields".to_string(), value);
            }
            None => {
                meta.remove("managedFields");
            }
        }
        Ok(())
    }
}
