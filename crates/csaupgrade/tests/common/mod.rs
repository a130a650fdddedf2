#![allow(dead_code)]

use std::fs;
use std::path::PathBuf;

use csaupgrade::{ManagedFieldsEntry, ManagedFieldsOperation};
use serde::Deserialize;
use serde_json::{json, Value};

pub fn entry(
    manager: &str,
    operation: ManagedFieldsOperation,
    api_version: &str,
    fields: Value,
) -> ManagedFieldsEntry {
    ManagedFieldsEntry {
        manager: manager.to_string(),
        operation,
        api_version: api_version.to_string(),
        time: Some("2024-05-01T10:00:00Z".to_string()),
        fields_type: "FieldsV1".to_string(),
        fields_v1: Some(fields),
        subresource: String::new(),
    }
}

pub fn update(manager: &str, api_version: &str, fields: Value) -> ManagedFieldsEntry {
    entry(manager, ManagedFieldsOperation::Update, api_version, fields)
}

pub fn apply(manager: &str, api_version: &str, fields: Value) -> ManagedFieldsEntry {
    entry(manager, ManagedFieldsOperation::Apply, api_version, fields)
}

/// A ConfigMap-shaped object carrying `entries` and `resource_version`.
pub fn object(entries: &[ManagedFieldsEntry], resource_version: &str) -> Value {
    json!({
        "apiVersion": "v1",
        "kind": "ConfigMap",
        "metadata": {
            "name": "settings",
            "namespace": "default",
            "resourceVersion": resource_version,
            "managedFields": entries,
        },
        "data": {"key": "value"}
    })
}

// ── Fixtures ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpgradeFixture {
    pub name: String,
    pub object: Value,
    pub csa_manager_names: Vec<String>,
    pub ssa_manager_name: String,
    /// `null` when no patch is expected.
    pub expected_managed_fields: Option<Value>,
}

pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

pub fn load_upgrade_fixtures() -> Vec<UpgradeFixture> {
    let path = fixtures_dir().join("upgrade_cases.json");
    let data = fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("failed to read {}: {e}", path.display()));
    serde_json::from_str(&data).unwrap_or_else(|e| panic!("invalid {}: {e}", path.display()))
}
