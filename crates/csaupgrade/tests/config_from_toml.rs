mod common;

use std::fs;

use common::{apply, fixtures_dir, object, update};
use csaupgrade::{ConfigError, UpgradeConfig, UpgradeError};
use serde_json::json;

fn load(name: &str) -> UpgradeConfig {
    let data = fs::read_to_string(fixtures_dir().join(name)).expect("read config fixture");
    toml::from_str(&data).expect("parse config fixture")
}

#[test]
fn loads_and_runs_configured_upgrade() {
    let config = load("upgrade.toml");
    assert_eq!(config.csa_manager_names, vec!["kubectl-edit", "cluster-network-operator"]);
    assert_eq!(config.ssa_manager_name, "cluster-network-operator/operconfig");
    config.validate().unwrap();

    let mut obj = object(
        &[
            update("cluster-network-operator", "v1", json!({"f:spec": {"f:mtu": {}}})),
            apply("cluster-network-operator/operconfig", "v1", json!({"f:spec": {"f:mode": {}}})),
            update("kubectl-edit", "v1", json!({"f:metadata": {"f:labels": {"f:team": {}}}})),
        ],
        "900",
    );
    assert!(config.upgrade_patch(&obj).unwrap().is_some());

    config.upgrade(&mut obj).unwrap();
    assert_eq!(
        obj["metadata"]["managedFields"],
        json!([{
            "manager": "cluster-network-operator/operconfig",
            "operation": "Apply",
            "apiVersion": "v1",
            "time": "2024-05-01T10:00:00Z",
            "fieldsType": "FieldsV1",
            "fieldsV1": {
                "f:metadata": {"f:labels": {"f:team": {}}},
                "f:spec": {"f:mode": {}, "f:mtu": {}}
            }
        }])
    );
    assert!(config.upgrade_patch(&obj).unwrap().is_none());
}

#[test]
fn rejects_config_without_ssa_manager() {
    let config: UpgradeConfig =
        toml::from_str("csaManagerNames = [\"a\"]\nssaManagerName = \"\"\n").unwrap();
    let err = config.upgrade_patch(&object(&[], "1")).unwrap_err();
    assert!(matches!(err, UpgradeError::Config(ConfigError::EmptySsaManagerName)));
}
