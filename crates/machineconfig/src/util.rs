use std::collections::{BTreeMap, BTreeSet};

use crate::types::{MachineConfig, MachineConfigPoolStatus};

/// Annotation marking a machine config as created by the user for IPsec.
pub const USER_DEFINED_IPSEC_MACHINE_CONFIG_ANNOTATION: (&str, &str) =
    ("user-ipsec-machine-config", "true");

pub fn user_defined_ipsec_machine_config_annotation() -> BTreeMap<String, String> {
    let (key, value) = USER_DEFINED_IPSEC_MACHINE_CONFIG_ANNOTATION;
    BTreeMap::from([(key.to_string(), value.to_string())])
}

/// True if the machine config carries every user-defined IPsec annotation
/// with the expected value.
pub fn is_user_defined_ipsec_machine_config(machine_config: Option<&MachineConfig>) -> bool {
    let Some(machine_config) = machine_config else {
        return false;
    };
    is_subset(
        &machine_config.metadata.annotations,
        &user_defined_ipsec_machine_config_annotation(),
    )
}

/// True once every machine in the pool is updated and all of
/// `machine_configs` are among the pool's rendered sources.
pub fn are_machine_configs_rendered_on_pool(
    status: &MachineConfigPoolStatus,
    machine_configs: &BTreeSet<String>,
) -> bool {
    status.machine_count == status.updated_machine_count
        && check_source(status, machine_configs, |sources, wanted| {
            sources.is_superset(wanted)
        })
}

/// True once every machine in the pool is updated and none of
/// `machine_configs` are among the pool's rendered sources.
pub fn are_machine_configs_removed_from_pool(
    status: &MachineConfigPoolStatus,
    machine_configs: &BTreeSet<String>,
) -> bool {
    status.machine_count == status.updated_machine_count
        && check_source(status, machine_configs, |sources, wanted| {
            sources.is_disjoint(wanted)
        })
}

fn is_subset(annotations: &BTreeMap<String, String>, wanted: &BTreeMap<String, String>) -> bool {
    wanted
        .iter()
        .all(|(key, value)| annotations.get(key) == Some(value))
}

fn check_source(
    status: &MachineConfigPoolStatus,
    machine_configs: &BTreeSet<String>,
    test: impl Fn(&BTreeSet<String>, &BTreeSet<String>) -> bool,
) -> bool {
    let sources: BTreeSet<String> = status
        .configuration
        .source
        .iter()
        .map(|source| source.name.clone())
        .collect();
    test(&sources, machine_configs)
}
