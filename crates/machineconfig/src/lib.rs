//! Helpers for inspecting machine configs and machine config pools.
//!
//! ```
//! use std::collections::BTreeSet;
//! use machineconfig::{are_machine_configs_rendered_on_pool, MachineConfigPoolStatus};
//!
//! let status: MachineConfigPoolStatus = serde_json::from_str(r#"{
//!     "machineCount": 3,
//!     "updatedMachineCount": 3,
//!     "configuration": {"source": [{"name": "80-ipsec-master-extensions"}]}
//! }"#).unwrap();
//!
//! let wanted = BTreeSet::from(["80-ipsec-master-extensions".to_string()]);
//! assert!(are_machine_configs_rendered_on_pool(&status, &wanted));
//! ```

pub mod types;
pub mod util;

pub use types::{
    MachineConfig, MachineConfigMeta, MachineConfigPoolStatus, MachineConfigPoolStatusConfiguration,
    ObjectReference,
};
pub use util::{
    are_machine_configs_removed_from_pool, are_machine_configs_rendered_on_pool,
    is_user_defined_ipsec_machine_config, user_defined_ipsec_machine_config_annotation,
    USER_DEFINED_IPSEC_MACHINE_CONFIG_ANNOTATION,
};
