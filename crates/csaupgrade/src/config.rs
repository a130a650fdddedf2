//! Which managers to upgrade, in a form that can be loaded from a file.
//!
//! ```
//! use csaupgrade::config::UpgradeConfig;
//!
//! let config: UpgradeConfig = serde_json::from_str(
//!     r#"{"csaManagerNames": ["operator"], "ssaManagerName": "operator-ssa"}"#,
//! ).unwrap();
//! config.validate().unwrap();
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::accessor::{MetaAccessor, MetaAccessorMut};
use crate::error::UpgradeError;
use crate::upgrade::{upgrade_managed_fields, upgrade_managed_fields_patch};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("ssaManagerName must not be empty")]
    EmptySsaManagerName,
    #[error("csaManagerNames must not be empty")]
    NoCsaManagers,
    #[error("csaManagerNames[{0}] must not be empty")]
    EmptyCsaManagerName(usize),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UpgradeConfig {
    /// Managers whose `Update` entries are folded into the SSA manager, in
    /// the order they are processed.
    pub csa_manager_names: Vec<String>,
    pub ssa_manager_name: String,
}

impl UpgradeConfig {
    pub fn new<I, S>(csa_manager_names: I, ssa_manager_name: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            csa_manager_names: csa_manager_names.into_iter().map(Into::into).collect(),
            ssa_manager_name: ssa_manager_name.into(),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.ssa_manager_name.is_empty() {
            return Err(ConfigError::EmptySsaManagerName);
        }
        if self.csa_manager_names.is_empty() {
            return Err(ConfigError::NoCsaManagers);
        }
        if let Some(i) = self.csa_manager_names.iter().position(String::is_empty) {
            return Err(ConfigError::EmptyCsaManagerName(i));
        }
        Ok(())
    }

    /// Validates the configuration, then builds the upgrade patch for `obj`.
    pub fn upgrade_patch<O>(&self, obj: &O) -> Result<Option<Vec<u8>>, UpgradeError>
    where
        O: MetaAccessor + ?Sized,
    {
        self.validate()?;
        upgrade_managed_fields_patch(obj, &self.csa_manager_names, &self.ssa_manager_name)
    }

    /// Validates the configuration, then upgrades `obj` in place.
    pub fn upgrade<O>(&self, obj: &mut O) -> Result<(), UpgradeError>
    where
        O: MetaAccessorMut + ?Sized,
    {
        self.validate()?;
        upgrade_managed_fields(obj, &self.csa_manager_names, &self.ssa_manager_name)
    }
}
