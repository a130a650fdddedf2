//! Moves field ownership recorded for client-side-apply (`Update`) managers
//! onto a single server-side-apply (`Apply`) manager.
//!
//! Three layers, leaf first:
//!
//! - [`union_manager_into_index`] folds one CSA entry's fields into a target
//!   entry.
//! - [`upgraded_managed_fields`] finds or creates the SSA entry for one CSA
//!   manager, merges into it, and drops that manager's `Update` entries.
//! - [`upgrade_managed_fields_patch`] runs the above for every CSA manager
//!   and emits a JSON patch when anything changed. [`upgrade_managed_fields`]
//!   commits the same result to the object instead.
//!
//! Only main-resource entries (empty `subresource`) are migrated.

use serde_json::Value;
use tracing::{debug, trace};

use crate::accessor::{MetaAccessor, MetaAccessorMut};
use crate::error::UpgradeError;
use crate::json_patch::{to_json_patch, Op};
use crate::managed_fields::{
    decode_managed_fields_entry_set, encode_managed_fields_entry_set, ManagedFieldsEntry,
    ManagedFieldsOperation,
};

/// Computes a JSON patch that upgrades `obj`'s managed fields, or `None` if
/// there is nothing to do.
///
/// The patch replaces `/metadata/managedFields` with the migrated list and
/// replaces `/metadata/resourceVersion` with the version read here, so the
/// write fails with a conflict if the object changed in between. A `test`
/// op would be rejected earlier as an invalid request instead of surfacing
/// as a conflict.
///
/// CSA managers are processed in iteration order.
pub fn upgrade_managed_fields_patch<O, I, S>(
    obj: &O,
    csa_manager_names: I,
    ssa_manager_name: &str,
) -> Result<Option<Vec<u8>>, UpgradeError>
where
    O: MetaAccessor + ?Sized,
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let managed_fields = obj.managed_fields()?;
    let resource_version = obj.resource_version()?;

    let filtered = upgrade_all(managed_fields.as_deref(), csa_manager_names, ssa_manager_name)?;
    if filtered == managed_fields {
        trace!(ssa_manager_name, "managed fields already upgraded");
        return Ok(None);
    }

    let patch = vec![
        Op::Replace {
            path: vec!["metadata".into(), "managedFields".into()],
            value: serde_json::to_value(&filtered)?,
        },
        Op::Replace {
            path: vec!["metadata".into(), "resourceVersion".into()],
            value: Value::String(resource_version),
        },
    ];
    debug!(
        ssa_manager_name,
        before = managed_fields.as_ref().map_or(0, Vec::len),
        after = filtered.as_ref().map_or(0, Vec::len),
        "built managed fields upgrade patch"
    );
    Ok(Some(serde_json::to_vec(&to_json_patch(&patch))?))
}

/// Upgrades `obj`'s managed fields in place.
///
/// The object is only written once every CSA manager has been migrated; on
/// error it is left as it was.
pub fn upgrade_managed_fields<O, I, S>(
    obj: &mut O,
    csa_manager_names: I,
    ssa_manager_name: &str,
) -> Result<(), UpgradeError>
where
    O: MetaAccessorMut + ?Sized,
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let managed_fields = obj.managed_fields()?;
    let filtered = upgrade_all(managed_fields.as_deref(), csa_manager_names, ssa_manager_name)?;
    obj.set_managed_fields(filtered)?;
    Ok(())
}

fn upgrade_all<I, S>(
    managed_fields: Option<&[ManagedFieldsEntry]>,
    csa_manager_names: I,
    ssa_manager_name: &str,
) -> Result<Option<Vec<ManagedFieldsEntry>>, UpgradeError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut filtered = managed_fields.map(<[ManagedFieldsEntry]>::to_vec);
    for csa_manager_name in csa_manager_names {
        filtered = upgraded_managed_fields(
            filtered.as_deref(),
            csa_manager_name.as_ref(),
            ssa_manager_name,
        )?;
    }
    Ok(filtered)
}

/// Returns a copy of `managed_fields` with `csa_manager_name`'s `Update`
/// entries folded into the `Apply` entry of `ssa_manager_name`.
///
/// If no SSA entry exists, the most recent matching CSA entry is converted
/// into one. If there is neither, the copy is returned unchanged. An empty
/// result is returned as `None`.
pub fn upgraded_managed_fields(
    managed_fields: Option<&[ManagedFieldsEntry]>,
    csa_manager_name: &str,
    ssa_manager_name: &str,
) -> Result<Option<Vec<ManagedFieldsEntry>>, UpgradeError> {
    let Some(managed_fields) = managed_fields else {
        return Ok(None);
    };

    let mut entries = Vec::with_capacity(managed_fields.len());
    entries.extend_from_slice(managed_fields);
    if entries.len() != managed_fields.len() {
        return Err(UpgradeError::Copy {
            expected: managed_fields.len(),
            copied: entries.len(),
        });
    }

    let replace_index = match find_first_index(&entries, |entry| {
        entry.is_main_resource_write(ssa_manager_name, &ManagedFieldsOperation::Apply)
    }) {
        Some(index) => {
            trace!(csa_manager_name, ssa_manager_name, index, "found ssa manager entry");
            index
        }
        None => {
            // Entries are sorted most recent first.
            let Some(index) = find_first_index(&entries, |entry| {
                entry.is_main_resource_write(csa_manager_name, &ManagedFieldsOperation::Update)
            }) else {
                trace!(csa_manager_name, "no csa manager entries to upgrade");
                return Ok(Some(entries));
            };
            let entry = &mut entries[index];
            entry.operation = ManagedFieldsOperation::Apply;
            entry.manager = ssa_manager_name.to_string();
            debug!(csa_manager_name, ssa_manager_name, index, "converted csa entry into ssa entry");
            index
        }
    };

    union_manager_into_index(&mut entries, replace_index, csa_manager_name)?;

    let filtered = filter(entries, |entry| {
        !entry.is_main_resource_write(csa_manager_name, &ManagedFieldsOperation::Update)
    });
    Ok(filtered)
}

/// Unions the fields of `csa_manager_name`'s most recent `Update` entry with
/// the same `apiVersion` into the entry at `target_index`. No other entry
/// is modified.
///
/// CSA entries recorded under a different `apiVersion` are not merged.
pub fn union_manager_into_index(
    entries: &mut [ManagedFieldsEntry],
    target_index: usize,
    csa_manager_name: &str,
) -> Result<(), UpgradeError> {
    let len = entries.len();
    let target = entries.get(target_index).ok_or(UpgradeError::TargetIndex {
        index: target_index,
        len,
    })?;

    // TODO: subresource entries could be migrated too once callers can say
    // which subresources they own.
    let csa_index = find_first_index(entries, |entry| {
        entry.is_main_resource_write(csa_manager_name, &ManagedFieldsOperation::Update)
            && entry.api_version == target.api_version
    });

    let target_set = decode_managed_fields_entry_set(target)?;
    let Some(csa_index) = csa_index else {
        trace!(csa_manager_name, api_version = %target.api_version, "no csa entry to merge");
        return Ok(());
    };

    let csa_set = decode_managed_fields_entry_set(&entries[csa_index])?;
    let combined = target_set.union(&csa_set);
    encode_managed_fields_entry_set(&mut entries[target_index], &combined);
    Ok(())
}

fn find_first_index<T>(collection: &[T], predicate: impl FnMut(&T) -> bool) -> Option<usize> {
    collection.iter().position(predicate)
}

fn filter<T>(mut collection: Vec<T>, predicate: impl FnMut(&T) -> bool) -> Option<Vec<T>> {
    collection.retain(predicate);
    if collection.is_empty() {
        None
    } else {
        Some(collection)
    }
}
