use fieldpath::FieldPathError;
use thiserror::Error;

use crate::config::ConfigError;

/// The object does not expose metadata in the expected shape.
#[derive(Debug, Error)]
pub enum AccessorError {
    #[error("object is not a JSON object, found {0}")]
    NotAnObject(&'static str),
    #[error("metadata is not a JSON object")]
    InvalidMetadata,
    #[error("invalid metadata.managedFields: {0}")]
    InvalidManagedFields(#[source] serde_json::Error),
    #[error("metadata.resourceVersion is not a string")]
    InvalidResourceVersion,
}

/// A managed fields entry's FieldsV1 payload could not be decoded.
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("managed fields entry of {manager:?} has no fieldsV1 payload")]
    MissingFields { manager: String },
    #[error("failed to convert fields of {manager:?} to set: {source}")]
    Decode {
        manager: String,
        #[source]
        source: FieldPathError,
    },
}

#[derive(Debug, Error)]
pub enum UpgradeError {
    #[error(transparent)]
    Accessor(#[from] AccessorError),
    #[error(transparent)]
    Codec(#[from] CodecError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("failed to copy managed fields: copied {copied} of {expected} entries")]
    Copy { expected: usize, copied: usize },
    #[error("target index {index} out of bounds for {len} managed fields entries")]
    TargetIndex { index: usize, len: usize },
    #[error("failed to serialize patch: {0}")]
    Serialize(#[from] serde_json::Error),
}
