//! Record descriptors for the catalog management API.
//!
//! The descriptor table is built once, on first use, and shared by every
//! caller for the life of the process.

use std::sync::LazyLock;

use catalog_json_type::{
    MarshalError, MarshalOptions, Marshaler, Record, RecordDescriptor, Registry, SchemaError,
};
use serde_json::Value as JsonValue;
use thiserror::Error;
use tracing::error;

pub mod assignments;
pub mod namespace;
pub mod users;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CatalogError {
    #[error(transparent)]
    Schema(#[from] SchemaError),
    #[error(transparent)]
    Marshal(#[from] MarshalError),
}

static CATALOG: LazyLock<Result<Registry, SchemaError>> = LazyLock::new(|| {
    Registry::builder()
        .records(descriptors())
        .build()
        .inspect_err(|err| error!(%err, "catalog descriptor table is invalid"))
});

/// Every catalog record descriptor, in registration order.
pub fn descriptors() -> Vec<RecordDescriptor> {
    let mut out = users::descriptors();
    out.extend(assignments::descriptors());
    out.extend(namespace::descriptors());
    out
}

pub fn registry() -> Result<&'static Registry, CatalogError> {
    (*CATALOG).as_ref().map_err(|err| err.clone().into())
}

pub fn get_field_map(name: &str) -> Result<&'static RecordDescriptor, CatalogError> {
    Ok(registry()?.get_field_map(name)?)
}

pub fn marshaler() -> Result<Marshaler<'static>, CatalogError> {
    marshaler_with(MarshalOptions::default())
}

pub fn marshaler_with(options: MarshalOptions) -> Result<Marshaler<'static>, CatalogError> {
    Ok(registry()?.marshaler_with(options))
}

/// Serializes `record` against the descriptor named by its type name.
pub fn serialize(record: &Record) -> Result<JsonValue, CatalogError> {
    Ok(marshaler()?.serialize_by_name(record, record.type_name())?)
}

/// Deserializes `wire` into a record of the descriptor registered as `name`.
pub fn deserialize(wire: &JsonValue, name: &str) -> Result<Record, CatalogError> {
    Ok(marshaler()?.deserialize_by_name(wire, name)?)
}
