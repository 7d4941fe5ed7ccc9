//! Descriptor-driven marshaling between records and JSON wire values.
//!
//! One generic recursive encoder/decoder replaces per-type generated
//! serialization code: the [`RecordDescriptor`] is the only place field
//! names, wire names, optionality and nested types are recorded.

mod decode;
mod encode;
pub mod options;

pub use options::MarshalOptions;

use serde_json::Value as JsonValue;
use tracing::{debug, instrument};

use crate::error::MarshalError;
use crate::registry::Registry;
use crate::schema::RecordDescriptor;
use crate::value::Record;

/// Translates records to and from wire values against a [`Registry`].
///
/// Holds only shared borrows, so it is cheap to copy and safe to use from
/// many threads at once.
#[derive(Debug, Clone, Copy)]
pub struct Marshaler<'r> {
    registry: &'r Registry,
    options: MarshalOptions,
}

impl<'r> Marshaler<'r> {
    pub fn new(registry: &'r Registry) -> Self {
        Self::with_options(registry, MarshalOptions::default())
    }

    pub fn with_options(registry: &'r Registry, options: MarshalOptions) -> Self {
        Self { registry, options }
    }

    pub fn registry(&self) -> &'r Registry {
        self.registry
    }

    pub fn options(&self) -> &MarshalOptions {
        &self.options
    }

    /// Serializes `record` into a wire object holding only declared wire keys.
    ///
    /// Absent optional fields are omitted, never written as `null`. Paths in
    /// errors use logical field names.
    #[instrument(level = "debug", skip_all, fields(record = %descriptor.name))]
    pub fn serialize(
        &self,
        record: &Record,
        descriptor: &RecordDescriptor,
    ) -> Result<JsonValue, MarshalError> {
        encode::encode_record(self, record, descriptor)
            .map(JsonValue::Object)
            .inspect_err(|err| {
                debug!(kind = err.kind().name(), path = %err.path(), "serialize failed")
            })
    }

    /// Serializes against the descriptor registered under `name`.
    pub fn serialize_by_name(
        &self,
        record: &Record,
        name: &str,
    ) -> Result<JsonValue, MarshalError> {
        let descriptor = self.registry.get_field_map(name)?;
        self.serialize(record, descriptor)
    }

    /// Deserializes a wire value into a record.
    ///
    /// Unknown keys are dropped unless [`MarshalOptions::deny_unknown_keys`]
    /// is set. Paths in errors use wire names.
    #[instrument(level = "debug", skip_all, fields(record = %descriptor.name))]
    pub fn deserialize(
        &self,
        wire: &JsonValue,
        descriptor: &RecordDescriptor,
    ) -> Result<Record, MarshalError> {
        decode::decode_record(self, wire, descriptor)
            .inspect_err(|err| {
                debug!(kind = err.kind().name(), path = %err.path(), "deserialize failed")
            })
    }

    /// Deserializes against the descriptor registered under `name`.
    pub fn deserialize_by_name(
        &self,
        wire: &JsonValue,
        name: &str,
    ) -> Result<Record, MarshalError> {
        let descriptor = self.registry.get_field_map(name)?;
        self.deserialize(wire, descriptor)
    }
}

/// JSON shape name used in mismatch reports.
pub(crate) fn json_kind(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "boolean",
        JsonValue::Number(_) => "number",
        JsonValue::String(_) => "string",
        JsonValue::Array(_) => "array",
        JsonValue::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::constants::MarshalErrorKind;
    use crate::schema::TypeRef;

    fn registry() -> Registry {
        Registry::builder()
            .record(
                RecordDescriptor::new("UserOrRole")
                    .prop("user", TypeRef::str())
                    .prop("role", TypeRef::str()),
            )
            .build()
            .unwrap()
    }

    #[test]
    fn by_name_entry_points() {
        let registry = registry();
        let m = registry.marshaler();
        let record = Record::new("UserOrRole")
            .with("user", "u1")
            .with("role", "viewer");
        let wire = m.serialize_by_name(&record, "UserOrRole").unwrap();
        assert_eq!(wire, json!({"user": "u1", "role": "viewer"}));
        assert_eq!(m.deserialize_by_name(&wire, "UserOrRole").unwrap(), record);
    }

    #[test]
    fn by_name_miss_is_unknown_record_type() {
        let registry = registry();
        let m = registry.marshaler();
        let err = m.deserialize_by_name(&json!({}), "Missing").unwrap_err();
        assert_eq!(err.kind(), MarshalErrorKind::UnknownRecordType);
        let err = m
            .serialize_by_name(&Record::new("Missing"), "Missing")
            .unwrap_err();
        assert_eq!(err.kind(), MarshalErrorKind::UnknownRecordType);
    }

    #[test]
    fn options_are_carried() {
        let registry = registry();
        let m = registry.marshaler_with(MarshalOptions::strict());
        assert!(m.options().deny_unknown_keys);
        assert_eq!(m.registry().len(), 1);
    }

    #[test]
    fn json_kind_names() {
        assert_eq!(json_kind(&json!(null)), "null");
        assert_eq!(json_kind(&json!(true)), "boolean");
        assert_eq!(json_kind(&json!(1)), "number");
        assert_eq!(json_kind(&json!("s")), "string");
        assert_eq!(json_kind(&json!([])), "array");
        assert_eq!(json_kind(&json!({})), "object");
    }
}
