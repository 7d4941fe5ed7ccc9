//! Error types for descriptor construction and marshaling.

use thiserror::Error;

use crate::constants::MarshalErrorKind;
use crate::path::{FieldPath, PathSegment};

/// Errors raised while translating between records and wire values.
///
/// Every variant carries the path of the first field that failed, in the
/// descriptor's declaration order.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MarshalError {
    #[error("missing required field `{path}`")]
    MissingField { path: FieldPath },
    #[error("invalid enum value {value:?} at `{path}`, expected one of {expected:?}")]
    InvalidEnumValue {
        path: FieldPath,
        value: String,
        expected: Vec<String>,
    },
    #[error("type mismatch at `{path}`: expected {expected}, found {found}")]
    TypeMismatch {
        path: FieldPath,
        expected: String,
        found: String,
    },
    #[error("unknown record type `{name}` at `{path}`")]
    UnknownRecordType { path: FieldPath, name: String },
    #[error("field `{path}` is not declared by the record")]
    UnknownField { path: FieldPath },
}

impl MarshalError {
    pub(crate) fn missing(path: impl Into<FieldPath>) -> Self {
        Self::MissingField { path: path.into() }
    }

    pub(crate) fn mismatch(expected: impl ToString, found: impl ToString) -> Self {
        Self::TypeMismatch {
            path: FieldPath::root(),
            expected: expected.to_string(),
            found: found.to_string(),
        }
    }

    pub(crate) fn invalid_enum<'a>(
        value: impl Into<String>,
        expected: impl IntoIterator<Item = &'a str>,
    ) -> Self {
        Self::InvalidEnumValue {
            path: FieldPath::root(),
            value: value.into(),
            expected: expected.into_iter().map(str::to_string).collect(),
        }
    }

    pub fn kind(&self) -> MarshalErrorKind {
        match self {
            Self::MissingField { .. } => MarshalErrorKind::MissingField,
            Self::InvalidEnumValue { .. } => MarshalErrorKind::InvalidEnumValue,
            Self::TypeMismatch { .. } => MarshalErrorKind::TypeMismatch,
            Self::UnknownRecordType { .. } => MarshalErrorKind::UnknownRecordType,
            Self::UnknownField { .. } => MarshalErrorKind::UnknownField,
        }
    }

    pub fn path(&self) -> &FieldPath {
        match self {
            Self::MissingField { path }
            | Self::InvalidEnumValue { path, .. }
            | Self::TypeMismatch { path, .. }
            | Self::UnknownRecordType { path, .. }
            | Self::UnknownField { path } => path,
        }
    }

    fn path_mut(&mut self) -> &mut FieldPath {
        match self {
            Self::MissingField { path }
            | Self::InvalidEnumValue { path, .. }
            | Self::TypeMismatch { path, .. }
            | Self::UnknownRecordType { path, .. }
            | Self::UnknownField { path } => path,
        }
    }

    /// Re-roots the error one level down, under `segment`.
    pub(crate) fn within(mut self, segment: PathSegment) -> Self {
        self.path_mut().prepend(segment);
        self
    }
}

/// Errors raised while validating descriptors or building a registry.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SchemaError {
    #[error("NAME_EMPTY: record name must not be empty")]
    EmptyRecordName,
    #[error("KEY_EMPTY: `{record}` declares a field with an empty name")]
    EmptyFieldName { record: String },
    #[error("DUPLICATE_FIELD: `{record}.{field}` is declared twice")]
    DuplicateField { record: String, field: String },
    #[error("DUPLICATE_WIRE_NAME: wire name `{wire_name}` is used twice in `{record}`")]
    DuplicateWireName { record: String, wire_name: String },
    #[error("ENUM_EMPTY: enum `{0}` declares no literals")]
    EmptyEnum(String),
    #[error("ENUM_DUPLICATE: enum `{name}` declares `{literal}` twice")]
    DuplicateEnumLiteral { name: String, literal: String },
    #[error("UNION_FIELDS: union `{0}` must not declare fields of its own")]
    UnionWithFields(String),
    #[error("UNION_EMPTY: union `{0}` maps no variants")]
    EmptyUnion(String),
    #[error("UNION_DUPLICATE: union `{record}` maps `{literal}` twice")]
    DuplicateVariant { record: String, literal: String },
    #[error("UNION_NESTED: union `{record}` maps `{literal}` to union `{target}`")]
    NestedUnion {
        record: String,
        literal: String,
        target: String,
    },
    #[error(
        "UNION_LITERAL: union `{record}` maps `{literal}` to `{target}`, \
         whose `{field}` does not admit it"
    )]
    VariantLiteralMismatch {
        record: String,
        literal: String,
        target: String,
        field: String,
    },
    #[error("DUPLICATE_RECORD: `{0}` is registered twice")]
    DuplicateRecord(String),
    #[error("REF_UNKNOWN: `{record}` references unregistered record `{target}`")]
    UnknownReference { record: String, target: String },
}
