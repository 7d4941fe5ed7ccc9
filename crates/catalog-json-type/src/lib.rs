//! Descriptor-driven JSON marshaling for typed REST client models.
//!
//! Records are described once by [`RecordDescriptor`]s collected into an
//! immutable [`Registry`]; a single [`Marshaler`] then translates
//! [`Record`] instances to and from `serde_json` wire values.
//!
//! # Overview
//!
//! - [`TypeRef`] - primitive, enum, record, array and map type references
//! - [`RecordDescriptor`] - ordered fields with logical and wire names
//! - [`Registry`] - validated descriptor table, looked up by record name
//! - [`Marshaler`] - `serialize` / `deserialize` against a descriptor
//! - [`MarshalError`] - failures carrying the path of the first bad field
//!
//! # Example
//!
//! ```
//! use catalog_json_type::{Record, RecordDescriptor, Registry, TypeRef};
//! use serde_json::json;
//!
//! let registry = Registry::builder()
//!     .record(
//!         RecordDescriptor::new("SearchUser")
//!             .prop("id", TypeRef::str())
//!             .opt("email", TypeRef::str())
//!             .prop_as(
//!                 "userType",
//!                 "user_type",
//!                 TypeRef::enumeration("UserType", ["application", "human"]),
//!             ),
//!     )
//!     .build()
//!     .unwrap();
//!
//! let m = registry.marshaler();
//! let user = Record::new("SearchUser")
//!     .with("id", "u1")
//!     .with("userType", "human");
//! let wire = m.serialize_by_name(&user, "SearchUser").unwrap();
//! assert_eq!(wire, json!({"id": "u1", "user_type": "human"}));
//! assert_eq!(m.deserialize_by_name(&wire, "SearchUser").unwrap(), user);
//! ```

pub mod constants;
pub mod error;
pub mod marshal;
pub mod path;
pub mod registry;
pub mod schema;
pub mod value;

pub use constants::MarshalErrorKind;
pub use error::{MarshalError, SchemaError};
pub use marshal::{MarshalOptions, Marshaler};
pub use path::{FieldPath, PathSegment};
pub use registry::{Registry, RegistryBuilder};
pub use schema::{
    validate_record, Discriminator, EnumType, FieldDescriptor, Primitive, RecordDescriptor,
    TypeRef,
};
pub use value::{DateTime, Record, Utc, Uuid, Value};
