//! Namespace and tabular records.

use catalog_json_type::{RecordDescriptor, TypeRef};

pub const TABULAR_IDENT_UUID: &str = "TabularIdentUuid";
pub const GET_NAMESPACE_RESPONSE: &str = "GetNamespaceResponse";
pub const DELETION_DETAILS: &str = "DeletionDetails";

pub const TABULAR_TYPES: [&str; 2] = ["table", "view"];

pub fn descriptors() -> Vec<RecordDescriptor> {
    vec![
        RecordDescriptor::new(TABULAR_IDENT_UUID)
            .prop("type", TypeRef::enumeration("TabularType", TABULAR_TYPES))
            .prop("id", TypeRef::uuid()),
        RecordDescriptor::new(GET_NAMESPACE_RESPONSE)
            .prop("namespace", TypeRef::array(TypeRef::str()))
            .prop_as("namespaceId", "namespace_id", TypeRef::uuid())
            .prop_as("warehouseId", "warehouse_id", TypeRef::uuid())
            .opt("properties", TypeRef::map(TypeRef::str())),
        RecordDescriptor::new(DELETION_DETAILS)
            .prop_as("expirationTaskId", "expiration_task_id", TypeRef::uuid())
            .prop_as("expirationDate", "expiration_date", TypeRef::date_time())
            .prop_as("deletedAt", "deleted_at", TypeRef::date_time())
            .prop_as("createdAt", "created_at", TypeRef::date_time()),
    ]
}
