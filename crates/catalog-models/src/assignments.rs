//! Namespace assignment records.
//!
//! Role assignments returned by the catalog are polymorphic: the wire `type`
//! key selects one of the grant variants.

use catalog_json_type::{Discriminator, RecordDescriptor, TypeRef};

pub const USER_OR_ROLE: &str = "UserOrRole";
pub const NAMESPACE_ASSIGNMENT: &str = "NamespaceAssignment";
pub const UPDATE_NAMESPACE_ASSIGNMENTS_REQUEST: &str = "UpdateNamespaceAssignmentsRequest";
pub const NAMESPACE_ASSIGNMENT_PASS_GRANTS: &str = "NamespaceAssignmentPassGrants";
pub const NAMESPACE_ASSIGNMENT_MANAGE_GRANTS: &str = "NamespaceAssignmentManageGrants";
pub const NAMESPACE_ASSIGNMENT_OWNERSHIP: &str = "NamespaceAssignmentOwnership";
pub const NAMESPACE_ROLE_ASSIGNMENT: &str = "NamespaceRoleAssignment";
pub const GET_NAMESPACE_ASSIGNMENTS_RESPONSE: &str = "GetNamespaceAssignmentsResponse";

/// Wire key that selects a [`NAMESPACE_ROLE_ASSIGNMENT`] variant.
pub const ASSIGNMENT_TYPE_KEY: &str = "type";

/// Grant literal and variant record, in declaration order.
const GRANTS: [(&str, &str); 3] = [
    ("pass_grants", NAMESPACE_ASSIGNMENT_PASS_GRANTS),
    ("manage_grants", NAMESPACE_ASSIGNMENT_MANAGE_GRANTS),
    ("ownership", NAMESPACE_ASSIGNMENT_OWNERSHIP),
];

/// A `{role, type}` record whose `type` admits exactly one literal.
fn grant(record: &str, literal: &str) -> RecordDescriptor {
    RecordDescriptor::new(record)
        .prop("role", TypeRef::str())
        .prop(
            ASSIGNMENT_TYPE_KEY,
            TypeRef::enumeration(format!("{record}.TypeEnum"), [literal]),
        )
}

pub fn descriptors() -> Vec<RecordDescriptor> {
    let mut out = vec![
        RecordDescriptor::new(USER_OR_ROLE)
            .prop("user", TypeRef::str())
            .prop("role", TypeRef::str()),
        RecordDescriptor::new(NAMESPACE_ASSIGNMENT)
            .opt("user", TypeRef::str())
            .prop("role", TypeRef::str()),
        RecordDescriptor::new(UPDATE_NAMESPACE_ASSIGNMENTS_REQUEST)
            .opt("deletes", TypeRef::array(TypeRef::record(NAMESPACE_ASSIGNMENT)))
            .opt("writes", TypeRef::array(TypeRef::record(NAMESPACE_ASSIGNMENT))),
    ];
    out.extend(GRANTS.iter().map(|(literal, record)| grant(record, literal)));

    let discriminator = GRANTS
        .iter()
        .fold(Discriminator::new(ASSIGNMENT_TYPE_KEY), |d, (literal, record)| {
            d.variant(*literal, *record)
        });
    out.push(RecordDescriptor::union(NAMESPACE_ROLE_ASSIGNMENT, discriminator));
    out.push(RecordDescriptor::new(GET_NAMESPACE_ASSIGNMENTS_RESPONSE).prop(
        "assignments",
        TypeRef::array(TypeRef::record(NAMESPACE_ROLE_ASSIGNMENT)),
    ));
    out
}
