//! User search records.

use catalog_json_type::{RecordDescriptor, TypeRef};

pub const SEARCH_USER_REQUEST: &str = "SearchUserRequest";
pub const SEARCH_USER: &str = "SearchUser";
pub const SEARCH_USER_RESPONSE: &str = "SearchUserResponse";

pub const USER_TYPES: [&str; 2] = ["application", "human"];

pub fn user_type() -> TypeRef {
    TypeRef::enumeration("UserType", USER_TYPES)
}

pub fn descriptors() -> Vec<RecordDescriptor> {
    vec![
        RecordDescriptor::new(SEARCH_USER_REQUEST)
            .prop("search", TypeRef::str())
            .describe("Search users by name or email"),
        RecordDescriptor::new(SEARCH_USER)
            .prop("id", TypeRef::str())
            .prop("name", TypeRef::str())
            .opt("email", TypeRef::str())
            .prop_as("userType", "user_type", user_type()),
        RecordDescriptor::new(SEARCH_USER_RESPONSE)
            .prop("users", TypeRef::array(TypeRef::record(SEARCH_USER)))
            .describe("Search result for users"),
    ]
}
