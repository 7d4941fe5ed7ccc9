use catalog_json_type::{
    DateTime, MarshalError, MarshalErrorKind, MarshalOptions, Record, Utc, Uuid, Value,
};
use catalog_models::assignments::{
    GET_NAMESPACE_ASSIGNMENTS_RESPONSE, NAMESPACE_ASSIGNMENT, NAMESPACE_ASSIGNMENT_MANAGE_GRANTS,
    NAMESPACE_ASSIGNMENT_OWNERSHIP, NAMESPACE_ASSIGNMENT_PASS_GRANTS, NAMESPACE_ROLE_ASSIGNMENT,
    UPDATE_NAMESPACE_ASSIGNMENTS_REQUEST, USER_OR_ROLE,
};
use catalog_models::namespace::{DELETION_DETAILS, GET_NAMESPACE_RESPONSE, TABULAR_IDENT_UUID};
use catalog_models::users::{SEARCH_USER, SEARCH_USER_RESPONSE};
use catalog_models::{deserialize, get_field_map, marshaler_with, serialize, CatalogError};
use serde_json::json;

fn marshal_kind(err: CatalogError) -> (MarshalErrorKind, String) {
    match err {
        CatalogError::Marshal(err) => (err.kind(), err.path().to_string()),
        other => panic!("unexpected error {other}"),
    }
}

fn assignment(user: &str, role: &str) -> Record {
    Record::new(NAMESPACE_ASSIGNMENT)
        .with("user", user)
        .with("role", role)
}

#[test]
fn pass_grants_enum_law() {
    let record = deserialize(
        &json!({"role": "admin", "type": "pass_grants"}),
        NAMESPACE_ASSIGNMENT_PASS_GRANTS,
    )
    .unwrap();
    assert_eq!(record.get("type").and_then(Value::as_str), Some("pass_grants"));
    assert_eq!(record.get("role").and_then(Value::as_str), Some("admin"));

    let err = deserialize(
        &json!({"role": "admin", "type": "bogus"}),
        NAMESPACE_ASSIGNMENT_PASS_GRANTS,
    )
    .unwrap_err();
    assert_eq!(
        err,
        CatalogError::Marshal(MarshalError::InvalidEnumValue {
            path: "type".into(),
            value: "bogus".into(),
            expected: vec!["pass_grants".into()],
        })
    );
}

#[test]
fn search_user_collection_law() {
    let wire = json!({"users": [
        {"id": "1", "name": "Ada", "email": "ada@example.com", "user_type": "human"},
        {"id": "2", "name": "ci-bot", "user_type": "application"},
    ]});
    let response = deserialize(&wire, SEARCH_USER_RESPONSE).unwrap();
    let users = response.get("users").and_then(Value::as_list).unwrap();
    assert_eq!(users.len(), 2);

    let first = users[0].as_record().unwrap();
    assert_eq!(first.type_name(), SEARCH_USER);
    assert_eq!(first.get("userType").and_then(Value::as_str), Some("human"));
    let second = users[1].as_record().unwrap();
    assert_eq!(second.get("id").and_then(Value::as_str), Some("2"));
    assert!(!second.contains("email"));

    let empty = deserialize(&json!({"users": []}), SEARCH_USER_RESPONSE).unwrap();
    assert_eq!(empty.get("users"), Some(&Value::List(Vec::new())));

    assert_eq!(serialize(&response).unwrap(), wire);
}

#[test]
fn search_user_type_is_validated() {
    let wire = json!({"users": [
        {"id": "1", "name": "Ada", "user_type": "human"},
        {"id": "2", "name": "Bob", "user_type": "robot"},
    ]});
    let (kind, path) = marshal_kind(deserialize(&wire, SEARCH_USER_RESPONSE).unwrap_err());
    assert_eq!(kind, MarshalErrorKind::InvalidEnumValue);
    assert_eq!(path, "users.1.user_type");
}

#[test]
fn update_assignments_end_to_end() {
    let request = Record::new(UPDATE_NAMESPACE_ASSIGNMENTS_REQUEST)
        .with("deletes", Value::list(Vec::<Value>::new()))
        .with("writes", Value::list([assignment("u1", "viewer")]));
    let wire = serialize(&request).unwrap();
    assert_eq!(
        wire,
        json!({"deletes": [], "writes": [{"user": "u1", "role": "viewer"}]})
    );
    assert_eq!(
        deserialize(&wire, UPDATE_NAMESPACE_ASSIGNMENTS_REQUEST).unwrap(),
        request
    );

    let only_writes = Record::new(UPDATE_NAMESPACE_ASSIGNMENTS_REQUEST)
        .with("writes", Value::list([assignment("u1", "viewer")]));
    let wire = serialize(&only_writes).unwrap();
    assert_eq!(wire, json!({"writes": [{"user": "u1", "role": "viewer"}]}));
}

#[test]
fn update_assignments_error_path() {
    let request = Record::new(UPDATE_NAMESPACE_ASSIGNMENTS_REQUEST).with(
        "writes",
        Value::list([
            assignment("u1", "viewer"),
            Record::new(NAMESPACE_ASSIGNMENT).with("user", "u2"),
        ]),
    );
    let (kind, path) = marshal_kind(serialize(&request).unwrap_err());
    assert_eq!(kind, MarshalErrorKind::MissingField);
    assert_eq!(path, "writes.1.role");
}

#[test]
fn user_or_role_requires_both_keys() {
    let err = deserialize(&json!({"role": "viewer"}), USER_OR_ROLE).unwrap_err();
    assert_eq!(
        err,
        CatalogError::Marshal(MarshalError::MissingField {
            path: "user".into()
        })
    );
}

#[test]
fn role_assignments_union() {
    let wire = json!({"assignments": [
        {"role": "r1", "type": "ownership"},
        {"type": "manage_grants", "role": "r2"},
        {"role": "r3", "type": "pass_grants", "granted_at": "2024-01-01"},
    ]});
    let response = deserialize(&wire, GET_NAMESPACE_ASSIGNMENTS_RESPONSE).unwrap();
    let variants: Vec<&str> = response
        .get("assignments")
        .and_then(Value::as_list)
        .unwrap()
        .iter()
        .map(|a| a.as_record().unwrap().type_name())
        .collect();
    assert_eq!(
        variants,
        [
            NAMESPACE_ASSIGNMENT_OWNERSHIP,
            NAMESPACE_ASSIGNMENT_MANAGE_GRANTS,
            NAMESPACE_ASSIGNMENT_PASS_GRANTS,
        ]
    );

    let out = serialize(&response).unwrap();
    assert_eq!(
        out,
        json!({"assignments": [
            {"role": "r1", "type": "ownership"},
            {"role": "r2", "type": "manage_grants"},
            {"role": "r3", "type": "pass_grants"},
        ]})
    );
}

#[test]
fn role_assignment_discriminator_failures() {
    let (kind, path) = marshal_kind(
        deserialize(&json!({"role": "r1"}), NAMESPACE_ROLE_ASSIGNMENT).unwrap_err(),
    );
    assert_eq!(kind, MarshalErrorKind::MissingField);
    assert_eq!(path, "type");

    let (kind, path) = marshal_kind(
        deserialize(
            &json!({"assignments": [{"role": "r1", "type": "superuser"}]}),
            GET_NAMESPACE_ASSIGNMENTS_RESPONSE,
        )
        .unwrap_err(),
    );
    assert_eq!(kind, MarshalErrorKind::InvalidEnumValue);
    assert_eq!(path, "assignments.0.type");

    let strict = marshaler_with(MarshalOptions::strict()).unwrap();
    let ok = strict.deserialize_by_name(
        &json!({"role": "r1", "type": "ownership"}),
        NAMESPACE_ROLE_ASSIGNMENT,
    );
    assert_eq!(ok.unwrap().type_name(), NAMESPACE_ASSIGNMENT_OWNERSHIP);
}

#[test]
fn role_assignment_serialize_conflicting_literal() {
    let record = Record::new(NAMESPACE_ASSIGNMENT_OWNERSHIP)
        .with("role", "r1")
        .with("type", "pass_grants");
    let descriptor = get_field_map(NAMESPACE_ROLE_ASSIGNMENT).unwrap();
    let m = marshaler_with(MarshalOptions::default()).unwrap();
    let err = m.serialize(&record, descriptor).unwrap_err();
    assert_eq!(err.kind(), MarshalErrorKind::InvalidEnumValue);
    assert_eq!(err.path().to_string(), "type");
}

#[test]
fn namespace_response_with_properties() {
    let namespace_id = Uuid::from_u128(1);
    let warehouse_id = Uuid::from_u128(2);
    let wire = json!({
        "namespace": ["finance", "reports"],
        "namespace_id": namespace_id.to_string(),
        "warehouse_id": warehouse_id.to_string(),
        "properties": {"owner": "ada", "location": "s3://bucket/finance"},
    });
    let response = deserialize(&wire, GET_NAMESPACE_RESPONSE).unwrap();
    assert_eq!(
        response.get("namespaceId").and_then(Value::as_uuid),
        Some(&namespace_id)
    );
    let properties = response.get("properties").and_then(Value::as_map).unwrap();
    assert_eq!(
        properties.get("owner").and_then(Value::as_str),
        Some("ada")
    );
    assert_eq!(serialize(&response).unwrap(), wire);

    let mut without = wire.clone();
    without.as_object_mut().unwrap().remove("properties");
    let response = deserialize(&without, GET_NAMESPACE_RESPONSE).unwrap();
    assert!(!response.contains("properties"));

    let mut bad = wire;
    bad["properties"]["retention"] = json!(30);
    let (kind, path) = marshal_kind(deserialize(&bad, GET_NAMESPACE_RESPONSE).unwrap_err());
    assert_eq!(kind, MarshalErrorKind::TypeMismatch);
    assert_eq!(path, "properties.retention");
}

#[test]
fn namespace_response_bad_uuid() {
    let wire = json!({
        "namespace": ["finance"],
        "namespace_id": "finance",
        "warehouse_id": Uuid::from_u128(2).to_string(),
    });
    let (kind, path) = marshal_kind(deserialize(&wire, GET_NAMESPACE_RESPONSE).unwrap_err());
    assert_eq!(kind, MarshalErrorKind::TypeMismatch);
    assert_eq!(path, "namespace_id");
}

#[test]
fn tabular_ident_kinds() {
    let id = Uuid::from_u128(7);
    for kind in ["table", "view"] {
        let record = Record::new(TABULAR_IDENT_UUID)
            .with("type", kind)
            .with("id", id);
        let wire = serialize(&record).unwrap();
        assert_eq!(wire, json!({"type": kind, "id": id.to_string()}));
        assert_eq!(deserialize(&wire, TABULAR_IDENT_UUID).unwrap(), record);
    }
    let (kind, _) = marshal_kind(
        deserialize(
            &json!({"type": "Table", "id": id.to_string()}),
            TABULAR_IDENT_UUID,
        )
        .unwrap_err(),
    );
    assert_eq!(kind, MarshalErrorKind::InvalidEnumValue);
}

#[test]
fn deletion_details_timestamps() {
    let created = DateTime::<Utc>::from_timestamp(1_704_067_200, 0).unwrap();
    let deleted = DateTime::<Utc>::from_timestamp(1_706_745_600, 500_000_000).unwrap();
    let expires = DateTime::<Utc>::from_timestamp(1_709_251_200, 0).unwrap();
    let record = Record::new(DELETION_DETAILS)
        .with("expirationTaskId", Uuid::from_u128(9))
        .with("expirationDate", expires)
        .with("deletedAt", deleted)
        .with("createdAt", created);
    let wire = serialize(&record).unwrap();
    assert_eq!(
        wire,
        json!({
            "expiration_task_id": "00000000-0000-0000-0000-000000000009",
            "expiration_date": "2024-03-01T00:00:00Z",
            "deleted_at": "2024-02-01T00:00:00.500Z",
            "created_at": "2024-01-01T00:00:00Z",
        })
    );
    assert_eq!(deserialize(&wire, DELETION_DETAILS).unwrap(), record);
}

#[test]
fn forward_compatible_and_strict_modes() {
    let wire = json!({"id": "1", "name": "Ada", "user_type": "human", "avatar": "x.png"});
    let user = deserialize(&wire, SEARCH_USER).unwrap();
    assert!(!user.contains("avatar"));
    assert_eq!(user.len(), 3);

    let strict = marshaler_with(MarshalOptions::strict()).unwrap();
    let err = strict.deserialize_by_name(&wire, SEARCH_USER).unwrap_err();
    assert_eq!(
        err,
        MarshalError::UnknownField {
            path: "avatar".into()
        }
    );
}

#[test]
fn unknown_record_type() {
    let (kind, path) = marshal_kind(deserialize(&json!({}), "SearchUserV2").unwrap_err());
    assert_eq!(kind, MarshalErrorKind::UnknownRecordType);
    assert_eq!(path, "$");
    assert!(get_field_map("SearchUserV2").is_err());
}
