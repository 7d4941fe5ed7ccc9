//! Descriptor integrity validator.
//!
//! Checks one record in isolation; cross-record references are checked by
//! [`crate::registry::RegistryBuilder::build`].

use std::collections::HashSet;

use super::schema::*;
use crate::error::SchemaError;

/// Validate a record descriptor for structural integrity.
pub fn validate_record(record: &RecordDescriptor) -> Result<(), SchemaError> {
    if record.name.is_empty() {
        return Err(SchemaError::EmptyRecordName);
    }
    if let Some(discriminator) = &record.discriminator {
        return validate_union(record, discriminator);
    }

    let mut names: HashSet<&str> = HashSet::new();
    let mut wire_names: HashSet<&str> = HashSet::new();
    for field in &record.fields {
        if field.name.is_empty() || field.wire_name.is_empty() {
            return Err(SchemaError::EmptyFieldName {
                record: record.name.clone(),
            });
        }
        if !names.insert(&field.name) {
            return Err(SchemaError::DuplicateField {
                record: record.name.clone(),
                field: field.name.clone(),
            });
        }
        if !wire_names.insert(&field.wire_name) {
            return Err(SchemaError::DuplicateWireName {
                record: record.name.clone(),
                wire_name: field.wire_name.clone(),
            });
        }
        validate_type(&field.type_)?;
    }
    Ok(())
}

fn validate_union(record: &RecordDescriptor, d: &Discriminator) -> Result<(), SchemaError> {
    if !record.fields.is_empty() {
        return Err(SchemaError::UnionWithFields(record.name.clone()));
    }
    if d.field.is_empty() {
        return Err(SchemaError::EmptyFieldName {
            record: record.name.clone(),
        });
    }
    if d.mapping.is_empty() {
        return Err(SchemaError::EmptyUnion(record.name.clone()));
    }
    let mut literals: HashSet<&str> = HashSet::new();
    for (literal, _) in &d.mapping {
        if !literals.insert(literal) {
            return Err(SchemaError::DuplicateVariant {
                record: record.name.clone(),
                literal: literal.clone(),
            });
        }
    }
    Ok(())
}

fn validate_type(type_: &TypeRef) -> Result<(), SchemaError> {
    match type_ {
        TypeRef::Primitive(_) | TypeRef::Record(_) => Ok(()),
        TypeRef::Enum(e) => validate_enum(e),
        TypeRef::Array(inner) | TypeRef::Map(inner) => validate_type(inner),
    }
}

fn validate_enum(e: &EnumType) -> Result<(), SchemaError> {
    if e.literals.is_empty() {
        return Err(SchemaError::EmptyEnum(e.name.clone()));
    }
    let mut seen: HashSet<&str> = HashSet::new();
    for literal in &e.literals {
        if !seen.insert(literal) {
            return Err(SchemaError::DuplicateEnumLiteral {
                name: e.name.clone(),
                literal: literal.clone(),
            });
        }
    }
    Ok(())
}
