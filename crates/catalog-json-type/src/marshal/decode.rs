//! Wire → record decoder.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde_json::{Map, Value as JsonValue};
use tracing::trace;
use uuid::Uuid;

use super::{json_kind, Marshaler};
use crate::error::MarshalError;
use crate::path::{FieldPath, PathSegment};
use crate::schema::{Discriminator, Primitive, RecordDescriptor, TypeRef};
use crate::value::{Record, Value};

pub(super) fn decode_record(
    m: &Marshaler<'_>,
    wire: &JsonValue,
    descriptor: &RecordDescriptor,
) -> Result<Record, MarshalError> {
    let JsonValue::Object(obj) = wire else {
        return Err(MarshalError::mismatch(&descriptor.name, json_kind(wire)));
    };
    match &descriptor.discriminator {
        Some(discriminator) => decode_union(m, obj, descriptor, discriminator),
        None => decode_object(m, obj, descriptor, None),
    }
}

/// Decodes the declared fields of `obj`. `known` names one extra wire key
/// that is not an unknown key even if `descriptor` does not declare it.
fn decode_object(
    m: &Marshaler<'_>,
    obj: &Map<String, JsonValue>,
    descriptor: &RecordDescriptor,
    known: Option<&str>,
) -> Result<Record, MarshalError> {
    let mut record = Record::new(&descriptor.name);
    for field in &descriptor.fields {
        let wire = match obj.get(&field.wire_name) {
            Some(JsonValue::Null) if !field.type_.is_any() => {
                if !m.options().null_as_absent {
                    return Err(MarshalError::mismatch(&field.type_, "null")
                        .within(PathSegment::key(&field.wire_name)));
                }
                None
            }
            wire => wire,
        };
        match wire {
            Some(wire) => {
                let value = decode_value(m, wire, &field.type_)
                    .map_err(|e| e.within(PathSegment::key(&field.wire_name)))?;
                record.set(field.name.clone(), value);
            }
            None if field.optional => {}
            None => return Err(MarshalError::missing(field.wire_name.as_str())),
        }
    }

    if m.options().deny_unknown_keys {
        if let Some(key) = obj
            .keys()
            .find(|k| Some(k.as_str()) != known && descriptor.get_wire_field(k).is_none())
        {
            return Err(MarshalError::UnknownField {
                path: FieldPath::from(key.as_str()),
            });
        }
    }
    Ok(record)
}

fn decode_union(
    m: &Marshaler<'_>,
    obj: &Map<String, JsonValue>,
    descriptor: &RecordDescriptor,
    discriminator: &Discriminator,
) -> Result<Record, MarshalError> {
    let field = discriminator.field.as_str();
    let literal = match obj.get(field) {
        None => return Err(MarshalError::missing(field)),
        Some(JsonValue::Null) if m.options().null_as_absent => {
            return Err(MarshalError::missing(field));
        }
        Some(JsonValue::String(s)) => s.as_str(),
        Some(other) => {
            return Err(MarshalError::mismatch("str", json_kind(other))
                .within(PathSegment::key(field)));
        }
    };
    let Some(variant) = discriminator.record_for(literal) else {
        return Err(MarshalError::invalid_enum(literal, discriminator.literals())
            .within(PathSegment::key(field)));
    };
    trace!(union = %descriptor.name, variant, "decoding union variant");

    let variant = m.registry().get_field_map(variant)?;
    decode_object(m, obj, variant, Some(field))
}

fn decode_value(
    m: &Marshaler<'_>,
    wire: &JsonValue,
    type_: &TypeRef,
) -> Result<Value, MarshalError> {
    match type_ {
        TypeRef::Primitive(p) => decode_primitive(*p, wire),
        TypeRef::Enum(e) => {
            let Some(s) = wire.as_str() else {
                return Err(MarshalError::mismatch(&e.name, json_kind(wire)));
            };
            if !e.contains(s) {
                return Err(MarshalError::invalid_enum(
                    s,
                    e.literals.iter().map(String::as_str),
                ));
            }
            Ok(Value::Str(s.to_string()))
        }
        TypeRef::Record(name) => {
            let descriptor = m.registry().get_field_map(name)?;
            decode_record(m, wire, descriptor).map(Value::Record)
        }
        TypeRef::Array(item) => {
            let JsonValue::Array(items) = wire else {
                return Err(MarshalError::mismatch(type_, json_kind(wire)));
            };
            // Stops at the first failing element.
            items
                .iter()
                .enumerate()
                .map(|(i, v)| {
                    decode_value(m, v, item).map_err(|e| e.within(PathSegment::Index(i)))
                })
                .collect::<Result<Vec<_>, _>>()
                .map(Value::List)
        }
        TypeRef::Map(inner) => {
            let JsonValue::Object(entries) = wire else {
                return Err(MarshalError::mismatch(type_, json_kind(wire)));
            };
            entries
                .iter()
                .map(|(k, v)| {
                    decode_value(m, v, inner)
                        .map(|value| (k.clone(), value))
                        .map_err(|e| e.within(PathSegment::key(k)))
                })
                .collect::<Result<BTreeMap<_, _>, _>>()
                .map(Value::Map)
        }
    }
}

fn decode_primitive(p: Primitive, wire: &JsonValue) -> Result<Value, MarshalError> {
    let mismatch = || MarshalError::mismatch(p.as_str(), json_kind(wire));
    match p {
        Primitive::Str => wire
            .as_str()
            .map(|s| Value::Str(s.to_string()))
            .ok_or_else(mismatch),
        Primitive::Int => wire.as_i64().map(Value::Int).ok_or_else(mismatch),
        Primitive::Num => match wire {
            JsonValue::Number(n) => n.as_f64().map(Value::Num).ok_or_else(mismatch),
            _ => Err(mismatch()),
        },
        Primitive::Bool => wire.as_bool().map(Value::Bool).ok_or_else(mismatch),
        Primitive::Uuid => {
            let s = wire.as_str().ok_or_else(mismatch)?;
            Uuid::parse_str(s)
                .map(Value::Uuid)
                .map_err(|_| MarshalError::mismatch("uuid", format!("{s:?}")))
        }
        Primitive::DateTime => {
            let s = wire.as_str().ok_or_else(mismatch)?;
            DateTime::parse_from_rfc3339(s)
                .map(|dt| Value::DateTime(dt.with_timezone(&Utc)))
                .map_err(|_| MarshalError::mismatch("date-time", format!("{s:?}")))
        }
        Primitive::Any => Ok(Value::Any(wire.clone())),
    }
}
