//! Record → wire encoder.

use serde_json::{Map, Number, Value as JsonValue};
use tracing::trace;

use super::Marshaler;
use crate::error::MarshalError;
use crate::path::PathSegment;
use crate::schema::{Discriminator, Primitive, RecordDescriptor, TypeRef};
use crate::value::{Record, Value};

pub(super) fn encode_record(
    m: &Marshaler<'_>,
    record: &Record,
    descriptor: &RecordDescriptor,
) -> Result<Map<String, JsonValue>, MarshalError> {
    if let Some(discriminator) = &descriptor.discriminator {
        return encode_union(m, record, descriptor, discriminator);
    }
    if record.type_name() != descriptor.name {
        return Err(MarshalError::mismatch(&descriptor.name, record.type_name()));
    }

    let mut out = Map::with_capacity(descriptor.fields.len());
    for field in &descriptor.fields {
        match record.get(&field.name) {
            Some(value) => {
                let wire = encode_value(m, value, &field.type_)
                    .map_err(|e| e.within(PathSegment::key(&field.name)))?;
                out.insert(field.wire_name.clone(), wire);
            }
            None if field.optional => {}
            None => return Err(MarshalError::missing(field.name.as_str())),
        }
    }

    if let Some((name, _)) = record
        .fields()
        .find(|(name, _)| descriptor.get_field(name).is_none())
    {
        return Err(MarshalError::UnknownField { path: name.into() });
    }
    Ok(out)
}

fn encode_union(
    m: &Marshaler<'_>,
    record: &Record,
    descriptor: &RecordDescriptor,
    discriminator: &Discriminator,
) -> Result<Map<String, JsonValue>, MarshalError> {
    let Some(literal) = discriminator.literal_for(record.type_name()) else {
        let variants: Vec<&str> = discriminator
            .mapping
            .iter()
            .map(|(_, r)| r.as_str())
            .collect();
        return Err(MarshalError::mismatch(variants.join(" | "), record.type_name()));
    };
    trace!(union = %descriptor.name, variant = record.type_name(), "encoding union variant");

    let variant = m.registry().get_field_map(record.type_name())?;
    let mut out = encode_record(m, record, variant)?;
    let existing = out
        .get(&discriminator.field)
        .map(|v| v.as_str().map_or_else(|| v.to_string(), str::to_string));
    match existing {
        None => {
            out.insert(
                discriminator.field.clone(),
                JsonValue::String(literal.to_string()),
            );
        }
        Some(value) if value == literal => {}
        Some(value) => {
            return Err(MarshalError::invalid_enum(value, [literal])
                .within(PathSegment::key(&discriminator.field)));
        }
    }
    Ok(out)
}

fn encode_value(
    m: &Marshaler<'_>,
    value: &Value,
    type_: &TypeRef,
) -> Result<JsonValue, MarshalError> {
    match (type_, value) {
        (TypeRef::Primitive(p), value) => encode_primitive(*p, value),
        (TypeRef::Enum(e), Value::Str(s)) => {
            if e.contains(s) {
                Ok(JsonValue::String(s.clone()))
            } else {
                Err(MarshalError::invalid_enum(
                    s.as_str(),
                    e.literals.iter().map(String::as_str),
                ))
            }
        }
        (TypeRef::Record(name), Value::Record(record)) => {
            let descriptor = m.registry().get_field_map(name)?;
            encode_record(m, record, descriptor).map(JsonValue::Object)
        }
        (TypeRef::Array(item), Value::List(items)) => items
            .iter()
            .enumerate()
            .map(|(i, v)| {
                encode_value(m, v, item).map_err(|e| e.within(PathSegment::Index(i)))
            })
            .collect::<Result<Vec<_>, _>>()
            .map(JsonValue::Array),
        (TypeRef::Map(inner), Value::Map(entries)) => entries
            .iter()
            .map(|(k, v)| {
                encode_value(m, v, inner)
                    .map(|wire| (k.clone(), wire))
                    .map_err(|e| e.within(PathSegment::key(k)))
            })
            .collect::<Result<Map<_, _>, _>>()
            .map(JsonValue::Object),
        (type_, value) => Err(MarshalError::mismatch(type_, value.kind())),
    }
}

fn encode_primitive(p: Primitive, value: &Value) -> Result<JsonValue, MarshalError> {
    match (p, value) {
        (Primitive::Str, Value::Str(s)) => Ok(JsonValue::String(s.clone())),
        (Primitive::Int, Value::Int(i)) => Ok(JsonValue::from(*i)),
        (Primitive::Num, Value::Num(n)) => Number::from_f64(*n)
            .map(JsonValue::Number)
            .ok_or_else(|| MarshalError::mismatch("finite num", n)),
        (Primitive::Bool, Value::Bool(b)) => Ok(JsonValue::Bool(*b)),
        (Primitive::Uuid, Value::Uuid(u)) => Ok(JsonValue::String(u.to_string())),
        (Primitive::DateTime, Value::DateTime(dt)) => Ok(JsonValue::String(
            dt.to_rfc3339_opts(chrono::SecondsFormat::AutoSi, true),
        )),
        (Primitive::Any, Value::Any(v)) => Ok(v.clone()),
        (p, value) => Err(MarshalError::mismatch(p.as_str(), value.kind())),
    }
}
