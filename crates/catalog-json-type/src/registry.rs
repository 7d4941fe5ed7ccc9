//! The table of record descriptors.
//!
//! Built once from the static schema and immutable afterwards, so a shared
//! `&Registry` can serve any number of concurrent marshal calls.

use std::collections::HashMap;

use tracing::debug;

use crate::error::{MarshalError, SchemaError};
use crate::marshal::{MarshalOptions, Marshaler};
use crate::path::FieldPath;
use crate::schema::{validate_record, RecordDescriptor, TypeRef};

/// Collects descriptors and validates them into a [`Registry`].
#[derive(Debug, Clone, Default)]
pub struct RegistryBuilder {
    records: Vec<RecordDescriptor>,
}

impl RegistryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(mut self, record: RecordDescriptor) -> Self {
        self.records.push(record);
        self
    }

    pub fn records(mut self, records: impl IntoIterator<Item = RecordDescriptor>) -> Self {
        self.records.extend(records);
        self
    }

    /// Validates every descriptor and every cross-record reference.
    pub fn build(self) -> Result<Registry, SchemaError> {
        let mut records: HashMap<String, RecordDescriptor> =
            HashMap::with_capacity(self.records.len());
        let mut order: Vec<String> = Vec::with_capacity(self.records.len());
        for record in self.records {
            validate_record(&record)?;
            if records.contains_key(&record.name) {
                return Err(SchemaError::DuplicateRecord(record.name));
            }
            order.push(record.name.clone());
            records.insert(record.name.clone(), record);
        }

        // Walk in registration order.
        for record in order.iter().filter_map(|name| records.get(name)) {
            for target in record.references() {
                if !records.contains_key(target) {
                    return Err(SchemaError::UnknownReference {
                        record: record.name.clone(),
                        target: target.to_string(),
                    });
                }
            }
            if let Some(discriminator) = &record.discriminator {
                for (literal, target) in &discriminator.mapping {
                    let Some(variant) = records.get(target) else {
                        continue;
                    };
                    if variant.is_union() {
                        return Err(SchemaError::NestedUnion {
                            record: record.name.clone(),
                            literal: literal.clone(),
                            target: target.clone(),
                        });
                    }
                    // A variant that declares the key as an enum must admit its literal.
                    let declared = variant
                        .get_wire_field(&discriminator.field)
                        .map(|f| &f.type_);
                    if let Some(TypeRef::Enum(e)) = declared {
                        if !e.contains(literal) {
                            return Err(SchemaError::VariantLiteralMismatch {
                                record: record.name.clone(),
                                literal: literal.clone(),
                                target: target.clone(),
                                field: discriminator.field.clone(),
                            });
                        }
                    }
                }
            }
        }

        debug!(records = records.len(), "descriptor table built");
        Ok(Registry { records })
    }
}

/// Immutable lookup table from record name to descriptor.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    records: HashMap<String, RecordDescriptor>,
}

impl Registry {
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::new()
    }

    /// Looks up the descriptor registered under `name`.
    pub fn get_field_map(&self, name: &str) -> Result<&RecordDescriptor, MarshalError> {
        self.records
            .get(name)
            .ok_or_else(|| MarshalError::UnknownRecordType {
                path: FieldPath::root(),
                name: name.to_string(),
            })
    }

    pub fn get(&self, name: &str) -> Option<&RecordDescriptor> {
        self.records.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.records.contains_key(name)
    }

    /// Registered record names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.records.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn marshaler(&self) -> Marshaler<'_> {
        Marshaler::new(self)
    }

    pub fn marshaler_with(&self, options: MarshalOptions) -> Marshaler<'_> {
        Marshaler::with_options(self, options)
    }
}
