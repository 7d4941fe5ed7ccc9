use std::fmt;

/// Primitive wire types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Primitive {
    Str,
    /// JSON integer that fits an `i64`.
    Int,
    /// Any finite JSON number, held as `f64`.
    Num,
    Bool,
    /// String holding an RFC 4122 UUID.
    Uuid,
    /// String holding an RFC 3339 timestamp.
    DateTime,
    /// Untyped JSON, passed through unchanged.
    Any,
}

impl Primitive {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Str => "str",
            Self::Int => "int",
            Self::Num => "num",
            Self::Bool => "bool",
            Self::Uuid => "uuid",
            Self::DateTime => "date-time",
            Self::Any => "any",
        }
    }
}

/// A named, closed set of string literals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumType {
    pub name: String,
    pub literals: Vec<String>,
}

impl EnumType {
    pub fn new<I, S>(name: impl Into<String>, literals: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            literals: literals.into_iter().map(Into::into).collect(),
        }
    }

    pub fn contains(&self, literal: &str) -> bool {
        self.literals.iter().any(|l| l == literal)
    }
}

/// Type of a field's value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeRef {
    Primitive(Primitive),
    Enum(EnumType),
    /// Reference to another record, by name.
    Record(String),
    /// JSON array of the inner type.
    Array(Box<TypeRef>),
    /// JSON object with free-form keys and values of the inner type.
    Map(Box<TypeRef>),
}

impl TypeRef {
    pub fn str() -> Self {
        Self::Primitive(Primitive::Str)
    }

    pub fn int() -> Self {
        Self::Primitive(Primitive::Int)
    }

    pub fn num() -> Self {
        Self::Primitive(Primitive::Num)
    }

    pub fn bool() -> Self {
        Self::Primitive(Primitive::Bool)
    }

    pub fn uuid() -> Self {
        Self::Primitive(Primitive::Uuid)
    }

    pub fn date_time() -> Self {
        Self::Primitive(Primitive::DateTime)
    }

    pub fn any() -> Self {
        Self::Primitive(Primitive::Any)
    }

    pub fn enumeration<I, S>(name: impl Into<String>, literals: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Enum(EnumType::new(name, literals))
    }

    pub fn record(name: impl Into<String>) -> Self {
        Self::Record(name.into())
    }

    pub fn array(item: TypeRef) -> Self {
        Self::Array(Box::new(item))
    }

    pub fn map(value: TypeRef) -> Self {
        Self::Map(Box::new(value))
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::Primitive(p) => p.as_str(),
            Self::Enum(_) => "enum",
            Self::Record(_) => "record",
            Self::Array(_) => "array",
            Self::Map(_) => "map",
        }
    }

    pub fn is_any(&self) -> bool {
        matches!(self, Self::Primitive(Primitive::Any))
    }

    /// Collects the names of all records reachable without crossing another record.
    pub(crate) fn referenced_records<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self {
            Self::Record(name) => out.push(name),
            Self::Array(inner) | Self::Map(inner) => inner.referenced_records(out),
            Self::Primitive(_) | Self::Enum(_) => {}
        }
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Primitive(p) => f.write_str(p.as_str()),
            Self::Enum(e) => f.write_str(&e.name),
            Self::Record(name) => f.write_str(name),
            Self::Array(inner) => write!(f, "Array<{inner}>"),
            Self::Map(inner) => write!(f, "Map<{inner}>"),
        }
    }
}

/// A single field of a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    /// In-memory (logical) name.
    pub name: String,
    /// Key used on the wire.
    pub wire_name: String,
    pub type_: TypeRef,
    pub optional: bool,
    pub description: Option<String>,
}

impl FieldDescriptor {
    pub fn required(name: impl Into<String>, type_: TypeRef) -> Self {
        let name = name.into();
        Self {
            wire_name: name.clone(),
            name,
            type_,
            optional: false,
            description: None,
        }
    }

    pub fn optional(name: impl Into<String>, type_: TypeRef) -> Self {
        Self {
            optional: true,
            ..Self::required(name, type_)
        }
    }

    pub fn wire(mut self, wire_name: impl Into<String>) -> Self {
        self.wire_name = wire_name.into();
        self
    }

    pub fn describe(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Selects among variant records by the string value of one wire key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Discriminator {
    /// Wire key holding the variant literal.
    pub field: String,
    /// Literal to variant record name, in declaration order.
    pub mapping: Vec<(String, String)>,
}

impl Discriminator {
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            mapping: Vec::new(),
        }
    }

    pub fn variant(mut self, literal: impl Into<String>, record: impl Into<String>) -> Self {
        self.mapping.push((literal.into(), record.into()));
        self
    }

    pub fn record_for(&self, literal: &str) -> Option<&str> {
        self.mapping
            .iter()
            .find(|(l, _)| l == literal)
            .map(|(_, r)| r.as_str())
    }

    pub fn literal_for(&self, record: &str) -> Option<&str> {
        self.mapping
            .iter()
            .find(|(_, r)| r == record)
            .map(|(l, _)| l.as_str())
    }

    pub fn literals(&self) -> impl Iterator<Item = &str> {
        self.mapping.iter().map(|(l, _)| l.as_str())
    }
}

/// Static metadata describing one record type.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordDescriptor {
    pub name: String,
    /// Fields in declaration order.
    pub fields: Vec<FieldDescriptor>,
    /// Present only on polymorphic (union) records.
    pub discriminator: Option<Discriminator>,
    pub description: Option<String>,
}

impl RecordDescriptor {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// A polymorphic record whose variants are picked by `discriminator`.
    pub fn union(name: impl Into<String>, discriminator: Discriminator) -> Self {
        Self {
            name: name.into(),
            discriminator: Some(discriminator),
            ..Default::default()
        }
    }

    pub fn field(mut self, field: FieldDescriptor) -> Self {
        self.fields.push(field);
        self
    }

    pub fn prop(self, name: impl Into<String>, type_: TypeRef) -> Self {
        self.field(FieldDescriptor::required(name, type_))
    }

    pub fn opt(self, name: impl Into<String>, type_: TypeRef) -> Self {
        self.field(FieldDescriptor::optional(name, type_))
    }

    pub fn prop_as(
        self,
        name: impl Into<String>,
        wire_name: impl Into<String>,
        type_: TypeRef,
    ) -> Self {
        self.field(FieldDescriptor::required(name, type_).wire(wire_name))
    }

    pub fn opt_as(
        self,
        name: impl Into<String>,
        wire_name: impl Into<String>,
        type_: TypeRef,
    ) -> Self {
        self.field(FieldDescriptor::optional(name, type_).wire(wire_name))
    }

    pub fn describe(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn is_union(&self) -> bool {
        self.discriminator.is_some()
    }

    pub fn get_field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn get_wire_field(&self, wire_name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.wire_name == wire_name)
    }

    /// Names of all records this descriptor points at, fields first, then variants.
    pub fn references(&self) -> Vec<&str> {
        let mut out = Vec::new();
        for field in &self.fields {
            field.type_.referenced_records(&mut out);
        }
        if let Some(discriminator) = &self.discriminator {
            out.extend(discriminator.mapping.iter().map(|(_, r)| r.as_str()));
        }
        out
    }
}
