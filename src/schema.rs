//! Schema types and structures
//!
//! Schemas are plain `'static` data: a tree of [`ObjectSchema`] nodes whose
//! leaves are [`TypeDescriptor`]s. Nothing in here validates anything; the
//! validators are pure functions of `(value, schema)`.

use serde_json::Value;
use std::fmt;

/// Runtime kind of a parsed value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Null,
    String,
    Int,
    Float,
    Bool,
    Object,
    Array,
}

impl Kind {
    /// Classify a value. Numbers that fit an integer are `Int`, everything
    /// else numeric is `Float`; booleans are never numbers.
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Null => Kind::Null,
            Value::Bool(_) => Kind::Bool,
            Value::Number(n) if n.is_i64() || n.is_u64() => Kind::Int,
            Value::Number(_) => Kind::Float,
            Value::String(_) => Kind::String,
            Value::Array(_) => Kind::Array,
            Value::Object(_) => Kind::Object,
        }
    }

    /// Name used in messages
    pub fn name(&self) -> &'static str {
        match self {
            Kind::Null => "null",
            Kind::String => "string",
            Kind::Int => "int",
            Kind::Float => "float",
            Kind::Bool => "bool",
            Kind::Object => "object",
            Kind::Array => "array",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Expected type of a leaf field
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TypeDescriptor {
    /// Exactly this runtime kind
    Primitive(Kind),
    /// One of a fixed set of string literals
    OneOfStrings(&'static [&'static str]),
    /// One of a fixed set of numeric literals (e.g. protocol function codes)
    OneOfNumbers(&'static [i64]),
    /// Any of several runtime kinds
    AnyOf(&'static [Kind]),
}

/// A schema node: either a typed leaf, a nested object or a list of objects
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldSchema {
    Leaf(TypeDescriptor),
    Object(&'static ObjectSchema),
    List(&'static ObjectSchema),
}

/// A named field inside an [`ObjectSchema`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Field {
    pub name: &'static str,
    pub schema: FieldSchema,
}

/// Inclusive numeric bounds for a field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Constraint {
    pub field: &'static str,
    pub min: i64,
    pub max: i64,
}

impl Constraint {
    pub fn contains(&self, n: f64) -> bool {
        n >= self.min as f64 && n <= self.max as f64
    }
}

/// Object schema partitioned into required and optional fields
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObjectSchema {
    pub required: &'static [Field],
    pub optional: &'static [Field],
    pub constraints: &'static [Constraint],
}

impl ObjectSchema {
    pub const EMPTY: ObjectSchema = ObjectSchema::new(&[], &[]);

    pub const fn new(required: &'static [Field], optional: &'static [Field]) -> Self {
        Self {
            required,
            optional,
            constraints: &[],
        }
    }

    pub const fn with_constraints(self, constraints: &'static [Constraint]) -> Self {
        Self {
            constraints,
            ..self
        }
    }

    /// Whether `name` is declared as required or optional
    pub fn declares(&self, name: &str) -> bool {
        self.required
            .iter()
            .chain(self.optional)
            .any(|f| f.name == name)
    }
}

// Shorthand constructors for the static catalog tables

pub const STRING: TypeDescriptor = TypeDescriptor::Primitive(Kind::String);
pub const INT: TypeDescriptor = TypeDescriptor::Primitive(Kind::Int);
pub const BOOL: TypeDescriptor = TypeDescriptor::Primitive(Kind::Bool);
pub const OBJECT: TypeDescriptor = TypeDescriptor::Primitive(Kind::Object);
pub const NUMBER: TypeDescriptor = TypeDescriptor::AnyOf(&[Kind::Int, Kind::Float]);

pub const fn leaf(name: &'static str, descriptor: TypeDescriptor) -> Field {
    Field {
        name,
        schema: FieldSchema::Leaf(descriptor),
    }
}

pub const fn object(name: &'static str, schema: &'static ObjectSchema) -> Field {
    Field {
        name,
        schema: FieldSchema::Object(schema),
    }
}

pub const fn list(name: &'static str, schema: &'static ObjectSchema) -> Field {
    Field {
        name,
        schema: FieldSchema::List(schema),
    }
}
