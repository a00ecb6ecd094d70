//! Protobuf field vocabulary and Erlang type expressions.
//!
//! This module holds the closed set of protobuf wire types and cardinalities
//! the collector recognizes, and the structured Erlang type specs and default
//! values the resolver produces for them.

use crate::naming::quote_atom;
use prost_types::field_descriptor_proto::{Label, Type};
use std::fmt;

/// Protobuf field type, as declared in a field descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldTypeId {
    /// 64-bit float.
    Double,
    /// 32-bit float.
    Float,
    /// Signed 64-bit varint.
    Int64,
    /// Unsigned 64-bit varint.
    Uint64,
    /// Signed 32-bit varint.
    Int32,
    /// Unsigned 64-bit fixed width.
    Fixed64,
    /// Unsigned 32-bit fixed width.
    Fixed32,
    /// Boolean.
    Bool,
    /// UTF-8 string.
    String,
    /// Deprecated group encoding.
    Group,
    /// Embedded message.
    Message,
    /// Byte string.
    Bytes,
    /// Unsigned 32-bit varint.
    Uint32,
    /// Enumeration.
    Enum,
    /// Signed 32-bit fixed width.
    Sfixed32,
    /// Signed 64-bit fixed width.
    Sfixed64,
    /// Signed 32-bit zigzag varint.
    Sint32,
    /// Signed 64-bit zigzag varint.
    Sint64,
    /// Missing or unknown type value; always rejected by the collector.
    Unrecognized(Option<i32>),
}

impl FieldTypeId {
    /// Maps the raw descriptor value to a field type.
    #[must_use]
    pub fn from_proto(raw: Option<i32>) -> Self {
        let Some(value) = raw else {
            return Self::Unrecognized(None);
        };

        match Type::try_from(value) {
            Ok(Type::Double) => Self::Double,
            Ok(Type::Float) => Self::Float,
            Ok(Type::Int64) => Self::Int64,
            Ok(Type::Uint64) => Self::Uint64,
            Ok(Type::Int32) => Self::Int32,
            Ok(Type::Fixed64) => Self::Fixed64,
            Ok(Type::Fixed32) => Self::Fixed32,
            Ok(Type::Bool) => Self::Bool,
            Ok(Type::String) => Self::String,
            Ok(Type::Group) => Self::Group,
            Ok(Type::Message) => Self::Message,
            Ok(Type::Bytes) => Self::Bytes,
            Ok(Type::Uint32) => Self::Uint32,
            Ok(Type::Enum) => Self::Enum,
            Ok(Type::Sfixed32) => Self::Sfixed32,
            Ok(Type::Sfixed64) => Self::Sfixed64,
            Ok(Type::Sint32) => Self::Sint32,
            Ok(Type::Sint64) => Self::Sint64,
            Err(_) => Self::Unrecognized(Some(value)),
        }
    }
}

/// Field cardinality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cardinality {
    /// Singular, must be present.
    Required,
    /// Singular, may be absent.
    Optional,
    /// Zero or more values.
    Repeated,
}

impl Cardinality {
    /// Maps a descriptor label, returning `Err(raw)` for unknown values.
    ///
    /// # Errors
    /// Returns the raw value if it is not a known label.
    pub fn from_proto(raw: i32) -> Result<Self, i32> {
        match Label::try_from(raw) {
            Ok(Label::Required) => Ok(Self::Required),
            Ok(Label::Optional) => Ok(Self::Optional),
            Ok(Label::Repeated) => Ok(Self::Repeated),
            Err(_) => Err(raw),
        }
    }
}

/// An Erlang type specification.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeSpec {
    /// Integer range `Min..Max`.
    Range {
        /// Lower bound.
        min: i128,
        /// Upper bound.
        max: i128,
    },
    /// `boolean()`.
    Boolean,
    /// `float()`.
    Float,
    /// `iodata()`.
    Iodata,
    /// The `undefined` atom.
    Undefined,
    /// A literal atom.
    Atom(String),
    /// A user type, `name()` or `module:name()`.
    Named {
        /// Module qualifier, set for references across packages.
        module: Option<String>,
        /// Type name.
        name: String,
    },
    /// A record type `#name{}`.
    Record {
        /// Record name.
        name: String,
    },
    /// `list(T)`.
    List(Box<TypeSpec>),
    /// Tagged tuple `{tag, T}`.
    Tagged {
        /// Tag atom.
        tag: String,
        /// Value type.
        value: Box<TypeSpec>,
    },
    /// `A | B | ...`.
    Union(Vec<TypeSpec>),
}

impl TypeSpec {
    /// Signed integer range of the given bit width.
    #[must_use]
    pub const fn signed(bits: u32) -> Self {
        Self::Range {
            min: -(1i128 << (bits - 1)),
            max: (1i128 << (bits - 1)) - 1,
        }
    }

    /// Unsigned integer range of the given bit width.
    #[must_use]
    pub const fn unsigned(bits: u32) -> Self {
        Self::Range {
            min: 0,
            max: (1i128 << bits) - 1,
        }
    }

    /// `list(value)`.
    #[must_use]
    pub fn list(value: TypeSpec) -> Self {
        Self::List(Box::new(value))
    }

    /// `undefined | value`.
    #[must_use]
    pub fn or_undefined(value: TypeSpec) -> Self {
        Self::Union(vec![Self::Undefined, value])
    }

    /// Number of top-level alternatives: union members, or 1.
    #[must_use]
    pub fn alternatives(&self) -> usize {
        match self {
            Self::Union(members) => members.len(),
            _ => 1,
        }
    }

    /// Returns a copy where every unqualified user type reference is
    /// qualified with `module`.
    ///
    /// Types written into a header must name their module, since the header
    /// is included outside the module that defines them.
    #[must_use]
    pub fn qualified(&self, module: &str) -> Self {
        match self {
            Self::Named { module: None, name } => Self::Named {
                module: Some(module.to_string()),
                name: name.clone(),
            },
            Self::List(value) => Self::List(Box::new(value.qualified(module))),
            Self::Tagged { tag, value } => Self::Tagged {
                tag: tag.clone(),
                value: Box::new(value.qualified(module)),
            },
            Self::Union(members) => {
                Self::Union(members.iter().map(|m| m.qualified(module)).collect())
            }
            other => other.clone(),
        }
    }
}

impl fmt::Display for TypeSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Range { min, max } => write!(f, "{min}..{max}"),
            Self::Boolean => f.write_str("boolean()"),
            Self::Float => f.write_str("float()"),
            Self::Iodata => f.write_str("iodata()"),
            Self::Undefined => f.write_str("undefined"),
            Self::Atom(atom) => f.write_str(&quote_atom(atom)),
            Self::Named {
                module: Some(module),
                name,
            } => write!(f, "{}:{}()", quote_atom(module), quote_atom(name)),
            Self::Named { module: None, name } => write!(f, "{}()", quote_atom(name)),
            Self::Record { name } => write!(f, "#{}{{}}", quote_atom(name)),
            Self::List(value) => write!(f, "list({value})"),
            Self::Tagged { tag, value } => write!(f, "{{{}, {value}}}", quote_atom(tag)),
            Self::Union(members) => {
                for (i, member) in members.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" | ")?;
                    }
                    write!(f, "{member}")?;
                }
                Ok(())
            }
        }
    }
}

/// An Erlang default value for a record field.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DefaultValue {
    /// Integer literal.
    Integer(i64),
    /// `0.0`.
    FloatZero,
    /// `true` or `false`.
    Boolean(bool),
    /// `[]`.
    EmptyList,
    /// `undefined`.
    Undefined,
    /// An atom, e.g. an enum value.
    Atom(String),
}

impl fmt::Display for DefaultValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(value) => write!(f, "{value}"),
            Self::FloatZero => f.write_str("0.0"),
            Self::Boolean(value) => write!(f, "{value}"),
            Self::EmptyList => f.write_str("[]"),
            Self::Undefined => f.write_str("undefined"),
            Self::Atom(atom) => f.write_str(&quote_atom(atom)),
        }
    }
}
