//! # erlproto Schema
//!
//! Protobuf descriptor collection and Erlang type resolution.
//!
//! This crate provides:
//! - Naming rules from protobuf identifiers to Erlang atoms
//! - Collection of messages and enums from `FileDescriptorProto`s
//! - A global index of absolute type names
//! - Resolution of field and oneof types to Erlang type specs
//! - The per-package emission model consumed by the code generator

pub mod collector;
pub mod error;
pub mod index;
pub mod ir;
pub mod messages;
pub mod naming;
pub mod resolver;
pub mod types;
pub mod validation;

pub use collector::Collector;
pub use error::{ErrorKind, SchemaError};
pub use index::{NameIndex, TypeHandle};
pub use ir::{EmissionModel, ResolvedSchema, Schema, SchemaIr};
pub use messages::{
    EnumId, EnumType, EnumValue, FieldType, MessageId, MessageType, OneofType, RecordEntry,
    ResolvedField, ResolvedOneof,
};
pub use types::{Cardinality, DefaultValue, FieldTypeId, TypeSpec};
pub use validation::PackageTarget;
