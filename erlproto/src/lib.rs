//! # erlproto
//!
//! Erlang record and type definitions generated from protobuf schemas.
//!
//! erlproto is a `protoc` plugin: for the package of the requested proto
//! files it writes a `<package>.hrl` with one record per message and a
//! `<package>.erl` exporting one type per enum and per message.
//!
//! ## Quick Start
//!
//! ```text
//! protoc --plugin=protoc-gen-erlproto --erlproto_out=src proto/shop/*.proto
//! ```
//!
//! The same output can be produced from a descriptor set:
//!
//! ```ignore
//! use erlproto::prelude::*;
//! use std::path::Path;
//!
//! let files = generate_from_file(Path::new("shop.pb"), &["shop/order.proto".to_string()])?;
//! for file in files {
//!     std::fs::write(&file.name, file.content)?;
//! }
//! ```
//!
//! ## Crate Organization
//!
//! - [`schema`] - Descriptor collection, naming and type resolution
//! - [`codegen`] - Erlang rendering and the protoc plugin protocol

pub mod prelude;

/// Descriptor collection, naming and type resolution.
pub mod schema {
    pub use erlproto_schema::*;
}

/// Erlang code generation.
pub mod codegen {
    pub use erlproto_codegen::*;
}

// Re-export commonly used items at the crate root
pub use erlproto_codegen::{
    CodegenError, GeneratedFile, Generator, GeneratorOptions, generate,
    generate_from_descriptor_set, generate_from_file, plugin,
};
pub use erlproto_schema::{EmissionModel, SchemaError, SchemaIr};
