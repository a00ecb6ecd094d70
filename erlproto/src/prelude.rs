//! Prelude module for convenient imports.
//!
//! ```ignore
//! use erlproto::prelude::*;
//! ```

// Schema types
pub use erlproto_schema::{
    EmissionModel, EnumType, ErrorKind, FieldType, MessageType, OneofType, PackageTarget,
    SchemaError, SchemaIr, TypeSpec,
};

// Generation
pub use erlproto_codegen::{
    CodegenError, GeneratedFile, Generator, GeneratorOptions, generate_from_descriptor_set,
    generate_from_file,
};
