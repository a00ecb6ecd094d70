//! # erlproto Codegen
//!
//! Erlang code generation from protobuf descriptors.
//!
//! This crate provides:
//! - Record header (`.hrl`) generation
//! - Type module (`.erl`) generation with exported types
//! - The protoc plugin request/response protocol
//! - Generation from serialized descriptor sets

pub mod erlang;
pub mod error;
#[cfg(test)]
mod fixtures;
pub mod generator;
pub mod options;
pub mod plugin;

pub use error::CodegenError;
pub use generator::{GeneratedFile, Generator};
pub use options::GeneratorOptions;

use erlproto_schema::SchemaIr;
use prost::Message;
use prost_types::FileDescriptorSet;
use prost_types::compiler::CodeGeneratorRequest;

/// Generates Erlang files for a protoc plugin request.
///
/// # Errors
/// Returns `CodegenError` if the parameter string, the schema, or the
/// rendering is invalid.
pub fn generate(request: &CodeGeneratorRequest) -> Result<Vec<GeneratedFile>, CodegenError> {
    let options = GeneratorOptions::from_parameter(request.parameter())?;
    let ir = SchemaIr::from_request(&request.file_to_generate, &request.proto_file)?;
    Generator::new(&ir).options(options).generate()
}

/// Generates Erlang files from an encoded `FileDescriptorSet`.
///
/// # Arguments
/// * `bytes` - Output of `protoc --descriptor_set_out` or `buf build -o`
/// * `files_to_generate` - Proto paths, as named in the set, to generate for
///
/// # Errors
/// Returns `CodegenError` if decoding, resolution, or rendering fails.
pub fn generate_from_descriptor_set(
    bytes: &[u8],
    files_to_generate: &[String],
) -> Result<Vec<GeneratedFile>, CodegenError> {
    let set = FileDescriptorSet::decode(bytes)
        .map_err(|e| CodegenError::decode("file descriptor set", e))?;
    let ir = SchemaIr::from_request(files_to_generate, &set.file)?;
    Generator::new(&ir).generate()
}

/// Generates Erlang files from a descriptor set file.
///
/// # Errors
/// Returns `CodegenError` if reading, decoding, resolution, or rendering
/// fails.
pub fn generate_from_file(
    path: &std::path::Path,
    files_to_generate: &[String],
) -> Result<Vec<GeneratedFile>, CodegenError> {
    let bytes = std::fs::read(path)?;
    generate_from_descriptor_set(&bytes, files_to_generate)
}
