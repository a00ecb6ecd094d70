//! protoc plugin protocol.
//!
//! protoc writes an encoded `CodeGeneratorRequest` to the plugin's stdin and
//! reads an encoded `CodeGeneratorResponse` from its stdout. Generation
//! failures travel in the response `error` field; only a request that
//! cannot be decoded is an error of the plugin itself.

use crate::error::CodegenError;
use crate::generator::GeneratedFile;
use prost::Message;
use prost_types::compiler::code_generator_response::{Feature, File};
use prost_types::compiler::{CodeGeneratorRequest, CodeGeneratorResponse};

/// Builds the response to a decoded request.
#[must_use]
pub fn generate_response(request: &CodeGeneratorRequest) -> CodeGeneratorResponse {
    let mut response = CodeGeneratorResponse {
        supported_features: Some(Feature::Proto3Optional as u64),
        ..Default::default()
    };

    match crate::generate(request) {
        Ok(files) => {
            response.file = files.into_iter().map(response_file).collect();
        }
        Err(err) => {
            tracing::error!("generation failed: {err}");
            response.error = Some(err.to_string());
        }
    }

    response
}

/// Decodes a request, generates, and encodes the response.
///
/// # Errors
/// Returns `CodegenError::Decode` if `input` is not a valid request.
pub fn run(input: &[u8]) -> Result<Vec<u8>, CodegenError> {
    let request = CodeGeneratorRequest::decode(input)
        .map_err(|e| CodegenError::decode("code generator request", e))?;

    tracing::debug!(
        "request for {} of {} files",
        request.file_to_generate.join(", "),
        request.proto_file.len()
    );

    Ok(generate_response(&request).encode_to_vec())
}

fn response_file(file: GeneratedFile) -> File {
    File {
        name: Some(file.name),
        content: Some(file.content),
        ..Default::default()
    }
}
