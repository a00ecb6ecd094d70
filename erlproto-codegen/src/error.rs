//! Error types for code generation.

use thiserror::Error;

/// Error type for code generation operations.
#[derive(Debug, Error)]
pub enum CodegenError {
    /// Schema collection or resolution error.
    #[error("schema error: {0}")]
    Schema(#[from] erlproto_schema::SchemaError),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed protobuf input.
    #[error("cannot decode {what}: {source}")]
    Decode {
        /// What was being decoded.
        what: &'static str,
        /// Underlying decode error.
        #[source]
        source: prost::DecodeError,
    },

    /// Invalid generator parameter.
    #[error("invalid parameter '{parameter}': {message}")]
    Parameter {
        /// Offending parameter.
        parameter: String,
        /// Error message.
        message: String,
    },

    /// Code generation error.
    #[error("generation error: {message}")]
    Generation {
        /// Error message.
        message: String,
    },
}

impl CodegenError {
    /// Creates a generation error with the given message.
    pub fn generation(message: impl Into<String>) -> Self {
        Self::Generation {
            message: message.into(),
        }
    }

    /// Creates a parameter error.
    pub fn parameter(parameter: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Parameter {
            parameter: parameter.into(),
            message: message.into(),
        }
    }

    /// Creates a decode error.
    pub fn decode(what: &'static str, source: prost::DecodeError) -> Self {
        Self::Decode { what, source }
    }
}
