//! Error types for descriptor collection and type resolution.

use thiserror::Error;

/// Error type for collection, validation and resolution of a descriptor batch.
///
/// Errors raised deep inside the model are wrapped in [`SchemaError::Context`]
/// on their way up, so the final message reads from the outermost declaration
/// down to the offending field.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// The request cannot be processed as a single package.
    #[error("configuration error: {message}")]
    Config {
        /// Error message.
        message: String,
    },

    /// A field has no label.
    #[error("missing label for field '{field}'")]
    MissingLabel {
        /// Field name.
        field: String,
    },

    /// A field label is not required, optional or repeated.
    #[error("unsupported label {label} for field '{field}'")]
    InvalidLabel {
        /// Field name.
        field: String,
        /// Raw label value.
        label: i32,
    },

    /// A field references a oneof declaration that does not exist.
    #[error("invalid oneof index {index} for field '{field}'")]
    InvalidOneofIndex {
        /// Field name.
        field: String,
        /// Raw oneof index.
        index: i32,
    },

    /// A field wire type is not a known protobuf type.
    #[error("invalid type {} for field '{field}'", raw_type(.type_id))]
    InvalidType {
        /// Field name.
        field: String,
        /// Raw type value, if any.
        type_id: Option<i32>,
    },

    /// An enum declares no values.
    #[error("enum '{name}' has no values")]
    EmptyEnum {
        /// Enum name.
        name: String,
    },

    /// A feature the generator refuses to approximate.
    #[error("unsupported {feature} '{name}'")]
    Unsupported {
        /// Feature description.
        feature: &'static str,
        /// Name of the declaration using it.
        name: String,
    },

    /// A field references a type absent from the name index.
    #[error("unknown {kind} type '{type_name}' referenced by field '{field}'")]
    UnknownType {
        /// Expected kind of the referenced type ("enum" or "message").
        kind: &'static str,
        /// Dangling absolute type name.
        type_name: String,
        /// Field name.
        field: String,
    },

    /// Two declarations resolve to the same absolute name.
    #[error("duplicate definition of '{name}'")]
    NameCollision {
        /// Absolute name.
        name: String,
    },

    /// Structural context added while the error propagates.
    #[error("{context}: {source}")]
    Context {
        /// Description of the enclosing declaration.
        context: String,
        /// Underlying error.
        #[source]
        source: Box<SchemaError>,
    },
}

fn raw_type(type_id: &Option<i32>) -> String {
    type_id.map_or_else(|| "(missing)".to_string(), |t| t.to_string())
}

/// Broad classification of a [`SchemaError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Multiple packages or directories, or an unusable request.
    Config,
    /// Missing or invalid label, oneof index or type.
    MalformedField,
    /// Enum without values.
    MalformedEnum,
    /// Extensions, groups, explicit defaults.
    UnsupportedFeature,
    /// Dangling enum or message reference.
    UnknownType,
    /// Duplicate absolute name.
    NameCollision,
}

impl SchemaError {
    /// Creates a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Creates an unsupported feature error.
    pub fn unsupported(feature: &'static str, name: impl Into<String>) -> Self {
        Self::Unsupported {
            feature,
            name: name.into(),
        }
    }

    /// Wraps the error with a description of the enclosing declaration.
    #[must_use]
    pub fn context(self, context: impl Into<String>) -> Self {
        Self::Context {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// Returns the innermost error, skipping context layers.
    #[must_use]
    pub fn root(&self) -> &SchemaError {
        let mut err = self;
        while let Self::Context { source, .. } = err {
            err = source;
        }
        err
    }

    /// Returns the classification of the innermost error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self.root() {
            Self::Config { .. } => ErrorKind::Config,
            Self::MissingLabel { .. }
            | Self::InvalidLabel { .. }
            | Self::InvalidOneofIndex { .. }
            | Self::InvalidType { .. } => ErrorKind::MalformedField,
            Self::EmptyEnum { .. } => ErrorKind::MalformedEnum,
            Self::Unsupported { .. } => ErrorKind::UnsupportedFeature,
            Self::UnknownType { .. } => ErrorKind::UnknownType,
            Self::NameCollision { .. } => ErrorKind::NameCollision,
            Self::Context { .. } => unreachable!("root() never returns a context layer"),
        }
    }
}

/// Adds context to the error side of a result.
pub(crate) trait ResultExt<T> {
    /// Wraps an error with the context produced by `f`.
    fn context_with<F, C>(self, f: F) -> Result<T, SchemaError>
    where
        F: FnOnce() -> C,
        C: Into<String>;
}

impl<T> ResultExt<T> for Result<T, SchemaError> {
    fn context_with<F, C>(self, f: F) -> Result<T, SchemaError>
    where
        F: FnOnce() -> C,
        C: Into<String>,
    {
        self.map_err(|e| e.context(f()))
    }
}
