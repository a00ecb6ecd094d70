//! Intermediate representation for code generation.
//!
//! The pipeline runs in three steps: [`Schema`] holds the collected but
//! unresolved declarations of the whole descriptor batch, [`ResolvedSchema`]
//! the same declarations with every type expression filled in, and
//! [`EmissionModel`] the per-package view handed to the renderer.

use crate::collector::Collector;
use crate::error::SchemaError;
use crate::index::NameIndex;
use crate::messages::{EnumId, EnumType, MessageId, MessageType};
use crate::naming;
use crate::resolver;
use crate::validation::{self, PackageTarget};
use prost_types::FileDescriptorProto;

/// Declarations collected from a descriptor batch, not yet resolved.
#[derive(Debug, Clone, Default)]
pub struct Schema {
    /// Messages in collection order.
    pub messages: Vec<MessageType>,
    /// Enums in collection order.
    pub enums: Vec<EnumType>,
    /// Absolute name lookup over both arenas.
    pub index: NameIndex,
}

impl Schema {
    /// Collects all declarations of `files`.
    ///
    /// # Errors
    /// Returns `SchemaError` if a declaration is malformed or unsupported.
    pub fn from_descriptors(files: &[FileDescriptorProto]) -> Result<Self, SchemaError> {
        Collector::new().collect(files)
    }

    /// Gets a message by handle.
    #[must_use]
    pub fn message(&self, id: MessageId) -> Option<&MessageType> {
        self.messages.get(id.index())
    }

    /// Gets an enum by handle.
    #[must_use]
    pub fn enum_type(&self, id: EnumId) -> Option<&EnumType> {
        self.enums.get(id.index())
    }

    /// Resolves every field and oneof.
    ///
    /// # Errors
    /// Returns `SchemaError` for dangling references and unsupported field
    /// types.
    pub fn resolve(self) -> Result<ResolvedSchema, SchemaError> {
        resolver::resolve_schema(self)
    }
}

/// A schema whose fields and oneofs all carry their type expressions.
#[derive(Debug, Clone)]
pub struct ResolvedSchema {
    schema: Schema,
}

impl ResolvedSchema {
    pub(crate) fn new(schema: Schema) -> Self {
        Self { schema }
    }

    /// All messages of the batch.
    #[must_use]
    pub fn messages(&self) -> &[MessageType] {
        &self.schema.messages
    }

    /// All enums of the batch.
    #[must_use]
    pub fn enums(&self) -> &[EnumType] {
        &self.schema.enums
    }

    /// The name index of the batch.
    #[must_use]
    pub fn index(&self) -> &NameIndex {
        &self.schema.index
    }

    /// Gets a message by absolute name.
    #[must_use]
    pub fn find_message(&self, absolute_name: &str) -> Option<&MessageType> {
        self.schema
            .index
            .find_message(absolute_name)
            .and_then(|id| self.schema.message(id))
    }

    /// Gets an enum by absolute name.
    #[must_use]
    pub fn find_enum(&self, absolute_name: &str) -> Option<&EnumType> {
        self.schema
            .index
            .find_enum(absolute_name)
            .and_then(|id| self.schema.enum_type(id))
    }

    /// Builds the emission model of one package.
    #[must_use]
    pub fn emission_model(&self, target: &PackageTarget) -> EmissionModel<'_> {
        EmissionModel {
            package: target.package.clone(),
            module_name: naming::package_to_module_name(&target.package),
            directory: target.directory.clone(),
            messages: self
                .messages()
                .iter()
                .filter(|m| m.package == target.package)
                .collect(),
            enums: self
                .enums()
                .iter()
                .filter(|e| e.package == target.package)
                .collect(),
        }
    }
}

/// Renderer-ready view of one package.
#[derive(Debug, Clone, PartialEq)]
pub struct EmissionModel<'a> {
    /// Protobuf package.
    pub package: String,
    /// Erlang module name.
    pub module_name: String,
    /// Output directory, `.` for the root.
    pub directory: String,
    /// Package messages in declaration order.
    pub messages: Vec<&'a MessageType>,
    /// Package enums in declaration order.
    pub enums: Vec<&'a EnumType>,
}

impl EmissionModel<'_> {
    /// Path of the generated header, relative to the output root.
    #[must_use]
    pub fn hrl_path(&self) -> String {
        self.output_path("hrl")
    }

    /// Path of the generated module, relative to the output root.
    #[must_use]
    pub fn erl_path(&self) -> String {
        self.output_path("erl")
    }

    fn output_path(&self, extension: &str) -> String {
        if self.directory == "." {
            format!("{}.{extension}", self.module_name)
        } else {
            format!("{}/{}.{extension}", self.directory, self.module_name)
        }
    }
}

/// Validated and resolved generation request.
#[derive(Debug, Clone)]
pub struct SchemaIr {
    /// Package and directory being generated.
    pub target: PackageTarget,
    /// The whole resolved batch.
    pub schema: ResolvedSchema,
}

impl SchemaIr {
    /// Validates the request, then collects and resolves the whole batch.
    ///
    /// `proto_files` must contain every file referenced by the requested
    /// ones.
    ///
    /// # Errors
    /// Returns `SchemaError` if any step fails; nothing is produced then.
    pub fn from_request(
        files_to_generate: &[String],
        proto_files: &[FileDescriptorProto],
    ) -> Result<Self, SchemaError> {
        let inputs = validation::select_input_files(files_to_generate, proto_files)?;
        let target = validation::validate_package(&inputs)?;
        validation::reject_extensions(&inputs)?;
        validation::reject_default_values(&inputs)?;

        let schema = Schema::from_descriptors(proto_files)?.resolve()?;

        tracing::debug!(
            "package {} resolved from {} input files",
            target.package,
            inputs.len()
        );

        Ok(Self { target, schema })
    }

    /// Emission model of the requested package.
    #[must_use]
    pub fn emission_model(&self) -> EmissionModel<'_> {
        self.schema.emission_model(&self.target)
    }
}
