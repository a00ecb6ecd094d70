//! Generation of the Erlang files of a package.

use crate::erlang::{HeaderGenerator, ModuleGenerator};
use crate::error::CodegenError;
use crate::options::GeneratorOptions;
use erlproto_schema::SchemaIr;

/// A generated file, path relative to the output root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    /// Output path.
    pub name: String,
    /// File content.
    pub content: String,
}

/// Generates the `.hrl` and `.erl` files of the requested package.
pub struct Generator<'a> {
    ir: &'a SchemaIr,
    options: GeneratorOptions,
}

impl<'a> Generator<'a> {
    /// Creates a generator with default options.
    #[must_use]
    pub fn new(ir: &'a SchemaIr) -> Self {
        Self {
            ir,
            options: GeneratorOptions::default(),
        }
    }

    /// Sets the generator options.
    #[must_use]
    pub fn options(mut self, options: GeneratorOptions) -> Self {
        self.options = options;
        self
    }

    /// Generates the header and the module, in that order.
    ///
    /// # Errors
    /// Returns `CodegenError` if a record cannot be rendered.
    pub fn generate(&self) -> Result<Vec<GeneratedFile>, CodegenError> {
        let model = self.ir.emission_model();

        let files = vec![
            GeneratedFile {
                name: model.hrl_path(),
                content: HeaderGenerator::new(&model).generate()?,
            },
            GeneratedFile {
                name: model.erl_path(),
                content: ModuleGenerator::new(&model).generate(),
            },
        ];

        for file in &files {
            if self.options.is_verbose() {
                tracing::info!("generating {}", file.name);
            } else {
                tracing::debug!("generating {}", file.name);
            }
        }

        Ok(files)
    }
}
