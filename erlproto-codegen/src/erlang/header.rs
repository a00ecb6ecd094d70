//! Record header (`.hrl`) generation.

use super::banner;
use crate::error::CodegenError;
use erlproto_schema::ir::EmissionModel;
use erlproto_schema::messages::{MessageType, RecordEntry};
use erlproto_schema::naming::quote_atom;

/// Generator for the record definitions of a package.
pub struct HeaderGenerator<'a> {
    model: &'a EmissionModel<'a>,
}

impl<'a> HeaderGenerator<'a> {
    /// Creates a new header generator.
    #[must_use]
    pub fn new(model: &'a EmissionModel<'a>) -> Self {
        Self { model }
    }

    /// Generates the header: one record per package message.
    ///
    /// # Errors
    /// Returns `CodegenError::Generation` if a record field has no resolved
    /// type.
    pub fn generate(&self) -> Result<String, CodegenError> {
        let mut output = banner(&self.model.package);

        for message in &self.model.messages {
            output.push('\n');
            output.push_str(&self.generate_record(message)?);
        }

        Ok(output)
    }

    /// Generates a record definition.
    fn generate_record(&self, message: &MessageType) -> Result<String, CodegenError> {
        let mut output = String::new();
        let record_name = quote_atom(&message.type_name);

        output.push_str(&format!(
            "%% Generated for message type {}.\n",
            message.full_name
        ));

        let fields = message
            .record_entries()
            .iter()
            .map(|entry| record_field(&self.model.module_name, message, entry))
            .collect::<Result<Vec<_>, _>>()?;

        if fields.is_empty() {
            output.push_str(&format!("-record({record_name}, {{}}).\n"));
        } else {
            output.push_str(&format!("-record({record_name}, {{\n"));
            output.push_str(&fields.join(",\n"));
            output.push_str("\n}).\n");
        }

        Ok(output)
    }
}

/// Renders `name = Default :: Type`.
///
/// User types are qualified with `module`, which defines them, so the
/// header stays valid wherever it is included.
fn record_field(
    module: &str,
    message: &MessageType,
    entry: &RecordEntry<'_>,
) -> Result<String, CodegenError> {
    let resolved = match entry {
        RecordEntry::Field(f) => f.resolved.as_ref().map(|r| (&r.default, &r.type_spec)),
        RecordEntry::Oneof(o) => o.resolved.as_ref().map(|r| (&r.default, &r.type_spec)),
    };

    let (default, type_spec) = resolved.ok_or_else(|| {
        CodegenError::generation(format!(
            "field '{}' of message {} has no resolved type",
            entry.name(),
            message.full_name
        ))
    })?;

    Ok(format!(
        "  {} = {default} :: {}",
        quote_atom(entry.name()),
        type_spec.qualified(module)
    ))
}
