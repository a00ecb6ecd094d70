//! Type module (`.erl`) generation.

use super::{banner, export_types};
use erlproto_schema::ir::EmissionModel;
use erlproto_schema::messages::{EnumType, MessageType};
use erlproto_schema::naming::quote_atom;
use erlproto_schema::types::TypeSpec;

/// Generator for the exported types of a package.
pub struct ModuleGenerator<'a> {
    model: &'a EmissionModel<'a>,
}

impl<'a> ModuleGenerator<'a> {
    /// Creates a new module generator.
    #[must_use]
    pub fn new(model: &'a EmissionModel<'a>) -> Self {
        Self { model }
    }

    /// Generates the module: attributes, export lists, then one type per
    /// enum and per message.
    #[must_use]
    pub fn generate(&self) -> String {
        let module = quote_atom(&self.model.module_name);
        let mut output = banner(&self.model.package);

        output.push_str(&format!("\n-module({module}).\n"));
        output.push_str(&format!(
            "\n-include(\"{}.hrl\").\n",
            self.model.module_name
        ));

        output.push('\n');
        output.push_str(&export_types(
            self.model.enums.iter().map(|e| e.type_name.as_str()),
        ));
        output.push('\n');
        output.push_str(&export_types(
            self.model.messages.iter().map(|m| m.type_name.as_str()),
        ));

        for enum_type in &self.model.enums {
            output.push('\n');
            output.push_str(&self.generate_enum(enum_type));
        }

        for message in &self.model.messages {
            output.push('\n');
            output.push_str(&self.generate_message(message));
        }

        output
    }

    /// Generates an enum type: the union of its value atoms.
    fn generate_enum(&self, enum_type: &EnumType) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            "%% Generated for enum type {}.\n",
            enum_type.full_name
        ));
        output.push_str(&format!(
            "-type {}() :: {}.\n",
            quote_atom(&enum_type.type_name),
            enum_type.type_spec()
        ));

        output
    }

    /// Generates a message type aliased to its record.
    fn generate_message(&self, message: &MessageType) -> String {
        let mut output = String::new();
        let record = TypeSpec::Record {
            name: message.type_name.clone(),
        };

        output.push_str(&format!(
            "%% Generated for message type {}.\n",
            message.full_name
        ));
        output.push_str(&format!(
            "-type {}() :: {record}.\n",
            quote_atom(&message.type_name)
        ));

        output
    }
}
