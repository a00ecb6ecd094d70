//! Message, enum, field and oneof nodes.
//!
//! Nodes live in two arenas owned by the schema (`Vec<MessageType>` and
//! `Vec<EnumType>`); parents and cross references are stored as
//! [`MessageId`] / [`EnumId`] handles into those arenas. Type expressions are
//! empty after collection and filled in exactly once by the resolver.

use crate::index::TypeHandle;
use crate::naming;
use crate::types::{Cardinality, DefaultValue, FieldTypeId, TypeSpec};

/// Handle of a message in the schema arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MessageId(pub(crate) usize);

impl MessageId {
    /// Returns the arena position.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

/// Handle of an enum in the schema arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EnumId(pub(crate) usize);

impl EnumId {
    /// Returns the arena position.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

/// Message declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct MessageType {
    /// Enclosing message, `None` at top level.
    pub parent: Option<MessageId>,
    /// Proto file declaring the message.
    pub file: String,
    /// Protobuf package.
    pub package: String,
    /// Local name.
    pub name: String,
    /// Dotted name from the outermost enclosing message.
    pub full_name: String,
    /// `.package.FullName`.
    pub absolute_name: String,
    /// Erlang module of the package.
    pub module_name: String,
    /// Erlang record and type name.
    pub type_name: String,
    /// Fields in declaration order.
    pub fields: Vec<FieldType>,
    /// Oneofs in declaration order.
    pub oneofs: Vec<OneofType>,
}

impl MessageType {
    /// Creates an empty message node.
    #[must_use]
    pub fn new(
        file: impl Into<String>,
        package: impl Into<String>,
        name: impl Into<String>,
        full_name: impl Into<String>,
        parent: Option<MessageId>,
    ) -> Self {
        let package = package.into();
        let full_name = full_name.into();

        Self {
            parent,
            file: file.into(),
            absolute_name: naming::absolute_name(&package, &full_name),
            module_name: naming::package_to_module_name(&package),
            type_name: naming::to_snake_case(&full_name),
            package,
            name: name.into(),
            full_name,
            fields: Vec::new(),
            oneofs: Vec::new(),
        }
    }

    /// Looks up a field by name.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&FieldType> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Looks up a oneof by name.
    #[must_use]
    pub fn oneof(&self, name: &str) -> Option<&OneofType> {
        self.oneofs.iter().find(|o| o.name == name)
    }

    /// Returns the record layout of the message.
    ///
    /// Plain fields keep their position; a oneof takes the position of its
    /// first member and memberless oneofs come last. Synthetic oneofs of
    /// proto3 optional fields are not part of the layout.
    #[must_use]
    pub fn record_entries(&self) -> Vec<RecordEntry<'_>> {
        let mut entries = Vec::with_capacity(self.fields.len());
        let mut placed = vec![false; self.oneofs.len()];

        for field in &self.fields {
            match field.oneof {
                Some(index) => {
                    let Some(oneof) = self.oneofs.get(index) else {
                        continue;
                    };
                    if !oneof.synthetic && !placed[index] {
                        placed[index] = true;
                        entries.push(RecordEntry::Oneof(oneof));
                    }
                }
                None => entries.push(RecordEntry::Field(field)),
            }
        }

        for (index, oneof) in self.oneofs.iter().enumerate() {
            if !placed[index] && !oneof.synthetic {
                entries.push(RecordEntry::Oneof(oneof));
            }
        }

        entries
    }
}

/// One entry of a message record.
#[derive(Debug, Clone, Copy)]
pub enum RecordEntry<'a> {
    /// Field outside any oneof.
    Field(&'a FieldType),
    /// Oneof, as a single tagged-union entry.
    Oneof(&'a OneofType),
}

impl<'a> RecordEntry<'a> {
    /// Returns the record field name.
    #[must_use]
    pub fn name(&self) -> &'a str {
        match self {
            Self::Field(f) => &f.name,
            Self::Oneof(o) => &o.name,
        }
    }
}

/// Type expressions of a resolved field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedField {
    /// Type of a single value, before cardinality wrapping.
    pub value_type: TypeSpec,
    /// Type of the record field.
    pub type_spec: TypeSpec,
    /// Record field default.
    pub default: DefaultValue,
}

/// Field declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldType {
    /// Local name, also the Erlang record field name.
    pub name: String,
    /// Field number.
    pub number: i32,
    /// Cardinality.
    pub cardinality: Cardinality,
    /// Declared type.
    pub type_id: FieldTypeId,
    /// Absolute name of the referenced enum or message, empty for scalars.
    pub type_name: String,
    /// Position of the oneof in the owning message.
    pub oneof: Option<usize>,
    /// Declared with proto3 `optional`.
    pub proto3_optional: bool,
    /// Referenced declaration, set by the resolver for enum and message fields.
    pub reference: Option<TypeHandle>,
    /// Type expressions, set by the resolver.
    pub resolved: Option<ResolvedField>,
}

impl FieldType {
    /// Creates an unresolved field.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        number: i32,
        cardinality: Cardinality,
        type_id: FieldTypeId,
        type_name: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            number,
            cardinality,
            type_id,
            type_name: type_name.into(),
            oneof: None,
            proto3_optional: false,
            reference: None,
            resolved: None,
        }
    }

    /// Value type, once resolved.
    #[must_use]
    pub fn value_type(&self) -> Option<&TypeSpec> {
        self.resolved.as_ref().map(|r| &r.value_type)
    }

    /// Record field type, once resolved.
    #[must_use]
    pub fn type_spec(&self) -> Option<&TypeSpec> {
        self.resolved.as_ref().map(|r| &r.type_spec)
    }

    /// Default value, once resolved.
    #[must_use]
    pub fn default_value(&self) -> Option<&DefaultValue> {
        self.resolved.as_ref().map(|r| &r.default)
    }
}

/// Type expressions of a resolved oneof.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedOneof {
    /// `undefined | {field, Value} | ...`.
    pub type_spec: TypeSpec,
    /// Always `undefined`.
    pub default: DefaultValue,
}

/// Oneof declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct OneofType {
    /// Owning message.
    pub message: MessageId,
    /// Local name, also the Erlang record field name.
    pub name: String,
    /// Positions of member fields in the owning message, declaration order.
    pub fields: Vec<usize>,
    /// Generated by protoc for a proto3 `optional` field.
    pub synthetic: bool,
    /// Type expressions, set by the resolver.
    pub resolved: Option<ResolvedOneof>,
}

impl OneofType {
    /// Creates an empty oneof.
    #[must_use]
    pub fn new(message: MessageId, name: impl Into<String>) -> Self {
        Self {
            message,
            name: name.into(),
            fields: Vec::new(),
            synthetic: false,
            resolved: None,
        }
    }

    /// Adds a member field by position; a field is only recorded once.
    pub fn add_field(&mut self, index: usize) {
        if !self.fields.contains(&index) {
            self.fields.push(index);
        }
    }
}

/// Enum value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumValue {
    /// Protobuf name.
    pub name: String,
    /// Numeric tag.
    pub number: i32,
    /// Erlang atom.
    pub atom: String,
}

impl EnumValue {
    /// Creates an enum value.
    #[must_use]
    pub fn new(name: impl Into<String>, number: i32) -> Self {
        let name = name.into();
        Self {
            atom: naming::enum_value_to_atom(&name),
            name,
            number,
        }
    }
}

/// Enum declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumType {
    /// Enclosing message, `None` at top level.
    pub parent: Option<MessageId>,
    /// Proto file declaring the enum.
    pub file: String,
    /// Protobuf package.
    pub package: String,
    /// Local name.
    pub name: String,
    /// Dotted name from the outermost enclosing message.
    pub full_name: String,
    /// `.package.FullName`.
    pub absolute_name: String,
    /// Erlang module of the package.
    pub module_name: String,
    /// Erlang type name.
    pub type_name: String,
    /// Values in declaration order, never empty.
    pub values: Vec<EnumValue>,
}

impl EnumType {
    /// Creates an enum node without values.
    #[must_use]
    pub fn new(
        file: impl Into<String>,
        package: impl Into<String>,
        name: impl Into<String>,
        full_name: impl Into<String>,
        parent: Option<MessageId>,
    ) -> Self {
        let package = package.into();
        let full_name = full_name.into();

        Self {
            parent,
            file: file.into(),
            absolute_name: naming::absolute_name(&package, &full_name),
            module_name: naming::package_to_module_name(&package),
            type_name: naming::to_snake_case(&full_name),
            package,
            name: name.into(),
            full_name,
            values: Vec::new(),
        }
    }

    /// The implicit protobuf default: the first declared value.
    #[must_use]
    pub fn default_value(&self) -> Option<&EnumValue> {
        self.values.first()
    }

    /// The Erlang type of the enum: the union of its value atoms.
    #[must_use]
    pub fn type_spec(&self) -> TypeSpec {
        TypeSpec::Union(
            self.values
                .iter()
                .map(|v| TypeSpec::Atom(v.atom.clone()))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message_with_oneofs() -> MessageType {
        let mut msg = MessageType::new("p/a.proto", "p", "Shape", "Shape", None);
        msg.fields = vec![
            FieldType::new("id", 1, Cardinality::Optional, FieldTypeId::Int32, ""),
            FieldType::new("circle", 2, Cardinality::Optional, FieldTypeId::Double, ""),
            FieldType::new("name", 3, Cardinality::Optional, FieldTypeId::String, ""),
            FieldType::new("square", 4, Cardinality::Optional, FieldTypeId::Double, ""),
        ];
        msg.fields[1].oneof = Some(0);
        msg.fields[3].oneof = Some(0);

        let mut kind = OneofType::new(MessageId(0), "kind");
        kind.add_field(1);
        kind.add_field(3);
        msg.oneofs = vec![kind, OneofType::new(MessageId(0), "empty")];
        msg
    }

    #[test]
    fn test_message_names() {
        let msg = MessageType::new("p/a.proto", "foo.bar", "Inner", "Outer.Inner", None);
        assert_eq!(msg.absolute_name, ".foo.bar.Outer.Inner");
        assert_eq!(msg.module_name, "foo_bar");
        assert_eq!(msg.type_name, "outer_inner");
    }

    #[test]
    fn test_record_entries_place_oneof_at_first_member() {
        let msg = message_with_oneofs();
        let names: Vec<&str> = msg.record_entries().iter().map(|e| e.name()).collect();
        assert_eq!(names, vec!["id", "kind", "name", "empty"]);
    }

    #[test]
    fn test_record_entries_skip_synthetic_oneof() {
        let mut msg = MessageType::new("p/a.proto", "p", "A", "A", None);
        let mut field = FieldType::new("x", 1, Cardinality::Optional, FieldTypeId::Int32, "");
        field.proto3_optional = true;
        msg.fields.push(field);
        let mut synthetic = OneofType::new(MessageId(0), "_x");
        synthetic.synthetic = true;
        msg.oneofs.push(synthetic);

        let names: Vec<&str> = msg.record_entries().iter().map(|e| e.name()).collect();
        assert_eq!(names, vec!["x"]);
    }

    #[test]
    fn test_oneof_add_field_once() {
        let mut oneof = OneofType::new(MessageId(0), "o");
        oneof.add_field(2);
        oneof.add_field(2);
        oneof.add_field(5);
        assert_eq!(oneof.fields, vec![2, 5]);
    }

    #[test]
    fn test_enum_type_spec_and_default() {
        let mut color = EnumType::new("p/a.proto", "p", "Color", "Color", None);
        assert!(color.default_value().is_none());

        color.values.push(EnumValue::new("GREEN", 1));
        color.values.push(EnumValue::new("RED", 0));

        assert_eq!(color.default_value().map(|v| v.atom.as_str()), Some("green"));
        assert_eq!(color.type_spec().to_string(), "green | red");
    }
}
