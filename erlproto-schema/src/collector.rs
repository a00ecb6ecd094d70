//! Descriptor collection.
//!
//! Walks every file descriptor of the batch and builds one unresolved node
//! per message and enum declaration. Messages are collected first, in
//! depth-first pre-order; enums come second because nested enums need the
//! handle of their enclosing message.

use crate::error::{ResultExt, SchemaError};
use crate::index::{NameIndex, TypeHandle};
use crate::ir::Schema;
use crate::messages::{EnumId, EnumType, EnumValue, FieldType, MessageId, MessageType, OneofType};
use crate::naming;
use crate::types::{Cardinality, FieldTypeId};
use prost_types::{DescriptorProto, EnumDescriptorProto, FieldDescriptorProto, FileDescriptorProto};

/// Builds the unresolved schema of a descriptor batch.
#[derive(Debug, Default)]
pub struct Collector {
    messages: Vec<MessageType>,
    enums: Vec<EnumType>,
    index: NameIndex,
}

impl Collector {
    /// Creates an empty collector.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Collects all messages and enums of `files`.
    ///
    /// # Errors
    /// Returns `SchemaError` for malformed fields or enums, unsupported
    /// features, and duplicate absolute names.
    pub fn collect(mut self, files: &[FileDescriptorProto]) -> Result<Schema, SchemaError> {
        for fd in files {
            for d in &fd.message_type {
                self.add_message(fd, d, None)?;
            }
        }

        let mut cursor = 0;
        for fd in files {
            for ed in &fd.enum_type {
                self.add_enum(fd, ed, None)?;
            }
            for d in &fd.message_type {
                self.add_nested_enums(fd, d, &mut cursor)?;
            }
        }

        tracing::debug!(
            "collected {} messages and {} enums from {} files",
            self.messages.len(),
            self.enums.len(),
            files.len()
        );

        Ok(Schema {
            messages: self.messages,
            enums: self.enums,
            index: self.index,
        })
    }

    /// Adds a message and, after it, its nested messages.
    fn add_message(
        &mut self,
        fd: &FileDescriptorProto,
        d: &DescriptorProto,
        parent: Option<MessageId>,
    ) -> Result<(), SchemaError> {
        let id = MessageId(self.messages.len());
        let full_name = self.qualified_name(parent, d.name());
        let mut mt = MessageType::new(fd.name(), fd.package(), d.name(), full_name, parent);

        parse_message_body(&mut mt, id, d)
            .and_then(|()| {
                self.index
                    .insert(&mt.absolute_name, TypeHandle::Message(id))
            })
            .context_with(|| {
                format!(
                    "cannot create type for message {} in package {}",
                    d.name(),
                    fd.package()
                )
            })?;

        self.messages.push(mt);

        for nested in &d.nested_type {
            self.add_message(fd, nested, Some(id))?;
        }

        Ok(())
    }

    /// Adds the enums declared inside `d` and its nested messages.
    ///
    /// `cursor` follows the pre-order of [`Collector::add_message`], so it
    /// always points at the handle of `d`.
    fn add_nested_enums(
        &mut self,
        fd: &FileDescriptorProto,
        d: &DescriptorProto,
        cursor: &mut usize,
    ) -> Result<(), SchemaError> {
        let id = MessageId(*cursor);
        *cursor += 1;
        debug_assert_eq!(self.messages[id.0].name, d.name());

        for ed in &d.enum_type {
            self.add_enum(fd, ed, Some(id))?;
        }

        for nested in &d.nested_type {
            self.add_nested_enums(fd, nested, cursor)?;
        }

        Ok(())
    }

    fn add_enum(
        &mut self,
        fd: &FileDescriptorProto,
        ed: &EnumDescriptorProto,
        parent: Option<MessageId>,
    ) -> Result<(), SchemaError> {
        let id = EnumId(self.enums.len());
        let full_name = self.qualified_name(parent, ed.name());
        let mut et = EnumType::new(fd.name(), fd.package(), ed.name(), full_name, parent);

        et.values = ed
            .value
            .iter()
            .map(|v| EnumValue::new(v.name(), v.number()))
            .collect();

        let result = if et.values.is_empty() {
            Err(SchemaError::EmptyEnum {
                name: et.full_name.clone(),
            })
        } else {
            self.index.insert(&et.absolute_name, TypeHandle::Enum(id))
        };
        result.context_with(|| {
            format!(
                "cannot create type for enum {} in package {}",
                ed.name(),
                fd.package()
            )
        })?;

        self.enums.push(et);
        Ok(())
    }

    /// Dotted name of a declaration: its ancestors' names, root first, then
    /// its own.
    fn qualified_name(&self, parent: Option<MessageId>, name: &str) -> String {
        let ancestors = std::iter::successors(parent, |id| self.messages[id.0].parent)
            .map(|id| self.messages[id.0].name.as_str());
        naming::qualified_name(std::iter::once(name).chain(ancestors))
    }
}

/// Parses the oneofs and fields of a message, then attaches oneof members.
fn parse_message_body(
    mt: &mut MessageType,
    id: MessageId,
    d: &DescriptorProto,
) -> Result<(), SchemaError> {
    mt.oneofs = d
        .oneof_decl
        .iter()
        .map(|od| OneofType::new(id, od.name()))
        .collect();

    for fid in &d.field {
        let field =
            parse_field(fid).context_with(|| format!("invalid field \"{}\"", fid.name()))?;
        mt.fields.push(field);
    }

    for (position, fid) in d.field.iter().enumerate() {
        let Some(raw) = fid.oneof_index else {
            continue;
        };

        let index = usize::try_from(raw)
            .ok()
            .filter(|&i| i < mt.oneofs.len())
            .ok_or_else(|| SchemaError::InvalidOneofIndex {
                field: fid.name().to_string(),
                index: raw,
            })?;

        let field = &mut mt.fields[position];
        if field.proto3_optional {
            mt.oneofs[index].synthetic = true;
        } else {
            field.oneof = Some(index);
            mt.oneofs[index].add_field(position);
        }
    }

    Ok(())
}

/// Parses a field declaration.
fn parse_field(fid: &FieldDescriptorProto) -> Result<FieldType, SchemaError> {
    let name = fid.name();

    let label = fid.label.ok_or_else(|| SchemaError::MissingLabel {
        field: name.to_string(),
    })?;
    let cardinality = Cardinality::from_proto(label).map_err(|label| SchemaError::InvalidLabel {
        field: name.to_string(),
        label,
    })?;

    if fid.extendee.as_deref().is_some_and(|e| !e.is_empty()) {
        return Err(SchemaError::unsupported("extension field", name));
    }

    let type_id = FieldTypeId::from_proto(fid.r#type);
    if let FieldTypeId::Unrecognized(type_id) = type_id {
        return Err(SchemaError::InvalidType {
            field: name.to_string(),
            type_id,
        });
    }

    let mut field = FieldType::new(name, fid.number(), cardinality, type_id, fid.type_name());
    field.proto3_optional = fid.proto3_optional();
    Ok(field)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use prost_types::field_descriptor_proto::{Label, Type};
    use prost_types::{EnumValueDescriptorProto, OneofDescriptorProto};

    fn field(name: &str, number: i32, label: Label, ty: Type) -> FieldDescriptorProto {
        FieldDescriptorProto {
            name: Some(name.to_string()),
            number: Some(number),
            label: Some(label as i32),
            r#type: Some(ty as i32),
            ..Default::default()
        }
    }

    fn message(name: &str, fields: Vec<FieldDescriptorProto>) -> DescriptorProto {
        DescriptorProto {
            name: Some(name.to_string()),
            field: fields,
            ..Default::default()
        }
    }

    fn enumeration(name: &str, values: &[(&str, i32)]) -> EnumDescriptorProto {
        EnumDescriptorProto {
            name: Some(name.to_string()),
            value: values
                .iter()
                .map(|(n, v)| EnumValueDescriptorProto {
                    name: Some(n.to_string()),
                    number: Some(*v),
                    ..Default::default()
                })
                .collect(),
            ..Default::default()
        }
    }

    fn file(package: &str, messages: Vec<DescriptorProto>) -> FileDescriptorProto {
        FileDescriptorProto {
            name: Some(format!("{package}/test.proto")),
            package: Some(package.to_string()),
            message_type: messages,
            ..Default::default()
        }
    }

    #[test]
    fn test_collect_nested_pre_order() {
        let mut outer = message("Outer", vec![]);
        let mut middle = message("Middle", vec![]);
        middle.nested_type.push(message("Inner", vec![]));
        outer.nested_type.push(middle);
        outer.nested_type.push(message("Sibling", vec![]));

        let schema = Collector::new()
            .collect(&[file("p", vec![outer, message("Last", vec![])])])
            .expect("collect");

        let names: Vec<&str> = schema.messages.iter().map(|m| m.full_name.as_str()).collect();
        assert_eq!(
            names,
            vec!["Outer", "Outer.Middle", "Outer.Middle.Inner", "Outer.Sibling", "Last"]
        );

        let inner = &schema.messages[2];
        assert_eq!(inner.absolute_name, ".p.Outer.Middle.Inner");
        assert_eq!(inner.parent, Some(MessageId(1)));
        assert_eq!(schema.messages[0].parent, None);
        assert_eq!(schema.index.find_message(".p.Outer.Sibling"), Some(MessageId(3)));
    }

    #[test]
    fn test_collect_enums_with_parents() {
        let mut outer = message("Outer", vec![]);
        let mut inner = message("Inner", vec![]);
        inner.enum_type.push(enumeration("Mode", &[("MODE_A", 0)]));
        outer.nested_type.push(inner);

        let mut fd = file("p", vec![outer]);
        fd.enum_type.push(enumeration("Color", &[("RED", 0), ("GREEN", 1)]));

        let schema = Collector::new().collect(&[fd]).expect("collect");

        assert_eq!(schema.enums.len(), 2);
        assert_eq!(schema.enums[0].full_name, "Color");
        assert_eq!(schema.enums[0].parent, None);
        assert_eq!(schema.enums[1].full_name, "Outer.Inner.Mode");
        assert_eq!(schema.enums[1].type_name, "outer_inner_mode");
        assert_eq!(schema.enums[1].parent, Some(MessageId(1)));
        assert_eq!(schema.index.find_enum(".p.Outer.Inner.Mode"), Some(EnumId(1)));
    }

    #[test]
    fn test_collect_oneof_members_in_declaration_order() {
        let mut fields = vec![
            field("a", 1, Label::Optional, Type::Int32),
            field("b", 2, Label::Optional, Type::String),
            field("c", 3, Label::Optional, Type::Bool),
        ];
        fields[0].oneof_index = Some(0);
        fields[2].oneof_index = Some(0);
        let mut msg = message("M", fields);
        msg.oneof_decl = vec![
            OneofDescriptorProto {
                name: Some("choice".to_string()),
                ..Default::default()
            },
            OneofDescriptorProto {
                name: Some("unused".to_string()),
                ..Default::default()
            },
        ];

        let schema = Collector::new().collect(&[file("p", vec![msg])]).expect("collect");
        let m = &schema.messages[0];

        assert_eq!(m.oneofs[0].fields, vec![0, 2]);
        assert_eq!(m.oneofs[0].message, MessageId(0));
        assert!(m.oneofs[1].fields.is_empty());
        assert_eq!(m.fields[2].oneof, Some(0));
        assert_eq!(m.fields[1].oneof, None);
    }

    #[test]
    fn test_collect_proto3_optional_is_plain_field() {
        let mut x = field("x", 1, Label::Optional, Type::Int32);
        x.oneof_index = Some(0);
        x.proto3_optional = Some(true);
        let mut msg = message("M", vec![x]);
        msg.oneof_decl.push(OneofDescriptorProto {
            name: Some("_x".to_string()),
            ..Default::default()
        });

        let schema = Collector::new().collect(&[file("p", vec![msg])]).expect("collect");
        let m = &schema.messages[0];

        assert!(m.fields[0].proto3_optional);
        assert_eq!(m.fields[0].oneof, None);
        assert!(m.oneofs[0].synthetic);
        assert!(m.oneofs[0].fields.is_empty());
    }

    #[test]
    fn test_collect_invalid_oneof_index() {
        let mut x = field("x", 1, Label::Optional, Type::Int32);
        x.oneof_index = Some(2);
        let err = Collector::new()
            .collect(&[file("p", vec![message("M", vec![x])])])
            .expect_err("invalid index");

        assert_eq!(err.kind(), ErrorKind::MalformedField);
        let text = err.to_string();
        assert!(text.contains("message M in package p"));
        assert!(text.contains("'x'"));
    }

    #[test]
    fn test_collect_missing_and_invalid_label() {
        let mut x = field("x", 1, Label::Optional, Type::Int32);
        x.label = None;
        let err = Collector::new()
            .collect(&[file("p", vec![message("M", vec![x])])])
            .expect_err("missing label");
        assert!(matches!(err.root(), SchemaError::MissingLabel { .. }));

        let mut y = field("y", 1, Label::Optional, Type::Int32);
        y.label = Some(9);
        let err = Collector::new()
            .collect(&[file("p", vec![message("M", vec![y])])])
            .expect_err("invalid label");
        assert!(matches!(err.root(), SchemaError::InvalidLabel { label: 9, .. }));
        assert!(err.to_string().contains("invalid field \"y\""));
    }

    #[test]
    fn test_collect_invalid_type() {
        let mut x = field("x", 1, Label::Optional, Type::Int32);
        x.r#type = Some(42);
        let err = Collector::new()
            .collect(&[file("p", vec![message("M", vec![x])])])
            .expect_err("invalid type");

        assert!(matches!(
            err.root(),
            SchemaError::InvalidType {
                type_id: Some(42),
                ..
            }
        ));
        assert!(err.to_string().contains("package p"));
    }

    #[test]
    fn test_collect_rejects_extendee() {
        let mut ext = field("ext", 100, Label::Optional, Type::Int32);
        ext.extendee = Some(".p.Other".to_string());
        let err = Collector::new()
            .collect(&[file("p", vec![message("M", vec![ext])])])
            .expect_err("extension");
        assert_eq!(err.kind(), ErrorKind::UnsupportedFeature);
    }

    #[test]
    fn test_collect_accepts_default_values() {
        let mut with_default = field("d", 1, Label::Optional, Type::Bool);
        with_default.default_value = Some("false".to_string());
        let schema = Collector::new()
            .collect(&[file("p", vec![message("M", vec![with_default])])])
            .expect("collect");
        assert_eq!(schema.messages[0].fields.len(), 1);
    }

    #[test]
    fn test_collect_group_field_passes_collection() {
        let g = field("g", 1, Label::Optional, Type::Group);
        let schema = Collector::new()
            .collect(&[file("p", vec![message("M", vec![g])])])
            .expect("collect");
        assert_eq!(schema.messages[0].fields[0].type_id, FieldTypeId::Group);
    }

    #[test]
    fn test_collect_empty_enum() {
        let mut fd = file("p", vec![]);
        fd.enum_type.push(enumeration("Nothing", &[]));
        let err = Collector::new().collect(&[fd]).expect_err("empty enum");
        assert_eq!(err.kind(), ErrorKind::MalformedEnum);
    }

    #[test]
    fn test_collect_duplicate_names() {
        let err = Collector::new()
            .collect(&[
                file("p", vec![message("A", vec![])]),
                file("p", vec![message("A", vec![])]),
            ])
            .expect_err("duplicate");
        assert_eq!(err.kind(), ErrorKind::NameCollision);

        let mut fd = file("p", vec![message("A", vec![])]);
        fd.enum_type.push(enumeration("A", &[("X", 0)]));
        let err = Collector::new().collect(&[fd]).expect_err("duplicate");
        assert_eq!(err.kind(), ErrorKind::NameCollision);
    }

    #[test]
    fn test_collect_across_files_and_packages() {
        let schema = Collector::new()
            .collect(&[
                file("p", vec![message("A", vec![])]),
                file("q.r", vec![message("A", vec![])]),
            ])
            .expect("collect");

        assert_eq!(schema.messages[1].absolute_name, ".q.r.A");
        assert_eq!(schema.messages[1].module_name, "q_r");
        assert_eq!(schema.messages[1].file, "q.r/test.proto");
    }
}
