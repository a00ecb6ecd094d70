//! Type resolution.
//!
//! Runs once over the collected schema. Every field gets its value type, its
//! record field type and its default; every oneof gets its tagged union.
//! References go through the name index, so resolution does not depend on
//! declaration order.

use crate::error::{ResultExt, SchemaError};
use crate::index::{NameIndex, TypeHandle};
use crate::ir::{ResolvedSchema, Schema};
use crate::messages::{
    EnumType, FieldType, MessageType, OneofType, ResolvedField, ResolvedOneof,
};
use crate::types::{Cardinality, DefaultValue, FieldTypeId, TypeSpec};

/// Read-only view of the schema used while resolving one message.
#[derive(Debug, Clone, Copy)]
pub struct ResolveContext<'a> {
    /// Absolute name lookup.
    pub index: &'a NameIndex,
    /// Message arena.
    pub messages: &'a [MessageType],
    /// Enum arena.
    pub enums: &'a [EnumType],
}

/// Resolves all messages of a collected schema.
///
/// # Errors
/// Returns the first `SchemaError` met, wrapped with the message and field
/// it was found in.
pub fn resolve_schema(schema: Schema) -> Result<ResolvedSchema, SchemaError> {
    let Schema {
        mut messages,
        enums,
        index,
    } = schema;

    for position in 0..messages.len() {
        // Reference resolution only reads names, never the fields being
        // resolved, so they can be taken out of the arena meanwhile.
        let mut fields = std::mem::take(&mut messages[position].fields);
        let mut oneofs = std::mem::take(&mut messages[position].oneofs);

        let message = &messages[position];
        let ctx = ResolveContext {
            index: &index,
            messages: &messages,
            enums: &enums,
        };
        resolve_message_body(&message.package, &mut fields, &mut oneofs, &ctx).context_with(
            || {
                format!(
                    "cannot resolve types in message \"{}\" of package \"{}\"",
                    message.full_name, message.package
                )
            },
        )?;

        messages[position].fields = fields;
        messages[position].oneofs = oneofs;
    }

    tracing::debug!("resolved {} messages", messages.len());

    Ok(ResolvedSchema::new(Schema {
        messages,
        enums,
        index,
    }))
}

fn resolve_message_body(
    package: &str,
    fields: &mut [FieldType],
    oneofs: &mut [OneofType],
    ctx: &ResolveContext<'_>,
) -> Result<(), SchemaError> {
    for field in fields.iter_mut() {
        resolve_field(field, package, ctx)
            .context_with(|| format!("cannot resolve type of field \"{}\"", field.name))?;
    }

    for oneof in oneofs.iter_mut() {
        resolve_oneof(oneof, fields);
    }

    Ok(())
}

/// Resolves the type expressions of a field declared in `package`.
///
/// # Errors
/// Returns `SchemaError::UnknownType` for dangling references,
/// `SchemaError::Unsupported` for groups and `SchemaError::InvalidType` for
/// unrecognized wire types.
pub fn resolve_field(
    field: &mut FieldType,
    package: &str,
    ctx: &ResolveContext<'_>,
) -> Result<(), SchemaError> {
    let (value_type, default) = match field.type_id {
        FieldTypeId::Bool => (TypeSpec::Boolean, DefaultValue::Boolean(false)),
        FieldTypeId::Float | FieldTypeId::Double => (TypeSpec::Float, DefaultValue::FloatZero),
        FieldTypeId::Int32 | FieldTypeId::Sint32 | FieldTypeId::Sfixed32 => {
            (TypeSpec::signed(32), DefaultValue::Integer(0))
        }
        FieldTypeId::Int64 | FieldTypeId::Sint64 | FieldTypeId::Sfixed64 => {
            (TypeSpec::signed(64), DefaultValue::Integer(0))
        }
        FieldTypeId::Uint32 | FieldTypeId::Fixed32 => {
            (TypeSpec::unsigned(32), DefaultValue::Integer(0))
        }
        FieldTypeId::Uint64 | FieldTypeId::Fixed64 => {
            (TypeSpec::unsigned(64), DefaultValue::Integer(0))
        }
        FieldTypeId::String | FieldTypeId::Bytes => (TypeSpec::Iodata, DefaultValue::EmptyList),
        FieldTypeId::Enum => {
            let id = ctx
                .index
                .find_enum(&field.type_name)
                .ok_or_else(|| unknown_type("enum", field))?;
            let target = &ctx.enums[id.index()];
            let first = target
                .default_value()
                .ok_or_else(|| SchemaError::EmptyEnum {
                    name: target.full_name.clone(),
                })?;

            field.reference = Some(TypeHandle::Enum(id));
            (
                named(&target.module_name, &target.type_name, &target.package, package),
                DefaultValue::Atom(first.atom.clone()),
            )
        }
        FieldTypeId::Message => {
            let id = ctx
                .index
                .find_message(&field.type_name)
                .ok_or_else(|| unknown_type("message", field))?;
            let target = &ctx.messages[id.index()];

            field.reference = Some(TypeHandle::Message(id));
            (
                named(&target.module_name, &target.type_name, &target.package, package),
                DefaultValue::Undefined,
            )
        }
        FieldTypeId::Group => {
            return Err(SchemaError::unsupported("group field type", &field.name));
        }
        FieldTypeId::Unrecognized(type_id) => {
            return Err(SchemaError::InvalidType {
                field: field.name.clone(),
                type_id,
            });
        }
    };

    let (type_spec, default) = match field.cardinality {
        Cardinality::Repeated => (TypeSpec::list(value_type.clone()), DefaultValue::EmptyList),
        _ if field.type_id == FieldTypeId::Message => {
            (TypeSpec::or_undefined(value_type.clone()), DefaultValue::Undefined)
        }
        Cardinality::Optional => (TypeSpec::or_undefined(value_type.clone()), default),
        Cardinality::Required => (value_type.clone(), default),
    };

    tracing::debug!("field {} resolved to {}", field.name, type_spec);

    field.resolved = Some(ResolvedField {
        value_type,
        type_spec,
        default,
    });
    Ok(())
}

/// Resolves a oneof from its already resolved member fields.
///
/// The result is `undefined` followed by one `{field, Value}` tuple per
/// member, in declaration order.
pub fn resolve_oneof(oneof: &mut OneofType, fields: &[FieldType]) {
    let members = oneof.fields.iter().filter_map(|&i| fields.get(i));
    let alternatives = std::iter::once(TypeSpec::Undefined)
        .chain(members.filter_map(|f| {
            f.value_type().map(|value| TypeSpec::Tagged {
                tag: f.name.clone(),
                value: Box::new(value.clone()),
            })
        }))
        .collect();

    oneof.resolved = Some(ResolvedOneof {
        type_spec: TypeSpec::Union(alternatives),
        default: DefaultValue::Undefined,
    });
}

/// A reference to a user type, module-qualified when it crosses packages.
fn named(module: &str, name: &str, target_package: &str, package: &str) -> TypeSpec {
    TypeSpec::Named {
        module: (target_package != package).then(|| module.to_string()),
        name: name.to_string(),
    }
}

fn unknown_type(kind: &'static str, field: &FieldType) -> SchemaError {
    SchemaError::UnknownType {
        kind,
        type_name: field.type_name.clone(),
        field: field.name.clone(),
    }
}
