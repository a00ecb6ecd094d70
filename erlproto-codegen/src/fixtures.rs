//! Descriptor fixtures shared by the generator tests.

use erlproto_schema::SchemaIr;
use prost_types::compiler::CodeGeneratorRequest;
use prost_types::field_descriptor_proto::{Label, Type};
use prost_types::{
    DescriptorProto, EnumDescriptorProto, EnumValueDescriptorProto, FieldDescriptorProto,
    FileDescriptorProto, OneofDescriptorProto,
};

pub(crate) fn field(name: &str, number: i32, label: Label, ty: Type) -> FieldDescriptorProto {
    FieldDescriptorProto {
        name: Some(name.to_string()),
        number: Some(number),
        label: Some(label as i32),
        r#type: Some(ty as i32),
        ..Default::default()
    }
}

fn reference(name: &str, number: i32, label: Label, ty: Type, target: &str) -> FieldDescriptorProto {
    FieldDescriptorProto {
        type_name: Some(target.to_string()),
        ..field(name, number, label, ty)
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

/// `shop/order.proto`:
///
/// ```text
/// enum Status { STATUS_UNKNOWN = 0; PAID = 1; }
/// message Order {
///   message Item {
///     enum State { IN_STOCK = 0; BACKORDERED = 1; }
///     string sku = 1;
///     uint32 quantity = 2;
///   }
///   int64 id = 1;
///   repeated Item items = 2;
///   Status status = 3;
///   oneof payment { string card = 4; Voucher voucher = 5; }
/// }
/// message Voucher { string code = 1; }
/// message Empty {}
/// ```
pub(crate) fn shop_file() -> FileDescriptorProto {
    let mut item = DescriptorProto {
        name: Some("Item".to_string()),
        field: vec![
            field("sku", 1, Label::Optional, Type::String),
            field("quantity", 2, Label::Optional, Type::Uint32),
        ],
        ..Default::default()
    };
    item.enum_type
        .push(enumeration("State", &[("IN_STOCK", 0), ("BACKORDERED", 1)]));

    let mut card = field("card", 4, Label::Optional, Type::String);
    card.oneof_index = Some(0);
    let mut voucher = reference("voucher", 5, Label::Optional, Type::Message, ".shop.Voucher");
    voucher.oneof_index = Some(0);

    let order = DescriptorProto {
        name: Some("Order".to_string()),
        field: vec![
            field("id", 1, Label::Optional, Type::Int64),
            reference("items", 2, Label::Repeated, Type::Message, ".shop.Order.Item"),
            reference("status", 3, Label::Optional, Type::Enum, ".shop.Status"),
            card,
            voucher,
        ],
        nested_type: vec![item],
        oneof_decl: vec![OneofDescriptorProto {
            name: Some("payment".to_string()),
            ..Default::default()
        }],
        ..Default::default()
    };

    FileDescriptorProto {
        name: Some("shop/order.proto".to_string()),
        package: Some("shop".to_string()),
        syntax: Some("proto3".to_string()),
        message_type: vec![
            order,
            DescriptorProto {
                name: Some("Voucher".to_string()),
                field: vec![field("code", 1, Label::Optional, Type::String)],
                ..Default::default()
            },
            DescriptorProto {
                name: Some("Empty".to_string()),
                ..Default::default()
            },
        ],
        enum_type: vec![enumeration("Status", &[("STATUS_UNKNOWN", 0), ("PAID", 1)])],
        ..Default::default()
    }
}

pub(crate) fn shop_request() -> CodeGeneratorRequest {
    CodeGeneratorRequest {
        file_to_generate: vec!["shop/order.proto".to_string()],
        proto_file: vec![shop_file()],
        ..Default::default()
    }
}

pub(crate) fn shop_ir() -> SchemaIr {
    let request = shop_request();
    SchemaIr::from_request(&request.file_to_generate, &request.proto_file).expect("shop schema")
}
