//! # Schema descriptor
//!
//! Builds the `FileDescriptorSet` of `greet.proto` by hand. It has to stay in
//! sync with the structs in [`crate::pb`]: same package, message names, field
//! names, tags and types.
use crate::{PACKAGE, SAY_HELLO};
use prost_types::{
    DescriptorProto, FieldDescriptorProto, FileDescriptorProto, FileDescriptorSet,
    MethodDescriptorProto, ServiceDescriptorProto,
    field_descriptor_proto::{Label, Type},
};

const FILE_NAME: &str = "greet.proto";

/// Returns the descriptor set describing the `greet.Greeter` service.
pub fn file_descriptor_set() -> FileDescriptorSet {
    FileDescriptorSet {
        file: vec![FileDescriptorProto {
            name: Some(FILE_NAME.to_string()),
            package: Some(PACKAGE.to_string()),
            message_type: vec![
                string_message("HelloRequest", "name"),
                string_message("HelloReply", "message"),
            ],
            service: vec![ServiceDescriptorProto {
                name: Some("Greeter".to_string()),
                method: vec![MethodDescriptorProto {
                    name: Some(SAY_HELLO.to_string()),
                    input_type: Some(format!(".{PACKAGE}.HelloRequest")),
                    output_type: Some(format!(".{PACKAGE}.HelloReply")),
                    ..Default::default()
                }],
                ..Default::default()
            }],
            syntax: Some("proto3".to_string()),
            ..Default::default()
        }],
    }
}

/// A message with a single `string` field at tag 1.
fn string_message(name: &str, field: &str) -> DescriptorProto {
    DescriptorProto {
        name: Some(name.to_string()),
        field: vec![FieldDescriptorProto {
            name: Some(field.to_string()),
            number: Some(1),
            label: Some(Label::Optional as i32),
            r#type: Some(Type::String as i32),
            json_name: Some(field.to_string()),
            ..Default::default()
        }],
        ..Default::default()
    }
}
