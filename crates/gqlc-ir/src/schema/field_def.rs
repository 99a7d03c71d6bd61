use crate::ir::TypeAnnotation;
use serde::Serialize;

/// Represents a defined field on an [ObjectType](crate::schema::ObjectType),
/// [InterfaceType](crate::schema::InterfaceType), or
/// [InputObjectType](crate::schema::InputObjectType).
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FieldDef {
    pub field_type: TypeAnnotation,
    pub name: String,
}
