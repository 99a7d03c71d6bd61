use crate::schema::FieldDef;
use indexmap::IndexMap;
use serde::Serialize;

/// Information associated with [GraphQLType::Object](crate::schema::GraphQLType::Object)
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ObjectType {
    pub fields: IndexMap<String, FieldDef>,
    pub interfaces: Vec<String>,
    pub name: String,
}
