use crate::schema::FieldDef;
use indexmap::IndexMap;
use serde::Serialize;

/// Information associated with [GraphQLType::InputObject](crate::schema::GraphQLType::InputObject)
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct InputObjectType {
    pub fields: IndexMap<String, FieldDef>,
    pub name: String,
}
