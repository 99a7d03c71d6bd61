use crate::schema::FieldDef;
use indexmap::IndexMap;
use serde::Serialize;

/// Information associated with [GraphQLType::Interface](crate::schema::GraphQLType::Interface)
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct InterfaceType {
    pub fields: IndexMap<String, FieldDef>,
    pub name: String,
}
