use serde::Serialize;

/// Information associated with [GraphQLType::Enum](crate::schema::GraphQLType::Enum)
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct EnumType {
    pub name: String,
    pub values: Vec<String>,
}
