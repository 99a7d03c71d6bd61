use serde::Serialize;

/// Information associated with [GraphQLType::Union](crate::schema::GraphQLType::Union)
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct UnionType {
    pub name: String,
    pub types: Vec<String>,
}
