use serde::Serialize;

/// Information associated with [GraphQLType::Scalar](crate::schema::GraphQLType::Scalar)
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ScalarType {
    pub name: String,
}
