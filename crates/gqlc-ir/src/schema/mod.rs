mod enum_type;
mod field_def;
mod graphql_type;
mod input_object_type;
mod interface_type;
mod object_type;
mod scalar_type;
mod schema_builder;
mod union_type;


pub use enum_type::EnumType;
pub use field_def::FieldDef;
pub use graphql_type::GraphQLType;
pub use graphql_type::NamedTypeRef;
pub use input_object_type::InputObjectType;
pub use interface_type::InterfaceType;
pub use object_type::ObjectType;
pub use scalar_type::ScalarType;
pub use schema_builder::SchemaBuildError;
pub use schema_builder::SchemaBuilder;
pub use union_type::UnionType;

use crate::ir::OperationKind;
use indexmap::IndexMap;
use serde::Serialize;

/// A GraphQL schema: the full set of named types plus the designated
/// operation root types. Built via [SchemaBuilder]; immutable thereafter.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Schema {
    pub(super) mutation_type: Option<String>,
    pub(super) query_type: String,
    pub(super) subscription_type: Option<String>,
    pub(super) types: IndexMap<String, GraphQLType>,
}
impl Schema {
    /// Type lookup by name.
    pub fn get_type(&self, name: &str) -> Option<&GraphQLType> {
        self.types.get(name)
    }

    pub fn query_type_name(&self) -> &str {
        self.query_type.as_str()
    }

    pub fn operation_type_name(&self, kind: OperationKind) -> Option<&str> {
        match kind {
            OperationKind::Query => Some(self.query_type.as_str()),
            OperationKind::Mutation => self.mutation_type.as_deref(),
            OperationKind::Subscription => self.subscription_type.as_deref(),
        }
    }

    /// Whether the type named `type_name` conforms to the interface named
    /// `interface_name`. Object types conform when the interface appears in
    /// their `implements` list; an interface trivially conforms to itself.
    /// Pure predicate over schema metadata.
    pub fn type_implements_interface(
        &self,
        type_name: &str,
        interface_name: &str,
    ) -> bool {
        match self.types.get(type_name) {
            Some(GraphQLType::Object(object_type)) =>
                object_type.interfaces.iter().any(
                    |name| name.as_str() == interface_name,
                ),
            Some(GraphQLType::Interface(interface_type)) =>
                interface_type.name.as_str() == interface_name,
            _ => false,
        }
    }
}
