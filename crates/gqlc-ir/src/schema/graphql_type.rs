use crate::named_ref::DerefByName;
use crate::named_ref::DerefByNameError;
use crate::named_ref::NamedRef;
use crate::schema::EnumType;
use crate::schema::FieldDef;
use crate::schema::InputObjectType;
use crate::schema::InterfaceType;
use crate::schema::ObjectType;
use crate::schema::ScalarType;
use crate::schema::Schema;
use crate::schema::UnionType;
use indexmap::IndexMap;
use serde::Serialize;

/// Represents a defined GraphQL type
#[derive(Clone, Debug, PartialEq, Serialize)]
pub enum GraphQLType {
    Enum(EnumType),
    InputObject(InputObjectType),
    Interface(InterfaceType),
    Object(ObjectType),
    Scalar(ScalarType),
    Union(UnionType),
}
impl GraphQLType {
    pub fn name(&self) -> &str {
        match self {
            GraphQLType::Enum(t) => t.name.as_str(),
            GraphQLType::InputObject(t) => t.name.as_str(),
            GraphQLType::Interface(t) => t.name.as_str(),
            GraphQLType::Object(t) => t.name.as_str(),
            GraphQLType::Scalar(t) => t.name.as_str(),
            GraphQLType::Union(t) => t.name.as_str(),
        }
    }

    /// Leaf types terminate selection trees; they cannot carry
    /// sub-selections.
    pub fn is_leaf(&self) -> bool {
        matches!(self, GraphQLType::Enum(_) | GraphQLType::Scalar(_))
    }

    /// Composite types can (and must) carry sub-selections.
    pub fn is_composite(&self) -> bool {
        matches!(
            self,
            GraphQLType::Interface(_)
                | GraphQLType::Object(_)
                | GraphQLType::Union(_),
        )
    }

    /// The selectable fields of this type, for types that define fields.
    pub fn fields(&self) -> Option<&IndexMap<String, FieldDef>> {
        match self {
            GraphQLType::Interface(t) => Some(&t.fields),
            GraphQLType::Object(t) => Some(&t.fields),
            _ => None,
        }
    }
}

impl DerefByName for GraphQLType {
    type Source = Schema;

    fn deref_name<'a>(
        schema: &'a Self::Source,
        name: &str,
    ) -> Result<&'a GraphQLType, DerefByNameError> {
        schema.get_type(name).ok_or_else(
            || DerefByNameError::DanglingReference(name.to_string()),
        )
    }
}

pub type NamedTypeRef = NamedRef<Schema, GraphQLType>;
