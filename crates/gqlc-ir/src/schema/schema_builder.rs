use crate::ast;
use crate::ir::OperationKind;
use crate::ir::TypeAnnotation;
use crate::schema::EnumType;
use crate::schema::FieldDef;
use crate::schema::GraphQLType;
use crate::schema::InputObjectType;
use crate::schema::InterfaceType;
use crate::schema::ObjectType;
use crate::schema::ScalarType;
use crate::schema::Schema;
use crate::schema::UnionType;
use indexmap::IndexMap;
use thiserror::Error;

type Result<T> = std::result::Result<T, SchemaBuildError>;

const BUILTIN_SCALARS: [&str; 5] = ["Boolean", "Float", "ID", "Int", "String"];

/// Builds a [Schema] from SDL text.
#[derive(Debug)]
pub struct SchemaBuilder {
    mutation_type: Option<String>,
    query_type: Option<String>,
    subscription_type: Option<String>,
    types: IndexMap<String, GraphQLType>,
}
impl SchemaBuilder {
    pub fn new() -> Self {
        let types = BUILTIN_SCALARS
            .iter()
            .map(|name| {
                (
                    name.to_string(),
                    GraphQLType::Scalar(ScalarType { name: name.to_string() }),
                )
            })
            .collect();
        Self {
            mutation_type: None,
            query_type: None,
            subscription_type: None,
            types,
        }
    }

    pub fn from_str(sdl: &str) -> Result<Self> {
        let mut builder = Self::new();
        builder.add_from_str(sdl)?;
        Ok(builder)
    }

    pub fn add_from_str(&mut self, sdl: &str) -> Result<()> {
        let doc = ast::schema::parse(sdl).map_err(
            |err| SchemaBuildError::ParseError { err: err.to_string() },
        )?;
        for def in doc.definitions {
            self.visit_definition(def)?;
        }
        Ok(())
    }

    pub fn build(self) -> Result<Schema> {
        let SchemaBuilder {
            mutation_type,
            query_type,
            subscription_type,
            types,
        } = self;

        // The conventional operation type names apply when no explicit
        // `schema { .. }` block names one.
        let default_operation_type =
            |name: &str| types.contains_key(name).then(|| name.to_string());
        let query_type = query_type
            .or_else(|| default_operation_type("Query"))
            .ok_or(SchemaBuildError::NoQueryOperationTypeDefined)?;
        let mutation_type = mutation_type.or_else(|| default_operation_type("Mutation"));
        let subscription_type =
            subscription_type.or_else(|| default_operation_type("Subscription"));

        for (kind, type_name) in [
            (OperationKind::Query, Some(&query_type)),
            (OperationKind::Mutation, mutation_type.as_ref()),
            (OperationKind::Subscription, subscription_type.as_ref()),
        ] {
            if let Some(type_name) = type_name {
                match types.get(type_name) {
                    Some(GraphQLType::Object(_)) => (),
                    _ => return Err(SchemaBuildError::InvalidOperationType {
                        operation: kind,
                        type_name: type_name.to_string(),
                    }),
                }
            }
        }

        Ok(Schema {
            mutation_type,
            query_type,
            subscription_type,
            types,
        })
    }

    fn visit_definition(&mut self, def: ast::schema::Definition) -> Result<()> {
        use graphql_parser::schema::Definition;
        match def {
            Definition::SchemaDefinition(schema_def) =>
                self.visit_schema_definition(schema_def),
            Definition::TypeDefinition(type_def) =>
                self.visit_type_definition(type_def),
            // Directive definitions carry no state this schema model uses;
            // annotations in documents are preserved as written regardless.
            Definition::DirectiveDefinition(_) => Ok(()),
            Definition::TypeExtension(_) =>
                Err(SchemaBuildError::TypeExtensionsUnsupported),
        }
    }

    fn visit_schema_definition(
        &mut self,
        schema_def: ast::schema::SchemaDefinition,
    ) -> Result<()> {
        self.query_type = schema_def.query.or(self.query_type.take());
        self.mutation_type = schema_def.mutation.or(self.mutation_type.take());
        self.subscription_type =
            schema_def.subscription.or(self.subscription_type.take());
        Ok(())
    }

    fn visit_type_definition(
        &mut self,
        type_def: ast::schema::TypeDefinition,
    ) -> Result<()> {
        use graphql_parser::schema::TypeDefinition;
        let graphql_type = match type_def {
            TypeDefinition::Scalar(def) =>
                GraphQLType::Scalar(ScalarType { name: def.name }),

            TypeDefinition::Object(def) =>
                GraphQLType::Object(ObjectType {
                    fields: build_fields(def.fields),
                    interfaces: def.implements_interfaces,
                    name: def.name,
                }),

            TypeDefinition::Interface(def) =>
                GraphQLType::Interface(InterfaceType {
                    fields: build_fields(def.fields),
                    name: def.name,
                }),

            TypeDefinition::Union(def) =>
                GraphQLType::Union(UnionType {
                    name: def.name,
                    types: def.types,
                }),

            TypeDefinition::Enum(def) =>
                GraphQLType::Enum(EnumType {
                    name: def.name,
                    values: def.values.into_iter().map(|value| value.name).collect(),
                }),

            TypeDefinition::InputObject(def) =>
                GraphQLType::InputObject(InputObjectType {
                    fields: def
                        .fields
                        .into_iter()
                        .map(|input_value| {
                            (
                                input_value.name.clone(),
                                FieldDef {
                                    field_type: TypeAnnotation::from_ast(
                                        &input_value.value_type,
                                    ),
                                    name: input_value.name,
                                },
                            )
                        })
                        .collect(),
                    name: def.name,
                }),
        };
        self.insert_type(graphql_type)
    }

    fn insert_type(&mut self, graphql_type: GraphQLType) -> Result<()> {
        let type_name = graphql_type.name().to_string();
        if self.types.contains_key(&type_name) {
            return Err(SchemaBuildError::DuplicateTypeDefinition { type_name });
        }
        self.types.insert(type_name, graphql_type);
        Ok(())
    }
}
impl Default for SchemaBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn build_fields(fields: Vec<ast::schema::Field>) -> IndexMap<String, FieldDef> {
    fields
        .into_iter()
        .map(|field| {
            (
                field.name.clone(),
                FieldDef {
                    field_type: TypeAnnotation::from_ast(&field.field_type),
                    name: field.name,
                },
            )
        })
        .collect()
}

#[derive(Debug, Error, PartialEq)]
pub enum SchemaBuildError {
    #[error("`{type_name}` is defined more than once")]
    DuplicateTypeDefinition {
        type_name: String,
    },

    #[error("The {operation} operation type `{type_name}` is not an object type")]
    InvalidOperationType {
        operation: OperationKind,
        type_name: String,
    },

    #[error("No query operation type is defined")]
    NoQueryOperationTypeDefined,

    #[error("Error parsing schema string: {err}")]
    ParseError {
        err: String,
    },

    #[error("Type extensions are not supported")]
    TypeExtensionsUnsupported,
}
