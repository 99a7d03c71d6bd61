use crate::CompilerContext;
use crate::ContextError;
use crate::ast;
use crate::ir::Argument;
use crate::ir::Directive;
use crate::ir::Fragment;
use crate::ir::FragmentSpread;
use crate::ir::InlineFragment;
use crate::ir::LinkedField;
use crate::ir::OperationKind;
use crate::ir::Root;
use crate::ir::ScalarField;
use crate::ir::Selection;
use crate::ir::TypeAnnotation;
use crate::ir::Value;
use crate::ir::VariableDefinition;
use crate::named_ref::DerefByName;
use crate::schema::GraphQLType;
use crate::schema::Schema;
use thiserror::Error;

type Result<T> = std::result::Result<T, DocumentBuildError>;

const TYPENAME_FIELD: &str = "__typename";

/// Lowers executable GraphQL documents into IR against a [Schema]: named
/// operations become [Root]s and fragment definitions become [Fragment]s,
/// with each field selection resolved against the schema to decide whether
/// it is a [LinkedField] or a [ScalarField].
#[derive(Debug)]
pub struct DocumentBuilder<'schema> {
    fragments: Vec<Fragment>,
    roots: Vec<Root>,
    schema: &'schema Schema,
}
impl<'schema> DocumentBuilder<'schema> {
    pub fn new(schema: &'schema Schema) -> Self {
        Self {
            fragments: vec![],
            roots: vec![],
            schema,
        }
    }

    pub fn add_from_str(&mut self, content: &str) -> Result<()> {
        let doc = ast::query::parse(content).map_err(
            |err| DocumentBuildError::ParseError { err: err.to_string() },
        )?;
        for def in doc.definitions {
            self.visit_definition(def)?;
        }
        Ok(())
    }

    pub fn build(self) -> Result<CompilerContext> {
        let mut context = CompilerContext::new(self.schema.clone());
        for fragment in self.fragments {
            context.add_fragment(fragment)?;
        }
        for root in self.roots {
            context.add_root(root)?;
        }
        Ok(context)
    }

    fn visit_definition(&mut self, def: ast::query::Definition) -> Result<()> {
        use graphql_parser::query::Definition;
        match def {
            Definition::Fragment(frag_def) => {
                let fragment = self.build_fragment(frag_def)?;
                self.fragments.push(fragment);
            }
            Definition::Operation(op_def) => {
                let root = self.build_root(op_def)?;
                self.roots.push(root);
            }
        }
        Ok(())
    }

    fn build_root(&self, def: ast::query::OperationDefinition) -> Result<Root> {
        use graphql_parser::query::OperationDefinition as OpDef;
        let (operation, name, ast_variable_definitions, ast_directives, selection_set) =
            match def {
                OpDef::Query(op) => (
                    OperationKind::Query,
                    op.name,
                    op.variable_definitions,
                    op.directives,
                    op.selection_set,
                ),
                OpDef::Mutation(op) => (
                    OperationKind::Mutation,
                    op.name,
                    op.variable_definitions,
                    op.directives,
                    op.selection_set,
                ),
                OpDef::Subscription(op) => (
                    OperationKind::Subscription,
                    op.name,
                    op.variable_definitions,
                    op.directives,
                    op.selection_set,
                ),
                OpDef::SelectionSet(_) =>
                    return Err(DocumentBuildError::AnonymousOperation),
            };
        let name = name.ok_or(DocumentBuildError::AnonymousOperation)?;

        let type_name = self
            .schema
            .operation_type_name(operation)
            .ok_or(DocumentBuildError::UndefinedOperationType { operation })?;
        let operation_type = self.lookup_type(type_name)?;

        Ok(Root {
            directives: build_directives(ast_directives),
            name,
            operation,
            operation_type: GraphQLType::named_ref(type_name),
            selections: self.build_selection_set(operation_type, selection_set)?,
            variable_definitions: ast_variable_definitions
                .into_iter()
                .map(build_variable_definition)
                .collect(),
        })
    }

    fn build_fragment(&self, def: ast::query::FragmentDefinition) -> Result<Fragment> {
        let ast::query::TypeCondition::On(type_name) = def.type_condition;
        let condition_type = self.lookup_type(&type_name)?;
        if !condition_type.is_composite() {
            return Err(DocumentBuildError::InvalidTypeCondition { type_name });
        }
        Ok(Fragment {
            directives: build_directives(def.directives),
            name: def.name,
            selections: self.build_selection_set(condition_type, def.selection_set)?,
            type_condition: GraphQLType::named_ref(&type_name),
        })
    }

    fn build_selection_set(
        &self,
        parent_type: &'schema GraphQLType,
        selection_set: ast::query::SelectionSet,
    ) -> Result<Vec<Selection>> {
        selection_set
            .items
            .into_iter()
            .map(|selection| self.build_selection(parent_type, selection))
            .collect()
    }

    fn build_selection(
        &self,
        parent_type: &'schema GraphQLType,
        selection: ast::query::Selection,
    ) -> Result<Selection> {
        use graphql_parser::query::Selection as AstSelection;
        match selection {
            AstSelection::Field(field) =>
                self.build_field(parent_type, field),

            AstSelection::FragmentSpread(spread) =>
                Ok(Selection::FragmentSpread(FragmentSpread {
                    directives: build_directives(spread.directives),
                    fragment: Fragment::named_ref(&spread.fragment_name),
                })),

            AstSelection::InlineFragment(inline) => {
                // An inline fragment without a type condition narrows
                // nothing; it applies to the parent type.
                let type_name = match inline.type_condition {
                    Some(ast::query::TypeCondition::On(name)) => name,
                    None => parent_type.name().to_string(),
                };
                let condition_type = self.lookup_type(&type_name)?;
                Ok(Selection::InlineFragment(InlineFragment {
                    directives: build_directives(inline.directives),
                    selections: self
                        .build_selection_set(condition_type, inline.selection_set)?,
                    type_condition: GraphQLType::named_ref(&type_name),
                }))
            }
        }
    }

    fn build_field(
        &self,
        parent_type: &'schema GraphQLType,
        field: ast::query::Field,
    ) -> Result<Selection> {
        if field.name == TYPENAME_FIELD {
            return Ok(Selection::ScalarField(ScalarField {
                alias: field.alias,
                arguments: build_arguments(field.arguments),
                directives: build_directives(field.directives),
                field_type: GraphQLType::named_ref("String"),
                name: field.name,
            }));
        }

        let field_def = parent_type
            .fields()
            .and_then(|fields| fields.get(&field.name))
            .ok_or_else(|| DocumentBuildError::UndefinedField {
                field_name: field.name.clone(),
                type_name: parent_type.name().to_string(),
            })?;
        let field_type_name = field_def.field_type.named_type();
        let field_type = self.lookup_type(field_type_name)?;

        if field_type.is_composite() {
            if field.selection_set.items.is_empty() {
                return Err(DocumentBuildError::MissingSubselections {
                    field_name: field.name,
                });
            }
            Ok(Selection::LinkedField(LinkedField {
                alias: field.alias,
                arguments: build_arguments(field.arguments),
                directives: build_directives(field.directives),
                field_type: GraphQLType::named_ref(field_type_name),
                name: field.name,
                selections: self
                    .build_selection_set(field_type, field.selection_set)?,
            }))
        } else {
            if !field.selection_set.items.is_empty() {
                return Err(DocumentBuildError::LeafFieldWithSelections {
                    field_name: field.name,
                });
            }
            Ok(Selection::ScalarField(ScalarField {
                alias: field.alias,
                arguments: build_arguments(field.arguments),
                directives: build_directives(field.directives),
                field_type: GraphQLType::named_ref(field_type_name),
                name: field.name,
            }))
        }
    }

    fn lookup_type(&self, name: &str) -> Result<&'schema GraphQLType> {
        let schema: &'schema Schema = self.schema;
        schema.get_type(name).ok_or_else(
            || DocumentBuildError::UndefinedType { type_name: name.to_string() },
        )
    }
}

fn build_arguments(arguments: Vec<(String, ast::query::Value)>) -> Vec<Argument> {
    arguments
        .into_iter()
        .map(|(name, value)| Argument {
            name,
            value: Value::from_ast(&value),
        })
        .collect()
}

fn build_directives(directives: Vec<ast::query::Directive>) -> Vec<Directive> {
    directives
        .into_iter()
        .map(|directive| Directive {
            arguments: build_arguments(directive.arguments),
            name: directive.name,
        })
        .collect()
}

fn build_variable_definition(def: ast::query::VariableDefinition) -> VariableDefinition {
    VariableDefinition {
        default_value: def.default_value.as_ref().map(Value::from_ast),
        name: def.name,
        var_type: TypeAnnotation::from_ast(&def.var_type),
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum DocumentBuildError {
    #[error("Anonymous operations are not supported; every operation must be named")]
    AnonymousOperation,

    #[error(transparent)]
    ContextError(#[from] ContextError),

    #[error("Fragments may only be defined on composite types; `{type_name}` is not one")]
    InvalidTypeCondition {
        type_name: String,
    },

    #[error("`{field_name}` selects a leaf type and cannot have sub-selections")]
    LeafFieldWithSelections {
        field_name: String,
    },

    #[error("`{field_name}` selects a composite type and requires sub-selections")]
    MissingSubselections {
        field_name: String,
    },

    #[error("Error parsing operation document: {err}")]
    ParseError {
        err: String,
    },

    #[error("`{field_name}` is not defined on `{type_name}`")]
    UndefinedField {
        field_name: String,
        type_name: String,
    },

    #[error("The schema defines no {operation} operation type")]
    UndefinedOperationType {
        operation: OperationKind,
    },

    #[error("`{type_name}` is not defined in the schema")]
    UndefinedType {
        type_name: String,
    },
}
