use crate::ast;
use serde::Serialize;

/// A (possibly wrapped) reference to a named schema type, as written in a
/// variable definition or a field definition.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub enum TypeAnnotation {
    List(Box<TypeAnnotation>),
    Named(String),
    NonNull(Box<TypeAnnotation>),
}
impl TypeAnnotation {
    pub fn non_null_named(name: impl AsRef<str>) -> Self {
        TypeAnnotation::NonNull(Box::new(
            TypeAnnotation::Named(name.as_ref().to_string()),
        ))
    }

    /// The innermost named type, with all list/non-null wrappers stripped.
    pub fn named_type(&self) -> &str {
        match self {
            TypeAnnotation::Named(name) => name.as_str(),
            TypeAnnotation::List(inner) => inner.named_type(),
            TypeAnnotation::NonNull(inner) => inner.named_type(),
        }
    }

    pub(crate) fn from_ast(ast_type: &ast::query::Type) -> Self {
        match ast_type {
            ast::query::Type::NamedType(name) =>
                TypeAnnotation::Named(name.clone()),
            ast::query::Type::ListType(inner) =>
                TypeAnnotation::List(Box::new(TypeAnnotation::from_ast(inner))),
            ast::query::Type::NonNullType(inner) =>
                TypeAnnotation::NonNull(Box::new(TypeAnnotation::from_ast(inner))),
        }
    }
}
