use crate::ir::Argument;
use crate::ir::Directive;
use crate::schema::NamedTypeRef;
use serde::Serialize;

/// A field selection whose type is a leaf (scalar or enum).
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ScalarField {
    pub alias: Option<String>,
    pub arguments: Vec<Argument>,
    pub directives: Vec<Directive>,
    pub field_type: NamedTypeRef,
    pub name: String,
}
impl ScalarField {
    /// If an alias was specified for this selection, return the alias.
    /// Otherwise return the name of the field.
    pub fn selected_name(&self) -> &str {
        self.alias.as_deref().unwrap_or(self.name.as_str())
    }
}
