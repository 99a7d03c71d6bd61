use crate::ir::Argument;
use crate::ir::Directive;
use crate::ir::Selection;
use crate::schema::NamedTypeRef;
use serde::Serialize;

/// A field selection whose type is composite and which therefore carries
/// sub-selections of its own.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LinkedField {
    pub alias: Option<String>,
    pub arguments: Vec<Argument>,
    pub directives: Vec<Directive>,
    pub field_type: NamedTypeRef,
    pub name: String,
    pub selections: Vec<Selection>,
}
impl LinkedField {
    /// If an alias was specified for this selection, return the alias.
    /// Otherwise return the name of the field.
    pub fn selected_name(&self) -> &str {
        self.alias.as_deref().unwrap_or(self.name.as_str())
    }
}
