use crate::ir::Directive;
use crate::ir::Selection;
use crate::schema::NamedTypeRef;
use serde::Serialize;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct InlineFragment {
    pub directives: Vec<Directive>,
    pub selections: Vec<Selection>,
    pub type_condition: NamedTypeRef,
}
