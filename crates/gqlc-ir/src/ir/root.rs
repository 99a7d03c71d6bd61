use crate::ir::Directive;
use crate::ir::OperationKind;
use crate::ir::Selection;
use crate::ir::VariableDefinition;
use crate::schema::NamedTypeRef;
use serde::Serialize;

/// A top-level, independently executable operation in the IR.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Root {
    pub directives: Vec<Directive>,
    pub name: String,
    pub operation: OperationKind,
    /// The schema type the operation executes against (e.g. the schema's
    /// query type for [OperationKind::Query] roots).
    pub operation_type: NamedTypeRef,
    pub selections: Vec<Selection>,
    pub variable_definitions: Vec<VariableDefinition>,
}
