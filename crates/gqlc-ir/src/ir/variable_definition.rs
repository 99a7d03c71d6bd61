use crate::ir::TypeAnnotation;
use crate::ir::Value;
use serde::Serialize;

/// An argument declared by a [Root](crate::ir::Root) operation.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct VariableDefinition {
    pub default_value: Option<Value>,
    pub name: String,
    pub var_type: TypeAnnotation,
}
impl VariableDefinition {
    /// A variable with no default whose type is non-null must be supplied
    /// by the caller at fetch time.
    pub fn is_required(&self) -> bool {
        self.default_value.is_none()
            && matches!(self.var_type, TypeAnnotation::NonNull(_))
    }
}
