use crate::ir::Directive;
use crate::ir::FragmentSpread;
use crate::ir::InlineFragment;
use crate::ir::LinkedField;
use crate::ir::ScalarField;
use serde::Serialize;

/// One entry in a selection list. Selections form finite trees with no
/// back-edges; siblings are distinct by alias-or-name.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub enum Selection {
    FragmentSpread(FragmentSpread),
    InlineFragment(InlineFragment),
    LinkedField(LinkedField),
    ScalarField(ScalarField),
}
impl Selection {
    pub fn directives(&self) -> &Vec<Directive> {
        match self {
            Selection::FragmentSpread(spread) => &spread.directives,
            Selection::InlineFragment(fragment) => &fragment.directives,
            Selection::LinkedField(field) => &field.directives,
            Selection::ScalarField(field) => &field.directives,
        }
    }
}
