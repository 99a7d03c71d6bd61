use crate::ir::Directive;
use crate::ir::FragmentRef;
use serde::Serialize;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FragmentSpread {
    pub directives: Vec<Directive>,
    pub fragment: FragmentRef,
}
impl FragmentSpread {
    pub fn fragment_name(&self) -> &str {
        self.fragment.name()
    }
}
