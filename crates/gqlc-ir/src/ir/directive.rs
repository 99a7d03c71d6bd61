use crate::ir::Argument;
use serde::Serialize;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Directive {
    pub arguments: Vec<Argument>,
    pub name: String,
}
