use crate::ir::Value;
use serde::Serialize;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Argument {
    pub name: String,
    pub value: Value,
}
