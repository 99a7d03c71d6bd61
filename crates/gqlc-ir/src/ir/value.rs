use crate::ast;
use indexmap::IndexMap;
use serde::Serialize;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub enum Value {
    Bool(bool),
    Enum(String),
    Float(f64),
    Int(i64),
    List(Vec<Value>),
    Null,
    Object(IndexMap<String, Value>),
    String(String),
    Variable(String),
}
impl Value {
    pub(crate) fn from_ast(ast_value: &ast::query::Value) -> Self {
        match ast_value {
            ast::query::Value::Variable(var_name) =>
                Value::Variable(var_name.clone()),

            // `Number` wraps an i64; literals beyond i64 range fail in the
            // parser and never reach this conversion.
            ast::query::Value::Int(value) =>
                Value::Int(value.as_i64().unwrap_or_default()),

            ast::query::Value::Float(value) =>
                Value::Float(*value),

            ast::query::Value::String(value) =>
                Value::String(value.clone()),

            ast::query::Value::Boolean(value) =>
                Value::Bool(*value),

            ast::query::Value::Null =>
                Value::Null,

            ast::query::Value::Enum(value) =>
                Value::Enum(value.clone()),

            ast::query::Value::List(values) =>
                Value::List(values.iter().map(Value::from_ast).collect()),

            ast::query::Value::Object(fields) =>
                Value::Object(
                    fields
                        .iter()
                        .map(|(name, value)| (name.clone(), Value::from_ast(value)))
                        .collect(),
                ),
        }
    }
}
