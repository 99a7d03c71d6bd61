mod argument;
mod directive;
mod fragment;
mod fragment_spread;
mod inline_fragment;
mod linked_field;
mod operation_kind;
mod root;
mod scalar_field;
mod selection;
mod type_annotation;
mod value;
mod variable_definition;

pub use argument::Argument;
pub use directive::Directive;
pub use fragment::Fragment;
pub use fragment::FragmentRef;
pub use fragment_spread::FragmentSpread;
pub use inline_fragment::InlineFragment;
pub use linked_field::LinkedField;
pub use operation_kind::OperationKind;
pub use root::Root;
pub use scalar_field::ScalarField;
pub use selection::Selection;
pub use type_annotation::TypeAnnotation;
pub use value::Value;
pub use variable_definition::VariableDefinition;
