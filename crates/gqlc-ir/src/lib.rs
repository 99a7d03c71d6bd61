pub mod ast;
mod context;
mod document_builder;
pub mod ir;
mod named_ref;
pub mod schema;
mod transformer;

pub use context::CompilerContext;
pub use context::ContextError;
pub use document_builder::DocumentBuildError;
pub use document_builder::DocumentBuilder;
pub use named_ref::DerefByName;
pub use named_ref::DerefByNameError;
pub use named_ref::NamedRef;
pub use transformer::IrTransform;
pub use transformer::Transformed;
pub use transformer::TransformedValue;
pub use transformer::transform_context;

#[cfg(test)]
mod tests;
