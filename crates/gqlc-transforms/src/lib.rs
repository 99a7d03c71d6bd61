mod deferred_queries;

pub use deferred_queries::DEFER_DIRECTIVE;
pub use deferred_queries::DeferredQueries;
pub use deferred_queries::DeferredQueryError;
pub use deferred_queries::SplitDependency;
pub use deferred_queries::SplitId;
pub use deferred_queries::transform_deferred_queries;

#[cfg(test)]
mod tests;
