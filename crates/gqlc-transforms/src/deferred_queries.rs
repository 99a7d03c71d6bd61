//! Splits a query at every `@defer`-marked fragment spread.
//!
//! Each marked spread is pruned from its parent query and its fragment's
//! body is re-rooted as a new top-level query that re-enters the pruned
//! data through an identity refetch (`node(id: $id)`). Splits discovered
//! inside an already-deferred fragment chain off that fragment's query
//! rather than the original root, so the set of splits for one root forms
//! a fetch-dependency tree.

use gqlc_ir::CompilerContext;
use gqlc_ir::ContextError;
use gqlc_ir::DerefByName;
use gqlc_ir::DerefByNameError;
use gqlc_ir::IrTransform;
use gqlc_ir::Transformed;
use gqlc_ir::ir::Argument;
use gqlc_ir::ir::Fragment;
use gqlc_ir::ir::FragmentSpread;
use gqlc_ir::ir::InlineFragment;
use gqlc_ir::ir::LinkedField;
use gqlc_ir::ir::OperationKind;
use gqlc_ir::ir::Root;
use gqlc_ir::ir::Selection;
use gqlc_ir::ir::TypeAnnotation;
use gqlc_ir::ir::Value;
use gqlc_ir::ir::VariableDefinition;
use gqlc_ir::schema::GraphQLType;
use gqlc_ir::schema::Schema;
use gqlc_ir::transform_context;
use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Directive that marks a fragment spread as separately fetchable.
pub const DEFER_DIRECTIVE: &str = "defer";

const ID_ARGUMENT: &str = "id";
const ID_TYPE: &str = "ID";
const NODE_FIELD: &str = "node";
const NODE_TYPE: &str = "Node";

type Result<T> = std::result::Result<T, DeferredQueryError>;

/// Pass-local identifier assigned to each root and each split, in
/// allocation order. Encodes fetch-order dependency, not domain identity;
/// identifiers are unique and strictly increasing within one pass.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub struct SplitId(pub u32);
impl fmt::Display for SplitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One generated deferred query and the identifier of the query/context it
/// was carved out of.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct SplitRecord {
    pub(crate) id: SplitId,
    pub(crate) parent_id: SplitId,
    pub(crate) root: Root,
}

/// The dependency link for one generated query, preserved for downstream
/// tooling once the query's root has been merged into the output context:
/// the query named `query_name` can only be fetched after the query (or
/// original root) identified by `parent_id` has produced its data.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct SplitDependency {
    pub id: SplitId,
    pub parent_id: SplitId,
    pub query_name: String,
}

/// Output of [transform_deferred_queries].
#[derive(Clone, Debug, PartialEq)]
pub struct DeferredQueries {
    /// The rewritten compilation unit: the original (pruned) roots plus one
    /// additional root per split.
    pub context: CompilerContext,
    /// Dependency links for the generated roots, in discovery order
    /// (pre-order, depth-first).
    pub splits: Vec<SplitDependency>,
}

#[derive(Debug, Error, PartialEq)]
pub enum DeferredQueryError {
    #[error(
        "`@defer` on `...{fragment}` is nested inside the plain fragment \
         `{enclosing}`; defer the `...{enclosing}` spread or inline it so \
         the split point is explicit"
    )]
    DeferInsidePlainFragment {
        enclosing: String,
        fragment: String,
    },

    #[error("`@defer` on `...{fragment}` appears outside of any named operation")]
    DeferOutsideQuery {
        fragment: String,
    },

    #[error(transparent)]
    MergeCollision(#[from] ContextError),

    #[error(
        "`@defer` requires a fragment on a type implementing the `Node` \
         interface so its data can be refetched by id; `{fragment}` is on \
         `{type_condition}`, which does not"
    )]
    NotRefetchable {
        fragment: String,
        type_condition: String,
    },

    #[error("The schema cannot support identity refetch: expected `{type_name}` to be {expected}")]
    SchemaNotRefetchCapable {
        expected: &'static str,
        type_name: &'static str,
    },

    #[error(transparent)]
    UnknownFragment(#[from] DerefByNameError),
}

/// Splits every `@defer`-marked fragment spread in `context` into an
/// independently fetchable query.
///
/// The returned context contains the original roots with each marked
/// spread pruned, plus one generated root per split, named
/// `<RootName>Deferred<id>` and shaped `query ($id: ID!) { node(id: $id)
/// { ... on <FragmentType> { <fragment body> } } }`. The whole rewrite
/// either succeeds or fails; no partially rewritten context is returned.
pub fn transform_deferred_queries(context: &CompilerContext) -> Result<DeferredQueries> {
    let mut transform = DeferredQueriesTransform::new(context)?;
    let mut next_context = transform_context(context, &mut transform)?;

    let mut splits = Vec::with_capacity(transform.splits.len());
    let mut generated_roots = Vec::with_capacity(transform.splits.len());
    for record in transform.splits {
        splits.push(SplitDependency {
            id: record.id,
            parent_id: record.parent_id,
            query_name: record.root.name.clone(),
        });
        generated_roots.push(record.root);
    }
    next_context.add_all(generated_roots)?;

    Ok(DeferredQueries {
        context: next_context,
        splits,
    })
}

/// Traversal context for one branch of one root's selection tree: the
/// display name of the query being split and the identifier of the query
/// any split found on this branch depends on. Copied, never aliased,
/// whenever a split spawns a new branch.
#[derive(Clone, Debug)]
pub(crate) struct DeferScope {
    pub(crate) parent_id: SplitId,
    pub(crate) query_name: String,
}

pub(crate) struct DeferredQueriesTransform<'ctx> {
    context: &'ctx CompilerContext,
    next_id: u32,
    pub(crate) splits: Vec<SplitRecord>,
}
impl<'ctx> DeferredQueriesTransform<'ctx> {
    pub(crate) fn new(context: &'ctx CompilerContext) -> Result<Self> {
        assert_schema_refetch_capable(context.schema())?;
        Ok(Self {
            context,
            next_id: 0,
            splits: vec![],
        })
    }

    fn generate_id(&mut self) -> SplitId {
        let id = SplitId(self.next_id);
        self.next_id += 1;
        id
    }

    /// A deferred fragment's data must be reachable later through
    /// `node(id:)`, so its type condition must implement `Node`.
    fn assert_refetchable(&self, fragment: &Fragment) -> Result<()> {
        let type_condition = fragment.type_condition.name();
        if self
            .context
            .schema()
            .type_implements_interface(type_condition, NODE_TYPE)
        {
            Ok(())
        } else {
            Err(DeferredQueryError::NotRefetchable {
                fragment: fragment.name.clone(),
                type_condition: type_condition.to_string(),
            })
        }
    }

    /// A plain spread splices its fragment's body into the tree at fetch
    /// time, but the definition itself stays shared by every spread of it,
    /// so a `@defer` marker inside that body has no split point this pass
    /// can rewrite. Reject it rather than let the marker survive into the
    /// output.
    fn assert_no_hidden_defer(&self, fragment: &'ctx Fragment) -> Result<()> {
        let mut seen = vec![fragment.name.as_str()];
        let mut pending = vec![fragment];
        while let Some(fragment) = pending.pop() {
            let mut selections: Vec<&'ctx Selection> =
                fragment.selections.iter().collect();
            while let Some(selection) = selections.pop() {
                match selection {
                    Selection::FragmentSpread(spread) => {
                        if spread
                            .directives
                            .iter()
                            .any(|directive| directive.name == DEFER_DIRECTIVE)
                        {
                            return Err(DeferredQueryError::DeferInsidePlainFragment {
                                enclosing: fragment.name.clone(),
                                fragment: spread.fragment_name().to_string(),
                            });
                        }
                        // Dangling spreads are another pass's concern.
                        if let Ok(next) = self.context.fragment(spread.fragment_name()) {
                            if !seen.contains(&next.name.as_str()) {
                                seen.push(next.name.as_str());
                                pending.push(next);
                            }
                        }
                    }
                    Selection::InlineFragment(inline) =>
                        selections.extend(&inline.selections),
                    Selection::LinkedField(field) =>
                        selections.extend(&field.selections),
                    Selection::ScalarField(_) => (),
                }
            }
        }
        Ok(())
    }

    /// `query <name>($id: ID!) { node(id: $id) { <inline> } }`
    fn build_deferred_root(&self, name: String, inline: InlineFragment) -> Root {
        Root {
            directives: vec![],
            name,
            operation: OperationKind::Query,
            operation_type: GraphQLType::named_ref(
                self.context.schema().query_type_name(),
            ),
            selections: vec![Selection::LinkedField(build_refetch_field(inline))],
            variable_definitions: vec![VariableDefinition {
                default_value: None,
                name: ID_ARGUMENT.to_string(),
                var_type: TypeAnnotation::non_null_named(ID_TYPE),
            }],
        }
    }
}

impl IrTransform for DeferredQueriesTransform<'_> {
    type Error = DeferredQueryError;
    type State = Option<DeferScope>;

    fn initial_state(&mut self) -> Self::State {
        None
    }

    fn transform_root(
        &mut self,
        root: &Root,
        _state: &Self::State,
    ) -> Result<Transformed<Root>> {
        let id = self.generate_id();
        let scope = Some(DeferScope {
            parent_id: id,
            query_name: root.name.clone(),
        });
        let first_split = self.splits.len();
        let result = self.default_transform_root(root, &scope)?;
        for record in &self.splits[first_split..] {
            log::debug!(
                "{}: split {} `{}` depends on {}",
                root.name,
                record.id,
                record.root.name,
                record.parent_id,
            );
        }
        Ok(result)
    }

    fn transform_fragment(
        &mut self,
        _fragment: &Fragment,
        _state: &Self::State,
    ) -> Result<Transformed<Fragment>> {
        // Fragment bodies are rewritten at the point where they are spliced
        // into a split query; the standalone definitions pass through
        // untouched.
        Ok(Transformed::Keep)
    }

    fn transform_fragment_spread(
        &mut self,
        spread: &FragmentSpread,
        state: &Self::State,
    ) -> Result<Transformed<Selection>> {
        if !spread
            .directives
            .iter()
            .any(|directive| directive.name == DEFER_DIRECTIVE)
        {
            // The spread itself survives, but its fragment's body must not
            // be hiding a deferred spread this walk would never reach.
            if let Ok(fragment) = self.context.fragment(spread.fragment_name()) {
                self.assert_no_hidden_defer(fragment)?;
            }
            return Ok(Transformed::Keep);
        }
        let Some(scope) = state else {
            return Err(DeferredQueryError::DeferOutsideQuery {
                fragment: spread.fragment_name().to_string(),
            });
        };

        let context = self.context;
        let fragment = context.fragment(spread.fragment_name())?;
        self.assert_refetchable(fragment)?;

        let id = self.generate_id();
        let query_name = format!("{}Deferred{}", scope.query_name, id);
        let branch = Some(DeferScope {
            parent_id: id,
            query_name: scope.query_name.clone(),
        });

        // Splits discovered inside the fragment body are pushed after this
        // reservation point; inserting here keeps the list in pre-order.
        let reserved = self.splits.len();
        let selections = self
            .transform_selections(&fragment.selections, &branch)?
            .replace_or_else(|| fragment.selections.clone());

        let root = self.build_deferred_root(
            query_name,
            InlineFragment {
                directives: vec![],
                selections,
                type_condition: fragment.type_condition.clone(),
            },
        );
        self.splits.insert(
            reserved,
            SplitRecord {
                id,
                parent_id: scope.parent_id,
                root,
            },
        );
        Ok(Transformed::Delete)
    }
}

/// `node(id: $id) { <inline> }`
fn build_refetch_field(inline: InlineFragment) -> LinkedField {
    LinkedField {
        alias: None,
        arguments: vec![Argument {
            name: ID_ARGUMENT.to_string(),
            value: Value::Variable(ID_ARGUMENT.to_string()),
        }],
        directives: vec![],
        field_type: GraphQLType::named_ref(NODE_TYPE),
        name: NODE_FIELD.to_string(),
        selections: vec![Selection::InlineFragment(inline)],
    }
}

fn assert_schema_refetch_capable(schema: &Schema) -> Result<()> {
    match schema.get_type(ID_TYPE) {
        Some(id_type) if id_type.is_leaf() => (),
        _ => {
            return Err(DeferredQueryError::SchemaNotRefetchCapable {
                expected: "a leaf (scalar) type",
                type_name: ID_TYPE,
            });
        }
    }
    match schema.get_type(NODE_TYPE) {
        Some(GraphQLType::Interface(_)) => (),
        _ => {
            return Err(DeferredQueryError::SchemaNotRefetchCapable {
                expected: "an interface type",
                type_name: NODE_TYPE,
            });
        }
    }
    Ok(())
}
