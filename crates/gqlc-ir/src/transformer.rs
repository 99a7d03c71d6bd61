use crate::CompilerContext;
use crate::ir::Fragment;
use crate::ir::FragmentSpread;
use crate::ir::InlineFragment;
use crate::ir::LinkedField;
use crate::ir::Root;
use crate::ir::ScalarField;
use crate::ir::Selection;
use indexmap::IndexMap;

/// A visitor's verdict on a single IR node.
#[derive(Clone, Debug, PartialEq)]
pub enum Transformed<T> {
    /// Keep the node as-is.
    Keep,
    /// Splice a replacement node into the parent.
    Replace(T),
    /// Prune the node from its parent's selection list.
    Delete,
}

/// Verdict on a rebuilt list of children: either nothing underneath
/// changed, or here is the new list.
#[derive(Clone, Debug, PartialEq)]
pub enum TransformedValue<T> {
    Keep,
    Replace(T),
}
impl<T> TransformedValue<T> {
    pub fn replace_or_else(self, f: impl FnOnce() -> T) -> T {
        match self {
            TransformedValue::Keep => f(),
            TransformedValue::Replace(value) => value,
        }
    }
}

/// A rewrite pass over the IR.
///
/// Default method bodies perform a depth-first walk that rebuilds a node
/// only when something underneath it actually changed; passes override the
/// callbacks for the node kinds they care about and lean on the defaults
/// for everything else. An override re-enters the walk by calling
/// [transform_selections](IrTransform::transform_selections) itself, which
/// is also how a pass runs a subtree under a *different* state than its
/// siblings: construct a new state value and pass it down (state is only
/// ever shared downward by reference, never mutated across branches).
pub trait IrTransform {
    type State;
    type Error;

    /// State threaded into each top-level entry (a root or a standalone
    /// fragment) of the walk.
    fn initial_state(&mut self) -> Self::State;

    fn transform_root(
        &mut self,
        root: &Root,
        state: &Self::State,
    ) -> Result<Transformed<Root>, Self::Error> {
        self.default_transform_root(root, state)
    }

    fn default_transform_root(
        &mut self,
        root: &Root,
        state: &Self::State,
    ) -> Result<Transformed<Root>, Self::Error> {
        match self.transform_selections(&root.selections, state)? {
            TransformedValue::Keep => Ok(Transformed::Keep),
            TransformedValue::Replace(selections) => Ok(Transformed::Replace(Root {
                selections,
                ..root.clone()
            })),
        }
    }

    fn transform_fragment(
        &mut self,
        fragment: &Fragment,
        state: &Self::State,
    ) -> Result<Transformed<Fragment>, Self::Error> {
        match self.transform_selections(&fragment.selections, state)? {
            TransformedValue::Keep => Ok(Transformed::Keep),
            TransformedValue::Replace(selections) => Ok(Transformed::Replace(Fragment {
                selections,
                ..fragment.clone()
            })),
        }
    }

    fn transform_selections(
        &mut self,
        selections: &[Selection],
        state: &Self::State,
    ) -> Result<TransformedValue<Vec<Selection>>, Self::Error> {
        let mut result: Option<Vec<Selection>> = None;
        for (index, selection) in selections.iter().enumerate() {
            match self.transform_selection(selection, state)? {
                Transformed::Keep => {
                    if let Some(result) = result.as_mut() {
                        result.push(selection.clone());
                    }
                }
                Transformed::Replace(replacement) => {
                    result
                        .get_or_insert_with(|| selections[..index].to_vec())
                        .push(replacement);
                }
                Transformed::Delete => {
                    result.get_or_insert_with(|| selections[..index].to_vec());
                }
            }
        }
        Ok(match result {
            Some(selections) => TransformedValue::Replace(selections),
            None => TransformedValue::Keep,
        })
    }

    fn transform_selection(
        &mut self,
        selection: &Selection,
        state: &Self::State,
    ) -> Result<Transformed<Selection>, Self::Error> {
        match selection {
            Selection::FragmentSpread(spread) =>
                self.transform_fragment_spread(spread, state),
            Selection::InlineFragment(fragment) =>
                self.transform_inline_fragment(fragment, state),
            Selection::LinkedField(field) =>
                self.transform_linked_field(field, state),
            Selection::ScalarField(field) =>
                self.transform_scalar_field(field, state),
        }
    }

    fn transform_fragment_spread(
        &mut self,
        _spread: &FragmentSpread,
        _state: &Self::State,
    ) -> Result<Transformed<Selection>, Self::Error> {
        Ok(Transformed::Keep)
    }

    fn transform_inline_fragment(
        &mut self,
        fragment: &InlineFragment,
        state: &Self::State,
    ) -> Result<Transformed<Selection>, Self::Error> {
        match self.transform_selections(&fragment.selections, state)? {
            TransformedValue::Keep => Ok(Transformed::Keep),
            TransformedValue::Replace(selections) => Ok(Transformed::Replace(
                Selection::InlineFragment(InlineFragment {
                    selections,
                    ..fragment.clone()
                }),
            )),
        }
    }

    fn transform_linked_field(
        &mut self,
        field: &LinkedField,
        state: &Self::State,
    ) -> Result<Transformed<Selection>, Self::Error> {
        match self.transform_selections(&field.selections, state)? {
            TransformedValue::Keep => Ok(Transformed::Keep),
            TransformedValue::Replace(selections) => Ok(Transformed::Replace(
                Selection::LinkedField(LinkedField {
                    selections,
                    ..field.clone()
                }),
            )),
        }
    }

    fn transform_scalar_field(
        &mut self,
        _field: &ScalarField,
        _state: &Self::State,
    ) -> Result<Transformed<Selection>, Self::Error> {
        Ok(Transformed::Keep)
    }
}

/// Walks every root and fragment in `context`, dispatching to `transform`'s
/// callbacks with a fresh per-entry state, and assembles a new context from
/// the non-deleted outputs.
pub fn transform_context<T: IrTransform>(
    context: &CompilerContext,
    transform: &mut T,
) -> Result<CompilerContext, T::Error> {
    let mut roots = IndexMap::with_capacity(context.roots().len());
    for root in context.roots().values() {
        let state = transform.initial_state();
        match transform.transform_root(root, &state)? {
            Transformed::Keep => {
                roots.insert(root.name.clone(), root.clone());
            }
            Transformed::Replace(root) => {
                roots.insert(root.name.clone(), root);
            }
            Transformed::Delete => (),
        }
    }

    let mut fragments = IndexMap::with_capacity(context.fragments().len());
    for fragment in context.fragments().values() {
        let state = transform.initial_state();
        match transform.transform_fragment(fragment, &state)? {
            Transformed::Keep => {
                fragments.insert(fragment.name.clone(), fragment.clone());
            }
            Transformed::Replace(fragment) => {
                fragments.insert(fragment.name.clone(), fragment);
            }
            Transformed::Delete => (),
        }
    }

    Ok(CompilerContext {
        fragments,
        roots,
        schema: context.schema().clone(),
    })
}
