use crate::CompilerContext;
use crate::ir::Directive;
use crate::ir::Selection;
use crate::named_ref::DerefByName;
use crate::named_ref::DerefByNameError;
use crate::named_ref::NamedRef;
use crate::schema::NamedTypeRef;
use serde::Serialize;

/// A named, reusable selection set referenced via a spread.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Fragment {
    pub directives: Vec<Directive>,
    pub name: String,
    pub selections: Vec<Selection>,
    pub type_condition: NamedTypeRef,
}

impl DerefByName for Fragment {
    type Source = CompilerContext;

    fn deref_name<'a>(
        source: &'a Self::Source,
        name: &str,
    ) -> Result<&'a Fragment, DerefByNameError> {
        source.fragments().get(name).ok_or_else(
            || DerefByNameError::DanglingReference(name.to_string()),
        )
    }
}

pub type FragmentRef = NamedRef<CompilerContext, Fragment>;
