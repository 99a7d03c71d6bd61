use crate::ir::Fragment;
use crate::ir::Root;
use crate::named_ref::DerefByName;
use crate::named_ref::DerefByNameError;
use crate::schema::Schema;
use indexmap::IndexMap;
use thiserror::Error;

type Result<T> = std::result::Result<T, ContextError>;

/// The compilation unit: every named root operation and reusable fragment
/// being compiled together, plus the schema they were built against. Owns
/// all IR nodes reachable from them.
#[derive(Clone, Debug, PartialEq)]
pub struct CompilerContext {
    pub(crate) fragments: IndexMap<String, Fragment>,
    pub(crate) roots: IndexMap<String, Root>,
    pub(crate) schema: Schema,
}
impl CompilerContext {
    pub fn new(schema: Schema) -> Self {
        Self {
            fragments: IndexMap::new(),
            roots: IndexMap::new(),
            schema,
        }
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Root operations, in insertion order.
    pub fn roots(&self) -> &IndexMap<String, Root> {
        &self.roots
    }

    /// Fragment definitions, in insertion order.
    pub fn fragments(&self) -> &IndexMap<String, Fragment> {
        &self.fragments
    }

    /// Fragment lookup by name. A dangling name is a fatal condition for
    /// callers; it is never swallowed here.
    pub fn fragment(&self, name: &str) -> std::result::Result<&Fragment, DerefByNameError> {
        Fragment::deref_name(self, name)
    }

    pub fn add_root(&mut self, root: Root) -> Result<()> {
        if self.roots.contains_key(&root.name) {
            return Err(ContextError::DuplicateRootName { name: root.name });
        }
        self.roots.insert(root.name.clone(), root);
        Ok(())
    }

    pub fn add_fragment(&mut self, fragment: Fragment) -> Result<()> {
        if self.fragments.contains_key(&fragment.name) {
            return Err(ContextError::DuplicateFragmentName { name: fragment.name });
        }
        self.fragments.insert(fragment.name.clone(), fragment);
        Ok(())
    }

    /// Bulk-merges additional roots into the unit (e.g. roots generated by
    /// a compiler pass).
    pub fn add_all(&mut self, roots: Vec<Root>) -> Result<()> {
        for root in roots {
            self.add_root(root)?;
        }
        Ok(())
    }
}

#[derive(Clone, Debug, Error, PartialEq)]
pub enum ContextError {
    #[error("A fragment named `{name}` is already defined in this compilation unit")]
    DuplicateFragmentName {
        name: String,
    },

    #[error("An operation named `{name}` is already defined in this compilation unit")]
    DuplicateRootName {
        name: String,
    },
}
