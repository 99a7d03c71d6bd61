use serde::Serialize;
use serde::Serializer;
use std::marker::PhantomData;
use thiserror::Error;

/// Represents a reference to some resource by name, resolved lazily against
/// the source that owns resources of that kind.
///
/// For example, a fragment spread holds a named reference to a fragment
/// definition which is resolved against the
/// [CompilerContext](crate::CompilerContext), and IR nodes hold named
/// references to schema types which are resolved against the
/// [Schema](crate::schema::Schema).
#[derive(Clone, Debug, PartialEq)]
pub struct NamedRef<
    TSource,
    TResource: DerefByName<Source = TSource>,
> {
    name: String,
    phantom: PhantomData<TResource>,
}
impl<TSource, TResource: DerefByName<Source = TSource>> NamedRef<TSource, TResource> {
    pub fn new(name: impl AsRef<str>) -> NamedRef<TSource, TResource> {
        NamedRef {
            name: name.as_ref().to_string(),
            phantom: PhantomData,
        }
    }

    pub fn deref<'a>(
        &self,
        source: &'a TSource,
    ) -> Result<&'a TResource, DerefByNameError> {
        TResource::deref_name(source, self.name.as_str())
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }
}
impl<TSource, TResource: DerefByName<Source = TSource>> Serialize for NamedRef<TSource, TResource> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name.as_str())
    }
}

/// Implement this trait for any type that can be referenced by name. This
/// enables usage of [NamedRef] for that type.
pub trait DerefByName: Clone + core::fmt::Debug {
    type Source;

    fn deref_name<'a>(
        source: &'a Self::Source,
        name: &str,
    ) -> Result<&'a Self, DerefByNameError> where Self: Sized;

    fn named_ref(name: impl AsRef<str>) -> NamedRef<Self::Source, Self> where Self: Sized {
        NamedRef::<Self::Source, Self>::new(name)
    }
}

#[derive(Clone, Debug, Error, PartialEq)]
pub enum DerefByNameError {
    #[error("No resource named `{0}` is defined")]
    DanglingReference(String),
}
