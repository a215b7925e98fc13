use smol_str::SmolStr;

use super::reference::TypeRef;

/// How many children a `ChildSlot` actually produces at instantiation (spec
/// §4.2 composition): one instance, a fixed-size array, or an explicitly
/// named set (e.g. differential-pair lanes named `"p"`/`"n"`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlotArity {
    Single,
    Count(usize),
    Indexed(Vec<SmolStr>),
}

/// A composition child declared on a type (spec §2 `Composition` edges).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChildSlot {
    pub name: SmolStr,
    pub type_ref: TypeRef,
    pub arity: SlotArity,
}

impl ChildSlot {
    pub fn single(name: impl Into<SmolStr>, type_ref: TypeRef) -> Self {
        Self {
            name: name.into(),
            type_ref,
            arity: SlotArity::Single,
        }
    }

    pub fn count(name: impl Into<SmolStr>, type_ref: TypeRef, count: usize) -> Self {
        Self {
            name: name.into(),
            type_ref,
            arity: SlotArity::Count(count),
        }
    }

    pub fn indexed(
        name: impl Into<SmolStr>,
        type_ref: TypeRef,
        indices: impl IntoIterator<Item = impl Into<SmolStr>>,
    ) -> Self {
        Self {
            name: name.into(),
            type_ref,
            arity: SlotArity::Indexed(indices.into_iter().map(Into::into).collect()),
        }
    }
}

/// A trait a type carries (spec §2 `Trait` edges).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraitSlot {
    pub name: SmolStr,
    pub trait_ref: TypeRef,
}

impl TraitSlot {
    pub fn new(name: impl Into<SmolStr>, trait_ref: TypeRef) -> Self {
        Self {
            name: name.into(),
            trait_ref,
        }
    }
}
