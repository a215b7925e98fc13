use indexmap::IndexMap;
use smol_str::SmolStr;

use crate::core::CoreError;
use crate::graph::NodeId;

/// Where an unresolved [`super::TypeRef`] lives, so
/// `TypeGraph::reference_resolve` can write the resolved id back in place
/// once the name is found. Grounded on the two-pass resolve-after-declare
/// shape of `examples/jade-codes-syster-base/src/semantic/resolver/name_resolver.rs`
/// and `import_resolver.rs`: declarations are collected first, references are
/// resolved against the whole namespace in a second pass, so forward
/// references within the same type graph just work.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum UnresolvedRefSite {
    Child { owner: NodeId, slot_index: usize },
    Trait { owner: NodeId, slot_index: usize },
    Reference { owner: NodeId, ref_index: usize },
}

/// Resolve `name` against the namespace, following at most one import alias
/// indirection (`link_imports`'s alias map). Ambiguity (duplicate
/// declarations sharing a name) is rejected at `add_type` time, so lookup
/// here is a plain map hit or a linker error.
pub(super) fn resolve_name(
    namespace: &IndexMap<SmolStr, NodeId>,
    aliases: &IndexMap<SmolStr, SmolStr>,
    name: &str,
) -> Result<NodeId, CoreError> {
    if let Some(id) = namespace.get(name) {
        return Ok(*id);
    }
    if let Some(target) = aliases.get(name) {
        return namespace.get(target.as_str()).copied().ok_or_else(|| {
            CoreError::linker(format!("import alias {name} points at unknown type {target}"))
        });
    }
    Err(CoreError::linker(format!("unresolved type reference: {name}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_direct_name() {
        let mut ns = IndexMap::new();
        ns.insert(SmolStr::new("Resistor"), NodeId(0));
        let aliases = IndexMap::new();
        assert!(resolve_name(&ns, &aliases, "Resistor").is_ok());
    }

    #[test]
    fn resolves_via_import_alias() {
        let mut ns = IndexMap::new();
        ns.insert(SmolStr::new("lib::Resistor"), NodeId(0));
        let mut aliases = IndexMap::new();
        aliases.insert(SmolStr::new("Resistor"), SmolStr::new("lib::Resistor"));
        assert!(resolve_name(&ns, &aliases, "Resistor").is_ok());
    }

    #[test]
    fn unresolved_name_is_linker_error() {
        let ns = IndexMap::new();
        let aliases = IndexMap::new();
        assert!(matches!(
            resolve_name(&ns, &aliases, "Missing"),
            Err(CoreError::Linker { .. })
        ));
    }
}
