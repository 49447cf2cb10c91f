//! Public type groups of hierarchies that expose some types by name.

use super::{Hierarchy, HierarchyNode, TagTable};
use crate::model::TypeId;
use crate::registry::Registry;

/// A publicly visible type and the concrete types it covers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PublicType {
    pub name: String,
    /// Concrete types whose nearest public ancestor-or-self is this type.
    pub objects: Vec<TypeId>,
}

/// A concrete type with its allocated tag value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConcreteType {
    pub id: TypeId,
    pub name: String,
    pub tag: u64,
}

/// Public types sorted by public name.
///
/// A concrete type below two public types belongs to the nearer one.
/// Concrete types without a public ancestor-or-self are not listed.
pub fn public_types(registry: &Registry, hierarchy: &Hierarchy) -> Vec<PublicType> {
    let mut out = Vec::new();
    gather(registry, hierarchy.root(), None, &mut out);
    out.sort_by(|a, b| a.name.cmp(&b.name));
    out
}

fn gather(
    registry: &Registry,
    node: &HierarchyNode,
    mut current: Option<usize>,
    out: &mut Vec<PublicType>,
) {
    let def = registry.def(node.type_id());
    if let Some(name) = &def.public_name {
        out.push(PublicType {
            name: name.clone(),
            objects: Vec::new(),
        });
        current = Some(out.len() - 1);
    }
    if let (Some(index), HierarchyNode::Leaf(ty)) = (current, node) {
        out[index].objects.push(*ty);
    }
    for child in node.children() {
        gather(registry, child, current, out);
    }
}

/// Concrete types sorted by name, each with its tag.
///
/// Types missing from `tags` are skipped.
pub fn concrete_types(registry: &Registry, hierarchy: &Hierarchy, tags: &TagTable) -> Vec<ConcreteType> {
    let mut out: Vec<_> = hierarchy
        .concrete()
        .into_iter()
        .filter_map(|id| {
            let range = tags.range(id)?;
            Some(ConcreteType {
                id,
                name: registry.name(id).to_string(),
                tag: range.first,
            })
        })
        .collect();
    out.sort_by(|a, b| a.name.cmp(&b.name));
    out
}
