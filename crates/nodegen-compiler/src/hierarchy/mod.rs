//! The resolved type tree and everything computed from it.
//!
//! `Hierarchy::build` turns a finished registry into an owned tree of
//! `Leaf` and `Group` nodes rooted at one type. The tree is the single
//! input of the tag allocator, the slot collector and the public type
//! gatherer, so the "abstract types have children" check happens once.

mod public;
mod slots;
mod tags;

pub use public::{ConcreteType, PublicType, concrete_types, public_types};
pub use slots::{SlotKind, SlotType, collect_slot_types};
pub use tags::{TagEntry, TagRange, TagTable, allocate_tags};

use log::trace;

use crate::model::TypeId;
use crate::registry::Registry;
use crate::{Error, Result};

/// One node of the resolved tree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HierarchyNode {
    /// A final type.
    Leaf(TypeId),
    /// An abstract type with at least one derived type, children sorted by name.
    Group {
        ty: TypeId,
        children: Vec<HierarchyNode>,
    },
}

impl HierarchyNode {
    pub fn type_id(&self) -> TypeId {
        match self {
            Self::Leaf(ty) | Self::Group { ty, .. } => *ty,
        }
    }

    pub fn children(&self) -> &[HierarchyNode] {
        match self {
            Self::Leaf(_) => &[],
            Self::Group { children, .. } => children,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Self::Leaf(_))
    }
}

/// Resolved tree of one root type and all its transitive derived types.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Hierarchy {
    root: HierarchyNode,
}

impl Hierarchy {
    /// Build the tree below `root_name`.
    ///
    /// Fails with `NotFinished` on an unfinished registry, even for a final
    /// root. Fails with `EmptyHierarchy` if an abstract type reachable from
    /// the root has no derived types. Types outside the tree are not checked.
    pub fn build(registry: &Registry, root_name: &str) -> Result<Self> {
        if !registry.is_finished() {
            return Err(Error::NotFinished {
                name: root_name.to_string(),
            });
        }
        let root = registry.id(root_name)?;
        Ok(Self {
            root: build_node(registry, root)?,
        })
    }

    pub fn root(&self) -> &HierarchyNode {
        &self.root
    }

    pub fn root_id(&self) -> TypeId {
        self.root.type_id()
    }

    /// All types in pre-order (a type before its derived types).
    pub fn walk(&self) -> Vec<TypeId> {
        let mut out = Vec::new();
        walk_node(&self.root, &mut |node| out.push(node.type_id()));
        out
    }

    /// Final types in pre-order.
    pub fn concrete(&self) -> Vec<TypeId> {
        let mut out = Vec::new();
        walk_node(&self.root, &mut |node| {
            if node.is_leaf() {
                out.push(node.type_id());
            }
        });
        out
    }
}

fn build_node(registry: &Registry, ty: TypeId) -> Result<HierarchyNode> {
    let def = registry.def(ty);
    if def.is_final {
        return Ok(HierarchyNode::Leaf(ty));
    }

    let derived = registry.derived(ty)?;
    if derived.is_empty() {
        return Err(Error::EmptyHierarchy {
            name: def.name.clone(),
        });
    }
    trace!("group `{}` with {} derived types", def.name, derived.len());

    let children = derived
        .iter()
        .map(|&child| build_node(registry, child))
        .collect::<Result<Vec<_>>>()?;
    Ok(HierarchyNode::Group { ty, children })
}

fn walk_node(node: &HierarchyNode, f: &mut impl FnMut(&HierarchyNode)) {
    f(node);
    for child in node.children() {
        walk_node(child, f);
    }
}

/// Pre-order walk over the trees rooted at `bases`, in the given order.
///
/// Unlike `Hierarchy::build`, abstract types without derived types are
/// visited rather than rejected.
pub fn walk_types(registry: &Registry, bases: &[TypeId]) -> Result<Vec<TypeId>> {
    let mut out = Vec::new();
    let mut stack: Vec<TypeId> = bases.iter().rev().copied().collect();
    while let Some(ty) = stack.pop() {
        out.push(ty);
        stack.extend(registry.derived(ty)?.iter().rev());
    }
    Ok(out)
}

/// Like `walk_types`, restricted to final types.
pub fn walk_concrete_types(registry: &Registry, bases: &[TypeId]) -> Result<Vec<TypeId>> {
    let all = walk_types(registry, bases)?;
    Ok(all
        .into_iter()
        .filter(|&ty| registry.def(ty).is_final)
        .collect())
}
