//! Slot types: the distinct child types a generated visitor must support.

use std::collections::HashSet;

use log::debug;

use super::Hierarchy;
use crate::config::Config;
use crate::model::{MemberKind, TypeId};
use crate::registry::Registry;
use crate::Result;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SlotKind {
    /// One owned child.
    Single,
    /// Ordered list of owned children.
    List,
}

/// A child type referenced by at least one `Node` or `NodeList` member.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SlotType {
    pub kind: SlotKind,
    pub target: TypeId,
    /// Wrapper and target, e.g. `NodePtr<Expr>`. Also the dedup and sort key.
    pub rendered: String,
    pub visitor_name: String,
}

/// Collect slot types from the own members of every type in `hierarchy`.
///
/// Types are visited in pre-order, duplicates are collapsed by rendered
/// name and the result is sorted by it, so declaration order never matters.
pub fn collect_slot_types(
    registry: &Registry,
    hierarchy: &Hierarchy,
    config: &Config,
) -> Result<Vec<SlotType>> {
    let mut seen = HashSet::new();
    let mut slots = Vec::new();

    for ty in hierarchy.walk() {
        for (index, member) in registry.def(ty).members.iter().enumerate() {
            let kind = match member.kind {
                MemberKind::Node { .. } => SlotKind::Single,
                MemberKind::NodeList { .. } => SlotKind::List,
                MemberKind::Data { .. } | MemberKind::DataList { .. } => continue,
            };
            let Some(target) = registry.member_target(ty, index)? else {
                continue;
            };

            let slot = slot_type(registry, config, kind, target);
            if seen.insert(slot.rendered.clone()) {
                slots.push(slot);
            }
        }
    }

    slots.sort_by(|a, b| a.rendered.cmp(&b.rendered));
    debug!("collected {} slot types", slots.len());
    Ok(slots)
}

fn slot_type(registry: &Registry, config: &Config, kind: SlotKind, target: TypeId) -> SlotType {
    let def = registry.def(target);
    let target_name = def.rendered_name(&config.node_prefix);
    let visitor = def.visitor_name();
    let (rendered, visitor_name) = match kind {
        SlotKind::Single => (format!("{}<{target_name}>", config.single_slot), visitor),
        SlotKind::List => (
            format!("{}<{target_name}>", config.list_slot),
            format!("{visitor}_list"),
        ),
    };
    SlotType {
        kind,
        target,
        rendered,
        visitor_name,
    }
}
