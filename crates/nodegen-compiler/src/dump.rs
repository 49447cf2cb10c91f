//! Human-readable dump of a compiled model for debugging and snapshots.
//!
//! Sections appear only when they have content:
//! `[types]` (the tree with tag ranges), `[tags]` (enum entries in emission
//! order), `[slots]`, `[public]` and one `[union Name]` block per union.

use std::fmt::Write as _;

use nodegen_core::Colors;

use crate::compile::CompiledModel;
use crate::hierarchy::{HierarchyNode, TagTable};
use crate::model::{Member, MemberKind, PassAs, UnionSchema, VariantKind};
use crate::registry::Registry;
use crate::unions::tag_values;

/// Generate a human-readable dump of the compiled model.
pub fn dump(model: &CompiledModel, colors: Colors) -> String {
    let mut out = String::new();
    let c = &colors;

    if let (Some(hierarchy), Some(tags)) = (model.hierarchy(), model.tags()) {
        writeln!(out, "{}[types]{}", c.blue, c.reset).unwrap();
        dump_tree(&mut out, model.registry(), tags, hierarchy.root(), 0, c);
        out.push('\n');

        dump_tags(&mut out, tags, c);
    }
    dump_slots(&mut out, model, c);
    dump_public(&mut out, model, c);
    for union in model.unions().iter() {
        dump_union(&mut out, union, c);
    }

    out
}

fn dump_tree(
    out: &mut String,
    registry: &Registry,
    tags: &TagTable,
    node: &HierarchyNode,
    depth: usize,
    c: &Colors,
) {
    let ty = node.type_id();
    let name = registry.name(ty);
    let indent = "  ".repeat(depth);
    let Some(range) = tags.range(ty) else {
        return;
    };

    match node {
        HierarchyNode::Leaf(_) => {
            writeln!(out, "{indent}{name} {}{}{}", c.green, range.first, c.reset).unwrap();
        }
        HierarchyNode::Group { children, .. } => {
            writeln!(
                out,
                "{indent}{name} {}{}..{}{}",
                c.dim, range.first, range.last, c.reset
            )
            .unwrap();
            for child in children {
                dump_tree(out, registry, tags, child, depth + 1, c);
            }
        }
    }
}

fn dump_tags(out: &mut String, tags: &TagTable, c: &Colors) {
    writeln!(out, "{}[tags]{}", c.blue, c.reset).unwrap();
    for entry in tags.entries() {
        writeln!(out, "{} = {}{}{}", entry.label, c.green, entry.value, c.reset).unwrap();
    }
    out.push('\n');
}

fn dump_slots(out: &mut String, model: &CompiledModel, c: &Colors) {
    let slots = model.slot_types();
    if slots.is_empty() {
        return;
    }

    writeln!(out, "{}[slots]{}", c.blue, c.reset).unwrap();
    for slot in slots {
        writeln!(
            out,
            "{}{}  ; {}{}",
            slot.rendered, c.dim, slot.visitor_name, c.reset
        )
        .unwrap();
    }
    out.push('\n');
}

fn dump_public(out: &mut String, model: &CompiledModel, c: &Colors) {
    let public = model.public_types();
    if public.is_empty() {
        return;
    }

    let registry = model.registry();
    writeln!(out, "{}[public]{}", c.blue, c.reset).unwrap();
    for ty in public {
        let objects: Vec<_> = ty.objects.iter().map(|&id| registry.name(id)).collect();
        writeln!(out, "{}{}  ; {}{}", ty.name, c.dim, objects.join(", "), c.reset).unwrap();
    }
    out.push('\n');
}

fn dump_union(out: &mut String, union: &UnionSchema, c: &Colors) {
    let tag = &union.tag;
    let non_final = if union.is_final { "" } else { " (non-final)" };
    writeln!(
        out,
        "{}[union {}]{} {}: {}{non_final}",
        c.blue, union.name, c.reset, tag.name, tag.underlying
    )
    .unwrap();

    for (variant, entry) in union.variants.iter().zip(tag_values(union)) {
        let body = match &variant.kind {
            VariantKind::Struct { members } if members.is_empty() => String::new(),
            VariantKind::Struct { members } => {
                let fields: Vec<_> = members.iter().map(format_member).collect();
                format!(" {{ {} }}", fields.join(", "))
            }
            VariantKind::Alias { target, pass_as } => match pass_as {
                PassAs::Copy => format!(" = {target}"),
                PassAs::Move => format!(" = {target} (move)"),
            },
        };
        writeln!(
            out,
            "{}{}{} {}{body}",
            c.green, entry.value, c.reset, variant.name
        )
        .unwrap();
    }

    let caps = &union.capabilities;
    writeln!(
        out,
        "{}; storage={} format={} equality={} hash={} doc={}{}",
        c.dim,
        caps.storage.as_str(),
        caps.format.as_str(),
        caps.equality.as_str(),
        caps.hash.as_str(),
        caps.doc_mode.as_str(),
        c.reset
    )
    .unwrap();
    out.push('\n');
}

fn format_member(member: &Member) -> String {
    let opt = if member.is_required() || member.kind.is_list() {
        ""
    } else {
        "?"
    };
    let ty = match &member.kind {
        MemberKind::Data { data_type, .. } => data_type.clone(),
        MemberKind::DataList { element_type } => format!("[{element_type}]"),
        MemberKind::Node { node_type } => node_type.to_string(),
        MemberKind::NodeList { element_type } => format!("[{element_type}]"),
    };
    format!("{}{opt}: {ty}", member.name)
}

#[cfg(test)]
#[path = "dump_tests.rs"]
mod dump_tests;
