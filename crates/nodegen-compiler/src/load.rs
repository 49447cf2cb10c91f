//! Conversion of raw schema documents into the model.
//!
//! The document layer keeps every enumerated value as a string. This is
//! where they are parsed, so a bad value is reported with the owning type
//! or union name.

use nodegen_core::{
    RawMember, RawMemberKind, RawPublic, RawSchema, RawTypeDef, RawUnion, RawVariant,
};

use crate::compile::Schema;
use crate::model::{
    DocMode, EqualityMode, FormatMode, HashMode, IntWidth, Member, PassAs, StorageMode, Tag,
    TypeDef, UnionSchema, Variant, WalkOrder,
};
use crate::Result;

/// Convert a parsed document.
pub fn load_schema(raw: RawSchema) -> Result<Schema> {
    let types = raw
        .types
        .into_iter()
        .map(load_type)
        .collect::<Result<Vec<_>>>()?;
    let unions = raw
        .unions
        .into_iter()
        .map(load_union)
        .collect::<Result<Vec<_>>>()?;
    Ok(Schema { types, unions })
}

pub fn load_type(raw: RawTypeDef) -> Result<TypeDef> {
    let mut def = if raw.is_final {
        TypeDef::concrete(raw.name)
    } else {
        TypeDef::abstract_type(raw.name)
    };

    if let Some(base) = raw.base {
        def = def.base(base);
    }
    if let Some(order) = &raw.walk_order {
        let order = WalkOrder::parse(&def.name, order)?;
        def = def.walk_order(order);
    }
    def = match raw.public {
        Some(RawPublic::Flag(true)) => def.public(),
        Some(RawPublic::Name(name)) => def.public_as(name),
        Some(RawPublic::Flag(false)) | None => def,
    };
    def.rendered_name = raw.rendered_name;
    def.doc = raw.doc;

    let members = raw
        .members
        .into_iter()
        .map(|m| load_member(&def.name, m))
        .collect::<Result<Vec<_>>>()?;
    Ok(def.members(members))
}

fn load_member(owner: &str, raw: RawMember) -> Result<Member> {
    let mut member = match raw.kind {
        RawMemberKind::Data if raw.simple => Member::simple(raw.name, raw.type_name),
        RawMemberKind::Data => Member::data(raw.name, raw.type_name),
        RawMemberKind::DataList => Member::data_list(raw.name, raw.type_name),
        RawMemberKind::Node => Member::node(raw.name, raw.type_name),
        RawMemberKind::NodeList => Member::node_list(raw.name, raw.type_name),
    };
    if !raw.required {
        member = member.optional();
    }
    if let Some(pass_as) = &raw.pass_as {
        member = member.pass_as(PassAs::parse(owner, pass_as)?);
    }
    member.doc = raw.doc;
    Ok(member)
}

pub fn load_union(raw: RawUnion) -> Result<UnionSchema> {
    let name = raw.name;
    let underlying = IntWidth::parse(&raw.tag.name, &raw.tag.underlying)?;
    let mut tag = Tag::new(raw.tag.name, underlying);
    tag.start_value = raw.tag.start;
    tag.doc = raw.tag.doc;

    let mut union = UnionSchema::new(name, tag);
    union.doc = raw.doc;
    union.is_final = raw.is_final;

    let caps = &mut union.capabilities;
    if let Some(value) = &raw.storage {
        caps.storage = StorageMode::parse(&union.name, value)?;
    }
    if let Some(value) = &raw.format {
        caps.format = FormatMode::parse(&union.name, value)?;
    }
    if let Some(value) = &raw.equality {
        caps.equality = EqualityMode::parse(&union.name, value)?;
    }
    if let Some(value) = &raw.hash {
        caps.hash = HashMode::parse(&union.name, value)?;
    }
    if let Some(value) = &raw.doc_mode {
        caps.doc_mode = DocMode::parse(&union.name, value)?;
    }

    for variant in raw.variants {
        let variant = load_variant(&union.name, variant)?;
        union.variants.push(variant);
    }
    Ok(union)
}

fn load_variant(union: &str, raw: RawVariant) -> Result<Variant> {
    let (mut variant, names) = match raw {
        RawVariant::Struct {
            name,
            members,
            doc,
            names,
        } => {
            let owner = format!("{union}::{name}");
            let members = members
                .into_iter()
                .map(|m| load_member(&owner, m))
                .collect::<Result<Vec<_>>>()?;
            let mut variant = Variant::structure(name, members);
            variant.doc = doc;
            (variant, names)
        }
        RawVariant::Alias {
            name,
            target,
            pass_as,
            doc,
            names,
        } => {
            let mut variant = Variant::alias(name, target);
            if let Some(value) = &pass_as {
                let owner = format!("{union}::{}", variant.name);
                variant = variant.pass_as(PassAs::parse(&owner, value)?);
            }
            variant.doc = doc;
            (variant, names)
        }
    };

    if let Some(argument) = names.argument_name {
        variant = variant.argument_name(argument);
    }
    if let Some(accessor) = names.accessor_name {
        variant = variant.accessor_name(accessor);
    }
    Ok(variant)
}

#[cfg(test)]
#[path = "load_tests.rs"]
mod load_tests;
