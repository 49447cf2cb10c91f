//! Union schema validation.
//!
//! Capability values are typed, so invalid storage or format modes are
//! rejected when a document is loaded. What remains is checked here:
//! documentation requirements, variant and member uniqueness, alias
//! targets and whether every variant fits into the tag type.

use std::collections::HashMap;

use indexmap::IndexMap;
use log::{debug, trace};

use crate::hierarchy::TagEntry;
use crate::model::{DocMode, UnionSchema, VariantKind};
use crate::{Error, Result};

/// Check one union on its own.
pub fn validate_union(union: &UnionSchema) -> Result<()> {
    if union.capabilities.doc_mode == DocMode::Tag && union.tag.doc.is_none() {
        return Err(Error::MissingDoc {
            union: union.name.clone(),
            tag: union.tag.name.clone(),
        });
    }

    for (i, variant) in union.variants.iter().enumerate() {
        if union.variants[..i].iter().any(|v| v.name == variant.name) {
            return Err(Error::DuplicateVariant {
                union: union.name.clone(),
                variant: variant.name.clone(),
            });
        }

        match &variant.kind {
            VariantKind::Alias { target, .. } if *target == union.name => {
                return Err(Error::SelfReferentialAlias {
                    union: union.name.clone(),
                    variant: variant.name.clone(),
                });
            }
            VariantKind::Alias { .. } => {}
            VariantKind::Struct { members } => {
                for (j, member) in members.iter().enumerate() {
                    if member.kind.is_child() {
                        return Err(Error::UnsupportedUnionMember {
                            union: union.name.clone(),
                            variant: variant.name.clone(),
                            member: member.name.clone(),
                        });
                    }
                    if members[..j].iter().any(|m| m.name == member.name) {
                        return Err(Error::DuplicateMember {
                            owner: format!("{}::{}", union.name, variant.name),
                            member: member.name.clone(),
                        });
                    }
                }
            }
        }
    }

    check_tag_fits(union)?;
    trace!(
        "union `{}` is valid ({} variants)",
        union.name,
        union.variants.len()
    );
    Ok(())
}

fn check_tag_fits(union: &UnionSchema) -> Result<()> {
    let Some(last) = union.variants.last() else {
        return Ok(());
    };
    let width = union.tag.underlying;
    let count = union.variants.len() as u64 - 1;
    match union.tag.first_value().checked_add(count) {
        Some(value) if value <= width.max_value() => Ok(()),
        value => Err(Error::TagOverflow {
            name: format!("{}::{}", union.tag.name, last.name),
            value: value.unwrap_or(u64::MAX),
            width,
        }),
    }
}

/// Tag enum entries of a union: one per variant, numbered from the tag's
/// start value in declaration order. Values of a validated union never
/// saturate.
pub fn tag_values(union: &UnionSchema) -> Vec<TagEntry> {
    let first = union.tag.first_value();
    union
        .variants
        .iter()
        .enumerate()
        .map(|(i, variant)| TagEntry {
            label: variant.name.clone(),
            value: first.saturating_add(i as u64),
        })
        .collect()
}

/// Validated unions of one schema, in insertion order.
///
/// Union names are unique and every tag belongs to exactly one union.
#[derive(Debug, Default)]
pub struct UnionSet {
    unions: IndexMap<String, UnionSchema>,
    tag_owners: HashMap<String, String>,
}

impl UnionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate `union` and add it to the set.
    pub fn insert(&mut self, union: UnionSchema) -> Result<()> {
        if self.unions.contains_key(&union.name) {
            return Err(Error::DuplicateName {
                namespace: "union",
                name: union.name,
            });
        }
        if let Some(owner) = self.tag_owners.get(&union.tag.name) {
            return Err(Error::TagAlreadyAttached {
                tag: union.tag.name.clone(),
                union: union.name,
                owner: owner.clone(),
            });
        }
        validate_union(&union)?;

        self.tag_owners
            .insert(union.tag.name.clone(), union.name.clone());
        self.unions.insert(union.name.clone(), union);
        Ok(())
    }

    /// Insert several unions, stopping at the first error.
    pub fn insert_all(&mut self, unions: impl IntoIterator<Item = UnionSchema>) -> Result<()> {
        for union in unions {
            self.insert(union)?;
        }
        debug!("union set holds {} unions", self.unions.len());
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&UnionSchema> {
        self.unions.get(name)
    }

    /// Name of the union a tag is attached to.
    pub fn tag_owner(&self, tag: &str) -> Option<&str> {
        self.tag_owners.get(tag).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &UnionSchema> {
        self.unions.values()
    }

    pub fn len(&self) -> usize {
        self.unions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.unions.is_empty()
    }
}

#[cfg(test)]
mod unions_tests;
