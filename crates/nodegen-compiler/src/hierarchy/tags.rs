//! Tag range allocation.
//!
//! Final types are numbered consecutively in a post-order walk with sorted
//! children. Every abstract type then covers exactly the values of its
//! concrete descendants, so "is value V an instance of T" is one range
//! check: `first(T) <= V <= last(T)`.

use std::collections::HashMap;

use indexmap::IndexMap;
use log::{debug, trace};

use super::{Hierarchy, HierarchyNode};
use crate::model::{IntWidth, TypeId};
use crate::registry::Registry;
use crate::{Error, Result};

/// Inclusive value range of a type.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TagRange {
    pub first: u64,
    pub last: u64,
}

impl TagRange {
    pub fn single(value: u64) -> Self {
        Self {
            first: value,
            last: value,
        }
    }

    pub fn contains(&self, value: u64) -> bool {
        self.first <= value && value <= self.last
    }

    /// Number of values in the range.
    pub fn width(&self) -> u64 {
        self.last - self.first + 1
    }
}

/// One `(label, value)` pair of the generated tag enum.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TagEntry {
    pub label: String,
    pub value: u64,
}

/// Output of the allocator: enum entries in emission order and the range of
/// every type in the hierarchy.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TagTable {
    entries: Vec<TagEntry>,
    by_label: HashMap<String, usize>,
    ranges: IndexMap<TypeId, TagRange>,
}

impl TagTable {
    /// Entries in post-order: concrete `Name` entries, then `FirstName` and
    /// `LastName` after the children of each abstract type.
    pub fn entries(&self) -> &[TagEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn value(&self, label: &str) -> Option<u64> {
        self.by_label.get(label).map(|&i| self.entries[i].value)
    }

    pub fn range(&self, ty: TypeId) -> Option<TagRange> {
        self.ranges.get(&ty).copied()
    }

    /// Ranges of all types, in the order they were completed.
    pub fn ranges(&self) -> impl Iterator<Item = (TypeId, TagRange)> + '_ {
        self.ranges.iter().map(|(&ty, &range)| (ty, range))
    }

    /// Whether a value tagged `value` is an instance of `ty` or a subtype.
    pub fn is_a(&self, value: u64, ty: TypeId) -> bool {
        self.range(ty).is_some_and(|range| range.contains(value))
    }

    fn push(&mut self, label: String, value: u64) -> Result<()> {
        if self.by_label.contains_key(&label) {
            return Err(Error::DuplicateName {
                namespace: "tag label",
                name: label,
            });
        }
        trace!("tag {label} = {value}");
        self.by_label.insert(label.clone(), self.entries.len());
        self.entries.push(TagEntry { label, value });
        Ok(())
    }
}

/// Number the types of `hierarchy`, starting at `start`.
pub fn allocate_tags(
    registry: &Registry,
    hierarchy: &Hierarchy,
    start: u64,
    width: IntWidth,
) -> Result<TagTable> {
    if start == 0 {
        return Err(Error::InvalidTagStart { value: start });
    }

    let mut allocator = Allocator {
        registry,
        next: Some(start),
        width,
        table: TagTable::default(),
    };
    allocator.visit(hierarchy.root())?;

    debug!(
        "allocated {} tag entries for hierarchy `{}`",
        allocator.table.len(),
        registry.name(hierarchy.root_id())
    );
    Ok(allocator.table)
}

struct Allocator<'a> {
    registry: &'a Registry,
    /// `None` once the value space is exhausted.
    next: Option<u64>,
    width: IntWidth,
    table: TagTable,
}

impl Allocator<'_> {
    fn visit(&mut self, node: &HierarchyNode) -> Result<TagRange> {
        let range = match node {
            HierarchyNode::Leaf(ty) => {
                let name = self.registry.name(*ty);
                let max = self.width.max_value();
                let Some(value) = self.next.filter(|&v| v <= max) else {
                    return Err(Error::TagOverflow {
                        name: name.to_string(),
                        value: self.next.unwrap_or(u64::MAX),
                        width: self.width,
                    });
                };
                self.next = value.checked_add(1);
                self.table.push(name.to_string(), value)?;
                TagRange::single(value)
            }
            HierarchyNode::Group { ty, children } => {
                let mut range: Option<TagRange> = None;
                for child in children {
                    let child_range = self.visit(child)?;
                    range = Some(match range {
                        None => child_range,
                        Some(r) => TagRange {
                            first: r.first.min(child_range.first),
                            last: r.last.max(child_range.last),
                        },
                    });
                }
                let name = self.registry.name(*ty);
                let range = range.ok_or_else(|| Error::EmptyHierarchy {
                    name: name.to_string(),
                })?;
                self.table.push(format!("First{name}"), range.first)?;
                self.table.push(format!("Last{name}"), range.last)?;
                range
            }
        };
        self.table.ranges.insert(node.type_id(), range);
        Ok(range)
    }
}
