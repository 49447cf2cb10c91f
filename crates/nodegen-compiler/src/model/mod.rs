//! Declarations of node types, members and unions.
//!
//! Everything here is plain declaration data. References between node types
//! are `TypeRef`s: either a name that may be defined later, or the `TypeId`
//! returned by an earlier registration. The `Registry` resolves them.

mod member;
mod union;

pub use member::{Member, MemberKind, PassAs};
pub use union::{
    Capabilities, DocMode, EqualityMode, FormatMode, HashMode, IntWidth, StorageMode, Tag,
    UnionSchema, Variant, VariantKind, VariantNames,
};

use std::fmt;

use nodegen_core::utils::to_snake_case;

use crate::{Error, Result};

/// Stable handle to a registered type: its index in the registry arena.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct TypeId(u32);

impl TypeId {
    #[inline]
    pub fn from_raw(index: u32) -> Self {
        Self(index)
    }

    #[inline]
    pub fn as_u32(self) -> u32 {
        self.0
    }

    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Reference to a node type, resolved by `Registry::finish`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TypeRef {
    /// Forward reference by name.
    Name(String),
    /// Direct reference to an already registered type.
    Id(TypeId),
}

impl From<&str> for TypeRef {
    fn from(name: &str) -> Self {
        Self::Name(name.to_string())
    }
}

impl From<String> for TypeRef {
    fn from(name: String) -> Self {
        Self::Name(name)
    }
}

impl From<TypeId> for TypeRef {
    fn from(id: TypeId) -> Self {
        Self::Id(id)
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Name(name) => f.write_str(name),
            Self::Id(id) => write!(f, "#{}", id.as_u32()),
        }
    }
}

/// Order in which a generated walker visits inherited and own members.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum WalkOrder {
    #[default]
    BaseFirst,
    DerivedFirst,
}

impl WalkOrder {
    pub fn parse(owner: &str, value: &str) -> Result<Self> {
        match value {
            "base_first" => Ok(Self::BaseFirst),
            "derived_first" => Ok(Self::DerivedFirst),
            _ => Err(Error::InvalidWalkOrder {
                name: owner.to_string(),
                value: value.to_string(),
            }),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::BaseFirst => "base_first",
            Self::DerivedFirst => "derived_first",
        }
    }
}

/// A named node type in a single-inheritance hierarchy.
///
/// Final types are concrete leaves; non-final types only group their
/// derived types. The `base` stays unresolved until the owning registry
/// is finished.
#[derive(Clone, Debug)]
pub struct TypeDef {
    pub name: String,
    pub base: Option<TypeRef>,
    pub is_final: bool,
    /// Overrides `prefix + name` as the rendered type name.
    pub rendered_name: Option<String>,
    pub doc: Option<String>,
    pub members: Vec<Member>,
    pub walk_order: WalkOrder,
    /// Name under which the type is publicly exposed, if any.
    pub public_name: Option<String>,
}

impl TypeDef {
    /// A concrete (final) type.
    pub fn concrete(name: impl Into<String>) -> Self {
        Self::new(name, true)
    }

    /// An abstract grouping type.
    pub fn abstract_type(name: impl Into<String>) -> Self {
        Self::new(name, false)
    }

    fn new(name: impl Into<String>, is_final: bool) -> Self {
        Self {
            name: name.into(),
            base: None,
            is_final,
            rendered_name: None,
            doc: None,
            members: Vec::new(),
            walk_order: WalkOrder::default(),
            public_name: None,
        }
    }

    pub fn base(mut self, base: impl Into<TypeRef>) -> Self {
        self.base = Some(base.into());
        self
    }

    pub fn doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    pub fn member(mut self, member: Member) -> Self {
        self.members.push(member);
        self
    }

    pub fn members(mut self, members: impl IntoIterator<Item = Member>) -> Self {
        self.members.extend(members);
        self
    }

    pub fn rendered_as(mut self, name: impl Into<String>) -> Self {
        self.rendered_name = Some(name.into());
        self
    }

    pub fn walk_order(mut self, order: WalkOrder) -> Self {
        self.walk_order = order;
        self
    }

    /// Expose the type publicly under its own name.
    pub fn public(mut self) -> Self {
        self.public_name = Some(self.name.clone());
        self
    }

    /// Expose the type publicly under a different name.
    pub fn public_as(mut self, name: impl Into<String>) -> Self {
        self.public_name = Some(name.into());
        self
    }

    /// Name used by the renderer.
    pub fn rendered_name(&self, prefix: &str) -> String {
        match &self.rendered_name {
            Some(name) => name.clone(),
            None => format!("{prefix}{}", self.name),
        }
    }

    pub fn visitor_name(&self) -> String {
        format!("visit_{}", to_snake_case(&self.name))
    }

    pub fn required_members(&self) -> impl Iterator<Item = &Member> {
        self.members.iter().filter(|m| m.is_required())
    }

    pub fn is_public(&self) -> bool {
        self.public_name.is_some()
    }
}
