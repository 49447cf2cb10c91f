//! Tagged union declarations and their capability flags.

use std::fmt;

use nodegen_core::utils::{avoid_keyword, to_snake_case};

use super::{Member, PassAs};
use crate::{Error, Result};

/// Underlying integer type of a tag.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum IntWidth {
    U8,
    U16,
    U32,
    U64,
}

impl IntWidth {
    pub fn parse(tag: &str, value: &str) -> Result<Self> {
        match value {
            "u8" => Ok(Self::U8),
            "u16" => Ok(Self::U16),
            "u32" => Ok(Self::U32),
            "u64" => Ok(Self::U64),
            _ => Err(Error::InvalidTagWidth {
                tag: tag.to_string(),
                value: value.to_string(),
            }),
        }
    }

    pub fn max_value(self) -> u64 {
        match self {
            Self::U8 => u8::MAX as u64,
            Self::U16 => u16::MAX as u64,
            Self::U32 => u32::MAX as u64,
            Self::U64 => u64::MAX,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::U8 => "u8",
            Self::U16 => "u16",
            Self::U32 => "u32",
            Self::U64 => "u64",
        }
    }
}

impl fmt::Display for IntWidth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The integer tag enum paired with a union.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Tag {
    pub name: String,
    pub underlying: IntWidth,
    pub start_value: Option<u64>,
    pub doc: Option<String>,
}

impl Tag {
    pub fn new(name: impl Into<String>, underlying: IntWidth) -> Self {
        Self {
            name: name.into(),
            underlying,
            start_value: None,
            doc: None,
        }
    }

    pub fn start_value(mut self, value: u64) -> Self {
        self.start_value = Some(value);
        self
    }

    pub fn doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    /// Numeric value of the first variant.
    pub fn first_value(&self) -> u64 {
        self.start_value.unwrap_or(0)
    }
}

/// `trivial`: no special member functions. `movable`: emit destroy and move.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum StorageMode {
    #[default]
    Trivial,
    Movable,
}

impl StorageMode {
    pub fn parse(union: &str, value: &str) -> Result<Self> {
        match value {
            "trivial" => Ok(Self::Trivial),
            "movable" => Ok(Self::Movable),
            _ => Err(Error::InvalidStorageMode {
                union: union.to_string(),
                value: value.to_string(),
            }),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Trivial => "trivial",
            Self::Movable => "movable",
        }
    }
}

/// `declare`: declare the format function only. `define`: declare and implement it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FormatMode {
    #[default]
    None,
    Declare,
    Define,
}

impl FormatMode {
    pub fn parse(union: &str, value: &str) -> Result<Self> {
        match value {
            "none" => Ok(Self::None),
            "declare" => Ok(Self::Declare),
            "define" => Ok(Self::Define),
            _ => Err(invalid_capability(union, "format", value)),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Declare => "declare",
            Self::Define => "define",
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EqualityMode {
    #[default]
    None,
    Define,
}

impl EqualityMode {
    pub fn parse(union: &str, value: &str) -> Result<Self> {
        match value {
            "none" => Ok(Self::None),
            "define" => Ok(Self::Define),
            _ => Err(invalid_capability(union, "equality", value)),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Define => "define",
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum HashMode {
    #[default]
    None,
    Define,
}

impl HashMode {
    pub fn parse(union: &str, value: &str) -> Result<Self> {
        match value {
            "none" => Ok(Self::None),
            "define" => Ok(Self::Define),
            _ => Err(invalid_capability(union, "hash", value)),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Define => "define",
        }
    }
}

/// `member`: variant docs document the member types. `tag`: the tag carries the docs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DocMode {
    #[default]
    Member,
    Tag,
}

impl DocMode {
    pub fn parse(union: &str, value: &str) -> Result<Self> {
        match value {
            "member" => Ok(Self::Member),
            "tag" => Ok(Self::Tag),
            _ => Err(invalid_capability(union, "doc", value)),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Member => "member",
            Self::Tag => "tag",
        }
    }
}

fn invalid_capability(union: &str, capability: &'static str, value: &str) -> Error {
    Error::InvalidCapability {
        union: union.to_string(),
        capability,
        value: value.to_string(),
    }
}

/// What the rendering stage is asked to generate for a union.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Capabilities {
    pub storage: StorageMode,
    pub format: FormatMode,
    pub equality: EqualityMode,
    pub hash: HashMode,
    pub doc_mode: DocMode,
}

/// Generated identifiers of a variant. Derived from the variant name,
/// each one can be overridden.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VariantNames {
    pub argument: String,
    pub accessor: String,
    pub factory: String,
    pub field: String,
    pub visit: String,
}

impl VariantNames {
    pub fn derive(variant: &str) -> Self {
        let snake = to_snake_case(variant);
        Self {
            argument: avoid_keyword(&snake),
            accessor: format!("as_{snake}"),
            factory: format!("make_{snake}"),
            field: format!("{snake}_"),
            visit: format!("visit_{snake}"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum VariantKind {
    /// A case with its own members (possibly none).
    Struct { members: Vec<Member> },
    /// A case wrapping an existing type verbatim.
    Alias { target: String, pass_as: PassAs },
}

/// One case of a union.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Variant {
    pub name: String,
    pub kind: VariantKind,
    pub doc: Option<String>,
    pub names: VariantNames,
}

impl Variant {
    pub fn structure(name: impl Into<String>, members: impl IntoIterator<Item = Member>) -> Self {
        Self::new(
            name.into(),
            VariantKind::Struct {
                members: members.into_iter().collect(),
            },
        )
    }

    /// A struct variant without members.
    pub fn unit(name: impl Into<String>) -> Self {
        Self::new(name.into(), VariantKind::Struct { members: Vec::new() })
    }

    pub fn alias(name: impl Into<String>, target: impl Into<String>) -> Self {
        Self::new(
            name.into(),
            VariantKind::Alias {
                target: target.into(),
                pass_as: PassAs::Copy,
            },
        )
    }

    fn new(name: String, kind: VariantKind) -> Self {
        let names = VariantNames::derive(&name);
        Self {
            name,
            kind,
            doc: None,
            names,
        }
    }

    pub fn doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    /// Passing convention of an alias variant. No effect on struct variants.
    pub fn pass_as(mut self, value: PassAs) -> Self {
        if let VariantKind::Alias { pass_as, .. } = &mut self.kind {
            *pass_as = value;
        }
        self
    }

    pub fn argument_name(mut self, name: impl Into<String>) -> Self {
        self.names.argument = name.into();
        self
    }

    pub fn accessor_name(mut self, name: impl Into<String>) -> Self {
        self.names.accessor = name.into();
        self
    }

    pub fn members(&self) -> &[Member] {
        match &self.kind {
            VariantKind::Struct { members } => members,
            VariantKind::Alias { .. } => &[],
        }
    }
}

/// A named sum type: tag, ordered variants and requested capabilities.
///
/// Variant order is the exhaustive case list the renderer follows.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnionSchema {
    pub name: String,
    pub tag: Tag,
    pub doc: Option<String>,
    pub variants: Vec<Variant>,
    pub capabilities: Capabilities,
    pub is_final: bool,
}

impl UnionSchema {
    pub fn new(name: impl Into<String>, tag: Tag) -> Self {
        Self {
            name: name.into(),
            tag,
            doc: None,
            variants: Vec::new(),
            capabilities: Capabilities::default(),
            is_final: true,
        }
    }

    pub fn doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    pub fn variant(mut self, variant: Variant) -> Self {
        self.variants.push(variant);
        self
    }

    pub fn variants(mut self, variants: impl IntoIterator<Item = Variant>) -> Self {
        self.variants.extend(variants);
        self
    }

    pub fn storage(mut self, mode: StorageMode) -> Self {
        self.capabilities.storage = mode;
        self
    }

    pub fn format(mut self, mode: FormatMode) -> Self {
        self.capabilities.format = mode;
        self
    }

    pub fn equality(mut self, mode: EqualityMode) -> Self {
        self.capabilities.equality = mode;
        self
    }

    pub fn hash(mut self, mode: HashMode) -> Self {
        self.capabilities.hash = mode;
        self
    }

    pub fn doc_mode(mut self, mode: DocMode) -> Self {
        self.capabilities.doc_mode = mode;
        self
    }

    pub fn non_final(mut self) -> Self {
        self.is_final = false;
        self
    }

    pub fn variant_named(&self, name: &str) -> Option<&Variant> {
        self.variants.iter().find(|v| v.name == name)
    }
}
