#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Core data structures for nodegen schema documents.
//!
//! Two layers:
//! - **Document layer**: 1:1 mapping to the JSON schema format (`RawSchema`)
//! - **Shared utilities**: name interning, case conversion, terminal colors
//!
//! The document layer performs no validation beyond JSON shape. Capability
//! values and walk orders stay as strings here so the compiler can report
//! them with its own typed errors.

pub mod colors;
pub mod interner;
pub mod utils;

pub use colors::Colors;
pub use interner::{Interner, Symbol};

use serde::Deserialize;

// ============================================================================
// Document Layer
// ============================================================================

/// A complete schema document: a node type hierarchy and/or a set of unions.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawSchema {
    #[serde(default)]
    pub types: Vec<RawTypeDef>,
    #[serde(default)]
    pub unions: Vec<RawUnion>,
}

/// Raw node type declaration.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawTypeDef {
    pub name: String,
    /// Name of the base type. Forward references are allowed.
    pub base: Option<String>,
    #[serde(rename = "final", default = "default_true")]
    pub is_final: bool,
    /// Overrides the prefixed name used by the renderer.
    pub rendered_name: Option<String>,
    pub doc: Option<String>,
    #[serde(default)]
    pub members: Vec<RawMember>,
    pub walk_order: Option<String>,
    pub public: Option<RawPublic>,
}

/// `"public": true` exposes the type under its own name,
/// `"public": "Map"` under a custom one.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum RawPublic {
    Flag(bool),
    Name(String),
}

/// Member kind as spelled in documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RawMemberKind {
    Data,
    DataList,
    Node,
    NodeList,
}

/// Raw member declaration, shared by node types and union struct variants.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawMember {
    pub name: String,
    pub kind: RawMemberKind,
    /// Data type for scalar members, node type name for node members.
    #[serde(rename = "type")]
    pub type_name: String,
    #[serde(default = "default_true")]
    pub required: bool,
    #[serde(default)]
    pub simple: bool,
    pub pass_as: Option<String>,
    pub doc: Option<String>,
}

/// Raw tag declaration of a union.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawTag {
    pub name: String,
    /// Underlying integer type, e.g. `u8`.
    pub underlying: String,
    pub start: Option<u64>,
    pub doc: Option<String>,
}

/// Raw union declaration. Capability values are validated by the compiler.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawUnion {
    pub name: String,
    pub tag: RawTag,
    pub doc: Option<String>,
    #[serde(default)]
    pub variants: Vec<RawVariant>,
    pub storage: Option<String>,
    pub format: Option<String>,
    pub equality: Option<String>,
    pub hash: Option<String>,
    pub doc_mode: Option<String>,
    #[serde(rename = "final", default = "default_true")]
    pub is_final: bool,
}

/// Raw union variant.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RawVariant {
    Struct {
        name: String,
        #[serde(default)]
        members: Vec<RawMember>,
        doc: Option<String>,
        #[serde(flatten)]
        names: RawVariantNames,
    },
    Alias {
        name: String,
        target: String,
        pass_as: Option<String>,
        doc: Option<String>,
        #[serde(flatten)]
        names: RawVariantNames,
    },
}

/// Optional overrides of the identifiers derived from a variant name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RawVariantNames {
    pub argument_name: Option<String>,
    pub accessor_name: Option<String>,
}

impl RawVariant {
    pub fn name(&self) -> &str {
        match self {
            Self::Struct { name, .. } | Self::Alias { name, .. } => name,
        }
    }

    pub fn names(&self) -> &RawVariantNames {
        match self {
            Self::Struct { names, .. } | Self::Alias { names, .. } => names,
        }
    }
}

fn default_true() -> bool {
    true
}

/// Parse a JSON schema document.
pub fn parse_schema(json: &str) -> Result<RawSchema, serde_json::Error> {
    serde_json::from_str(json)
}

#[cfg(test)]
mod interner_tests;
