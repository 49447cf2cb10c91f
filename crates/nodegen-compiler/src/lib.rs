//! nodegen compiler: schema resolution and tag range allocation.
//!
//! This crate turns declarations of node type hierarchies and tagged unions
//! into a validated, fully resolved model for a rendering stage:
//! - `model` - type, member, variant and union declarations
//! - `registry` - name registry, reference resolution, inheritance checks
//! - `hierarchy` - resolved type tree, tag ranges, slot types, public types
//! - `unions` - union capability validation and the union set
//! - `instr` - lowering of bytecode instruction lists into unions
//! - `load` - conversion of JSON schema documents into the model
//! - `compile` - the end-to-end pipeline
//! - `dump` - human-readable listing of a compiled model
//! - `catalog` - bundled worked schemas

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod catalog;
pub mod compile;
pub mod config;
pub mod dump;
pub mod hierarchy;
pub mod instr;
pub mod load;
pub mod model;
pub mod registry;
pub mod unions;

#[cfg(test)]
pub mod test_utils;

pub use compile::{CompiledModel, Schema, compile};
pub use config::Config;
pub use dump::dump;
pub use hierarchy::{
    Hierarchy, HierarchyNode, PublicType, SlotKind, SlotType, TagEntry, TagRange, TagTable,
};
pub use model::{
    Capabilities, DocMode, EqualityMode, FormatMode, HashMode, IntWidth, Member, MemberKind,
    PassAs, StorageMode, Tag, TypeDef, TypeId, TypeRef, UnionSchema, Variant, VariantKind,
    VariantNames, WalkOrder,
};
pub use registry::Registry;
pub use unions::UnionSet;

/// Errors raised while resolving or validating a schema.
///
/// Every error is a schema authoring defect: processing stops at the first
/// one and no partial model is produced.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("duplicate {namespace} name `{name}`")]
    DuplicateName {
        namespace: &'static str,
        name: String,
    },

    #[error("type `{name}` is not defined{}", referrer(.referenced_by))]
    UnknownType {
        name: String,
        referenced_by: Option<String>,
    },

    #[error("cannot derive `{derived}` from final type `{base}`")]
    FinalDerivation { base: String, derived: String },

    #[error("abstract type `{name}` has no derived types")]
    EmptyHierarchy { name: String },

    #[error("type registry is not finished (queried `{name}`)")]
    NotFinished { name: String },

    #[error("cannot register `{name}`: type registry is already finished")]
    RegistryFinished { name: String },

    #[error("inheritance cycle through type `{name}`")]
    InheritanceCycle { name: String },

    #[error("member `{member}` is declared twice in `{owner}`")]
    DuplicateMember { owner: String, member: String },

    #[error("invalid storage mode `{value}` for union `{union}` (expected trivial or movable)")]
    InvalidStorageMode { union: String, value: String },

    #[error("invalid {capability} mode `{value}` for union `{union}`")]
    InvalidCapability {
        union: String,
        capability: &'static str,
        value: String,
    },

    #[error("invalid walk order `{value}` for type `{name}`")]
    InvalidWalkOrder { name: String, value: String },

    #[error("invalid passing convention `{value}` in `{owner}` (expected copy or move)")]
    InvalidPassAs { owner: String, value: String },

    #[error("invalid underlying type `{value}` for tag `{tag}`")]
    InvalidTagWidth { tag: String, value: String },

    #[error("tag start value must be positive, got {value}")]
    InvalidTagStart { value: u64 },

    #[error("union `{union}` documents its tag but tag `{tag}` has no doc")]
    MissingDoc { union: String, tag: String },

    #[error("variant `{variant}` is declared twice in union `{union}`")]
    DuplicateVariant { union: String, variant: String },

    #[error("alias variant `{variant}` of union `{union}` wraps the union itself")]
    SelfReferentialAlias { union: String, variant: String },

    #[error("member `{member}` of `{union}::{variant}` is a node member; unions hold data only")]
    UnsupportedUnionMember {
        union: String,
        variant: String,
        member: String,
    },

    #[error("tag `{tag}` of union `{union}` already belongs to union `{owner}`")]
    TagAlreadyAttached {
        tag: String,
        union: String,
        owner: String,
    },

    #[error("tag value {value} for `{name}` does not fit in {width}")]
    TagOverflow {
        name: String,
        value: u64,
        width: IntWidth,
    },

    #[error("malformed schema document: {0}")]
    Parse(#[from] serde_json::Error),
}

fn referrer(referenced_by: &Option<String>) -> String {
    match referenced_by {
        Some(name) => format!(" (referenced by `{name}`)"),
        None => String::new(),
    }
}

/// Result type for schema operations.
pub type Result<T> = std::result::Result<T, Error>;
