//! The end-to-end pipeline: declarations in, resolved model out.

use log::debug;

use crate::config::Config;
use crate::hierarchy::{
    ConcreteType, Hierarchy, PublicType, SlotType, TagTable, allocate_tags, collect_slot_types,
    concrete_types, public_types,
};
use crate::load::load_schema;
use crate::model::{TypeDef, UnionSchema};
use crate::registry::Registry;
use crate::unions::UnionSet;
use crate::Result;

/// Declarations of one schema generation.
#[derive(Clone, Debug, Default)]
pub struct Schema {
    pub types: Vec<TypeDef>,
    pub unions: Vec<UnionSchema>,
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse and load a JSON schema document.
    pub fn from_json(json: &str) -> Result<Self> {
        let raw = nodegen_core::parse_schema(json)?;
        load_schema(raw)
    }

    pub fn types(mut self, types: impl IntoIterator<Item = TypeDef>) -> Self {
        self.types.extend(types);
        self
    }

    pub fn unions(mut self, unions: impl IntoIterator<Item = UnionSchema>) -> Self {
        self.unions.extend(unions);
        self
    }
}

/// Hierarchy outputs, present when the schema declares node types.
#[derive(Debug)]
struct HierarchyModel {
    hierarchy: Hierarchy,
    tags: TagTable,
    slots: Vec<SlotType>,
    public: Vec<PublicType>,
}

/// A fully resolved and validated schema. Read-only.
#[derive(Debug)]
pub struct CompiledModel {
    registry: Registry,
    hierarchy: Option<HierarchyModel>,
    unions: UnionSet,
    config: Config,
}

impl CompiledModel {
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn hierarchy(&self) -> Option<&Hierarchy> {
        self.hierarchy.as_ref().map(|h| &h.hierarchy)
    }

    pub fn tags(&self) -> Option<&TagTable> {
        self.hierarchy.as_ref().map(|h| &h.tags)
    }

    /// Slot types sorted by rendered name. Empty without a hierarchy.
    pub fn slot_types(&self) -> &[SlotType] {
        self.hierarchy
            .as_ref()
            .map(|h| h.slots.as_slice())
            .unwrap_or_default()
    }

    /// Public types sorted by public name. Empty without a hierarchy.
    pub fn public_types(&self) -> &[PublicType] {
        self.hierarchy
            .as_ref()
            .map(|h| h.public.as_slice())
            .unwrap_or_default()
    }

    /// Concrete types sorted by name, with their tags.
    pub fn concrete_types(&self) -> Vec<ConcreteType> {
        match &self.hierarchy {
            Some(h) => concrete_types(&self.registry, &h.hierarchy, &h.tags),
            None => Vec::new(),
        }
    }

    pub fn unions(&self) -> &UnionSet {
        &self.unions
    }

    pub fn config(&self) -> &Config {
        &self.config
    }
}

/// Resolve and validate `schema`.
///
/// Stops at the first error. The hierarchy stage runs only when the schema
/// declares node types; it starts at the configured root.
pub fn compile(schema: Schema, config: &Config) -> Result<CompiledModel> {
    debug!(
        "compiling schema: {} types, {} unions",
        schema.types.len(),
        schema.unions.len()
    );

    let mut registry = Registry::new();
    registry.register_all(schema.types)?;
    registry.finish()?;

    let hierarchy = if registry.is_empty() {
        None
    } else {
        let hierarchy = Hierarchy::build(&registry, &config.root)?;
        let tags = allocate_tags(&registry, &hierarchy, config.tag_start, config.tag_width)?;
        let slots = collect_slot_types(&registry, &hierarchy, config)?;
        let public = public_types(&registry, &hierarchy);
        Some(HierarchyModel {
            hierarchy,
            tags,
            slots,
            public,
        })
    };

    let mut unions = UnionSet::new();
    unions.insert_all(schema.unions)?;

    Ok(CompiledModel {
        registry,
        hierarchy,
        unions,
        config: config.clone(),
    })
}

#[cfg(test)]
#[path = "compile_tests.rs"]
mod compile_tests;
