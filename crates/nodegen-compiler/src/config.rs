//! Configuration for schema compilation.

use nodegen_core::Colors;

use crate::model::IntWidth;

/// Configuration for hierarchy processing and dump output.
#[derive(Clone, Debug)]
pub struct Config {
    /// Name of the hierarchy root type
    pub(crate) root: String,
    /// First value handed out by the tag allocator
    pub(crate) tag_start: u64,
    /// Width every allocated tag value must fit in
    pub(crate) tag_width: IntWidth,
    /// Prefix prepended to type names for rendered names
    pub(crate) node_prefix: String,
    /// Wrapper used for rendered single-child slot types
    pub(crate) single_slot: String,
    /// Wrapper used for rendered child-list slot types
    pub(crate) list_slot: String,
    /// Color configuration for dump output
    pub(crate) colors: Colors,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            root: "Node".to_string(),
            tag_start: 1,
            tag_width: IntWidth::U32,
            node_prefix: String::new(),
            single_slot: "NodePtr".to_string(),
            list_slot: "NodeList".to_string(),
            colors: Colors::OFF,
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the hierarchy root type.
    pub fn root(mut self, name: impl Into<String>) -> Self {
        self.root = name.into();
        self
    }

    /// Set the first allocated tag value.
    pub fn tag_start(mut self, value: u64) -> Self {
        self.tag_start = value;
        self
    }

    /// Set the integer width allocated tags must fit in.
    pub fn tag_width(mut self, width: IntWidth) -> Self {
        self.tag_width = width;
        self
    }

    /// Set the prefix for rendered type names (e.g. `Ast`).
    pub fn node_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.node_prefix = prefix.into();
        self
    }

    /// Set the wrappers for rendered slot types, e.g. `AstPtr` and `AstNodeList`.
    pub fn slot_wrappers(mut self, single: impl Into<String>, list: impl Into<String>) -> Self {
        self.single_slot = single.into();
        self.list_slot = list.into();
        self
    }

    /// Set whether to use colored dump output.
    pub fn colored(mut self, enabled: bool) -> Self {
        self.colors = Colors::new(enabled);
        self
    }

    pub fn root_name(&self) -> &str {
        &self.root
    }

    pub fn colors(&self) -> Colors {
        self.colors
    }
}
