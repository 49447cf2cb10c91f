//! Bundled schemas of the compiler and VM.
//!
//! Each generation is resolved on its own; nothing is shared between them
//! except the pipeline. The AST, IR and VM value generations are JSON
//! documents, the bytecode generation is built from its instruction list.

pub mod bytecode;

use log::debug;

use crate::compile::{CompiledModel, Schema, compile};
use crate::config::Config;
use crate::Result;

const AST_SCHEMA: &str = include_str!("../../schemas/ast.json");
const IR_SCHEMA: &str = include_str!("../../schemas/ir.json");
const VALUES_SCHEMA: &str = include_str!("../../schemas/values.json");

/// A bundled schema generation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Generation {
    /// Syntax tree node hierarchy and token data.
    Ast,
    /// Mid-level IR unions.
    Ir,
    /// Bytecode instructions and module members.
    Bytecode,
    /// VM value hierarchy with public types.
    Values,
}

impl Generation {
    pub const ALL: [Generation; 4] = [Self::Ast, Self::Ir, Self::Bytecode, Self::Values];

    pub fn name(self) -> &'static str {
        match self {
            Self::Ast => "ast",
            Self::Ir => "ir",
            Self::Bytecode => "bytecode",
            Self::Values => "values",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|g| g.name() == name)
    }

    /// Declarations of this generation.
    pub fn schema(self) -> Result<Schema> {
        match self {
            Self::Ast => Schema::from_json(AST_SCHEMA),
            Self::Ir => Schema::from_json(IR_SCHEMA),
            Self::Values => Schema::from_json(VALUES_SCHEMA),
            Self::Bytecode => Ok(Schema::new()
                .unions([bytecode::instruction_union(), bytecode::member_union()])),
        }
    }

    /// Hierarchy settings the generation is rendered with.
    pub fn config(self) -> Config {
        match self {
            Self::Ast => Config::new()
                .node_prefix("Ast")
                .slot_wrappers("AstPtr", "AstNodeList"),
            Self::Values => Config::new().root("Value"),
            Self::Ir | Self::Bytecode => Config::new(),
        }
    }

    pub fn compile(self) -> Result<CompiledModel> {
        debug!("compiling bundled generation `{}`", self.name());
        compile(self.schema()?, &self.config())
    }
}
