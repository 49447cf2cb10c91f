//! Bytecode instruction lists and their lowering into union variants.
//!
//! An instruction is declared once, with typed operands. Lowering turns it
//! into a struct variant whose members carry the rendered operand types and
//! whose doc lists the operands with their encoding:
//!
//! ```text
//! Load `tuple.index` into target.
//!
//! Arguments:
//!   - tuple (local, u32)
//!   - index (constant, u32)
//!   - target (local, u32)
//! ```

use nodegen_core::utils::avoid_keyword;

use crate::model::{Member, Tag, UnionSchema, Variant};

/// What an operand refers to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ParamKind {
    /// A local register, by index.
    Local,
    /// A function parameter, by index.
    Param,
    /// A module member, by index.
    Module,
    /// An absolute byte offset in the function.
    Offset,
    /// An inline integer constant of the given type.
    Integer { int_type: String },
    /// An inline floating point constant.
    Float,
}

impl ParamKind {
    /// Type of the generated member.
    pub fn rendered_type(&self) -> &str {
        match self {
            Self::Local => "BytecodeRegister",
            Self::Param => "BytecodeParam",
            Self::Module => "BytecodeMemberID",
            Self::Offset => "BytecodeOffset",
            Self::Integer { int_type } => int_type,
            Self::Float => "f64",
        }
    }

    /// Type of the operand in the encoded instruction stream.
    pub fn raw_type(&self) -> &str {
        match self {
            Self::Local | Self::Param | Self::Module | Self::Offset => "u32",
            Self::Integer { int_type } => int_type,
            Self::Float => "f64",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Local => "local",
            Self::Param => "param",
            Self::Module => "module",
            Self::Offset => "offset",
            Self::Integer { .. } | Self::Float => "constant",
        }
    }
}

/// One operand of an instruction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Param {
    pub name: String,
    pub kind: ParamKind,
    pub doc: Option<String>,
}

impl Param {
    fn new(name: impl Into<String>, kind: ParamKind) -> Self {
        Self {
            name: name.into(),
            kind,
            doc: None,
        }
    }

    pub fn local(name: impl Into<String>) -> Self {
        Self::new(name, ParamKind::Local)
    }

    pub fn param(name: impl Into<String>) -> Self {
        Self::new(name, ParamKind::Param)
    }

    pub fn module(name: impl Into<String>) -> Self {
        Self::new(name, ParamKind::Module)
    }

    pub fn offset(name: impl Into<String>) -> Self {
        Self::new(name, ParamKind::Offset)
    }

    pub fn integer(name: impl Into<String>, int_type: impl Into<String>) -> Self {
        Self::new(
            name,
            ParamKind::Integer {
                int_type: int_type.into(),
            },
        )
    }

    pub fn float(name: impl Into<String>) -> Self {
        Self::new(name, ParamKind::Float)
    }

    pub fn doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }
}

/// A bytecode instruction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Instr {
    pub name: String,
    pub params: Vec<Param>,
    pub doc: String,
}

impl Instr {
    pub fn new(name: impl Into<String>, doc: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            params: Vec::new(),
            doc: doc.into(),
        }
    }

    pub fn params(mut self, params: impl IntoIterator<Item = Param>) -> Self {
        self.params.extend(params);
        self
    }

    /// Instruction doc followed by the operand listing, if there are operands.
    pub fn full_doc(&self) -> String {
        let mut doc = self.doc.clone();
        if self.params.is_empty() {
            return doc;
        }

        doc.push_str("\n\nArguments:");
        for param in &self.params {
            doc.push_str(&format!(
                "\n  - {} ({}, {})",
                param.name,
                param.kind.description(),
                param.kind.raw_type()
            ));
        }
        doc
    }

    /// The struct variant representing this instruction.
    pub fn to_variant(&self) -> Variant {
        let members = self.params.iter().map(|param| {
            let member = Member::data(avoid_keyword(&param.name), param.kind.rendered_type());
            match &param.doc {
                Some(doc) => member.doc(doc.clone()),
                None => member,
            }
        });
        Variant::structure(self.name.clone(), members).doc(self.full_doc())
    }
}

/// Lower an instruction list into a union with one variant per instruction.
pub fn lower_instructions<'a>(
    name: impl Into<String>,
    tag: Tag,
    instrs: impl IntoIterator<Item = &'a Instr>,
) -> UnionSchema {
    UnionSchema::new(name, tag).variants(instrs.into_iter().map(Instr::to_variant))
}

#[cfg(test)]
#[path = "instr_tests.rs"]
mod instr_tests;
