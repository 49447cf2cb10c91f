//! Members (fields) of node types and union struct variants.

use super::TypeRef;
use crate::{Error, Result};

/// How a generated constructor receives a value.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PassAs {
    #[default]
    Copy,
    Move,
}

impl PassAs {
    pub fn parse(owner: &str, value: &str) -> Result<Self> {
        match value {
            "copy" => Ok(Self::Copy),
            "move" => Ok(Self::Move),
            _ => Err(Error::InvalidPassAs {
                owner: owner.to_string(),
                value: value.to_string(),
            }),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Copy => "copy",
            Self::Move => "move",
        }
    }
}

/// What a member holds.
///
/// `Node` and `NodeList` exclusively own their children, so the generated
/// structures always form a tree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MemberKind {
    /// Opaque scalar of a named data type.
    Data { data_type: String, simple: bool },
    /// Ordered sequence of a scalar type.
    DataList { element_type: String },
    /// One owned child node.
    Node { node_type: TypeRef },
    /// Ordered sequence of owned child nodes.
    NodeList { element_type: TypeRef },
}

impl MemberKind {
    pub fn is_list(&self) -> bool {
        matches!(self, Self::DataList { .. } | Self::NodeList { .. })
    }

    pub fn is_child(&self) -> bool {
        matches!(self, Self::Node { .. } | Self::NodeList { .. })
    }

    /// Referenced node type of child members.
    pub fn node_target(&self) -> Option<&TypeRef> {
        match self {
            Self::Node { node_type } => Some(node_type),
            Self::NodeList { element_type } => Some(element_type),
            Self::Data { .. } | Self::DataList { .. } => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Data { .. } => "data",
            Self::DataList { .. } => "data_list",
            Self::Node { .. } => "node",
            Self::NodeList { .. } => "node_list",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Member {
    pub name: String,
    pub kind: MemberKind,
    pub required: bool,
    pub pass_as: PassAs,
    pub doc: Option<String>,
}

impl Member {
    fn new(name: impl Into<String>, kind: MemberKind) -> Self {
        Self {
            name: name.into(),
            kind,
            required: true,
            pass_as: PassAs::default(),
            doc: None,
        }
    }

    pub fn data(name: impl Into<String>, data_type: impl Into<String>) -> Self {
        Self::new(
            name,
            MemberKind::Data {
                data_type: data_type.into(),
                simple: false,
            },
        )
    }

    /// Scalar member of a trivially copyable type.
    pub fn simple(name: impl Into<String>, data_type: impl Into<String>) -> Self {
        Self::new(
            name,
            MemberKind::Data {
                data_type: data_type.into(),
                simple: true,
            },
        )
    }

    pub fn data_list(name: impl Into<String>, element_type: impl Into<String>) -> Self {
        Self::new(
            name,
            MemberKind::DataList {
                element_type: element_type.into(),
            },
        )
    }

    pub fn node(name: impl Into<String>, node_type: impl Into<TypeRef>) -> Self {
        Self::new(
            name,
            MemberKind::Node {
                node_type: node_type.into(),
            },
        )
    }

    pub fn node_list(name: impl Into<String>, element_type: impl Into<TypeRef>) -> Self {
        Self::new(
            name,
            MemberKind::NodeList {
                element_type: element_type.into(),
            },
        )
    }

    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    pub fn pass_as(mut self, pass_as: PassAs) -> Self {
        self.pass_as = pass_as;
        self
    }

    pub fn doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    /// Whether the member must be present. Lists never are: an empty list
    /// is always a valid value.
    pub fn is_required(&self) -> bool {
        self.required && !self.kind.is_list()
    }

    pub fn field_name(&self) -> String {
        format!("{}_", self.name)
    }
}
