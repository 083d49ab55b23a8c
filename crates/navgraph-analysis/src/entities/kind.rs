//! Entity kinds and their ID prefixes.

use serde::{Deserialize, Serialize};

/// The artifact kinds this layer links.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    MenuItem,
    Screen,
    WebFlowDefinition,
    JspPage,
    ClassNode,
}

impl EntityKind {
    /// Prefix used in entity IDs (`<prefix>:<hash>`).
    pub fn prefix(&self) -> &'static str {
        match self {
            Self::MenuItem => "menu",
            Self::Screen => "screen",
            Self::WebFlowDefinition => "flow",
            Self::JspPage => "jsp",
            Self::ClassNode => "class",
        }
    }

    /// Graph label used by the persistence layer.
    pub fn label(&self) -> &'static str {
        match self {
            Self::MenuItem => "MenuItem",
            Self::Screen => "Screen",
            Self::WebFlowDefinition => "WebFlowDefinition",
            Self::JspPage => "JSPPage",
            Self::ClassNode => "ClassNode",
        }
    }

    pub fn all() -> &'static [EntityKind] {
        &[
            Self::MenuItem,
            Self::Screen,
            Self::WebFlowDefinition,
            Self::JspPage,
            Self::ClassNode,
        ]
    }
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
