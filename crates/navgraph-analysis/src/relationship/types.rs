//! Relationship types, match kinds, and the dedup key.

use chrono::{DateTime, Utc};
use navgraph_core::config::MatchWeights;
use serde::{Deserialize, Serialize};

use crate::entities::Properties;

/// Relationship type vocabulary for the navigation linker family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RelationshipType {
    MenuOpensScreen,
    MenuOpensFlow,
    ScreenCallsAction,
    ScreenRendersJsp,
}

impl RelationshipType {
    pub fn name(&self) -> &'static str {
        match self {
            Self::MenuOpensScreen => "MENU_OPENS_SCREEN",
            Self::MenuOpensFlow => "MENU_OPENS_FLOW",
            Self::ScreenCallsAction => "SCREEN_CALLS_ACTION",
            Self::ScreenRendersJsp => "SCREEN_RENDERS_JSP",
        }
    }

    pub fn all() -> &'static [RelationshipType] {
        &[
            Self::MenuOpensScreen,
            Self::MenuOpensFlow,
            Self::ScreenCallsAction,
            Self::ScreenRendersJsp,
        ]
    }
}

impl std::fmt::Display for RelationshipType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// How a reference was matched to its target.
/// Ordered by decreasing confidence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchKind {
    /// Case-sensitive full equality.
    Exact,
    /// Case-insensitive full equality.
    CaseInsensitive,
    /// Case-insensitive containment of the view key's base name.
    Substring,
}

impl MatchKind {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Exact => "exact",
            Self::CaseInsensitive => "case_insensitive",
            Self::Substring => "substring",
        }
    }

    /// Edge weight for this match kind under the configured weights.
    pub fn weight(&self, weights: &MatchWeights) -> f64 {
        match self {
            Self::Exact => weights.effective_exact(),
            Self::CaseInsensitive => weights.effective_case_insensitive(),
            Self::Substring => weights.effective_substring(),
        }
    }

    /// Parse the name stored in relationship properties.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "exact" => Some(Self::Exact),
            "case_insensitive" => Some(Self::CaseInsensitive),
            "substring" => Some(Self::Substring),
            _ => None,
        }
    }
}

impl std::fmt::Display for MatchKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A typed, directed, weighted edge between two entities.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Relationship {
    /// Unique within the run that created it.
    pub id: String,
    /// Deterministic from (type, source, target); the persistence MERGE key.
    pub entity_id: String,
    #[serde(rename = "type")]
    pub relationship_type: RelationshipType,
    pub source_id: String,
    pub target_id: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub properties: Properties,
    pub weight: f64,
}

impl Relationship {
    pub fn key(&self) -> RelationshipKey {
        RelationshipKey {
            relationship_type: self.relationship_type,
            source_id: self.source_id.clone(),
            target_id: self.target_id.clone(),
        }
    }

    /// Match kind recorded in properties, if any.
    pub fn match_kind(&self) -> Option<MatchKind> {
        self.properties
            .get("matchKind")
            .and_then(|v| v.as_str())
            .and_then(MatchKind::parse)
    }
}

/// Dedup key: at most one relationship per (type, source, target).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RelationshipKey {
    pub relationship_type: RelationshipType,
    pub source_id: String,
    pub target_id: String,
}

impl RelationshipKey {
    pub fn new(relationship_type: RelationshipType, source_id: &str, target_id: &str) -> Self {
        Self {
            relationship_type,
            source_id: source_id.to_string(),
            target_id: target_id.to_string(),
        }
    }
}

impl std::fmt::Display for RelationshipKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} -> {}", self.relationship_type, self.source_id, self.target_id)
    }
}
