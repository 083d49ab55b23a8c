//! Linker configuration: match weights, ambiguity policy, pass toggles.

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_CASE_INSENSITIVE_WEIGHT, DEFAULT_EXACT_WEIGHT, DEFAULT_SUBSTRING_WEIGHT,
};

/// How a loose (case-insensitive or substring) match with several qualifying
/// candidates is resolved. Exact matches are never ambiguous: the first
/// equal candidate wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AmbiguityPolicy {
    /// First qualifying candidate in collection order.
    #[default]
    FirstMatch,
    /// Candidate whose name is covered most by the key; ties by order.
    TightestMatch,
    /// No edge when more than one candidate qualifies.
    Reject,
}

impl AmbiguityPolicy {
    pub fn name(&self) -> &'static str {
        match self {
            Self::FirstMatch => "first_match",
            Self::TightestMatch => "tightest_match",
            Self::Reject => "reject",
        }
    }

    /// Parse a policy name as written in config or `NAVGRAPH_LINKER_AMBIGUITY`.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "first_match" | "first" => Some(Self::FirstMatch),
            "tightest_match" | "tightest" => Some(Self::TightestMatch),
            "reject" => Some(Self::Reject),
            _ => None,
        }
    }
}

/// Edge weights per match kind. Each must lie in `[0.0, 1.0]`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchWeights {
    /// Case-sensitive full equality. Default: 1.0.
    pub exact: Option<f64>,
    /// Case-insensitive full equality. Default: 0.8.
    pub case_insensitive: Option<f64>,
    /// Case-insensitive containment (view resolution only). Default: 0.6.
    pub substring: Option<f64>,
}

impl MatchWeights {
    pub fn effective_exact(&self) -> f64 {
        self.exact.unwrap_or(DEFAULT_EXACT_WEIGHT)
    }

    pub fn effective_case_insensitive(&self) -> f64 {
        self.case_insensitive.unwrap_or(DEFAULT_CASE_INSENSITIVE_WEIGHT)
    }

    pub fn effective_substring(&self) -> f64 {
        self.substring.unwrap_or(DEFAULT_SUBSTRING_WEIGHT)
    }
}

/// Configuration for the cross-artifact linker.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LinkerConfig {
    /// Per-match-kind edge weights.
    pub weights: MatchWeights,
    /// Resolution of ambiguous loose matches. Default: first_match.
    pub ambiguity: Option<AmbiguityPolicy>,
    /// Re-link every screen after the menu pass. Default: true.
    pub fallback_pass: Option<bool>,
    /// Allow substring containment for view resolution. Default: true.
    pub substring_views: Option<bool>,
    /// Drop aggregated edges whose endpoints are unknown. Default: true.
    pub prune_dangling: Option<bool>,
}

impl LinkerConfig {
    pub fn effective_ambiguity(&self) -> AmbiguityPolicy {
        self.ambiguity.unwrap_or_default()
    }

    pub fn effective_fallback_pass(&self) -> bool {
        self.fallback_pass.unwrap_or(true)
    }

    pub fn effective_substring_views(&self) -> bool {
        self.substring_views.unwrap_or(true)
    }

    pub fn effective_prune_dangling(&self) -> bool {
        self.prune_dangling.unwrap_or(true)
    }
}
