//! Per-pass linking diagnostics.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::relationship::{MatchKind, RelationshipType};

/// One resolution step of the navigation chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Hop {
    MenuScreen,
    MenuFlow,
    ScreenAction,
    ScreenView,
}

impl Hop {
    pub fn name(&self) -> &'static str {
        match self {
            Self::MenuScreen => "menu_screen",
            Self::MenuFlow => "menu_flow",
            Self::ScreenAction => "screen_action",
            Self::ScreenView => "screen_view",
        }
    }
}

/// Counters collected during one integrator pass.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LinkDiagnostics {
    pub by_type: BTreeMap<RelationshipType, usize>,
    pub by_match_kind: BTreeMap<MatchKind, usize>,
    /// Declared references that matched nothing, per hop.
    pub unresolved: BTreeMap<Hop, usize>,
    /// Menu items skipped for lack of a flow id.
    pub skipped_menus: usize,
    /// Loose matches where more than one candidate qualified.
    pub ambiguous_matches: usize,
    /// Ambiguous matches dropped under the reject policy.
    pub rejected_ambiguous: usize,
    /// Screens whose edges came only from the fallback pass.
    pub fallback_only_screens: usize,
    /// Emissions skipped because the same (type, source, target) already existed.
    pub duplicate_emissions_suppressed: usize,
}

impl LinkDiagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_emitted(&mut self, relationship_type: RelationshipType, match_kind: MatchKind) {
        *self.by_type.entry(relationship_type).or_default() += 1;
        *self.by_match_kind.entry(match_kind).or_default() += 1;
    }

    pub fn record_unresolved(&mut self, hop: Hop) {
        *self.unresolved.entry(hop).or_default() += 1;
    }

    pub fn total_emitted(&self) -> usize {
        self.by_type.values().sum()
    }

    pub fn total_unresolved(&self) -> usize {
        self.unresolved.values().sum()
    }

    pub fn emitted(&self, relationship_type: RelationshipType) -> usize {
        self.by_type.get(&relationship_type).copied().unwrap_or(0)
    }

    pub fn unresolved_at(&self, hop: Hop) -> usize {
        self.unresolved.get(&hop).copied().unwrap_or(0)
    }

    /// Fraction of attempted references that resolved.
    pub fn resolution_rate(&self) -> f64 {
        let attempted = self.total_emitted()
            + self.total_unresolved()
            + self.rejected_ambiguous
            + self.duplicate_emissions_suppressed;
        if attempted == 0 {
            return 0.0;
        }
        (self.total_emitted() + self.duplicate_emissions_suppressed) as f64 / attempted as f64
    }

    /// Fold another pass's counters into this one.
    pub fn merge(&mut self, other: &LinkDiagnostics) {
        for (t, n) in &other.by_type {
            *self.by_type.entry(*t).or_default() += n;
        }
        for (k, n) in &other.by_match_kind {
            *self.by_match_kind.entry(*k).or_default() += n;
        }
        for (h, n) in &other.unresolved {
            *self.unresolved.entry(*h).or_default() += n;
        }
        self.skipped_menus += other.skipped_menus;
        self.ambiguous_matches += other.ambiguous_matches;
        self.rejected_ambiguous += other.rejected_ambiguous;
        self.fallback_only_screens += other.fallback_only_screens;
        self.duplicate_emissions_suppressed += other.duplicate_emissions_suppressed;
    }
}
