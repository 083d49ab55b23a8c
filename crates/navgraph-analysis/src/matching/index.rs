//! NameIndex: tiered name lookup over one candidate collection.

use navgraph_core::config::AmbiguityPolicy;
use navgraph_core::types::FxHashMap;

use crate::relationship::MatchKind;

use super::text::view_stem;

/// A resolved candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NameMatch {
    /// Position of the winner in the candidate collection.
    pub index: usize,
    pub kind: MatchKind,
    /// How many candidates qualified in the winning tier.
    pub candidates: usize,
}

impl NameMatch {
    pub fn is_ambiguous(&self) -> bool {
        self.candidates > 1
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchOutcome {
    Matched(NameMatch),
    /// Several loose candidates qualified and the policy rejected them all.
    Ambiguous { kind: MatchKind, candidates: usize },
    Unmatched,
}

impl MatchOutcome {
    pub fn matched(&self) -> Option<NameMatch> {
        match self {
            Self::Matched(m) => Some(*m),
            _ => None,
        }
    }
}

/// Precomputed exact and case-folded lookups over candidate names, kept in
/// collection order.
#[derive(Debug, Default)]
pub struct NameIndex<'a> {
    names: Vec<&'a str>,
    lowered: Vec<String>,
    exact: FxHashMap<&'a str, usize>,
    folded: FxHashMap<String, Vec<usize>>,
}

impl<'a> NameIndex<'a> {
    pub fn build<I>(names: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut index = Self::default();
        for (i, name) in names.into_iter().enumerate() {
            let lower = name.to_lowercase();
            index.exact.entry(name).or_insert(i);
            index.folded.entry(lower.clone()).or_default().push(i);
            index.names.push(name);
            index.lowered.push(lower);
        }
        index
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn name(&self, index: usize) -> Option<&'a str> {
        self.names.get(index).copied()
    }

    /// Exact, then case-insensitive equality.
    pub fn resolve_name(&self, key: &str, policy: AmbiguityPolicy) -> MatchOutcome {
        let key = key.trim();
        if key.is_empty() {
            return MatchOutcome::Unmatched;
        }
        self.exact_or_folded(key, policy)
            .unwrap_or(MatchOutcome::Unmatched)
    }

    /// Exact, then case-insensitive equality, then (when allowed) containment
    /// of the key, extension stripped, in the candidate name.
    pub fn resolve_view(
        &self,
        key: &str,
        policy: AmbiguityPolicy,
        allow_substring: bool,
    ) -> MatchOutcome {
        let key = key.trim();
        if key.is_empty() {
            return MatchOutcome::Unmatched;
        }
        if let Some(outcome) = self.exact_or_folded(key, policy) {
            return outcome;
        }
        if !allow_substring {
            return MatchOutcome::Unmatched;
        }

        let stem = view_stem(key).to_lowercase();
        if stem.is_empty() {
            return MatchOutcome::Unmatched;
        }
        let candidates: Vec<usize> = self
            .lowered
            .iter()
            .enumerate()
            .filter(|(_, name)| name.contains(stem.as_str()))
            .map(|(i, _)| i)
            .collect();
        self.apply_policy(&candidates, MatchKind::Substring, policy)
    }

    fn exact_or_folded(&self, key: &str, policy: AmbiguityPolicy) -> Option<MatchOutcome> {
        if let Some(&index) = self.exact.get(key) {
            return Some(MatchOutcome::Matched(NameMatch {
                index,
                kind: MatchKind::Exact,
                candidates: 1,
            }));
        }
        self.folded
            .get(&key.to_lowercase())
            .map(|candidates| self.apply_policy(candidates, MatchKind::CaseInsensitive, policy))
    }

    fn apply_policy(
        &self,
        candidates: &[usize],
        kind: MatchKind,
        policy: AmbiguityPolicy,
    ) -> MatchOutcome {
        let count = candidates.len();
        let winner = match (count, policy) {
            (0, _) => return MatchOutcome::Unmatched,
            (1, _) | (_, AmbiguityPolicy::FirstMatch) => candidates[0],
            (_, AmbiguityPolicy::Reject) => {
                return MatchOutcome::Ambiguous {
                    kind,
                    candidates: count,
                }
            }
            // The key is fixed, so the highest key/candidate length ratio is
            // the shortest candidate; min_by_key keeps the earliest on ties.
            (_, AmbiguityPolicy::TightestMatch) => match candidates
                .iter()
                .copied()
                .min_by_key(|&i| self.names[i].chars().count())
            {
                Some(i) => i,
                None => return MatchOutcome::Unmatched,
            },
        };
        MatchOutcome::Matched(NameMatch {
            index: winner,
            kind,
            candidates: count,
        })
    }
}
