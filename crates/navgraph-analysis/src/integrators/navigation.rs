//! NavigationLinker: Menu → Screen/Flow → Action class / JSP view.
//!
//! Primary pass: every menu item with a flow id resolves
//! 1. its view state to a screen (exact, on the (flow id, screen id) pair),
//! 2. independently, its flow id to a flow definition (flow id or name),
//!
//! and each screen reached in (1) is chained to its action class and views.
//! Fallback pass: every screen the primary pass did not chain is chained on
//! its own, so screens unreachable from any menu still get their edges.
//!
//! Unresolved references produce no edge, only a debug trace and an
//! `UnresolvedReference` event.

use std::time::Instant;

use navgraph_core::config::{AmbiguityPolicy, LinkerConfig};
use navgraph_core::events::{
    EventDispatcher, LinkCompleteEvent, LinkStartedEvent, RelationshipEmittedEvent,
    UnresolvedReferenceEvent,
};
use navgraph_core::types::{FxHashMap, FxHashSet};

use crate::entities::{EntityCollections, Screen};
use crate::matching::{MatchOutcome, NameIndex, NameMatch};
use crate::relationship::{
    LinkContext, LinkPass, MatchKind, Relationship, RelationshipBuilder, RelationshipKey,
    RelationshipType,
};

use super::diagnostics::{Hop, LinkDiagnostics};
use super::{Integrator, LinkOutput};

/// Links menu items, screens, flow definitions, JSP pages, and action classes.
#[derive(Debug, Clone, Default)]
pub struct NavigationLinker {
    config: LinkerConfig,
    events: EventDispatcher,
}

impl NavigationLinker {
    pub const NAME: &'static str = "navigation";

    pub fn new(config: LinkerConfig) -> Self {
        Self {
            config,
            events: EventDispatcher::new(),
        }
    }

    pub fn with_events(mut self, events: EventDispatcher) -> Self {
        self.events = events;
        self
    }

    pub fn config(&self) -> &LinkerConfig {
        &self.config
    }
}

impl Integrator for NavigationLinker {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn link(&self, input: &EntityCollections, ctx: &mut LinkContext) -> LinkOutput {
        let start = Instant::now();
        if !self.events.is_empty() {
            self.events.emit_link_started(&LinkStartedEvent {
                integrator: Self::NAME.to_string(),
                source_count: input.menu_items.len() + input.screens.len(),
                target_count: input.screens.len()
                    + input.flows.len()
                    + input.jsp_pages.len()
                    + input.classes.len(),
            });
        }

        let mut pass = Linking::new(self, input, ctx);
        pass.link_menus();
        if self.config.effective_fallback_pass() {
            pass.link_remaining_screens();
        }
        let output = pass.finish();

        let duration_ms = start.elapsed().as_millis() as u64;
        tracing::info!(
            integrator = Self::NAME,
            relationships = output.relationships.len(),
            unresolved = output.diagnostics.total_unresolved(),
            skipped_menus = output.diagnostics.skipped_menus,
            ambiguous = output.diagnostics.ambiguous_matches,
            duration_ms,
            "Link pass complete"
        );
        if !self.events.is_empty() {
            self.events.emit_link_complete(&LinkCompleteEvent {
                integrator: Self::NAME.to_string(),
                relationship_count: output.relationships.len(),
                unresolved_count: output.diagnostics.total_unresolved(),
                duration_ms,
            });
        }
        output
    }
}

/// State of one `link` call. Lookups are built once from the snapshot.
struct Linking<'a, 'c> {
    linker: &'a NavigationLinker,
    input: &'a EntityCollections,
    ctx: &'c mut LinkContext,
    builder: RelationshipBuilder,
    policy: AmbiguityPolicy,
    substring_views: bool,

    screens: FxHashMap<(&'a str, &'a str), usize>,
    flows: FxHashMap<&'a str, usize>,
    classes: NameIndex<'a>,
    classes_by_qualified: FxHashMap<&'a str, usize>,
    jsps: NameIndex<'a>,
    jsps_by_path: FxHashMap<&'a str, usize>,

    emitted: FxHashSet<RelationshipKey>,
    chained: FxHashSet<usize>,
    relationships: Vec<Relationship>,
    diagnostics: LinkDiagnostics,
}

impl<'a, 'c> Linking<'a, 'c> {
    fn new(
        linker: &'a NavigationLinker,
        input: &'a EntityCollections,
        ctx: &'c mut LinkContext,
    ) -> Self {
        let mut screens = FxHashMap::default();
        for (i, s) in input.screens.iter().enumerate() {
            screens
                .entry((s.flow_id.as_str(), s.screen_id.as_str()))
                .or_insert(i);
        }

        // Earliest flow whose id or name equals the key.
        let mut flows = FxHashMap::default();
        for (i, f) in input.flows.iter().enumerate() {
            flows.entry(f.flow_id.as_str()).or_insert(i);
            flows.entry(f.name.as_str()).or_insert(i);
        }

        let mut classes_by_qualified = FxHashMap::default();
        for (i, c) in input.classes.iter().enumerate() {
            if let Some(qn) = c.qualified_name.as_deref() {
                classes_by_qualified.entry(qn).or_insert(i);
            }
        }

        let mut jsps_by_path = FxHashMap::default();
        for (i, j) in input.jsp_pages.iter().enumerate() {
            if let Some(path) = j.path.as_deref() {
                jsps_by_path.entry(path).or_insert(i);
            }
        }

        Self {
            linker,
            input,
            ctx,
            builder: RelationshipBuilder::new(
                NavigationLinker::NAME,
                linker.config.weights.clone(),
            ),
            policy: linker.config.effective_ambiguity(),
            substring_views: linker.config.effective_substring_views(),
            screens,
            flows,
            classes: NameIndex::build(input.classes.iter().map(|c| c.name.as_str())),
            classes_by_qualified,
            jsps: NameIndex::build(input.jsp_pages.iter().map(|j| j.name.as_str())),
            jsps_by_path,
            emitted: FxHashSet::default(),
            chained: FxHashSet::default(),
            relationships: Vec::new(),
            diagnostics: LinkDiagnostics::new(),
        }
    }

    fn link_menus(&mut self) {
        let input = self.input;
        for menu in &input.menu_items {
            let Some(flow_key) = menu.flow_key() else {
                self.diagnostics.skipped_menus += 1;
                tracing::debug!(menu = %menu.label, "Menu item has no flow id; skipped");
                continue;
            };

            let mut opened_screen = None;
            if let Some(view_state) = menu.view_state_key() {
                match self.screens.get(&(flow_key, view_state)).copied() {
                    Some(si) => {
                        let screen = &input.screens[si];
                        self.emit(
                            RelationshipType::MenuOpensScreen,
                            &menu.entity_id,
                            &screen.entity_id,
                            MatchKind::Exact,
                            LinkPass::Primary,
                            view_state,
                        );
                        opened_screen = Some(si);
                    }
                    None => self.unresolved(&menu.entity_id, Hop::MenuScreen, view_state),
                }
            }

            match self.flows.get(flow_key).copied() {
                Some(fi) => {
                    self.emit(
                        RelationshipType::MenuOpensFlow,
                        &menu.entity_id,
                        &input.flows[fi].entity_id,
                        MatchKind::Exact,
                        LinkPass::Primary,
                        flow_key,
                    );
                }
                None => self.unresolved(&menu.entity_id, Hop::MenuFlow, flow_key),
            }

            if let Some(si) = opened_screen {
                self.chain(si, LinkPass::Primary);
            }
        }
    }

    /// Chain every screen the menu pass did not reach.
    fn link_remaining_screens(&mut self) {
        for si in 0..self.input.screens.len() {
            if self.chained.contains(&si) {
                continue;
            }
            let before = self.relationships.len();
            self.chain(si, LinkPass::Fallback);
            if self.relationships.len() > before {
                self.diagnostics.fallback_only_screens += 1;
            }
        }
    }

    /// Resolve a screen's action class and views, once per screen.
    fn chain(&mut self, si: usize, pass: LinkPass) {
        if !self.chained.insert(si) {
            return;
        }
        let input = self.input;
        let screen: &'a Screen = &input.screens[si];

        if let Some(action) = screen.action_class_key() {
            let outcome = match self.classes_by_qualified.get(action) {
                Some(&index) => MatchOutcome::Matched(NameMatch {
                    index,
                    kind: MatchKind::Exact,
                    candidates: 1,
                }),
                None => self.classes.resolve_name(action, self.policy),
            };
            self.apply(
                outcome,
                screen,
                Hop::ScreenAction,
                RelationshipType::ScreenCallsAction,
                action,
                pass,
            );
        }

        for view in screen.view_keys() {
            let outcome = match self.jsps_by_path.get(view.trim()) {
                Some(&index) => MatchOutcome::Matched(NameMatch {
                    index,
                    kind: MatchKind::Exact,
                    candidates: 1,
                }),
                None => self
                    .jsps
                    .resolve_view(view, self.policy, self.substring_views),
            };
            self.apply(
                outcome,
                screen,
                Hop::ScreenView,
                RelationshipType::ScreenRendersJsp,
                view,
                pass,
            );
        }
    }

    fn apply(
        &mut self,
        outcome: MatchOutcome,
        screen: &Screen,
        hop: Hop,
        relationship_type: RelationshipType,
        reference: &str,
        pass: LinkPass,
    ) {
        let input = self.input;
        match outcome {
            MatchOutcome::Matched(m) => {
                if m.is_ambiguous() {
                    self.diagnostics.ambiguous_matches += 1;
                    tracing::debug!(
                        screen = %screen.screen_id,
                        reference,
                        candidates = m.candidates,
                        policy = self.policy.name(),
                        "Ambiguous match resolved by policy"
                    );
                }
                let target_id = match hop {
                    Hop::ScreenAction => &input.classes[m.index].entity_id,
                    _ => &input.jsp_pages[m.index].entity_id,
                };
                self.emit(
                    relationship_type,
                    &screen.entity_id,
                    target_id,
                    m.kind,
                    pass,
                    reference,
                );
            }
            MatchOutcome::Ambiguous { kind, candidates } => {
                self.diagnostics.ambiguous_matches += 1;
                self.diagnostics.rejected_ambiguous += 1;
                tracing::debug!(
                    screen = %screen.screen_id,
                    reference,
                    candidates,
                    match_kind = kind.name(),
                    "Ambiguous match rejected"
                );
            }
            MatchOutcome::Unmatched => self.unresolved(&screen.entity_id, hop, reference),
        }
    }

    fn emit(
        &mut self,
        relationship_type: RelationshipType,
        source_id: &str,
        target_id: &str,
        match_kind: MatchKind,
        pass: LinkPass,
        reference: &str,
    ) {
        if !self
            .emitted
            .insert(RelationshipKey::new(relationship_type, source_id, target_id))
        {
            self.diagnostics.duplicate_emissions_suppressed += 1;
            return;
        }

        let relationship = self.builder.build(
            self.ctx,
            relationship_type,
            source_id,
            target_id,
            match_kind,
            pass,
            reference,
        );
        self.diagnostics.record_emitted(relationship_type, match_kind);
        tracing::debug!(
            relationship_type = relationship_type.name(),
            source_id,
            target_id,
            match_kind = match_kind.name(),
            pass = pass.name(),
            "Relationship emitted"
        );

        let events = &self.linker.events;
        if !events.is_empty() {
            events.emit_relationship_emitted(&RelationshipEmittedEvent {
                integrator: NavigationLinker::NAME.to_string(),
                relationship_type: relationship_type.name().to_string(),
                source_id: source_id.to_string(),
                target_id: target_id.to_string(),
                match_kind: match_kind.name().to_string(),
                fallback: pass == LinkPass::Fallback,
            });
        }
        self.relationships.push(relationship);
    }

    fn unresolved(&mut self, source_id: &str, hop: Hop, reference: &str) {
        self.diagnostics.record_unresolved(hop);
        tracing::debug!(source_id, hop = hop.name(), reference, "Unresolved reference");
        let events = &self.linker.events;
        if !events.is_empty() {
            events.emit_unresolved_reference(&UnresolvedReferenceEvent {
                integrator: NavigationLinker::NAME.to_string(),
                source_id: source_id.to_string(),
                hop: hop.name().to_string(),
                reference: reference.to_string(),
            });
        }
    }

    fn finish(self) -> LinkOutput {
        LinkOutput {
            relationships: self.relationships,
            diagnostics: self.diagnostics,
        }
    }
}
