//! Property tests for linking and aggregation over generated snapshots.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, TimeZone, Utc};
use navgraph_analysis::{
    aggregate, ClassNode, EntityCollections, Integrator, JspPage, LinkContext, MenuItem,
    NavigationLinker, Relationship, RelationshipKey, Screen, WebFlowDefinition,
};
use proptest::prelude::*;

const FLOWS: [&str; 3] = ["order-flow", "report-flow", "admin-flow"];

#[derive(Debug, Clone)]
struct ScreenCase {
    flow: usize,
    screen: String,
    action: Option<String>,
    view: Option<String>,
    has_menu: bool,
}

fn screen_case() -> impl Strategy<Value = ScreenCase> {
    (
        0..FLOWS.len(),
        "[a-d]{1,3}",
        proptest::option::of("[A-Ca-c][a-c]{0,2}Action"),
        proptest::option::of("[a-c]{1,3}\\.jsp"),
        any::<bool>(),
    )
        .prop_map(|(flow, screen, action, view, has_menu)| ScreenCase {
            flow,
            screen,
            action,
            view,
            has_menu,
        })
}

/// Builds a snapshot that is deduplicated per type, as upstream extractors guarantee.
fn snapshot(cases: &[ScreenCase], extra_classes: &[String]) -> EntityCollections {
    let mut screens = BTreeMap::new();
    for case in cases {
        screens
            .entry((case.flow, case.screen.clone()))
            .or_insert_with(|| case.clone());
    }

    let mut input = EntityCollections::new();
    let mut classes = BTreeSet::new();
    let mut views = BTreeSet::new();
    for case in screens.values() {
        let flow = FLOWS[case.flow];
        let mut screen = Screen::new(flow, &case.screen);
        if let Some(action) = &case.action {
            screen = screen.with_action_class(action);
            classes.insert(action.clone());
        }
        if let Some(view) = &case.view {
            screen = screen.with_jsps([view.clone()]);
            views.insert(view.clone());
        }
        if case.has_menu {
            let label = format!("{} {}", flow, case.screen);
            input
                .menu_items
                .push(MenuItem::new(&label, Some(flow), Some(&case.screen)));
        }
        input.screens.push(screen);
    }
    classes.extend(extra_classes.iter().cloned());

    input.flows = FLOWS[..2]
        .iter()
        .map(|f| WebFlowDefinition::new(f, f))
        .collect();
    input.jsp_pages = views.iter().map(|v| JspPage::new(v)).collect();
    input.classes = classes.iter().map(|c| ClassNode::new(c)).collect();
    input
}

fn link(input: &EntityCollections) -> Vec<Relationship> {
    link_at(input, Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap())
}

fn link_at(input: &EntityCollections, created_at: DateTime<Utc>) -> Vec<Relationship> {
    let mut ctx = LinkContext::at(created_at);
    NavigationLinker::default().link(input, &mut ctx).relationships
}

proptest! {
    #[test]
    fn single_pass_emits_unique_keys_with_known_endpoints(
        cases in prop::collection::vec(screen_case(), 0..12),
        extra in prop::collection::vec("[A-Ca-c][a-c]{0,2}Action", 0..4),
    ) {
        let input = snapshot(&cases, &extra);
        let index = input.index();
        let relationships = link(&input);

        let keys: BTreeSet<RelationshipKey> = relationships.iter().map(|r| r.key()).collect();
        prop_assert_eq!(keys.len(), relationships.len());
        for r in &relationships {
            prop_assert!(index.contains(&r.source_id));
            prop_assert!(index.contains(&r.target_id));
            prop_assert!(r.weight > 0.0 && r.weight <= 1.0);
        }
    }

    #[test]
    fn aggregation_absorbs_repeated_passes(
        cases in prop::collection::vec(screen_case(), 0..12),
        repeats in 1usize..4,
    ) {
        let input = snapshot(&cases, &[]);
        let once = aggregate([link(&input)]);
        let many = aggregate((0..repeats).map(|_| link(&input)));

        prop_assert_eq!(&once.relationships, &many.relationships);
        prop_assert_eq!(many.stats.duplicates_dropped, once.relationships.len() * (repeats - 1));
    }

    #[test]
    fn aggregation_ignores_arrival_order(
        cases in prop::collection::vec(screen_case(), 0..12),
        seed in any::<u64>(),
    ) {
        let input = snapshot(&cases, &[]);
        let early = link_at(&input, Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap());
        let late = link_at(&input, Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap());

        let mut mixed: Vec<Relationship> = late.iter().chain(early.iter()).cloned().collect();
        // Deterministic rotation plus reversal stands in for a shuffle.
        if !mixed.is_empty() {
            let mid = (seed as usize) % mixed.len();
            mixed.rotate_left(mid);
            mixed.reverse();
        }

        let forward = aggregate([early.clone(), late.clone()]);
        let backward = aggregate([late, early.clone()]);
        let shuffled = aggregate([mixed]);
        prop_assert_eq!(&forward.relationships, &backward.relationships);
        prop_assert_eq!(&forward.relationships, &shuffled.relationships);
        // Whole records survive, the earliest run's timestamp included.
        prop_assert_eq!(&forward.relationships, &aggregate([early]).relationships);
    }
}
