//! Integration tests for relationship aggregation and the dedup guard.

use chrono::{TimeZone, Utc};
use navgraph_analysis::relationship::{LinkPass, RelationshipBuilder};
use navgraph_analysis::{
    aggregate, ClassNode, EntityCollections, Integrator, JspPage, LinkContext, MatchKind,
    MenuItem, NavigationLinker, Relationship, RelationshipAggregator, RelationshipType, Screen,
    WebFlowDefinition,
};
use navgraph_core::config::MatchWeights;

fn ctx() -> LinkContext {
    LinkContext::at(Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap())
}

fn rel(
    builder: &RelationshipBuilder,
    ctx: &mut LinkContext,
    source: &str,
    target: &str,
    kind: MatchKind,
) -> Relationship {
    builder.build(
        ctx,
        RelationshipType::ScreenRendersJsp,
        source,
        target,
        kind,
        LinkPass::Primary,
        "view.jsp",
    )
}

fn order_screens() -> EntityCollections {
    EntityCollections {
        menu_items: vec![MenuItem::new("Orders", Some("order-flow"), Some("list"))],
        screens: vec![
            Screen::new("order-flow", "list")
                .with_action_class("OrderAction")
                .with_jsps(["orderList.jsp"]),
            Screen::new("order-flow", "edit").with_action_class("OrderAction"),
        ],
        flows: vec![WebFlowDefinition::new("order-flow", "orderFlow")],
        jsp_pages: vec![JspPage::new("orderList.jsp")],
        classes: vec![ClassNode::new("OrderAction")],
    }
}

#[test]
fn test_two_passes_over_same_input_produce_no_duplicates() {
    let input = order_screens();
    let linker = NavigationLinker::default();
    let first = linker.link(&input, &mut ctx()).relationships;
    let second = linker.link(&input, &mut ctx()).relationships;
    let single = first.len();

    let batch = aggregate([first, second]);
    assert_eq!(batch.relationships.len(), single);
    assert_eq!(batch.stats.received, single * 2);
    assert_eq!(batch.stats.kept, single);
    assert_eq!(batch.stats.duplicates_dropped, single);
}

#[test]
fn test_aggregation_is_order_independent() {
    let input = order_screens();
    let linker = NavigationLinker::default();
    let mut forward = linker.link(&input, &mut ctx()).relationships;
    let mut reversed = forward.clone();
    reversed.reverse();

    let a = aggregate([forward.clone()]);
    let b = aggregate([reversed]);
    assert_eq!(a.relationships, b.relationships);

    // Splitting the input across outputs changes nothing either.
    let tail = forward.split_off(2);
    let c = aggregate([tail, forward]);
    assert_eq!(a.relationships, c.relationships);
}

#[test]
fn test_aggregation_is_idempotent() {
    let input = order_screens();
    let once = aggregate([NavigationLinker::default().link(&input, &mut ctx()).relationships]);
    let twice = aggregate([once.relationships.clone()]);
    assert_eq!(once.relationships, twice.relationships);
    assert_eq!(twice.stats.duplicates_dropped, 0);
}

#[test]
fn test_higher_weight_survives() {
    let builder = RelationshipBuilder::new("navigation", MatchWeights::default());
    let mut c = ctx();
    let loose = rel(&builder, &mut c, "screen:1", "jsp:1", MatchKind::Substring);
    let exact = rel(&builder, &mut c, "screen:1", "jsp:1", MatchKind::Exact);

    for order in [[loose.clone(), exact.clone()], [exact.clone(), loose.clone()]] {
        let mut aggregator = RelationshipAggregator::new();
        aggregator.extend(order);
        let batch = aggregator.finish();
        assert_eq!(batch.relationships.len(), 1);
        assert_eq!(batch.relationships[0].weight, 1.0);
        assert_eq!(batch.relationships[0].id, exact.id);
    }
}

#[test]
fn test_equal_weight_tie_breaks_on_id() {
    let builder = RelationshipBuilder::new("navigation", MatchWeights::default());
    let mut c = ctx();
    let a = rel(&builder, &mut c, "screen:1", "jsp:1", MatchKind::Exact);
    let b = rel(&builder, &mut c, "screen:1", "jsp:1", MatchKind::Exact);
    let smaller = a.id.clone().min(b.id.clone());

    let batch = aggregate([vec![b.clone(), a.clone()]]);
    assert_eq!(batch.relationships[0].id, smaller);
    let batch = aggregate([vec![a, b]]);
    assert_eq!(batch.relationships[0].id, smaller);
}

#[test]
fn test_runs_at_different_times_merge_to_earliest_record() {
    let input = order_screens();
    let linker = NavigationLinker::default();
    let early = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    let late = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
    let a = linker.link(&input, &mut LinkContext::at(early)).relationships;
    let b = linker.link(&input, &mut LinkContext::at(late)).relationships;

    let forward = aggregate([a.clone(), b.clone()]);
    let backward = aggregate([b, a.clone()]);
    assert_eq!(forward.relationships, backward.relationships);
    assert!(forward.relationships.iter().all(|r| r.created_at == early));
    assert_eq!(forward.relationships, aggregate([a]).relationships);
}

#[test]
fn test_records_differing_only_in_pass_merge_deterministically() {
    let builder = RelationshipBuilder::new("navigation", MatchWeights::default());
    let build = |pass| {
        builder.build(
            &mut ctx(),
            RelationshipType::ScreenCallsAction,
            "screen:1",
            "class:1",
            MatchKind::Exact,
            pass,
            "OrderAction",
        )
    };
    let primary = build(LinkPass::Primary);
    let fallback = build(LinkPass::Fallback);
    assert_eq!(primary.id, fallback.id);

    let forward = aggregate([vec![primary.clone(), fallback.clone()]]);
    let backward = aggregate([vec![fallback, primary]]);
    assert_eq!(forward.relationships, backward.relationships);
    assert_eq!(forward.relationships[0].properties["pass"], "fallback");
}

#[test]
fn test_distinct_sources_are_distinct_keys() {
    let builder = RelationshipBuilder::new("navigation", MatchWeights::default());
    let mut c = ctx();
    let batch = aggregate([vec![
        rel(&builder, &mut c, "screen:1", "jsp:1", MatchKind::Exact),
        rel(&builder, &mut c, "screen:2", "jsp:1", MatchKind::Exact),
    ]]);
    assert_eq!(batch.relationships.len(), 2);
}

#[test]
fn test_pruning_drops_dangling_edges() {
    let input = order_screens();
    let builder = RelationshipBuilder::new("navigation", MatchWeights::default());
    let mut c = ctx();
    let known = rel(
        &builder,
        &mut c,
        &input.screens[0].entity_id,
        &input.jsp_pages[0].entity_id,
        MatchKind::Exact,
    );
    let dangling = rel(
        &builder,
        &mut c,
        &input.screens[0].entity_id,
        "jsp:ffffffffffffffff",
        MatchKind::Exact,
    );

    let mut aggregator = RelationshipAggregator::new();
    aggregator.extend([known.clone(), dangling]);
    let batch = aggregator.finish_pruned(&input.index());
    assert_eq!(batch.relationships, vec![known]);
    assert_eq!(batch.stats.dangling_dropped, 1);
    assert_eq!(batch.stats.kept, 1);
    assert_eq!(batch.stats.received, 2);
}

#[test]
fn test_output_sorted_by_key() {
    let input = order_screens();
    let batch = aggregate([NavigationLinker::default().link(&input, &mut ctx()).relationships]);
    let keys: Vec<_> = batch.relationships.iter().map(|r| r.key()).collect();
    let mut sorted = keys.clone();
    sorted.sort();
    assert_eq!(keys, sorted);
}
