//! Linker and pipeline benchmarks.
//!
//! Benchmarks: one navigation pass, full pipeline with aggregation, and
//! feature context projection over a synthetic application.
//! Run with: cargo bench -p navgraph-analysis --bench linker_bench

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use navgraph_analysis::{
    ClassNode, EntityCollections, FeatureContextProjector, Integrator, JspPage, LinkContext,
    LinkPipeline, MenuItem, NavigationGraph, NavigationLinker, Screen, WebFlowDefinition,
};
use navgraph_core::config::NavgraphConfig;

/// Synthetic application: `flows` flows with eight screens each, a menu per
/// flow, one action class and one JSP per screen. Every fourth screen
/// declares its action in lower case to exercise the loose tier.
fn synthetic_app(flows: usize) -> EntityCollections {
    let mut input = EntityCollections::new();
    for f in 0..flows {
        let flow_id = format!("flow-{f:04}");
        input
            .flows
            .push(WebFlowDefinition::new(&flow_id, &format!("flow{f}")));
        input.menu_items.push(
            MenuItem::new(&format!("Feature {f}"), Some(&flow_id), Some("s0")).with_level(1),
        );
        for s in 0..8 {
            let class = format!("Flow{f}Screen{s}Action");
            let jsp = format!("flow{f}_screen{s}.jsp");
            let declared = if s % 4 == 0 { class.to_lowercase() } else { class.clone() };
            input.screens.push(
                Screen::new(&flow_id, &format!("s{s}"))
                    .with_action_class(&declared)
                    .with_jsps([jsp.clone()]),
            );
            input.classes.push(ClassNode::new(&class));
            input.jsp_pages.push(JspPage::new(&jsp));
        }
    }
    input
}

fn navigation_pass(c: &mut Criterion) {
    let mut group = c.benchmark_group("navigation_linker");
    group.sample_size(20);

    for flows in [10, 100, 500] {
        let input = synthetic_app(flows);
        let linker = NavigationLinker::default();
        group.bench_with_input(BenchmarkId::new("link", flows), &input, |b, input| {
            b.iter(|| {
                let mut ctx = LinkContext::new();
                black_box(linker.link(input, &mut ctx));
            });
        });
    }
    group.finish();
}

fn full_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("link_pipeline");
    group.sample_size(20);

    let input = synthetic_app(200);
    let single = LinkPipeline::new(NavgraphConfig::default()).with_default_integrators();
    let mut doubled = LinkPipeline::new(NavgraphConfig::default()).with_default_integrators();
    doubled.register(Box::new(NavigationLinker::default()));

    group.bench_function("single_integrator", |b| {
        b.iter(|| black_box(single.run(&input)));
    });
    group.bench_function("two_integrators", |b| {
        b.iter(|| black_box(doubled.run(&input)));
    });
    group.finish();
}

fn feature_projection(c: &mut Criterion) {
    let input = synthetic_app(200);
    let output = LinkPipeline::new(NavgraphConfig::default())
        .with_default_integrators()
        .run(&input);
    let graph = NavigationGraph::build(&input, &output.batch.relationships);
    let projector = FeatureContextProjector::new(&graph);
    let menu_id = input.menu_items[100].entity_id.clone();

    c.bench_function("project_feature_context", |b| {
        b.iter(|| black_box(projector.project(&menu_id).unwrap()));
    });
    c.bench_function("find_entry_point_by_label", |b| {
        b.iter(|| black_box(projector.find_entry_point("feature 150")));
    });
}

criterion_group!(benches, navigation_pass, full_pipeline, feature_projection);
criterion_main!(benches);
