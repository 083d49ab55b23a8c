//! LinkPipeline: integrators → aggregator → sink.

use std::path::Path;
use std::time::Instant;

use chrono::{DateTime, SubsecRound, Utc};
use navgraph_core::config::NavgraphConfig;
use navgraph_core::errors::PipelineError;
use navgraph_core::events::{BatchAggregatedEvent, EventDispatcher};
use rayon::prelude::*;

use crate::aggregate::{AggregationStats, RelationshipAggregator};
use crate::entities::EntityCollections;
use crate::integrators::{Integrator, LinkDiagnostics, LinkOutput, NavigationLinker};
use crate::relationship::{LinkContext, RelationshipBatch};

use super::sink::RelationshipSink;

/// Result of one pipeline run.
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    pub batch: RelationshipBatch,
    /// Per-integrator diagnostics, in registration order.
    pub diagnostics: Vec<(&'static str, LinkDiagnostics)>,
    pub stats: AggregationStats,
}

impl PipelineOutput {
    pub fn diagnostics_for(&self, integrator: &str) -> Option<&LinkDiagnostics> {
        self.diagnostics
            .iter()
            .find(|(name, _)| *name == integrator)
            .map(|(_, d)| d)
    }
}

/// Runs registered integrators over one snapshot and merges their output.
///
/// Each integrator gets its own [`LinkContext`]; all contexts share the
/// run's timestamp.
pub struct LinkPipeline {
    integrators: Vec<Box<dyn Integrator>>,
    config: NavgraphConfig,
    events: EventDispatcher,
}

impl LinkPipeline {
    /// Pipeline with no integrators registered.
    pub fn new(config: NavgraphConfig) -> Self {
        Self {
            integrators: Vec::new(),
            config,
            events: EventDispatcher::new(),
        }
    }

    /// Load layered configuration for `root` and register the default integrators.
    pub fn from_root(root: &Path) -> Result<Self, PipelineError> {
        let config = NavgraphConfig::load(root, None)?;
        Ok(Self::new(config).with_default_integrators())
    }

    /// Set the event dispatcher. Integrators registered afterwards by
    /// [`with_default_integrators`](Self::with_default_integrators) share it.
    pub fn with_events(mut self, events: EventDispatcher) -> Self {
        self.events = events;
        self
    }

    pub fn with_default_integrators(mut self) -> Self {
        let linker =
            NavigationLinker::new(self.config.linker.clone()).with_events(self.events.clone());
        self.register(Box::new(linker));
        self
    }

    pub fn register(&mut self, integrator: Box<dyn Integrator>) {
        self.integrators.push(integrator);
    }

    pub fn integrator_names(&self) -> Vec<&'static str> {
        self.integrators.iter().map(|i| i.name()).collect()
    }

    pub fn config(&self) -> &NavgraphConfig {
        &self.config
    }

    pub fn run(&self, input: &EntityCollections) -> PipelineOutput {
        self.run_at(input, Utc::now().trunc_subsecs(3))
    }

    /// Run with a fixed timestamp.
    pub fn run_at(&self, input: &EntityCollections, created_at: DateTime<Utc>) -> PipelineOutput {
        let start = Instant::now();
        let outputs = if self.integrators.len() > 1 {
            self.link_parallel(input, created_at)
        } else {
            self.link_sequential(input, created_at)
        };

        let mut aggregator = RelationshipAggregator::new();
        let mut diagnostics = Vec::with_capacity(outputs.len());
        for (name, output) in outputs {
            aggregator.extend(output.relationships);
            diagnostics.push((name, output.diagnostics));
        }

        let aggregated = if self.config.linker.effective_prune_dangling() {
            aggregator.finish_pruned(&input.index())
        } else {
            aggregator.finish()
        };
        let stats = aggregated.stats;

        tracing::info!(
            integrators = self.integrators.len(),
            received = stats.received,
            kept = stats.kept,
            duplicates_dropped = stats.duplicates_dropped,
            dangling_dropped = stats.dangling_dropped,
            duration_ms = start.elapsed().as_millis() as u64,
            "Relationships aggregated"
        );
        if !self.events.is_empty() {
            self.events.emit_batch_aggregated(&BatchAggregatedEvent {
                received: stats.received,
                kept: stats.kept,
                duplicates_dropped: stats.duplicates_dropped,
                dangling_dropped: stats.dangling_dropped,
            });
        }

        PipelineOutput {
            batch: RelationshipBatch::new(created_at, aggregated.relationships),
            diagnostics,
            stats,
        }
    }

    /// Run, then hand the batch to `sink`.
    pub fn run_and_persist(
        &self,
        input: &EntityCollections,
        sink: &dyn RelationshipSink,
    ) -> Result<PipelineOutput, PipelineError> {
        let output = self.run(input);
        let accepted = sink.persist(&output.batch)?;
        tracing::info!(accepted, total = output.batch.len(), "Batch persisted");
        Ok(output)
    }

    fn link_parallel(
        &self,
        input: &EntityCollections,
        created_at: DateTime<Utc>,
    ) -> Vec<(&'static str, LinkOutput)> {
        self.integrators
            .par_iter()
            .map(|integrator| Self::link_one(integrator.as_ref(), input, created_at))
            .collect()
    }

    fn link_sequential(
        &self,
        input: &EntityCollections,
        created_at: DateTime<Utc>,
    ) -> Vec<(&'static str, LinkOutput)> {
        self.integrators
            .iter()
            .map(|integrator| Self::link_one(integrator.as_ref(), input, created_at))
            .collect()
    }

    fn link_one(
        integrator: &dyn Integrator,
        input: &EntityCollections,
        created_at: DateTime<Utc>,
    ) -> (&'static str, LinkOutput) {
        let mut ctx = LinkContext::at(created_at);
        (integrator.name(), integrator.link(input, &mut ctx))
    }
}

impl std::fmt::Debug for LinkPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LinkPipeline")
            .field("integrators", &self.integrator_names())
            .field("config", &self.config)
            .finish()
    }
}
