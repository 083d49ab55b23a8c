//! NavigationGraph: petgraph view over one snapshot and its relationships.

use std::collections::VecDeque;

use navgraph_core::types::{FxHashMap, FxHashSet};
use petgraph::graph::NodeIndex;
use petgraph::stable_graph::StableGraph;
use petgraph::visit::EdgeRef;
use petgraph::{Directed, Direction};

use crate::entities::{EntityCollections, EntityRef, Screen};
use crate::relationship::{Relationship, RelationshipType};

/// Directed graph of borrowed entities and relationships.
///
/// Relationships whose endpoints are not in the collections are skipped.
pub struct NavigationGraph<'a> {
    pub graph: StableGraph<EntityRef<'a>, &'a Relationship, Directed>,
    /// Map from entity ID → NodeIndex for O(1) lookup.
    pub node_index: FxHashMap<&'a str, NodeIndex>,
    /// Screens grouped by flow id, in collection order.
    screens_by_flow: FxHashMap<&'a str, Vec<&'a Screen>>,
    collections: &'a EntityCollections,
}

impl<'a> NavigationGraph<'a> {
    pub fn build(collections: &'a EntityCollections, relationships: &'a [Relationship]) -> Self {
        let mut graph = StableGraph::with_capacity(collections.total(), relationships.len());
        let mut node_index = FxHashMap::default();
        for entity in collections.iter() {
            node_index
                .entry(entity.entity_id())
                .or_insert_with(|| graph.add_node(entity));
        }

        let mut skipped = 0usize;
        for r in relationships {
            match (
                node_index.get(r.source_id.as_str()),
                node_index.get(r.target_id.as_str()),
            ) {
                (Some(&s), Some(&t)) => {
                    graph.add_edge(s, t, r);
                }
                _ => skipped += 1,
            }
        }
        if skipped > 0 {
            tracing::warn!(skipped, "Relationships with unknown endpoints left out of graph");
        }

        let mut screens_by_flow: FxHashMap<&'a str, Vec<&'a Screen>> = FxHashMap::default();
        for screen in &collections.screens {
            screens_by_flow
                .entry(screen.flow_id.as_str())
                .or_default()
                .push(screen);
        }

        Self {
            graph,
            node_index,
            screens_by_flow,
            collections,
        }
    }

    pub fn collections(&self) -> &'a EntityCollections {
        self.collections
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn get(&self, entity_id: &str) -> Option<EntityRef<'a>> {
        self.node_index
            .get(entity_id)
            .and_then(|&idx| self.graph.node_weight(idx))
            .copied()
    }

    /// Targets of `entity_id`'s outgoing edges of one type, in relationship order.
    pub fn targets(&self, entity_id: &str, relationship_type: RelationshipType) -> Vec<EntityRef<'a>> {
        self.neighbors(entity_id, relationship_type, Direction::Outgoing)
    }

    /// Sources of `entity_id`'s incoming edges of one type, in relationship order.
    pub fn sources(&self, entity_id: &str, relationship_type: RelationshipType) -> Vec<EntityRef<'a>> {
        self.neighbors(entity_id, relationship_type, Direction::Incoming)
    }

    fn neighbors(
        &self,
        entity_id: &str,
        relationship_type: RelationshipType,
        direction: Direction,
    ) -> Vec<EntityRef<'a>> {
        let Some(&idx) = self.node_index.get(entity_id) else {
            return Vec::new();
        };
        let mut edges: Vec<_> = self
            .graph
            .edges_directed(idx, direction)
            .filter(|e| e.weight().relationship_type == relationship_type)
            .map(|e| {
                let other = match direction {
                    Direction::Outgoing => e.target(),
                    Direction::Incoming => e.source(),
                };
                (e.id(), other)
            })
            .collect();
        // petgraph yields the newest edge first.
        edges.sort_by_key(|(id, _)| *id);
        edges
            .into_iter()
            .filter_map(|(_, n)| self.graph.node_weight(n).copied())
            .collect()
    }

    pub fn screens_in_flow(&self, flow_id: &str) -> &[&'a Screen] {
        self.screens_by_flow
            .get(flow_id)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    /// Every entity reachable from `entity_id` along outgoing edges, in BFS
    /// order, excluding the start.
    pub fn downstream(&self, entity_id: &str) -> Vec<EntityRef<'a>> {
        let Some(&start) = self.node_index.get(entity_id) else {
            return Vec::new();
        };
        let mut visited = FxHashSet::default();
        let mut queue = VecDeque::new();
        let mut out = Vec::new();
        visited.insert(start);
        queue.push_back(start);

        while let Some(current) = queue.pop_front() {
            let mut next: Vec<_> = self
                .graph
                .edges_directed(current, Direction::Outgoing)
                .map(|e| (e.id(), e.target()))
                .collect();
            next.sort_by_key(|(id, _)| *id);
            for (_, n) in next {
                if visited.insert(n) {
                    if let Some(entity) = self.graph.node_weight(n) {
                        out.push(*entity);
                    }
                    queue.push_back(n);
                }
            }
        }
        out
    }

    /// Menu items from which `entity_id` is reachable.
    pub fn upstream_menus(&self, entity_id: &str) -> Vec<EntityRef<'a>> {
        let Some(&start) = self.node_index.get(entity_id) else {
            return Vec::new();
        };
        let mut visited = FxHashSet::default();
        let mut queue = VecDeque::new();
        let mut menus = Vec::new();
        visited.insert(start);
        queue.push_back(start);

        while let Some(current) = queue.pop_front() {
            for n in self.graph.neighbors_directed(current, Direction::Incoming) {
                if visited.insert(n) {
                    if let Some(entity) = self.graph.node_weight(n) {
                        if matches!(entity, EntityRef::MenuItem(_)) {
                            menus.push(*entity);
                        }
                    }
                    queue.push_back(n);
                }
            }
        }
        menus.sort_by_key(|m| m.entity_id());
        menus
    }
}
