//! FeatureContextProjector: read-only queries for one entry point.

use navgraph_core::config::ProjectorConfig;
use navgraph_core::errors::ProjectionError;
use navgraph_core::types::FxHashSet;

use crate::entities::{EntityRef, MenuItem, Screen};
use crate::graph::NavigationGraph;
use crate::relationship::RelationshipType;

use super::types::{FeatureContext, FlowSummary, ScreenSummary};

/// Projects feature contexts out of a [`NavigationGraph`].
pub struct FeatureContextProjector<'g, 'a> {
    graph: &'g NavigationGraph<'a>,
    config: ProjectorConfig,
}

impl<'g, 'a> FeatureContextProjector<'g, 'a> {
    pub fn new(graph: &'g NavigationGraph<'a>) -> Self {
        Self::with_config(graph, ProjectorConfig::default())
    }

    pub fn with_config(graph: &'g NavigationGraph<'a>, config: ProjectorConfig) -> Self {
        Self { graph, config }
    }

    /// Feature context rooted at the menu item `menu_entity_id`.
    pub fn project(&self, menu_entity_id: &str) -> Result<FeatureContext, ProjectionError> {
        let menu = match self.graph.get(menu_entity_id) {
            Some(EntityRef::MenuItem(menu)) => menu,
            Some(other) => {
                return Err(ProjectionError::NotAMenuItem {
                    entity_id: menu_entity_id.to_string(),
                    kind: other.kind().label().to_string(),
                })
            }
            None => {
                return Err(ProjectionError::EntryPointNotFound {
                    query: menu_entity_id.to_string(),
                })
            }
        };
        Ok(self.project_menu(menu))
    }

    /// Find a menu item by label: case-insensitive equality, then
    /// containment, then all query words appearing in order. Within a tier
    /// the shallowest menu level wins, then collection order.
    pub fn find_entry_point(&self, query: &str) -> Option<&'a MenuItem> {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return None;
        }
        let words: Vec<&str> = query.split_whitespace().collect();
        let menus = &self.graph.collections().menu_items;

        for tier in [LabelTier::Equal, LabelTier::Contains, LabelTier::OrderedWords] {
            let best = menus
                .iter()
                .enumerate()
                .filter(|(_, m)| tier.matches(&m.label.to_lowercase(), &query, &words))
                .min_by_key(|(i, m)| (m.menu_level.unwrap_or(u32::MAX), *i));
            if let Some((_, menu)) = best {
                return Some(menu);
            }
        }
        None
    }

    pub fn project_by_label(&self, query: &str) -> Result<FeatureContext, ProjectionError> {
        let menu = self
            .find_entry_point(query)
            .ok_or_else(|| ProjectionError::EntryPointNotFound {
                query: query.to_string(),
            })?;
        Ok(self.project_menu(menu))
    }

    fn project_menu(&self, menu: &'a MenuItem) -> FeatureContext {
        let graph = self.graph;

        let main = graph
            .targets(&menu.entity_id, RelationshipType::MenuOpensScreen)
            .into_iter()
            .find_map(|e| e.as_screen());

        let flow = graph
            .targets(&menu.entity_id, RelationshipType::MenuOpensFlow)
            .into_iter()
            .find_map(|e| match e {
                EntityRef::Flow(f) => Some(FlowSummary::from(f)),
                _ => None,
            });

        let include_main = self.config.effective_include_main_in_sub_features();
        let mut siblings: Vec<&'a Screen> = menu
            .flow_key()
            .map(|flow_id| graph.screens_in_flow(flow_id).to_vec())
            .unwrap_or_default();
        siblings.retain(|s| include_main || main.map_or(true, |m| m.entity_id != s.entity_id));
        siblings.sort_by(|a, b| a.screen_id.cmp(&b.screen_id));

        let group: Vec<&'a Screen> = main.into_iter().chain(siblings.iter().copied()).collect();

        let mut action_classes = Vec::new();
        let mut seen_classes = FxHashSet::default();
        let mut action_methods = Vec::new();
        let mut seen_methods = FxHashSet::default();
        let mut jsp_pages = Vec::new();
        let mut seen_jsps = FxHashSet::default();

        for &screen in &group {
            let linked = graph
                .targets(&screen.entity_id, RelationshipType::ScreenCallsAction)
                .into_iter()
                .map(|e| e.name());
            for class in linked.chain(screen.action_class_key()) {
                if seen_classes.insert(class.to_lowercase()) {
                    action_classes.push(class.to_string());
                }
            }
            for method in &screen.action_methods {
                if seen_methods.insert(method.as_str()) {
                    action_methods.push(method.clone());
                }
            }
            for jsp in self.rendered_jsps(screen) {
                if seen_jsps.insert(jsp.clone()) {
                    jsp_pages.push(jsp);
                }
            }
        }

        let reachable = graph
            .downstream(&menu.entity_id)
            .into_iter()
            .map(|e| e.entity_id().to_string())
            .collect();

        tracing::debug!(
            menu = %menu.label,
            screens = group.len(),
            action_classes = action_classes.len(),
            "Projected feature context"
        );

        FeatureContext {
            menu_id: menu.entity_id.clone(),
            menu_label: menu.label.clone(),
            menu_url: menu.url.clone(),
            flow_id: menu.flow_key().map(str::to_string),
            flow,
            main_screen: main.map(|s| ScreenSummary::new(s, self.rendered_jsps(s))),
            sub_features: siblings
                .iter()
                .map(|s| ScreenSummary::new(s, self.rendered_jsps(s)))
                .collect(),
            action_classes,
            action_methods,
            jsp_pages,
            reachable,
        }
    }

    fn rendered_jsps(&self, screen: &Screen) -> Vec<String> {
        self.graph
            .targets(&screen.entity_id, RelationshipType::ScreenRendersJsp)
            .into_iter()
            .map(|e| e.name().to_string())
            .collect()
    }
}

/// Label lookup tiers, tried in order.
#[derive(Debug, Clone, Copy)]
enum LabelTier {
    Equal,
    Contains,
    OrderedWords,
}

impl LabelTier {
    /// `label` and `query` are already lower-cased.
    fn matches(self, label: &str, query: &str, words: &[&str]) -> bool {
        match self {
            Self::Equal => label == query,
            Self::Contains => label.contains(query),
            Self::OrderedWords => contains_in_order(label, words),
        }
    }
}

/// Every word occurs in `label` after the previous one.
fn contains_in_order(label: &str, words: &[&str]) -> bool {
    let mut rest = label;
    for word in words {
        match rest.find(word) {
            Some(pos) => rest = &rest[pos + word.len()..],
            None => return false,
        }
    }
    !words.is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordered_words() {
        assert!(contains_in_order("order entry list", &["order", "list"]));
        assert!(!contains_in_order("list of orders", &["order", "list"]));
        assert!(!contains_in_order("anything", &[]));
    }
}
