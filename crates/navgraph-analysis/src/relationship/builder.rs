//! RelationshipBuilder: assembles relationship records from a LinkContext.

use navgraph_core::config::MatchWeights;
use navgraph_core::constants::RELATIONSHIP_ID_PREFIX;
use navgraph_core::{entity_id, instance_id};
use serde_json::Value;

use crate::entities::Properties;

use super::context::LinkContext;
use super::types::{MatchKind, Relationship, RelationshipType};

/// Which linker pass produced a relationship.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LinkPass {
    /// Reached from a menu item.
    Primary,
    /// Re-linked from the screen list.
    Fallback,
}

impl LinkPass {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Primary => "primary",
            Self::Fallback => "fallback",
        }
    }
}

/// Builds relationships for one integrator.
#[derive(Debug, Clone)]
pub struct RelationshipBuilder {
    weights: MatchWeights,
    integrator: &'static str,
}

impl RelationshipBuilder {
    pub fn new(integrator: &'static str, weights: MatchWeights) -> Self {
        Self { weights, integrator }
    }

    /// Build one relationship. `reference` is the declared key that was
    /// matched (view key, action class name, flow id).
    #[allow(clippy::too_many_arguments)]
    pub fn build(
        &self,
        ctx: &mut LinkContext,
        relationship_type: RelationshipType,
        source_id: &str,
        target_id: &str,
        match_kind: MatchKind,
        pass: LinkPass,
        reference: &str,
    ) -> Relationship {
        let type_name = relationship_type.name();
        let mut properties = Properties::new();
        properties.insert("matchKind".into(), Value::from(match_kind.name()));
        properties.insert("integrator".into(), Value::from(self.integrator));
        properties.insert("pass".into(), Value::from(pass.name()));
        properties.insert("reference".into(), Value::from(reference));

        Relationship {
            id: instance_id(
                &mut ctx.counter,
                RELATIONSHIP_ID_PREFIX,
                &[self.integrator, type_name],
            ),
            entity_id: entity_id(RELATIONSHIP_ID_PREFIX, &[type_name, source_id, target_id]),
            relationship_type,
            source_id: source_id.to_string(),
            target_id: target_id.to_string(),
            created_at: ctx.created_at,
            properties,
            weight: match_kind.weight(&self.weights),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn ctx() -> LinkContext {
        LinkContext::at(chrono::Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap())
    }

    #[test]
    fn identical_keys_share_entity_id_not_instance_id() {
        let builder = RelationshipBuilder::new("navigation", MatchWeights::default());
        let mut ctx = ctx();
        let a = builder.build(
            &mut ctx,
            RelationshipType::ScreenCallsAction,
            "screen:1",
            "class:1",
            MatchKind::Exact,
            LinkPass::Primary,
            "OrderAction",
        );
        let b = builder.build(
            &mut ctx,
            RelationshipType::ScreenCallsAction,
            "screen:1",
            "class:1",
            MatchKind::Exact,
            LinkPass::Fallback,
            "OrderAction",
        );
        assert_eq!(a.entity_id, b.entity_id);
        assert_ne!(a.id, b.id);
        assert_eq!(a.id, "rel_navigation_screen_calls_action_0");
        assert!(a.entity_id.starts_with("rel:"));
        assert_eq!(a.created_at, b.created_at);
    }

    #[test]
    fn records_match_kind_and_weight() {
        let builder = RelationshipBuilder::new("navigation", MatchWeights::default());
        let rel = builder.build(
            &mut ctx(),
            RelationshipType::ScreenRendersJsp,
            "screen:1",
            "jsp:1",
            MatchKind::Substring,
            LinkPass::Primary,
            "orderList.jsp",
        );
        assert_eq!(rel.weight, 0.6);
        assert_eq!(rel.match_kind(), Some(MatchKind::Substring));
        assert_eq!(rel.properties["pass"], "primary");
        assert_eq!(rel.properties["reference"], "orderList.jsp");
    }
}
