//! Feature context result types.

use serde::{Deserialize, Serialize};

use crate::entities::{Screen, WebFlowDefinition};

/// The flow opened by a menu item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlowSummary {
    pub entity_id: String,
    pub flow_id: String,
    pub name: String,
}

impl From<&WebFlowDefinition> for FlowSummary {
    fn from(flow: &WebFlowDefinition) -> Self {
        Self {
            entity_id: flow.entity_id.clone(),
            flow_id: flow.flow_id.clone(),
            name: flow.name.clone(),
        }
    }
}

/// One screen of a feature with its linked code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScreenSummary {
    pub entity_id: String,
    pub flow_id: String,
    pub screen_id: String,
    /// Declared title, else the screen id.
    pub title: String,
    pub url_pattern: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub screen_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action_class: Option<String>,
    pub action_methods: Vec<String>,
    /// Names of the JSP pages this screen renders.
    pub jsp_pages: Vec<String>,
}

impl ScreenSummary {
    pub(crate) fn new(screen: &Screen, jsp_pages: Vec<String>) -> Self {
        Self {
            entity_id: screen.entity_id.clone(),
            flow_id: screen.flow_id.clone(),
            screen_id: screen.screen_id.clone(),
            title: screen
                .title
                .clone()
                .unwrap_or_else(|| screen.screen_id.clone()),
            url_pattern: screen.effective_url_pattern(),
            screen_type: screen.screen_type.clone(),
            action_class: screen.action_class.clone(),
            action_methods: screen.action_methods.iter().cloned().collect(),
            jsp_pages,
        }
    }
}

/// Projection of the graph around one menu entry point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureContext {
    pub menu_id: String,
    pub menu_label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub menu_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flow_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flow: Option<FlowSummary>,
    /// First screen the menu opens.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub main_screen: Option<ScreenSummary>,
    /// Screens sharing the menu's flow, ordered by screen id.
    pub sub_features: Vec<ScreenSummary>,
    /// Action classes of the group, case-insensitively unique, first spelling kept.
    pub action_classes: Vec<String>,
    pub action_methods: Vec<String>,
    pub jsp_pages: Vec<String>,
    /// Entity IDs reachable from the menu item, in BFS order.
    pub reachable: Vec<String>,
}

impl FeatureContext {
    /// Main screen followed by the sub-features.
    pub fn screens(&self) -> impl Iterator<Item = &ScreenSummary> {
        self.main_screen.iter().chain(self.sub_features.iter())
    }

    pub fn screen_count(&self) -> usize {
        self.screens().count()
    }
}
