//! Entity types: menu items, screens, flow definitions, JSP pages, classes.

use std::collections::BTreeMap;

use navgraph_core::ids::entity_id;
use navgraph_core::types::SmallVec2;
use serde::{Deserialize, Serialize};

use super::kind::EntityKind;

/// Free-form, kind-specific attributes. Ordered so serialized output is stable.
pub type Properties = BTreeMap<String, serde_json::Value>;

/// Attributes every entity exposes regardless of kind.
pub trait Entity {
    fn kind(&self) -> EntityKind;
    fn entity_id(&self) -> &str;
    fn name(&self) -> &str;
    fn properties(&self) -> &Properties;
}

/// Returns `Some(value)` only for non-blank strings.
fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

/// A navigation entry from the menu configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    pub entity_id: String,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flow_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub view_state_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_menu: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub menu_level: Option<u32>,
    #[serde(default)]
    pub properties: Properties,
}

impl MenuItem {
    pub fn new(label: &str, flow_id: Option<&str>, view_state_id: Option<&str>) -> Self {
        Self {
            entity_id: entity_id(
                EntityKind::MenuItem.prefix(),
                &[label, flow_id.unwrap_or(""), view_state_id.unwrap_or("")],
            ),
            label: label.to_string(),
            flow_id: flow_id.map(str::to_string),
            view_state_id: view_state_id.map(str::to_string),
            url: None,
            parent_menu: None,
            menu_level: None,
            properties: Properties::new(),
        }
    }

    pub fn with_url(mut self, url: &str) -> Self {
        self.url = Some(url.to_string());
        self
    }

    pub fn with_parent(mut self, parent_menu: &str, menu_level: u32) -> Self {
        self.parent_menu = Some(parent_menu.to_string());
        self.menu_level = Some(menu_level);
        self
    }

    pub fn with_level(mut self, menu_level: u32) -> Self {
        self.menu_level = Some(menu_level);
        self
    }

    /// The flow this item opens; blank values count as missing.
    pub fn flow_key(&self) -> Option<&str> {
        non_blank(self.flow_id.as_deref())
    }

    /// The view state this item opens directly; blank values count as missing.
    pub fn view_state_key(&self) -> Option<&str> {
        non_blank(self.view_state_id.as_deref())
    }
}

/// A renderable view state within a flow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Screen {
    pub entity_id: String,
    pub flow_id: String,
    pub screen_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action_class: Option<String>,
    /// View keys as declared in the flow definition, e.g. `orderList.jsp`.
    #[serde(default)]
    pub jsps: SmallVec2<String>,
    #[serde(default)]
    pub action_methods: SmallVec2<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub screen_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url_pattern: Option<String>,
    #[serde(default)]
    pub properties: Properties,
}

impl Screen {
    pub fn new(flow_id: &str, screen_id: &str) -> Self {
        Self {
            entity_id: entity_id(EntityKind::Screen.prefix(), &[flow_id, screen_id]),
            flow_id: flow_id.to_string(),
            screen_id: screen_id.to_string(),
            action_class: None,
            jsps: SmallVec2::new(),
            action_methods: SmallVec2::new(),
            title: None,
            screen_type: None,
            url_pattern: None,
            properties: Properties::new(),
        }
    }

    pub fn with_action_class(mut self, action_class: &str) -> Self {
        self.action_class = Some(action_class.to_string());
        self
    }

    pub fn with_jsps<I, S>(mut self, jsps: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.jsps = jsps.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_action_methods<I, S>(mut self, methods: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.action_methods = methods.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_title(mut self, title: &str) -> Self {
        self.title = Some(title.to_string());
        self
    }

    pub fn action_class_key(&self) -> Option<&str> {
        non_blank(self.action_class.as_deref())
    }

    /// Declared view keys, blank entries skipped.
    pub fn view_keys(&self) -> impl Iterator<Item = &str> {
        self.jsps
            .iter()
            .map(String::as_str)
            .filter(|k| !k.trim().is_empty())
    }

    /// The declared URL pattern, or the conventional `<flow>.html?pageSelect=<screen>`.
    pub fn effective_url_pattern(&self) -> String {
        self.url_pattern
            .clone()
            .unwrap_or_else(|| format!("{}.html?pageSelect={}", self.flow_id, self.screen_id))
    }
}

/// A declarative web-flow definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebFlowDefinition {
    pub entity_id: String,
    pub flow_id: String,
    pub name: String,
    #[serde(default)]
    pub properties: Properties,
}

impl WebFlowDefinition {
    pub fn new(flow_id: &str, name: &str) -> Self {
        Self {
            entity_id: entity_id(EntityKind::WebFlowDefinition.prefix(), &[flow_id]),
            flow_id: flow_id.to_string(),
            name: name.to_string(),
            properties: Properties::new(),
        }
    }
}

/// A JSP view page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JspPage {
    pub entity_id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(default)]
    pub properties: Properties,
}

impl JspPage {
    pub fn new(name: &str) -> Self {
        Self {
            entity_id: entity_id(EntityKind::JspPage.prefix(), &[name]),
            name: name.to_string(),
            path: None,
            properties: Properties::new(),
        }
    }

    /// A page identified by its path; two pages sharing a file name in
    /// different directories get distinct IDs.
    pub fn at_path(name: &str, path: &str) -> Self {
        Self {
            entity_id: entity_id(EntityKind::JspPage.prefix(), &[path]),
            name: name.to_string(),
            path: Some(path.to_string()),
            properties: Properties::new(),
        }
    }
}

/// A generic code entity, typically a controller or action class.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassNode {
    pub entity_id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub qualified_name: Option<String>,
    #[serde(default)]
    pub properties: Properties,
}

impl ClassNode {
    pub fn new(name: &str) -> Self {
        Self {
            entity_id: entity_id(EntityKind::ClassNode.prefix(), &[name]),
            name: name.to_string(),
            qualified_name: None,
            properties: Properties::new(),
        }
    }

    pub fn qualified(name: &str, qualified_name: &str) -> Self {
        Self {
            entity_id: entity_id(EntityKind::ClassNode.prefix(), &[qualified_name]),
            name: name.to_string(),
            qualified_name: Some(qualified_name.to_string()),
            properties: Properties::new(),
        }
    }
}

macro_rules! impl_entity {
    ($ty:ty, $kind:expr, $name:ident) => {
        impl Entity for $ty {
            fn kind(&self) -> EntityKind {
                $kind
            }

            fn entity_id(&self) -> &str {
                &self.entity_id
            }

            fn name(&self) -> &str {
                &self.$name
            }

            fn properties(&self) -> &Properties {
                &self.properties
            }
        }
    };
}

impl_entity!(MenuItem, EntityKind::MenuItem, label);
impl_entity!(Screen, EntityKind::Screen, screen_id);
impl_entity!(WebFlowDefinition, EntityKind::WebFlowDefinition, name);
impl_entity!(JspPage, EntityKind::JspPage, name);
impl_entity!(ClassNode, EntityKind::ClassNode, name);
