//! EntityCollections: the typed snapshot handed to every integrator.

use navgraph_core::types::FxHashMap;
use serde::{Deserialize, Serialize};

use super::kind::EntityKind;
use super::types::{ClassNode, Entity, JspPage, MenuItem, Properties, Screen, WebFlowDefinition};

/// One parsed snapshot of the legacy application, per-type deduplicated
/// upstream. Collection order is significant: loose matches scan candidates
/// in this order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EntityCollections {
    pub menu_items: Vec<MenuItem>,
    pub screens: Vec<Screen>,
    pub flows: Vec<WebFlowDefinition>,
    pub jsp_pages: Vec<JspPage>,
    pub classes: Vec<ClassNode>,
}

impl EntityCollections {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a camelCase JSON snapshot.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn total(&self) -> usize {
        self.menu_items.len()
            + self.screens.len()
            + self.flows.len()
            + self.jsp_pages.len()
            + self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    /// Every entity in kind order, then collection order.
    pub fn iter(&self) -> impl Iterator<Item = EntityRef<'_>> {
        self.menu_items
            .iter()
            .map(EntityRef::MenuItem)
            .chain(self.screens.iter().map(EntityRef::Screen))
            .chain(self.flows.iter().map(EntityRef::Flow))
            .chain(self.jsp_pages.iter().map(EntityRef::Jsp))
            .chain(self.classes.iter().map(EntityRef::Class))
    }

    pub fn index(&self) -> EntityIndex<'_> {
        EntityIndex::build(self)
    }
}

/// A borrowed entity of any kind.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EntityRef<'a> {
    MenuItem(&'a MenuItem),
    Screen(&'a Screen),
    Flow(&'a WebFlowDefinition),
    Jsp(&'a JspPage),
    Class(&'a ClassNode),
}

impl<'a> EntityRef<'a> {
    fn as_entity(&self) -> &'a dyn Entity {
        match *self {
            Self::MenuItem(e) => e,
            Self::Screen(e) => e,
            Self::Flow(e) => e,
            Self::Jsp(e) => e,
            Self::Class(e) => e,
        }
    }

    pub fn kind(&self) -> EntityKind {
        self.as_entity().kind()
    }

    pub fn entity_id(&self) -> &'a str {
        self.as_entity().entity_id()
    }

    pub fn name(&self) -> &'a str {
        self.as_entity().name()
    }

    pub fn properties(&self) -> &'a Properties {
        self.as_entity().properties()
    }

    pub fn as_menu_item(&self) -> Option<&'a MenuItem> {
        match *self {
            Self::MenuItem(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_screen(&self) -> Option<&'a Screen> {
        match *self {
            Self::Screen(s) => Some(s),
            _ => None,
        }
    }
}

/// Lookup from entity ID to entity. On duplicate IDs the first occurrence wins.
#[derive(Debug, Default)]
pub struct EntityIndex<'a> {
    by_id: FxHashMap<&'a str, EntityRef<'a>>,
}

impl<'a> EntityIndex<'a> {
    pub fn build(collections: &'a EntityCollections) -> Self {
        let mut by_id = FxHashMap::default();
        by_id.reserve(collections.total());
        for entity in collections.iter() {
            by_id.entry(entity.entity_id()).or_insert(entity);
        }
        Self { by_id }
    }

    pub fn get(&self, entity_id: &str) -> Option<EntityRef<'a>> {
        self.by_id.get(entity_id).copied()
    }

    pub fn contains(&self, entity_id: &str) -> bool {
        self.by_id.contains_key(entity_id)
    }

    pub fn kind_of(&self, entity_id: &str) -> Option<EntityKind> {
        self.get(entity_id).map(|e| e.kind())
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}
