//! Feature context projection errors.

use super::error_code::{self, NavgraphErrorCode};

/// Errors returned by feature context queries.
#[derive(Debug, thiserror::Error)]
pub enum ProjectionError {
    #[error("Entry point not found: {query}")]
    EntryPointNotFound { query: String },

    #[error("Entity {entity_id} is a {kind}, expected a menu item")]
    NotAMenuItem { entity_id: String, kind: String },
}

impl NavgraphErrorCode for ProjectionError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::EntryPointNotFound { .. } => error_code::ENTRY_POINT_NOT_FOUND,
            Self::NotAMenuItem { .. } => error_code::NOT_A_MENU_ITEM,
        }
    }
}
