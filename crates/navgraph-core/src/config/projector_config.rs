//! Feature context projector configuration.

use serde::{Deserialize, Serialize};

/// Configuration for feature context queries.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectorConfig {
    /// List the main screen among its sub-features. Default: false.
    pub include_main_in_sub_features: Option<bool>,
}

impl ProjectorConfig {
    pub fn effective_include_main_in_sub_features(&self) -> bool {
        self.include_main_in_sub_features.unwrap_or(false)
    }
}
