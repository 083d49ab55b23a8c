//! Top-level navgraph configuration with layered resolution.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::{AmbiguityPolicy, LinkerConfig, ProjectorConfig};
use crate::constants::{PROJECT_CONFIG_FILE, USER_CONFIG_DIR};
use crate::errors::ConfigError;

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. Programmatic overrides (applied via `apply_overrides`)
/// 2. Environment variables (`NAVGRAPH_*`)
/// 3. Project config (`navgraph.toml` in the analyzed root)
/// 4. User config (`~/.navgraph/config.toml`)
/// 5. Compiled defaults
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NavgraphConfig {
    pub linker: LinkerConfig,
    pub projector: ProjectorConfig,
}

/// Overrides supplied by the orchestrating pipeline.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub ambiguity: Option<AmbiguityPolicy>,
    pub fallback_pass: Option<bool>,
    pub substring_views: Option<bool>,
}

impl NavgraphConfig {
    /// Load configuration with layered resolution.
    pub fn load(root: &Path, overrides: Option<&ConfigOverrides>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        // Layer 4 (lowest priority): user config
        if let Some(user_config_path) = Self::user_config_path() {
            if user_config_path.exists() {
                match Self::merge_toml_file(&mut config, &user_config_path) {
                    Ok(()) => {}
                    Err(e @ ConfigError::ParseError { .. }) => return Err(e),
                    Err(e) => {
                        tracing::warn!(error = %e, "ignoring unreadable user config");
                    }
                }
            }
        }

        // Layer 3: project config
        let project_config_path = root.join(PROJECT_CONFIG_FILE);
        if project_config_path.exists() {
            Self::merge_toml_file(&mut config, &project_config_path)?;
        }

        // Layer 2: environment variables
        Self::apply_env_overrides(&mut config);

        // Layer 1 (highest priority)
        if let Some(o) = overrides {
            Self::apply_overrides(&mut config, o);
        }

        Self::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })?;
        Self::validate(&config)?;
        Ok(config)
    }

    /// Validate the configuration values.
    pub fn validate(config: &NavgraphConfig) -> Result<(), ConfigError> {
        let weights = &config.linker.weights;
        for (field, value) in [
            ("linker.weights.exact", weights.exact),
            ("linker.weights.case_insensitive", weights.case_insensitive),
            ("linker.weights.substring", weights.substring),
        ] {
            if let Some(w) = value {
                if !(0.0..=1.0).contains(&w) {
                    return Err(ConfigError::ValidationFailed {
                        field: field.to_string(),
                        message: "must be between 0.0 and 1.0".to_string(),
                    });
                }
            }
        }
        Ok(())
    }

    /// Returns the user config path: `~/.navgraph/config.toml`.
    fn user_config_path() -> Option<PathBuf> {
        home_dir().map(|h| h.join(USER_CONFIG_DIR).join("config.toml"))
    }

    /// Merge a TOML file into the existing config.
    /// Unknown keys are silently ignored (forward-compatible).
    fn merge_toml_file(config: &mut NavgraphConfig, path: &Path) -> Result<(), ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;

        let file_config: NavgraphConfig =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        Self::merge(config, &file_config);
        Ok(())
    }

    /// Merge `other` into `base`; `other` wins only where it has a value.
    fn merge(base: &mut NavgraphConfig, other: &NavgraphConfig) {
        let (bw, ow) = (&mut base.linker.weights, &other.linker.weights);
        if ow.exact.is_some() {
            bw.exact = ow.exact;
        }
        if ow.case_insensitive.is_some() {
            bw.case_insensitive = ow.case_insensitive;
        }
        if ow.substring.is_some() {
            bw.substring = ow.substring;
        }

        if other.linker.ambiguity.is_some() {
            base.linker.ambiguity = other.linker.ambiguity;
        }
        if other.linker.fallback_pass.is_some() {
            base.linker.fallback_pass = other.linker.fallback_pass;
        }
        if other.linker.substring_views.is_some() {
            base.linker.substring_views = other.linker.substring_views;
        }
        if other.linker.prune_dangling.is_some() {
            base.linker.prune_dangling = other.linker.prune_dangling;
        }

        if other.projector.include_main_in_sub_features.is_some() {
            base.projector.include_main_in_sub_features =
                other.projector.include_main_in_sub_features;
        }
    }

    /// Apply environment variable overrides.
    /// Pattern: `NAVGRAPH_LINKER_AMBIGUITY`, `NAVGRAPH_WEIGHT_EXACT`, etc.
    fn apply_env_overrides(config: &mut NavgraphConfig) {
        if let Ok(val) = std::env::var("NAVGRAPH_LINKER_AMBIGUITY") {
            match AmbiguityPolicy::parse(&val) {
                Some(policy) => config.linker.ambiguity = Some(policy),
                None => tracing::warn!(value = %val, "unknown NAVGRAPH_LINKER_AMBIGUITY"),
            }
        }
        if let Ok(val) = std::env::var("NAVGRAPH_LINKER_FALLBACK_PASS") {
            if let Ok(v) = val.parse::<bool>() {
                config.linker.fallback_pass = Some(v);
            }
        }
        if let Ok(val) = std::env::var("NAVGRAPH_LINKER_SUBSTRING_VIEWS") {
            if let Ok(v) = val.parse::<bool>() {
                config.linker.substring_views = Some(v);
            }
        }
        if let Ok(val) = std::env::var("NAVGRAPH_WEIGHT_EXACT") {
            if let Ok(v) = val.parse::<f64>() {
                config.linker.weights.exact = Some(v);
            }
        }
        if let Ok(val) = std::env::var("NAVGRAPH_WEIGHT_CASE_INSENSITIVE") {
            if let Ok(v) = val.parse::<f64>() {
                config.linker.weights.case_insensitive = Some(v);
            }
        }
        if let Ok(val) = std::env::var("NAVGRAPH_WEIGHT_SUBSTRING") {
            if let Ok(v) = val.parse::<f64>() {
                config.linker.weights.substring = Some(v);
            }
        }
    }

    /// Apply programmatic overrides (highest priority).
    fn apply_overrides(config: &mut NavgraphConfig, overrides: &ConfigOverrides) {
        if let Some(v) = overrides.ambiguity {
            config.linker.ambiguity = Some(v);
        }
        if let Some(v) = overrides.fallback_pass {
            config.linker.fallback_pass = Some(v);
        }
        if let Some(v) = overrides.substring_views {
            config.linker.substring_views = Some(v);
        }
    }

    /// Serialize the config back to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError {
            path: "<serialization>".to_string(),
            message: e.to_string(),
        })
    }
}

/// Cross-platform home directory resolution.
fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(PathBuf::from)
}
