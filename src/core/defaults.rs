use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::paths;
use crate::utils::io;

/// Root configuration structure for classmv.json
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ClassmvConfig {
    #[serde(default)]
    pub defaults: Defaults,
}

/// All configurable defaults that can be overridden via classmv.json
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Defaults {
    /// Directory names that mark the root of the package tree.
    #[serde(default = "default_base_markers")]
    pub base_markers: Vec<String>,

    /// How many ancestors of the source file to inspect when looking for a marker.
    #[serde(default = "default_max_ascent")]
    pub max_ascent: usize,

    /// Directory names never descended into during the import walk.
    #[serde(default = "default_skip_dirs")]
    pub skip_dirs: Vec<String>,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            base_markers: default_base_markers(),
            max_ascent: default_max_ascent(),
            skip_dirs: default_skip_dirs(),
        }
    }
}

// =============================================================================
// Default value functions
// =============================================================================

fn default_base_markers() -> Vec<String> {
    vec!["java".to_string(), "groovy".to_string()]
}

fn default_max_ascent() -> usize {
    16
}

fn default_skip_dirs() -> Vec<String> {
    vec![".git".to_string(), ".svn".to_string(), ".hg".to_string()]
}

// =============================================================================
// Loading functions
// =============================================================================

/// Load defaults, merging file config with built-in defaults.
/// If classmv.json is missing or invalid, silently returns built-in defaults.
pub fn load_defaults() -> Defaults {
    load_config().defaults
}

/// Load the full classmv.json config, falling back to defaults on any error.
pub fn load_config() -> ClassmvConfig {
    paths::classmv_json()
        .and_then(|path| load_config_from_file(&path))
        .unwrap_or_default()
}

/// Attempt to load config from a classmv.json file.
pub fn load_config_from_file(path: &Path) -> crate::Result<ClassmvConfig> {
    if !path.exists() {
        return Err(crate::Error::internal_io(
            "classmv.json not found",
            Some(path.display().to_string()),
        ));
    }

    let content = io::read_file(path, &format!("read {}", path.display()))?;

    serde_json::from_str(&content)
        .map_err(|e| crate::Error::config_invalid_json(path.display().to_string(), e))
}
