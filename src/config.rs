//! Generator configuration
//!
//! Settings live in an optional `rpcroute.toml` next to the descriptor set:
//!
//! ```toml
//! file_suffix = "_gin.pb.go"
//! default_tag = "api"
//! swagger = true
//! format = true
//! formatter = "gofmt"
//! ```
//!
//! Every key is optional. The formatter binary can also be overridden with
//! `RPCROUTE_GOFMT_BIN`, which takes precedence over the file.

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// File name looked up next to the descriptor set.
pub const CONFIG_FILE_NAME: &str = "rpcroute.toml";

/// Environment override for the formatter binary.
pub const FORMATTER_ENV: &str = "RPCROUTE_GOFMT_BIN";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Appended to the schema path (minus `.proto`) to name generated files
    pub file_suffix: String,
    /// Tag used in documentation comments when a method sets none
    pub default_tag: String,
    /// Emit swagger documentation comments above each handler
    pub swagger: bool,
    /// Run the formatter on written files
    pub format: bool,
    /// Formatter binary, invoked as `<formatter> -w <files...>`
    pub formatter: String,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        GeneratorConfig {
            file_suffix: "_gin.pb.go".to_string(),
            default_tag: "api".to_string(),
            swagger: true,
            format: true,
            formatter: "gofmt".to_string(),
        }
    }
}

impl GeneratorConfig {
    /// Formatter binary after applying the environment override.
    #[must_use]
    pub fn formatter_bin(&self) -> String {
        std::env::var(FORMATTER_ENV).unwrap_or_else(|_| self.formatter.clone())
    }
}

/// Load configuration from a TOML file.
///
/// Returns `Ok(None)` when the file does not exist and an error when it exists
/// but cannot be read or parsed.
pub fn load_config(config_path: &Path) -> anyhow::Result<Option<GeneratorConfig>> {
    if !config_path.exists() {
        return Ok(None);
    }
    let contents = std::fs::read_to_string(config_path)
        .with_context(|| format!("Failed to read config: {}", config_path.display()))?;
    let config: GeneratorConfig = toml::from_str(&contents)
        .with_context(|| format!("Failed to parse config: {}", config_path.display()))?;
    Ok(Some(config))
}

/// `rpcroute.toml` beside the descriptor set, if present.
pub fn auto_detect_config_path(descriptor_path: &Path) -> Option<PathBuf> {
    let config_path = descriptor_path.parent()?.join(CONFIG_FILE_NAME);
    if config_path.exists() {
        Some(config_path)
    } else {
        None
    }
}

/// Priority: explicit path (when it exists), then auto-detected, then none.
pub fn resolve_config_path(explicit_path: Option<&Path>, descriptor_path: &Path) -> Option<PathBuf> {
    if let Some(path) = explicit_path {
        if path.exists() {
            return Some(path.to_path_buf());
        }
        tracing::warn!(path = %path.display(), "config file not found, falling back to auto-detection");
    }
    auto_detect_config_path(descriptor_path)
}

/// Resolve and load the effective configuration, defaulting when no file exists.
pub fn load_effective_config(
    explicit_path: Option<&Path>,
    descriptor_path: &Path,
) -> anyhow::Result<GeneratorConfig> {
    match resolve_config_path(explicit_path, descriptor_path) {
        Some(path) => {
            let config = load_config(&path)?.unwrap_or_default();
            tracing::debug!(path = %path.display(), ?config, "loaded generator config");
            Ok(config)
        }
        None => Ok(GeneratorConfig::default()),
    }
}
