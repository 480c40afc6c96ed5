// File: src/config.rs
// Purpose: Route resolution options, parsed from router.toml

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::tree::platform::Platform;

/// Top-level configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct RouterConfig {
    #[serde(default)]
    pub routing: RoutingConfig,

    #[serde(default)]
    pub navigation: NavigationConfig,
}

/// Options consumed by the route tree builder
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RoutingConfig {
    /// Target platform, selects which platform-suffixed files win
    #[serde(default)]
    pub platform: Platform,

    /// Suppress the generated `_sitemap` and `+not-found` routes
    #[serde(default = "default_false")]
    pub skip_generated: bool,

    /// Omit loader references from the output tree
    #[serde(default = "default_false")]
    pub strip_load_route: bool,

    /// Skip entry point and initial route computation
    #[serde(default = "default_false")]
    pub ignore_entry_points: bool,

    /// Whether platform-suffixed files take part at all
    #[serde(default = "default_true")]
    pub platform_routes: bool,

    #[serde(default = "default_true")]
    pub sitemap: bool,

    #[serde(default = "default_true")]
    pub not_found: bool,

    /// Extra regex patterns; matching manifest keys are ignored
    #[serde(default)]
    pub ignore: Vec<String>,
}

/// Options consumed by the navigation-state helpers
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct NavigationConfig {
    /// Prefix stripped from locations before normalization (e.g. "/app")
    #[serde(default)]
    pub base_path: Option<String>,
}

fn default_true() -> bool {
    true
}

fn default_false() -> bool {
    false
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            platform: Platform::default(),
            skip_generated: false,
            strip_load_route: false,
            ignore_entry_points: false,
            platform_routes: true,
            sitemap: true,
            not_found: true,
            ignore: Vec::new(),
        }
    }
}

impl RoutingConfig {
    pub fn with_platform(mut self, platform: Platform) -> Self {
        self.platform = platform;
        self
    }

    pub fn with_skip_generated(mut self, skip: bool) -> Self {
        self.skip_generated = skip;
        self
    }

    pub fn with_strip_load_route(mut self, strip: bool) -> Self {
        self.strip_load_route = strip;
        self
    }

    pub fn with_ignore_entry_points(mut self, ignore: bool) -> Self {
        self.ignore_entry_points = ignore;
        self
    }

    pub fn with_platform_routes(mut self, enabled: bool) -> Self {
        self.platform_routes = enabled;
        self
    }

    pub fn with_ignore(mut self, pattern: impl Into<String>) -> Self {
        self.ignore.push(pattern.into());
        self
    }
}

impl RouterConfig {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        // Missing file means defaults
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;

        Self::from_toml_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path))
    }

    /// Parse configuration from an in-memory TOML document
    pub fn from_toml_str(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: RouterConfig = toml::from_str(content)?;
        Ok(config)
    }

    /// Load configuration from the default path (./router.toml)
    pub fn load_default() -> Result<Self> {
        Self::load("router.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = RouterConfig::default();
        assert_eq!(config.routing.platform, Platform::None);
        assert!(!config.routing.skip_generated);
        assert!(config.routing.platform_routes);
        assert!(config.routing.sitemap);
        assert!(config.routing.not_found);
        assert_eq!(config.navigation.base_path, None);
    }

    #[test]
    fn test_empty_config() {
        let config = RouterConfig::from_toml_str("   ").unwrap();
        assert_eq!(config, RouterConfig::default());
    }

    #[test]
    fn test_custom_routing() {
        let toml = r#"
            [routing]
            platform = "ios"
            skip_generated = true
            strip_load_route = true
            ignore = ["\\.test\\."]

            [navigation]
            base_path = "/one/two"
        "#;
        let config = RouterConfig::from_toml_str(toml).unwrap();
        assert_eq!(config.routing.platform, Platform::Ios);
        assert!(config.routing.skip_generated);
        assert!(config.routing.strip_load_route);
        assert_eq!(config.routing.ignore, vec!["\\.test\\.".to_string()]);
        assert_eq!(config.navigation.base_path.as_deref(), Some("/one/two"));
    }

    #[test]
    fn test_platform_none_literal() {
        let config = RouterConfig::from_toml_str("[routing]\nplatform = \"none\"").unwrap();
        assert_eq!(config.routing.platform, Platform::None);
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let config = RouterConfig::load("definitely/not/here/router.toml").unwrap();
        assert_eq!(config, RouterConfig::default());
    }
}
