//! Configuration types for the navigation session coordinator.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::Error;

/// Default route-calculation timeout in milliseconds.
pub const DEFAULT_ROUTE_TIMEOUT_MS: u64 = 30_000;

/// Coordinator configuration loaded from YAML file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CoordinatorConfig {
    /// Terms dialog settings
    pub terms: TermsSettings,
    /// Session creation settings
    pub session: SessionSettings,
    /// Route calculation settings
    pub route: RouteSettings,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
}

impl CoordinatorConfig {
    /// Load configuration from a YAML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse configuration from YAML string.
    pub fn from_yaml(yaml: &str) -> crate::Result<Self> {
        let config: CoordinatorConfig =
            serde_yaml::from_str(yaml).map_err(|e| Error::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values.
    pub fn validate(&self) -> crate::Result<()> {
        if self.route.timeout_ms == 0 {
            return Err(Error::Config("route.timeout_ms must be > 0".to_string()));
        }

        if self.terms.company_name.is_empty() && !self.terms.disclaimer_only {
            return Err(Error::Config(
                "terms.company_name is required unless terms.disclaimer_only is set".to_string(),
            ));
        }

        Ok(())
    }
}

/// Terms dialog settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TermsSettings {
    /// Dialog title
    pub title: String,
    /// Company name shown in the consent text
    pub company_name: String,
    /// Show only the disclaimer, without the full terms text
    pub disclaimer_only: bool,
}

impl Default for TermsSettings {
    fn default() -> Self {
        Self {
            title: "Terms and Conditions".to_string(),
            company_name: String::new(),
            disclaimer_only: true,
        }
    }
}

/// Session creation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionSettings {
    /// Whether the engine should report abnormal SDK terminations
    pub abnormal_termination_reporting: bool,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            abnormal_termination_reporting: true,
        }
    }
}

/// Route calculation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RouteSettings {
    /// Maximum time to wait for a route result, in milliseconds
    pub timeout_ms: u64,
}

impl Default for RouteSettings {
    fn default() -> Self {
        Self {
            timeout_ms: DEFAULT_ROUTE_TIMEOUT_MS,
        }
    }
}

impl Default for CoordinatorConfig {
    fn default() -> Self {
        Self {
            terms: TermsSettings::default(),
            session: SessionSettings::default(),
            route: RouteSettings::default(),
            log_level: "info".to_string(),
        }
    }
}
