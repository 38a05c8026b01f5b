//! Configuration types for SkillSwap

use serde::{Deserialize, Serialize};
use skillswap_domain::{MAX_DURATION_MINUTES, MIN_DURATION_MINUTES};
use std::path::Path;

use crate::error::{Result, SkillswapError};

/// Longest reminder lead accepted from configuration: one week
pub const MAX_REMINDER_LEAD_MINUTES: i64 = 7 * 24 * 60;

/// Marketplace-wide settings
///
/// Every field has a default, so an empty file is a valid configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarketplaceConfig {
    /// Session length used when a request doesn't propose one
    pub default_duration_minutes: u32,

    /// Minimum password length accepted at registration
    pub min_password_length: usize,

    /// `tracing` filter used when `RUST_LOG` is unset
    pub log_filter: String,

    pub notifications: NotificationSettings,
}

impl Default for MarketplaceConfig {
    fn default() -> Self {
        Self {
            default_duration_minutes: 60,
            min_password_length: 8,
            log_filter: "info".to_string(),
            notifications: NotificationSettings::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NotificationSettings {
    /// When false, lifecycle events are not recorded as notifications
    pub enabled: bool,

    /// How far ahead of a session its reminder is emitted
    pub reminder_lead_minutes: i64,
}

impl Default for NotificationSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            reminder_lead_minutes: 60,
        }
    }
}

impl MarketplaceConfig {
    /// Load configuration from a YAML or JSON file, chosen by extension
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = match path.extension().and_then(|ext| ext.to_str()) {
            Some("yaml") | Some("yml") => serde_yaml::from_str(&content)?,
            Some("json") => serde_json::from_str(&content)?,
            _ => {
                return Err(SkillswapError::Config(format!(
                    "unsupported config format: {} (expected .yaml, .yml or .json)",
                    path.display()
                )))
            }
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !(MIN_DURATION_MINUTES..=MAX_DURATION_MINUTES).contains(&self.default_duration_minutes) {
            return Err(SkillswapError::Config(format!(
                "default_duration_minutes must be between {} and {}",
                MIN_DURATION_MINUTES, MAX_DURATION_MINUTES
            )));
        }
        if self.min_password_length == 0 {
            return Err(SkillswapError::Config(
                "min_password_length must be positive".to_string(),
            ));
        }
        let lead = self.notifications.reminder_lead_minutes;
        if !(1..=MAX_REMINDER_LEAD_MINUTES).contains(&lead) {
            return Err(SkillswapError::Config(format!(
                "notifications.reminder_lead_minutes must be between 1 and {}",
                MAX_REMINDER_LEAD_MINUTES
            )));
        }
        Ok(())
    }
}
