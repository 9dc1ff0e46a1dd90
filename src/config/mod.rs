//! Affiliate configuration
//!
//! Configuration is an explicit value passed into every conversion call,
//! never a process-wide singleton. Values come from `BEANLINK_*` environment
//! variables (a `.env` file is loaded at startup), and the CLI overrides
//! individual fields per invocation.

use serde::{Deserialize, Serialize};

use crate::errors::{BeanlinkError, Result};

/// Default affiliate identifier used when none is configured
pub const DEFAULT_AFFILIATE_ID: &str = "17362210029";
/// Default campaign sub-identifier
pub const DEFAULT_SUB_ID: &str = "Web Tool";

/// Settings applied to a single link conversion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AffiliateConfig {
    /// Affiliate identifier (may already carry the `an_` prefix)
    pub affiliate_id: String,
    /// Optional campaign tag, emitted as `utm_content` when present
    pub sub_id: Option<String>,
    /// Selects the universal-link rewrite strategy; `false` = flat append
    pub universal_link_enabled: bool,
    /// Whether `utm_source` is normalized to carry the `an_` prefix.
    ///
    /// Source revisions disagree on this, so it is a policy flag rather
    /// than fixed behavior.
    pub normalize_source_prefix: bool,
}

impl Default for AffiliateConfig {
    fn default() -> Self {
        Self {
            affiliate_id: DEFAULT_AFFILIATE_ID.to_string(),
            sub_id: Some(DEFAULT_SUB_ID.to_string()),
            universal_link_enabled: true,
            normalize_source_prefix: true,
        }
    }
}

impl AffiliateConfig {
    /// Load configuration from `BEANLINK_*` environment variables,
    /// falling back to defaults for anything unset.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let sub_id = match std::env::var("BEANLINK_SUB_ID") {
            Ok(s) if s.trim().is_empty() => None,
            Ok(s) => Some(s),
            Err(_) => defaults.sub_id,
        };
        Self {
            affiliate_id: std::env::var("BEANLINK_AFFILIATE_ID")
                .unwrap_or(defaults.affiliate_id),
            sub_id,
            universal_link_enabled: bool_env("BEANLINK_UNIVERSAL_LINK", true),
            normalize_source_prefix: bool_env("BEANLINK_NORMALIZE_SOURCE_PREFIX", true),
        }
    }

    /// Reject configurations that cannot produce a tagged link.
    pub fn validate(&self) -> Result<()> {
        if self.affiliate_id.trim().is_empty() {
            return Err(BeanlinkError::config("affiliate id must not be empty"));
        }
        Ok(())
    }
}

/// Parse a boolean environment variable, keeping the default on anything
/// unset or unrecognized.
fn bool_env(name: &str, default: bool) -> bool {
    match std::env::var(name) {
        Ok(value) => match value.trim().to_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => true,
            "0" | "false" | "no" | "off" => false,
            other => {
                tracing::warn!("Ignoring unrecognized value for {}: {:?}", name, other);
                default
            }
        },
        Err(_) => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AffiliateConfig::default();
        assert_eq!(config.affiliate_id, DEFAULT_AFFILIATE_ID);
        assert_eq!(config.sub_id.as_deref(), Some(DEFAULT_SUB_ID));
        assert!(config.universal_link_enabled);
        assert!(config.normalize_source_prefix);
    }

    #[test]
    fn test_validate_rejects_empty_affiliate_id() {
        let config = AffiliateConfig {
            affiliate_id: "   ".to_string(),
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(matches!(err, BeanlinkError::Config(_)));
        assert_eq!(err.code(), "E007");
    }

    #[test]
    fn test_validate_accepts_default() {
        assert!(AffiliateConfig::default().validate().is_ok());
    }

    #[test]
    fn test_config_serde_round_trip() {
        let config = AffiliateConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains("affiliateId"));
        assert!(json.contains("universalLinkEnabled"));
        let back: AffiliateConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }
}
