use crate::{GatekitError, Result};

pub const ENV_APP_NAME: &str = "GATEKIT_APP_NAME";
pub const ENV_USER_ID: &str = "GATEKIT_USER_ID";
pub const ENV_APPROVAL_THRESHOLD: &str = "GATEKIT_APPROVAL_THRESHOLD";
pub const ENV_LOG: &str = "GATEKIT_LOG";

/// Process-wide configuration, constructed once at startup and passed down
/// explicitly. Validation is fail-fast: a bad environment terminates the
/// process before any session is created.
#[derive(Debug, Clone, PartialEq)]
pub struct GatekitConfig {
    pub app_name: String,
    pub user_id: String,
    /// Batch sizes at or under this value are auto-approved.
    pub approval_threshold: u64,
    /// Filter directive for the tracing subscriber.
    pub log_filter: String,
}

impl Default for GatekitConfig {
    fn default() -> Self {
        Self {
            app_name: "gatekeeper".to_string(),
            user_id: "user1".to_string(),
            approval_threshold: 5,
            log_filter: "info".to_string(),
        }
    }
}

impl GatekitConfig {
    /// Build from environment variables, falling back to defaults for unset
    /// keys. Callers that want `.env` support load it first (`dotenvy`).
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        let approval_threshold = match std::env::var(ENV_APPROVAL_THRESHOLD) {
            Ok(raw) => raw.trim().parse::<u64>().map_err(|_| {
                GatekitError::Config(format!(
                    "{ENV_APPROVAL_THRESHOLD} must be a positive integer, got '{raw}'"
                ))
            })?,
            Err(_) => defaults.approval_threshold,
        };

        let config = Self {
            app_name: std::env::var(ENV_APP_NAME).unwrap_or(defaults.app_name),
            user_id: std::env::var(ENV_USER_ID).unwrap_or(defaults.user_id),
            approval_threshold,
            log_filter: std::env::var(ENV_LOG).unwrap_or(defaults.log_filter),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.app_name.trim().is_empty() {
            return Err(GatekitError::Config("app_name must not be empty".to_string()));
        }
        if self.user_id.trim().is_empty() {
            return Err(GatekitError::Config("user_id must not be empty".to_string()));
        }
        if self.approval_threshold == 0 {
            return Err(GatekitError::Config(
                "approval_threshold must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = GatekitConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.approval_threshold, 5);
    }

    #[test]
    fn test_validate_rejects_empty_app_name() {
        let config = GatekitConfig { app_name: "  ".to_string(), ..Default::default() };
        assert!(matches!(config.validate(), Err(GatekitError::Config(_))));
    }

    #[test]
    fn test_validate_rejects_empty_user_id() {
        let config = GatekitConfig { user_id: String::new(), ..Default::default() };
        assert!(matches!(config.validate(), Err(GatekitError::Config(_))));
    }

    #[test]
    fn test_validate_rejects_zero_threshold() {
        let config = GatekitConfig { approval_threshold: 0, ..Default::default() };
        assert!(matches!(config.validate(), Err(GatekitError::Config(_))));
    }
}
