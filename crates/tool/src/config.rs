use roster_core::error::CoreError;
use roster_core::rotation::RotationLength;
use roster_core::types::TenantId;

/// Log output format for the tracing subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

/// Tool configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct ToolConfig {
    /// Rotation length used when a command does not pass `--rotation`.
    pub rotation_length: RotationLength,
    pub log_format: LogFormat,
    /// Tenant scope of the cache built by `load`.
    pub tenant_id: TenantId,
}

impl ToolConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var           | Default |
    /// |-------------------|---------|
    /// | `ROTATION_LENGTH` | `7`     |
    /// | `LOG_FORMAT`      | `text`  |
    /// | `TENANT_ID`       | `0`     |
    pub fn from_env() -> Result<Self, CoreError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, CoreError> {
        let rotation_days: u32 = lookup("ROTATION_LENGTH")
            .unwrap_or_else(|| "7".into())
            .trim()
            .parse()
            .map_err(|_| CoreError::Validation("ROTATION_LENGTH must be a valid u32".to_string()))?;
        let rotation_length = RotationLength::new(rotation_days)?;

        let log_format = match lookup("LOG_FORMAT")
            .unwrap_or_else(|| "text".into())
            .trim()
            .to_ascii_lowercase()
            .as_str()
        {
            "text" => LogFormat::Text,
            "json" => LogFormat::Json,
            other => {
                return Err(CoreError::Validation(format!(
                    "LOG_FORMAT must be 'text' or 'json', got '{other}'"
                )))
            }
        };

        let tenant_id: TenantId = lookup("TENANT_ID")
            .unwrap_or_else(|| "0".into())
            .trim()
            .parse()
            .map_err(|_| CoreError::Validation("TENANT_ID must be a valid i64".to_string()))?;

        Ok(Self {
            rotation_length,
            log_format,
            tenant_id,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use assert_matches::assert_matches;

    use super::*;

    fn load(vars: &[(&str, &str)]) -> Result<ToolConfig, CoreError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ToolConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_apply_when_unset() {
        let config = load(&[]).unwrap();
        assert_eq!(config.rotation_length.days(), 7);
        assert_eq!(config.log_format, LogFormat::Text);
        assert_eq!(config.tenant_id, 0);
    }

    #[test]
    fn values_are_read_from_environment() {
        let config = load(&[
            ("ROTATION_LENGTH", "24"),
            ("LOG_FORMAT", "JSON"),
            ("TENANT_ID", "3"),
        ])
        .unwrap();
        assert_eq!(config.rotation_length.days(), 24);
        assert_eq!(config.log_format, LogFormat::Json);
        assert_eq!(config.tenant_id, 3);
    }

    #[test]
    fn zero_rotation_length_is_rejected() {
        assert_matches!(
            load(&[("ROTATION_LENGTH", "0")]),
            Err(CoreError::InvalidArgument(_))
        );
    }

    #[test]
    fn malformed_values_are_rejected() {
        assert_matches!(load(&[("ROTATION_LENGTH", "week")]), Err(CoreError::Validation(_)));
        assert_matches!(load(&[("LOG_FORMAT", "xml")]), Err(CoreError::Validation(_)));
        assert_matches!(load(&[("TENANT_ID", "-")]), Err(CoreError::Validation(_)));
    }
}
