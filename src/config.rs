use std::env;
use std::time::Duration;

use crate::error::{AppError, AppResult};

pub const DEFAULT_API_BASE: &str = "https://api.atlassian.com";
pub const DEFAULT_OWNER_FIELD: &str = "customfield_10088";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Raw view of the tracker settings as found in the environment.
///
/// Every field is optional here; `AppConfig::from_env` decides what is
/// required. Empty values are treated as unset.
#[derive(Debug, Clone, Default)]
pub struct EnvConfig {
    pub jira_project: Option<String>,
    pub jira_cloud: Option<String>,
    pub jira_email: Option<String>,
    pub jira_token: Option<String>,
    pub jira_owner_field: Option<String>,
    pub jira_api_base: Option<String>,
    pub jira_timeout_secs: Option<String>,
}

impl EnvConfig {
    pub fn load() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        Self {
            jira_project: read("JIRA_PROJECT"),
            jira_cloud: read("JIRA_CLOUD"),
            jira_email: read("JIRA_EMAIL"),
            jira_token: read("JIRA_TOKEN"),
            jira_owner_field: read("JIRA_OWNER_FIELD"),
            jira_api_base: read("JIRA_API_BASE"),
            jira_timeout_secs: read("JIRA_TIMEOUT_SECS"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub jira: JiraSettings,
}

#[derive(Debug, Clone)]
pub struct JiraSettings {
    pub api_base: String,
    pub cloud_id: String,
    pub project_key: String,
    pub email: String,
    pub token: String,
    pub owner_field: String,
    pub timeout: Duration,
}

impl AppConfig {
    pub fn load() -> AppResult<Self> {
        Self::from_env(EnvConfig::load())
    }

    pub fn from_env(env: EnvConfig) -> AppResult<Self> {
        let project_key = required(env.jira_project, "JIRA_PROJECT")?;
        let cloud_id = required(env.jira_cloud, "JIRA_CLOUD")?;
        let email = required(env.jira_email, "JIRA_EMAIL")?;
        let token = required(env.jira_token, "JIRA_TOKEN")?;

        let timeout_secs = match env.jira_timeout_secs {
            Some(raw) => match raw.parse::<u64>() {
                Ok(secs) if secs > 0 => secs,
                _ => {
                    return Err(AppError::Configuration(format!(
                        "JIRA_TIMEOUT_SECS must be a positive integer, got '{raw}'"
                    )));
                }
            },
            None => DEFAULT_TIMEOUT_SECS,
        };

        Ok(Self {
            jira: JiraSettings {
                api_base: env
                    .jira_api_base
                    .unwrap_or_else(|| DEFAULT_API_BASE.to_string()),
                cloud_id,
                project_key,
                email,
                token,
                owner_field: env
                    .jira_owner_field
                    .unwrap_or_else(|| DEFAULT_OWNER_FIELD.to_string()),
                timeout: Duration::from_secs(timeout_secs),
            },
        })
    }
}

fn required(value: Option<String>, key: &str) -> AppResult<String> {
    value.ok_or_else(|| {
        AppError::Configuration(format!("missing required environment variable: {key}"))
    })
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn env_from(pairs: &[(&str, &str)]) -> EnvConfig {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        EnvConfig::from_lookup(|key| map.get(key).cloned())
    }

    const COMPLETE: &[(&str, &str)] = &[
        ("JIRA_PROJECT", "GEN"),
        ("JIRA_CLOUD", "cloud-1"),
        ("JIRA_EMAIL", "bot@example.com"),
        ("JIRA_TOKEN", "secret-token"),
    ];

    #[test]
    fn applies_defaults() {
        let config = AppConfig::from_env(env_from(COMPLETE)).unwrap();
        assert_eq!(config.jira.project_key, "GEN");
        assert_eq!(config.jira.api_base, DEFAULT_API_BASE);
        assert_eq!(config.jira.owner_field, DEFAULT_OWNER_FIELD);
        assert_eq!(config.jira.timeout, Duration::from_secs(10));
    }

    #[test]
    fn fails_fast_on_missing_token() {
        let pairs: Vec<_> = COMPLETE
            .iter()
            .copied()
            .filter(|(key, _)| *key != "JIRA_TOKEN")
            .collect();
        let err = AppConfig::from_env(env_from(&pairs)).unwrap_err();
        assert!(err.to_string().contains("JIRA_TOKEN"));
    }

    #[test]
    fn blank_values_count_as_missing() {
        let mut pairs = COMPLETE.to_vec();
        pairs[0] = ("JIRA_PROJECT", "   ");
        let err = AppConfig::from_env(env_from(&pairs)).unwrap_err();
        assert!(matches!(err, AppError::Configuration(msg) if msg.contains("JIRA_PROJECT")));
    }

    #[test]
    fn rejects_zero_timeout() {
        let mut pairs = COMPLETE.to_vec();
        pairs.push(("JIRA_TIMEOUT_SECS", "0"));
        assert!(AppConfig::from_env(env_from(&pairs)).is_err());
    }

    #[test]
    fn honours_overrides() {
        let mut pairs = COMPLETE.to_vec();
        pairs.push(("JIRA_OWNER_FIELD", "customfield_20000"));
        pairs.push(("JIRA_API_BASE", "http://localhost:9999"));
        pairs.push(("JIRA_TIMEOUT_SECS", "3"));
        let config = AppConfig::from_env(env_from(&pairs)).unwrap();
        assert_eq!(config.jira.owner_field, "customfield_20000");
        assert_eq!(config.jira.api_base, "http://localhost:9999");
        assert_eq!(config.jira.timeout, Duration::from_secs(3));
    }
}
