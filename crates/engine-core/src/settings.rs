use crate::{error::SettingsError, retry::RetryPolicy};
use serde::{Deserialize, Serialize};
use std::{str::FromStr, time::Duration};

pub const ENV_CREATE_CONCURRENCY: &str = "UDF_CREATE_CONCURRENCY";
pub const ENV_RECOVER_CONFLICTS: &str = "UDF_RECOVER_CONFLICTS";
pub const ENV_RETRY_ATTEMPTS: &str = "UDF_RETRY_ATTEMPTS";
pub const ENV_RETRY_BASE_DELAY_MS: &str = "UDF_RETRY_BASE_DELAY_MS";
pub const ENV_RETRY_MAX_DELAY_MS: &str = "UDF_RETRY_MAX_DELAY_MS";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProvisionSettings {
    /// Upper bound on concurrent `create_function` calls per resolve.
    pub create_concurrency: usize,
    /// Treat a duplicate-id conflict as "someone else created it" and refetch.
    pub recover_conflicts: bool,
    pub retry_attempts: usize,
    pub retry_base_delay_ms: u64,
    pub retry_max_delay_ms: u64,
}

impl Default for ProvisionSettings {
    fn default() -> Self {
        let retry = RetryPolicy::default();
        Self {
            create_concurrency: 4,
            recover_conflicts: true,
            retry_attempts: retry.max_attempts,
            retry_base_delay_ms: retry.base_delay.as_millis() as u64,
            retry_max_delay_ms: retry.max_delay.as_millis() as u64,
        }
    }
}

impl ProvisionSettings {
    /// Defaults overridden by the `UDF_*` environment variables that are set.
    pub fn from_env() -> Result<Self, SettingsError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, SettingsError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut settings = Self::default();

        if let Some(value) = lookup(ENV_CREATE_CONCURRENCY) {
            settings.create_concurrency = parse_number(ENV_CREATE_CONCURRENCY, &value)?;
            if settings.create_concurrency == 0 {
                return Err(SettingsError::InvalidValue {
                    key: ENV_CREATE_CONCURRENCY,
                    value,
                    reason: "must be at least 1".into(),
                });
            }
        }
        if let Some(value) = lookup(ENV_RECOVER_CONFLICTS) {
            settings.recover_conflicts = parse_bool(ENV_RECOVER_CONFLICTS, &value)?;
        }
        if let Some(value) = lookup(ENV_RETRY_ATTEMPTS) {
            settings.retry_attempts = parse_number(ENV_RETRY_ATTEMPTS, &value)?;
        }
        if let Some(value) = lookup(ENV_RETRY_BASE_DELAY_MS) {
            settings.retry_base_delay_ms = parse_number(ENV_RETRY_BASE_DELAY_MS, &value)?;
        }
        if let Some(value) = lookup(ENV_RETRY_MAX_DELAY_MS) {
            settings.retry_max_delay_ms = parse_number(ENV_RETRY_MAX_DELAY_MS, &value)?;
        }

        Ok(settings)
    }

    pub fn with_create_concurrency(mut self, limit: usize) -> Self {
        self.create_concurrency = limit;
        self
    }

    pub fn with_recover_conflicts(mut self, recover: bool) -> Self {
        self.recover_conflicts = recover;
        self
    }

    pub fn with_retry(mut self, policy: &RetryPolicy) -> Self {
        self.retry_attempts = policy.max_attempts;
        self.retry_base_delay_ms = policy.base_delay.as_millis() as u64;
        self.retry_max_delay_ms = policy.max_delay.as_millis() as u64;
        self
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(
            self.retry_attempts,
            Duration::from_millis(self.retry_base_delay_ms),
            Duration::from_millis(self.retry_max_delay_ms),
        )
    }
}

fn parse_number<T>(key: &'static str, value: &str) -> Result<T, SettingsError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value
        .trim()
        .parse()
        .map_err(|e: T::Err| SettingsError::InvalidValue {
            key,
            value: value.to_string(),
            reason: e.to_string(),
        })
}

fn parse_bool(key: &'static str, value: &str) -> Result<bool, SettingsError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(SettingsError::InvalidValue {
            key,
            value: value.to_string(),
            reason: "expected a boolean".into(),
        }),
    }
}
