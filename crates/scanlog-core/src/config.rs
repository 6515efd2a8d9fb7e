//! Configuration module
//!
//! Client-side settings: where the scan service lives and the timing knobs of
//! the capture workflow. Everything has a default so a bare environment works.

use std::env;
use std::time::Duration;

use crate::constants::{DEFAULT_API_URL, LOCATION_TIMEOUT, REQUEST_TIMEOUT, SCAN_COOLDOWN};
use crate::error::ScanError;

#[derive(Clone, Debug, PartialEq)]
pub struct ClientConfig {
    pub api_url: String,
    pub request_timeout: Duration,
    pub location_timeout: Duration,
    pub scan_cooldown: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            request_timeout: REQUEST_TIMEOUT,
            location_timeout: LOCATION_TIMEOUT,
            scan_cooldown: SCAN_COOLDOWN,
        }
    }
}

impl ClientConfig {
    /// Load from the environment (and a `.env` file if present).
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary key lookup. Unset keys fall back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, anyhow::Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let api_url = lookup("SCANLOG_API_URL")
            .or_else(|| lookup("API_URL"))
            .unwrap_or(defaults.api_url);

        let request_timeout = parse_duration(
            &lookup,
            "SCANLOG_REQUEST_TIMEOUT_SECS",
            Duration::from_secs,
            defaults.request_timeout,
        )?;
        let location_timeout = parse_duration(
            &lookup,
            "SCANLOG_LOCATION_TIMEOUT_MS",
            Duration::from_millis,
            defaults.location_timeout,
        )?;
        let scan_cooldown = parse_duration(
            &lookup,
            "SCANLOG_SCAN_COOLDOWN_MS",
            Duration::from_millis,
            defaults.scan_cooldown,
        )?;

        let config = Self {
            api_url: api_url.trim_end_matches('/').to_string(),
            request_timeout,
            location_timeout,
            scan_cooldown,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn validate(&self) -> Result<(), ScanError> {
        if !(self.api_url.starts_with("http://") || self.api_url.starts_with("https://")) {
            return Err(ScanError::Config(format!(
                "API URL must start with http:// or https://, got '{}'",
                self.api_url
            )));
        }
        for (name, value) in [
            ("request timeout", self.request_timeout),
            ("location timeout", self.location_timeout),
            ("scan cooldown", self.scan_cooldown),
        ] {
            if value.is_zero() {
                return Err(ScanError::Config(format!("{} must be greater than zero", name)));
            }
        }
        Ok(())
    }
}

fn parse_duration<F>(
    lookup: &F,
    key: &str,
    unit: fn(u64) -> Duration,
    default: Duration,
) -> Result<Duration, anyhow::Error>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(raw) => {
            let value: u64 = raw
                .trim()
                .parse()
                .map_err(|e| anyhow::anyhow!("Invalid {} '{}': {}", key, raw, e))?;
            Ok(unit(value))
        }
        None => Ok(default),
    }
}
