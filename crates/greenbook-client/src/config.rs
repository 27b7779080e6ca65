//! Endpoint configuration resolved per deployment environment.
//!
//! Two distinct bases are in play: the primary application API and a
//! secondary analysis/verification API on another port. Environment
//! variables override the built-in defaults.
//!
//! Priority: explicit override variables > `GREENBOOK_ENV` defaults.

use serde::{Deserialize, Serialize};
use std::env;

const DEV_API_URL: &str = "http://localhost:8000";
const DEV_ANALYSIS_URL: &str = "http://localhost:8002";
const PROD_API_URL: &str = "https://api.greenbook.example.com";
const PROD_ANALYSIS_URL: &str = "https://analysis.greenbook.example.com";

/// Deployment environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Production,
}

impl Environment {
    /// Reads `GREENBOOK_ENV`; anything other than `production` is
    /// development.
    pub fn from_env() -> Self {
        match env::var("GREENBOOK_ENV").as_deref() {
            Ok("production") => Self::Production,
            _ => Self::Development,
        }
    }
}

/// Resolved base URLs for the two backend services.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Primary application API base URL.
    pub api_base_url: String,
    /// Analysis/verification API base URL.
    pub analysis_base_url: String,
}

impl ApiConfig {
    /// Defaults for the given environment.
    pub fn for_environment(environment: Environment) -> Self {
        match environment {
            Environment::Development => Self {
                api_base_url: DEV_API_URL.to_string(),
                analysis_base_url: DEV_ANALYSIS_URL.to_string(),
            },
            Environment::Production => Self {
                api_base_url: PROD_API_URL.to_string(),
                analysis_base_url: PROD_ANALYSIS_URL.to_string(),
            },
        }
    }

    /// Environment defaults with `GREENBOOK_API_URL` /
    /// `GREENBOOK_ANALYSIS_URL` overrides applied.
    pub fn from_env() -> Self {
        let mut config = Self::for_environment(Environment::from_env());
        if let Ok(url) = env::var("GREENBOOK_API_URL") {
            config.api_base_url = url;
        }
        if let Ok(url) = env::var("GREENBOOK_ANALYSIS_URL") {
            config.analysis_base_url = url;
        }
        config
    }

    /// Config pointing both services at one base, used by tests.
    pub fn single_base(base: impl Into<String>) -> Self {
        let base = base.into();
        Self {
            analysis_base_url: base.clone(),
            api_base_url: base,
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::for_environment(Environment::Development)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_differ_per_environment() {
        let dev = ApiConfig::for_environment(Environment::Development);
        let prod = ApiConfig::for_environment(Environment::Production);
        assert_eq!(dev.api_base_url, "http://localhost:8000");
        assert_eq!(dev.analysis_base_url, "http://localhost:8002");
        assert_ne!(dev, prod);
        assert!(prod.api_base_url.starts_with("https://"));
    }
}
