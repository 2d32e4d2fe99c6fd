//! Configuration types.

use std::time::Duration;

use crate::error::ConfigError;

/// Endpoint the onboarding report is posted to.
pub const DEFAULT_ANALYTICS_URL: &str = "https://analytics.strapi.io/register";

/// Survey configuration.
#[derive(Debug, Clone)]
pub struct SurveyConfig {
    /// Analytics endpoint receiving the `POST`.
    pub analytics_url: String,
    /// Per-request timeout for the report.
    pub report_timeout: Duration,
    /// Where the user is sent after submitting, or when redirected away.
    pub root_path: String,
}

impl Default for SurveyConfig {
    fn default() -> Self {
        Self {
            analytics_url: DEFAULT_ANALYTICS_URL.to_string(),
            report_timeout: Duration::from_secs(10),
            root_path: "/".to_string(),
        }
    }
}

impl SurveyConfig {
    /// Build config from environment variables, falling back to defaults.
    ///
    /// - `SURVEY_ANALYTICS_URL`: absolute http(s) URL
    /// - `SURVEY_REPORT_TIMEOUT_SECS`: positive integer
    /// - `SURVEY_ROOT_PATH`: must start with `/`
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let analytics_url = match std::env::var("SURVEY_ANALYTICS_URL") {
            Ok(url) => validate_url("SURVEY_ANALYTICS_URL", url.trim())?,
            Err(_) => defaults.analytics_url,
        };

        let report_timeout = match std::env::var("SURVEY_REPORT_TIMEOUT_SECS") {
            Ok(raw) => {
                let secs: u64 = raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
                    key: "SURVEY_REPORT_TIMEOUT_SECS".into(),
                    message: format!("expected whole seconds, got {raw:?}"),
                })?;
                if secs == 0 {
                    return Err(ConfigError::InvalidValue {
                        key: "SURVEY_REPORT_TIMEOUT_SECS".into(),
                        message: "must be greater than zero".into(),
                    });
                }
                Duration::from_secs(secs)
            }
            Err(_) => defaults.report_timeout,
        };

        let root_path = match std::env::var("SURVEY_ROOT_PATH") {
            Ok(path) if path.starts_with('/') => path,
            Ok(path) => {
                return Err(ConfigError::InvalidValue {
                    key: "SURVEY_ROOT_PATH".into(),
                    message: format!("must be an absolute path, got {path:?}"),
                });
            }
            Err(_) => defaults.root_path,
        };

        Ok(Self {
            analytics_url,
            report_timeout,
            root_path,
        })
    }
}

fn validate_url(key: &str, raw: &str) -> Result<String, ConfigError> {
    let url = reqwest::Url::parse(raw).map_err(|e| ConfigError::InvalidValue {
        key: key.to_string(),
        message: e.to_string(),
    })?;
    match url.scheme() {
        "http" | "https" => Ok(url.to_string()),
        other => Err(ConfigError::InvalidValue {
            key: key.to_string(),
            message: format!("unsupported scheme {other}"),
        }),
    }
}
