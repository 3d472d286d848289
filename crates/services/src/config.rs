use std::env;

use reqwest::Url;

use crate::error::ConfigError;

pub const DEFAULT_API_BASE_URL: &str = "https://exam.elevateegy.com/api/v1";

/// Where the exam API lives, plus an optional pre-issued session token.
#[derive(Clone, Debug)]
pub struct ApiConfig {
    pub base_url: Url,
    /// Token handed over by an external identity provider; skips the sign-in form.
    pub token: Option<String>,
}

impl ApiConfig {
    /// Build a config for `base_url`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidBaseUrl` if the value is not an http(s) URL.
    pub fn new(base_url: &str) -> Result<Self, ConfigError> {
        let invalid = |reason: String| ConfigError::InvalidBaseUrl {
            raw: base_url.to_string(),
            reason,
        };
        let parsed = Url::parse(base_url.trim()).map_err(|err| invalid(err.to_string()))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(invalid(format!("unsupported scheme {}", parsed.scheme())));
        }
        Ok(Self {
            base_url: parsed,
            token: None,
        })
    }

    /// Read `EXAM_API_BASE_URL` and `EXAM_API_TOKEN`, falling back to the public API.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidBaseUrl` if the configured URL does not parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        let base_url = env::var("EXAM_API_BASE_URL")
            .ok()
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_API_BASE_URL.into());
        let token = env::var("EXAM_API_TOKEN")
            .ok()
            .filter(|value| !value.trim().is_empty());
        Ok(Self::new(&base_url)?.with_token(token))
    }

    #[must_use]
    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token;
        self
    }

    /// Absolute URL for an endpoint path such as `questions` or `auth/signin`.
    #[must_use]
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.as_str().trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}
