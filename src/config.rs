use reqwest::Url;
use std::env;
use std::fmt;
use thiserror::Error;

pub const TOKEN_VAR: &str = "TELEGRAM_BOT_TOKEN";
pub const WEB_APP_URL_VAR: &str = "WEB_APP_URL";
/// Vercel exposes the deployment host under this name, without a scheme.
pub const VERCEL_URL_VAR: &str = "VERCEL_URL";
pub const WELCOME_TEXT_VAR: &str = "BOT_WELCOME_TEXT";
pub const BUTTON_TEXT_VAR: &str = "BOT_BUTTON_TEXT";
pub const POLL_TIMEOUT_VAR: &str = "POLL_TIMEOUT_SECS";

const DEFAULT_WELCOME_TEXT: &str =
    "Welcome to Boardify! Click the button below to open your task boards.";
const DEFAULT_BUTTON_TEXT: &str = "🚀 Open Boardify";
const DEFAULT_POLL_TIMEOUT_SECS: u32 = 30;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} environment variable is required")]
    Missing(&'static str),
    #[error("web app URL `{value}` is invalid: {reason}")]
    InvalidUrl { value: String, reason: String },
    #[error("{var} is invalid: {reason}")]
    Invalid { var: &'static str, reason: String },
}

#[derive(Clone)]
pub struct Config {
    pub telegram_token: String,
    pub web_app_url: Url,
    pub welcome_text: String,
    pub button_text: String,
    pub poll_timeout_secs: u32,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("telegram_token", &"<redacted>")
            .field("web_app_url", &self.web_app_url.as_str())
            .field("welcome_text", &self.welcome_text)
            .field("button_text", &self.button_text)
            .field("poll_timeout_secs", &self.poll_timeout_secs)
            .finish()
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary variable source.
    /// Blank values are treated the same as unset ones.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let telegram_token = get(TOKEN_VAR).ok_or(ConfigError::Missing(TOKEN_VAR))?;

        let raw_url = get(WEB_APP_URL_VAR)
            .or_else(|| get(VERCEL_URL_VAR))
            .ok_or(ConfigError::Missing(WEB_APP_URL_VAR))?;
        let web_app_url = parse_web_app_url(&raw_url)?;

        let poll_timeout_secs = match get(POLL_TIMEOUT_VAR) {
            Some(v) => v.parse().map_err(|e: std::num::ParseIntError| ConfigError::Invalid {
                var: POLL_TIMEOUT_VAR,
                reason: e.to_string(),
            })?,
            None => DEFAULT_POLL_TIMEOUT_SECS,
        };

        Ok(Self {
            telegram_token,
            web_app_url,
            welcome_text: get(WELCOME_TEXT_VAR).unwrap_or_else(|| DEFAULT_WELCOME_TEXT.to_string()),
            button_text: get(BUTTON_TEXT_VAR).unwrap_or_else(|| DEFAULT_BUTTON_TEXT.to_string()),
            poll_timeout_secs,
        })
    }
}

/// Telegram only opens web apps served over https. A bare host gets the scheme added.
fn parse_web_app_url(raw: &str) -> Result<Url, ConfigError> {
    let candidate = if raw.contains("://") {
        raw.to_string()
    } else {
        format!("https://{}", raw)
    };

    let invalid = |reason: String| ConfigError::InvalidUrl {
        value: raw.to_string(),
        reason,
    };

    let url = Url::parse(&candidate).map_err(|e| invalid(e.to_string()))?;
    if url.scheme() != "https" {
        return Err(invalid(format!("scheme must be https, got {}", url.scheme())));
    }
    if url.host_str().map_or(true, str::is_empty) {
        return Err(invalid("missing host".to_string()));
    }

    Ok(url)
}
