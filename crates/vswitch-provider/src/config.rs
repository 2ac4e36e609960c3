//! Provider configuration
//!
//! Credentials for the Robot web service come from explicit values or from
//! `HETZNERROBOT_USERNAME`, `HETZNERROBOT_PASSWORD` and `HETZNERROBOT_URL`.

use crate::attributes::VSwitchResource;
use crate::error::VSwitchError;
use crate::reconciler::VSwitchReconciler;
use robot_client::{RobotClient, DEFAULT_ROBOT_URL};
use serde::Deserialize;
use std::env;
use std::fmt;
use tracing::info;

pub const USERNAME_ENV: &str = "HETZNERROBOT_USERNAME";
pub const PASSWORD_ENV: &str = "HETZNERROBOT_PASSWORD";
pub const URL_ENV: &str = "HETZNERROBOT_URL";

/// Robot web service credentials and endpoint
#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct ProviderConfig {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    /// Unset means the public Robot endpoint
    #[serde(default)]
    pub url: Option<String>,
}

impl fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("url", &self.endpoint())
            .finish()
    }
}

impl ProviderConfig {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            url: None,
        }
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// URL the client talks to
    pub fn endpoint(&self) -> &str {
        self.url.as_deref().unwrap_or(DEFAULT_ROBOT_URL)
    }

    /// Read everything from the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from a variable lookup.
    ///
    /// Blank username and URL variables count as unset. The password is taken
    /// verbatim, whitespace included.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_blank = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        Self {
            username: non_blank(USERNAME_ENV).unwrap_or_default(),
            password: lookup(PASSWORD_ENV).unwrap_or_default(),
            url: non_blank(URL_ENV),
        }
    }

    /// Explicit values win; unset ones are filled from `fallback`
    pub fn with_fallback(self, fallback: ProviderConfig) -> Self {
        Self {
            username: if self.username.trim().is_empty() { fallback.username } else { self.username },
            password: if self.password.is_empty() { fallback.password } else { self.password },
            url: self.url.or(fallback.url),
        }
    }

    pub fn validate(&self) -> Result<(), VSwitchError> {
        if self.username.trim().is_empty() {
            return Err(VSwitchError::InvalidConfig(format!(
                "username is required (set it explicitly or via {})",
                USERNAME_ENV
            )));
        }
        if self.password.is_empty() {
            return Err(VSwitchError::InvalidConfig(format!(
                "password is required (set it explicitly or via {})",
                PASSWORD_ENV
            )));
        }
        let url = self.endpoint();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(VSwitchError::InvalidConfig(format!(
                "url must start with http:// or https://, got {:?}",
                url
            )));
        }
        Ok(())
    }

    /// Build the HTTP client and the resource that uses it
    pub fn configure(&self) -> Result<VSwitchResource, VSwitchError> {
        self.validate()?;

        let client = RobotClient::new(self.endpoint().to_string(), self.username.clone(), self.password.clone())
            .map_err(|e| VSwitchError::InvalidConfig(format!("Failed to create Robot client: {}", e)))?;
        info!("Configured Robot client for {}", self.endpoint());

        Ok(VSwitchResource::new(VSwitchReconciler::new(client)))
    }
}
