//! Common utilities for the Robot client
//!
//! Provides the authenticated request plumbing shared by every endpoint.

use crate::error::RobotError;
use reqwest::{Client, Response};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

/// HTTP client wrapper with basic authentication
pub struct HttpClient {
    client: Client,
    base_url: String,
    username: String,
    password: String,
}

impl fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpClient")
            .field("base_url", &self.base_url)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

impl HttpClient {
    /// Create a new HTTP client wrapper
    pub fn new(client: Client, base_url: String, username: String, password: String) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            username,
            password,
        }
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build a full URL from a path
    pub fn build_url(&self, path: &str) -> String {
        if path.starts_with("http") {
            path.to_string()
        } else {
            format!("{}{}", self.base_url, path)
        }
    }

    /// Make a GET request and decode the JSON body
    pub async fn get<T: for<'de> Deserialize<'de>>(&self, path: &str) -> Result<T, RobotError> {
        let url = self.build_url(path);
        debug!("GET {}", url);

        let response = self.client
            .get(&url)
            .basic_auth(&self.username, Some(&self.password))
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(RobotError::Http)?;

        let body = Self::check_status(&format!("GET {}", path), response).await?;
        decode(path, &body)
    }

    /// Make a form-encoded POST request and return the raw body
    ///
    /// Some endpoints answer with an empty body, so decoding is up to the caller.
    pub async fn post_form<F: Serialize + ?Sized>(&self, path: &str, form: &F) -> Result<String, RobotError> {
        let url = self.build_url(path);
        debug!("POST {}", url);

        let response = self.client
            .post(&url)
            .basic_auth(&self.username, Some(&self.password))
            .header("Accept", "application/json")
            .form(form)
            .send()
            .await
            .map_err(RobotError::Http)?;

        Self::check_status(&format!("POST {}", path), response).await
    }

    /// Make a form-encoded DELETE request
    pub async fn delete_form<F: Serialize + ?Sized>(&self, path: &str, form: &F) -> Result<(), RobotError> {
        let url = self.build_url(path);
        debug!("DELETE {}", url);

        let response = self.client
            .delete(&url)
            .basic_auth(&self.username, Some(&self.password))
            .header("Accept", "application/json")
            .form(form)
            .send()
            .await
            .map_err(RobotError::Http)?;

        Self::check_status(&format!("DELETE {}", path), response).await?;
        Ok(())
    }

    /// Turn a non-success status into a classified error, otherwise return the body
    async fn check_status(context: &str, response: Response) -> Result<String, RobotError> {
        let status = response.status();
        let body = response.text().await.map_err(RobotError::Http)?;

        if !status.is_success() {
            return Err(RobotError::from_response(context, status.as_u16(), &body));
        }

        Ok(body)
    }
}

/// Decode a JSON body, keeping a prefix of the payload in the error for debugging
pub fn decode<T: for<'de> Deserialize<'de>>(path: &str, body: &str) -> Result<T, RobotError> {
    serde_json::from_str(body).map_err(|e| {
        debug!(
            "error decoding response body from {}: {} - Response (first 500 chars): {}",
            path,
            e,
            body.chars().take(500).collect::<String>()
        );
        RobotError::Serialization(e)
    })
}
