//! Robot web service client
//!
//! Implements the vSwitch endpoints of the Hetzner Robot web service:
//! `/vswitch` and `/vswitch/{id}`.

use crate::common::{decode, HttpClient};
use crate::error::RobotError;
use crate::models::*;
use crate::robot_trait::RobotClientTrait;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

/// Default Robot web service endpoint
pub const DEFAULT_ROBOT_URL: &str = "https://robot-ws.your-server.de";

/// Robot web service client
#[derive(Debug)]
pub struct RobotClient {
    http: HttpClient,
}

impl RobotClient {
    /// Create a new Robot client
    ///
    /// # Arguments
    /// * `base_url` - Robot web service URL (e.g., "https://robot-ws.your-server.de")
    /// * `username` - Web service username
    /// * `password` - Web service password
    pub fn new(base_url: String, username: String, password: String) -> Result<Self, RobotError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(RobotError::Http)?;

        Ok(Self::with_client(client, base_url, username, password))
    }

    /// Create a client around an existing `reqwest::Client`
    pub fn with_client(client: Client, base_url: String, username: String, password: String) -> Self {
        Self {
            http: HttpClient::new(client, base_url, username, password),
        }
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        self.http.base_url()
    }

    /// Validate the credentials by listing vSwitches.
    ///
    /// # Returns
    /// * `Ok(())` - Credentials are valid and the service is reachable
    /// * `Err(RobotError)` - Credentials are invalid or the service is unreachable
    pub async fn validate_credentials(&self) -> Result<(), RobotError> {
        debug!("Validating Robot credentials and connectivity");
        let _: serde_json::Value = self.http.get("/vswitch").await?;
        debug!("Credentials validated successfully");
        Ok(())
    }

    /// Create a vSwitch
    ///
    /// # Arguments
    /// * `name` - vSwitch name
    /// * `vlan` - VLAN id
    ///
    /// # Returns
    /// * `Ok(VSwitchResponse)` - The created vSwitch, including its assigned id
    /// * `Err(RobotError)` - If the request fails or is rejected
    pub async fn create_vswitch(&self, name: &str, vlan: u16) -> Result<VSwitchResponse, RobotError> {
        debug!("Creating vSwitch {} (VLAN {})", name, vlan);
        let body = self.http.post_form("/vswitch", &VSwitchRequest { name, vlan }).await?;
        let envelope: VSwitchEnvelope = decode("/vswitch", &body)?;
        Ok(envelope.into())
    }

    /// Get a vSwitch by ID
    ///
    /// # Arguments
    /// * `id` - vSwitch ID
    ///
    /// # Returns
    /// * `Ok(VSwitchResponse)` - The vSwitch object
    /// * `Err(RobotError::NotFound)` - If no vSwitch has this ID
    pub async fn get_vswitch(&self, id: u64) -> Result<VSwitchResponse, RobotError> {
        debug!("Fetching vSwitch {} from Robot", id);
        let envelope: VSwitchEnvelope = self.http.get(&format!("/vswitch/{}", id)).await?;
        Ok(envelope.into())
    }

    /// Update name and VLAN of a vSwitch
    ///
    /// The service answers an update with an empty body, a plain `OK` or a
    /// vSwitch object depending on the deployment. Only the status counts;
    /// read the vSwitch with `get_vswitch` to see the result.
    ///
    /// # Arguments
    /// * `id` - vSwitch ID
    /// * `name` - New name
    /// * `vlan` - New VLAN id
    pub async fn update_vswitch(&self, id: u64, name: &str, vlan: u16) -> Result<(), RobotError> {
        let path = format!("/vswitch/{}", id);
        debug!("Updating vSwitch {}: name={}, vlan={}", id, name, vlan);

        let body = self.http.post_form(&path, &VSwitchRequest { name, vlan }).await?;
        debug!("vSwitch {} update acknowledged ({} byte answer ignored)", id, body.len());
        Ok(())
    }

    /// Cancel a vSwitch with immediate effect
    ///
    /// # Arguments
    /// * `id` - vSwitch ID
    pub async fn delete_vswitch(&self, id: u64) -> Result<(), RobotError> {
        debug!("Deleting vSwitch: {}", id);
        self.http
            .delete_form(
                &format!("/vswitch/{}", id),
                &CancelVSwitchRequest { cancellation_date: "now" },
            )
            .await
    }
}

#[async_trait::async_trait]
impl RobotClientTrait for RobotClient {
    fn base_url(&self) -> &str {
        self.base_url()
    }

    async fn validate_credentials(&self) -> Result<(), RobotError> {
        self.validate_credentials().await
    }

    async fn create_vswitch(&self, name: &str, vlan: u16) -> Result<VSwitchResponse, RobotError> {
        self.create_vswitch(name, vlan).await
    }

    async fn get_vswitch(&self, id: u64) -> Result<VSwitchResponse, RobotError> {
        self.get_vswitch(id).await
    }

    async fn update_vswitch(&self, id: u64, name: &str, vlan: u16) -> Result<(), RobotError> {
        self.update_vswitch(id, name, vlan).await
    }

    async fn delete_vswitch(&self, id: u64) -> Result<(), RobotError> {
        self.delete_vswitch(id).await
    }
}
