//! RobotClient trait for mocking
//!
//! This trait abstracts the RobotClient to enable mocking in unit tests.
//! The concrete RobotClient implements this trait, and tests can use mock implementations.

use crate::error::RobotError;
use crate::models::VSwitchResponse;

/// Trait for Robot web service vSwitch operations
///
/// All async methods must be `Send` to work with Tokio's work-stealing runtime.
/// Every operation except `create_vswitch` addresses the vSwitch by its numeric id.
#[async_trait::async_trait]
pub trait RobotClientTrait: Send + Sync {
    /// Get the base URL
    fn base_url(&self) -> &str;

    /// Validate the web service credentials
    async fn validate_credentials(&self) -> Result<(), RobotError>;

    async fn create_vswitch(&self, name: &str, vlan: u16) -> Result<VSwitchResponse, RobotError>;
    async fn get_vswitch(&self, id: u64) -> Result<VSwitchResponse, RobotError>;

    /// Change name and VLAN. Nothing is returned: the answer to the write is
    /// not a usable representation, so callers read the vSwitch afterwards.
    async fn update_vswitch(&self, id: u64, name: &str, vlan: u16) -> Result<(), RobotError>;

    /// Cancel the vSwitch immediately
    async fn delete_vswitch(&self, id: u64) -> Result<(), RobotError>;
}
