//! Hetzner Robot Web Service Client
//!
//! A Rust client library for the vSwitch endpoints of the Hetzner Robot web service.
//! Provides type-safe wire models and async methods to create, fetch, update and
//! cancel vSwitches.
//!
//! # Example
//!
//! ```no_run
//! use robot_client::RobotClient;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! // Create a client
//! let client = RobotClient::new(
//!     "https://robot-ws.your-server.de".to_string(),
//!     "robot-user".to_string(),
//!     "robot-password".to_string(),
//! )?;
//!
//! // Create a vSwitch and read it back
//! let created = client.create_vswitch("prod-switch", 4010).await?;
//! let fetched = client.get_vswitch(created.id.unwrap_or_default()).await?;
//!
//! // Rename it, then cancel it
//! client.update_vswitch(created.id.unwrap_or_default(), "prod-switch-renamed", 4010).await?;
//! client.delete_vswitch(created.id.unwrap_or_default()).await?;
//! # let _ = fetched;
//! # Ok(())
//! # }
//! ```
//!
//! # Features
//!
//! - **vSwitch Operations**: create, get, update, cancel
//! - **Error Classification**: not-found, rejected, transient and decode failures are distinct
//! - **Mocking**: `MockRobotClient` behind the `test-util` feature

pub mod client;
pub mod common;
pub mod error;
pub mod models;
#[path = "trait.rs"]
pub mod robot_trait;
#[cfg(any(test, feature = "test-util"))]
pub mod mock;

pub use client::{RobotClient, DEFAULT_ROBOT_URL};
pub use common::HttpClient;
pub use error::RobotError;
pub use models::*;
pub use robot_trait::RobotClientTrait;
#[cfg(any(test, feature = "test-util"))]
pub use mock::{MockCall, MockFailure, MockOperation, MockRobotClient};
