//! vSwitch Provider
//!
//! Lifecycle management of Hetzner Robot vSwitches under a desired-state model.
//! A caller declares `name` and `vlan`; the Robot service derives everything
//! else (cancellation status, attached servers, subnets, cloud networks).
//!
//! # Example
//!
//! ```no_run
//! use vswitch_provider::{DesiredVSwitch, ProviderConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let resource = ProviderConfig::from_env().configure()?;
//! let reconciler = resource.reconciler();
//!
//! let created = reconciler.create(&DesiredVSwitch::new("prod-switch", 4010)).await?;
//! let renamed = reconciler
//!     .update(created.id, &DesiredVSwitch::new("prod-switch-renamed", 4010))
//!     .await?;
//! reconciler.delete(renamed.id).await?;
//! # Ok(())
//! # }
//! ```
//!
//! # Modules
//!
//! - `reconciler`: create, read, update, delete, import and reconcile
//! - `mapper`: wire model to local record translation
//! - `attributes`: state-map boundary for the declarative engine
//! - `schema`: attribute tables for the resource and the data source
//! - `config`: credentials and client construction

pub mod attributes;
pub mod config;
pub mod error;
pub mod mapper;
pub mod reconciler;
pub mod record;
pub mod schema;

#[cfg(test)]
mod test_utils;

pub use attributes::VSwitchResource;
pub use config::ProviderConfig;
pub use error::{ErrorContext, ErrorKind, Operation, VSwitchError};
pub use reconciler::{plan, Action, DeleteOutcome, VSwitchReconciler};
pub use record::{AttachedServer, CloudNetwork, DesiredVSwitch, Subnet, VSwitch};
