//! Lifecycle reconciliation for vSwitches.
//!
//! - `vswitch`: create, read, update, delete, import and reconcile
//! - `plan`: pure decision of which remote operation moves observed state toward desired state
//!
//! The reconciler keeps no state between calls. Every operation reconstructs
//! what it needs from the Robot service, so one instance can serve any number
//! of vSwitch ids concurrently.

pub mod plan;
mod vswitch;


pub use plan::{plan, Action};

use crate::error::{ErrorContext, Operation, VSwitchError};
use crate::mapper;
use crate::record::VSwitch;
use robot_client::RobotClientTrait;
use std::fmt;
use tracing::{debug, error};

/// Result of a delete
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// The vSwitch existed and was cancelled
    Deleted,
    /// Nothing to delete; the vSwitch was already gone
    AlreadyAbsent,
}

/// Reconciles vSwitches against the Robot service.
pub struct VSwitchReconciler {
    pub(crate) robot_client: Box<dyn RobotClientTrait>,
}

impl fmt::Debug for VSwitchReconciler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VSwitchReconciler")
            .field("robot_url", &self.robot_client.base_url())
            .finish()
    }
}

impl VSwitchReconciler {
    /// Creates a new reconciler instance.
    pub fn new(robot_client: impl RobotClientTrait + 'static) -> Self {
        Self {
            robot_client: Box::new(robot_client),
        }
    }

    /// The gateway this reconciler talks to
    pub fn robot_client(&self) -> &dyn RobotClientTrait {
        self.robot_client.as_ref()
    }

    /// Fetch a vSwitch and map it to a complete record
    pub(crate) async fn fetch(&self, operation: Operation, id: u64) -> Result<VSwitch, VSwitchError> {
        let context = ErrorContext::new(operation, Some(id));
        debug!("Fetching vSwitch {} for {}", id, operation);

        let raw = self
            .robot_client
            .get_vswitch(id)
            .await
            .map_err(|e| VSwitchError::from_robot(context, e))?;

        mapper::to_local(raw).map_err(|e| {
            error!("vSwitch {} returned by Robot cannot be mapped: {}", id, e);
            VSwitchError::malformed(context, e)
        })
    }
}
