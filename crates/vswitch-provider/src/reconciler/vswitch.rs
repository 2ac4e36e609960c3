//! vSwitch lifecycle operations

use super::plan::{plan, Action};
use super::{DeleteOutcome, VSwitchReconciler};
use crate::error::{ErrorContext, Operation, VSwitchError};
use crate::mapper;
use crate::record::{DesiredVSwitch, VSwitch};
use tracing::{debug, error, info, warn};

impl VSwitchReconciler {
    /// Create a vSwitch from the declared fields.
    ///
    /// # Arguments
    /// * `desired` - Declared name and VLAN
    ///
    /// # Returns
    /// The complete record as the Robot service reports it, including the assigned id
    ///
    /// A transport failure is returned as is. The create may still have
    /// happened remotely, so it must not be repeated blindly.
    pub async fn create(&self, desired: &DesiredVSwitch) -> Result<VSwitch, VSwitchError> {
        let context = ErrorContext::new(Operation::Create, None);
        let desired = mapper::validate_desired(desired).map_err(|e| VSwitchError::invalid_input(context, e))?;

        info!("Creating vSwitch {} (VLAN {})", desired.name, desired.vlan);
        let raw = self
            .robot_client
            .create_vswitch(&desired.name, desired.vlan)
            .await
            .map_err(|e| {
                error!("Failed to create vSwitch {}: {}", desired.name, e);
                VSwitchError::from_robot(context, e)
            })?;

        let created_id = raw.id;
        let created = mapper::to_local(raw).map_err(|e| {
            // The create went through; only the answer is unusable
            error!(
                "vSwitch {} was created (id: {:?}) but the response cannot be mapped: {}",
                desired.name, created_id, e
            );
            VSwitchError::malformed(ErrorContext::new(Operation::Create, created_id), e)
        })?;

        if created.declared() != desired {
            warn!(
                "vSwitch {} created as {}/{} instead of {}/{}",
                created.id, created.name, created.vlan, desired.name, desired.vlan
            );
        }
        info!("Created vSwitch {} (ID: {}, VLAN {})", created.name, created.id, created.vlan);
        Ok(created)
    }

    /// Read the current state of a vSwitch.
    ///
    /// `NotFound` is returned as such; the caller decides whether the entity is gone.
    pub async fn read(&self, id: u64) -> Result<VSwitch, VSwitchError> {
        let vswitch = self.fetch(Operation::Read, id).await?;
        debug!("Read vSwitch {} ({}, VLAN {})", vswitch.id, vswitch.name, vswitch.vlan);
        Ok(vswitch)
    }

    /// Change name and VLAN, then re-read.
    ///
    /// The write itself yields no record; the returned one always comes from
    /// a `GET` issued after the write.
    pub async fn update(&self, id: u64, desired: &DesiredVSwitch) -> Result<VSwitch, VSwitchError> {
        let context = ErrorContext::new(Operation::Update, Some(id));
        let desired = mapper::validate_desired(desired).map_err(|e| VSwitchError::invalid_input(context, e))?;

        info!("Updating vSwitch {} to {} (VLAN {})", id, desired.name, desired.vlan);
        self.robot_client
            .update_vswitch(id, &desired.name, desired.vlan)
            .await
            .map_err(|e| {
                error!("Failed to update vSwitch {}: {}", id, e);
                VSwitchError::from_robot(context, e)
            })?;

        let updated = self.fetch(Operation::Update, id).await?;
        if updated.declared() != desired {
            warn!(
                "vSwitch {} reports {}/{} after update to {}/{}",
                id, updated.name, updated.vlan, desired.name, desired.vlan
            );
        }
        info!("Updated vSwitch {}", id);
        Ok(updated)
    }

    /// Cancel a vSwitch. A vSwitch that no longer exists counts as deleted.
    pub async fn delete(&self, id: u64) -> Result<DeleteOutcome, VSwitchError> {
        let context = ErrorContext::new(Operation::Delete, Some(id));
        info!("Deleting vSwitch {}", id);

        match self.robot_client.delete_vswitch(id).await {
            Ok(()) => {
                info!("Deleted vSwitch {}", id);
                Ok(DeleteOutcome::Deleted)
            }
            Err(e) => match VSwitchError::from_robot(context, e) {
                err if err.is_not_found() => {
                    warn!("vSwitch {} already absent, nothing to delete", id);
                    Ok(DeleteOutcome::AlreadyAbsent)
                }
                err => {
                    error!("Failed to delete vSwitch {}: {}", id, err);
                    Err(err)
                }
            },
        }
    }

    /// Adopt an existing vSwitch. Every field, declared ones included, comes from the remote read.
    pub async fn import(&self, id: u64) -> Result<VSwitch, VSwitchError> {
        info!("Importing vSwitch {}", id);
        let vswitch = self.fetch(Operation::Import, id).await?;
        info!(
            "Imported vSwitch {} ({}, VLAN {}, {} servers, {} subnets, {} cloud networks)",
            vswitch.id,
            vswitch.name,
            vswitch.vlan,
            vswitch.servers.len(),
            vswitch.subnets.len(),
            vswitch.cloud_networks.len()
        );
        Ok(vswitch)
    }

    /// Converge a vSwitch toward the declared fields.
    ///
    /// # Arguments
    /// * `desired` - Declared name and VLAN
    /// * `tracked_id` - Id from the last known state, if any
    ///
    /// # Returns
    /// The record after convergence. A tracked vSwitch that vanished remotely is recreated.
    pub async fn reconcile(&self, desired: &DesiredVSwitch, tracked_id: Option<u64>) -> Result<VSwitch, VSwitchError> {
        let normalized = mapper::validate_desired(desired)
            .map_err(|e| VSwitchError::invalid_input(ErrorContext::new(Operation::Reconcile, tracked_id), e))?;

        let observed = match tracked_id {
            Some(id) => match self.fetch(Operation::Reconcile, id).await {
                Ok(vswitch) => Some(vswitch),
                Err(e) if e.is_not_found() => {
                    warn!("vSwitch {} was deleted in Robot, will recreate", id);
                    None
                }
                Err(e) => return Err(e),
            },
            None => None,
        };

        match (plan(&normalized, observed.as_ref()), observed) {
            (Action::Noop { id }, Some(current)) => {
                debug!("vSwitch {} is up to date", id);
                Ok(current)
            }
            (Action::Update { id }, current) => {
                if let Some(current) = current {
                    warn!(
                        "vSwitch {} drifted: {}/{} declared, {}/{} in Robot",
                        id, normalized.name, normalized.vlan, current.name, current.vlan
                    );
                }
                self.update(id, &normalized).await
            }
            _ => self.create(&normalized).await,
        }
    }
}
