//! Mock RobotClient for unit testing
//!
//! This module provides an in-memory implementation of RobotClientTrait that can be used
//! in unit tests without a Robot account.
//!
//! Besides plain storage the mock can simulate what happens on the remote side
//! between two calls (servers attached elsewhere, renames done in the web UI,
//! a cancellation in progress) and inject one-shot failures per operation.

mod helpers;

pub use helpers::{cloud_network_fixture, server_fixture, subnet_fixture, vswitch_fixture};

use crate::error::RobotError;
use crate::models::*;
use crate::robot_trait::RobotClientTrait;
use serde::de::Error as _;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// VLAN range the Robot service accepts for vSwitches
const VLAN_RANGE: std::ops::RangeInclusive<i64> = 4000..=4091;

/// A gateway call recorded by the mock
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockCall {
    ValidateCredentials,
    Create { name: String, vlan: u16 },
    Get { id: u64 },
    Update { id: u64, name: String, vlan: u16 },
    Delete { id: u64 },
}

/// Operation selector for failure injection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MockOperation {
    Create,
    Get,
    Update,
    Delete,
}

/// Failure to return from the next call of an operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockFailure {
    NotFound,
    Rejected { status: u16, code: String, message: String },
    Unavailable { status: u16, message: String },
    Authentication,
    /// The response body did not decode
    Garbled,
    /// The operation goes through, but the answer lacks `name`
    IncompleteAnswer,
}

impl MockFailure {
    fn into_error(self, context: String) -> RobotError {
        match self {
            MockFailure::NotFound => RobotError::NotFound(context),
            MockFailure::Rejected { status, code, message } => RobotError::Rejected { status, code, message },
            MockFailure::Unavailable { status, message } => RobotError::Unavailable { status, message },
            MockFailure::Authentication => RobotError::Authentication(context),
            MockFailure::Garbled => {
                RobotError::Serialization(serde_json::Error::custom(format!("{}: expected value at line 1 column 1", context)))
            }
            MockFailure::IncompleteAnswer => {
                RobotError::Serialization(serde_json::Error::custom(format!("{}: incomplete answer", context)))
            }
        }
    }
}

/// Mock RobotClient for testing
///
/// This mock stores vSwitches in memory in their wire form, so tests can also
/// seed records the service would never produce (missing or out-of-range fields).
#[derive(Debug, Clone)]
pub struct MockRobotClient {
    pub(crate) base_url: String,
    pub(crate) vswitches: Arc<Mutex<HashMap<u64, VSwitchResponse>>>,
    pub(crate) failures: Arc<Mutex<HashMap<MockOperation, MockFailure>>>,
    pub(crate) calls: Arc<Mutex<Vec<MockCall>>>,
    // Counter for generating IDs
    pub(crate) next_id: Arc<Mutex<u64>>,
}

impl MockRobotClient {
    /// Create a new mock client
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            vswitches: Arc::new(Mutex::new(HashMap::new())),
            failures: Arc::new(Mutex::new(HashMap::new())),
            calls: Arc::new(Mutex::new(Vec::new())),
            next_id: Arc::new(Mutex::new(1)),
        }
    }

    /// Set the id the next created vSwitch receives
    pub fn set_next_id(&self, id: u64) {
        *self.next_id.lock().unwrap() = id;
    }

    /// Add a vSwitch to the mock store (for test setup)
    pub fn add_vswitch(&self, vswitch: VSwitchResponse) {
        let id = vswitch.id.expect("fixture vSwitch needs an id");
        self.vswitches.lock().unwrap().insert(id, vswitch);
    }

    /// Current stored representation of a vSwitch
    pub fn vswitch(&self, id: u64) -> Option<VSwitchResponse> {
        self.vswitches.lock().unwrap().get(&id).cloned()
    }

    /// Number of stored vSwitches
    pub fn len(&self) -> usize {
        self.vswitches.lock().unwrap().len()
    }

    /// Whether the store is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Attach a server, as if done through the server's vSwitch settings
    pub fn attach_server(&self, id: u64, server: VSwitchServer) {
        self.modify(id, |v| v.server.get_or_insert_with(Vec::new).push(server));
    }

    /// Route a subnet to the vSwitch
    pub fn attach_subnet(&self, id: u64, subnet: VSwitchSubnet) {
        self.modify(id, |v| v.subnet.get_or_insert_with(Vec::new).push(subnet));
    }

    /// Couple a cloud network with the vSwitch
    pub fn attach_cloud_network(&self, id: u64, network: VSwitchCloudNetwork) {
        self.modify(id, |v| v.cloud_network.get_or_insert_with(Vec::new).push(network));
    }

    /// Mark the vSwitch as cancelled; later deletes are refused
    pub fn mark_cancelled(&self, id: u64) {
        self.modify(id, |v| v.cancelled = Some(true));
    }

    /// Change name and VLAN behind the caller's back
    pub fn edit_out_of_band(&self, id: u64, name: &str, vlan: u16) {
        self.modify(id, |v| {
            v.name = Some(name.to_string());
            v.vlan = Some(i64::from(vlan));
        });
    }

    /// Make the next call of `operation` fail
    pub fn fail_next(&self, operation: MockOperation, failure: MockFailure) {
        self.failures.lock().unwrap().insert(operation, failure);
    }

    /// All calls received so far, in order
    pub fn calls(&self) -> Vec<MockCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Forget recorded calls
    pub fn clear_calls(&self) {
        self.calls.lock().unwrap().clear();
    }

    fn modify(&self, id: u64, f: impl FnOnce(&mut VSwitchResponse)) {
        let mut store = self.vswitches.lock().unwrap();
        let vswitch = store
            .get_mut(&id)
            .unwrap_or_else(|| panic!("vSwitch {} not in mock store", id));
        f(vswitch);
    }

    fn record(&self, call: MockCall) {
        self.calls.lock().unwrap().push(call);
    }

    /// Apply an injected failure. `Ok(true)` means the answer must be returned without `name`.
    fn injected(&self, operation: MockOperation, context: String) -> Result<bool, RobotError> {
        match self.failures.lock().unwrap().remove(&operation) {
            Some(MockFailure::IncompleteAnswer) => Ok(true),
            Some(failure) => Err(failure.into_error(context)),
            None => Ok(false),
        }
    }

    fn check_input(&self, own_id: Option<u64>, name: &str, vlan: u16) -> Result<(), RobotError> {
        if name.trim().is_empty() {
            return Err(invalid_input("name"));
        }
        if !VLAN_RANGE.contains(&i64::from(vlan)) {
            return Err(invalid_input("vlan"));
        }
        let taken = self
            .vswitches
            .lock()
            .unwrap()
            .values()
            .any(|v| v.id != own_id && v.vlan == Some(i64::from(vlan)) && v.cancelled != Some(true));
        if taken {
            return Err(RobotError::Rejected {
                status: 409,
                code: "VSWITCH_VLAN_NOT_UNIQUE".to_string(),
                message: format!("VLAN {} is already in use", vlan),
            });
        }
        Ok(())
    }

    fn next_id(&self) -> u64 {
        let mut id = self.next_id.lock().unwrap();
        let current = *id;
        *id += 1;
        current
    }
}

fn invalid_input(field: &str) -> RobotError {
    RobotError::Rejected {
        status: 400,
        code: "INVALID_INPUT".to_string(),
        message: format!("invalid input: {}", field),
    }
}

fn answer(vswitch: VSwitchResponse, incomplete: bool) -> VSwitchResponse {
    if incomplete {
        VSwitchResponse { name: None, ..vswitch }
    } else {
        vswitch
    }
}

fn not_found(id: u64) -> RobotError {
    RobotError::NotFound(format!("vSwitch {} not found", id))
}

#[async_trait::async_trait]
impl RobotClientTrait for MockRobotClient {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn validate_credentials(&self) -> Result<(), RobotError> {
        self.record(MockCall::ValidateCredentials);
        Ok(())
    }

    async fn create_vswitch(&self, name: &str, vlan: u16) -> Result<VSwitchResponse, RobotError> {
        self.record(MockCall::Create { name: name.to_string(), vlan });
        let incomplete = self.injected(MockOperation::Create, "POST /vswitch".to_string())?;
        self.check_input(None, name, vlan)?;

        let id = self.next_id();
        let vswitch = vswitch_fixture(id, name, vlan);
        self.vswitches.lock().unwrap().insert(id, vswitch.clone());
        Ok(answer(vswitch, incomplete))
    }

    async fn get_vswitch(&self, id: u64) -> Result<VSwitchResponse, RobotError> {
        self.record(MockCall::Get { id });
        let incomplete = self.injected(MockOperation::Get, format!("GET /vswitch/{}", id))?;
        let vswitch = self.vswitch(id).ok_or_else(|| not_found(id))?;
        Ok(answer(vswitch, incomplete))
    }

    async fn update_vswitch(&self, id: u64, name: &str, vlan: u16) -> Result<(), RobotError> {
        self.record(MockCall::Update { id, name: name.to_string(), vlan });
        self.injected(MockOperation::Update, format!("POST /vswitch/{}", id))?;
        if self.vswitch(id).is_none() {
            return Err(not_found(id));
        }
        self.check_input(Some(id), name, vlan)?;

        self.modify(id, |v| {
            v.name = Some(name.to_string());
            v.vlan = Some(i64::from(vlan));
        });
        Ok(())
    }

    async fn delete_vswitch(&self, id: u64) -> Result<(), RobotError> {
        self.record(MockCall::Delete { id });
        self.injected(MockOperation::Delete, format!("DELETE /vswitch/{}", id))?;

        let mut store = self.vswitches.lock().unwrap();
        match store.get(&id) {
            None => Err(not_found(id)),
            Some(v) if v.cancelled == Some(true) => Err(RobotError::Rejected {
                status: 409,
                code: "VSWITCH_IN_PROCESS".to_string(),
                message: format!("vSwitch {} cancellation is already in process", id),
            }),
            Some(_) => {
                store.remove(&id);
                Ok(())
            }
        }
    }
}
