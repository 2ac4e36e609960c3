//! Test utilities for unit testing the reconciler and the attribute boundary
//!
//! This module provides helpers for creating test records and wiring a
//! reconciler to the in-memory mock client.

use crate::reconciler::VSwitchReconciler;
use crate::record::{AttachedServer, VSwitch};
use robot_client::MockRobotClient;
use std::sync::Once;

static TRACING: Once = Once::new();

/// Route log output through the test harness so it shows up for failing tests only
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// Mock client with ids starting at `first_id`
pub fn mock_client(first_id: u64) -> MockRobotClient {
    let mock = MockRobotClient::new("http://test-robot");
    mock.set_next_id(first_id);
    mock
}

/// Reconciler sharing its store with `mock`
pub fn reconciler_for(mock: &MockRobotClient) -> VSwitchReconciler {
    init_tracing();
    VSwitchReconciler::new(mock.clone())
}

/// Helper to create a freshly created vSwitch record
pub fn observed(id: u64, name: &str, vlan: u16) -> VSwitch {
    VSwitch {
        id,
        name: name.to_string(),
        vlan,
        is_cancelled: false,
        servers: Vec::new(),
        subnets: Vec::new(),
        cloud_networks: Vec::new(),
    }
}

/// Helper to create an attached server record
pub fn server(ip: &str, server_number: u64) -> AttachedServer {
    AttachedServer {
        ip_address: ip.parse().ok(),
        ipv6_network: format!("2a01:4f8:111:{:x}::", server_number).parse().ok(),
        server_number,
        status: "ready".to_string(),
    }
}
