//! Fixture builders for Robot wire models

use crate::models::*;

/// A freshly created vSwitch: not cancelled, nothing attached
pub fn vswitch_fixture(id: u64, name: &str, vlan: u16) -> VSwitchResponse {
    VSwitchResponse {
        id: Some(id),
        name: Some(name.to_string()),
        vlan: Some(i64::from(vlan)),
        cancelled: Some(false),
        server: Some(Vec::new()),
        subnet: Some(Vec::new()),
        cloud_network: Some(Vec::new()),
    }
}

/// A ready server with an IPv4 address and a derived IPv6 /64
pub fn server_fixture(server_ip: &str, server_number: u64) -> VSwitchServer {
    VSwitchServer {
        server_ip: Some(server_ip.to_string()),
        server_ipv6_net: Some(format!("2a01:4f8:111:{:x}::", server_number)),
        server_number: Some(server_number),
        status: Some("ready".to_string()),
    }
}

pub fn subnet_fixture(ip: &str, mask: i64, gateway: &str) -> VSwitchSubnet {
    VSwitchSubnet {
        ip: Some(ip.to_string()),
        mask: Some(mask),
        gateway: Some(gateway.to_string()),
    }
}

pub fn cloud_network_fixture(id: u64, ip: &str, mask: i64, gateway: &str) -> VSwitchCloudNetwork {
    VSwitchCloudNetwork {
        id: Some(id),
        ip: Some(ip.to_string()),
        mask: Some(mask),
        gateway: Some(gateway.to_string()),
    }
}
