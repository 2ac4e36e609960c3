//! Canonical local vSwitch record
//!
//! Field names serialize to the attribute names the declarative engine stores
//! in its state (`vswitch_id`, `server_ip`, ...), so a record renders directly
//! into a state map.

use serde::{Deserialize, Serialize};
use std::net::IpAddr;

/// A vSwitch as last observed on the Robot service.
///
/// Only `name` and `vlan` are caller-owned. Everything else is derived by the
/// remote side and is never sent back upstream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VSwitch {
    #[serde(rename = "vswitch_id")]
    pub id: u64,
    pub name: String,
    pub vlan: u16,
    pub is_cancelled: bool,
    pub servers: Vec<AttachedServer>,
    pub subnets: Vec<Subnet>,
    pub cloud_networks: Vec<CloudNetwork>,
}

impl VSwitch {
    /// The caller-owned part of the record
    pub fn declared(&self) -> DesiredVSwitch {
        DesiredVSwitch {
            name: self.name.clone(),
            vlan: self.vlan,
        }
    }
}

/// Dedicated server attached to the vSwitch
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttachedServer {
    #[serde(rename = "server_ip")]
    pub ip_address: Option<IpAddr>,
    #[serde(rename = "server_ipv6_net")]
    pub ipv6_network: Option<IpAddr>,
    pub server_number: u64,
    pub status: String,
}

/// Subnet routed to the vSwitch
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subnet {
    pub ip: IpAddr,
    pub mask: u8,
    pub gateway: IpAddr,
}

/// Cloud network coupled with the vSwitch
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CloudNetwork {
    pub id: u64,
    pub ip: IpAddr,
    pub mask: u8,
    pub gateway: IpAddr,
}

/// What the caller wants the vSwitch to look like
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DesiredVSwitch {
    pub name: String,
    pub vlan: u16,
}

impl DesiredVSwitch {
    pub fn new(name: impl Into<String>, vlan: u16) -> Self {
        Self {
            name: name.into(),
            vlan,
        }
    }
}
