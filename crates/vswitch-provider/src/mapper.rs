//! Translation between Robot wire models and local records.
//!
//! Inbound, a wire response becomes a complete [`VSwitch`] or fails; there is no
//! partially filled record. Outbound, only the two declared fields leave, after
//! they have been checked to be well-formed values. Range rules of the Robot
//! service itself (which VLANs are allowed, name uniqueness) are its business.

use crate::record::{AttachedServer, CloudNetwork, DesiredVSwitch, Subnet, VSwitch};
use robot_client::{VSwitchCloudNetwork, VSwitchResponse, VSwitchServer, VSwitchSubnet};
use std::net::IpAddr;
use thiserror::Error;

/// Highest VLAN id representable in an 802.1Q tag
pub const MAX_VLAN: u16 = 4095;

/// Why a value could not be mapped
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MappingError {
    #[error("missing required field `{0}`")]
    MissingField(String),

    #[error("field `{field}` out of range: {value}")]
    OutOfRange { field: String, value: i64 },

    #[error("field `{field}` is not an IP address: {value:?}")]
    InvalidAddress { field: String, value: String },

    #[error("field `{field}` {reason}")]
    InvalidValue { field: String, reason: String },
}

/// Map a wire vSwitch to a local record, preserving the order of every collection.
pub fn to_local(raw: VSwitchResponse) -> Result<VSwitch, MappingError> {
    let id = required(raw.id, "id")?;
    let name = required(raw.name, "name")?;
    let vlan = vlan_from_wire(required(raw.vlan, "vlan")?)?;
    let is_cancelled = required(raw.cancelled, "cancelled")?;

    let servers = raw
        .server
        .unwrap_or_default()
        .into_iter()
        .enumerate()
        .map(|(i, s)| server_to_local(i, s))
        .collect::<Result<Vec<_>, _>>()?;

    let subnets = raw
        .subnet
        .unwrap_or_default()
        .into_iter()
        .enumerate()
        .map(|(i, s)| subnet_to_local(i, s))
        .collect::<Result<Vec<_>, _>>()?;

    let cloud_networks = raw
        .cloud_network
        .unwrap_or_default()
        .into_iter()
        .enumerate()
        .map(|(i, c)| cloud_network_to_local(i, c))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(VSwitch {
        id,
        name,
        vlan,
        is_cancelled,
        servers,
        subnets,
        cloud_networks,
    })
}

/// Check and normalize the declared fields before they are sent upstream.
///
/// The name is trimmed; it must not end up empty or contain control characters.
pub fn validate_desired(desired: &DesiredVSwitch) -> Result<DesiredVSwitch, MappingError> {
    let name = desired.name.trim();
    if name.is_empty() {
        return Err(MappingError::InvalidValue {
            field: "name".to_string(),
            reason: "must not be empty".to_string(),
        });
    }
    if name.chars().any(char::is_control) {
        return Err(MappingError::InvalidValue {
            field: "name".to_string(),
            reason: "must not contain control characters".to_string(),
        });
    }
    if desired.vlan > MAX_VLAN {
        return Err(MappingError::OutOfRange {
            field: "vlan".to_string(),
            value: i64::from(desired.vlan),
        });
    }

    Ok(DesiredVSwitch {
        name: name.to_string(),
        vlan: desired.vlan,
    })
}

fn required<T>(value: Option<T>, field: &str) -> Result<T, MappingError> {
    value.ok_or_else(|| MappingError::MissingField(field.to_string()))
}

fn vlan_from_wire(vlan: i64) -> Result<u16, MappingError> {
    u16::try_from(vlan)
        .ok()
        .filter(|v| *v <= MAX_VLAN)
        .ok_or(MappingError::OutOfRange {
            field: "vlan".to_string(),
            value: vlan,
        })
}

fn address(value: Option<String>, field: String) -> Result<IpAddr, MappingError> {
    match optional_address(value, field.clone())? {
        Some(ip) => Ok(ip),
        None => Err(MappingError::MissingField(field)),
    }
}

/// Absent or empty strings are `None`; anything else must parse
fn optional_address(value: Option<String>, field: String) -> Result<Option<IpAddr>, MappingError> {
    match value.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => s
            .parse::<IpAddr>()
            .map(Some)
            .map_err(|_| MappingError::InvalidAddress { field, value: s.to_string() }),
    }
}

fn mask(value: Option<i64>, field: String, ip: &IpAddr) -> Result<u8, MappingError> {
    let value = value.ok_or_else(|| MappingError::MissingField(field.clone()))?;
    let max = if ip.is_ipv4() { 32 } else { 128 };
    u8::try_from(value)
        .ok()
        .filter(|m| *m <= max)
        .ok_or(MappingError::OutOfRange { field, value })
}

fn server_to_local(index: usize, raw: VSwitchServer) -> Result<AttachedServer, MappingError> {
    let field = |name: &str| format!("server[{}].{}", index, name);
    Ok(AttachedServer {
        ip_address: optional_address(raw.server_ip, field("server_ip"))?,
        ipv6_network: optional_address(raw.server_ipv6_net, field("server_ipv6_net"))?,
        server_number: raw
            .server_number
            .ok_or_else(|| MappingError::MissingField(field("server_number")))?,
        status: raw
            .status
            .ok_or_else(|| MappingError::MissingField(field("status")))?,
    })
}

fn subnet_to_local(index: usize, raw: VSwitchSubnet) -> Result<Subnet, MappingError> {
    let field = |name: &str| format!("subnet[{}].{}", index, name);
    let ip = address(raw.ip, field("ip"))?;
    Ok(Subnet {
        mask: mask(raw.mask, field("mask"), &ip)?,
        gateway: address(raw.gateway, field("gateway"))?,
        ip,
    })
}

fn cloud_network_to_local(index: usize, raw: VSwitchCloudNetwork) -> Result<CloudNetwork, MappingError> {
    let field = |name: &str| format!("cloud_network[{}].{}", index, name);
    let ip = address(raw.ip, field("ip"))?;
    Ok(CloudNetwork {
        id: raw.id.ok_or_else(|| MappingError::MissingField(field("id")))?,
        mask: mask(raw.mask, field("mask"), &ip)?,
        gateway: address(raw.gateway, field("gateway"))?,
        ip,
    })
}
