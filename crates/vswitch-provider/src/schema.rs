//! Attribute schema tables for the vSwitch resource and data source.
//!
//! Plain data describing how the declarative engine sees the attributes.
//! Only the boundary in [`crate::attributes`] reads these tables; the
//! reconciler never does.

/// Value type of an attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeType {
    Int,
    String,
    Bool,
    /// Ordered list of objects with the given element attributes
    List(&'static [Attribute]),
}

/// Who provides an attribute's value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeMode {
    /// Must be declared by the caller
    Required,
    /// May be declared; reported by the remote side when not
    OptionalComputed,
    /// Reported by the remote side only
    Computed,
}

impl AttributeMode {
    /// Whether the caller may set this attribute
    pub fn is_settable(self) -> bool {
        matches!(self, AttributeMode::Required | AttributeMode::OptionalComputed)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Attribute {
    pub name: &'static str,
    pub kind: AttributeType,
    pub mode: AttributeMode,
    pub description: &'static str,
}

/// Schema of one resource or data source type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResourceSchema {
    pub type_name: &'static str,
    pub attributes: &'static [Attribute],
}

impl ResourceSchema {
    pub fn attribute(&self, name: &str) -> Option<&'static Attribute> {
        self.attributes.iter().find(|a| a.name == name)
    }

    /// Attributes the caller may declare
    pub fn settable(&self) -> impl Iterator<Item = &'static Attribute> {
        self.attributes.iter().filter(|a| a.mode.is_settable())
    }
}

const fn attr(name: &'static str, kind: AttributeType, mode: AttributeMode, description: &'static str) -> Attribute {
    Attribute {
        name,
        kind,
        mode,
        description,
    }
}

use AttributeMode::{Computed, OptionalComputed, Required};
use AttributeType::{Bool, Int, List};

const SERVER_ELEMENT: &[Attribute] = &[
    attr("server_ip", AttributeType::String, Computed, "Server main IPv4 address"),
    attr("server_ipv6_net", AttributeType::String, Computed, "Server IPv6 network"),
    attr("server_number", Int, Computed, "Server number"),
    attr("status", AttributeType::String, Computed, "Attachment status"),
];

const SUBNET_ELEMENT: &[Attribute] = &[
    attr("ip", AttributeType::String, Computed, "Subnet address"),
    attr("mask", Int, Computed, "Prefix length"),
    attr("gateway", AttributeType::String, Computed, "Subnet gateway"),
];

const CLOUD_NETWORK_ELEMENT: &[Attribute] = &[
    attr("id", Int, Computed, "Cloud network ID"),
    attr("ip", AttributeType::String, Computed, "Network address"),
    attr("mask", Int, Computed, "Prefix length"),
    attr("gateway", AttributeType::String, Computed, "Network gateway"),
];

/// `hetzner-robot_vswitch` resource
pub const VSWITCH_RESOURCE: ResourceSchema = ResourceSchema {
    type_name: "hetzner-robot_vswitch",
    attributes: &[
        attr("vswitch_id", Int, OptionalComputed, "VSwitch ID"),
        attr("name", AttributeType::String, Required, "vSwitch name"),
        attr("vlan", Int, Required, "VLAN ID"),
        attr("is_cancelled", Bool, Computed, "Cancellation status"),
        attr("servers", List(SERVER_ELEMENT), Computed, "Attached server list"),
        attr("subnets", List(SUBNET_ELEMENT), Computed, "Attached subnet list"),
        attr("cloud_networks", List(CLOUD_NETWORK_ELEMENT), Computed, "Attached cloud network list"),
    ],
};

/// `hetzner-robot_vswitch` data source: everything but the id is reported
pub const VSWITCH_DATA_SOURCE: ResourceSchema = ResourceSchema {
    type_name: "hetzner-robot_vswitch",
    attributes: &[
        attr("vswitch_id", Int, Required, "VSwitch ID"),
        attr("name", AttributeType::String, Computed, "vSwitch name"),
        attr("vlan", Int, Computed, "VLAN ID"),
        attr("is_cancelled", Bool, Computed, "Cancellation status"),
        attr("servers", List(SERVER_ELEMENT), Computed, "Attached server list"),
        attr("subnets", List(SUBNET_ELEMENT), Computed, "Attached subnet list"),
        attr("cloud_networks", List(CLOUD_NETWORK_ELEMENT), Computed, "Attached cloud network list"),
    ],
};
