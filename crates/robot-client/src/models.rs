//! Robot web service models
//!
//! These models mirror the JSON returned by the `/vswitch` endpoints.
//! Every field is optional on the wire: the service omits or nulls fields
//! in some responses, and deciding what is mandatory is left to the caller.

use serde::{Deserialize, Serialize};

/// vSwitch as returned by `GET /vswitch/{id}` and `POST /vswitch`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct VSwitchResponse {
    pub id: Option<u64>,
    pub name: Option<String>,
    pub vlan: Option<i64>,
    pub cancelled: Option<bool>,
    pub server: Option<Vec<VSwitchServer>>,
    pub subnet: Option<Vec<VSwitchSubnet>>,
    pub cloud_network: Option<Vec<VSwitchCloudNetwork>>,
}

/// Dedicated server attached to a vSwitch
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct VSwitchServer {
    pub server_ip: Option<String>,
    pub server_ipv6_net: Option<String>,
    pub server_number: Option<u64>,
    pub status: Option<String>, // "ready", "in process", "failed"
}

/// IP subnet routed to a vSwitch
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct VSwitchSubnet {
    pub ip: Option<String>,
    pub mask: Option<i64>,
    pub gateway: Option<String>,
}

/// Cloud network coupled with a vSwitch
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct VSwitchCloudNetwork {
    pub id: Option<u64>,
    pub ip: Option<String>,
    pub mask: Option<i64>,
    pub gateway: Option<String>,
}

/// Some Robot deployments wrap single objects as `{"vswitch": {...}}`
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub(crate) enum VSwitchEnvelope {
    Wrapped { vswitch: VSwitchResponse },
    Bare(VSwitchResponse),
}

impl From<VSwitchEnvelope> for VSwitchResponse {
    fn from(envelope: VSwitchEnvelope) -> Self {
        match envelope {
            VSwitchEnvelope::Wrapped { vswitch } => vswitch,
            VSwitchEnvelope::Bare(vswitch) => vswitch,
        }
    }
}

/// Form body for `POST /vswitch` and `POST /vswitch/{id}`
///
/// Only the two caller-owned fields exist here; derived state can never be sent.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VSwitchRequest<'a> {
    pub name: &'a str,
    pub vlan: u16,
}

/// Form body for `DELETE /vswitch/{id}`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CancelVSwitchRequest<'a> {
    /// `now` or a `YYYY-MM-DD` date
    pub cancellation_date: &'a str,
}
