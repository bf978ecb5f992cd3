//! Core data types for node quality evaluation.

use serde::{Deserialize, Serialize};

use crate::policy::ConfigurationError;

/// Transport/overlay network a node is reached through.
///
/// Declaration order is the canonical output order; the derived `Ord` is what
/// the output writer sorts by.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum NetworkType {
    #[serde(rename = "ipv4")]
    Ipv4,
    #[serde(rename = "ipv6")]
    Ipv6,
    #[serde(rename = "cjdns")]
    Cjdns,
    #[serde(rename = "onion_v3")]
    Onion,
    #[serde(rename = "i2p")]
    I2p,
}

impl NetworkType {
    /// All recognized network types, in canonical order.
    pub const ALL: [NetworkType; 5] = [
        NetworkType::Ipv4,
        NetworkType::Ipv6,
        NetworkType::Cjdns,
        NetworkType::Onion,
        NetworkType::I2p,
    ];

    /// Parse a crawler network label. Unknown labels are a fatal
    /// configuration error; a run must not silently drop data it cannot
    /// classify.
    pub fn from_label(label: &str) -> Result<Self, ConfigurationError> {
        match label {
            "ipv4" => Ok(NetworkType::Ipv4),
            "ipv6" => Ok(NetworkType::Ipv6),
            "cjdns" => Ok(NetworkType::Cjdns),
            "onion_v3" => Ok(NetworkType::Onion),
            "i2p" => Ok(NetworkType::I2p),
            other => Err(ConfigurationError::UnknownNetwork(other.to_string())),
        }
    }
}

impl std::fmt::Display for NetworkType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NetworkType::Ipv4 => write!(f, "ipv4"),
            NetworkType::Ipv6 => write!(f, "ipv6"),
            NetworkType::Cjdns => write!(f, "cjdns"),
            NetworkType::Onion => write!(f, "onion"),
            NetworkType::I2p => write!(f, "i2p"),
        }
    }
}

/// One crawler-reported node observation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeasurementRecord {
    pub network: NetworkType,
    pub address: String,
    pub port: u16,
    /// Whether a connection to the node was established.
    pub reachable: bool,
    /// Connection latency in seconds; present when a connection attempt was
    /// made. `reachable == true` implies this is present and non-negative.
    pub connection_time: Option<f64>,
    /// Bitmask of advertised protocol service flags.
    pub services: u64,
    pub protocol_version: u32,
    pub user_agent: String,
}

/// Why a node was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RejectionReason {
    /// No connection could be established.
    Unreachable,
    /// Node listens on a port other than the network's standard port.
    NonStandardPort,
    /// Connection latency exceeds the per-network acceptance ceiling.
    ConnectionTooSlow,
}

impl std::fmt::Display for RejectionReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RejectionReason::Unreachable => write!(f, "unreachable"),
            RejectionReason::NonStandardPort => write!(f, "non-standard port"),
            RejectionReason::ConnectionTooSlow => write!(f, "connection too slow"),
        }
    }
}

/// Outcome of evaluating one record. Created fresh per record, never mutated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EvaluationResult {
    Accepted,
    Rejected(RejectionReason),
}

impl EvaluationResult {
    pub fn is_accepted(&self) -> bool {
        matches!(self, EvaluationResult::Accepted)
    }

    /// Rejection reason, if any. `None` iff accepted.
    pub fn rejection_reason(&self) -> Option<RejectionReason> {
        match self {
            EvaluationResult::Accepted => None,
            EvaluationResult::Rejected(reason) => Some(*reason),
        }
    }
}
