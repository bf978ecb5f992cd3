//! Per-network acceptance policies.
//!
//! The table is fixed at five entries, one per network type, and never
//! changes during a run. The acceptance ceiling for connection latency is
//! derived from the crawler's connection timeout: halved for the
//! directly-connected networks (responsive nodes are preferred), relaxed by
//! 20% for the SOCKS5 overlay networks (onion, i2p) whose latency fluctuates.

use crate::types::NetworkType;

/// Standard listening port for all networks except I2P.
const DEFAULT_PORT: u16 = 8333;

/// I2P records carry a dummy port.
const I2P_DUMMY_PORT: u16 = 0;

/// Crawler connection timeout for directly-connected networks, in seconds.
const REGULAR_TIMEOUT: f64 = 5.0;

/// Crawler connection timeout for SOCKS5 overlay networks, in seconds.
const SOCKS5_TIMEOUT: f64 = 20.0;

/// Acceptance policy for one network type.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NetworkPolicy {
    pub network: NetworkType,
    /// The only port value considered acceptable for this network.
    pub standard_port: u16,
    /// The crawler's connection timeout for this network.
    pub base_timeout_seconds: f64,
    /// Multiplier applied to the base timeout to derive the acceptance
    /// ceiling.
    pub threshold_factor: f64,
}

impl NetworkPolicy {
    /// Maximum acceptable connection time, in seconds.
    pub fn max_connection_time(&self) -> f64 {
        self.base_timeout_seconds * self.threshold_factor
    }
}

/// The policy table. Initialized at compile time, read-only thereafter.
pub const POLICIES: [NetworkPolicy; 5] = [
    NetworkPolicy {
        network: NetworkType::Ipv4,
        standard_port: DEFAULT_PORT,
        base_timeout_seconds: REGULAR_TIMEOUT,
        threshold_factor: 0.5,
    },
    NetworkPolicy {
        network: NetworkType::Ipv6,
        standard_port: DEFAULT_PORT,
        base_timeout_seconds: REGULAR_TIMEOUT,
        threshold_factor: 0.5,
    },
    NetworkPolicy {
        network: NetworkType::Cjdns,
        standard_port: DEFAULT_PORT,
        base_timeout_seconds: REGULAR_TIMEOUT,
        threshold_factor: 0.5,
    },
    NetworkPolicy {
        network: NetworkType::Onion,
        standard_port: DEFAULT_PORT,
        base_timeout_seconds: SOCKS5_TIMEOUT,
        threshold_factor: 1.2,
    },
    NetworkPolicy {
        network: NetworkType::I2p,
        standard_port: I2P_DUMMY_PORT,
        base_timeout_seconds: SOCKS5_TIMEOUT,
        threshold_factor: 1.2,
    },
];

/// Errors that make a run unable to produce a sound accept/reject decision
#[derive(Debug, thiserror::Error)]
pub enum ConfigurationError {
    #[error("unknown network type: {0}")]
    UnknownNetwork(String),

    #[error("no policy table entry for network type: {0}")]
    MissingPolicy(NetworkType),
}

/// Look up the policy for a network type.
///
/// With a closed enum and a complete table this cannot fail; the error path
/// is an invariant check so a gap in the table aborts the run instead of
/// silently skipping records.
pub fn policy_for(network: NetworkType) -> Result<&'static NetworkPolicy, ConfigurationError> {
    POLICIES
        .iter()
        .find(|policy| policy.network == network)
        .ok_or(ConfigurationError::MissingPolicy(network))
}

/// Acceptance ceiling for connection latency, in seconds.
pub fn max_connection_time(network: NetworkType) -> Result<f64, ConfigurationError> {
    Ok(policy_for(network)?.max_connection_time())
}
