//! Node quality evaluation.
//!
//! Decides whether a single measurement qualifies the node as a seed
//! candidate. Inspired by the seeder heuristics in
//! <https://github.com/sipa/bitcoin-seeder/blob/ff482e465ff84ea6fa276d858ccb7ef32e3355d3/db.h#L104-L119>.

use crate::policy::{policy_for, ConfigurationError};
use crate::types::{EvaluationResult, MeasurementRecord, RejectionReason};

/// Errors that are fatal to evaluating a record.
#[derive(Debug, thiserror::Error)]
pub enum EvalError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    /// Structurally required data is missing; defaulting to a guessed value
    /// would undermine the latency-based decision, so the record is never
    /// silently patched up.
    #[error("malformed record for {address}:{port}: {problem}")]
    MalformedRecord {
        address: String,
        port: u16,
        problem: String,
    },
}

/// Evaluate one measurement record against the policy table.
///
/// Checks are ordered and short-circuiting: the first failing check
/// determines the rejection reason. Rejections are normal outcomes, not
/// errors. Pure function of the record and the (static) policy table.
pub fn evaluate(record: &MeasurementRecord) -> Result<EvaluationResult, EvalError> {
    if !record.reachable {
        return Ok(EvaluationResult::Rejected(RejectionReason::Unreachable));
    }

    let policy = policy_for(record.network)?;

    if record.port != policy.standard_port {
        return Ok(EvaluationResult::Rejected(RejectionReason::NonStandardPort));
    }

    let connection_time = record
        .connection_time
        .ok_or_else(|| EvalError::MalformedRecord {
            address: record.address.clone(),
            port: record.port,
            problem: "reachable but no connection time".to_string(),
        })?;
    if connection_time < 0.0 {
        return Err(EvalError::MalformedRecord {
            address: record.address.clone(),
            port: record.port,
            problem: format!("negative connection time: {connection_time}"),
        });
    }

    // Boundary is inclusive: a node exactly at the ceiling is accepted.
    if connection_time > policy.max_connection_time() {
        return Ok(EvaluationResult::Rejected(
            RejectionReason::ConnectionTooSlow,
        ));
    }

    Ok(EvaluationResult::Accepted)
}
