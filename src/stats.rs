//! Evaluation statistics.
//!
//! Tallies evaluation outcomes across a run, partitioned by network type and
//! rejection reason, and renders them as an aligned table for the log and as
//! JSON for machine consumption.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::types::{EvaluationResult, MeasurementRecord, NetworkType, RejectionReason};

/// Outcome counters for one network type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkCounts {
    pub total: u64,
    pub accepted: u64,
    pub unreachable: u64,
    pub non_standard_port: u64,
    pub connection_too_slow: u64,
}

impl NetworkCounts {
    pub fn rejected(&self) -> u64 {
        self.unreachable + self.non_standard_port + self.connection_too_slow
    }

    fn add(&mut self, other: &NetworkCounts) {
        self.total += other.total;
        self.accepted += other.accepted;
        self.unreachable += other.unreachable;
        self.non_standard_port += other.non_standard_port;
        self.connection_too_slow += other.connection_too_slow;
    }
}

/// Finalized, read-only statistics snapshot for one run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunStatistics {
    /// Counters per network type, in canonical order. Every network type has
    /// an entry, even when no records for it were seen.
    pub networks: BTreeMap<NetworkType, NetworkCounts>,
    /// Grand totals across all network types.
    pub overall: NetworkCounts,
}

impl RunStatistics {
    /// Render the statistics as aligned table lines for the log.
    ///
    /// First column left-aligned, remaining columns right-aligned, matching
    /// the column set of the evaluation: Network, Total, Good, Share,
    /// Unreachable, Port, Timeout.
    pub fn table_lines(&self) -> Vec<String> {
        let mut lines = vec![format!(
            "{:<8} {:>6} {:>6} {:>6} {:>12} {:>6} {:>8}",
            "Network", "Total", "Good", "Share", "Unreachable", "Port", "Timeout"
        )];
        for network in NetworkType::ALL {
            let counts = self.networks.get(&network).copied().unwrap_or_default();
            let share = if counts.total > 0 {
                counts.accepted as f64 / counts.total as f64
            } else {
                0.0
            };
            lines.push(format!(
                "{:<8} {:>6} {:>6} {:>5.1}% {:>12} {:>6} {:>8}",
                network.to_string(),
                counts.total,
                counts.accepted,
                share * 100.0,
                counts.unreachable,
                counts.non_standard_port,
                counts.connection_too_slow,
            ));
        }
        lines
    }
}

/// Accumulator for evaluation outcomes. Created empty at run start,
/// incremented once per evaluated record, then read out via [`summary`].
///
/// [`summary`]: StatsAggregator::summary
#[derive(Debug, Default)]
pub struct StatsAggregator {
    counts: BTreeMap<NetworkType, NetworkCounts>,
}

impl StatsAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one evaluation outcome.
    pub fn record(&mut self, measurement: &MeasurementRecord, result: &EvaluationResult) {
        let counts = self.counts.entry(measurement.network).or_default();
        counts.total += 1;
        match result.rejection_reason() {
            None => counts.accepted += 1,
            Some(RejectionReason::Unreachable) => counts.unreachable += 1,
            Some(RejectionReason::NonStandardPort) => counts.non_standard_port += 1,
            Some(RejectionReason::ConnectionTooSlow) => counts.connection_too_slow += 1,
        }
    }

    /// Finalized snapshot with an entry for every network type.
    pub fn summary(&self) -> RunStatistics {
        let mut networks = BTreeMap::new();
        let mut overall = NetworkCounts::default();
        for network in NetworkType::ALL {
            let counts = self.counts.get(&network).copied().unwrap_or_default();
            overall.add(&counts);
            networks.insert(network, counts);
        }
        RunStatistics { networks, overall }
    }
}
