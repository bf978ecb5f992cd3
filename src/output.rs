//! Seed list output.
//!
//! Renders accepted nodes in a stable columnar text format for the
//! downstream seed-import tooling: one row per node, columns address, port,
//! connection time, services bitmask (zero-padded hex), protocol version.
//! Rows are grouped by network type in canonical order (ipv4, ipv6, cjdns,
//! onion, i2p) and sorted by address, then port, within a group.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use color_eyre::eyre::{Context, Result};

use crate::types::MeasurementRecord;

/// Render accepted records as seed list rows.
///
/// A non-empty list always ends with a trailing newline; an empty list
/// renders as an empty artifact with no stray content. No filtering happens
/// here, the input is trusted to be the evaluator's accepted partition.
pub fn render_seed_rows(accepted: &[MeasurementRecord]) -> String {
    let mut sorted: Vec<&MeasurementRecord> = accepted.iter().collect();
    sorted.sort_by(|a, b| {
        a.network
            .cmp(&b.network)
            .then_with(|| a.address.cmp(&b.address))
            .then_with(|| a.port.cmp(&b.port))
    });

    let mut output = String::new();
    for record in sorted {
        // Accepted records always carry a connection time.
        let connection_time = record.connection_time.unwrap_or_default();
        output.push_str(&format!(
            "{} {} {:.3} {:08x} {}\n",
            record.address, record.port, connection_time, record.services, record.protocol_version
        ));
    }
    output
}

/// Writes the seed list artifact into the result directory.
#[derive(Debug)]
pub struct FormattedOutputWriter {
    path: PathBuf,
    timestamp: DateTime<Utc>,
}

impl FormattedOutputWriter {
    pub fn new(path: impl Into<PathBuf>, timestamp: DateTime<Utc>) -> Self {
        Self {
            path: path.into(),
            timestamp,
        }
    }

    /// Render and write the accepted nodes, returning the artifact path.
    ///
    /// The file is written to a temporary name and renamed into place, so a
    /// failed run never leaves a truncated seed list behind.
    pub fn write(&self, accepted: &[MeasurementRecord]) -> Result<PathBuf> {
        let timestamp_str = self.timestamp.format("%Y-%m-%dT%H-%M-%SZ");
        let filename = self.path.join(format!("seeds-{timestamp_str}.txt"));
        let output = render_seed_rows(accepted);

        write_atomic(&filename, output.as_bytes())?;
        log::info!("Wrote {} seed rows to {}", accepted.len(), filename.display());
        Ok(filename)
    }
}

/// Write via a temporary file and rename into place.
pub fn write_atomic(path: &Path, contents: &[u8]) -> Result<()> {
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);

    fs::write(&tmp, contents)
        .with_context(|| format!("Failed to write temporary file {}", tmp.display()))?;
    fs::rename(&tmp, path)
        .with_context(|| format!("Failed to move {} into place", path.display()))?;
    Ok(())
}
