//! Export pipeline.
//!
//! Coordinates one run: read crawler records, evaluate each against the
//! policy table, aggregate statistics, write the seed list and the
//! statistics report, and optionally upload the seed list. Evaluation is a
//! pure per-record function, so records are mapped in parallel and the
//! outcomes fanned into the sequential aggregator.

use color_eyre::eyre::{Context, Result};
use rayon::prelude::*;

use crate::config::Config;
use crate::evaluator::evaluate;
use crate::input::CrawlerInputReader;
use crate::output::{write_atomic, FormattedOutputWriter};
use crate::stats::{RunStatistics, StatsAggregator};
use crate::types::{EvaluationResult, MeasurementRecord};
use crate::upload::FtpUploader;

/// Seed exporter, driving one full run.
#[derive(Debug)]
pub struct Exporter {
    conf: Config,
}

impl Exporter {
    pub fn new(conf: Config) -> Self {
        Self { conf }
    }

    /// Run the export pipeline.
    ///
    /// Any fatal error (unclassifiable record, malformed record, I/O)
    /// propagates before any output file is written, so a failed run never
    /// publishes a half-computed seed list.
    pub fn run(&self) -> Result<()> {
        let records = CrawlerInputReader::new(&self.conf.crawler_path).read_records()?;

        let (accepted, stats) = evaluate_all(records)?;

        let writer = FormattedOutputWriter::new(&self.conf.result_path, self.conf.timestamp);
        let seeds_file = writer.write(&accepted)?;

        self.write_stats_report(&stats)?;
        log::info!("Evaluation statistics:");
        for line in stats.table_lines() {
            log::info!("{line}");
        }

        if self.conf.upload {
            // Upload failures are logged but never fatal; the artifacts are
            // already on disk.
            FtpUploader::new(self.conf.ftp.clone()).upload_file(&seeds_file);
        }

        Ok(())
    }

    fn write_stats_report(&self, stats: &RunStatistics) -> Result<()> {
        let timestamp_str = self.conf.timestamp.format("%Y-%m-%dT%H-%M-%SZ");
        let path = self
            .conf
            .result_path
            .join(format!("stats-{timestamp_str}.json"));
        let json =
            serde_json::to_string_pretty(stats).context("Failed to serialize statistics")?;
        write_atomic(&path, json.as_bytes())?;
        log::info!("Wrote statistics report to {}", path.display());
        Ok(())
    }
}

/// Evaluate all records and partition out the accepted ones.
///
/// Returns the accepted records (evaluation order preserved; the writer does
/// its own canonical sorting) together with the run statistics.
pub fn evaluate_all(
    records: Vec<MeasurementRecord>,
) -> Result<(Vec<MeasurementRecord>, RunStatistics)> {
    let outcomes: Vec<(MeasurementRecord, EvaluationResult)> = records
        .into_par_iter()
        .map(|record| {
            let result = evaluate(&record)?;
            Ok((record, result))
        })
        .collect::<Result<_>>()?;

    let mut aggregator = StatsAggregator::new();
    let mut accepted = Vec::new();
    for (record, result) in outcomes {
        aggregator.record(&record, &result);
        if result.is_accepted() {
            accepted.push(record);
        }
    }

    let stats = aggregator.summary();
    log::info!(
        "Evaluated {} records: {} accepted, {} rejected",
        stats.overall.total,
        stats.overall.accepted,
        stats.overall.rejected()
    );
    Ok((accepted, stats))
}
