//! Reading measurement records from p2p-crawler result files.
//!
//! The crawler drops one CSV file per run into its result directory, named
//! `<ISO-timestamp>_reachable_nodes.csv`. All matching files are read and
//! concatenated; the `network` column of each row decides its network type.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use color_eyre::eyre::{bail, Context, Result};
use regex::Regex;
use serde::Deserialize;

use crate::types::{MeasurementRecord, NetworkType};

/// Crawler result file names, e.g. `2026-08-27T06-00-01Z_reachable_nodes.csv`
static RESULT_FILE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\d{4}-\d{2}-\d{2}T\d{2}-\d{2}-\d{2}Z_reachable_nodes\.csv$")
        .expect("Invalid result file regex")
});

/// One raw CSV row as written by the crawler.
#[derive(Debug, Deserialize)]
struct CrawlerRow {
    network: String,
    address: String,
    port: u16,
    reachable: bool,
    connection_time: Option<f64>,
    services: u64,
    version: u32,
    user_agent: Option<String>,
}

impl CrawlerRow {
    fn into_record(self) -> Result<MeasurementRecord> {
        let network = NetworkType::from_label(&self.network)
            .with_context(|| format!("row for {}:{}", self.address, self.port))?;
        Ok(MeasurementRecord {
            network,
            address: self.address,
            port: self.port,
            reachable: self.reachable,
            connection_time: self.connection_time,
            services: self.services,
            protocol_version: self.version,
            // Nodes are free to advertise an empty user agent.
            user_agent: self.user_agent.unwrap_or_else(|| "(empty)".to_string()),
        })
    }
}

/// Reads measurement records from a directory of crawler results.
#[derive(Debug)]
pub struct CrawlerInputReader {
    path: PathBuf,
}

impl CrawlerInputReader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Find crawler result files, sorted by name (i.e. by timestamp).
    fn find_result_files(&self) -> Result<Vec<PathBuf>> {
        let entries = fs::read_dir(&self.path)
            .with_context(|| format!("Failed to read crawler directory {}", self.path.display()))?;

        let mut files: Vec<PathBuf> = entries
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| {
                path.file_name()
                    .and_then(|name| name.to_str())
                    .is_some_and(|name| RESULT_FILE.is_match(name))
            })
            .collect();
        files.sort();

        if files.is_empty() {
            bail!(
                "No crawler result files found in {}",
                self.path.display()
            );
        }
        Ok(files)
    }

    fn read_file(path: &Path) -> Result<Vec<MeasurementRecord>> {
        let mut reader = csv::Reader::from_path(path)
            .with_context(|| format!("Failed to open crawler result file {}", path.display()))?;

        let mut records = Vec::new();
        for (line, row) in reader.deserialize::<CrawlerRow>().enumerate() {
            let row = row.with_context(|| {
                format!("Malformed row {} in {}", line + 2, path.display())
            })?;
            records.push(row.into_record()?);
        }
        log::debug!("Read {} rows from {}", records.len(), path.display());
        Ok(records)
    }

    /// Read all result files and return the combined record sequence.
    ///
    /// Any row that cannot be parsed or classified aborts the run; silently
    /// dropping unclassifiable data would bias the evaluation.
    pub fn read_records(&self) -> Result<Vec<MeasurementRecord>> {
        let files = self.find_result_files()?;
        log::info!("Reading input from {} crawler result files...", files.len());

        let mut records = Vec::new();
        for file in &files {
            records.extend(Self::read_file(file)?);
        }
        log::info!("Read {} records from {} files", records.len(), files.len());
        Ok(records)
    }
}
