//! # Seed Exporter - Quality-filtered seed nodes from p2p crawler data
//!
//! This library turns raw per-node measurements collected by an external
//! p2p crawler into a list of trustworthy seed nodes for bootstrapping new
//! network clients, plus statistics over the evaluated population.
//!
//! ## Overview
//!
//! The crawler drops CSV result files (one observation per node: network
//! type, address, port, reachability, connection latency, service flags,
//! protocol version) into a directory. Each record is evaluated against a
//! fixed per-network policy table; nodes that are reachable, listen on the
//! network's standard port, and respond within the network's latency ceiling
//! qualify as seed candidates.
//!
//! ## Architecture
//!
//! The library is organized into several modules:
//!
//! - `types`: measurement records, network types, and evaluation outcomes
//! - `policy`: the fixed per-network acceptance policy table
//! - `evaluator`: the ordered accept/reject checks for a single record
//! - `stats`: outcome tallies per network type and rejection reason
//! - `input`: crawler result file discovery and CSV parsing
//! - `output`: canonical ordering and columnar seed list rendering
//! - `exporter`: orchestration of one full export run
//! - `upload`: FTP publication of the finished seed list
//! - `config`: validated run configuration
//!
//! Data flows one way: records are read, evaluated independently (evaluation
//! is a pure function and runs in parallel), partitioned into accepted and
//! rejected, then the accepted set is written as the seed list while both
//! partitions feed the statistics report.
//!
//! ## Error Handling
//!
//! Typed domain errors (`ConfigurationError`, `EvalError`, `ConfigError`)
//! are raised with `thiserror` and surfaced through `color_eyre` at the
//! application boundary. A record the run cannot classify is fatal; the run
//! aborts before any output file is written rather than silently dropping
//! data or publishing a partial seed list.

pub mod config;
pub mod evaluator;
pub mod exporter;
pub mod input;
pub mod output;
pub mod policy;
pub mod stats;
pub mod types;
pub mod upload;
