//! Run configuration.
//!
//! All options are resolved from the command line before the pipeline runs;
//! the evaluation core never reads files or environment variables for its
//! own configuration. Validation fails early so a misconfigured run aborts
//! before any work is done.

use std::fmt;
use std::fs;
use std::path::PathBuf;

use chrono::{DateTime, Utc};

/// Configuration validation errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("path does not exist: {0}")]
    MissingPath(PathBuf),

    #[error("--{0} is required when --upload-result is set")]
    MissingFtpOption(&'static str),

    #[error("failed to read FTP password file {path}: {source}")]
    PasswordFile {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// FTP upload settings. The Debug representation redacts credentials and the
/// server address so a logged configuration never leaks them.
#[derive(Clone, Default)]
pub struct FtpConfig {
    pub address: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub destination: PathBuf,
}

impl FtpConfig {
    /// Build the FTP settings from individual CLI options. All of them are
    /// required once uploading is enabled; the password is read from a file
    /// rather than passed on the command line.
    pub fn parse(
        address: Option<String>,
        port: u16,
        username: Option<String>,
        password_file: Option<PathBuf>,
        destination: PathBuf,
    ) -> Result<Self, ConfigError> {
        let address = address.ok_or(ConfigError::MissingFtpOption("ftp-address"))?;
        let username = username.ok_or(ConfigError::MissingFtpOption("ftp-username"))?;
        let password_file =
            password_file.ok_or(ConfigError::MissingFtpOption("ftp-password-file"))?;
        let password = fs::read_to_string(&password_file)
            .map_err(|source| ConfigError::PasswordFile {
                path: password_file,
                source,
            })?
            .trim()
            .to_string();

        Ok(Self {
            address,
            port,
            username,
            password,
            destination,
        })
    }
}

impl fmt::Debug for FtpConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FtpConfig")
            .field("address", &"***")
            .field("port", &self.port)
            .field("username", &"***")
            .field("password", &"***")
            .field("destination", &self.destination)
            .finish()
    }
}

/// Exporter settings.
#[derive(Debug, Clone)]
pub struct Config {
    /// Run timestamp, embedded in output file names.
    pub timestamp: DateTime<Utc>,
    /// Directory containing p2p-crawler result files.
    pub crawler_path: PathBuf,
    /// Directory for the seed list and statistics artifacts.
    pub result_path: PathBuf,
    /// Whether to upload the seed list after writing it.
    pub upload: bool,
    /// Upload settings; defaulted (and unused) when `upload` is false.
    pub ftp: FtpConfig,
}

impl Config {
    /// Assemble and validate the configuration. Paths must already exist;
    /// FTP settings are only parsed (and required) when uploading is
    /// enabled.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        crawler_path: PathBuf,
        result_path: PathBuf,
        upload: bool,
        ftp_address: Option<String>,
        ftp_port: u16,
        ftp_username: Option<String>,
        ftp_password_file: Option<PathBuf>,
        ftp_destination: PathBuf,
    ) -> Result<Self, ConfigError> {
        if !crawler_path.exists() {
            return Err(ConfigError::MissingPath(crawler_path));
        }
        if !result_path.exists() {
            return Err(ConfigError::MissingPath(result_path));
        }

        let ftp = if upload {
            FtpConfig::parse(
                ftp_address,
                ftp_port,
                ftp_username,
                ftp_password_file,
                ftp_destination,
            )?
        } else {
            FtpConfig::default()
        };

        Ok(Self {
            timestamp: Utc::now(),
            crawler_path,
            result_path,
            upload,
            ftp,
        })
    }
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "timestamp={}, crawler_path={}, result_path={}, upload={}, ftp={:?}",
            self.timestamp.format("%Y-%m-%dT%H:%M:%SZ"),
            self.crawler_path.display(),
            self.result_path.display(),
            self.upload,
            self.ftp,
        )
    }
}
