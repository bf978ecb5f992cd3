//! Seed list upload.
//!
//! Pushes the finished seed list to a remote FTP destination. The exporter's
//! outputs are already durable on disk by the time this runs, so upload
//! failures are logged and reported but never fail the run.

use std::fs::File;
use std::path::Path;

use suppaftp::FtpStream;

use crate::config::FtpConfig;

/// FTP uploader.
#[derive(Debug)]
pub struct FtpUploader {
    conf: FtpConfig,
}

impl FtpUploader {
    pub fn new(conf: FtpConfig) -> Self {
        Self { conf }
    }

    /// Upload a file to the configured destination. Returns whether the
    /// upload succeeded.
    pub fn upload_file(&self, src: &Path) -> bool {
        if !src.is_file() {
            log::error!("File {} does not exist or is not a file", src.display());
            return false;
        }

        match self.try_upload(src) {
            Ok(bytes) => {
                log::info!(
                    "Uploaded {} to ftp://<redacted>/{} ({:.1}kB uploaded)",
                    src.display(),
                    self.conf.destination.display(),
                    bytes as f64 / 1024.0
                );
                true
            }
            Err(e) => {
                log::error!("Failed to upload file {}: {}", src.display(), e);
                false
            }
        }
    }

    fn try_upload(&self, src: &Path) -> Result<u64, Box<dyn std::error::Error>> {
        let mut ftp = FtpStream::connect(format!("{}:{}", self.conf.address, self.conf.port))?;
        ftp.login(&self.conf.username, &self.conf.password)?;

        if let Some(parent) = self.conf.destination.parent() {
            let parent = parent.to_string_lossy();
            if !parent.is_empty() {
                ftp.cwd(&parent)?;
            }
        }
        let name = self
            .conf
            .destination
            .file_name()
            .ok_or("FTP destination has no file name")?
            .to_string_lossy();

        let mut file = File::open(src)?;
        let bytes = ftp.put_file(name.as_ref(), &mut file)?;
        ftp.quit()?;
        Ok(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_missing_source_file_fails_without_connecting() {
        let uploader = FtpUploader::new(FtpConfig::default());
        assert!(!uploader.upload_file(Path::new("/does/not/exist")));
    }

    #[test]
    fn test_unreachable_server_reports_failure() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("seeds.txt");
        std::fs::write(&src, "203.0.113.1 8333 0.250 00000001 70016\n").unwrap();

        let uploader = FtpUploader::new(FtpConfig {
            // reserved discard port on localhost, nothing listens there
            address: "127.0.0.1".to_string(),
            port: 9,
            username: "seeder".to_string(),
            password: "secret".to_string(),
            destination: PathBuf::from("public_html/seeds.txt"),
        });
        assert!(!uploader.upload_file(&src));
    }
}
