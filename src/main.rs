use clap::Parser;
use color_eyre::Result;
use env_logger::Env;
use log::info;
use std::path::PathBuf;

use seed_exporter::config::Config;
use seed_exporter::exporter::Exporter;

/// Export quality-filtered seed nodes from p2p crawler measurements
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Directory containing p2p-crawler results
    #[arg(long, default_value = "/home/p2p-crawler")]
    crawler_path: PathBuf,

    /// Directory for results
    #[arg(long, default_value = "/home/seed-exporter")]
    result_path: PathBuf,

    /// Upload results to FTP (default: disabled)
    #[arg(long)]
    upload_result: bool,

    /// FTP server address
    #[arg(long)]
    ftp_address: Option<String>,

    /// FTP server port
    #[arg(long, default_value_t = 21)]
    ftp_port: u16,

    /// FTP server user
    #[arg(long)]
    ftp_username: Option<String>,

    /// File containing FTP server password
    #[arg(long)]
    ftp_password_file: Option<PathBuf>,

    /// FTP server file destination
    #[arg(long, default_value = "public_html/seeds.txt")]
    ftp_destination: PathBuf,
}

fn main() -> Result<()> {
    // Initialize error handling
    color_eyre::install()?;

    // Parse command-line arguments
    let args = Args::parse();

    // Initialize logging with default filter level of "info"
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let conf = Config::new(
        args.crawler_path,
        args.result_path,
        args.upload_result,
        args.ftp_address,
        args.ftp_port,
        args.ftp_username,
        args.ftp_password_file,
        args.ftp_destination,
    )?;
    info!("Using configuration: {}", conf);

    Exporter::new(conf).run()?;

    info!("Finished seed export");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let args = Args::parse_from(["seed-exporter"]);

        assert_eq!(args.crawler_path, PathBuf::from("/home/p2p-crawler"));
        assert_eq!(args.result_path, PathBuf::from("/home/seed-exporter"));
        assert!(!args.upload_result);
        assert_eq!(args.ftp_port, 21);
        assert_eq!(args.ftp_destination, PathBuf::from("public_html/seeds.txt"));
    }

    #[test]
    fn test_cli_upload_args() {
        let args = Args::parse_from([
            "seed-exporter",
            "--upload-result",
            "--ftp-address", "ftp.example.com",
            "--ftp-username", "seeder",
            "--ftp-password-file", "/run/secrets/ftp-password",
        ]);

        assert!(args.upload_result);
        assert_eq!(args.ftp_address, Some("ftp.example.com".to_string()));
        assert_eq!(
            args.ftp_password_file,
            Some(PathBuf::from("/run/secrets/ftp-password"))
        );
    }
}
