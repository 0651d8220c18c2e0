use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, Parser)]
#[command(name = "genoquery")]
#[command(version, about = "Genomic variant query API server")]
pub struct Config {
    /// Host address to bind to
    #[arg(long, env = "GENOQUERY_HOST", default_value = "localhost")]
    pub host: String,

    /// Port to listen on
    #[arg(short, long, env = "GENOQUERY_PORT", default_value = "1323")]
    pub port: u16,

    /// Enable CORS for all origins
    #[arg(long, env = "GENOQUERY_CORS", default_value = "false")]
    pub cors: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "RUST_LOG", default_value = "info")]
    pub log_level: String,

    /// Per-request timeout in seconds
    #[arg(long, env = "GENOQUERY_REQUEST_TIMEOUT", default_value = "60")]
    pub request_timeout: u64,

    /// VCF files to ingest before serving
    #[arg(long = "preload", value_name = "VCF")]
    pub preload: Vec<PathBuf>,
}

impl Config {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout)
    }
}
