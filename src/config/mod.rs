use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

use clap::Parser;

pub const DEFAULT_PORT: u16 = 5004;

/// Application configuration, read from command-line flags or the environment
#[derive(Debug, Clone, Parser)]
#[command(name = "encyclopedia", version, about = "A small Markdown encyclopedia served over HTTP")]
pub struct Config {
    /// Directory holding one `<title>.md` file per entry
    #[arg(long, env = "ENCYCLOPEDIA_ENTRIES_DIR", default_value = "entries")]
    pub entries_dir: PathBuf,

    /// Directory served under /static (stylesheet and page shell)
    #[arg(long, env = "ENCYCLOPEDIA_STATIC_DIR", default_value = "static")]
    pub static_dir: PathBuf,

    #[arg(long, env = "ENCYCLOPEDIA_HOST", default_value_t = IpAddr::V4(Ipv4Addr::UNSPECIFIED))]
    pub host: IpAddr,

    #[arg(long, env = "ENCYCLOPEDIA_PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Seed for the random page picker; entropy when omitted
    #[arg(long, env = "ENCYCLOPEDIA_SEED")]
    pub seed: Option<u64>,

    #[arg(long, env = "ENCYCLOPEDIA_LOG", default_value = "info")]
    pub log_level: String,

    /// Also append log lines to this file
    #[arg(long, env = "ENCYCLOPEDIA_LOG_FILE")]
    pub log_file: Option<PathBuf>,
}

impl Config {
    /// Create a configuration with default values rooted at `entries_dir`
    pub fn new(entries_dir: PathBuf) -> Self {
        Self {
            entries_dir,
            static_dir: PathBuf::from("static"),
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: DEFAULT_PORT,
            seed: None,
            log_level: "info".to_string(),
            log_file: None,
        }
    }

    /// Get the socket address for binding
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(PathBuf::from("entries"))
    }
}
