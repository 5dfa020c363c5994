use std::env;

use thiserror::Error;

const DEFAULT_DATABASE_URL: &str = "sqlite://wordgame.db";
const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:3000";
const DEFAULT_RATE_LIMIT: u64 = 10;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{name} must be a number, got '{value}'")]
    InvalidNumber { name: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TlsConfig {
    pub cert_path: String,
    pub key_path: String,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub http_addr: String,
    pub https_addr: String,
    pub tls: Option<TlsConfig>,
    pub rate_limit_per_second: u64,
    pub log_level: String,
    pub log_file_path: Option<String>,
}

impl Config {
    /// Reads the process environment. Call `dotenvy::dotenv()` first to pick up `.env`.
    pub fn from_env() -> Result<Self, ConfigError> {
        let server_url = env::var("SERVER_URL").unwrap_or_else(|_| DEFAULT_SERVER_URL.to_string());
        let (http_addr, https_addr) = parse_server_addrs(&server_url);

        let tls = match (env::var("SSL_CERT_PATH"), env::var("SSL_KEY_PATH")) {
            (Ok(cert_path), Ok(key_path)) => Some(TlsConfig {
                cert_path,
                key_path,
            }),
            _ => None,
        };

        let rate_limit_per_second = match env::var("RATE_LIMIT_PER_SECOND") {
            Ok(value) => value
                .trim()
                .parse::<u64>()
                .map_err(|_| ConfigError::InvalidNumber {
                    name: "RATE_LIMIT_PER_SECOND",
                    value,
                })?,
            Err(_) => DEFAULT_RATE_LIMIT,
        };

        Ok(Config {
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string()),
            http_addr,
            https_addr,
            tls,
            rate_limit_per_second,
            log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            log_file_path: env::var("LOG_FILE_PATH").ok(),
        })
    }
}

/// Derives the (http, https) bind addresses from the public server URL.
/// An `https://` URL binds plain HTTP on port 80 for redirects.
pub fn parse_server_addrs(server_url: &str) -> (String, String) {
    let url = server_url.trim();

    if let Some(without_protocol) = url.strip_prefix("https://") {
        let port = port_of(without_protocol).unwrap_or("443");
        ("0.0.0.0:80".to_string(), format!("0.0.0.0:{port}"))
    } else {
        let without_protocol = url.trim_start_matches("http://");
        let port = port_of(without_protocol).unwrap_or("80");
        (format!("0.0.0.0:{port}"), "0.0.0.0:443".to_string())
    }
}

fn port_of(host_and_path: &str) -> Option<&str> {
    let host = host_and_path.split('/').next().unwrap_or(host_and_path);
    host.rsplit_once(':').map(|(_, port)| port)
}
