use std::env;
use std::net::SocketAddr;

use anyhow::Context;

const DEFAULT_DATABASE_URL: &str = "sqlite://classlog.db?mode=rwc";
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

/// Process configuration, read once at startup and passed down.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Connection string; defaults to an embedded single-file SQLite store
    /// when `DATABASE_URL` is unset.
    pub database_url: String,
    pub bind_addr: SocketAddr,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url =
            env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string());
        let bind_addr = env::var("BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind_addr
            .parse()
            .with_context(|| format!("invalid BIND_ADDR '{bind_addr}'"))?;

        Ok(Self {
            database_url,
            bind_addr,
        })
    }
}
