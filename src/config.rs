//! Configuration types for eks-hello.
//!
//! The service runs without any config file at all: every field has a default
//! that reproduces the stock deployment (`0.0.0.0:5000`, greeting `v2`). A
//! file is only read when `EKS_HELLO_CONFIG` points at one, and a file that is
//! present but invalid is rejected before the server opens its port.
//!
//! # Example
//! ```toml
//! [server]
//! host = "0.0.0.0"
//! port = 5000
//!
//! [greeting]
//! version = "v3"
//! message = "Deployed via Argo CD."
//! ```

use std::{
    net::{IpAddr, SocketAddr},
    path::Path,
};

use anyhow::Context;
use serde::Deserialize;

/// Top-level service configuration.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub greeting: GreetingConfig,
}

impl Config {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content =
            std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
        Self::parse(&content)
    }

    /// Load from `path` when given, otherwise fall back to built-in defaults.
    pub fn load_optional(path: Option<&Path>) -> anyhow::Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    fn parse(content: &str) -> anyhow::Result<Self> {
        let config: Self = toml::from_str(content).context("parsing config TOML")?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> anyhow::Result<()> {
        // The greeting is a single line; the body's only newline is the trailing one.
        anyhow::ensure!(
            !self.greeting.version.contains(['\n', '\r']),
            "greeting.version must be a single line"
        );
        anyhow::ensure!(
            !self.greeting.message.contains(['\n', '\r']),
            "greeting.message must be a single line"
        );
        Ok(())
    }
}

/// Listener settings.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct ServerConfig {
    /// Interface to bind (default: all interfaces).
    #[serde(default = "defaults::host")]
    pub host: IpAddr,

    /// Port to bind (default: 5000).
    #[serde(default = "defaults::port")]
    pub port: u16,

    /// Log level override (also controlled by `RUST_LOG` env var).
    #[serde(default)]
    pub log_level: Option<String>,
}

impl ServerConfig {
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: defaults::host(),
            port: defaults::port(),
            log_level: None,
        }
    }
}

/// Text woven into the `GET /` response.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct GreetingConfig {
    /// Release tag shown after "Hello from EKS". Empty drops it entirely.
    #[serde(default = "defaults::version")]
    pub version: String,

    /// Free text placed between the greeting and the `Host:` field.
    #[serde(default = "defaults::message")]
    pub message: String,
}

impl Default for GreetingConfig {
    fn default() -> Self {
        Self {
            version: defaults::version(),
            message: defaults::message(),
        }
    }
}

mod defaults {
    use std::net::{IpAddr, Ipv4Addr};

    pub fn host() -> IpAddr { IpAddr::V4(Ipv4Addr::UNSPECIFIED) }
    pub fn port() -> u16 { 5000 }
    pub fn version() -> String { "v2".into() }
    pub fn message() -> String { "Deployed via GitHub Actions CI/CD.".into() }
}
