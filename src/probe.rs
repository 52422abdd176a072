//! `eks-hello --healthcheck`: probe our own `/health` and report via exit code.
//!
//! This lets the container image declare a Docker `HEALTHCHECK` without
//! shipping curl or wget.

use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr};

use crate::config::Config;

/// Address the running server is reachable on from inside its own container.
///
/// A wildcard bind is checked on loopback of the same family; any concrete
/// host is checked as-is. `EKS_HELLO_PORT` overrides the configured port.
pub fn target(config: &Config) -> SocketAddr {
    let host = match config.server.host {
        IpAddr::V4(ip) if ip.is_unspecified() => IpAddr::V4(Ipv4Addr::LOCALHOST),
        IpAddr::V6(ip) if ip.is_unspecified() => IpAddr::V6(Ipv6Addr::LOCALHOST),
        ip => ip,
    };
    let port = std::env::var("EKS_HELLO_PORT")
        .ok()
        .and_then(|v| v.parse::<u16>().ok())
        .unwrap_or(config.server.port);
    SocketAddr::new(host, port)
}

/// `SocketAddr`'s `Display` already brackets IPv6 hosts.
pub fn health_url(addr: SocketAddr) -> String {
    format!("http://{addr}/health")
}

/// `Ok(true)` on any 2xx. Connection failures are errors, not `false`.
pub async fn check(url: &str) -> anyhow::Result<bool> {
    let resp = reqwest::get(url).await?;
    Ok(resp.status().is_success())
}

/// Why a check failed, for stderr; `None` when it passed.
pub fn failure(url: &str, outcome: &anyhow::Result<bool>) -> Option<String> {
    match outcome {
        Ok(true) => None,
        Ok(false) => Some(format!("healthcheck: {url} returned a non-2xx status")),
        Err(e) => Some(format!("healthcheck: {url} unreachable: {e:#}")),
    }
}
