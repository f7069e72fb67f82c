//! Endpoint configuration
//!
//! Destination host and port for the telemetry stream, validated once at startup.

use serde::{Deserialize, Serialize};
use std::net::{SocketAddr, ToSocketAddrs};

use super::TelemetryError;

/// Where telemetry datagrams are sent
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndpointConfig {
    /// IP literal or hostname
    pub host: String,
    /// Destination port; signed so out-of-range persisted values survive to validation
    pub port: i32,
}

impl EndpointConfig {
    /// Create a new endpoint configuration
    pub fn new(host: impl Into<String>, port: i32) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }

    /// Check host and port without touching the network.
    /// Returns the trimmed host and the port narrowed to `u16`.
    pub fn validate(&self) -> Result<(&str, u16), TelemetryError> {
        let host = self.host.trim();
        if host.is_empty() {
            return Err(TelemetryError::InvalidHost);
        }

        match u16::try_from(self.port) {
            Ok(port) if port > 0 => Ok((host, port)),
            _ => Err(TelemetryError::InvalidPort(self.port)),
        }
    }

    /// Validate, then resolve to the first socket address for the host
    pub fn resolve(&self) -> Result<SocketAddr, TelemetryError> {
        let (host, port) = self.validate()?;

        let mut addrs = (host, port)
            .to_socket_addrs()
            .map_err(|source| TelemetryError::Resolve {
                host: host.to_string(),
                source,
            })?;

        addrs
            .next()
            .ok_or_else(|| TelemetryError::NoAddress(host.to_string()))
    }
}

impl std::fmt::Display for EndpointConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.host.trim(), self.port)
    }
}
