//! UDP telemetry sender
//!
//! Owns one non-blocking socket and one destination for the lifetime of a session.
//! Every `send` stamps the next sequence number, encodes the record, and writes it
//! as a single datagram. Nothing is retried and nothing is awaited; a datagram that
//! cannot be handed to the kernel right away is counted as dropped.
//!
//! Lifecycle: `new`/`create` → `send`* → `dispose`. Disposal is terminal and
//! idempotent; sends after it are no-ops.

use std::io;
use std::net::{Ipv4Addr, Ipv6Addr, SocketAddr, UdpSocket};

use super::{codec, EndpointConfig, TelemetryError};
use crate::record::TelemetryRecord;

/// Result of a single `send`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendStatus {
    /// The whole datagram was accepted by the local socket
    Sent,
    /// The datagram was not transmitted; the sequence number was still consumed
    Dropped,
    /// The sender has been disposed; nothing was encoded or transmitted
    Disposed,
}

/// Running totals for a sender
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SendStats {
    /// Datagrams accepted by the socket
    pub sent: u64,
    /// Datagrams lost to local transmission errors
    pub dropped: u64,
}

/// Best-effort datagram sender for telemetry records
#[derive(Debug)]
pub struct TelemetrySender {
    /// Socket handle; `None` once disposed
    socket: Option<UdpSocket>,
    /// Resolved destination
    destination: SocketAddr,
    /// Next sequence number to assign
    sequence: u32,
    /// Consecutive failed sends, used to keep drop logging quiet
    consecutive_failures: u32,
    stats: SendStats,
}

impl TelemetrySender {
    /// Validate the endpoint, bind a local socket, and prepare to send
    pub fn new(config: &EndpointConfig) -> Result<Self, TelemetryError> {
        let destination = config.resolve()?;

        let bind_addr: SocketAddr = match destination {
            SocketAddr::V4(_) => (Ipv4Addr::UNSPECIFIED, 0).into(),
            SocketAddr::V6(_) => (Ipv6Addr::UNSPECIFIED, 0).into(),
        };
        let socket = UdpSocket::bind(bind_addr)?;
        socket.set_nonblocking(true)?;

        tracing::info!(%destination, "Sending telemetry to {}", config);

        Ok(Self {
            socket: Some(socket),
            destination,
            sequence: 0,
            consecutive_failures: 0,
            stats: SendStats::default(),
        })
    }

    /// Build a sender, or log why not and return `None`.
    ///
    /// Telemetry is optional: a bad configuration disables it for the session
    /// instead of failing the host.
    pub fn create(config: &EndpointConfig) -> Option<Self> {
        match Self::new(config) {
            Ok(sender) => Some(sender),
            Err(e) => {
                tracing::error!(endpoint = %config, error = %e, "Invalid connection settings, telemetry disabled");
                None
            }
        }
    }

    /// Stamp the next sequence number on `record` and transmit it
    pub fn send(&mut self, mut record: TelemetryRecord) -> SendStatus {
        let Some(socket) = self.socket.as_ref() else {
            tracing::debug!("send after dispose ignored");
            return SendStatus::Disposed;
        };

        record.sequence = self.sequence;
        self.sequence = self.sequence.wrapping_add(1);

        let bytes = codec::encode(&record);
        let result = match socket.send_to(&bytes, self.destination) {
            Ok(n) if n == bytes.len() => Ok(()),
            Ok(n) => Err(io::Error::new(
                io::ErrorKind::WriteZero,
                format!("short datagram write: {} of {} bytes", n, bytes.len()),
            )),
            Err(e) => Err(e),
        };

        match result {
            Ok(()) => {
                self.stats.sent += 1;
                self.consecutive_failures = 0;
                tracing::trace!(sequence = record.sequence, "telemetry datagram sent");
                SendStatus::Sent
            }
            Err(e) => {
                self.stats.dropped += 1;
                self.consecutive_failures = self.consecutive_failures.saturating_add(1);
                if self.consecutive_failures == 1 {
                    tracing::warn!(sequence = record.sequence, destination = %self.destination, error = %e, "Failed to send telemetry");
                } else {
                    tracing::debug!(sequence = record.sequence, error = %e, "telemetry datagram dropped");
                }
                SendStatus::Dropped
            }
        }
    }

    /// Release the socket and reset the sequence counter. Safe to call repeatedly.
    pub fn dispose(&mut self) {
        if let Some(socket) = self.socket.take() {
            drop(socket);
            tracing::info!(
                sent = self.stats.sent,
                dropped = self.stats.dropped,
                "Telemetry sender disposed"
            );
        }
        self.sequence = 0;
        self.consecutive_failures = 0;
    }

    /// Whether `dispose` has been called
    pub fn is_disposed(&self) -> bool {
        self.socket.is_none()
    }

    /// Destination address datagrams are sent to
    pub fn destination(&self) -> SocketAddr {
        self.destination
    }

    /// Sequence number the next `send` will assign
    pub fn sequence(&self) -> u32 {
        self.sequence
    }

    /// Sent and dropped totals
    pub fn stats(&self) -> SendStats {
        self.stats
    }
}
