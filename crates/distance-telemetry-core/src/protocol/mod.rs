//! Telemetry Wire Protocol
//!
//! Fixed-size binary records sent one per UDP datagram.
//!
//! There is no handshake, no framing beyond "one datagram, one record", and no
//! receive path. Consumers detect gaps and reordering from the sequence number.

pub mod codec;
mod config;
mod error;
mod sender;

pub use codec::{decode, encode, RECORD_SIZE};
pub use config::EndpointConfig;
pub use error::TelemetryError;
pub use sender::{SendStats, SendStatus, TelemetrySender};

/// Default destination host
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Default destination port
pub const DEFAULT_PORT: i32 = 12345;
