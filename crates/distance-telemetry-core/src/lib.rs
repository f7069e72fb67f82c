//! # Distance Telemetry Core Library
//!
//! Core functionality for streaming Distance car telemetry to dashboards and
//! motion rigs.

#![warn(missing_docs)]
#![cfg_attr(docsrs, feature(doc_cfg))]

//!
//! This library provides:
//! - A fixed-size binary telemetry record and its wire codec
//! - A best-effort UDP sender with a monotonic sequence number
//! - Derivation of records from raw vehicle physics
//! - Persisted destination settings
//! - A simulated car for testing without the game
//!
//! ## Example
//!
//! ```rust,no_run
//! use distance_telemetry_core::demo::DemoSource;
//! use distance_telemetry_core::protocol::{EndpointConfig, TelemetrySender};
//! use distance_telemetry_core::source::TelemetryDriver;
//!
//! let sender = TelemetrySender::create(&EndpointConfig::new("127.0.0.1", 12345));
//! let mut driver = TelemetryDriver::new(DemoSource::new(), sender);
//!
//! // Once per physics tick
//! driver.tick();
//!
//! driver.shutdown();
//! ```

pub mod demo;
pub mod protocol;
pub mod record;
pub mod settings;
pub mod source;
pub mod vehicle;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::demo::DemoSource;
    pub use crate::protocol::{
        EndpointConfig, SendStats, SendStatus, TelemetryError, TelemetrySender, RECORD_SIZE,
    };
    pub use crate::record::{fold_angle, Inputs, TelemetryRecord, Tire, Vec3};
    pub use crate::settings::{SettingsError, TelemetrySettings};
    pub use crate::source::{FrameStateSource, TelemetryDriver, TickOutcome};
    pub use crate::vehicle::{MotionTracker, VehicleState};
}

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
