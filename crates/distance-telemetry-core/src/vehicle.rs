//! Vehicle sampling
//!
//! Turns raw rigidbody state from the host into a [`TelemetryRecord`].
//!
//! The tracker keeps the previous local velocity so it can report acceleration
//! in g between fixed physics steps.

use crate::record::{fold_angle, Inputs, TelemetryRecord, Tire, Vec3};

/// Standard gravity in m/s²
pub const GRAVITY: f32 = 9.81;

/// Default fixed physics step (50 Hz)
pub const DEFAULT_FIXED_DELTA_TIME: f32 = 0.02;

/// Raw per-tick car state as exposed by the host
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct VehicleState {
    /// Euler angles in degrees, each in [0, 360)
    pub euler_angles: Vec3,
    /// Velocity in world space
    pub velocity: Vec3,
    /// Velocity in the car's local frame
    pub local_velocity: Vec3,
    /// Angular velocity in world space
    pub angular_velocity: Vec3,
    /// Angular velocity in the car's local frame
    pub local_angular_velocity: Vec3,
    /// Rigidbody mass
    pub mass: f32,
    /// Speed in km/h as reported by the vehicle
    pub speed_kph: f32,
    /// Driver inputs
    pub inputs: Inputs,
    /// Player has finished
    pub finished: bool,
    /// All wheels in contact
    pub all_wheels_grounded: bool,
    /// Car component active and enabled
    pub active: bool,
    /// Tires in order FL, FR, RL, RR
    pub tires: [Tire; 4],
}

/// Derives records from successive vehicle states
#[derive(Debug, Clone)]
pub struct MotionTracker {
    fixed_delta_time: f32,
    previous_local_velocity: Vec3,
}

impl MotionTracker {
    /// Create a tracker for a fixed physics step in seconds
    pub fn new(fixed_delta_time: f32) -> Self {
        let fixed_delta_time = if fixed_delta_time > 0.0 && fixed_delta_time.is_finite() {
            fixed_delta_time
        } else {
            tracing::warn!(
                fixed_delta_time,
                "Non-positive physics step, using {}",
                DEFAULT_FIXED_DELTA_TIME
            );
            DEFAULT_FIXED_DELTA_TIME
        };

        Self {
            fixed_delta_time,
            previous_local_velocity: Vec3::ZERO,
        }
    }

    /// Physics step used for acceleration
    pub fn fixed_delta_time(&self) -> f32 {
        self.fixed_delta_time
    }

    /// Forget the previous velocity
    pub fn reset(&mut self) {
        self.previous_local_velocity = Vec3::ZERO;
    }

    /// Build the record for this tick and remember its velocity for the next one
    pub fn record(&mut self, state: &VehicleState) -> TelemetryRecord {
        let acceleration = state
            .local_velocity
            .sub(&self.previous_local_velocity)
            .scale(1.0 / self.fixed_delta_time / GRAVITY);
        self.previous_local_velocity = state.local_velocity;

        let mut record = TelemetryRecord {
            sequence: 0,
            speed_kph: state.speed_kph,
            mass: state.mass,
            yaw: fold_angle(state.euler_angles.y),
            pitch: fold_angle(state.euler_angles.x),
            roll: -fold_angle(state.euler_angles.z),
            sway: sway(state),
            velocity: state.local_velocity,
            acceleration,
            inputs: state.inputs,
            finished: state.finished,
            all_wheels_grounded: state.all_wheels_grounded,
            active: state.active,
            ..TelemetryRecord::default()
        };
        record.set_tires(state.tires);
        record
    }
}

impl Default for MotionTracker {
    fn default() -> Self {
        Self::new(DEFAULT_FIXED_DELTA_TIME)
    }
}

/// Lateral-force proxy: speed times angular speed, signed by local yaw rate
fn sway(state: &VehicleState) -> f32 {
    let yaw_rate = state.local_angular_velocity.y;
    let sign = if yaw_rate > 0.0 {
        1.0
    } else if yaw_rate < 0.0 {
        -1.0
    } else {
        0.0
    };
    state.velocity.magnitude() * state.angular_velocity.magnitude() * sign
}
