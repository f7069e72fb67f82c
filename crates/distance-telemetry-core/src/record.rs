//! Telemetry Record
//!
//! One sampled frame of car state, as it travels on the wire.
//!
//! The record is a plain value type: every field is a fixed-width primitive or a
//! fixed-size composite of them, so its encoded size never varies. Field order here
//! mirrors the wire order in [`crate::protocol::codec`].

use serde::{Deserialize, Serialize};

/// A 3-component float vector (x, y, z)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec3 {
    /// X component
    pub x: f32,
    /// Y component
    pub y: f32,
    /// Z component
    pub z: f32,
}

impl Vec3 {
    /// The zero vector
    pub const ZERO: Vec3 = Vec3 {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    /// Create a new vector
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Euclidean length
    pub fn magnitude(&self) -> f32 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    /// Component-wise difference `self - other`
    pub fn sub(&self, other: &Vec3) -> Vec3 {
        Vec3::new(self.x - other.x, self.y - other.y, self.z - other.z)
    }

    /// Scale every component by `factor`
    pub fn scale(&self, factor: f32) -> Vec3 {
        Vec3::new(self.x * factor, self.y * factor, self.z * factor)
    }
}

/// Driver inputs for one frame
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Inputs {
    /// Throttle, 0..1
    pub gas: f32,
    /// Brake, 0..1
    pub brake: f32,
    /// Steering, -1 (left) .. 1 (right)
    pub steer: f32,
    /// Boost held
    pub boost: bool,
    /// Grip held
    pub grip: bool,
    /// Wings deployed
    pub wings: bool,
}

/// Contact state and hub height of a single wheel
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Tire {
    /// Wheel is touching the ground
    pub contact: bool,
    /// Local vertical position of the wheel hub
    pub position: f32,
}

/// One fixed-size telemetry snapshot
///
/// `sequence` is owned by the sender: whatever value the caller puts there is
/// overwritten with the sender's counter at send time.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TelemetryRecord {
    /// Per-record counter, assigned by the sender
    pub sequence: u32,
    /// Speed in km/h
    pub speed_kph: f32,
    /// Rigidbody mass
    pub mass: f32,
    /// Yaw in degrees, folded to (-180, 180]
    pub yaw: f32,
    /// Pitch in degrees, folded to (-180, 180]
    pub pitch: f32,
    /// Roll in degrees, folded and sign-inverted relative to the engine
    pub roll: f32,
    /// Lateral-force proxy (speed times angular speed, signed by turn direction)
    pub sway: f32,
    /// Velocity in the car's local frame
    pub velocity: Vec3,
    /// Acceleration in the car's local frame, in g
    pub acceleration: Vec3,
    /// Driver inputs
    pub inputs: Inputs,
    /// Player crossed the finish line
    pub finished: bool,
    /// All four wheels touching the ground
    pub all_wheels_grounded: bool,
    /// Car component active and enabled
    pub active: bool,
    /// Reserved flag, always false from the sampling path
    pub reserved_flag: bool,
    /// Reserved float, always zero from the sampling path
    pub reserved_float: f32,
    /// Front-left wheel
    pub tire_front_left: Tire,
    /// Front-right wheel
    pub tire_front_right: Tire,
    /// Rear-left wheel
    pub tire_rear_left: Tire,
    /// Rear-right wheel
    pub tire_rear_right: Tire,
}

impl TelemetryRecord {
    /// The four tires in wire order: FL, FR, RL, RR
    pub fn tires(&self) -> [Tire; 4] {
        [
            self.tire_front_left,
            self.tire_front_right,
            self.tire_rear_left,
            self.tire_rear_right,
        ]
    }

    /// Set all four tires from an array in wire order
    pub fn set_tires(&mut self, tires: [Tire; 4]) {
        let [fl, fr, rl, rr] = tires;
        self.tire_front_left = fl;
        self.tire_front_right = fr;
        self.tire_rear_left = rl;
        self.tire_rear_right = rr;
    }
}

/// Fold an engine angle in degrees into a signed half-circle.
///
/// Anything at or above 180 has 360 subtracted; smaller values pass through.
pub fn fold_angle(angle: f32) -> f32 {
    if angle >= 180.0 {
        angle - 360.0
    } else {
        angle
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fold_angle() {
        assert_eq!(fold_angle(0.0), 0.0);
        assert_eq!(fold_angle(179.999), 179.999);
        assert_eq!(fold_angle(180.0), -180.0);
        assert_eq!(fold_angle(359.0), -1.0);
        assert_eq!(fold_angle(360.0), fold_angle(0.0));
    }

    #[test]
    fn test_fold_angle_is_idempotent_on_folded_values() {
        for angle in [-179.5_f32, -90.0, -1.0, 0.0, 45.0, 179.0] {
            assert_eq!(fold_angle(fold_angle(angle)), fold_angle(angle));
        }
    }

    #[test]
    fn test_tires_order() {
        let mut record = TelemetryRecord::default();
        let tires = [
            Tire { contact: true, position: 1.0 },
            Tire { contact: false, position: 2.0 },
            Tire { contact: true, position: 3.0 },
            Tire { contact: false, position: 4.0 },
        ];
        record.set_tires(tires);

        assert_eq!(record.tire_front_left.position, 1.0);
        assert_eq!(record.tire_rear_right.position, 4.0);
        assert_eq!(record.tires(), tires);
    }

    #[test]
    fn test_vec3_magnitude() {
        assert_eq!(Vec3::new(3.0, 4.0, 0.0).magnitude(), 5.0);
        assert_eq!(Vec3::ZERO.magnitude(), 0.0);
    }
}
