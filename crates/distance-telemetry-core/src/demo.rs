//! Demo Mode - Simulated car for testing without the game
//!
//! Generates plausible vehicle state for dashboard testing without a running host.
//! Simulates a car cruising around a long loop with random boost bursts and the
//! occasional jump.

use rand::rngs::StdRng;
use rand::Rng;
use rand::SeedableRng;

use crate::record::{Inputs, TelemetryRecord, Tire, Vec3};
use crate::source::FrameStateSource;
use crate::vehicle::{MotionTracker, VehicleState};

const CRUISE_KPH: f64 = 180.0;
const CAR_MASS: f32 = 1400.0;
const HUB_REST_HEIGHT: f32 = -0.25;
const HUB_DROOP_HEIGHT: f32 = -0.35;

/// Simulated car implementing [`FrameStateSource`]
pub struct DemoSource {
    /// Time of the first update (ms)
    start_time_ms: Option<u64>,
    /// Last update time (ms)
    last_update_ms: u64,
    /// Time of next boost burst (ms from start)
    next_boost_at_ms: u64,
    /// Current drive phase
    drive_state: DriveState,
    /// Current speed (smoothed)
    speed_kph: f64,
    /// Target speed for current boost
    boost_target_kph: f64,
    /// Heading in degrees
    heading_deg: f64,
    /// Airborne until this time (ms from start)
    airborne_until_ms: Option<u64>,
    /// Clock used when driven through `FrameStateSource`
    clock_ms: u64,
    /// Clock advance per sample
    step_ms: u64,
    tracker: MotionTracker,
    rng: StdRng,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum DriveState {
    /// Holding cruise speed
    Cruise,
    /// Boost held, speed rising
    Boost { start_ms: u64 },
    /// Off throttle, speed falling back to cruise
    Coast { start_ms: u64 },
}

impl Default for DemoSource {
    fn default() -> Self {
        Self::new()
    }
}

impl DemoSource {
    /// Create a new demo source seeded from entropy
    pub fn new() -> Self {
        Self::from_rng(StdRng::from_entropy())
    }

    /// Create a reproducible demo source
    pub fn with_seed(seed: u64) -> Self {
        Self::from_rng(StdRng::seed_from_u64(seed))
    }

    fn from_rng(mut rng: StdRng) -> Self {
        let first_boost = rng.gen_range(3000..6000);
        let tracker = MotionTracker::default();
        let step_ms = (tracker.fixed_delta_time() * 1000.0).round() as u64;

        Self {
            start_time_ms: None,
            last_update_ms: 0,
            next_boost_at_ms: first_boost,
            drive_state: DriveState::Cruise,
            speed_kph: CRUISE_KPH,
            boost_target_kph: 0.0,
            heading_deg: 0.0,
            airborne_until_ms: None,
            clock_ms: 0,
            step_ms,
            tracker,
            rng,
        }
    }

    /// Set how far the internal clock advances per `sample` (default: one physics step).
    /// The motion tracker is rebuilt so acceleration uses the same step.
    pub fn set_step_ms(&mut self, step_ms: u64) {
        self.step_ms = step_ms.max(1);
        self.tracker = MotionTracker::new(self.step_ms as f32 / 1000.0);
    }

    /// Advance the simulation and return the raw car state
    ///
    /// # Arguments
    /// * `elapsed_ms` - Milliseconds on the caller's clock
    pub fn update(&mut self, elapsed_ms: u64) -> VehicleState {
        let start = *self.start_time_ms.get_or_insert(elapsed_ms);
        let sim_time = elapsed_ms.saturating_sub(start);
        let delta_ms = elapsed_ms.saturating_sub(self.last_update_ms.max(start));
        self.last_update_ms = elapsed_ms;
        let dt = delta_ms as f64 / 1000.0;
        let t = sim_time as f64 / 1000.0;

        self.update_drive_state(sim_time);
        self.update_airborne(sim_time);
        let airborne = self.airborne_until_ms.is_some();

        // Smooth speed changes
        let target_kph = self.target_speed(sim_time);
        let rate = if target_kph > self.speed_kph { 120.0 } else { 60.0 }; // kph/sec
        let max_change = rate * dt;
        self.speed_kph += (target_kph - self.speed_kph).clamp(-max_change, max_change);
        let speed_ms = (self.speed_kph / 3.6) as f32;

        // Gentle weave, tighter turns at lower speed
        let steer = (0.4 * (t * 0.5).sin() + 0.1 * (t * 1.7).sin()).clamp(-1.0, 1.0);
        let yaw_rate_deg = if airborne {
            0.0
        } else {
            steer * 45.0 * (CRUISE_KPH / self.speed_kph.max(1.0)).min(1.5)
        };
        self.heading_deg = (self.heading_deg + yaw_rate_deg * dt).rem_euclid(360.0);

        let heading = self.heading_deg.to_radians();
        let vertical = if airborne { 2.0 * (t * 3.0).cos() as f32 } else { 0.0 };
        let velocity = Vec3::new(
            speed_ms * heading.sin() as f32,
            vertical,
            speed_ms * heading.cos() as f32,
        );
        let yaw_rate = (yaw_rate_deg.to_radians()) as f32;

        let pitch_deg = if airborne { -6.0 } else { 0.5 * (t * 0.8).sin() };
        let roll_deg = -steer * 4.0;

        let inputs = match self.drive_state {
            DriveState::Cruise => Inputs {
                gas: 0.7,
                ..Inputs::default()
            },
            DriveState::Boost { .. } => Inputs {
                gas: 1.0,
                boost: true,
                ..Inputs::default()
            },
            DriveState::Coast { .. } => Inputs {
                brake: 0.2,
                ..Inputs::default()
            },
        };
        let inputs = Inputs {
            steer: steer as f32,
            grip: steer.abs() > 0.4,
            wings: airborne,
            ..inputs
        };

        let mut tires = [Tire::default(); 4];
        for (i, tire) in tires.iter_mut().enumerate() {
            let phase = i as f64 * 1.3;
            tire.contact = !airborne;
            tire.position = if airborne {
                HUB_DROOP_HEIGHT
            } else {
                HUB_REST_HEIGHT + 0.01 * (t * 9.0 + phase).sin() as f32
            };
        }

        VehicleState {
            euler_angles: Vec3::new(
                pitch_deg.rem_euclid(360.0) as f32,
                self.heading_deg as f32,
                roll_deg.rem_euclid(360.0) as f32,
            ),
            velocity,
            local_velocity: Vec3::new(0.0, vertical, speed_ms),
            angular_velocity: Vec3::new(0.0, yaw_rate, 0.0),
            local_angular_velocity: Vec3::new(0.0, yaw_rate, 0.0),
            mass: CAR_MASS,
            speed_kph: self.speed_kph as f32,
            inputs,
            finished: false,
            all_wheels_grounded: !airborne,
            active: true,
            tires,
        }
    }

    /// Update the drive state machine
    fn update_drive_state(&mut self, sim_time: u64) {
        const BOOST_MS: u64 = 1500;
        const COAST_MS: u64 = 2500;

        match self.drive_state {
            DriveState::Cruise => {
                if sim_time >= self.next_boost_at_ms {
                    self.boost_target_kph = self.rng.gen_range(300.0..420.0);
                    self.drive_state = DriveState::Boost { start_ms: sim_time };
                }
            }
            DriveState::Boost { start_ms } => {
                if sim_time >= start_ms + BOOST_MS {
                    self.drive_state = DriveState::Coast { start_ms: sim_time };
                }
            }
            DriveState::Coast { start_ms } => {
                if sim_time >= start_ms + COAST_MS {
                    self.drive_state = DriveState::Cruise;
                    let next_interval = self.rng.gen_range(4000..9000);
                    self.next_boost_at_ms = sim_time + next_interval;
                }
            }
        }
    }

    /// Start or end a jump
    fn update_airborne(&mut self, sim_time: u64) {
        const AIRTIME_MS: u64 = 700;

        match self.airborne_until_ms {
            Some(until) if sim_time >= until => self.airborne_until_ms = None,
            Some(_) => {}
            None => {
                // Jumps only happen at speed, roughly once every 20 seconds of boosting
                if matches!(self.drive_state, DriveState::Boost { .. })
                    && self.rng.gen_bool(0.001)
                {
                    self.airborne_until_ms = Some(sim_time + AIRTIME_MS);
                }
            }
        }
    }

    /// Target speed for the current drive state
    fn target_speed(&self, sim_time: u64) -> f64 {
        const COAST_MS: u64 = 2500;

        match self.drive_state {
            DriveState::Cruise => CRUISE_KPH,
            DriveState::Boost { .. } => self.boost_target_kph,
            DriveState::Coast { start_ms } => {
                let progress = (sim_time.saturating_sub(start_ms) as f64 / COAST_MS as f64).min(1.0);
                self.boost_target_kph + (CRUISE_KPH - self.boost_target_kph) * progress
            }
        }
    }
}

impl FrameStateSource for DemoSource {
    fn sample(&mut self) -> Option<TelemetryRecord> {
        self.clock_ms += self.step_ms;
        let state = self.update(self.clock_ms);
        Some(self.tracker.record(&state))
    }
}
