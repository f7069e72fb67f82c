//! Record encoding/decoding
//!
//! Fixed-width binary layout of a [`TelemetryRecord`], one record per datagram.
//!
//! Record format (95 bytes, no padding, producer byte order):
//! - 4 bytes: sequence (u32)
//! - 4 bytes each: speed, mass, yaw, pitch, roll, sway (f32)
//! - 12 bytes each: velocity, acceleration (3 x f32)
//! - 15 bytes: inputs (gas, brake, steer: f32; boost, grip, wings: bool)
//! - 1 byte each: finished, all wheels grounded, active, reserved flag (bool)
//! - 4 bytes: reserved float (f32)
//! - 5 bytes each: tires FL, FR, RL, RR (contact: bool, position: f32)
//!
//! Booleans are one byte, `1` or `0`. Yaw and pitch are folded with
//! [`fold_angle`] on the way out. Roll is written as sampled: it is folded and
//! sign-inverted in one step by [`crate::vehicle::MotionTracker`], so a second fold
//! would turn +180 into -180.

use byteorder::{ByteOrder, NativeEndian};

use super::TelemetryError;
use crate::record::{fold_angle, Inputs, TelemetryRecord, Tire, Vec3};

const F32_SIZE: usize = 4;
const BOOL_SIZE: usize = 1;
const VEC3_SIZE: usize = 3 * F32_SIZE;
const INPUTS_SIZE: usize = 3 * F32_SIZE + 3 * BOOL_SIZE;
const TIRE_SIZE: usize = BOOL_SIZE + F32_SIZE;

/// Encoded size of one record in bytes
pub const RECORD_SIZE: usize = 4 // sequence
    + 6 * F32_SIZE // speed, mass, yaw, pitch, roll, sway
    + 2 * VEC3_SIZE // velocity, acceleration
    + INPUTS_SIZE
    + 4 * BOOL_SIZE // finished, grounded, active, reserved
    + F32_SIZE // reserved float
    + 4 * TIRE_SIZE;

/// Encode a record in the producing platform's byte order
pub fn encode(record: &TelemetryRecord) -> [u8; RECORD_SIZE] {
    encode_with::<NativeEndian>(record)
}

/// Encode a record with an explicit byte order
pub fn encode_with<B: ByteOrder>(record: &TelemetryRecord) -> [u8; RECORD_SIZE] {
    let mut buf = [0u8; RECORD_SIZE];
    let mut w = FieldWriter::<B>::new(&mut buf);

    w.u32(record.sequence);
    w.f32(record.speed_kph);
    w.f32(record.mass);
    w.f32(fold_angle(record.yaw));
    w.f32(fold_angle(record.pitch));
    w.f32(record.roll);
    w.f32(record.sway);
    w.vec3(&record.velocity);
    w.vec3(&record.acceleration);
    w.inputs(&record.inputs);
    w.bool(record.finished);
    w.bool(record.all_wheels_grounded);
    w.bool(record.active);
    w.bool(record.reserved_flag);
    w.f32(record.reserved_float);
    for tire in record.tires() {
        w.tire(&tire);
    }

    debug_assert_eq!(w.offset, RECORD_SIZE);
    buf
}

/// Decode a record written in the producing platform's byte order
pub fn decode(data: &[u8]) -> Result<TelemetryRecord, TelemetryError> {
    decode_with::<NativeEndian>(data)
}

/// Decode a record with an explicit byte order
pub fn decode_with<B: ByteOrder>(data: &[u8]) -> Result<TelemetryRecord, TelemetryError> {
    if data.len() != RECORD_SIZE {
        return Err(TelemetryError::InvalidLength {
            expected: RECORD_SIZE,
            actual: data.len(),
        });
    }

    let mut r = FieldReader::<B>::new(data);
    let mut record = TelemetryRecord {
        sequence: r.u32(),
        speed_kph: r.f32(),
        mass: r.f32(),
        yaw: r.f32(),
        pitch: r.f32(),
        roll: r.f32(),
        sway: r.f32(),
        velocity: r.vec3(),
        acceleration: r.vec3(),
        inputs: r.inputs(),
        finished: r.bool(),
        all_wheels_grounded: r.bool(),
        active: r.bool(),
        reserved_flag: r.bool(),
        reserved_float: r.f32(),
        ..TelemetryRecord::default()
    };
    record.set_tires([r.tire(), r.tire(), r.tire(), r.tire()]);

    Ok(record)
}

/// Cursor writing fixed-width fields into a record buffer
struct FieldWriter<'a, B> {
    buf: &'a mut [u8],
    offset: usize,
    _order: std::marker::PhantomData<B>,
}

impl<'a, B: ByteOrder> FieldWriter<'a, B> {
    fn new(buf: &'a mut [u8]) -> Self {
        Self {
            buf,
            offset: 0,
            _order: std::marker::PhantomData,
        }
    }

    fn next(&mut self, len: usize) -> &mut [u8] {
        let start = self.offset;
        self.offset += len;
        &mut self.buf[start..start + len]
    }

    fn u32(&mut self, value: u32) {
        B::write_u32(self.next(4), value);
    }

    fn f32(&mut self, value: f32) {
        B::write_f32(self.next(F32_SIZE), value);
    }

    fn bool(&mut self, value: bool) {
        self.next(BOOL_SIZE)[0] = u8::from(value);
    }

    fn vec3(&mut self, v: &Vec3) {
        self.f32(v.x);
        self.f32(v.y);
        self.f32(v.z);
    }

    fn inputs(&mut self, inputs: &Inputs) {
        self.f32(inputs.gas);
        self.f32(inputs.brake);
        self.f32(inputs.steer);
        self.bool(inputs.boost);
        self.bool(inputs.grip);
        self.bool(inputs.wings);
    }

    fn tire(&mut self, tire: &Tire) {
        self.bool(tire.contact);
        self.f32(tire.position);
    }
}

/// Cursor reading fixed-width fields from a record buffer.
/// Callers check the total length up front.
struct FieldReader<'a, B> {
    data: &'a [u8],
    offset: usize,
    _order: std::marker::PhantomData<B>,
}

impl<'a, B: ByteOrder> FieldReader<'a, B> {
    fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            offset: 0,
            _order: std::marker::PhantomData,
        }
    }

    fn next(&mut self, len: usize) -> &'a [u8] {
        let data = self.data;
        let start = self.offset;
        self.offset += len;
        &data[start..start + len]
    }

    fn u32(&mut self) -> u32 {
        B::read_u32(self.next(4))
    }

    fn f32(&mut self) -> f32 {
        B::read_f32(self.next(F32_SIZE))
    }

    fn bool(&mut self) -> bool {
        self.next(BOOL_SIZE)[0] != 0
    }

    fn vec3(&mut self) -> Vec3 {
        Vec3::new(self.f32(), self.f32(), self.f32())
    }

    fn inputs(&mut self) -> Inputs {
        Inputs {
            gas: self.f32(),
            brake: self.f32(),
            steer: self.f32(),
            boost: self.bool(),
            grip: self.bool(),
            wings: self.bool(),
        }
    }

    fn tire(&mut self) -> Tire {
        Tire {
            contact: self.bool(),
            position: self.f32(),
        }
    }
}
