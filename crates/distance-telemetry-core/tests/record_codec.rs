//! Wire codec tests: fixed size, determinism, round trips

use distance_telemetry_core::protocol::codec::{decode_with, encode_with};
use distance_telemetry_core::protocol::{decode, encode, RECORD_SIZE};
use distance_telemetry_core::record::{Inputs, TelemetryRecord, Tire, Vec3};
use pretty_assertions::assert_eq;

fn busy_record() -> TelemetryRecord {
    let mut record = TelemetryRecord {
        sequence: 123_456,
        speed_kph: 311.25,
        mass: 1400.0,
        yaw: -12.5,
        pitch: 3.75,
        roll: -0.5,
        sway: 42.0,
        velocity: Vec3::new(1.0, -2.0, 86.5),
        acceleration: Vec3::new(0.25, 0.0, -1.5),
        inputs: Inputs {
            gas: 1.0,
            brake: 0.0,
            steer: -0.35,
            boost: true,
            grip: false,
            wings: true,
        },
        finished: false,
        all_wheels_grounded: true,
        active: true,
        reserved_flag: false,
        reserved_float: 0.0,
        ..TelemetryRecord::default()
    };
    record.set_tires([
        Tire { contact: true, position: -0.251 },
        Tire { contact: true, position: -0.249 },
        Tire { contact: false, position: -0.35 },
        Tire { contact: true, position: -0.24 },
    ]);
    record
}

#[test]
fn test_encoded_length_is_fixed() {
    assert_eq!(encode(&TelemetryRecord::default()).len(), RECORD_SIZE);
    assert_eq!(encode(&busy_record()).len(), RECORD_SIZE);
}

#[test]
fn test_encode_is_deterministic() {
    let record = busy_record();
    let copy = record;
    assert_eq!(encode(&record), encode(&record));
    assert_eq!(encode(&record), encode(&copy));
}

#[test]
fn test_round_trip_with_folded_yaw() {
    let record = TelemetryRecord {
        sequence: 5,
        yaw: 200.0,
        velocity: Vec3::new(10.0, 0.0, 0.0),
        acceleration: Vec3::ZERO,
        ..TelemetryRecord::default()
    };

    let decoded = decode(&encode(&record)).expect("Should decode");

    let expected = TelemetryRecord {
        yaw: -160.0,
        ..record
    };
    assert_eq!(decoded, expected);
    assert!(!decoded.finished && !decoded.all_wheels_grounded && !decoded.active);
}

#[test]
fn test_round_trip_preserves_every_field() {
    let record = busy_record();
    let decoded = decode(&encode(&record)).expect("Should decode");
    assert_eq!(decoded, record);
}

#[test]
fn test_encode_decode_encode_is_byte_identical() {
    let mut record = busy_record();
    record.yaw = 270.0;
    record.pitch = 180.0;

    let first = encode(&record);
    let second = encode(&decode(&first).expect("Should decode"));
    assert_eq!(first, second);
}

#[test]
fn test_explicit_byte_order_round_trip() {
    use byteorder::BigEndian;

    let record = busy_record();
    let bytes = encode_with::<BigEndian>(&record);
    let decoded = decode_with::<BigEndian>(&bytes).expect("Should decode");

    assert_eq!(decoded, record);
    assert_eq!(&bytes[0..4], &123_456u32.to_be_bytes());
}
