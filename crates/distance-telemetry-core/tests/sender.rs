//! Sender tests against a loopback receiver

use std::net::UdpSocket;
use std::time::Duration;

use distance_telemetry_core::protocol::{
    decode, EndpointConfig, SendStatus, TelemetryError, TelemetrySender, RECORD_SIZE,
};
use distance_telemetry_core::record::{TelemetryRecord, Vec3};

fn receiver() -> UdpSocket {
    let socket = UdpSocket::bind("127.0.0.1:0").expect("bind receiver");
    socket
        .set_read_timeout(Some(Duration::from_secs(2)))
        .expect("set timeout");
    socket
}

fn endpoint_for(rx: &UdpSocket) -> EndpointConfig {
    EndpointConfig::new("127.0.0.1", rx.local_addr().unwrap().port() as i32)
}

fn recv_record(rx: &UdpSocket) -> (usize, TelemetryRecord) {
    let mut buf = [0u8; 512];
    let (n, _) = rx.recv_from(&mut buf).expect("Should receive a datagram");
    (n, decode(&buf[..n]).expect("Should decode"))
}

#[test]
fn test_sequence_starts_at_zero_and_increments() {
    let rx = receiver();
    let mut sender = TelemetrySender::new(&endpoint_for(&rx)).expect("sender");

    for _ in 0..3 {
        // Caller-supplied sequence numbers are ignored
        let record = TelemetryRecord {
            sequence: 999,
            ..TelemetryRecord::default()
        };
        assert_eq!(sender.send(record), SendStatus::Sent);
    }

    for expected in 0..3u32 {
        let (len, record) = recv_record(&rx);
        assert_eq!(len, RECORD_SIZE);
        assert_eq!(record.sequence, expected);
    }
    assert_eq!(sender.sequence(), 3);
    assert_eq!(sender.stats().sent, 3);
    assert_eq!(sender.stats().dropped, 0);
}

#[test]
fn test_one_datagram_per_record() {
    let rx = receiver();
    let mut sender = TelemetrySender::new(&endpoint_for(&rx)).expect("sender");

    let record = TelemetryRecord {
        yaw: 200.0,
        velocity: Vec3::new(10.0, 0.0, 0.0),
        ..TelemetryRecord::default()
    };
    sender.send(record);

    let (len, received) = recv_record(&rx);
    assert_eq!(len, RECORD_SIZE);
    assert_eq!(received.yaw, -160.0);
    assert_eq!(received.velocity, Vec3::new(10.0, 0.0, 0.0));
}

#[test]
fn test_failed_send_is_dropped_and_advances_sequence() {
    // Broadcast without SO_BROADCAST is refused locally
    let mut sender =
        TelemetrySender::new(&EndpointConfig::new("255.255.255.255", 9)).expect("sender");

    assert_eq!(sender.send(TelemetryRecord::default()), SendStatus::Dropped);
    assert_eq!(sender.sequence(), 1);
    assert_eq!(sender.stats().dropped, 1);
    assert_eq!(sender.stats().sent, 0);

    assert_eq!(sender.send(TelemetryRecord::default()), SendStatus::Dropped);
    assert_eq!(sender.sequence(), 2);
    assert_eq!(sender.stats().dropped, 2);
}

#[test]
fn test_dispose_twice_is_safe() {
    let rx = receiver();
    let mut sender = TelemetrySender::new(&endpoint_for(&rx)).expect("sender");

    sender.dispose();
    sender.dispose();

    assert!(sender.is_disposed());
    assert_eq!(sender.sequence(), 0);
}

#[test]
fn test_dispose_without_sending() {
    let rx = receiver();
    let mut sender = TelemetrySender::new(&endpoint_for(&rx)).expect("sender");
    sender.dispose();
    assert_eq!(sender.stats().sent, 0);
}

#[test]
fn test_send_after_dispose_does_not_transmit() {
    let rx = receiver();
    rx.set_read_timeout(Some(Duration::from_millis(200)))
        .expect("set timeout");
    let mut sender = TelemetrySender::new(&endpoint_for(&rx)).expect("sender");

    sender.dispose();
    assert_eq!(sender.send(TelemetryRecord::default()), SendStatus::Disposed);
    assert_eq!(sender.sequence(), 0);

    let mut buf = [0u8; 512];
    assert!(rx.recv_from(&mut buf).is_err(), "nothing should arrive");
}

#[test]
fn test_invalid_config_disables_sender() {
    for config in [
        EndpointConfig::new("", 12345),
        EndpointConfig::new("   ", 12345),
        EndpointConfig::new("127.0.0.1", 0),
        EndpointConfig::new("127.0.0.1", 65536),
        EndpointConfig::new("127.0.0.1", -1),
    ] {
        assert!(TelemetrySender::create(&config).is_none(), "{:?}", config);
    }
}

#[test]
fn test_invalid_config_error_kinds() {
    let err = TelemetrySender::new(&EndpointConfig::new("", 12345)).unwrap_err();
    assert!(matches!(err, TelemetryError::InvalidHost));
    assert!(err.is_config_error());

    let err = TelemetrySender::new(&EndpointConfig::new("127.0.0.1", 65536)).unwrap_err();
    assert!(matches!(err, TelemetryError::InvalidPort(65536)));
}

#[test]
fn test_valid_config_creates_sender() {
    let rx = receiver();
    let sender = TelemetrySender::create(&endpoint_for(&rx)).expect("Should create sender");

    assert_eq!(sender.destination(), rx.local_addr().unwrap());
    assert!(!sender.is_disposed());
}
