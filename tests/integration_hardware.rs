//! Tests requiring actual serial hardware.
//!
//! These tests are ignored by default.
//!
//! ```bash
//! export TEST_PORT=COM13                 # or /dev/ttyUSB0 on Linux
//! export TEST_BAUD=115200                # optional, default: 115200
//! cargo test --features hardware-tests -- --ignored
//! ```

#![cfg(feature = "hardware-tests")]

use serial_line_monitor::monitor::{
    Console, Language, LineMonitor, MonitorSettings, SharedBuffer, StopFlag,
};
use serial_line_monitor::port::{
    list_ports, PortConfiguration, SerialPortAdapter, SyncSerialPort, SystemPortOpener,
};
use std::env;
use std::time::Duration;

/// Get the test port from environment variable.
fn get_test_port() -> Option<String> {
    env::var("TEST_PORT").ok()
}

/// Get the test baud rate from environment variable (default: 115200).
fn get_test_baud() -> u32 {
    env::var("TEST_BAUD")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(115200)
}

/// Skip test if hardware is not available.
fn skip_without_hardware() -> Option<String> {
    let port = get_test_port();
    if port.is_none() {
        println!("Skipping hardware test: TEST_PORT not set");
    }
    port
}

#[test]
#[ignore] // Run with --ignored flag
fn test_real_port_open_close() {
    let Some(port_name) = skip_without_hardware() else {
        return;
    };

    let config = PortConfiguration::new(&port_name, get_test_baud(), Duration::from_secs(1));
    let mut port = SyncSerialPort::open(&config).expect("Failed to open test port");
    assert_eq!(port.name(), port_name);
    assert!(port.bytes_to_read().is_ok());

    port.close().expect("Failed to close test port");
    assert!(port.bytes_to_read().is_err());
}

#[test]
#[ignore]
fn test_real_port_monitor_round() {
    let Some(port_name) = skip_without_hardware() else {
        return;
    };

    let settings = MonitorSettings::new(PortConfiguration::new(
        port_name,
        get_test_baud(),
        Duration::from_millis(200),
    ));
    let buffer = SharedBuffer::new();
    let stop = StopFlag::new();
    let flag = stop.clone();
    let monitor = LineMonitor::new(
        SystemPortOpener,
        settings,
        Console::new(buffer.clone(), Language::English),
        stop,
    );

    let timer = std::thread::spawn(move || {
        std::thread::sleep(Duration::from_secs(2));
        flag.raise();
    });
    monitor.run().expect("monitor run failed");
    timer.join().unwrap();

    assert!(buffer.contents().ends_with("Port closed\n"));
}

#[test]
#[ignore]
fn test_list_ports_includes_test_port() {
    let Some(port_name) = skip_without_hardware() else {
        return;
    };

    let ports = list_ports().expect("Failed to enumerate ports");
    assert!(ports.iter().any(|p| p.port_name == port_name));
}
