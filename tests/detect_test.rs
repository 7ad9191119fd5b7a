// SPDX-FileCopyrightText: © 2025 xdna-rs contributors
// SPDX-License-Identifier: Apache-2.0

#![cfg(test)]

use serial_test::serial;

/// Test NPU detection
///
/// These tests verify that XDNA devices can be detected and queried through
/// the amdxdna driver.
///
/// Note: These tests require physical hardware to run. By default, they are
/// annotated with #[ignore] to avoid false failures on systems without
/// hardware. To run all hardware tests:
///
///   cargo test --test detect_test --features test_hardware -- --ignored
mod test_utils;

use test_utils::{first_device, hardware_available};

#[test]
fn scan_never_panics() {
    // Must behave on machines without the driver loaded.
    let _ = xdna::xdna_kmd::Device::scan();
}

#[test]
#[serial]
#[cfg_attr(not(feature = "test_hardware"), ignore = "Requires hardware")]
fn npu_detect_test() {
    assert!(hardware_available(), "Test requires hardware");

    let device = first_device().expect("Should open at least one device");

    let aie = device.query_aie_version().unwrap();
    let fw = device.query_firmware_version().unwrap();
    let metadata = device.query_aie_metadata().unwrap();

    assert!(metadata.cols > 0, "AIE array should have columns");
    println!(
        "accel{}: {} AIE {aie} firmware {fw} ({}x{})",
        device.id, device.device_name, metadata.cols, metadata.rows
    );
}

#[test]
#[serial]
#[cfg_attr(not(feature = "test_hardware"), ignore = "Requires hardware")]
fn npu_power_mode_test() {
    assert!(hardware_available(), "Test requires hardware");

    let device = first_device().expect("Should open at least one device");

    let mode = device.get_power_mode().unwrap();
    println!("accel{} power mode: {mode}", device.id);

    // Setting the current mode back is a no-op but exercises SET_STATE.
    device.set_power_mode(mode).unwrap();
    assert_eq!(device.get_power_mode().unwrap(), mode);
}
