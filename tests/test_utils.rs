// SPDX-FileCopyrightText: © 2025 xdna-rs contributors
// SPDX-License-Identifier: Apache-2.0

//! Common utilities for xdna tests
//!
//! Helper functions shared by the integration tests: detecting whether an
//! NPU is present and opening the first device.

use xdna::xdna_kmd::Device;

/// Checks if an XDNA NPU is available for testing
///
/// Returns false and prints a message if no devices are found.
#[allow(dead_code)]
pub fn hardware_available() -> bool {
    let ids = Device::scan();
    if ids.is_empty() {
        println!("Test SKIPPED: No devices found");
        return false;
    }
    true
}

#[allow(dead_code)]
pub fn first_device() -> Option<Device> {
    for id in Device::scan() {
        match Device::open(id) {
            Ok(device) => return Some(device),
            Err(err) => println!("Skipping accel{id}: {err}"),
        }
    }

    None
}
