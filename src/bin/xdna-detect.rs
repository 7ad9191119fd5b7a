// SPDX-FileCopyrightText: © 2025 xdna-rs contributors
// SPDX-License-Identifier: Apache-2.0

use xdna_kmd::Device;

fn main() {
    let ids = Device::scan();
    if ids.is_empty() {
        println!("No XDNA NPU devices found.");
        return;
    }

    for id in ids {
        match Device::open(id) {
            Ok(device) => {
                print!("accel{id}: {}", device.device_name);
                if let Some(kind) = device.kind {
                    println!(" ({kind})");
                } else {
                    println!();
                }
                if let Ok(aie) = device.query_aie_version() {
                    println!("\tAIE version {aie}");
                }
                if let Ok(fw) = device.query_firmware_version() {
                    println!("\tfirmware {fw}");
                }
                if let Ok(clocks) = device.query_clock_metadata() {
                    println!(
                        "\tclocks {} {} MHz, {} {} MHz",
                        clocks.mp_npu_clock.name,
                        clocks.mp_npu_clock.freq_mhz,
                        clocks.h_clock.name,
                        clocks.h_clock.freq_mhz,
                    );
                }
                println!("-----");
            }
            Err(err) => {
                eprintln!("accel{id}: {err}");
            }
        }
    }
}
