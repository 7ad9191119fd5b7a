// SPDX-FileCopyrightText: © 2025 xdna-rs contributors
// SPDX-License-Identifier: Apache-2.0

use clap::Parser;
use serde_json::json;
use xdna_core::PowerMode;
use xdna_kmd::Device;

#[derive(Parser)]
#[command(name = "xdna-smi")]
#[command(about = "Dump state of an AMD XDNA NPU device")]
struct Args {
    /// Device index to inspect (/dev/accel/accelN)
    #[arg(short, long, default_value_t = 0)]
    device: usize,

    /// Emit JSON instead of text
    #[arg(long)]
    json: bool,

    /// Set the power mode before dumping (default/low/medium/high/turbo)
    #[arg(long)]
    set_power_mode: Option<PowerMode>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let device = Device::open(args.device)?;

    if let Some(mode) = args.set_power_mode {
        device.set_power_mode(mode)?;
    }

    let firmware = match device.query_firmware_version() {
        Ok(firmware) => firmware,
        // Fall back to the sysfs attribute on drivers without the query.
        Err(_) => device.firmware_version_sysfs()?,
    };
    let aie_version = device.query_aie_version()?;
    let metadata = device.query_aie_metadata()?;
    let clocks = device.query_clock_metadata()?;
    let power_mode = device.get_power_mode()?;

    // Not all driver generations implement these queries.
    let force_preempt = device.get_force_preempt_state().ok();
    let sensors = device.query_sensors().unwrap_or_default();
    let contexts = device.query_hw_contexts().unwrap_or_default();
    let clients = device.clients();

    if args.json {
        let output = json!({
            "device": format!("accel{}", device.id),
            "name": device.device_name,
            "kind": device.kind.map(|kind| kind.to_string()),
            "pci": {
                "vendor": device.physical.vendor_id,
                "device": device.physical.device_id,
                "revision": device.physical.revision_id,
                "class": device.physical.class,
            },
            "firmware": firmware.to_string(),
            "aie": {
                "version": aie_version.to_string(),
                "cols": metadata.cols,
                "rows": metadata.rows,
                "col_size": metadata.col_size,
            },
            "clocks": {
                "mp_npu_clock": { "name": clocks.mp_npu_clock.name, "freq_mhz": clocks.mp_npu_clock.freq_mhz },
                "h_clock": { "name": clocks.h_clock.name, "freq_mhz": clocks.h_clock.freq_mhz },
            },
            "power_mode": power_mode.to_string(),
            "force_preempt": force_preempt,
            "sensors": sensors.iter().map(|s| json!({
                "label": s.label,
                "input": s.input,
                "average": s.average,
                "highest": s.highest,
                "units": s.units,
                "unitm": s.unitm,
            })).collect::<Vec<_>>(),
            "contexts": contexts.iter().map(|ctx| json!({
                "context_id": ctx.context_id,
                "hwctx_id": ctx.hwctx_id,
                "pid": ctx.pid,
                "start_col": ctx.start_col,
                "num_col": ctx.num_col,
                "submissions": ctx.command_submissions,
                "completions": ctx.command_completions,
                "migrations": ctx.migrations,
                "preemptions": ctx.preemptions,
                "errors": ctx.errors,
                "priority": ctx.priority,
            })).collect::<Vec<_>>(),
            "clients": clients.iter().map(|client| json!({
                "pid": client.pid,
                "name": client.name,
                "total_memory_kib": client.usage.total_memory,
                "shared_memory_kib": client.usage.shared_memory,
                "active_memory_kib": client.usage.active_memory,
                "npu_time_ns": client.usage.npu,
            })).collect::<Vec<_>>(),
        });

        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    print!("accel{}: {}", device.id, device.device_name);
    if let Some(kind) = device.kind {
        println!(" [{kind}]");
    } else {
        println!();
    }
    println!(
        "  pci: {:04x}:{:04x} rev {:#04x} class {:#08x}",
        device.physical.vendor_id,
        device.physical.device_id,
        device.physical.revision_id,
        device.physical.class,
    );
    println!("  firmware: {firmware}");
    println!(
        "  aie: version {aie_version}, {}x{} tiles, column size {} bytes",
        metadata.cols, metadata.rows, metadata.col_size,
    );
    println!(
        "  clocks: {} {} MHz, {} {} MHz",
        clocks.mp_npu_clock.name,
        clocks.mp_npu_clock.freq_mhz,
        clocks.h_clock.name,
        clocks.h_clock.freq_mhz,
    );
    println!("  power mode: {power_mode}");
    if let Some(enabled) = force_preempt {
        println!(
            "  force preempt: {}",
            if enabled { "enabled" } else { "disabled" }
        );
    }

    for sensor in &sensors {
        println!(
            "  sensor {}: {} {} (avg {}, peak {})",
            sensor.label, sensor.input, sensor.units, sensor.average, sensor.highest,
        );
    }

    if !contexts.is_empty() {
        println!("  hardware contexts:");
        for ctx in &contexts {
            println!(
                "    ctx {} (hwctx {}, pid {}): cols {}..{}, {}/{} commands, {} errors",
                ctx.context_id,
                ctx.hwctx_id,
                ctx.pid,
                ctx.start_col,
                ctx.start_col + ctx.num_col,
                ctx.command_completions,
                ctx.command_submissions,
                ctx.errors,
            );
        }
    }

    if !clients.is_empty() {
        println!("  clients:");
        for client in &clients {
            println!(
                "    {} (pid {}): {} KiB total, {} KiB shared, {} KiB active, {} ns npu time",
                client.name,
                client.pid,
                client.usage.total_memory,
                client.usage.shared_memory,
                client.usage.active_memory,
                client.usage.npu,
            );
        }
    }

    Ok(())
}
