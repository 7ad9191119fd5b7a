// SPDX-FileCopyrightText: © 2025 xdna-rs contributors
// SPDX-License-Identifier: Apache-2.0

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

pub const VENDOR_AMD: u32 = 0x1022;
pub const VENDOR_ATI: u32 = 0x1002;

const PCI_DEVICES_DIR: &str = "/sys/bus/pci/devices";

const XDNA_NPU3_DEVICES: &[(u32, u32)] = &[
    /* (vendor, device) */
    (VENDOR_AMD, 0x1569),
    (VENDOR_ATI, 0x1640),
];

/// Parses a sysfs hex attribute such as "0x1022\n".
pub(crate) fn parse_hex_attr(contents: &str) -> Option<u32> {
    u32::from_str_radix(contents.trim_end().strip_prefix("0x")?, 16).ok()
}

pub(crate) fn read_hex_attr(path: &Path) -> Option<u32> {
    parse_hex_attr(&fs::read_to_string(path).ok()?)
}

fn is_amd_signal_processing(vendor: u32, class: u32) -> bool {
    // 0x11: Signal Processing Controller, 0x80: Other
    vendor == VENDOR_AMD && class == 0x118000
}

/// Scans /sys/bus/pci/devices for the AIE function of an XDNA NPU and
/// returns its sysfs path. Matches either a known NPU3 id pair or any AMD
/// signal-processing-class function.
pub fn find_npu_pci_function() -> Option<PathBuf> {
    fs::read_dir(PCI_DEVICES_DIR).ok()?.find_map(|dir_entry| {
        let path = dir_entry.ok()?.path();

        let vendor = read_hex_attr(&path.join("vendor"))?;
        if ![VENDOR_AMD, VENDOR_ATI].contains(&vendor) {
            return None;
        }

        let device = read_hex_attr(&path.join("device"))?;
        let class = read_hex_attr(&path.join("class"))?;

        if !XDNA_NPU3_DEVICES.contains(&(vendor, device))
            && !is_amd_signal_processing(vendor, class)
        {
            return None;
        }

        Some(path)
    })
}

/// The marketing name exposed by the driver, with a generated fallback for
/// kernels that do not ship the vbnv attribute.
pub(crate) fn device_name(sysfs_path: &Path, device_id: u16, revision_id: u8) -> String {
    fs::read_to_string(sysfs_path.join("vbnv"))
        .map(|mut s| {
            let _ = s.pop(); // trim '\n'
            s
        })
        .unwrap_or(format!("RyzenAI-npu ({device_id:#06X}:{revision_id:#04X})"))
}

pub(crate) fn firmware_version_string(sysfs_path: &Path) -> io::Result<String> {
    fs::read_to_string(sysfs_path.join("fw_version")).map(|mut s| {
        let _ = s.pop(); // trim '\n'
        s
    })
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn hex_attr_parse() {
        assert_eq!(parse_hex_attr("0x1022\n"), Some(0x1022));
        assert_eq!(parse_hex_attr("0x118000\n"), Some(0x118000));
        assert_eq!(parse_hex_attr("0x00\n"), Some(0));
        assert_eq!(parse_hex_attr("0x17f0"), Some(0x17f0));
        assert_eq!(parse_hex_attr("1022"), None);
        assert_eq!(parse_hex_attr(""), None);
    }

    #[test]
    fn signal_processing_class_match() {
        assert!(is_amd_signal_processing(VENDOR_AMD, 0x118000));
        assert!(!is_amd_signal_processing(VENDOR_ATI, 0x118000));
        assert!(!is_amd_signal_processing(VENDOR_AMD, 0x030000));
    }
}
