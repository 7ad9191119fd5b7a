// SPDX-FileCopyrightText: © 2025 xdna-rs contributors
// SPDX-License-Identifier: Apache-2.0

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DeviceOpenError {
    #[error("Failed to open device /dev/accel/accel{id}: {source}")]
    DeviceOpenFailed { id: usize, source: std::io::Error },

    #[error("Failed to read sysfs attribute {attr} for device {id}: {source}")]
    SysfsReadFailed {
        id: usize,
        attr: &'static str,
        source: std::io::Error,
    },

    #[error("Malformed sysfs attribute {attr} for device {id}")]
    SysfsParseFailed { id: usize, attr: &'static str },
}

#[derive(Error, Debug)]
pub enum DeviceError {
    #[error("ioctl {name} failed for device {id} with: {source}")]
    IoctlError {
        name: &'static str,
        id: usize,
        source: nix::Error,
    },

    #[error("CU config of {size} bytes exceeds the 4KiB config buffer limit")]
    ConfigTooLarge { size: usize },

    #[error("Submitted an empty command list to device {id}")]
    NoCommandHandles { id: usize },

    #[error("BO mapping failed for device {id} with error {source}")]
    BoMappingFailed { id: usize, source: std::io::Error },

    #[error("BO {handle} has no mmap offset; it is not mappable")]
    BoNotMappable { handle: u32 },

    #[error("{0}")]
    DeviceOpenError(#[from] DeviceOpenError),
}
