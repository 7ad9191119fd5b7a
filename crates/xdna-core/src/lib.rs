// SPDX-FileCopyrightText: © 2025 xdna-rs contributors
// SPDX-License-Identifier: Apache-2.0

use std::fmt;
use std::str::FromStr;

/// NPU generation as exposed by the amdxdna driver.
///
/// The generation is keyed off the PCI device id of the AIE function; an id
/// that is not in the table is reported back to the caller so it can fall
/// back to class-based detection.
#[derive(Clone, Hash, Copy, Debug, PartialEq, Eq)]
pub enum NpuKind {
    /// Phoenix / Hawk Point
    Npu1,
    Npu3,
    /// Strix
    Npu4,
}

impl NpuKind {
    pub fn is_npu1(&self) -> bool {
        matches!(self, NpuKind::Npu1)
    }

    pub fn is_npu3(&self) -> bool {
        matches!(self, NpuKind::Npu3)
    }

    pub fn is_npu4(&self) -> bool {
        matches!(self, NpuKind::Npu4)
    }
}

impl TryFrom<u16> for NpuKind {
    type Error = u16;

    fn try_from(device_id: u16) -> Result<Self, Self::Error> {
        match device_id {
            0x1502 => Ok(NpuKind::Npu1),
            0x1569 | 0x1640 => Ok(NpuKind::Npu3),
            0x17f0 => Ok(NpuKind::Npu4),
            id => Err(id),
        }
    }
}

impl FromStr for NpuKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "npu1" => Ok(NpuKind::Npu1),
            "npu3" => Ok(NpuKind::Npu3),
            "npu4" => Ok(NpuKind::Npu4),
            err => Err(err.to_string()),
        }
    }
}

impl fmt::Display for NpuKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NpuKind::Npu1 => write!(f, "NPU1"),
            NpuKind::Npu3 => write!(f, "NPU3"),
            NpuKind::Npu4 => write!(f, "NPU4"),
        }
    }
}

/// Power mode of the NPU, the raw values match the UAPI POWER_MODE_*
/// constants.
#[derive(Clone, Copy, Debug, Default, Hash, PartialEq, Eq)]
pub enum PowerMode {
    #[default]
    Default,
    Low,
    Medium,
    High,
    Turbo,
    Unknown(u8),
}

impl From<u8> for PowerMode {
    fn from(value: u8) -> Self {
        match value {
            0 => Self::Default,
            1 => Self::Low,
            2 => Self::Medium,
            3 => Self::High,
            4 => Self::Turbo,
            val => Self::Unknown(val),
        }
    }
}

impl From<PowerMode> for u8 {
    fn from(value: PowerMode) -> Self {
        match value {
            PowerMode::Default => 0,
            PowerMode::Low => 1,
            PowerMode::Medium => 2,
            PowerMode::High => 3,
            PowerMode::Turbo => 4,
            PowerMode::Unknown(val) => val,
        }
    }
}

impl FromStr for PowerMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "default" => Ok(PowerMode::Default),
            "low" => Ok(PowerMode::Low),
            "medium" => Ok(PowerMode::Medium),
            "high" => Ok(PowerMode::High),
            "turbo" => Ok(PowerMode::Turbo),
            err => Err(err.to_string()),
        }
    }
}

impl fmt::Display for PowerMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PowerMode::Default => write!(f, "default"),
            PowerMode::Low => write!(f, "low"),
            PowerMode::Medium => write!(f, "medium"),
            PowerMode::High => write!(f, "high"),
            PowerMode::Turbo => write!(f, "turbo"),
            PowerMode::Unknown(val) => write!(f, "unknown({val})"),
        }
    }
}

/// AIE array hardware version.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AieVersion {
    pub major: u32,
    pub minor: u32,
}

impl fmt::Display for AieVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

/// NPU firmware version as reported by the driver.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FirmwareVersion {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
    pub build: u32,
}

impl fmt::Display for FirmwareVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.{}.{}.{}",
            self.major, self.minor, self.patch, self.build
        )
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn npu_kind_from_device_id() {
        assert_eq!(NpuKind::try_from(0x1502), Ok(NpuKind::Npu1));
        assert_eq!(NpuKind::try_from(0x1569), Ok(NpuKind::Npu3));
        assert_eq!(NpuKind::try_from(0x1640), Ok(NpuKind::Npu3));
        assert_eq!(NpuKind::try_from(0x17f0), Ok(NpuKind::Npu4));
        assert_eq!(NpuKind::try_from(0xffff), Err(0xffff));
    }

    #[test]
    fn power_mode_round_trip() {
        for raw in 0..=u8::MAX {
            assert_eq!(u8::from(PowerMode::from(raw)), raw);
        }
        assert_eq!(PowerMode::from(4), PowerMode::Turbo);
        assert_eq!(PowerMode::from(9), PowerMode::Unknown(9));
    }

    #[test]
    fn version_display() {
        let fw = FirmwareVersion {
            major: 1,
            minor: 5,
            patch: 2,
            build: 380,
        };
        assert_eq!(fw.to_string(), "1.5.2.380");
        assert_eq!(AieVersion { major: 2, minor: 0 }.to_string(), "2.0");
    }
}
