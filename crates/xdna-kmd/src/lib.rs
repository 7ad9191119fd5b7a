// SPDX-FileCopyrightText: © 2025 xdna-rs contributors
// SPDX-License-Identifier: Apache-2.0

use std::mem::MaybeUninit;
use std::os::{
    fd::{AsRawFd, RawFd},
    unix::prelude::FileTypeExt,
};
use std::path::{Path, PathBuf};

mod error;
pub mod fdinfo;
pub mod sysfs;

pub use error::{DeviceError, DeviceOpenError};
pub use fdinfo::{FdInfoClient, FdInfoUsage};

use xdna_core::{AieVersion, FirmwareVersion, NpuKind, PowerMode};
use xdna_uapi as uapi;

const ACCEL_DEV_DIR: &str = "/dev/accel";

/// CONFIG_CTX parameter buffers are capped at PAGE_SIZE by the driver.
const CONFIG_BUFFER_MAX: usize = 4096;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BoType {
    #[default]
    Share,
    DevHeap,
    Dev,
    Cmd,
    Dma,
    Guest,
}

impl From<BoType> for u32 {
    fn from(value: BoType) -> Self {
        match value {
            BoType::Share => uapi::AMDXDNA_BO_SHARE,
            BoType::DevHeap => uapi::AMDXDNA_BO_DEV_HEAP,
            BoType::Dev => uapi::AMDXDNA_BO_DEV,
            BoType::Cmd => uapi::AMDXDNA_BO_CMD,
            BoType::Dma => uapi::AMDXDNA_BO_DMA,
            BoType::Guest => uapi::AMDXDNA_BO_GUEST,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SyncDirection {
    ToDevice,
    FromDevice,
}

impl From<SyncDirection> for u32 {
    fn from(value: SyncDirection) -> Self {
        match value {
            SyncDirection::ToDevice => uapi::SYNC_DIRECT_TO_DEVICE,
            SyncDirection::FromDevice => uapi::SYNC_DIRECT_FROM_DEVICE,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SubmitType {
    #[default]
    ExecBuf,
    Dependency,
    Signal,
}

impl From<SubmitType> for u32 {
    fn from(value: SubmitType) -> Self {
        match value {
            SubmitType::ExecBuf => uapi::AMDXDNA_CMD_SUBMIT_EXEC_BUF,
            SubmitType::Dependency => uapi::AMDXDNA_CMD_SUBMIT_DEPENDENCY,
            SubmitType::Signal => uapi::AMDXDNA_CMD_SUBMIT_SIGNAL,
        }
    }
}

/// Arguments for context creation. The QoS block is passed to the driver by
/// pointer; `Default` gives a context with driver-chosen priority and no UMQ.
#[derive(Clone, Copy, Debug, Default)]
pub struct CtxArgs {
    pub qos: uapi::QosInfo,
    pub umq_bo: u32,
    pub log_buf_bo: u32,
    pub max_opc: u32,
    pub num_tiles: u32,
    pub mem_size: u32,
}

/// A context created on the device. Handles stay valid until
/// [`Device::destroy_ctx`] or the device file is closed.
#[derive(Clone, Copy, Debug)]
pub struct Ctx {
    pub handle: u32,
    pub umq_doorbell: u32,
    pub syncobj_handle: u32,
}

/// A buffer object together with the addresses the driver handed back.
/// `vaddr` is non-zero when the buffer is already CPU-visible; otherwise
/// [`Device::map_bo`] maps it through the DRM fake offset.
#[derive(Clone, Copy, Debug)]
pub struct Bo {
    pub handle: u32,
    pub size: u64,
    pub map_offset: u64,
    pub vaddr: u64,
    pub xdna_addr: u64,
}

/// A clock with its name decoded from the fixed UAPI field.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Clock {
    pub name: String,
    pub freq_mhz: u32,
}

impl From<uapi::QueryClock> for Clock {
    fn from(clock: uapi::QueryClock) -> Self {
        Self {
            name: cstr_to_string(&clock.name),
            freq_mhz: clock.freq_mhz,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ClockMetadata {
    pub mp_npu_clock: Clock,
    pub h_clock: Clock,
}

/// A sensor reading with the fixed-size string fields decoded.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Sensor {
    pub label: String,
    pub input: u32,
    pub max: u32,
    pub average: u32,
    pub highest: u32,
    pub status: String,
    pub units: String,
    pub unitm: i8,
    pub sensor_type: u8,
}

impl From<uapi::QuerySensor> for Sensor {
    fn from(sensor: uapi::QuerySensor) -> Self {
        Self {
            label: cstr_to_string(&sensor.label),
            input: sensor.input,
            max: sensor.max,
            average: sensor.average,
            highest: sensor.highest,
            status: cstr_to_string(&sensor.status),
            units: cstr_to_string(&sensor.units),
            unitm: sensor.unitm,
            sensor_type: sensor.sensor_type,
        }
    }
}

fn cstr_to_string(bytes: &[u8]) -> String {
    let len = bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len());
    String::from_utf8_lossy(&bytes[..len]).into_owned()
}

#[derive(Clone, Copy, Debug)]
pub struct PhysicalDevice {
    pub vendor_id: u16,
    pub device_id: u16,
    pub revision_id: u8,
    pub class: u32,
}

pub struct Device {
    pub id: usize,

    pub physical: PhysicalDevice,
    /// None when the PCI device id is not in the generation table.
    pub kind: Option<NpuKind>,
    pub device_name: String,

    device_fd: std::fs::File,
    sysfs_path: PathBuf,
}

impl Device {
    pub fn open(device_id: usize) -> Result<Device, DeviceOpenError> {
        let fd = std::fs::OpenOptions::new()
            .read(true)
            .write(true)
            .open(format!("{ACCEL_DEV_DIR}/accel{device_id}"));
        let fd = match fd {
            Ok(fd) => fd,
            Err(err) => {
                return Err(DeviceOpenError::DeviceOpenFailed {
                    id: device_id,
                    source: err,
                })
            }
        };

        let sysfs_path = PathBuf::from(format!("/sys/class/accel/accel{device_id}/device"));

        let read_attr = |attr: &'static str| -> Result<u32, DeviceOpenError> {
            let contents = std::fs::read_to_string(sysfs_path.join(attr)).map_err(|err| {
                DeviceOpenError::SysfsReadFailed {
                    id: device_id,
                    attr,
                    source: err,
                }
            })?;
            sysfs::parse_hex_attr(&contents).ok_or(DeviceOpenError::SysfsParseFailed {
                id: device_id,
                attr,
            })
        };

        let vendor_id = read_attr("vendor")? as u16;
        let pci_device_id = read_attr("device")? as u16;
        let revision_id = read_attr("revision")? as u8;
        let class = read_attr("class")?;

        let kind = match NpuKind::try_from(pci_device_id) {
            Ok(kind) => Some(kind),
            Err(id) => {
                tracing::debug!("Unrecognized NPU device id {id:#06x} for accel{device_id}");
                None
            }
        };

        Ok(Device {
            id: device_id,
            physical: PhysicalDevice {
                vendor_id,
                device_id: pci_device_id,
                revision_id,
                class,
            },
            kind,
            device_name: sysfs::device_name(&sysfs_path, pci_device_id, revision_id),
            device_fd: fd,
            sysfs_path,
        })
    }

    pub fn scan() -> Vec<usize> {
        let output = std::fs::read_dir(ACCEL_DEV_DIR);
        let output = match output {
            Ok(output) => output,
            Err(err) => {
                tracing::debug!("When reading {ACCEL_DEV_DIR} for a scan hit error: {err}");
                return Vec::new();
            }
        };

        let mut output = output
            .filter_map(|entry| {
                let entry = entry.ok()?;

                if !entry.file_type().ok()?.is_char_device() {
                    return None;
                }

                let path = entry.path();
                let file_name = path.file_name()?.to_str()?;
                file_name.strip_prefix("accel")?.parse::<usize>().ok()
            })
            .collect::<Vec<_>>();

        output.sort();

        output
    }

    fn fd(&self) -> RawFd {
        self.device_fd.as_raw_fd()
    }

    /// Firmware version string from sysfs, available without issuing an
    /// ioctl.
    pub fn firmware_version_sysfs(&self) -> std::io::Result<FirmwareVersion> {
        sysfs::firmware_version_string(&self.sysfs_path).map(|s| parse_fw_version(&s))
    }

    /// Processes currently holding this device open, with their DRM fdinfo
    /// usage.
    pub fn clients(&self) -> Vec<FdInfoClient> {
        let device_path = format!("{ACCEL_DEV_DIR}/accel{}", self.id);
        fdinfo::device_clients(Path::new(&device_path))
    }

    fn get_info_ioctl(
        &self,
        param: u32,
        buffer: u64,
        buffer_size: u32,
        name: &'static str,
    ) -> Result<u32, DeviceError> {
        let mut arg = uapi::GetInfo {
            param,
            buffer_size,
            buffer,
        };

        if let Err(err) = unsafe { uapi::get_info(self.fd(), &mut arg) } {
            return Err(DeviceError::IoctlError {
                name,
                id: self.id,
                source: err,
            });
        }

        Ok(arg.buffer_size)
    }

    /// # Safety
    ///
    /// `T` must be the exact record the driver writes for `param`.
    unsafe fn query_info<T>(&self, param: u32, name: &'static str) -> Result<T, DeviceError> {
        let mut out: MaybeUninit<T> = MaybeUninit::zeroed();

        self.get_info_ioctl(
            param,
            out.as_mut_ptr() as u64,
            std::mem::size_of::<T>() as u32,
            name,
        )?;

        Ok(out.assume_init())
    }

    fn set_state_ioctl(
        &self,
        param: u32,
        buffer: u64,
        buffer_size: u32,
        name: &'static str,
    ) -> Result<(), DeviceError> {
        let mut arg = uapi::SetState {
            param,
            buffer_size,
            buffer,
        };

        if let Err(err) = unsafe { uapi::set_state(self.fd(), &mut arg) } {
            return Err(DeviceError::IoctlError {
                name,
                id: self.id,
                source: err,
            });
        }

        Ok(())
    }

    pub fn query_aie_version(&self) -> Result<AieVersion, DeviceError> {
        let version: uapi::QueryAieVersion = unsafe {
            self.query_info(uapi::DRM_AMDXDNA_QUERY_AIE_VERSION, "query_aie_version")?
        };

        Ok(AieVersion {
            major: version.major,
            minor: version.minor,
        })
    }

    pub fn query_aie_metadata(&self) -> Result<uapi::QueryAieMetadata, DeviceError> {
        unsafe { self.query_info(uapi::DRM_AMDXDNA_QUERY_AIE_METADATA, "query_aie_metadata") }
    }

    pub fn query_clock_metadata(&self) -> Result<ClockMetadata, DeviceError> {
        let metadata: uapi::QueryClockMetadata = unsafe {
            self.query_info(
                uapi::DRM_AMDXDNA_QUERY_CLOCK_METADATA,
                "query_clock_metadata",
            )?
        };

        Ok(ClockMetadata {
            mp_npu_clock: Clock::from(metadata.mp_npu_clock),
            h_clock: Clock::from(metadata.h_clock),
        })
    }

    pub fn query_sensors(&self) -> Result<Vec<Sensor>, DeviceError> {
        const MAX_SENSORS: usize = 8;

        let mut entries = vec![uapi::QuerySensor::default(); MAX_SENSORS];
        let written = self.get_info_ioctl(
            uapi::DRM_AMDXDNA_QUERY_SENSORS,
            entries.as_mut_ptr() as u64,
            (entries.len() * std::mem::size_of::<uapi::QuerySensor>()) as u32,
            "query_sensors",
        )?;

        entries.truncate(written as usize / std::mem::size_of::<uapi::QuerySensor>());

        Ok(entries.into_iter().map(Sensor::from).collect())
    }

    pub fn query_hw_contexts(&self) -> Result<Vec<uapi::QueryCtx>, DeviceError> {
        const MAX_CONTEXTS: usize = 64;

        let mut entries = vec![uapi::QueryCtx::default(); MAX_CONTEXTS];
        let written = self.get_info_ioctl(
            uapi::DRM_AMDXDNA_QUERY_HW_CONTEXTS,
            entries.as_mut_ptr() as u64,
            (entries.len() * std::mem::size_of::<uapi::QueryCtx>()) as u32,
            "query_hw_contexts",
        )?;

        entries.truncate(written as usize / std::mem::size_of::<uapi::QueryCtx>());

        Ok(entries)
    }

    pub fn query_firmware_version(&self) -> Result<FirmwareVersion, DeviceError> {
        let version: uapi::QueryFirmwareVersion = unsafe {
            self.query_info(
                uapi::DRM_AMDXDNA_QUERY_FIRMWARE_VERSION,
                "query_firmware_version",
            )?
        };

        Ok(FirmwareVersion {
            major: version.major,
            minor: version.minor,
            patch: version.patch,
            build: version.build,
        })
    }

    pub fn get_power_mode(&self) -> Result<PowerMode, DeviceError> {
        let mode: uapi::GetPowerMode =
            unsafe { self.query_info(uapi::DRM_AMDXDNA_GET_POWER_MODE, "get_power_mode")? };

        Ok(PowerMode::from(mode.power_mode))
    }

    pub fn set_power_mode(&self, mode: PowerMode) -> Result<(), DeviceError> {
        let arg = uapi::SetPowerMode {
            power_mode: mode.into(),
            pad: [0; 7],
        };

        self.set_state_ioctl(
            uapi::DRM_AMDXDNA_SET_POWER_MODE,
            &arg as *const _ as u64,
            std::mem::size_of::<uapi::SetPowerMode>() as u32,
            "set_power_mode",
        )
    }

    pub fn get_force_preempt_state(&self) -> Result<bool, DeviceError> {
        let state: uapi::GetForcePreemptState = unsafe {
            self.query_info(
                uapi::DRM_AMDXDNA_GET_FORCE_PREEMPT_STATE,
                "get_force_preempt_state",
            )?
        };

        Ok(state.state != 0)
    }

    pub fn set_force_preempt_state(&self, enabled: bool) -> Result<(), DeviceError> {
        let arg = uapi::SetForcePreemptState {
            state: enabled as u8,
            pad: [0; 7],
        };

        self.set_state_ioctl(
            uapi::DRM_AMDXDNA_SET_FORCE_PREEMPT,
            &arg as *const _ as u64,
            std::mem::size_of::<uapi::SetForcePreemptState>() as u32,
            "set_force_preempt_state",
        )
    }

    /// Reads the column status blob into `buffer` and returns the bitmap of
    /// columns that were filled.
    pub fn query_aie_status(&self, buffer: &mut [u8]) -> Result<u32, DeviceError> {
        let mut status = uapi::QueryAieStatus {
            buffer: buffer.as_mut_ptr() as u64,
            buffer_size: buffer.len() as u32,
            cols_filled: 0,
        };

        self.get_info_ioctl(
            uapi::DRM_AMDXDNA_QUERY_AIE_STATUS,
            &mut status as *mut _ as u64,
            std::mem::size_of::<uapi::QueryAieStatus>() as u32,
            "query_aie_status",
        )?;

        Ok(status.cols_filled)
    }

    /// The telemetry blob is firmware defined and carries no UAPI record;
    /// callers get the raw bytes and the length the kernel reported.
    pub fn query_telemetry_raw(&self, buffer: &mut [u8]) -> Result<usize, DeviceError> {
        let written = self.get_info_ioctl(
            uapi::DRM_AMDXDNA_QUERY_TELEMETRY,
            buffer.as_mut_ptr() as u64,
            buffer.len() as u32,
            "query_telemetry",
        )?;

        Ok((written as usize).min(buffer.len()))
    }

    pub fn read_aie_mem(
        &self,
        col: u32,
        row: u32,
        addr: u32,
        buffer: &mut [u8],
    ) -> Result<(), DeviceError> {
        let mem = uapi::AieMem {
            col,
            row,
            addr,
            size: buffer.len() as u32,
            buf_p: buffer.as_mut_ptr() as u64,
        };

        self.get_info_ioctl(
            uapi::DRM_AMDXDNA_READ_AIE_MEM,
            &mem as *const _ as u64,
            std::mem::size_of::<uapi::AieMem>() as u32,
            "read_aie_mem",
        )?;

        Ok(())
    }

    pub fn write_aie_mem(
        &self,
        col: u32,
        row: u32,
        addr: u32,
        buffer: &[u8],
    ) -> Result<(), DeviceError> {
        let mem = uapi::AieMem {
            col,
            row,
            addr,
            size: buffer.len() as u32,
            buf_p: buffer.as_ptr() as u64,
        };

        self.set_state_ioctl(
            uapi::DRM_AMDXDNA_WRITE_AIE_MEM,
            &mem as *const _ as u64,
            std::mem::size_of::<uapi::AieMem>() as u32,
            "write_aie_mem",
        )
    }

    pub fn read_aie_reg(&self, col: u32, row: u32, addr: u32) -> Result<u32, DeviceError> {
        let mut reg = uapi::AieReg {
            col,
            row,
            addr,
            val: 0,
        };

        self.get_info_ioctl(
            uapi::DRM_AMDXDNA_READ_AIE_REG,
            &mut reg as *mut _ as u64,
            std::mem::size_of::<uapi::AieReg>() as u32,
            "read_aie_reg",
        )?;

        Ok(reg.val)
    }

    pub fn write_aie_reg(&self, col: u32, row: u32, addr: u32, val: u32) -> Result<(), DeviceError> {
        let reg = uapi::AieReg {
            col,
            row,
            addr,
            val,
        };

        self.set_state_ioctl(
            uapi::DRM_AMDXDNA_WRITE_AIE_REG,
            &reg as *const _ as u64,
            std::mem::size_of::<uapi::AieReg>() as u32,
            "write_aie_reg",
        )
    }

    pub fn create_ctx(&self, args: &CtxArgs) -> Result<Ctx, DeviceError> {
        // The QoS block only has to outlive the ioctl.
        let qos = args.qos;

        let mut arg = uapi::CreateCtx {
            qos_p: &qos as *const _ as u64,
            umq_bo: args.umq_bo,
            log_buf_bo: args.log_buf_bo,
            max_opc: args.max_opc,
            num_tiles: args.num_tiles,
            mem_size: args.mem_size,
            ..Default::default()
        };

        if let Err(err) = unsafe { uapi::create_ctx(self.fd(), &mut arg) } {
            return Err(DeviceError::IoctlError {
                name: "create_ctx",
                id: self.id,
                source: err,
            });
        }

        Ok(Ctx {
            handle: arg.handle,
            umq_doorbell: arg.umq_doorbell,
            syncobj_handle: arg.syncobj_handle,
        })
    }

    pub fn destroy_ctx(&self, ctx: Ctx) -> Result<(), DeviceError> {
        let mut arg = uapi::DestroyCtx {
            handle: ctx.handle,
            pad: 0,
        };

        if let Err(err) = unsafe { uapi::destroy_ctx(self.fd(), &mut arg) } {
            return Err(DeviceError::IoctlError {
                name: "destroy_ctx",
                id: self.id,
                source: err,
            });
        }

        Ok(())
    }

    fn config_ctx_ioctl(
        &self,
        handle: u32,
        param_type: u32,
        param_val: u64,
        param_val_size: u32,
        name: &'static str,
    ) -> Result<(), DeviceError> {
        let mut arg = uapi::ConfigCtx {
            handle,
            param_type,
            param_val,
            param_val_size,
            pad: 0,
        };

        if let Err(err) = unsafe { uapi::config_ctx(self.fd(), &mut arg) } {
            return Err(DeviceError::IoctlError {
                name,
                id: self.id,
                source: err,
            });
        }

        Ok(())
    }

    /// Loads CU configurations into the context. The header and the entries
    /// are serialized into one buffer the way the driver expects the
    /// flexible array.
    pub fn config_ctx_cu(&self, ctx: &Ctx, cus: &[uapi::CuConfig]) -> Result<(), DeviceError> {
        let header_size = std::mem::size_of::<uapi::CtxParamConfigCu>();
        let size = header_size + std::mem::size_of_val(cus);

        if size > CONFIG_BUFFER_MAX {
            return Err(DeviceError::ConfigTooLarge { size });
        }

        let header = uapi::CtxParamConfigCu {
            num_cus: cus.len() as u16,
            ..Default::default()
        };

        let mut buf = vec![0u8; size];
        unsafe {
            std::ptr::copy_nonoverlapping(
                &header as *const _ as *const u8,
                buf.as_mut_ptr(),
                header_size,
            );
            std::ptr::copy_nonoverlapping(
                cus.as_ptr() as *const u8,
                buf.as_mut_ptr().add(header_size),
                std::mem::size_of_val(cus),
            );
        }

        self.config_ctx_ioctl(
            ctx.handle,
            uapi::DRM_AMDXDNA_CTX_CONFIG_CU,
            buf.as_ptr() as u64,
            size as u32,
            "config_ctx_cu",
        )
    }

    /// Attaches a debug buffer BO to the context. `param_val` carries the
    /// handle itself, not a pointer.
    pub fn assign_dbg_buf(&self, ctx: &Ctx, bo_handle: u32) -> Result<(), DeviceError> {
        self.config_ctx_ioctl(
            ctx.handle,
            uapi::DRM_AMDXDNA_CTX_ASSIGN_DBG_BUF,
            bo_handle as u64,
            0,
            "assign_dbg_buf",
        )
    }

    pub fn remove_dbg_buf(&self, ctx: &Ctx, bo_handle: u32) -> Result<(), DeviceError> {
        self.config_ctx_ioctl(
            ctx.handle,
            uapi::DRM_AMDXDNA_CTX_REMOVE_DBG_BUF,
            bo_handle as u64,
            0,
            "remove_dbg_buf",
        )
    }

    pub fn create_bo(&self, bo_type: BoType, size: u64) -> Result<Bo, DeviceError> {
        let mut arg = uapi::CreateBo {
            size,
            bo_type: bo_type.into(),
            ..Default::default()
        };

        if let Err(err) = unsafe { uapi::create_bo(self.fd(), &mut arg) } {
            return Err(DeviceError::IoctlError {
                name: "create_bo",
                id: self.id,
                source: err,
            });
        }

        let info = self.get_bo_info(arg.handle)?;

        Ok(Bo {
            handle: arg.handle,
            size,
            map_offset: info.map_offset,
            vaddr: info.vaddr,
            xdna_addr: info.xdna_addr,
        })
    }

    pub fn get_bo_info(&self, handle: u32) -> Result<uapi::GetBoInfo, DeviceError> {
        let mut arg = uapi::GetBoInfo {
            handle,
            ..Default::default()
        };

        if let Err(err) = unsafe { uapi::get_bo_info(self.fd(), &mut arg) } {
            return Err(DeviceError::IoctlError {
                name: "get_bo_info",
                id: self.id,
                source: err,
            });
        }

        Ok(arg)
    }

    /// Maps a BO into the caller's address space through the DRM fake
    /// offset.
    pub fn map_bo(&self, bo: &Bo) -> Result<memmap2::MmapMut, DeviceError> {
        if bo.map_offset == 0 {
            return Err(DeviceError::BoNotMappable { handle: bo.handle });
        }

        unsafe {
            memmap2::MmapOptions::default()
                .len(bo.size as usize)
                .offset(bo.map_offset)
                .map_mut(self.fd())
        }
        .map_err(|err| DeviceError::BoMappingFailed {
            id: self.id,
            source: err,
        })
    }

    pub fn sync_bo(
        &self,
        handle: u32,
        direction: SyncDirection,
        offset: u64,
        size: u64,
    ) -> Result<(), DeviceError> {
        let mut arg = uapi::SyncBo {
            handle,
            direction: direction.into(),
            offset,
            size,
        };

        if let Err(err) = unsafe { uapi::sync_bo(self.fd(), &mut arg) } {
            return Err(DeviceError::IoctlError {
                name: "sync_bo",
                id: self.id,
                source: err,
            });
        }

        Ok(())
    }

    /// Submits command BOs to a context and returns the sequence number.
    /// With exactly one handle the handle rides in `cmd_handles` directly,
    /// otherwise the field carries a pointer to the array.
    pub fn exec_cmd(
        &self,
        ctx: &Ctx,
        cmd_type: SubmitType,
        cmd_handles: &[u32],
        args: &[u64],
    ) -> Result<u64, DeviceError> {
        if cmd_handles.is_empty() {
            return Err(DeviceError::NoCommandHandles { id: self.id });
        }

        let handles = if cmd_handles.len() == 1 {
            cmd_handles[0] as u64
        } else {
            cmd_handles.as_ptr() as u64
        };

        let mut arg = uapi::ExecCmd {
            ctx: ctx.handle,
            cmd_type: cmd_type.into(),
            cmd_handles: handles,
            args: args.as_ptr() as u64,
            cmd_count: cmd_handles.len() as u32,
            arg_count: args.len() as u32,
            ..Default::default()
        };

        if let Err(err) = unsafe { uapi::exec_cmd(self.fd(), &mut arg) } {
            return Err(DeviceError::IoctlError {
                name: "exec_cmd",
                id: self.id,
                source: err,
            });
        }

        Ok(arg.seq)
    }

    /// Waits for the command identified by `seq`. A timeout of 0 waits
    /// forever.
    pub fn wait_cmd(&self, ctx: &Ctx, seq: u64, timeout_ms: u32) -> Result<(), DeviceError> {
        let mut arg = uapi::WaitCmd {
            ctx: ctx.handle,
            timeout: timeout_ms,
            seq,
        };

        if let Err(err) = unsafe { uapi::wait_cmd(self.fd(), &mut arg) } {
            return Err(DeviceError::IoctlError {
                name: "wait_cmd",
                id: self.id,
                source: err,
            });
        }

        Ok(())
    }
}

fn parse_fw_version(version: &str) -> FirmwareVersion {
    let mut fw = FirmwareVersion::default();
    let mut it = version.trim().splitn(4, '.');

    for field in [&mut fw.major, &mut fw.minor, &mut fw.patch, &mut fw.build] {
        if let Some(v) = it.next() {
            if let Ok(v) = v.parse() {
                *field = v;
            }
        }
    }

    fw
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_parse_fw_version() {
        assert_eq!(
            parse_fw_version("1.5.2.380"),
            FirmwareVersion {
                major: 1,
                minor: 5,
                patch: 2,
                build: 380,
            }
        );
        assert_eq!(
            parse_fw_version("1.5\n"),
            FirmwareVersion {
                major: 1,
                minor: 5,
                ..Default::default()
            }
        );
        assert_eq!(parse_fw_version("bad"), FirmwareVersion::default());
    }

    #[test]
    fn cstr_decode() {
        let mut name = [0u8; 16];
        name[..7].copy_from_slice(b"MP-NPU\0");
        assert_eq!(cstr_to_string(&name), "MP-NPU");

        let full = [b'a'; 16];
        assert_eq!(cstr_to_string(&full), "a".repeat(16));

        let clock = xdna_uapi::QueryClock {
            name,
            freq_mhz: 1267,
            pad: 0,
        };
        assert_eq!(
            Clock::from(clock),
            Clock {
                name: "MP-NPU".to_string(),
                freq_mhz: 1267,
            }
        );
    }

    #[test]
    #[cfg_attr(not(feature = "test_hardware"), ignore = "Requires hardware")]
    fn xdna_open_and_query() {
        let device = Device::scan()
            .into_iter()
            .map(Device::open)
            .next()
            .expect("Expected to have access to 1 accel device")
            .unwrap();

        let aie = device.query_aie_version().unwrap();
        let fw = device.query_firmware_version().unwrap();
        println!("{}: AIE {aie}, firmware {fw}", device.device_name);

        let clocks = device.query_clock_metadata().unwrap();
        assert!(!clocks.mp_npu_clock.name.is_empty());

        let metadata = device.query_aie_metadata().unwrap();
        assert!(metadata.cols > 0);

        device.get_power_mode().unwrap();
    }

    #[test]
    #[cfg_attr(not(feature = "test_hardware"), ignore = "Requires hardware")]
    fn xdna_bo_round_trip() {
        let device = Device::scan()
            .into_iter()
            .map(Device::open)
            .next()
            .expect("Expected to have access to 1 accel device")
            .unwrap();

        let bo = device.create_bo(BoType::Share, 4096).unwrap();
        assert_ne!(bo.handle, xdna_uapi::AMDXDNA_INVALID_BO_HANDLE);

        let mut mapping = device.map_bo(&bo).unwrap();
        mapping[..4].copy_from_slice(&[0xde, 0xad, 0xbe, 0xef]);

        device
            .sync_bo(bo.handle, SyncDirection::ToDevice, 0, 4096)
            .unwrap();
    }
}
