// SPDX-FileCopyrightText: © 2025 xdna-rs contributors
// SPDX-License-Identifier: Apache-2.0

//! UAPI surface of the amdxdna DRM accel driver.
//!
//! Every struct in this crate is a flat `repr(C)` record copied verbatim
//! across the ioctl boundary. Field order, widths and padding must stay
//! bit-exact with the kernel's `amdxdna_accel.h`; the layout tests at the
//! bottom of this file pin the contract down.
//!
//! Reserved and `pad` fields must be zero. `ext`/`ext_flags` are reserved
//! for future extension and must be zero. Handle fields use 0 as the
//! invalid sentinel.

pub const DRM_IOCTL_BASE: u8 = b'd';
pub const DRM_COMMAND_BASE: u32 = 0x40;

pub const AMDXDNA_DRIVER_MAJOR: u32 = 1;
pub const AMDXDNA_DRIVER_MINOR: u32 = 0;

pub const AMDXDNA_INVALID_ADDR: u64 = !0u64;
pub const AMDXDNA_INVALID_CTX_HANDLE: u32 = 0;
pub const AMDXDNA_INVALID_BO_HANDLE: u32 = 0;
pub const AMDXDNA_INVALID_FENCE_HANDLE: u32 = 0;

pub const POWER_MODE_DEFAULT: u32 = 0;
pub const POWER_MODE_LOW: u32 = 1;
pub const POWER_MODE_MEDIUM: u32 = 2;
pub const POWER_MODE_HIGH: u32 = 3;
pub const POWER_MODE_TURBO: u32 = 4;

pub const DRM_AMDXDNA_CREATE_CTX: u32 = 0;
pub const DRM_AMDXDNA_DESTROY_CTX: u32 = 1;
pub const DRM_AMDXDNA_CONFIG_CTX: u32 = 2;
pub const DRM_AMDXDNA_CREATE_BO: u32 = 3;
pub const DRM_AMDXDNA_GET_BO_INFO: u32 = 4;
pub const DRM_AMDXDNA_SYNC_BO: u32 = 5;
pub const DRM_AMDXDNA_EXEC_CMD: u32 = 6;
pub const DRM_AMDXDNA_GET_INFO: u32 = 7;
pub const DRM_AMDXDNA_SET_STATE: u32 = 8;
pub const DRM_AMDXDNA_WAIT_CMD: u32 = 9;

pub const AMDXDNA_DEV_TYPE_UNKNOWN: i32 = -1;
pub const AMDXDNA_DEV_TYPE_KMQ: i32 = 0;
pub const AMDXDNA_DEV_TYPE_UMQ: i32 = 1;

/// QoS priority classes. DEFAULT lets the driver pick for the client; LOW
/// clients can wait an indefinite amount of time for completion.
pub const AMDXDNA_QOS_DEFAULT_PRIORITY: u32 = 0;
pub const AMDXDNA_QOS_REALTIME_PRIORITY: u32 = 1;
pub const AMDXDNA_QOS_HIGH_PRIORITY: u32 = 2;
pub const AMDXDNA_QOS_NORMAL_PRIORITY: u32 = 3;
pub const AMDXDNA_QOS_LOW_PRIORITY: u32 = 4;
pub const AMDXDNA_NUM_PRIORITY: u32 = 4;

/// QoS hints a client can hand to the driver when creating a context.
#[derive(Debug, Default, Clone, Copy)]
#[repr(C)]
pub struct QosInfo {
    /// Giga operations per second.
    pub gops: u32,
    /// Frames per second.
    pub fps: u32,
    pub dma_bandwidth: u32,
    /// Frame response latency.
    pub latency: u32,
    /// Frame execution time.
    pub frame_exec_time: u32,
    /// Requested priority, one of AMDXDNA_QOS_*_PRIORITY.
    pub priority: u32,
}

/// Parameter block for DRM_IOCTL_AMDXDNA_CREATE_CTX.
#[derive(Debug, Default, Clone, Copy)]
#[repr(C)]
pub struct CreateCtx {
    pub ext: u64,
    pub ext_flags: u64,
    /// Address of a QosInfo record.
    pub qos_p: u64,
    /// BO handle for the user mode queue (UMQ).
    pub umq_bo: u32,
    pub log_buf_bo: u32,
    /// Maximum operations per cycle.
    pub max_opc: u32,
    /// Number of AIE tiles to assign.
    pub num_tiles: u32,
    /// Size of AIE tile memory.
    pub mem_size: u32,
    /// Returned doorbell offset associated with the UMQ.
    pub umq_doorbell: u32,
    /// Returned context handle.
    pub handle: u32,
    /// Returned drm timeline syncobj handle for command completion
    /// notification.
    pub syncobj_handle: u32,
}

/// Parameter block for DRM_IOCTL_AMDXDNA_DESTROY_CTX.
#[derive(Debug, Default, Clone, Copy)]
#[repr(C)]
pub struct DestroyCtx {
    pub handle: u32,
    pub pad: u32,
}

/// Configuration for one compute unit.
#[derive(Debug, Default, Clone, Copy)]
#[repr(C)]
pub struct CuConfig {
    /// CU configuration buffer bo handle.
    pub cu_bo: u32,
    /// Function of the CU.
    pub cu_func: u8,
    pub pad: [u8; 3],
}

/// Header of the DRM_AMDXDNA_CTX_CONFIG_CU parameter buffer. `num_cus`
/// CuConfig records follow the header directly.
#[derive(Debug, Default, Clone, Copy)]
#[repr(C)]
pub struct CtxParamConfigCu {
    pub num_cus: u16,
    pub pad: [u16; 3],
    pub cu_configs: [CuConfig; 0],
}

pub const DRM_AMDXDNA_CTX_CONFIG_CU: u32 = 0;
pub const DRM_AMDXDNA_CTX_ASSIGN_DBG_BUF: u32 = 1;
pub const DRM_AMDXDNA_CTX_REMOVE_DBG_BUF: u32 = 2;

/// Parameter block for DRM_IOCTL_AMDXDNA_CONFIG_CTX.
///
/// When `param_val` points at a buffer, the buffer may be at most
/// 4KiB (PAGE_SIZE). If it is not a pointer the driver ignores
/// `param_val_size`.
#[derive(Debug, Default, Clone, Copy)]
#[repr(C)]
pub struct ConfigCtx {
    pub handle: u32,
    /// One of DRM_AMDXDNA_CTX_*, selects what `param_val` carries.
    pub param_type: u32,
    pub param_val: u64,
    pub param_val_size: u32,
    pub pad: u32,
}

/// Virtual address list entry.
#[derive(Debug, Default, Clone, Copy)]
#[repr(C)]
pub struct BoVaEntry {
    pub vaddr: u64,
    pub len: u64,
}

/// Regular BO shared between user and device.
pub const AMDXDNA_BO_INVALID: u32 = 0;
pub const AMDXDNA_BO_SHARE: u32 = 1;
/// Shared host memory given to the device as heap memory.
pub const AMDXDNA_BO_DEV_HEAP: u32 = 2;
/// Allocated from BO_DEV_HEAP.
pub const AMDXDNA_BO_DEV: u32 = 3;
/// User and driver accessible bo.
pub const AMDXDNA_BO_CMD: u32 = 4;
/// DRM GEM DMA bo.
pub const AMDXDNA_BO_DMA: u32 = 5;
pub const AMDXDNA_BO_GUEST: u32 = 6;

/// Parameter block for DRM_IOCTL_AMDXDNA_CREATE_BO.
#[derive(Debug, Default, Clone, Copy)]
#[repr(C)]
pub struct CreateBo {
    /// Buffer flags. MBZ.
    pub flags: u64,
    /// User VA of buffer if applied. MBZ.
    pub vaddr: u64,
    /// Size in bytes.
    pub size: u64,
    /// One of AMDXDNA_BO_*.
    pub bo_type: u32,
    /// Returned DRM buffer object handle.
    pub handle: u32,
}

/// Parameter block for DRM_IOCTL_AMDXDNA_GET_BO_INFO.
#[derive(Debug, Default, Clone, Copy)]
#[repr(C)]
pub struct GetBoInfo {
    pub ext: u64,
    pub ext_flags: u64,
    pub handle: u32,
    pub pad: u32,
    /// Returned DRM fake offset for mmap().
    pub map_offset: u64,
    /// Returned user VA of buffer. 0 in case user needs mmap().
    pub vaddr: u64,
    /// Returned XDNA device virtual address.
    pub xdna_addr: u64,
}

pub const SYNC_DIRECT_TO_DEVICE: u32 = 0;
pub const SYNC_DIRECT_FROM_DEVICE: u32 = 1;

/// Parameter block for DRM_IOCTL_AMDXDNA_SYNC_BO.
#[derive(Debug, Default, Clone, Copy)]
#[repr(C)]
pub struct SyncBo {
    pub handle: u32,
    /// SYNC_DIRECT_TO_DEVICE or SYNC_DIRECT_FROM_DEVICE.
    pub direction: u32,
    /// Offset in the buffer to sync.
    pub offset: u64,
    pub size: u64,
}

pub const AMDXDNA_CMD_SUBMIT_EXEC_BUF: u32 = 0;
pub const AMDXDNA_CMD_SUBMIT_DEPENDENCY: u32 = 1;
pub const AMDXDNA_CMD_SUBMIT_SIGNAL: u32 = 2;

/// Parameter block for DRM_IOCTL_AMDXDNA_EXEC_CMD.
#[derive(Debug, Default, Clone, Copy)]
#[repr(C)]
pub struct ExecCmd {
    pub ext: u64,
    pub ext_flags: u64,
    /// Context handle.
    pub ctx: u32,
    /// One of AMDXDNA_CMD_SUBMIT_*.
    pub cmd_type: u32,
    /// Array of command handles, or the command handle itself in case of
    /// just one.
    pub cmd_handles: u64,
    /// Array of arguments for all command handles.
    pub args: u64,
    pub cmd_count: u32,
    pub arg_count: u32,
    /// Returned sequence number for this command.
    pub seq: u64,
}

/// Parameter block for DRM_IOCTL_AMDXDNA_WAIT_CMD. Waits for the command
/// identified by `seq` to complete.
#[derive(Debug, Default, Clone, Copy)]
#[repr(C)]
pub struct WaitCmd {
    pub ctx: u32,
    /// Timeout in ms, 0 implies infinite wait.
    pub timeout: u32,
    /// Sequence number returned by EXEC_CMD.
    pub seq: u64,
}

/// DRM_AMDXDNA_QUERY_AIE_STATUS record.
#[derive(Debug, Default, Clone, Copy)]
#[repr(C)]
pub struct QueryAieStatus {
    /// User space buffer that receives the AIE status. (out)
    pub buffer: u64,
    /// Size of the user space buffer. (in)
    pub buffer_size: u32,
    /// Bitmap of AIE columns whose data has been returned in the buffer.
    /// (out)
    pub cols_filled: u32,
}

/// DRM_AMDXDNA_QUERY_AIE_VERSION record.
#[derive(Debug, Default, Clone, Copy)]
#[repr(C)]
pub struct QueryAieVersion {
    pub major: u32,
    pub minor: u32,
}

/// Per-tile-class metadata (core, mem, shim).
#[derive(Debug, Default, Clone, Copy)]
#[repr(C)]
pub struct QueryAieTileMetadata {
    pub row_count: u16,
    pub row_start: u16,
    pub dma_channel_count: u16,
    pub lock_count: u16,
    pub event_reg_count: u16,
    pub pad: [u16; 3],
}

/// DRM_AMDXDNA_QUERY_AIE_METADATA record.
#[derive(Debug, Default, Clone, Copy)]
#[repr(C)]
pub struct QueryAieMetadata {
    /// Size of a column in bytes.
    pub col_size: u32,
    pub cols: u16,
    pub rows: u16,
    pub version: QueryAieVersion,
    pub core: QueryAieTileMetadata,
    pub mem: QueryAieTileMetadata,
    pub shim: QueryAieTileMetadata,
}

/// Metadata for a single clock. `name` is a NUL-padded C string.
#[derive(Debug, Default, Clone, Copy)]
#[repr(C)]
pub struct QueryClock {
    pub name: [u8; 16],
    pub freq_mhz: u32,
    pub pad: u32,
}

/// DRM_AMDXDNA_QUERY_CLOCK_METADATA record.
#[derive(Debug, Default, Clone, Copy)]
#[repr(C)]
pub struct QueryClockMetadata {
    pub mp_npu_clock: QueryClock,
    pub h_clock: QueryClock,
}

pub const AMDXDNA_SENSOR_TYPE_POWER: u8 = 0;

/// DRM_AMDXDNA_QUERY_SENSORS record for a single sensor.
#[derive(Debug, Clone, Copy)]
#[repr(C)]
pub struct QuerySensor {
    /// NUL-padded sensor name.
    pub label: [u8; 64],
    /// Current value of the sensor.
    pub input: u32,
    /// Maximum value possible for the sensor.
    pub max: u32,
    pub average: u32,
    /// Highest recorded value for this driver load.
    pub highest: u32,
    pub status: [u8; 64],
    pub units: [u8; 16],
    /// Scales the value members via pow(10, unitm) * value.
    pub unitm: i8,
    /// One of AMDXDNA_SENSOR_TYPE_*.
    pub sensor_type: u8,
    pub pad: [u8; 6],
}

impl Default for QuerySensor {
    fn default() -> Self {
        Self {
            label: [0; 64],
            input: 0,
            max: 0,
            average: 0,
            highest: 0,
            status: [0; 64],
            units: [0; 16],
            unitm: 0,
            sensor_type: 0,
            pad: [0; 6],
        }
    }
}

/// DRM_AMDXDNA_QUERY_HW_CONTEXTS record for a single context.
#[derive(Debug, Default, Clone, Copy)]
#[repr(C)]
pub struct QueryCtx {
    pub context_id: u32,
    /// Starting column of the partition assigned to this context.
    pub start_col: u32,
    pub num_col: u32,
    pub hwctx_id: u32,
    /// Process that created this context.
    pub pid: i64,
    pub command_submissions: u64,
    pub command_completions: u64,
    /// Times this context has been moved to a different partition.
    pub migrations: u64,
    /// Times this context has been preempted by another context in the
    /// same partition.
    pub preemptions: u64,
    pub errors: u64,
    pub priority: u64,
}

/// Parameter record for DRM_AMDXDNA_READ_AIE_MEM and
/// DRM_AMDXDNA_WRITE_AIE_MEM.
#[derive(Debug, Default, Clone, Copy)]
#[repr(C)]
pub struct AieMem {
    pub col: u32,
    pub row: u32,
    /// AIE memory address to read/write.
    pub addr: u32,
    pub size: u32,
    /// Buffer holding the data to write or receiving the data read.
    pub buf_p: u64,
}

/// Parameter record for DRM_AMDXDNA_READ_AIE_REG and
/// DRM_AMDXDNA_WRITE_AIE_REG.
#[derive(Debug, Default, Clone, Copy)]
#[repr(C)]
pub struct AieReg {
    pub col: u32,
    pub row: u32,
    pub addr: u32,
    /// Value to write, or the value returned from the AIE.
    pub val: u32,
}

/// DRM_AMDXDNA_GET_POWER_MODE record.
#[derive(Debug, Default, Clone, Copy)]
#[repr(C)]
pub struct GetPowerMode {
    pub power_mode: u8,
    pub pad: [u8; 7],
}

/// DRM_AMDXDNA_QUERY_FIRMWARE_VERSION record, all fields out.
#[derive(Debug, Default, Clone, Copy)]
#[repr(C)]
pub struct QueryFirmwareVersion {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
    /// Build ID.
    pub build: u32,
}

/// DRM_AMDXDNA_GET_FORCE_PREEMPT_STATE record. `state` is 1 when force
/// preemption is enabled, 0 when disabled.
#[derive(Debug, Default, Clone, Copy)]
#[repr(C)]
pub struct GetForcePreemptState {
    pub state: u8,
    pub pad: [u8; 7],
}

pub const DRM_AMDXDNA_QUERY_AIE_STATUS: u32 = 0;
pub const DRM_AMDXDNA_QUERY_AIE_METADATA: u32 = 1;
pub const DRM_AMDXDNA_QUERY_AIE_VERSION: u32 = 2;
pub const DRM_AMDXDNA_QUERY_CLOCK_METADATA: u32 = 3;
pub const DRM_AMDXDNA_QUERY_SENSORS: u32 = 4;
pub const DRM_AMDXDNA_QUERY_HW_CONTEXTS: u32 = 5;
pub const DRM_AMDXDNA_READ_AIE_MEM: u32 = 6;
pub const DRM_AMDXDNA_READ_AIE_REG: u32 = 7;
pub const DRM_AMDXDNA_QUERY_FIRMWARE_VERSION: u32 = 8;
pub const DRM_AMDXDNA_GET_POWER_MODE: u32 = 9;
pub const DRM_AMDXDNA_QUERY_TELEMETRY: u32 = 10;
pub const DRM_AMDXDNA_GET_FORCE_PREEMPT_STATE: u32 = 11;

/// Parameter block for DRM_IOCTL_AMDXDNA_GET_INFO. `param` selects the
/// record that `buffer` points at.
#[derive(Debug, Default, Clone, Copy)]
#[repr(C)]
pub struct GetInfo {
    /// One of DRM_AMDXDNA_QUERY_*/GET_*. (in)
    pub param: u32,
    /// Size of the input buffer; size needed/written by the kernel.
    /// (in/out)
    pub buffer_size: u32,
    /// Address of the record selected by `param`. (in/out)
    pub buffer: u64,
}

/// DRM_AMDXDNA_SET_POWER_MODE record.
#[derive(Debug, Default, Clone, Copy)]
#[repr(C)]
pub struct SetPowerMode {
    pub power_mode: u8,
    pub pad: [u8; 7],
}

/// DRM_AMDXDNA_SET_FORCE_PREEMPT record.
#[derive(Debug, Default, Clone, Copy)]
#[repr(C)]
pub struct SetForcePreemptState {
    pub state: u8,
    pub pad: [u8; 7],
}

pub const DRM_AMDXDNA_SET_POWER_MODE: u32 = 0;
pub const DRM_AMDXDNA_WRITE_AIE_MEM: u32 = 1;
pub const DRM_AMDXDNA_WRITE_AIE_REG: u32 = 2;
pub const DRM_AMDXDNA_SET_FORCE_PREEMPT: u32 = 3;

/// Parameter block for DRM_IOCTL_AMDXDNA_SET_STATE. `param` selects the
/// record that `buffer` points at.
#[derive(Debug, Default, Clone, Copy)]
#[repr(C)]
pub struct SetState {
    /// One of DRM_AMDXDNA_SET_*/WRITE_*. (in)
    pub param: u32,
    /// Size of the input buffer. (in)
    pub buffer_size: u32,
    /// Address of the record selected by `param`. (in)
    pub buffer: u64,
}

nix::ioctl_readwrite!(
    create_ctx,
    DRM_IOCTL_BASE,
    DRM_COMMAND_BASE + DRM_AMDXDNA_CREATE_CTX,
    CreateCtx
);

nix::ioctl_readwrite!(
    destroy_ctx,
    DRM_IOCTL_BASE,
    DRM_COMMAND_BASE + DRM_AMDXDNA_DESTROY_CTX,
    DestroyCtx
);

nix::ioctl_readwrite!(
    config_ctx,
    DRM_IOCTL_BASE,
    DRM_COMMAND_BASE + DRM_AMDXDNA_CONFIG_CTX,
    ConfigCtx
);

nix::ioctl_readwrite!(
    create_bo,
    DRM_IOCTL_BASE,
    DRM_COMMAND_BASE + DRM_AMDXDNA_CREATE_BO,
    CreateBo
);

nix::ioctl_readwrite!(
    get_bo_info,
    DRM_IOCTL_BASE,
    DRM_COMMAND_BASE + DRM_AMDXDNA_GET_BO_INFO,
    GetBoInfo
);

nix::ioctl_readwrite!(
    sync_bo,
    DRM_IOCTL_BASE,
    DRM_COMMAND_BASE + DRM_AMDXDNA_SYNC_BO,
    SyncBo
);

nix::ioctl_readwrite!(
    exec_cmd,
    DRM_IOCTL_BASE,
    DRM_COMMAND_BASE + DRM_AMDXDNA_EXEC_CMD,
    ExecCmd
);

nix::ioctl_readwrite!(
    get_info,
    DRM_IOCTL_BASE,
    DRM_COMMAND_BASE + DRM_AMDXDNA_GET_INFO,
    GetInfo
);

nix::ioctl_readwrite!(
    set_state,
    DRM_IOCTL_BASE,
    DRM_COMMAND_BASE + DRM_AMDXDNA_SET_STATE,
    SetState
);

nix::ioctl_readwrite!(
    wait_cmd,
    DRM_IOCTL_BASE,
    DRM_COMMAND_BASE + DRM_AMDXDNA_WAIT_CMD,
    WaitCmd
);

#[cfg(test)]
mod layout {
    use super::*;
    use std::mem::{offset_of, size_of};

    // Sizes as laid out by the C reference header on LP64.
    #[test]
    fn struct_sizes() {
        assert_eq!(size_of::<QosInfo>(), 24);
        assert_eq!(size_of::<CreateCtx>(), 56);
        assert_eq!(size_of::<DestroyCtx>(), 8);
        assert_eq!(size_of::<CuConfig>(), 8);
        assert_eq!(size_of::<CtxParamConfigCu>(), 8);
        assert_eq!(size_of::<ConfigCtx>(), 24);
        assert_eq!(size_of::<BoVaEntry>(), 16);
        assert_eq!(size_of::<CreateBo>(), 32);
        assert_eq!(size_of::<GetBoInfo>(), 48);
        assert_eq!(size_of::<SyncBo>(), 24);
        assert_eq!(size_of::<ExecCmd>(), 56);
        assert_eq!(size_of::<WaitCmd>(), 16);
        assert_eq!(size_of::<QueryAieStatus>(), 16);
        assert_eq!(size_of::<QueryAieVersion>(), 8);
        assert_eq!(size_of::<QueryAieTileMetadata>(), 16);
        assert_eq!(size_of::<QueryAieMetadata>(), 64);
        assert_eq!(size_of::<QueryClock>(), 24);
        assert_eq!(size_of::<QueryClockMetadata>(), 48);
        assert_eq!(size_of::<QuerySensor>(), 168);
        assert_eq!(size_of::<QueryCtx>(), 72);
        assert_eq!(size_of::<AieMem>(), 24);
        assert_eq!(size_of::<AieReg>(), 16);
        assert_eq!(size_of::<GetPowerMode>(), 8);
        assert_eq!(size_of::<QueryFirmwareVersion>(), 16);
        assert_eq!(size_of::<GetForcePreemptState>(), 8);
        assert_eq!(size_of::<GetInfo>(), 16);
        assert_eq!(size_of::<SetPowerMode>(), 8);
        assert_eq!(size_of::<SetForcePreemptState>(), 8);
        assert_eq!(size_of::<SetState>(), 16);
    }

    #[test]
    fn create_ctx_offsets() {
        assert_eq!(offset_of!(CreateCtx, ext), 0);
        assert_eq!(offset_of!(CreateCtx, ext_flags), 8);
        assert_eq!(offset_of!(CreateCtx, qos_p), 16);
        assert_eq!(offset_of!(CreateCtx, umq_bo), 24);
        assert_eq!(offset_of!(CreateCtx, log_buf_bo), 28);
        assert_eq!(offset_of!(CreateCtx, max_opc), 32);
        assert_eq!(offset_of!(CreateCtx, num_tiles), 36);
        assert_eq!(offset_of!(CreateCtx, mem_size), 40);
        assert_eq!(offset_of!(CreateCtx, umq_doorbell), 44);
        assert_eq!(offset_of!(CreateCtx, handle), 48);
        assert_eq!(offset_of!(CreateCtx, syncobj_handle), 52);
    }

    #[test]
    fn bo_offsets() {
        assert_eq!(offset_of!(CreateBo, flags), 0);
        assert_eq!(offset_of!(CreateBo, vaddr), 8);
        assert_eq!(offset_of!(CreateBo, size), 16);
        assert_eq!(offset_of!(CreateBo, bo_type), 24);
        assert_eq!(offset_of!(CreateBo, handle), 28);

        assert_eq!(offset_of!(GetBoInfo, handle), 16);
        assert_eq!(offset_of!(GetBoInfo, map_offset), 24);
        assert_eq!(offset_of!(GetBoInfo, vaddr), 32);
        assert_eq!(offset_of!(GetBoInfo, xdna_addr), 40);

        assert_eq!(offset_of!(SyncBo, direction), 4);
        assert_eq!(offset_of!(SyncBo, offset), 8);
        assert_eq!(offset_of!(SyncBo, size), 16);
    }

    #[test]
    fn exec_cmd_offsets() {
        assert_eq!(offset_of!(ExecCmd, ctx), 16);
        assert_eq!(offset_of!(ExecCmd, cmd_type), 20);
        assert_eq!(offset_of!(ExecCmd, cmd_handles), 24);
        assert_eq!(offset_of!(ExecCmd, args), 32);
        assert_eq!(offset_of!(ExecCmd, cmd_count), 40);
        assert_eq!(offset_of!(ExecCmd, arg_count), 44);
        assert_eq!(offset_of!(ExecCmd, seq), 48);

        assert_eq!(offset_of!(WaitCmd, timeout), 4);
        assert_eq!(offset_of!(WaitCmd, seq), 8);
    }

    #[test]
    fn query_offsets() {
        assert_eq!(offset_of!(QueryAieStatus, buffer), 0);
        assert_eq!(offset_of!(QueryAieStatus, buffer_size), 8);
        assert_eq!(offset_of!(QueryAieStatus, cols_filled), 12);

        assert_eq!(offset_of!(QueryAieMetadata, cols), 4);
        assert_eq!(offset_of!(QueryAieMetadata, rows), 6);
        assert_eq!(offset_of!(QueryAieMetadata, version), 8);
        assert_eq!(offset_of!(QueryAieMetadata, core), 16);
        assert_eq!(offset_of!(QueryAieMetadata, mem), 32);
        assert_eq!(offset_of!(QueryAieMetadata, shim), 48);

        assert_eq!(offset_of!(QueryClock, freq_mhz), 16);
        assert_eq!(offset_of!(QueryClockMetadata, h_clock), 24);

        assert_eq!(offset_of!(QuerySensor, input), 64);
        assert_eq!(offset_of!(QuerySensor, status), 80);
        assert_eq!(offset_of!(QuerySensor, units), 144);
        assert_eq!(offset_of!(QuerySensor, unitm), 160);
        assert_eq!(offset_of!(QuerySensor, sensor_type), 161);

        assert_eq!(offset_of!(QueryCtx, pid), 16);
        assert_eq!(offset_of!(QueryCtx, command_submissions), 24);
        assert_eq!(offset_of!(QueryCtx, priority), 64);

        assert_eq!(offset_of!(AieMem, buf_p), 16);

        assert_eq!(offset_of!(GetInfo, buffer_size), 4);
        assert_eq!(offset_of!(GetInfo, buffer), 8);
        assert_eq!(offset_of!(SetState, buffer), 8);
    }

    #[test]
    fn config_cu_header_is_prefix_of_configs() {
        assert_eq!(offset_of!(CtxParamConfigCu, num_cus), 0);
        assert_eq!(offset_of!(CtxParamConfigCu, cu_configs), 8);
        assert_eq!(offset_of!(CuConfig, cu_func), 4);
    }
}
