// SPDX-FileCopyrightText: © 2025 xdna-rs contributors
// SPDX-License-Identifier: Apache-2.0

//! DRM fdinfo accounting for amdxdna clients.
//!
//! The driver exports per-open-file usage through /proc/<pid>/fdinfo/<fd>:
//! memory footprints as `drm-*-memory` lines and accumulated NPU engine time
//! as a `drm-engine-npu-amdxdna` line in nanoseconds. Sampling the engine
//! counter twice and dividing by the wall-clock interval yields a busy
//! percentage.

use std::collections::HashSet;
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Usage parsed from one fdinfo text blob. Memory values are in KiB, the
/// engine counter in ns.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, PartialOrd)]
pub struct FdInfoUsage {
    pub total_memory: u64,
    pub shared_memory: u64,
    pub active_memory: u64,
    pub npu: i64,
}

impl std::ops::Add for FdInfoUsage {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            total_memory: self.total_memory + other.total_memory,
            shared_memory: self.shared_memory + other.shared_memory,
            active_memory: self.active_memory + other.active_memory,
            npu: self.npu + other.npu,
        }
    }
}

fn parse_memory(value: &str) -> Option<u64> {
    let (num, unit) = value.trim().split_once(' ')?;
    let shift = match unit {
        "KiB" => 0,
        "MiB" => 10,
        "GiB" => 20,
        _ => return None,
    };

    num.parse::<u64>().ok().map(|v| v << shift)
}

fn parse_engine_ns(value: &str) -> Option<i64> {
    value.trim().strip_suffix(" ns")?.parse().ok()
}

impl FdInfoUsage {
    /// The drm-client-id of an fdinfo blob, used to de-duplicate multiple
    /// fds open on the same DRM file.
    pub fn client_id(text: &str) -> Option<usize> {
        text.lines().find_map(|line| {
            line.strip_prefix("drm-client-id:")
                .and_then(|v| v.trim().parse().ok())
        })
    }

    pub fn parse(text: &str) -> Self {
        let mut usage = Self::default();

        for line in text.lines() {
            let Some((key, value)) = line.split_once(':') else {
                continue;
            };

            match key {
                "drm-total-memory" => {
                    if let Some(v) = parse_memory(value) {
                        usage.total_memory = v;
                    }
                }
                "drm-shared-memory" => {
                    if let Some(v) = parse_memory(value) {
                        usage.shared_memory = v;
                    }
                }
                "drm-active-memory" => {
                    if let Some(v) = parse_memory(value) {
                        usage.active_memory = v;
                    }
                }
                "drm-engine-npu-amdxdna" => {
                    if let Some(ns) = parse_engine_ns(value) {
                        usage.npu += ns;
                    }
                }
                _ => {}
            }
        }

        usage
    }

    /// Turns two engine-time samples into a busy percentage over the
    /// sampling interval, carrying the memory values of the later sample.
    pub fn calc_usage(&self, pre_stat: &Self, interval: &Duration) -> Self {
        Self {
            total_memory: self.total_memory,
            shared_memory: self.shared_memory,
            active_memory: self.active_memory,
            npu: diff_usage(pre_stat.npu, self.npu, interval),
        }
    }
}

/// One process holding the device open, with its parsed usage.
#[derive(Clone, Debug, Default)]
pub struct FdInfoClient {
    pub pid: i32,
    pub name: String,
    pub usage: FdInfoUsage,
}

/// Walks /proc for processes that have `device_path` open and parses their
/// DRM fdinfo. Multiple fds on the same DRM file report the same
/// drm-client-id and are counted once.
pub fn device_clients(device_path: &Path) -> Vec<FdInfoClient> {
    let Ok(proc_dir) = fs::read_dir("/proc") else {
        return Vec::new();
    };

    let mut clients = Vec::new();

    for entry in proc_dir.flatten() {
        let Some(pid) = entry
            .file_name()
            .to_str()
            .and_then(|s| s.parse::<i32>().ok())
        else {
            continue;
        };

        // Unreadable fd dirs are other users' processes or races with exit.
        let Ok(fds) = fs::read_dir(entry.path().join("fd")) else {
            continue;
        };

        let mut seen = HashSet::new();
        let mut usage = FdInfoUsage::default();
        for fd in fds.flatten() {
            if fs::read_link(fd.path()).ok().as_deref() != Some(device_path) {
                continue;
            }

            let Ok(text) = fs::read_to_string(entry.path().join("fdinfo").join(fd.file_name()))
            else {
                continue;
            };

            let Some(client_id) = FdInfoUsage::client_id(&text) else {
                continue;
            };
            if !seen.insert(client_id) {
                continue;
            }

            usage = usage + FdInfoUsage::parse(&text);
        }

        if seen.is_empty() {
            continue;
        }

        let name = fs::read_to_string(entry.path().join("comm"))
            .map(|mut s| {
                let _ = s.pop(); // trim '\n'
                s
            })
            .unwrap_or_default();

        clients.push(FdInfoClient { pid, name, usage });
    }

    clients
}

fn diff_usage(pre: i64, cur: i64, interval: &Duration) -> i64 {
    if pre == 0 || cur < pre {
        return 0;
    }

    (cur.saturating_sub(pre) as u128)
        .saturating_mul(100)
        .checked_div(interval.as_nanos())
        .unwrap_or(0) as i64
}

#[cfg(test)]
mod test {
    use super::*;

    const SAMPLE: &str = "\
pos:\t0
flags:\t02100002
mnt_id:\t25
ino:\t1002
drm-driver:\tamdxdna_accel_driver
drm-client-id:\t64
drm-pdev:\t0000:c5:00.1
drm-total-memory:\t8192 KiB
drm-shared-memory:\t4 MiB
drm-active-memory:\t0 KiB
drm-engine-npu-amdxdna:\t76360 ns
";

    #[test]
    fn fdinfo_parse() {
        let usage = FdInfoUsage::parse(SAMPLE);

        assert_eq!(
            usage,
            FdInfoUsage {
                total_memory: 8192,
                shared_memory: 4096,
                active_memory: 0,
                npu: 76360,
            }
        );
        assert_eq!(FdInfoUsage::client_id(SAMPLE), Some(64));
    }

    #[test]
    fn fdinfo_parse_ignores_unrelated_lines() {
        let usage = FdInfoUsage::parse("pos:\t0\ndrm-engine-gfx:\t100 ns\n");
        assert_eq!(usage, FdInfoUsage::default());
        assert_eq!(FdInfoUsage::client_id("pos:\t0\n"), None);
    }

    #[test]
    fn busy_percent() {
        let interval = Duration::from_secs(1);

        // 500ms of engine time over a 1s interval is 50% busy.
        assert_eq!(diff_usage(1_000_000, 501_000_000, &interval), 50);
        // First sample, no baseline yet.
        assert_eq!(diff_usage(0, 501_000_000, &interval), 0);
        // Counter reset (driver reload), treated as idle.
        assert_eq!(diff_usage(501_000_000, 1_000_000, &interval), 0);
    }

    #[test]
    fn usage_sum_and_calc() {
        let pre = FdInfoUsage {
            npu: 1_000_000,
            ..Default::default()
        };
        let cur = FdInfoUsage {
            total_memory: 8192,
            shared_memory: 4096,
            active_memory: 0,
            npu: 251_000_000,
        };

        let usage = cur.calc_usage(&pre, &Duration::from_secs(1));
        assert_eq!(usage.npu, 25);
        assert_eq!(usage.total_memory, 8192);

        let sum = usage + usage;
        assert_eq!(sum.total_memory, 16384);
        assert_eq!(sum.npu, 50);
    }
}
