/*
 * This file is part of Tempmon.
 *
 * Copyright (C) 2026 Tempmon contributors
 *
 * Tempmon is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * Tempmon is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with Tempmon. If not, see <https://www.gnu.org/licenses/>.
 */

//! Supported hwmon drivers and their channel-selection strategies.
//!
//! Each driver exposes the die temperature differently:
//! - `coretemp` (Intel) labels one channel per core plus a package
//!   aggregate; we monitor the package channel and pick up its
//!   tempN_max/tempN_crit siblings.
//!   Ref: https://docs.kernel.org/hwmon/coretemp.html
//! - `k10temp` (AMD) labels the cooling-control reading "Tctl". No
//!   threshold attributes are exposed.
//!   Ref: https://docs.kernel.org/hwmon/k10temp.html
//! - `cpu_thermal` (Raspberry Pi and other SoCs) exposes a single
//!   unlabeled channel.

use std::fs::File;
use std::path::{Path, PathBuf};

use crate::constants::{CHANNEL_PROBE_LIMIT, CPU_CRIT_DEFAULT_MC, CPU_MAX_DEFAULT_MC};
use crate::error::{Result, TempMonError};
use crate::sysfs;

/// Identity of one supported vendor driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverKind {
    Coretemp,
    K10temp,
    CpuThermal,
}

/// Driver registry. Order is tie-break priority when one instance name
/// would match more than one entry.
pub const DRIVER_TABLE: [DriverKind; 3] = [
    DriverKind::Coretemp,
    DriverKind::K10temp,
    DriverKind::CpuThermal,
];

/// Outcome of locating the monitored channel within one hwmon instance:
/// the open data file plus resolved threshold values. Consumed to build
/// the shared driver state.
#[derive(Debug)]
pub struct ResolvedChannel {
    pub input: File,
    pub channel: usize,
    pub max_mc: u32,
    pub crit_mc: u32,
}

impl DriverKind {
    /// Driver name as the kernel reports it in the instance's name file.
    pub fn type_name(self) -> &'static str {
        match self {
            DriverKind::Coretemp => "coretemp",
            DriverKind::K10temp => "k10temp",
            DriverKind::CpuThermal => "cpu_thermal",
        }
    }

    /// Match a kernel-reported name against the registry, in table order.
    pub fn from_type_name(name: &str) -> Option<DriverKind> {
        DRIVER_TABLE.iter().copied().find(|k| k.type_name() == name)
    }

    /// Locate the monitored channel inside `hwmon{instance}` under `root`.
    ///
    /// Failure here is a discovery failure for the whole descriptor, not a
    /// per-read condition.
    pub fn locate(self, root: &Path, instance: usize) -> Result<ResolvedChannel> {
        let dir = root.join(format!("hwmon{}", instance));
        match self {
            DriverKind::Coretemp => locate_coretemp(&dir),
            DriverKind::K10temp => locate_by_label(&dir, self, |label| label == "Tctl"),
            DriverKind::CpuThermal => locate_single_channel(&dir),
        }
    }
}

/// Scan temp{N}_label files from 1 upward and open temp{N}_input for the
/// first label accepted by `matches`. The first missing label file ends
/// the scan (end of channels, not an error).
fn locate_by_label(
    dir: &Path,
    kind: DriverKind,
    matches: impl Fn(&str) -> bool,
) -> Result<ResolvedChannel> {
    for channel in 1..CHANNEL_PROBE_LIMIT {
        let label = match sysfs::read_trimmed(channel_path(dir, channel, "label")) {
            Ok(label) => label,
            Err(_) => break,
        };
        if matches(&label) {
            let input = File::open(channel_path(dir, channel, "input"))?;
            return Ok(ResolvedChannel {
                input,
                channel,
                max_mc: CPU_MAX_DEFAULT_MC,
                crit_mc: CPU_CRIT_DEFAULT_MC,
            });
        }
    }
    Err(TempMonError::ChannelNotFound {
        driver: kind.type_name(),
    })
}

/// coretemp: monitor the package aggregate ("Package id N"), not the
/// per-core channels. The driver also exposes tempN_max/tempN_crit, which
/// replace the defaults when present and parseable.
fn locate_coretemp(dir: &Path) -> Result<ResolvedChannel> {
    let mut resolved = locate_by_label(dir, DriverKind::Coretemp, |label| {
        label.to_ascii_lowercase().starts_with("package id")
    })?;

    if let Ok(v) = sysfs::read_uint(channel_path(dir, resolved.channel, "max")) {
        resolved.max_mc = v;
    }
    if let Ok(v) = sysfs::read_uint(channel_path(dir, resolved.channel, "crit")) {
        resolved.crit_mc = v;
    }
    Ok(resolved)
}

/// cpu_thermal: a single unlabeled channel, always temp1_input.
fn locate_single_channel(dir: &Path) -> Result<ResolvedChannel> {
    let input = File::open(channel_path(dir, 1, "input"))?;
    Ok(ResolvedChannel {
        input,
        channel: 1,
        max_mc: CPU_MAX_DEFAULT_MC,
        crit_mc: CPU_CRIT_DEFAULT_MC,
    })
}

fn channel_path(dir: &Path, channel: usize, attr: &str) -> PathBuf {
    dir.join(format!("temp{}_{}", channel, attr))
}
