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

//! Driver discovery over numbered hwmon instances.
//!
//! Discovery scans hwmon{0..} under the probe root, matches each instance's
//! declared name against the driver registry, and resolves the first match
//! into a process-wide [`DriverHandle`]. The selection cell runs the probe
//! at most once per process; every later call sees the cached outcome.

use std::path::Path;
use std::sync::Mutex;

use lazy_static::lazy_static;
use serde::Serialize;
use serde_json::json;

use crate::constants::{hwmon_root, INSTANCE_PROBE_LIMIT};
use crate::driver::DriverKind;
use crate::error::{Result, TempMonError};
use crate::logger;
use crate::poll::SharedDriverState;
use crate::sysfs;

/// A resolved driver: its identity plus the state shared by every consumer.
#[derive(Debug)]
pub struct DriverHandle {
    pub kind: DriverKind,
    pub state: SharedDriverState,
}

/// One-shot selection cell. Unprobed until the first `discover_once` call;
/// the outcome (found or missing) is pinned afterwards. An explicit state,
/// not a sentinel value over the file descriptor.
#[derive(Clone, Copy)]
enum Selection {
    Unprobed,
    Missing,
    Ready(&'static DriverHandle),
}

lazy_static! {
    static ref SELECTED: Mutex<Selection> = Mutex::new(Selection::Unprobed);
}

/// Scan `root` for the first instance whose declared name matches a
/// registry entry, and resolve that driver's channel.
///
/// Unreadable or unnamed instances are skipped. Once an instance matches,
/// scanning stops: a locate failure there is a hard discovery failure and
/// is not retried against later instances.
pub fn discover(root: &Path) -> Result<DriverHandle> {
    for instance in 0..INSTANCE_PROBE_LIMIT {
        let name_file = root.join(format!("hwmon{}", instance)).join("name");
        let name = match sysfs::read_trimmed(&name_file) {
            Ok(name) if !name.is_empty() => name,
            _ => continue,
        };
        let Some(kind) = DriverKind::from_type_name(&name) else {
            continue;
        };
        let channel = kind.locate(root, instance)?;
        return Ok(DriverHandle {
            kind,
            state: SharedDriverState::new(channel),
        });
    }
    Err(TempMonError::NoDriverFound)
}

/// Run discovery against the configured hwmon root, at most once per
/// process. Concurrent first calls are serialized by the cell's own lock.
///
/// Returns the resolved handle, or `None` when no supported driver was
/// found or its channel could not be located. Either outcome is cached.
pub fn discover_once() -> Option<&'static DriverHandle> {
    let mut selected = match SELECTED.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    };
    match *selected {
        Selection::Ready(handle) => Some(handle),
        Selection::Missing => None,
        Selection::Unprobed => match discover(&hwmon_root()) {
            Ok(handle) => {
                let handle: &'static DriverHandle = Box::leak(Box::new(handle));
                *selected = Selection::Ready(handle);
                logger::log_event("discovery", json!({ "driver": handle.kind.type_name() }));
                Some(handle)
            }
            Err(e) => {
                *selected = Selection::Missing;
                logger::log_event(
                    "discovery",
                    json!({ "driver": "none", "error": e.to_string() }),
                );
                None
            }
        },
    }
}

/// Type name of the resolved driver, or "none". Peeks the selection cell
/// without triggering a probe.
pub fn selected_type_name() -> &'static str {
    let selected = match SELECTED.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    };
    match *selected {
        Selection::Ready(handle) => handle.kind.type_name(),
        _ => "none",
    }
}

/// One row of the diagnostic re-enumeration.
#[derive(Debug, Clone, Serialize)]
pub struct ScanEntry {
    pub index: usize,
    pub name: String,
}

/// Re-enumerate every probed instance's declared name, for the operator
/// diagnostic surface. Unreadable instances are skipped, not fatal.
pub fn probe_names(root: &Path) -> Vec<ScanEntry> {
    let mut entries = Vec::new();
    for index in 0..INSTANCE_PROBE_LIMIT {
        let name_file = root.join(format!("hwmon{}", index)).join("name");
        match sysfs::read_trimmed(&name_file) {
            Ok(name) if !name.is_empty() => entries.push(ScanEntry { index, name }),
            _ => continue,
        }
    }
    entries
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{add_channel, add_instance};
    use std::fs;
    use tempfile::TempDir;

    fn coretemp_instance(root: &Path, index: usize) {
        let dir = add_instance(root, index, "coretemp");
        add_channel(&dir, 1, "Package id 0", 43375);
    }

    #[test]
    fn test_discover_resolves_coretemp_at_instance_zero() {
        let tmp = TempDir::new().unwrap();
        coretemp_instance(tmp.path(), 0);

        let handle = discover(tmp.path()).unwrap();
        assert_eq!(handle.kind, DriverKind::Coretemp);
        assert_eq!(handle.state.poll().unwrap(), 43375);
    }

    #[test]
    fn test_discover_resolves_k10temp_at_instance_zero() {
        let tmp = TempDir::new().unwrap();
        let dir = add_instance(tmp.path(), 0, "k10temp");
        add_channel(&dir, 1, "Tctl", 48500);

        let handle = discover(tmp.path()).unwrap();
        assert_eq!(handle.kind, DriverKind::K10temp);
        assert_eq!(handle.state.max_mc(), 100_000);
        assert_eq!(handle.state.crit_mc(), 110_000);
    }

    #[test]
    fn test_discover_resolves_cpu_thermal_at_instance_zero() {
        let tmp = TempDir::new().unwrap();
        let dir = add_instance(tmp.path(), 0, "cpu_thermal");
        fs::write(dir.join("temp1_input"), "55017\n").unwrap();

        let handle = discover(tmp.path()).unwrap();
        assert_eq!(handle.kind, DriverKind::CpuThermal);
        assert_eq!(handle.state.poll().unwrap(), 55017);
    }

    #[test]
    fn test_discover_no_match_is_no_driver_found() {
        let tmp = TempDir::new().unwrap();
        add_instance(tmp.path(), 0, "nct6775");
        add_instance(tmp.path(), 1, "amdgpu");

        assert!(matches!(
            discover(tmp.path()),
            Err(TempMonError::NoDriverFound)
        ));
    }

    #[test]
    fn test_discover_empty_root_is_no_driver_found() {
        let tmp = TempDir::new().unwrap();
        assert!(matches!(
            discover(tmp.path()),
            Err(TempMonError::NoDriverFound)
        ));
    }

    #[test]
    fn test_discover_skips_gaps_and_unnamed_instances() {
        let tmp = TempDir::new().unwrap();
        // hwmon0 missing entirely, hwmon1 has an empty name file.
        let dir = add_instance(tmp.path(), 1, "");
        fs::write(dir.join("name"), "").unwrap();
        coretemp_instance(tmp.path(), 5);

        let handle = discover(tmp.path()).unwrap();
        assert_eq!(handle.kind, DriverKind::Coretemp);
    }

    #[test]
    fn test_discover_first_matching_instance_wins() {
        let tmp = TempDir::new().unwrap();
        let dir = add_instance(tmp.path(), 0, "k10temp");
        add_channel(&dir, 1, "Tctl", 48500);
        // A later coretemp instance is never probed.
        coretemp_instance(tmp.path(), 1);

        let handle = discover(tmp.path()).unwrap();
        assert_eq!(handle.kind, DriverKind::K10temp);
    }

    #[test]
    fn test_locate_failure_is_hard_not_retried() {
        let tmp = TempDir::new().unwrap();
        // Matching name but no package channel: discovery must fail here
        // even though a healthy instance follows.
        let dir = add_instance(tmp.path(), 0, "coretemp");
        add_channel(&dir, 1, "Core 0", 41000);
        coretemp_instance(tmp.path(), 1);

        assert!(matches!(
            discover(tmp.path()),
            Err(TempMonError::ChannelNotFound { driver: "coretemp" })
        ));
    }

    #[test]
    fn test_probe_names_lists_all_readable_instances() {
        let tmp = TempDir::new().unwrap();
        add_instance(tmp.path(), 0, "nct6775");
        coretemp_instance(tmp.path(), 2);
        add_instance(tmp.path(), 7, "amdgpu");

        let entries = probe_names(tmp.path());
        let listed: Vec<(usize, &str)> =
            entries.iter().map(|e| (e.index, e.name.as_str())).collect();
        assert_eq!(listed, vec![(0, "nct6775"), (2, "coretemp"), (7, "amdgpu")]);
    }
}
