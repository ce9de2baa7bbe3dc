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

//! Centralized paths, probe limits, and threshold defaults.

use std::env;
use std::path::PathBuf;

/// Base path for hwmon devices on Linux.
pub const HWMON_ROOT: &str = "/sys/class/hwmon";

/// Environment override for the hwmon base path. Points the whole probe
/// surface at a different tree (containers, test fixtures).
pub const HWMON_ROOT_ENV: &str = "TEMPMON_HWMON_ROOT";

/// Upper bound on probed hwmon instance indices. A bounded scan, not an
/// architectural limit.
pub const INSTANCE_PROBE_LIMIT: usize = 99;

/// Upper bound on probed sensor channels within one instance.
pub const CHANNEL_PROBE_LIMIT: usize = 99;

/// Fallback warning threshold in millidegrees Celsius, used when the
/// driver does not expose tempN_max.
pub const CPU_MAX_DEFAULT_MC: u32 = 100_000;

/// Fallback critical threshold in millidegrees Celsius, used when the
/// driver does not expose tempN_crit.
pub const CPU_CRIT_DEFAULT_MC: u32 = 110_000;

/// Resolve the hwmon base path, honoring the environment override.
pub fn hwmon_root() -> PathBuf {
    env::var_os(HWMON_ROOT_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(HWMON_ROOT))
}
