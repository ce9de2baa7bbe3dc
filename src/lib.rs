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

//! Tempmon - CPU die temperature readout for Linux using hwmon
//!
//! This library probes /sys/class/hwmon at runtime, adapts to whichever
//! supported vendor driver is present (coretemp, k10temp, cpu_thermal), and
//! shares a single open sensor handle between any number of concurrent
//! readers.

pub mod attach;
pub mod constants;
pub mod discovery;
pub mod driver;
pub mod error;
pub mod logger;
pub mod poll;
pub mod sysfs;

#[cfg(test)]
pub mod test_utils;
