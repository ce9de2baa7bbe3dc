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

//! Unified error handling for Tempmon.

use std::io;

/// Result type alias using TempMonError
pub type Result<T> = std::result::Result<T, TempMonError>;

#[derive(thiserror::Error, Debug)]
pub enum TempMonError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// No probed hwmon instance reported a supported driver name.
    #[error("no supported hwmon driver found")]
    NoDriverFound,

    /// A matched driver could not locate its target sensor channel.
    #[error("{driver}: no usable temperature channel")]
    ChannelNotFound { driver: &'static str },

    /// Empty or malformed payload from the live data file. Per-poll only;
    /// the next poll retries independently.
    #[error("empty or malformed sensor reading")]
    ReadFailure,

    #[error("parse error: {0}")]
    Parse(String),

    /// The consumer is not bound to any driver (discovery failed at attach).
    #[error("hwmon interface unavailable")]
    Unavailable,

    #[error("invalid channel '{0}', must be CPU_TEMP, CPU_MAX_TEMP or CPU_CRIT_TEMP")]
    InvalidChannel(String),
}
