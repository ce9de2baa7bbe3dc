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

//! Shared per-driver state and the generic poll routine.
//!
//! One `SharedDriverState` exists per resolved driver and is read by every
//! consumer bound to it. The data file stays open for the process lifetime;
//! each poll repositions and re-reads it under the lock.

use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::sync::Mutex;

use crate::driver::ResolvedChannel;
use crate::error::{Result, TempMonError};

/// Poll reads at most this many bytes; a millidegree value is far shorter.
const READ_BUF_LEN: usize = 32;

/// State shared by all consumers of one resolved driver.
///
/// The mutex serializes the seek-then-read critical section on the data
/// handle (the file cursor is the shared mutable resource). Thresholds are
/// set once at resolution time and read without the lock. Generic over the
/// reader so the poll path can be exercised with injected readers.
#[derive(Debug)]
pub struct SharedDriverState<R = File> {
    input: Mutex<R>,
    max_mc: u32,
    crit_mc: u32,
}

impl SharedDriverState<File> {
    pub fn new(channel: ResolvedChannel) -> Self {
        Self::with_reader(channel.input, channel.max_mc, channel.crit_mc)
    }
}

impl<R: Read + Seek> SharedDriverState<R> {
    pub fn with_reader(input: R, max_mc: u32, crit_mc: u32) -> Self {
        SharedDriverState {
            input: Mutex::new(input),
            max_mc,
            crit_mc,
        }
    }

    /// Cached warning threshold in millidegrees. No I/O, no lock.
    pub fn max_mc(&self) -> u32 {
        self.max_mc
    }

    /// Cached critical threshold in millidegrees. No I/O, no lock.
    pub fn crit_mc(&self) -> u32 {
        self.crit_mc
    }

    /// Serialized reposition-and-read of the shared data handle.
    ///
    /// Returns the current reading in millidegrees. An empty or malformed
    /// payload is `ReadFailure`, distinguishable from a genuine 0 mC value;
    /// the guard releases the lock on every exit path, so a failed poll
    /// never blocks the next one.
    pub fn poll(&self) -> Result<u32> {
        let mut input = match self.input.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        input.seek(SeekFrom::Start(0))?;
        let mut buf = [0u8; READ_BUF_LEN];
        let n = input.read(&mut buf)?;
        parse_millidegrees(&buf[..n])
    }
}

/// Parse a base-10 unsigned payload, ignoring a single trailing newline.
fn parse_millidegrees(raw: &[u8]) -> Result<u32> {
    if raw.is_empty() {
        return Err(TempMonError::ReadFailure);
    }
    let text = std::str::from_utf8(raw).map_err(|_| TempMonError::ReadFailure)?;
    let text = text.strip_suffix('\n').unwrap_or(text);
    text.parse::<u32>().map_err(|_| TempMonError::ReadFailure)
}
