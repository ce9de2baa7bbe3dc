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

//! Consumer-facing attach and read surface.
//!
//! The record framework attaches once per record with a channel token and
//! keeps the returned handle for every subsequent read. A failed discovery
//! leaves the handle unbound rather than failing the attach: the caller
//! keeps running and every read reports `Unavailable`, which maps upstream
//! to an undefined-value + communication-alarm condition.

use std::str::FromStr;

use serde_json::json;

use crate::discovery::{self, DriverHandle};
use crate::error::{Result, TempMonError};
use crate::logger;

/// Which of the three exposed values a consumer reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelKind {
    /// Live die temperature, polled from the data file.
    Instant,
    /// Cached warning threshold.
    Max,
    /// Cached critical threshold.
    Crit,
}

impl FromStr for ChannelKind {
    type Err = TempMonError;

    /// Parse an attach token. Anything but the three recognized literals
    /// is a configuration error, reported at attach time.
    fn from_str(token: &str) -> Result<Self> {
        match token {
            "CPU_TEMP" => Ok(ChannelKind::Instant),
            "CPU_MAX_TEMP" => Ok(ChannelKind::Max),
            "CPU_CRIT_TEMP" => Ok(ChannelKind::Crit),
            other => Err(TempMonError::InvalidChannel(other.to_string())),
        }
    }
}

/// One consumer's binding: a channel kind plus a reference to the resolved
/// driver, if any. Created once at attach, reused for every read.
#[derive(Debug, Clone, Copy)]
pub struct ConsumerHandle<'a> {
    channel: ChannelKind,
    driver: Option<&'a DriverHandle>,
}

impl ConsumerHandle<'static> {
    /// Attach with a channel token, running process-wide discovery if it
    /// has not run yet.
    pub fn attach(token: &str) -> Result<Self> {
        let channel = token.parse::<ChannelKind>()?;
        Ok(ConsumerHandle::bound(channel, discovery::discover_once()))
    }
}

impl<'a> ConsumerHandle<'a> {
    /// Bind a channel kind to an already-resolved driver (or to none).
    pub fn bound(channel: ChannelKind, driver: Option<&'a DriverHandle>) -> Self {
        ConsumerHandle { channel, driver }
    }

    pub fn channel(&self) -> ChannelKind {
        self.channel
    }

    /// Whether discovery resolved a driver for this handle.
    pub fn is_bound(&self) -> bool {
        self.driver.is_some()
    }

    /// Read this handle's value in millidegrees.
    ///
    /// Exactly one branch per call: `Instant` polls under the driver lock,
    /// the threshold kinds return cached values without I/O. An unbound
    /// handle reports `Unavailable` without attempting any I/O.
    pub fn read(&self) -> Result<u32> {
        let driver = self.driver.ok_or(TempMonError::Unavailable)?;
        match self.channel {
            ChannelKind::Instant => match driver.state.poll() {
                Ok(mc) => Ok(mc),
                Err(e) => {
                    logger::log_event(
                        "poll_error",
                        json!({ "driver": driver.kind.type_name(), "error": e.to_string() }),
                    );
                    Err(e)
                }
            },
            ChannelKind::Max => Ok(driver.state.max_mc()),
            ChannelKind::Crit => Ok(driver.state.crit_mc()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::driver::DriverKind;
    use crate::poll::SharedDriverState;
    use std::fs;
    use tempfile::TempDir;

    fn fabricated_handle(contents: &str) -> (TempDir, DriverHandle) {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("temp1_input");
        fs::write(&path, contents).unwrap();
        let input = fs::File::open(&path).unwrap();
        let handle = DriverHandle {
            kind: DriverKind::Coretemp,
            state: SharedDriverState::with_reader(input, 95_000, 105_000),
        };
        (tmp, handle)
    }

    #[test]
    fn test_channel_kind_tokens() {
        assert_eq!("CPU_TEMP".parse::<ChannelKind>().unwrap(), ChannelKind::Instant);
        assert_eq!("CPU_MAX_TEMP".parse::<ChannelKind>().unwrap(), ChannelKind::Max);
        assert_eq!("CPU_CRIT_TEMP".parse::<ChannelKind>().unwrap(), ChannelKind::Crit);
    }

    #[test]
    fn test_unknown_token_is_config_error() {
        let result = "CPU_TMP".parse::<ChannelKind>();
        assert!(matches!(result, Err(TempMonError::InvalidChannel(t)) if t == "CPU_TMP"));
        assert!("cpu_temp".parse::<ChannelKind>().is_err());
        assert!("".parse::<ChannelKind>().is_err());
    }

    #[test]
    fn test_unbound_handle_reads_unavailable() {
        let handle = ConsumerHandle::bound(ChannelKind::Instant, None);
        assert!(!handle.is_bound());
        assert!(matches!(handle.read(), Err(TempMonError::Unavailable)));

        // Threshold kinds are just as unavailable; no cached fallback.
        let handle = ConsumerHandle::bound(ChannelKind::Crit, None);
        assert!(matches!(handle.read(), Err(TempMonError::Unavailable)));
    }

    #[test]
    fn test_dispatch_is_exhaustive_and_exclusive() {
        let (_tmp, driver) = fabricated_handle("43375\n");

        let instant = ConsumerHandle::bound(ChannelKind::Instant, Some(&driver));
        let max = ConsumerHandle::bound(ChannelKind::Max, Some(&driver));
        let crit = ConsumerHandle::bound(ChannelKind::Crit, Some(&driver));

        assert_eq!(instant.read().unwrap(), 43375);
        assert_eq!(max.read().unwrap(), 95_000);
        assert_eq!(crit.read().unwrap(), 105_000);
    }

    #[test]
    fn test_threshold_reads_do_no_io() {
        // A broken data file must not affect Max/Crit reads.
        let (tmp, driver) = fabricated_handle("");
        fs::remove_file(tmp.path().join("temp1_input")).unwrap();

        let max = ConsumerHandle::bound(ChannelKind::Max, Some(&driver));
        let crit = ConsumerHandle::bound(ChannelKind::Crit, Some(&driver));
        assert_eq!(max.read().unwrap(), 95_000);
        assert_eq!(crit.read().unwrap(), 105_000);
    }

    #[test]
    fn test_poll_failure_is_per_call() {
        let (tmp, driver) = fabricated_handle("");
        let instant = ConsumerHandle::bound(ChannelKind::Instant, Some(&driver));

        assert!(matches!(instant.read(), Err(TempMonError::ReadFailure)));

        // The next poll sees fresh contents and recovers on its own.
        fs::write(tmp.path().join("temp1_input"), "43375\n").unwrap();
        assert_eq!(instant.read().unwrap(), 43375);
    }
}
