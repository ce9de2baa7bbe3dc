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

//! Scalar reads from single-line sysfs pseudo-files.

use std::fs;
use std::io::{self, Read};
use std::path::Path;

use crate::error::{Result, TempMonError};

/// Read a whole pseudo-file as a trimmed string.
pub fn read_trimmed<P: AsRef<Path>>(p: P) -> io::Result<String> {
    let mut s = String::new();
    fs::File::open(p)?.read_to_string(&mut s)?;
    Ok(s.trim().to_string())
}

/// One-shot read of an unsigned integer attribute (tempN_max, tempN_crit).
pub fn read_uint<P: AsRef<Path>>(p: P) -> Result<u32> {
    let path = p.as_ref();
    let raw = read_trimmed(path)?;
    raw.parse::<u32>()
        .map_err(|_| TempMonError::Parse(format!("{}: '{}'", path.display(), raw)))
}
