/*
 * Test utilities for Tempmon
 *
 * Helpers to fabricate hwmon-shaped directory trees on top of tempfile,
 * shared by the unit test modules.
 */

use std::fs;
use std::path::{Path, PathBuf};

/// Create `hwmon{index}` under `root` with a trailing-newline name file,
/// the way the kernel presents it.
pub fn add_instance(root: &Path, index: usize, name: &str) -> PathBuf {
    let dir = root.join(format!("hwmon{}", index));
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("name"), format!("{}\n", name)).unwrap();
    dir
}

/// Add a labeled temperature channel with a millidegree reading.
pub fn add_channel(dir: &Path, channel: usize, label: &str, millidegrees: u32) {
    fs::write(
        dir.join(format!("temp{}_label", channel)),
        format!("{}\n", label),
    )
    .unwrap();
    fs::write(
        dir.join(format!("temp{}_input", channel)),
        format!("{}\n", millidegrees),
    )
    .unwrap();
}

/// Add a sibling threshold attribute (e.g. "max", "crit").
pub fn add_attr(dir: &Path, channel: usize, attr: &str, value: u32) {
    fs::write(
        dir.join(format!("temp{}_{}", channel, attr)),
        format!("{}\n", value),
    )
    .unwrap();
}
