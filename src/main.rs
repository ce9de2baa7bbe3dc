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

//! Operator diagnostic CLI: report the selected driver, re-enumerate the
//! probe surface, or take a one-shot reading.

use tempmon::attach::ConsumerHandle;
use tempmon::constants;
use tempmon::discovery;
use tempmon::logger;

fn usage() {
    eprintln!("Usage: tempmon [--logging] <command>");
    eprintln!();
    eprintln!("Commands:");
    eprintln!("  status           report the selected hwmon driver type");
    eprintln!("  scan [--json]    print every probed instance's declared name");
    eprintln!("  read <CHANNEL>   one-shot read; CHANNEL is CPU_TEMP, CPU_MAX_TEMP or CPU_CRIT_TEMP");
}

fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().collect();

    if args.iter().any(|a| a == "--logging") {
        logger::init_logging();
        logger::log_event("startup", serde_json::json!({ "args": args }));
    }

    // Positional arguments, flags filtered out
    let positional: Vec<&str> = args[1..]
        .iter()
        .map(|s| s.as_str())
        .filter(|a| !a.starts_with("--"))
        .collect();

    match positional.first().copied() {
        Some("status") => {
            let _ = discovery::discover_once();
            println!("hwmon type: {}", discovery::selected_type_name());
            Ok(())
        }
        Some("scan") => {
            let entries = discovery::probe_names(&constants::hwmon_root());
            if args.iter().any(|a| a == "--json") {
                println!("{}", serde_json::to_string_pretty(&entries)?);
            } else {
                println!("Available hwmon sensors:");
                for entry in &entries {
                    println!(" hwmon{}: {}", entry.index, entry.name);
                }
            }
            Ok(())
        }
        Some("read") => {
            let Some(token) = positional.get(1).copied() else {
                usage();
                std::process::exit(2);
            };
            let handle = ConsumerHandle::attach(token)?;
            match handle.read() {
                Ok(mc) => {
                    println!("{} mC ({:.3} C)", mc, mc as f64 / 1000.0);
                    Ok(())
                }
                Err(e) => {
                    eprintln!("read error: {}", e);
                    std::process::exit(1);
                }
            }
        }
        _ => {
            usage();
            std::process::exit(2);
        }
    }
}
