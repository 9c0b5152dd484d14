//! Check command handler.
//!
//! Parses and validates a config file, then prints the rotation it defines.

use std::path::Path;

use advert_core::{AdvertConfig, AdvertLocation};
use advert_runtime::read_config;
use anyhow::Result;

use crate::error::CliError;
use crate::presentation::{escape_control, print_separator};

/// Execute the check command.
pub fn execute(config_path: &Path) -> Result<()> {
    let config = read_config(config_path).map_err(CliError::from)?;

    println!("{} is valid.\n", config_path.display());
    for line in summarize(&config) {
        println!("{line}");
    }
    Ok(())
}

/// Human-readable summary of a validated config.
pub fn summarize(config: &AdvertConfig) -> Vec<String> {
    let mut lines = vec![
        format!("Interval:      {}s", config.interval),
        format!("Html duration: {}s", config.html_duration),
        format!("Volume:        {}", config.volume),
        format!("Map aliases:   {}", config.maps_name.len()),
        format!("Groups:        {}", config.advert_list.len()),
    ];

    let totals: Vec<String> = AdvertLocation::ALL
        .iter()
        .map(|location| {
            let count = config
                .advert_list
                .iter()
                .flat_map(|group| group.values())
                .filter(|entries| entries.contains_key(location))
                .count();
            format!("{location}={count}")
        })
        .collect();
    lines.push(format!("Entries:       {}", totals.join(" ")));

    for (index, group) in config.advert_list.iter().enumerate() {
        lines.push(String::new());
        lines.push(format!("#{index}"));
        for (label, entries) in group {
            for (location, message) in entries {
                lines.push(format!(
                    "  {label:<12} {:<7} {}",
                    location.as_str(),
                    escape_control(message)
                ));
            }
        }
    }
    lines
}

/// Print a short rotation overview, used by `run` at startup.
pub fn print_overview(config: &AdvertConfig) {
    print_separator(40);
    for line in summarize(config).iter().take(6) {
        println!("{line}");
    }
    print_separator(40);
}
