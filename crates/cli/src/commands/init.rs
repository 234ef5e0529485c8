//! Init command: write a default .testimpact.toml

use anyhow::Result;
use colored::Colorize;
use std::path::Path;
use testimpact_core::ImpactConfig;

pub fn run(path: Option<&Path>) -> Result<()> {
    let dir = path.unwrap_or_else(|| Path::new("."));
    let config_path = dir.join(".testimpact.toml");

    if config_path.exists() {
        println!(
            "  {} already exists, leaving it untouched",
            config_path.display()
        );
        return Ok(());
    }

    ImpactConfig::default().save(&config_path)?;
    println!("  {} {}", "Created".green(), config_path.display());

    Ok(())
}
