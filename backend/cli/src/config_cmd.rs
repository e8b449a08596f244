//! CLI Check-Config Command

use std::path::Path;

use anyhow::{bail, Result};

use platescan_config::{redacted_json, validate, PlateScanConfig, ValidationReport};

pub fn run(config: &PlateScanConfig, path: &Path) -> Result<()> {
    println!("\nConfig file: {}\n", path.display());
    println!("{}\n", serde_json::to_string_pretty(&redacted_json(config))?);

    let report = validate(config);
    print_report(&report);
    if !report.is_valid() {
        bail!("Configuration has {} error(s)", report.errors.len());
    }
    Ok(())
}

fn print_report(report: &ValidationReport) {
    for error in &report.errors {
        println!("  ✗ {}", error);
    }
    for warning in &report.warnings {
        println!("  ! {}", warning);
    }
    if report.is_valid() {
        println!("  ✓ Configuration is valid");
    }
}
