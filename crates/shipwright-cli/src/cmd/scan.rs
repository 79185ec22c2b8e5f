use crate::output::print_json;
use anyhow::{bail, Context};
use shipwright_core::scan;
use std::path::Path;

pub fn run(path: &Path, json: bool) -> anyhow::Result<()> {
    let report = scan::scan_tree(path).context("secret scan failed")?;

    if json {
        print_json(&report)?;
    } else if report.is_clean() {
        println!("No secrets found.");
    } else {
        for finding in &report.findings {
            println!(
                "{}:{}  {}",
                finding.path.display(),
                finding.line,
                finding.rule
            );
        }
    }

    if !report.is_clean() {
        bail!("secrets detected: {}", report.summary());
    }
    Ok(())
}
