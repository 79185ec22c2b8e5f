use crate::output::print_json;
use anyhow::Context;
use shipwright_core::logbook::Logbook;
use shipwright_core::paths;
use std::path::Path;

pub fn run(env_file: &Path, data_dir: Option<&Path>, tail: usize, json: bool) -> anyhow::Result<()> {
    let data_dir = super::resolve_data_dir(env_file, data_dir);
    let entries = Logbook::new(paths::log_path(&data_dir))
        .entries()
        .context("failed to read logbook")?;

    let start = entries.len().saturating_sub(tail);
    let shown = &entries[start..];

    if json {
        return print_json(&shown);
    }

    if shown.is_empty() {
        println!("Logbook is empty.");
        return Ok(());
    }
    for entry in shown {
        println!("{}  {}", entry.timestamp.format("%Y-%m-%d %H:%M:%S"), entry.message);
    }
    Ok(())
}
