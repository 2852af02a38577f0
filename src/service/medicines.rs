use anyhow::{Context, Result};

use crate::config::AppConfig;
use crate::ui::Output;

pub fn medicines(json: bool, force_local: bool, force_global: bool) -> Result<()> {
    let output = Output::new();
    let config = AppConfig::load_with_scope(force_local, force_global)?;
    let catalog = config.catalog();
    let entries: Vec<_> = catalog.iter().collect();

    if json {
        let text =
            serde_json::to_string_pretty(&entries).context("Failed to serialize medicines")?;
        println!("{}", text);
        return Ok(());
    }

    output.status("Medicines", &format!("{} known", entries.len()));
    output.medicine_table(&entries);

    Ok(())
}
