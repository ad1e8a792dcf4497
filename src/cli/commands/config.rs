//! Show or initialise the configuration file

use std::path::Path;

use healthdesk::config::AppConfig;
use healthdesk::output::{OperationResult, OutputMode};

/// Print the effective configuration, or write it out with `init`
pub fn config(config: &AppConfig, path: &Path, init: bool, mode: OutputMode) -> anyhow::Result<()> {
    if init {
        if path.exists() {
            anyhow::bail!("Config already exists at {}", path.display());
        }
        config.save_to(path)?;
        OperationResult::ok(format!("Wrote {}", path.display())).render(mode);
        return Ok(());
    }

    match mode {
        OutputMode::Json => println!(
            "{}",
            serde_json::json!({
                "path": path.display().to_string(),
                "exists": path.exists(),
                "data_dir": config.storage.data_dir().display().to_string(),
                "config": config,
            })
        ),
        OutputMode::Human => {
            println!("# {}", path.display());
            print!("{}", toml::to_string_pretty(config)?);
        },
    }
    Ok(())
}
