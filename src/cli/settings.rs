//! Configuration command

use colored::Colorize;
use mathstar::config::CONFIG_FILENAME;
use mathstar::MathStarConfig;
use std::path::{Path, PathBuf};

use super::AppContext;

/// Write a default config to `config_path`, or `mathstar.toml` in the working directory
pub fn cmd_config_init(config_path: Option<&Path>, force: bool) -> anyhow::Result<()> {
    let path = config_path
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(CONFIG_FILENAME));
    if path.exists() && !force {
        anyhow::bail!(
            "{} already exists (use --force to overwrite)",
            path.display()
        );
    }
    MathStarConfig::default().save(&path)?;
    println!(
        "{} Wrote default configuration to {}",
        "✓".bright_green(),
        path.display()
    );
    Ok(())
}

/// Print the configuration in effect after defaults and file overrides
pub fn cmd_config_show(ctx: &AppContext) -> anyhow::Result<()> {
    if ctx.format.is_json() {
        println!("{}", serde_json::to_string_pretty(&ctx.config)?);
        return Ok(());
    }

    println!("{}", "⚙️  Effective Configuration".bright_cyan().bold());
    println!("{}", "═".repeat(60).dimmed());
    println!();
    print!("{}", toml::to_string_pretty(&ctx.config)?);
    Ok(())
}
