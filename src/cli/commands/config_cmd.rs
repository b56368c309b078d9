//! Configuration management commands.

use medexp::config::Config;

use crate::cli::icons::{dim_arrow, warn};

/// Print the effective configuration.
pub fn cmd_config_show(config: &Config) -> anyhow::Result<()> {
    if let Some(path) = &config.source_path {
        println!("# Loaded from {}", path.display());
    } else {
        println!("# Built-in defaults");
    }
    print!("{}", config.to_toml()?);
    Ok(())
}

/// Print the path of the loaded config file.
pub fn cmd_config_path(config: &Config) -> anyhow::Result<()> {
    match &config.source_path {
        Some(path) => println!("{}", path.display()),
        None => {
            eprintln!("{} No config file found, using defaults", warn());
            eprintln!(
                "  {} Create medexp.toml in the current directory or your config directory",
                dim_arrow()
            );
        }
    }
    Ok(())
}
