use anyhow::Result;
use colored::Colorize;

use crate::config::{CONFIG_FILE, GqlFieldConfig};
use crate::error::FieldError;

pub fn handle_init(force: bool) -> Result<()> {
    let cwd = std::env::current_dir()?;
    let config_path = cwd.join(CONFIG_FILE);

    if config_path.exists() && !force {
        return Err(FieldError::AlreadyInitialized(config_path.display().to_string()).into());
    }

    // Write starter config
    GqlFieldConfig::starter().save(&config_path)?;

    println!(
        "{} gqlfield project in {}",
        "Initialized".green(),
        cwd.display()
    );
    println!("  Config: {}", config_path.display());
    println!(
        "  Try:    gqlfield resolve hello --args '{}'",
        r#"{"name": "Ada"}"#
    );
    Ok(())
}
