mod check;
mod describe;
mod global_id;
mod init;
mod query;
mod resolve;
mod sdl;
mod serve;
mod utils;

pub use check::handle_check;
pub use describe::handle_describe;
pub use global_id::handle_global_id;
pub use init::handle_init;
pub use query::handle_query;
pub use resolve::handle_resolve;
pub use sdl::handle_sdl;
pub use serve::handle_serve;

use anyhow::{Context, Result};
use std::path::Path;
use std::sync::Arc;

use crate::config::GqlFieldConfig;
use crate::declare::{DeclaredEntry, declared_fields, find_declared};
use crate::error::FieldError;

/// Common context passed to all command handlers
pub struct CommandContext {
    pub config: GqlFieldConfig,
    pub entries: Vec<DeclaredEntry>,
}

impl CommandContext {
    /// Loads `config_path`, or searches upwards from the working directory.
    pub fn load(config_path: Option<&str>) -> Result<Self> {
        let (config, _) = match config_path {
            Some(path) => GqlFieldConfig::load_from(Path::new(path))
                .with_context(|| format!("Failed to load config from {}", path))?,
            None => GqlFieldConfig::load(&std::env::current_dir()?)?,
        };
        let registry = Arc::new(config.registry()?);
        let entries = declared_fields(&config, registry).context("Invalid field declarations")?;
        Ok(Self { config, entries })
    }

    pub fn field(&self, path: &str) -> Result<&DeclaredEntry> {
        find_declared(&self.entries, &self.config.schema.query, path)
            .ok_or_else(|| FieldError::FieldNotFound(path.to_string()).into())
    }
}
