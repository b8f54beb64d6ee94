//! Configuration port interface

use async_trait::async_trait;
use std::path::PathBuf;

use crate::domain::config::AppConfig;
use crate::domain::error::ConfigError;

/// Port for the persisted interview configuration.
///
/// Stores only what the user saved; defaults, environment and flags are
/// layered on top by the caller.
#[async_trait]
pub trait ConfigStore: Send + Sync {
    /// Load the saved configuration.
    ///
    /// A missing file yields an empty config, not an error.
    async fn load(&self) -> Result<AppConfig, ConfigError>;

    /// Persist `config`, creating parent directories as needed.
    async fn save(&self, config: &AppConfig) -> Result<(), ConfigError>;

    /// Location of the backing file
    fn path(&self) -> PathBuf;

    fn exists(&self) -> bool;

    /// Write the default configuration.
    /// Fails with `AlreadyExists` rather than overwrite saved keys.
    async fn init(&self) -> Result<(), ConfigError>;
}
