mod assets;
mod inventory;
mod server;
mod telemetry;

#[cfg(test)]
mod tests;

pub use assets::*;
pub use inventory::*;
pub use server::*;
pub use telemetry::*;

use serde::Deserialize;

use crate::error::ServerError;

/// Top-level configuration for the catalog server, loaded from a TOML file.
#[derive(Debug, Default, Deserialize)]
pub struct CatalogConfig {
    /// HTTP server bind configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Image asset storage.
    #[serde(default)]
    pub assets: AssetsConfig,
    /// Record store seeding.
    #[serde(default)]
    pub catalog: InventoryConfig,
    /// OpenTelemetry distributed tracing configuration.
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

impl CatalogConfig {
    /// Parse a TOML document. An empty document yields all defaults.
    pub fn from_toml(contents: &str) -> Result<Self, ServerError> {
        let config: Self =
            toml::from_str(contents).map_err(|e| ServerError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings the server cannot run with.
    pub fn validate(&self) -> Result<(), ServerError> {
        let prefix = self.assets.public_prefix.trim_matches('/');
        if prefix.is_empty() {
            return Err(ServerError::Config(
                "assets.public_prefix must not be empty or \"/\"".to_owned(),
            ));
        }
        if prefix.contains("..") {
            return Err(ServerError::Config(format!(
                "assets.public_prefix must not contain \"..\": {}",
                self.assets.public_prefix
            )));
        }

        let ext = self.assets.default_extension.trim_start_matches('.');
        if ext.is_empty() || !ext.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(ServerError::Config(format!(
                "assets.default_extension must be alphanumeric: {}",
                self.assets.default_extension
            )));
        }

        if self.assets.root.trim().is_empty() {
            return Err(ServerError::Config("assets.root must not be empty".to_owned()));
        }
        Ok(())
    }
}
