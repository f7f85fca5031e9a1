//! Client configuration schemas.
//!
//! All configuration structs are deserialized from TOML files via the
//! `config` crate. Each sub-module represents a logical configuration
//! section.

pub mod client;
pub mod logging;
pub mod ui;

use serde::{Deserialize, Serialize};

use self::client::ClientConfig;
use self::logging::LoggingConfig;
use self::ui::UiConfig;

use crate::error::AppError;

/// Root client configuration.
///
/// Top-level deserialization target for the merged configuration
/// sources (`config/default.toml`, an optional explicit file, and
/// `DATAHUB__*` environment variables).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// REST backend connection settings.
    #[serde(default)]
    pub client: ClientConfig,
    /// Presentation settings (alerts, navigation, event buffering).
    #[serde(default)]
    pub ui: UiConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration.
    ///
    /// Merges `config/default.toml`, the file at `path` (both optional)
    /// and environment variables prefixed with `DATAHUB__`.
    pub fn load(path: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(path).required(false))
            .add_source(
                config::Environment::with_prefix("DATAHUB")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))
    }
}
