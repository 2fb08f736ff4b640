//! Configuration layering
//!
//! Later sources win: built-in defaults, then the configuration file, then
//! `WHETHERMAN_*` environment variables.

use std::path::{Path, PathBuf};

use config::{Config, Environment, File, FileFormat, Map};
use tracing::debug;

use super::{AppConfig, ConfigError};

/// Prefix of environment variable overrides
pub const ENV_PREFIX: &str = "WHETHERMAN";

/// File name inside the per-user configuration directory
pub const CONFIG_FILE_NAME: &str = "config.toml";

const APP_DIR: &str = "whetherman";

/// Per-user configuration file, e.g. `~/.config/whetherman/config.toml`
#[must_use]
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR).join(CONFIG_FILE_NAME))
}

impl AppConfig {
    /// Load configuration from the file and the process environment
    ///
    /// With `explicit`, that file must exist. Otherwise the per-user file is
    /// read when present.
    ///
    /// # Errors
    ///
    /// Returns an error if a source cannot be read or the result is invalid.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        match explicit {
            Some(path) => {
                if !path.is_file() {
                    return Err(ConfigError::NotFound(path.to_path_buf()));
                }
                Self::from_sources(Some(path), true, None)
            },
            None => Self::from_sources(default_config_path().as_deref(), false, None),
        }
    }

    /// Merge the layers; `env` replaces the process environment when given
    fn from_sources(
        file: Option<&Path>,
        required: bool,
        env: Option<Map<String, String>>,
    ) -> Result<Self, ConfigError> {
        let mut builder = Config::builder();

        if let Some(path) = file {
            debug!(path = %path.display(), required, "Reading configuration file");
            builder = builder.add_source(
                File::from(path)
                    .format(FileFormat::Toml)
                    .required(required),
            );
        }

        // e.g. WHETHERMAN_UNITS, WHETHERMAN_WEATHER__TIMEOUT_SECS
        let config = builder
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true)
                    .source(env),
            )
            .build()?;

        let app_config: Self = config.try_deserialize()?;
        app_config.validate()?;
        Ok(app_config)
    }
}
