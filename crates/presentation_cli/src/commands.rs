//! Command execution
//!
//! Every command returns the text destined for stdout; printing and exit
//! codes are left to `main`.

use std::{path::PathBuf, sync::Arc};

use anyhow::{Context, Result, bail};
use application::{
    ApplicationError, ForecastService, FormatOptions, OutputFormat, format_current,
    format_forecast, format_places,
};
use infrastructure::{
    AppConfig, ConfigError, GeocodingAdapter, WeatherAdapter, default_config_path,
};
use serde::Serialize;
use tracing::debug;

use crate::cli::{Cli, Commands, ConfigCommands, join_words};

/// Run a parsed command line
///
/// # Errors
///
/// Returns an error if configuration cannot be loaded, the location cannot
/// be resolved, or a weather service request fails.
pub async fn run(cli: Cli) -> Result<String> {
    let command = cli.effective_command();
    debug!(?command, "Running command");

    match command {
        Commands::Forecast { location, days } => {
            let session = Session::load(&cli)?;
            let days = days.unwrap_or(session.config.weather.forecast_days);
            let report = session
                .service()?
                .forecast(join_words(&location).as_deref(), days)
                .await?;
            session.render(&report, format_forecast)
        },
        Commands::Now { location } => {
            let session = Session::load(&cli)?;
            let report = session
                .service()?
                .current(join_words(&location).as_deref())
                .await?;
            session.render(&report, format_current)
        },
        Commands::Search { name, limit } => {
            let session = Session::load(&cli)?;
            let limit = limit.unwrap_or(session.config.geocoding.max_results);
            let name = join_words(&name).unwrap_or_default();
            let places = session.service()?.search(&name, limit).await?;
            session.render(places.as_slice(), format_places)
        },
        Commands::Config { command } => run_config(&cli, command),
    }
}

/// Follow-up line printed under a failed command's error message
///
/// Bad input points at usage; service faults point at request logging.
#[must_use]
pub fn error_hint(error: &anyhow::Error) -> Option<&'static str> {
    let error = error.downcast_ref::<ApplicationError>()?;
    if error.is_user_error() {
        Some("Run `whetherman search <NAME>` to list places, or `whetherman --help` for usage")
    } else {
        Some("Run again with -vv to log the weather service requests")
    }
}

fn run_config(cli: &Cli, command: ConfigCommands) -> Result<String> {
    match command {
        ConfigCommands::Show => {
            let session = Session::load(cli)?;
            Ok(session.config.to_toml()?)
        },
        ConfigCommands::Path => Ok(config_path(cli)?.display().to_string()),
        ConfigCommands::Init { force } => {
            let path = config_path(cli)?;
            match AppConfig::write_default(&path, force) {
                Ok(()) => Ok(format!("Wrote default configuration to {}", path.display())),
                Err(ConfigError::AlreadyExists(existing)) => bail!(
                    "{} already exists; pass --force to overwrite it",
                    existing.display()
                ),
                Err(e) => Err(e.into()),
            }
        },
    }
}

/// Explicit `--config` path, or the per-user default
fn config_path(cli: &Cli) -> Result<PathBuf, ConfigError> {
    cli.config
        .clone()
        .or_else(default_config_path)
        .ok_or(ConfigError::NoConfigDir)
}

/// Effective configuration with command-line overrides applied
struct Session {
    config: AppConfig,
}

impl Session {
    fn load(cli: &Cli) -> Result<Self> {
        let mut config =
            AppConfig::load(cli.config.as_deref()).context("Failed to load configuration")?;

        if let Some(units) = cli.units {
            config.units = units.into();
        }
        if let Some(format) = cli.format {
            config.output.format = format.into();
        }
        if cli.no_emoji {
            config.output.emoji = false;
        }

        Ok(Self { config })
    }

    fn service(&self) -> Result<ForecastService> {
        let weather = WeatherAdapter::with_config(self.config.weather.clone())?;
        let geocoding = GeocodingAdapter::with_config(self.config.geocoding.clone())?;

        Ok(ForecastService::new(Arc::new(weather), Arc::new(geocoding))
            .with_units(self.config.units)
            .with_default_location(self.config.default_location.clone())
            .with_candidate_limit(self.config.geocoding.max_results))
    }

    fn render<T>(&self, value: &T, text: fn(&T, FormatOptions) -> String) -> Result<String>
    where
        T: Serialize + ?Sized,
    {
        match self.config.output.format {
            OutputFormat::Text => Ok(text(value, self.config.output.format_options())),
            OutputFormat::Json => Ok(serde_json::to_string_pretty(value)?),
        }
    }
}
