//! Command-line arguments

use std::path::PathBuf;

use application::{MAX_FORECAST_DAYS, OutputFormat};
use clap::{Parser, Subcommand, ValueEnum};
use domain::UnitSystem;

/// whetherman - weather forecasts in the terminal
#[derive(Debug, Clone, Parser)]
#[command(name = "whetherman")]
#[command(author, version, about = "CLI Weather Forecast", long_about = None)]
pub struct Cli {
    /// Configuration file (default: the per-user config.toml)
    #[arg(short, long, global = true, value_name = "PATH", env = "WHETHERMAN_CONFIG")]
    pub config: Option<PathBuf>,

    /// Unit system for temperatures, wind and precipitation
    #[arg(short, long, global = true, value_enum)]
    pub units: Option<UnitsArg>,

    /// Output format
    #[arg(short, long, global = true, value_enum)]
    pub format: Option<FormatArg>,

    /// Plain text without emoji
    #[arg(long, global = true)]
    pub no_emoji: bool,

    /// Verbosity level
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Location for the default forecast when no command is given
    #[arg(value_name = "LOCATION")]
    pub location: Vec<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    /// The command to run; a bare invocation is a forecast for `location`
    #[must_use]
    pub fn effective_command(&self) -> Commands {
        self.command.clone().unwrap_or_else(|| Commands::Forecast {
            location: self.location.clone(),
            days: None,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Commands {
    /// Current conditions and a daily forecast (default)
    ///
    /// Example: whetherman forecast Paris, FR --days 3
    /// Example: whetherman forecast -- -33.92,18.42
    Forecast {
        /// Place name, optionally qualified ("Paris, US"), or "lat,lon"
        location: Vec<String>,

        /// Number of days (default: weather.forecast_days from the configuration)
        #[arg(short, long, value_parser = clap::value_parser!(u8).range(1..=i64::from(MAX_FORECAST_DAYS)))]
        days: Option<u8>,
    },

    /// Current conditions only
    Now {
        /// Place name, optionally qualified ("Paris, US"), or "lat,lon"
        location: Vec<String>,
    },

    /// List places matching a name
    Search {
        /// Place name
        #[arg(required = true)]
        name: Vec<String>,

        /// Maximum number of matches (default: geocoding.max_results)
        #[arg(short = 'n', long, value_parser = clap::value_parser!(u8).range(1..=100))]
        limit: Option<u8>,
    },

    /// Inspect or create the configuration file
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

impl Default for Commands {
    fn default() -> Self {
        Self::Forecast {
            location: Vec::new(),
            days: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Subcommand)]
pub enum ConfigCommands {
    /// Print the effective configuration as TOML
    Show,

    /// Print the configuration file location
    Path,

    /// Write a default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

/// Unit system choices
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum UnitsArg {
    /// °C, km/h, mm
    Metric,
    /// °F, mph, inch
    Imperial,
}

impl From<UnitsArg> for UnitSystem {
    fn from(arg: UnitsArg) -> Self {
        match arg {
            UnitsArg::Metric => Self::Metric,
            UnitsArg::Imperial => Self::Imperial,
        }
    }
}

/// Output format choices
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    /// Human readable text
    Text,
    /// Pretty-printed JSON
    Json,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Text => Self::Text,
            FormatArg::Json => Self::Json,
        }
    }
}

/// Join positional words into a single location query
#[must_use]
pub fn join_words(words: &[String]) -> Option<String> {
    let joined = words.join(" ");
    let trimmed = joined.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
