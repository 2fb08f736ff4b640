//! Integration tests for CLI
//!
//! These tests verify command-line parsing without contacting any service.

#![allow(clippy::panic)] // Allow panic! in tests for clear failure messages

use std::{ffi::OsString, path::PathBuf};

use clap::{CommandFactory, Parser};
use presentation_cli::{Cli, Commands, ConfigCommands, FormatArg, UnitsArg};

fn parse_args(args: &[&str]) -> Result<Cli, clap::Error> {
    let os_args: Vec<OsString> = args.iter().map(OsString::from).collect();
    Cli::try_parse_from(os_args)
}

#[test]
fn cli_definition_is_consistent() {
    Cli::command().debug_assert();
}

#[test]
fn cli_version_flag_reports_package_version() {
    let err = parse_args(&["whetherman", "--version"]).unwrap_err();
    assert_eq!(err.kind(), clap::error::ErrorKind::DisplayVersion);
    assert_eq!(err.to_string().trim(), "whetherman 0.1.1");
}

#[test]
fn cli_without_command_runs_default_forecast() {
    let cli = parse_args(&["whetherman"]).unwrap();
    assert!(cli.command.is_none());
    assert_eq!(cli.effective_command(), Commands::default());
}

#[test]
fn cli_bare_location_is_a_forecast() {
    let cli = parse_args(&["whetherman", "Paris,", "US"]).unwrap();
    assert!(cli.command.is_none());
    assert_eq!(
        cli.effective_command(),
        Commands::Forecast {
            location: vec!["Paris,".to_string(), "US".to_string()],
            days: None
        }
    );
}

#[test]
fn cli_parses_forecast_with_words_and_days() {
    let cli = parse_args(&["whetherman", "forecast", "Paris,", "US", "--days", "3"]).unwrap();
    if let Some(Commands::Forecast { location, days }) = cli.command {
        assert_eq!(location, vec!["Paris,", "US"]);
        assert_eq!(days, Some(3));
    } else {
        panic!("Expected Forecast command");
    }
}

#[test]
fn cli_forecast_days_out_of_range_is_usage_error() {
    for days in ["0", "17", "abc"] {
        let err = parse_args(&["whetherman", "forecast", "Berlin", "-d", days]).unwrap_err();
        assert_eq!(err.exit_code(), 2, "days={days}");
    }
}

#[test]
fn cli_negative_coordinates_after_separator() {
    let cli = parse_args(&["whetherman", "forecast", "--", "-33.92,18.42"]).unwrap();
    if let Some(Commands::Forecast { location, .. }) = cli.command {
        assert_eq!(location, vec!["-33.92,18.42"]);
    } else {
        panic!("Expected Forecast command");
    }
}

#[test]
fn cli_parses_now_command() {
    let cli = parse_args(&["whetherman", "now", "New", "York"]).unwrap();
    if let Some(Commands::Now { location }) = cli.command {
        assert_eq!(location.join(" "), "New York");
    } else {
        panic!("Expected Now command");
    }
}

#[test]
fn cli_parses_search_with_limit() {
    let cli = parse_args(&["whetherman", "search", "Springfield", "-n", "5"]).unwrap();
    if let Some(Commands::Search { name, limit }) = cli.command {
        assert_eq!(name, vec!["Springfield"]);
        assert_eq!(limit, Some(5));
    } else {
        panic!("Expected Search command");
    }
}

#[test]
fn cli_search_requires_name() {
    assert!(parse_args(&["whetherman", "search"]).is_err());
}

#[test]
fn cli_parses_config_subcommands() {
    let cli = parse_args(&["whetherman", "config", "show"]).unwrap();
    assert_eq!(
        cli.command,
        Some(Commands::Config {
            command: ConfigCommands::Show
        })
    );

    let cli = parse_args(&["whetherman", "config", "init", "--force"]).unwrap();
    assert_eq!(
        cli.command,
        Some(Commands::Config {
            command: ConfigCommands::Init { force: true }
        })
    );
}

#[test]
fn cli_config_requires_subcommand() {
    assert!(parse_args(&["whetherman", "config"]).is_err());
}

#[test]
fn cli_global_options_after_subcommand() {
    let cli = parse_args(&[
        "whetherman",
        "now",
        "Berlin",
        "-u",
        "imperial",
        "-f",
        "json",
        "--no-emoji",
        "-c",
        "/tmp/whetherman.toml",
    ])
    .unwrap();

    assert_eq!(cli.units, Some(UnitsArg::Imperial));
    assert_eq!(cli.format, Some(FormatArg::Json));
    assert!(cli.no_emoji);
    assert_eq!(cli.config, Some(PathBuf::from("/tmp/whetherman.toml")));
}

#[test]
fn cli_rejects_unknown_units() {
    let err = parse_args(&["whetherman", "--units", "kelvin"]).unwrap_err();
    assert_eq!(err.exit_code(), 2);
}

#[test]
fn cli_parses_verbose_flag() {
    let cli = parse_args(&["whetherman", "-v", "now"]).unwrap();
    assert_eq!(cli.verbose, 1);
}

#[test]
fn cli_parses_multiple_verbose_flags() {
    let cli = parse_args(&["whetherman", "-vvv"]).unwrap();
    assert_eq!(cli.verbose, 3);
}
