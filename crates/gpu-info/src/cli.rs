use anyhow::{Context, Result};
use clap::{Arg, ArgMatches, Command};
use std::ffi::OsString;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::report::OutputFormat;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub format: OutputFormat,
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            format: OutputFormat::Text,
            log_level: "warn".to_string(),
        }
    }
}

pub fn build_command() -> Command {
    Command::new("gpu-info")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Print CUDA device diagnostics for this machine")
        .arg(
            Arg::new("format")
                .long("format")
                .help("Output format")
                .value_name("FORMAT")
                .value_parser(["text", "json"])
                .default_value("text"),
        )
        .arg(
            Arg::new("debug")
                .long("debug")
                .help("Enable debug logging on stderr")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("log-level")
                .long("log-level")
                .help("Logging level (logs go to stderr)")
                .value_name("LEVEL")
                .value_parser(["error", "warn", "info", "debug", "trace"])
                .default_value("warn"),
        )
}

pub fn parse_args() -> Result<Config> {
    config_from_matches(&build_command().get_matches())
}

/// Parse an explicit argument list; the first item is the program name
pub fn parse_args_from<I, T>(args: I) -> Result<Config>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let matches = build_command()
        .try_get_matches_from(args)
        .context("Invalid command line arguments")?;
    config_from_matches(&matches)
}

fn config_from_matches(matches: &ArgMatches) -> Result<Config> {
    let mut config = Config::default();

    if let Some(format) = matches.get_one::<String>("format") {
        config.format = format
            .parse()
            .map_err(|e: String| anyhow::anyhow!(e))?;
    }

    if matches.get_flag("debug") {
        config.log_level = "debug".to_string();
    } else if let Some(log_level) = matches.get_one::<String>("log-level") {
        config.log_level = log_level.clone();
    }

    Ok(config)
}

pub fn setup_logging(level: &str) -> Result<()> {
    let level_filter = match level {
        "error" => tracing::Level::ERROR,
        "warn" => tracing::Level::WARN,
        "info" => tracing::Level::INFO,
        "debug" => tracing::Level::DEBUG,
        "trace" => tracing::Level::TRACE,
        _ => return Err(anyhow::anyhow!("Invalid log level: {}", level)),
    };

    // stdout carries the report; logs stay on stderr
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_level(true)
                .with_target(false)
                .with_ansi(false),
        )
        .with(tracing_subscriber::filter::LevelFilter::from_level(
            level_filter,
        ))
        .try_init()
        .context("Failed to initialize logging")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_arguments_gives_defaults() {
        let config = parse_args_from(["gpu-info"]).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.format, OutputFormat::Text);
        assert_eq!(config.log_level, "warn");
    }

    #[test]
    fn test_json_format() {
        let config = parse_args_from(["gpu-info", "--format", "json"]).unwrap();
        assert_eq!(config.format, OutputFormat::Json);
    }

    #[test]
    fn test_debug_overrides_log_level() {
        let config =
            parse_args_from(["gpu-info", "--log-level", "error", "--debug"]).unwrap();
        assert_eq!(config.log_level, "debug");

        let config = parse_args_from(["gpu-info", "--log-level", "trace"]).unwrap();
        assert_eq!(config.log_level, "trace");
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert!(parse_args_from(["gpu-info", "--format", "yaml"]).is_err());
        assert!(parse_args_from(["gpu-info", "--log-level", "loud"]).is_err());
        assert!(parse_args_from(["gpu-info", "positional"]).is_err());
    }

    #[test]
    fn test_setup_logging_rejects_unknown_level() {
        assert!(setup_logging("verbose").is_err());
    }

    #[test]
    fn test_command_is_well_formed() {
        build_command().debug_assert();
    }
}
