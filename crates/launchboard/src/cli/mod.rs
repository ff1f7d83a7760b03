//! Command-line interface for launchboard.
//!
//! This module provides the CLI structure for the `launchboard` binary.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use commands::{ChartCommand, ConfigCommand, ServeCommand, SummaryCommand};

use crate::config::Config;
use crate::error::Result;
use crate::logging::Verbosity;

/// launchboard - Interactive launch records dashboard
///
/// Loads a CSV of launch records and serves a page with a site selector, a
/// payload range selector, a success proportion chart and a payload vs.
/// outcome scatter chart.
#[derive(Debug, Parser)]
#[command(name = "launchboard")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to custom configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Path to the launch records CSV (overrides `dataset.path`)
    #[arg(short, long, global = true, value_name = "FILE")]
    pub data: Option<PathBuf>,

    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// The command to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Serve the dashboard over HTTP
    Serve(ServeCommand),

    /// Print dataset statistics
    Summary(SummaryCommand),

    /// Print a chart's figure JSON
    #[command(subcommand)]
    Chart(ChartCommand),

    /// View or validate configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

impl Cli {
    /// Get the verbosity level based on flags.
    #[must_use]
    pub fn verbosity(&self) -> Verbosity {
        if self.quiet {
            Verbosity::Quiet
        } else {
            match self.verbose {
                0 => Verbosity::Normal,
                1 => Verbosity::Verbose,
                _ => Verbosity::Trace,
            }
        }
    }

    /// Apply command-line overrides on top of the loaded configuration.
    pub fn apply_overrides(&self, config: &mut Config) {
        if let Some(data) = &self.data {
            config.dataset.path.clone_from(data);
        }
        if let Command::Serve(serve) = &self.command {
            if let Some(host) = &serve.host {
                config.server.host.clone_from(host);
            }
            if let Some(port) = serve.port {
                config.server.port = port;
            }
        }
    }

    /// Load the configuration, apply command-line overrides and validate
    /// the result.
    ///
    /// # Errors
    ///
    /// Returns an error if loading fails or the overridden configuration is
    /// invalid.
    pub fn resolve_config(&self) -> Result<Config> {
        let mut config = Config::load_from(self.config.clone())?;
        self.apply_overrides(&mut config);
        config.validate()?;
        Ok(config)
    }

    /// Whether the command needs the global configuration at all.
    ///
    /// `config validate` checks a file of its own and must not fail on a
    /// broken global configuration.
    #[must_use]
    pub fn needs_config(&self) -> bool {
        !matches!(
            self.command,
            Command::Config(ConfigCommand::Validate { .. })
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::SiteSelection;
    use clap::CommandFactory;

    fn cli_with(verbose: u8, quiet: bool) -> Cli {
        Cli {
            config: None,
            data: None,
            verbose,
            quiet,
            command: Command::Summary(SummaryCommand { json: false }),
        }
    }

    #[test]
    fn test_cli_name() {
        let cli = Cli::command();
        assert_eq!(cli.get_name(), "launchboard");
    }

    #[test]
    fn test_verbosity_flags() {
        assert_eq!(cli_with(0, true).verbosity(), Verbosity::Quiet);
        assert_eq!(cli_with(0, false).verbosity(), Verbosity::Normal);
        assert_eq!(cli_with(1, false).verbosity(), Verbosity::Verbose);
        assert_eq!(cli_with(2, false).verbosity(), Verbosity::Trace);
    }

    #[test]
    fn test_cli_verify() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_serve() {
        let cli = Cli::try_parse_from(["launchboard", "serve", "--port", "9000"]).unwrap();
        match cli.command {
            Command::Serve(serve) => {
                assert_eq!(serve.port, Some(9000));
                assert!(serve.host.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_summary_json() {
        let cli = Cli::try_parse_from(["launchboard", "summary", "--json"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::Summary(SummaryCommand { json: true })
        ));
    }

    #[test]
    fn test_parse_chart_pie_default_site() {
        let cli = Cli::try_parse_from(["launchboard", "chart", "pie"]).unwrap();
        match cli.command {
            Command::Chart(chart) => assert_eq!(chart.site(), &SiteSelection::All),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_chart_scatter() {
        let args = [
            "launchboard",
            "chart",
            "scatter",
            "--site",
            "KSC LC-39A",
            "--low",
            "1000",
            "--high",
            "5000",
        ];
        let cli = Cli::try_parse_from(args).unwrap();
        match cli.command {
            Command::Chart(ChartCommand::Scatter { site, low, high }) => {
                assert_eq!(site, SiteSelection::site("KSC LC-39A"));
                assert_eq!(low, Some(1000.0));
                assert_eq!(high, Some(5000.0));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_global_data_after_subcommand() {
        let cli = Cli::try_parse_from(["launchboard", "summary", "-d", "/tmp/launches.csv"]).unwrap();
        assert_eq!(cli.data, Some(PathBuf::from("/tmp/launches.csv")));
    }

    #[test]
    fn test_parse_with_config() {
        let cli =
            Cli::try_parse_from(["launchboard", "-c", "/custom/config.toml", "config", "path"])
                .unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/custom/config.toml")));
        assert!(matches!(cli.command, Command::Config(ConfigCommand::Path)));
    }

    #[test]
    fn test_apply_overrides() {
        let cli = Cli::try_parse_from([
            "launchboard",
            "--data",
            "other.csv",
            "serve",
            "--host",
            "127.0.0.1",
            "-p",
            "9001",
        ])
        .unwrap();
        let mut config = Config::default();
        cli.apply_overrides(&mut config);

        assert_eq!(config.dataset.path, PathBuf::from("other.csv"));
        assert_eq!(config.bind_address(), "127.0.0.1:9001");
    }

    #[test]
    fn test_apply_overrides_without_flags_keeps_config() {
        let cli = cli_with(0, false);
        let mut config = Config::default();
        cli.apply_overrides(&mut config);
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_resolve_config_rejects_zero_port_override() {
        let cli = Cli::try_parse_from([
            "launchboard",
            "-c",
            "/nonexistent/config.toml",
            "serve",
            "--port",
            "0",
        ])
        .unwrap();

        let err = cli.resolve_config().unwrap_err();
        assert!(matches!(err, crate::Error::ConfigValidation { .. }));
        assert!(err.to_string().contains("server.port"));
    }

    #[test]
    fn test_resolve_config_rejects_empty_host_override() {
        let cli = Cli::try_parse_from([
            "launchboard",
            "-c",
            "/nonexistent/config.toml",
            "serve",
            "--host",
            "",
        ])
        .unwrap();

        let err = cli.resolve_config().unwrap_err();
        assert!(err.to_string().contains("server.host"));
    }

    #[test]
    fn test_resolve_config_applies_valid_overrides() {
        let cli = Cli::try_parse_from([
            "launchboard",
            "-c",
            "/nonexistent/config.toml",
            "serve",
            "--port",
            "9002",
        ])
        .unwrap();

        let config = cli.resolve_config().unwrap();
        assert_eq!(config.server.port, 9002);
    }

    #[test]
    fn test_config_validate_skips_global_config() {
        let cli = Cli::try_parse_from(["launchboard", "config", "validate", "good.toml"]).unwrap();
        assert!(!cli.needs_config());

        let cli = Cli::try_parse_from(["launchboard", "config", "show"]).unwrap();
        assert!(cli.needs_config());
        assert!(cli_with(0, false).needs_config());
    }
}
