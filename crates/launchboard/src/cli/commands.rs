//! CLI command definitions.
//!
//! This module defines the structure of all CLI subcommands.

use std::path::PathBuf;

use clap::{Args, Subcommand};

use crate::record::{PayloadRange, SiteSelection};

/// Serve command arguments.
#[derive(Debug, Args)]
pub struct ServeCommand {
    /// Interface to listen on (overrides `server.host`)
    #[arg(long)]
    pub host: Option<String>,

    /// Port to listen on (overrides `server.port`)
    #[arg(short, long)]
    pub port: Option<u16>,
}

/// Summary command arguments.
#[derive(Debug, Args)]
pub struct SummaryCommand {
    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Chart commands. Each prints the figure JSON the server would return.
#[derive(Debug, Subcommand)]
pub enum ChartCommand {
    /// Success proportion chart
    Pie {
        /// Launch site, or ALL for every site
        #[arg(short, long, default_value = "ALL")]
        site: SiteSelection,
    },

    /// Payload vs. outcome scatter chart
    Scatter {
        /// Launch site, or ALL for every site
        #[arg(short, long, default_value = "ALL")]
        site: SiteSelection,

        /// Lower payload bound in kg (defaults to the dataset minimum)
        #[arg(long, allow_negative_numbers = true)]
        low: Option<f64>,

        /// Upper payload bound in kg (defaults to the dataset maximum)
        #[arg(long, allow_negative_numbers = true)]
        high: Option<f64>,
    },
}

impl ChartCommand {
    /// The site selection of either chart.
    #[must_use]
    pub fn site(&self) -> &SiteSelection {
        match self {
            Self::Pie { site } | Self::Scatter { site, .. } => site,
        }
    }

    /// Resolve the scatter interval against the dataset bounds.
    ///
    /// Returns `None` for the pie chart, which has no interval.
    #[must_use]
    pub fn range(&self, bounds: PayloadRange) -> Option<PayloadRange> {
        match self {
            Self::Pie { .. } => None,
            Self::Scatter { low, high, .. } => Some(PayloadRange::new(
                low.unwrap_or(bounds.low),
                high.unwrap_or(bounds.high),
            )),
        }
    }
}

/// Configuration commands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show configuration file path
    Path,

    /// Validate configuration file
    Validate {
        /// Path to config file to validate
        file: Option<PathBuf>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chart_command_site() {
        let cmd = ChartCommand::Pie {
            site: SiteSelection::site("KSC LC-39A"),
        };
        assert_eq!(cmd.site().site_name(), Some("KSC LC-39A"));
    }

    #[test]
    fn test_pie_has_no_range() {
        let cmd = ChartCommand::Pie {
            site: SiteSelection::All,
        };
        assert!(cmd.range(PayloadRange::new(0.0, 1.0)).is_none());
    }

    #[test]
    fn test_scatter_range_fills_missing_bounds() {
        let bounds = PayloadRange::new(0.0, 9600.0);
        let cmd = ChartCommand::Scatter {
            site: SiteSelection::All,
            low: None,
            high: Some(5000.0),
        };
        assert_eq!(cmd.range(bounds), Some(PayloadRange::new(0.0, 5000.0)));
    }
}
