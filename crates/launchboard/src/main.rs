//! `launchboard` - CLI for the launch records dashboard
//!
//! Serves the dashboard, or prints dataset statistics and chart figures
//! without starting a server.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::Parser;
use tracing::warn;

use launchboard::cli::{ChartCommand, Cli, Command, ConfigCommand};
use launchboard::{init_logging, proportion, scatter, server, Config, Dataset, Figure};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbosity());

    if !cli.needs_config() {
        if let Command::Config(ConfigCommand::Validate { file }) = cli.command {
            return validate_config_file(file.or(cli.config));
        }
    }

    let config = cli.resolve_config().context("loading configuration")?;

    match cli.command {
        Command::Serve(_) => {
            let dataset = load_dataset(&config)?;
            server::serve(&config, dataset).await?;
        }
        Command::Summary(summary_cmd) => {
            let dataset = load_dataset(&config)?;
            handle_summary(&dataset, summary_cmd.json)?;
        }
        Command::Chart(chart_cmd) => {
            let dataset = load_dataset(&config)?;
            handle_chart(&dataset, &chart_cmd)?;
        }
        Command::Config(config_cmd) => handle_config(&config, config_cmd)?,
    }
    Ok(())
}

fn load_dataset(config: &Config) -> anyhow::Result<Dataset> {
    Dataset::load(&config.dataset.path).context("the dashboard cannot start without its dataset")
}

fn handle_summary(dataset: &Dataset, json: bool) -> anyhow::Result<()> {
    let summary = dataset.summary();
    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    println!("Dataset:        {}", dataset.origin().display());
    println!("Records:        {}", summary.records);
    println!("Successes:      {}", summary.successes);
    println!(
        "Payload range:  {} - {} kg",
        summary.payload_min, summary.payload_max
    );
    println!();
    println!("{:<20} {:>8} {:>10} {:>8}", "Site", "Launches", "Successes", "Rate");
    for site in &summary.sites {
        println!(
            "{:<20} {:>8} {:>10} {:>7.1}%",
            site.site,
            site.launches,
            site.successes,
            site.success_rate * 100.0
        );
    }
    Ok(())
}

fn handle_chart(dataset: &Dataset, cmd: &ChartCommand) -> anyhow::Result<()> {
    if let Some(site) = cmd.site().site_name() {
        if !dataset.has_site(site) {
            warn!(site, "site not present in dataset, chart will be empty");
        }
    }
    let figure = match cmd.range(dataset.payload_bounds()) {
        None => Figure::from(&proportion(dataset, cmd.site())),
        Some(range) => Figure::from(&scatter(dataset, cmd.site(), range)),
    };
    println!("{}", serde_json::to_string_pretty(&figure)?);
    Ok(())
}

fn handle_config(config: &Config, cmd: ConfigCommand) -> anyhow::Result<()> {
    match cmd {
        ConfigCommand::Show { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(config)?);
            } else {
                println!("Current Configuration");
                println!("=====================");
                println!();
                println!("[Server]");
                println!("  Address:        {}", config.bind_address());
                match &config.server.plotly_js {
                    Some(path) => println!("  Plotly.js:      {}", path.display()),
                    None => println!("  Plotly.js:      {}", server::PLOTLY_CDN_URL),
                }
                println!();
                println!("[Dataset]");
                println!("  Path:           {}", config.dataset.path.display());
                println!();
                println!("[Controls]");
                println!(
                    "  Slider:         {} - {} kg, step {}",
                    config.controls.slider_min,
                    config.controls.slider_max,
                    config.controls.slider_step
                );
                println!("  Mark step:      {}", config.controls.mark_step);
            }
        }
        ConfigCommand::Path => {
            println!("{}", Config::default_config_path().display());
        }
        ConfigCommand::Validate { file } => validate_config_file(file)?,
    }
    Ok(())
}

fn validate_config_file(file: Option<PathBuf>) -> anyhow::Result<()> {
    let path = file.unwrap_or_else(Config::default_config_path);
    println!("Validating configuration: {}", path.display());
    if let Err(e) = Config::load_from(Some(path.clone())) {
        bail!("configuration {} is invalid: {e}", path.display());
    }
    println!("Configuration is valid.");
    Ok(())
}
