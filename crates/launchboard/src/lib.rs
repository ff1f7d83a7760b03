//! `launchboard` - An interactive dashboard over a launch records dataset
//!
//! The dataset is loaded once into an immutable [`Dataset`]. Two pure
//! transformations, [`aggregate::proportion`] and [`aggregate::scatter`],
//! turn the current control values into chart data, which [`figure`] renders
//! as figure JSON and [`server`] serves over HTTP.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod aggregate;
pub mod cli;
pub mod config;
pub mod dataset;
pub mod error;
pub mod figure;
pub mod logging;
pub mod record;
pub mod server;
pub mod view;

pub use aggregate::{proportion, scatter, ProportionAggregate, ScatterAggregate};
pub use config::Config;
pub use dataset::{Dataset, DatasetSummary};
pub use error::{Error, Result};
pub use figure::Figure;
pub use logging::init_logging;
pub use record::{LaunchRecord, Outcome, PayloadRange, SiteSelection};
pub use view::DashboardLayout;
