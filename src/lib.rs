pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::cli::CliArgs;

pub use crate::config::AlertConfig;
pub use crate::core::{
    batch_runner::{BatchReport, BatchRunner},
    notification::{DispatchReport, NotificationSink},
    satellite_query::{QueryOutcome, SatelliteQuery},
};
pub use crate::utils::error::{AlertError, Result};
