pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::LocalStorage;
pub use config::CodeplugFile;
pub use core::{aprs_to_row, channel_to_row, CodeplugExporter, OutputFormat, Row};
pub use domain::{Channel, Codeplug};
pub use utils::error::{CodeplugError, Result, ValidationError};
