#[cfg(feature = "cli")]
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::{cli::LocalStorage, CliConfig};

pub use crate::core::{
    engine::ScrapeEngine, generator::SyntheticSource, pipeline::ScrapePipeline, source::HttpSource,
};
pub use utils::error::{Result, ScrapeError};
