pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod render;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::{HttpZipDirectory, NoBrowser, SystemBrowser, TableZipDirectory};
pub use app::Shell;
pub use config::{cli::LocalStorage, toml_config::FinderConfig};
pub use crate::core::{
    dataset::Dataset,
    finder::{FinderSettings, StoreFinder},
    search::SearchEngine,
};
pub use utils::error::{FinderError, Result};
