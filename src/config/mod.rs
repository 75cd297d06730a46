pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use serde::{Deserialize, Serialize};
#[cfg(feature = "cli")]
use toml_config::{FinderConfig, DEFAULT_CONFIG_FILE};

/// Command-line flags. Anything given here overrides the TOML file.
#[cfg(feature = "cli")]
#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "store-finder")]
#[command(about = "Find stores by city, state, or distance")]
pub struct CliConfig {
    #[arg(short, long, default_value = DEFAULT_CONFIG_FILE, help = "Path to TOML configuration file")]
    pub config: String,

    #[arg(long, help = "Store dataset CSV")]
    pub dataset: Option<String>,

    #[arg(long, help = "Base URL of the zip directory service")]
    pub zip_directory_url: Option<String>,

    #[arg(long, help = "Zip reference CSV (zipcode,lat,lng,major_city,state)")]
    pub zip_reference: Option<String>,

    #[arg(long, help = "Where to write the rendered map")]
    pub map_output: Option<String>,

    #[arg(long, help = "Initial map zoom level")]
    pub zoom: Option<u8>,

    #[arg(long, help = "Write the map without opening a browser")]
    pub no_browser: bool,

    #[arg(long, help = "Print search diagnostics")]
    pub debug: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

#[cfg(feature = "cli")]
impl CliConfig {
    /// Loads the TOML file (or defaults) and applies the CLI overrides.
    pub fn load(&self) -> crate::Result<FinderConfig> {
        let mut config = FinderConfig::load_or_default(&self.config)?;
        self.apply_to(&mut config);
        Ok(config)
    }

    pub fn apply_to(&self, config: &mut FinderConfig) {
        if let Some(dataset) = &self.dataset {
            config.dataset.path = dataset.clone();
        }
        // A source given on the command line replaces whichever one the file set.
        if let Some(url) = &self.zip_directory_url {
            config.zip_directory.endpoint = Some(url.clone());
            config.zip_directory.reference_file = None;
        }
        if let Some(reference) = &self.zip_reference {
            config.zip_directory.reference_file = Some(reference.clone());
            config.zip_directory.endpoint = None;
        }
        if let Some(output) = &self.map_output {
            config.map.output_file = output.clone();
        }
        if let Some(zoom) = self.zoom {
            config.map.zoom_start = zoom;
        }
        if self.no_browser {
            config.map.open_browser = false;
        }
        if self.debug {
            config.debug = true;
        }
    }
}
