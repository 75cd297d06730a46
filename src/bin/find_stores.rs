use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use store_finder::domain::model::{Origin, SearchQuery};
use store_finder::domain::ports::MapViewer;
use store_finder::render::render_listing;
use store_finder::utils::validation::{parse_drive_thru, Validate};
use store_finder::utils::logger;
use store_finder::{
    Dataset, FinderConfig, FinderError, LocalStorage, NoBrowser, StoreFinder, SystemBrowser,
};

#[derive(Parser)]
#[command(name = "find-stores")]
#[command(about = "Run a single store search without the interactive menu")]
struct Cli {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "store-finder.toml")]
    config: String,

    /// Override the dataset path from config
    #[arg(long)]
    dataset: Option<String>,

    /// Print the listing only, do not write a map
    #[arg(long)]
    no_map: bool,

    /// Emit JSON log lines
    #[arg(long)]
    json_logs: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Stores in a city
    City { city: String, state: String },
    /// Stores within a radius of a city
    NearCity {
        city: String,
        state: String,
        #[command(flatten)]
        radius: RadiusArgs,
    },
    /// Stores within a radius of a zip code
    NearZip {
        zip: String,
        #[command(flatten)]
        radius: RadiusArgs,
    },
}

#[derive(Args)]
struct RadiusArgs {
    /// Search radius in miles
    #[arg(short, long, allow_hyphen_values = true)]
    radius: i64,

    /// y = drive-through only, n = without drive-through, omit for both
    #[arg(long, default_value = "")]
    drive_thru: String,
}

impl Command {
    fn query(self) -> anyhow::Result<SearchQuery> {
        Ok(match self {
            Command::City { city, state } => SearchQuery::CityState { city, state },
            Command::NearCity {
                city,
                state,
                radius,
            } => SearchQuery::Radius {
                origin: Origin::CityState { city, state },
                radius_miles: radius.radius,
                drive_thru: parse_drive_thru(&radius.drive_thru)?,
            },
            Command::NearZip { zip, radius } => SearchQuery::Radius {
                origin: Origin::Zip(zip),
                radius_miles: radius.radius,
                drive_thru: parse_drive_thru(&radius.drive_thru)?,
            },
        })
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.json_logs {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(false);
    }

    let mut config = FinderConfig::load_or_default(&cli.config)
        .with_context(|| format!("Failed to load config file '{}'", cli.config))?;
    if let Some(dataset) = &cli.dataset {
        config.dataset.path = dataset.clone();
    }
    config.validate().context("Invalid configuration")?;

    let dataset = Dataset::from_path(&config.dataset.path)?;
    let zips = config.build_zip_directory()?;
    let viewer: Box<dyn MapViewer> = if config.map.open_browser {
        Box::new(SystemBrowser)
    } else {
        Box::new(NoBrowser)
    };
    let finder = StoreFinder::new(
        dataset,
        zips,
        LocalStorage::current_dir()?,
        viewer,
        config.finder_settings(),
    );

    let query = cli.command.query()?;
    let result = match finder.search(&query).await {
        Ok(result) => result,
        Err(e @ FinderError::NoStoresFound) | Err(e @ FinderError::Geocode { .. }) => {
            eprintln!("{}", e.user_friendly_message());
            std::process::exit(e.exit_code());
        }
        Err(e) => return Err(e.into()),
    };

    let mut stdout = std::io::stdout();
    if cli.no_map {
        print!("{}", render_listing(&result));
    } else {
        finder.present(&result, &mut stdout).await?;
    }

    Ok(())
}
