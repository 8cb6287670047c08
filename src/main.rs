use anyhow::Result;
use clap::Parser;
use housiey_scout::scrapers::types::{DEFAULT_LOCATION, DEFAULT_MAX_PRICE, DEFAULT_MIN_PRICE};
use housiey_scout::scrapers::{
    self, BrowserPageSource, FilePageSource, HousieyAdapter, PageSource, SearchParams,
};
use housiey_scout::{ProjectRepository, ScoutConfig};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info};

#[derive(Parser, Debug)]
#[command(name = "housiey-scraper")]
#[command(about = "Scrape project details from housiey.com", long_about = None)]
struct Args {
    /// Location to scrape projects for
    #[arg(long, default_value = DEFAULT_LOCATION)]
    location: String,

    /// Minimum price filter (INR)
    #[arg(long, alias = "min_price", default_value_t = DEFAULT_MIN_PRICE)]
    min_price: u64,

    /// Maximum price filter (INR)
    #[arg(long, alias = "max_price", default_value_t = DEFAULT_MAX_PRICE)]
    max_price: u64,

    /// Configuration filter forwarded to the portal, e.g. "156,147,113-152,115"
    #[arg(long, default_value = "", allow_hyphen_values = true)]
    config: String,

    /// Directory for projects_data_<location>.json (overrides HOUSIEY_DATA_DIR)
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Extract from a saved page instead of launching a browser
    #[arg(long)]
    from_html: Option<PathBuf>,

    /// Save the rendered page markup to this file
    #[arg(long)]
    dump_html: Option<PathBuf>,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let mut config = match ScoutConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            return ExitCode::FAILURE;
        }
    };
    if let Some(dir) = args.data_dir.clone() {
        config.data_dir = dir;
    }
    config.init_tracing();

    match run(&args, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args, config: &ScoutConfig) -> Result<()> {
    let params = SearchParams::new(&args.location, args.min_price, args.max_price, &args.config);
    anyhow::ensure!(!params.location.is_empty(), "Location '{}' is empty after sanitizing", args.location);

    info!("🏠 Housiey Scout - {}", params.location);
    let url = params.url(&config.base_url);

    let adapter = HousieyAdapter::new()?;

    // The browser is torn down when `source` drops, on every path
    let projects = {
        let source: Box<dyn PageSource> = match &args.from_html {
            Some(path) => Box::new(FilePageSource::new(path)),
            None => Box::new(BrowserPageSource::new(config)?),
        };
        scrapers::scrape(source.as_ref(), &adapter, &url, args.dump_html.as_deref())?
    };
    if args.from_html.is_none() {
        info!("Browser closed.");
    }

    for (i, project) in projects.iter().enumerate() {
        println!("{}. {}", i + 1, project.project_name);
        println!("   Builder: {}", project.builder_name);
        println!("   Possession: {}", project.possession_date);
        for config in &project.configurations {
            println!("   - {}: {} @ {}", config.bhk, config.size, config.price);
        }
        println!();
    }

    let mut repository = ProjectRepository::new(&config.data_dir);
    let path = repository.save(&params.location, &projects)?;
    info!("💾 Project data saved to {}", path.display());

    Ok(())
}
