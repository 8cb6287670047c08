use anyhow::{Context, Result};
use chrono::{Datelike, Local};
use clap::Parser;
use housiey_scout::filter::{bhk_types, ProjectFilter};
use housiey_scout::render;
use housiey_scout::runner::ScraperRunner;
use housiey_scout::scrapers::sanitize_location;
use housiey_scout::{ProjectRepository, ScoutConfig};
use std::io;
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "housiey-viewer")]
#[command(about = "Browse scraped housiey.com projects", long_about = None)]
struct Args {
    /// Location to show; defaults to the first available one
    #[arg(long)]
    location: Option<String>,

    /// Search project or builder name
    #[arg(long, default_value = "")]
    query: String,

    /// Minimum configuration price (INR)
    #[arg(long, default_value_t = 0)]
    min_price: u64,

    /// Maximum configuration price (INR)
    #[arg(long, default_value_t = 50_000_000)]
    max_price: u64,

    /// Accepted BHK labels, e.g. --bhk "2 BHK" --bhk "3 BHK"
    #[arg(long)]
    bhk: Vec<String>,

    /// First possession year (defaults to the current year)
    #[arg(long)]
    from_year: Option<i32>,

    /// Last possession year (defaults to five years from now)
    #[arg(long)]
    to_year: Option<i32>,

    /// Run the scraper for the location before showing it
    #[arg(long)]
    refresh: bool,

    /// Print the known locations and exit
    #[arg(long)]
    list_locations: bool,

    /// Directory holding projects_data_<location>.json (overrides HOUSIEY_DATA_DIR)
    #[arg(long)]
    data_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = ScoutConfig::from_env()?;
    if let Some(dir) = args.data_dir.clone() {
        config.data_dir = dir;
    }
    config.init_tracing();

    let mut repository = ProjectRepository::new(&config.data_dir);
    let mut stdout = io::stdout().lock();

    if args.list_locations {
        let locations = repository.available_locations()?;
        render::render_locations(&mut stdout, &locations, &repository.cached_locations())?;
        return Ok(());
    }

    let location = match &args.location {
        Some(location) => sanitize_location(location),
        None => repository
            .available_locations()?
            .into_iter()
            .next()
            .context("No locations available")?,
    };
    anyhow::ensure!(!location.is_empty(), "Location is empty after sanitizing");

    if args.refresh {
        ScraperRunner::from_config(&config)
            .refresh(&mut repository, &location, &mut stdout)
            .await?;
    }

    let projects = repository.load(&location)?;
    if projects.is_empty() {
        render::render_empty(&mut stdout, &location, &repository.stored_locations()?)?;
        return Ok(());
    }

    let current_year = Local::now().year();
    let filter = ProjectFilter {
        query: args.query.trim().to_string(),
        price_range: args.min_price as f64..=args.max_price as f64,
        bhk: args.bhk.iter().map(|b| b.trim().to_string()).collect(),
        possession_range: ProjectFilter::possession_years(
            args.from_year.unwrap_or(current_year),
            args.to_year.unwrap_or(current_year + 5),
        ),
    };

    let filtered = filter.apply(&projects);
    info!(
        "{} of {} projects in {} match the filters",
        filtered.len(),
        projects.len(),
        location
    );

    render::render_dashboard(&mut stdout, &location, &filter, &bhk_types(&projects), &filtered)?;
    Ok(())
}
