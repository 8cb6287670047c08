use anyhow::{Context, Result};
use std::env;
use std::path::{Path, PathBuf};

/// Runtime settings shared by the scraper and the viewer
#[derive(Debug, Clone)]
pub struct ScoutConfig {
    /// Directory holding `projects_data_<location>.json`
    pub data_dir: PathBuf,
    pub base_url: String,
    pub user_agent: String,
    /// How long to wait for the page body before giving up
    pub page_load_timeout_secs: u64,
    /// Extra wait after the body appears, for client-side rendering
    pub settle_delay_secs: u64,
    /// Overall bound on a scraper child process started by the viewer
    pub scrape_timeout_secs: u64,
    /// Program and leading arguments used to run the scraper
    pub scraper_command: Vec<String>,
    pub tracing_level: String,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_base_url() -> String {
    "https://housiey.com/in/pune/".to_string()
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36".to_string()
}

fn default_page_load_timeout_secs() -> u64 {
    15
}

fn default_settle_delay_secs() -> u64 {
    3
}

fn default_scrape_timeout_secs() -> u64 {
    120 // 2 minutes
}

/// The scraper binary next to the running executable, else whatever is on PATH
fn default_scraper_command() -> Vec<String> {
    let sibling = env::current_exe().ok().and_then(|exe| {
        let candidate = exe.with_file_name(format!("housiey-scraper{}", env::consts::EXE_SUFFIX));
        candidate.exists().then(|| candidate.display().to_string())
    });
    vec![sibling.unwrap_or_else(|| "housiey-scraper".to_string())]
}

/// Parse `HOUSIEY_SCRAPER_CMD`.
///
/// A value naming an existing file is the program itself, spaces included
/// (e.g. `/Applications/Housiey Scout/housiey-scraper`). Anything else is
/// split on whitespace into the program and its leading arguments.
pub fn parse_scraper_command(value: &str) -> Result<Vec<String>> {
    let value = value.trim();
    if value.is_empty() {
        anyhow::bail!("HOUSIEY_SCRAPER_CMD is set but empty");
    }

    if Path::new(value).is_file() {
        return Ok(vec![value.to_string()]);
    }
    Ok(value.split_whitespace().map(str::to_string).collect())
}

fn default_tracing_level() -> String {
    "info".to_string()
}

impl Default for ScoutConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            base_url: default_base_url(),
            user_agent: default_user_agent(),
            page_load_timeout_secs: default_page_load_timeout_secs(),
            settle_delay_secs: default_settle_delay_secs(),
            scrape_timeout_secs: default_scrape_timeout_secs(),
            scraper_command: default_scraper_command(),
            tracing_level: default_tracing_level(),
        }
    }
}

impl ScoutConfig {
    /// Defaults overridden by environment variables
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(data_dir) = env::var("HOUSIEY_DATA_DIR") {
            config.data_dir = PathBuf::from(data_dir);
        }

        if let Ok(base_url) = env::var("HOUSIEY_BASE_URL") {
            config.base_url = base_url;
        }

        if let Ok(user_agent) = env::var("HOUSIEY_USER_AGENT") {
            config.user_agent = user_agent;
        }

        if let Ok(timeout) = env::var("PAGE_LOAD_TIMEOUT_SECS") {
            config.page_load_timeout_secs = timeout
                .parse()
                .context("Failed to parse PAGE_LOAD_TIMEOUT_SECS environment variable")?;
        }

        if let Ok(delay) = env::var("SETTLE_DELAY_SECS") {
            config.settle_delay_secs = delay
                .parse()
                .context("Failed to parse SETTLE_DELAY_SECS environment variable")?;
        }

        if let Ok(timeout) = env::var("SCRAPE_TIMEOUT_SECS") {
            config.scrape_timeout_secs = timeout
                .parse()
                .context("Failed to parse SCRAPE_TIMEOUT_SECS environment variable")?;
        }

        if let Ok(command) = env::var("HOUSIEY_SCRAPER_CMD") {
            config.scraper_command = parse_scraper_command(&command)?;
        }

        if let Ok(level) = env::var("TRACING_LEVEL") {
            config.tracing_level = level;
        }

        Ok(config)
    }

    /// Initialize logging - `RUST_LOG` wins, otherwise the configured level
    pub fn init_tracing(&self) {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            tracing_subscriber::EnvFilter::try_new(self.tracing_level.to_lowercase())
                .unwrap_or_else(|_| {
                    eprintln!("Invalid tracing level '{}', using 'info'", self.tracing_level);
                    tracing_subscriber::EnvFilter::new("info")
                })
        });

        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}
