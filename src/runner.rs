use crate::config::ScoutConfig;
use crate::error::RunError;
use crate::scrapers::{display_location, SearchParams};
use crate::store::ProjectRepository;
use std::io::Write;
use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tracing::{error, info, warn};

/// Captured result of one scraper child process
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrapeRun {
    pub success: bool,
    pub stdout: String,
    pub stderr: String,
}

impl ScrapeRun {
    /// A run that never produced output, carrying the reason as stderr
    pub fn failed(error: &RunError) -> Self {
        Self {
            success: false,
            stdout: String::new(),
            stderr: error.to_string(),
        }
    }
}

/// Runs the scraper binary as a child process under an overall timeout
pub struct ScraperRunner {
    command: Vec<String>,
    timeout: Duration,
    data_dir: Option<PathBuf>,
}

impl ScraperRunner {
    /// `command` is the program followed by any leading arguments
    pub fn new(command: Vec<String>, timeout: Duration) -> Self {
        Self {
            command,
            timeout,
            data_dir: None,
        }
    }

    /// Runner for the configured scraper command, writing into the configured data dir
    pub fn from_config(config: &ScoutConfig) -> Self {
        Self::new(
            config.scraper_command.clone(),
            Duration::from_secs(config.scrape_timeout_secs),
        )
        .with_data_dir(&config.data_dir)
    }

    /// Have the child write its data file into `data_dir`
    pub fn with_data_dir(mut self, data_dir: impl Into<PathBuf>) -> Self {
        self.data_dir = Some(data_dir.into());
        self
    }

    pub async fn run(&self, params: &SearchParams) -> Result<ScrapeRun, RunError> {
        let (program, leading_args) = self.command.split_first().ok_or(RunError::EmptyCommand)?;

        info!("Running scraper for {}: {}", params.location, program);

        let mut command = Command::new(program);
        command.args(leading_args).args(params.to_cli_args());
        if let Some(dir) = &self.data_dir {
            command.env("HOUSIEY_DATA_DIR", dir);
        }

        let child = command
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| RunError::Spawn {
                program: program.clone(),
                source,
            })?;

        // Dropping the pending future on timeout kills the child
        let output = match tokio::time::timeout(self.timeout, child.wait_with_output()).await {
            Ok(output) => output.map_err(RunError::Output)?,
            Err(_) => {
                warn!("Scraper for {} exceeded {:?}", params.location, self.timeout);
                return Err(RunError::TimedOut(self.timeout));
            }
        };

        let run = ScrapeRun {
            success: output.status.success(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        };

        if run.success {
            info!("Scraper finished for {}", params.location);
        } else {
            warn!("Scraper for {} exited with {}", params.location, output.status);
        }

        Ok(run)
    }

    /// Scrape `location` with the default search and report progress to `out`.
    ///
    /// On success the repository entry is reloaded from the fresh data file.
    /// A failed or timed-out run is reported, not returned as an error; only
    /// writing to `out` or reading the new file can fail.
    pub async fn refresh(
        &self,
        repository: &mut ProjectRepository,
        location: &str,
        out: &mut impl Write,
    ) -> anyhow::Result<ScrapeRun> {
        let name = display_location(location);
        writeln!(out, "🔄 Scraping property data for {}... This may take 1-2 minutes.", name)?;

        let params = SearchParams {
            location: location.to_string(),
            ..SearchParams::default()
        };

        let run = match self.run(&params).await {
            Ok(run) => run,
            Err(e) => {
                error!("Scraper run failed: {}", e);
                ScrapeRun::failed(&e)
            }
        };

        if run.success {
            let projects = repository.reload(location)?;
            writeln!(out, "✅ Successfully scraped {} projects for {}!", projects.len(), name)?;
        } else {
            writeln!(out, "❌ Failed to scrape data: {}", run.stderr.trim())?;
            if !run.stdout.trim().is_empty() {
                writeln!(out, "--- scraper output ---")?;
                writeln!(out, "{}", run.stdout.trim_end())?;
                writeln!(out, "----------------------")?;
            }
        }
        writeln!(out)?;
        Ok(run)
    }
}
