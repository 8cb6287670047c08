use std::time::Duration;
use thiserror::Error;

/// Why a single project card was skipped during extraction
#[derive(Debug, Error)]
pub enum CardError {
    #[error("card has no project name")]
    MissingName,
}

/// Failure to run the scraper as a child process
#[derive(Debug, Error)]
pub enum RunError {
    #[error("scraper command is empty")]
    EmptyCommand,
    #[error("failed to launch scraper `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to collect scraper output: {0}")]
    Output(#[source] std::io::Error),
    #[error("scraping timed out after {} seconds", .0.as_secs())]
    TimedOut(Duration),
}
