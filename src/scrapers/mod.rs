pub mod browser;
pub mod housiey;
pub mod traits;
pub mod types;

pub use browser::BrowserPageSource;
pub use housiey::HousieyAdapter;
pub use traits::{PageAdapter, PageSource};
pub use types::{display_location, sanitize_location, SearchParams};

use crate::models::Project;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::info;

/// Replays a previously saved page instead of launching a browser
pub struct FilePageSource {
    path: PathBuf,
}

impl FilePageSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl PageSource for FilePageSource {
    fn fetch(&self, url: &str) -> Result<String> {
        info!("Reading saved page {} in place of {}", self.path.display(), url);
        std::fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read saved page {}", self.path.display()))
    }
}

/// Fetch one listing page and extract its available projects
pub fn scrape(
    source: &dyn PageSource,
    adapter: &dyn PageAdapter,
    url: &str,
    dump_html: Option<&Path>,
) -> Result<Vec<Project>> {
    let html = source.fetch(url)?;

    if let Some(path) = dump_html {
        std::fs::write(path, &html)
            .with_context(|| format!("Failed to save page markup to {}", path.display()))?;
        info!("Saved page markup to {} ({} bytes)", path.display(), html.len());
    }

    info!("Parsing project details from {}...", adapter.source_name());
    let projects = adapter.extract(&html);
    info!("Extracted {} projects with available configurations", projects.len());

    Ok(projects)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Configuration;

    struct StaticSource(&'static str);

    impl PageSource for StaticSource {
        fn fetch(&self, _url: &str) -> Result<String> {
            Ok(self.0.to_string())
        }
    }

    struct FailingSource;

    impl PageSource for FailingSource {
        fn fetch(&self, url: &str) -> Result<String> {
            anyhow::bail!("connection refused: {}", url)
        }
    }

    /// Treats every line "name|bhk" as a one-configuration project
    struct LineAdapter;

    impl PageAdapter for LineAdapter {
        fn extract_cards(&self, html: &str) -> Vec<Project> {
            html.lines()
                .filter_map(|line| line.split_once('|'))
                .map(|(name, bhk)| Project {
                    project_name: name.to_string(),
                    builder_name: "N/A".to_string(),
                    possession_date: "N/A".to_string(),
                    configurations: vec![Configuration {
                        bhk: bhk.to_string(),
                        size: "600 sqft".to_string(),
                        price: "50 L".to_string(),
                    }],
                })
                .collect()
        }

        fn source_name(&self) -> &'static str {
            "lines"
        }
    }

    #[test]
    fn scrape_applies_sold_out_rule_for_any_adapter() {
        let source = StaticSource("Alpha|2 BHK\nBeta|2 BHK Sold Out\nGamma|3 BHK");
        let projects = scrape(&source, &LineAdapter, "http://example.test", None).unwrap();
        let names: Vec<_> = projects.iter().map(|p| p.project_name.as_str()).collect();
        assert_eq!(names, ["Alpha", "Gamma"]);
    }

    #[test]
    fn scrape_propagates_source_failure() {
        let err = scrape(&FailingSource, &LineAdapter, "http://example.test", None).unwrap_err();
        assert!(err.to_string().contains("connection refused"));
    }

    #[test]
    fn file_source_reports_missing_file() {
        let source = FilePageSource::new("/nonexistent/page_source.html");
        let err = source.fetch("http://example.test").unwrap_err();
        assert!(err.to_string().contains("Failed to read saved page"));
    }
}
