use crate::models::Project;
use anyhow::Result;

/// Site-specific extraction: rendered markup in, project records out.
/// Swapping the portal layout means swapping the adapter; filtering and
/// parsing never see markup.
pub trait PageAdapter {
    /// Every project card found on the page, sold-out rows included
    fn extract_cards(&self, html: &str) -> Vec<Project>;

    /// Projects with sold-out configurations removed; projects left with no
    /// configurations are dropped
    fn extract(&self, html: &str) -> Vec<Project> {
        self.extract_cards(html)
            .into_iter()
            .filter_map(Project::without_sold_out)
            .collect()
    }

    /// Get the name of the portal this adapter understands
    fn source_name(&self) -> &'static str;
}

/// Where rendered page markup comes from
pub trait PageSource {
    fn fetch(&self, url: &str) -> Result<String>;
}
