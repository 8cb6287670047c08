use serde::{Deserialize, Serialize};

/// Placeholder stored when a card does not carry an optional field
pub const NOT_AVAILABLE: &str = "N/A";

const PROJECT_BASE_URL: &str = "https://housiey.com/projects/";

fn not_available() -> String {
    NOT_AVAILABLE.to_string()
}

/// One unit type offered by a project
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Configuration {
    /// Unit label, e.g. "2 BHK". The portal embeds "Sold Out" here.
    pub bhk: String,
    pub size: String,
    /// Free-text price, e.g. "85.5 L" or "1.2 Cr"
    pub price: String,
}

impl Configuration {
    pub fn is_sold_out(&self) -> bool {
        self.bhk.to_lowercase().contains("sold out")
    }
}

/// Core project data model
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Project {
    pub project_name: String,
    #[serde(default = "not_available")]
    pub builder_name: String,
    /// Builder-stated possession, e.g. "Dec, 2025" or "Ready to Move"
    #[serde(default = "not_available")]
    pub possession_date: String,
    #[serde(default)]
    pub configurations: Vec<Configuration>,
}

impl Project {
    /// Project page on the portal, derived from the project name
    pub fn listing_url(&self) -> String {
        let slug = self
            .project_name
            .to_lowercase()
            .replace(' ', "-")
            .replace('.', "");
        format!("{}{}", PROJECT_BASE_URL, slug)
    }

    /// Drop sold-out configurations; `None` when nothing is left
    pub fn without_sold_out(mut self) -> Option<Self> {
        self.configurations.retain(|config| !config.is_sold_out());
        if self.configurations.is_empty() {
            None
        } else {
            Some(self)
        }
    }
}
