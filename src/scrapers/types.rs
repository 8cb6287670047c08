pub const DEFAULT_LOCATION: &str = "tathawade";
pub const DEFAULT_MIN_PRICE: u64 = 2_500_000;
pub const DEFAULT_MAX_PRICE: u64 = 9_999_999_999;

/// Search parameters for one listing page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchParams {
    /// Pune locality, already sanitized (see [`sanitize_location`])
    pub location: String,
    /// Minimum price (INR)
    pub min_price: u64,
    /// Maximum price (INR)
    pub max_price: u64,
    /// Portal configuration filter, forwarded verbatim
    pub config: String,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            location: DEFAULT_LOCATION.to_string(),
            min_price: DEFAULT_MIN_PRICE,
            max_price: DEFAULT_MAX_PRICE,
            config: String::new(),
        }
    }
}

impl SearchParams {
    pub fn new(location: &str, min_price: u64, max_price: u64, config: &str) -> Self {
        Self {
            location: sanitize_location(location),
            min_price,
            max_price,
            config: config.to_string(),
        }
    }

    /// Map-view listing URL under `base_url` (e.g. `https://housiey.com/in/pune/`)
    pub fn url(&self, base_url: &str) -> String {
        let separator = if base_url.ends_with('/') { "" } else { "/" };
        format!(
            "{}{}{}?isMapView=true&config={}&min={}&max={}&downPayment=&availability_status=1",
            base_url, separator, self.location, self.config, self.min_price, self.max_price
        )
    }

    /// Flags understood by the scraper binary
    pub fn to_cli_args(&self) -> Vec<String> {
        vec![
            "--location".to_string(),
            self.location.clone(),
            "--min-price".to_string(),
            self.min_price.to_string(),
            "--max-price".to_string(),
            self.max_price.to_string(),
            "--config".to_string(),
            self.config.clone(),
        ]
    }
}

/// Lowercase, hyphenate whitespace and strip anything unsafe for a file name
pub fn sanitize_location(location: &str) -> String {
    location
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
        .to_lowercase()
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '-')
        .collect()
}

/// "pimple-saudagar" -> "Pimple saudagar"
pub fn display_location(location: &str) -> String {
    let mut chars = location.chars();
    let capitalized = match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    };
    capitalized.replace('-', " ")
}
