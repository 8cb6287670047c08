use crate::error::CardError;
use crate::models::{Configuration, Project, NOT_AVAILABLE};
use crate::scrapers::traits::PageAdapter;
use anyhow::{anyhow, Context, Result};
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, info, warn};

const CARD_CLASS: &str = r"bg-white.*border.*rounded-sm";
const NAME_CLASS: &str = r".*font-bold.*text-primary.*";
const CONFIG_CLASS: &str = r"text-\[#234e70\].*list-fx-features";
const POSSESSION_CLASS: &str = "text-[#0E8744]";
const CONFIG_ITEM_CLASS: &str = "text-xs";

/// Extracts project cards from a rendered housiey.com listing page.
///
/// The portal's markup is Tailwind-generated, so cards and fields are
/// located by class-attribute patterns rather than stable ids.
pub struct HousieyAdapter {
    card_class: Regex,
    name_class: Regex,
    config_class: Regex,
    div: Selector,
    paragraph: Selector,
    span: Selector,
    builder_link: Selector,
}

fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| anyhow!("invalid selector `{}`: {:?}", css, e))
}

impl HousieyAdapter {
    pub fn new() -> Result<Self> {
        Ok(Self {
            card_class: Regex::new(CARD_CLASS).context("Invalid card class pattern")?,
            name_class: Regex::new(NAME_CLASS).context("Invalid name class pattern")?,
            config_class: Regex::new(CONFIG_CLASS).context("Invalid configuration class pattern")?,
            div: selector("div")?,
            paragraph: selector("p")?,
            span: selector("span")?,
            builder_link: selector(r#"a[href*="/builder/"]"#)?,
        })
    }

    fn parse_card(&self, card: ElementRef<'_>) -> Result<Project, CardError> {
        let project_name = descendants(card, &self.paragraph)
            .find(|p| class_matches(p, &self.name_class))
            .map(text_of)
            .ok_or(CardError::MissingName)?;

        let builder_name = descendants(card, &self.builder_link)
            .next()
            .and_then(|link| descendants(link, &self.paragraph).next())
            .map(text_of)
            .unwrap_or_else(|| NOT_AVAILABLE.to_string());

        let possession_date = descendants(card, &self.span)
            .find(|span| has_class(span, POSSESSION_CLASS))
            .map(text_of)
            .unwrap_or_else(|| NOT_AVAILABLE.to_string());

        let configurations = descendants(card, &self.div)
            .filter(|div| class_matches(div, &self.config_class))
            .filter_map(|row| self.parse_configuration(row))
            .collect();

        Ok(Project {
            project_name,
            builder_name,
            possession_date,
            configurations,
        })
    }

    /// A row yields a configuration only when bhk, size and price are all present
    fn parse_configuration(&self, row: ElementRef<'_>) -> Option<Configuration> {
        let items: Vec<String> = descendants(row, &self.div)
            .filter(|div| has_class(div, CONFIG_ITEM_CLASS))
            .map(text_of)
            .collect();

        match items.as_slice() {
            [bhk, size, price, ..] => Some(Configuration {
                bhk: bhk.clone(),
                size: size.clone(),
                price: price.clone(),
            }),
            _ => {
                debug!("Skipping configuration row with {} fields", items.len());
                None
            }
        }
    }
}

/// Elements under `root` matching `selector`, excluding `root` itself
fn descendants<'a>(root: ElementRef<'a>, selector: &'a Selector) -> impl Iterator<Item = ElementRef<'a>> + 'a {
    let root_id = root.id();
    root.select(selector).filter(move |el| el.id() != root_id)
}

fn text_of(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// Match against the class tokens joined by single spaces, so attribute
/// whitespace (newlines, tabs, runs of spaces) does not affect the pattern
fn class_matches(element: &ElementRef<'_>, pattern: &Regex) -> bool {
    let classes = element.value().classes().collect::<Vec<_>>().join(" ");
    !classes.is_empty() && pattern.is_match(&classes)
}

fn has_class(element: &ElementRef<'_>, class: &str) -> bool {
    element.value().classes().any(|c| c == class)
}

impl PageAdapter for HousieyAdapter {
    fn extract_cards(&self, html: &str) -> Vec<Project> {
        let document = Html::parse_document(html);

        let cards: Vec<_> = document
            .select(&self.div)
            .filter(|div| class_matches(div, &self.card_class))
            .collect();
        info!("Found {} project cards", cards.len());

        let mut projects = Vec::new();
        for (idx, card) in cards.into_iter().enumerate() {
            match self.parse_card(card) {
                Ok(project) => {
                    debug!(
                        "Card {}: {} ({} configurations)",
                        idx,
                        project.project_name,
                        project.configurations.len()
                    );
                    projects.push(project);
                }
                Err(e) => warn!("Skipping project card {}: {}", idx, e),
            }
        }

        projects
    }

    fn source_name(&self) -> &'static str {
        "housiey.com"
    }
}
