//! Scraper and terminal viewer for housiey.com project listings.

pub mod config;
pub mod error;
pub mod filter;
pub mod models;
pub mod parsing;
pub mod render;
pub mod runner;
pub mod scrapers;
pub mod store;

pub use config::ScoutConfig;
pub use filter::{bhk_types, filter_projects, ProjectFilter};
pub use models::{Configuration, Project};
pub use parsing::{parse_possession, parse_price};
pub use store::ProjectRepository;
