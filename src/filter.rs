use crate::models::{Configuration, Project};
use crate::parsing::{parse_possession, parse_price};
use chrono::{NaiveDate, NaiveDateTime};
use std::collections::BTreeSet;
use std::ops::RangeInclusive;

/// Viewer-side filter over scraped projects
#[derive(Debug, Clone)]
pub struct ProjectFilter {
    /// Case-insensitive substring of project or builder name
    pub query: String,
    /// Accepted price in rupees, inclusive
    pub price_range: RangeInclusive<f64>,
    /// Accepted BHK labels; empty accepts every label
    pub bhk: BTreeSet<String>,
    /// Accepted possession dates, inclusive. Unknown dates always pass.
    pub possession_range: RangeInclusive<NaiveDateTime>,
}

impl Default for ProjectFilter {
    fn default() -> Self {
        Self {
            query: String::new(),
            price_range: 0.0..=f64::MAX,
            bhk: BTreeSet::new(),
            possession_range: NaiveDateTime::MIN..=NaiveDateTime::MAX,
        }
    }
}

impl ProjectFilter {
    /// Possession range from Jan 1 of `from_year` to the last second of `to_year`
    pub fn possession_years(from_year: i32, to_year: i32) -> RangeInclusive<NaiveDateTime> {
        let start = NaiveDate::from_ymd_opt(from_year, 1, 1)
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .unwrap_or(NaiveDateTime::MIN);
        let end = NaiveDate::from_ymd_opt(to_year, 12, 31)
            .and_then(|d| d.and_hms_opt(23, 59, 59))
            .unwrap_or(NaiveDateTime::MAX);
        start..=end
    }

    pub fn apply(&self, projects: &[Project]) -> Vec<Project> {
        projects
            .iter()
            .filter(|project| self.matches_query(project))
            .filter(|project| self.accepts_possession(project))
            .filter_map(|project| {
                let configurations: Vec<Configuration> = project
                    .configurations
                    .iter()
                    .filter(|config| self.accepts_configuration(config))
                    .cloned()
                    .collect();

                if configurations.is_empty() {
                    None
                } else {
                    Some(Project {
                        configurations,
                        ..project.clone()
                    })
                }
            })
            .collect()
    }

    fn matches_query(&self, project: &Project) -> bool {
        if self.query.is_empty() {
            return true;
        }
        let query = self.query.to_lowercase();
        project.project_name.to_lowercase().contains(&query)
            || project.builder_name.to_lowercase().contains(&query)
    }

    fn accepts_possession(&self, project: &Project) -> bool {
        match parse_possession(&project.possession_date) {
            Some(date) => self.possession_range.contains(&date),
            None => true,
        }
    }

    fn accepts_configuration(&self, config: &Configuration) -> bool {
        let price = parse_price(&config.price);
        if !self.price_range.contains(&price) {
            return false;
        }
        self.bhk.is_empty() || self.bhk.contains(&config.bhk)
    }
}

/// Filter projects, keeping only the configurations that pass
pub fn filter_projects(projects: &[Project], filter: &ProjectFilter) -> Vec<Project> {
    filter.apply(projects)
}

/// Unique BHK labels across all projects, sorted
pub fn bhk_types(projects: &[Project]) -> Vec<String> {
    projects
        .iter()
        .flat_map(|project| project.configurations.iter())
        .filter(|config| !config.bhk.is_empty())
        .map(|config| config.bhk.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Totals shown under the result list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterSummary {
    pub projects: usize,
    pub configurations: usize,
}

impl FilterSummary {
    pub fn of(projects: &[Project]) -> Self {
        Self {
            projects: projects.len(),
            configurations: projects.iter().map(|p| p.configurations.len()).sum(),
        }
    }
}
