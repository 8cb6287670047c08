//! Plain-text dashboard for the viewer.

use crate::filter::{FilterSummary, ProjectFilter};
use crate::models::Project;
use crate::scrapers::display_location;
use std::io::{self, Write};

/// "₹25.0L - ₹5.0Cr"
pub fn format_price_range(filter: &ProjectFilter) -> String {
    format!(
        "₹{:.1}L - ₹{:.1}Cr",
        filter.price_range.start() / 100_000.0,
        filter.price_range.end() / 10_000_000.0
    )
}

pub fn render_locations(out: &mut impl Write, locations: &[String], cached: &[&str]) -> io::Result<()> {
    writeln!(out, "Available locations:")?;
    for location in locations {
        let marker = if cached.contains(&location.as_str()) { " (cached)" } else { "" };
        writeln!(out, "  {:<20} {}{}", location, display_location(location), marker)?;
    }
    Ok(())
}

/// Shown when a location has no data yet
/// Empty state for `location`, pointing at the locations that do have data files
pub fn render_empty(out: &mut impl Write, location: &str, stored: &[String]) -> io::Result<()> {
    let name = display_location(location);
    writeln!(out, "⚠️  No projects found for {}", name)?;
    writeln!(out, "💡 Run with --refresh to fetch fresh data for this location.")?;

    let others: Vec<String> = stored
        .iter()
        .filter(|l| l.as_str() != location)
        .map(|l| display_location(l))
        .collect();
    if others.is_empty() {
        writeln!(out, "📦 No scraped data yet.")?;
    } else {
        writeln!(out, "📦 Data available for: {}", others.join(", "))?;
    }
    Ok(())
}

pub fn render_dashboard(
    out: &mut impl Write,
    location: &str,
    filter: &ProjectFilter,
    bhk_types: &[String],
    projects: &[Project],
) -> io::Result<()> {
    writeln!(out, "🏠 Properties in {}", display_location(location))?;
    writeln!(out, "Price range: {}", format_price_range(filter))?;
    if !bhk_types.is_empty() {
        writeln!(out, "BHK types: {}", bhk_types.join(", "))?;
    }
    writeln!(out, "Found {} properties matching your criteria", projects.len())?;
    writeln!(out)?;

    for (i, project) in projects.iter().enumerate() {
        render_project(out, i + 1, project)?;
    }

    if !projects.is_empty() {
        let summary = FilterSummary::of(projects);
        writeln!(out, "Summary")?;
        writeln!(out, "  Total Projects:       {}", summary.projects)?;
        writeln!(out, "  Total Configurations: {}", summary.configurations)?;
    }
    Ok(())
}

fn render_project(out: &mut impl Write, index: usize, project: &Project) -> io::Result<()> {
    writeln!(out, "{}. {} by {}", index, project.project_name, project.builder_name)?;
    writeln!(out, "   Possession: {}", project.possession_date)?;
    writeln!(out, "   Link: {}", project.listing_url())?;

    if project.configurations.is_empty() {
        writeln!(out, "   No configurations available")?;
    } else {
        writeln!(out, "   {:<16} {:<18} {:<12}", "BHK", "Size", "Price")?;
        for config in &project.configurations {
            writeln!(out, "   {:<16} {:<18} {:<12}", config.bhk, config.size, config.price)?;
        }
    }
    writeln!(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Configuration;

    fn rendered(f: impl FnOnce(&mut Vec<u8>) -> io::Result<()>) -> String {
        let mut buf = Vec::new();
        f(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn price_range_label() {
        let filter = ProjectFilter {
            price_range: 2_500_000.0..=50_000_000.0,
            ..ProjectFilter::default()
        };
        assert_eq!(format_price_range(&filter), "₹25.0L - ₹5.0Cr");
    }

    #[test]
    fn dashboard_lists_projects_and_summary() {
        let projects = vec![Project {
            project_name: "Life Republic".to_string(),
            builder_name: "Kolte Patil".to_string(),
            possession_date: "Dec, 2027".to_string(),
            configurations: vec![Configuration {
                bhk: "2 BHK".to_string(),
                size: "750 sqft".to_string(),
                price: "72.5 L".to_string(),
            }],
        }];
        let filter = ProjectFilter {
            price_range: 0.0..=50_000_000.0,
            ..ProjectFilter::default()
        };
        let text = rendered(|out| render_dashboard(out, "pimple-saudagar", &filter, &["2 BHK".to_string()], &projects));

        assert!(text.contains("Properties in Pimple saudagar"));
        assert!(text.contains("Found 1 properties"));
        assert!(text.contains("1. Life Republic by Kolte Patil"));
        assert!(text.contains("https://housiey.com/projects/life-republic"));
        assert!(text.contains("72.5 L"));
        assert!(text.contains("Total Configurations: 1"));
    }

    #[test]
    fn empty_state_lists_stored_locations() {
        let stored = vec!["baner".to_string(), "moshi".to_string(), "pimple-saudagar".to_string()];
        let text = rendered(|out| render_empty(out, "moshi", &stored));
        assert!(text.contains("No projects found for Moshi"));
        // moshi's own (empty) file is not offered as an alternative
        assert!(text.contains("Data available for: Baner, Pimple saudagar\n"));

        let text = rendered(|out| render_empty(out, "moshi", &["moshi".to_string()]));
        assert!(text.contains("No scraped data yet"));
    }

    #[test]
    fn locations_mark_cached_entries() {
        let locations = vec!["wakad".to_string(), "baner".to_string()];
        let text = rendered(|out| render_locations(out, &locations, &["baner"]));
        assert!(text.contains("baner"));
        assert!(text.lines().any(|l| l.contains("Baner (cached)")));
        assert!(!text.lines().any(|l| l.contains("Wakad (cached)")));
    }
}
