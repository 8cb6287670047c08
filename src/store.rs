//! Per-location project files and the viewer's in-memory cache.

use crate::models::Project;
use anyhow::{Context, Result};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

const FILE_PREFIX: &str = "projects_data_";
const FILE_SUFFIX: &str = ".json";

/// Localities offered even before anything has been scraped
pub const FALLBACK_LOCATIONS: &[&str] = &[
    "wakad",
    "tathawade",
    "hinjewadi",
    "baner",
    "pimple-saudagar",
    "balewadi",
    "punawale",
    "chinchwad",
    "moshi",
    "ravet",
    "kharadi",
    "akurdi",
    "bavdhan",
];

/// `projects_data_<location>.json`
pub fn data_file_name(location: &str) -> String {
    format!("{}{}{}", FILE_PREFIX, location, FILE_SUFFIX)
}

/// Write projects as a pretty-printed JSON array, replacing any previous file
pub fn write_projects(path: &Path, projects: &[Project]) -> Result<()> {
    let json = serde_json::to_string_pretty(projects).context("Failed to serialize projects")?;
    std::fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))
}

/// Read a project file. A missing or blank file reads as no projects.
pub fn read_projects(path: &Path) -> Result<Vec<Project>> {
    if !path.exists() {
        debug!("No data file at {}", path.display());
        return Ok(Vec::new());
    }

    let contents =
        std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    if contents.trim().is_empty() {
        return Ok(Vec::new());
    }

    serde_json::from_str(&contents).with_context(|| format!("Malformed project data in {}", path.display()))
}

/// Lookup of scraped projects by location: cache first, then the data file
pub struct ProjectRepository {
    data_dir: PathBuf,
    cache: BTreeMap<String, Vec<Project>>,
}

impl ProjectRepository {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            cache: BTreeMap::new(),
        }
    }

    pub fn data_file(&self, location: &str) -> PathBuf {
        self.data_dir.join(data_file_name(location))
    }

    /// Projects for a location; a file hit is cached for later lookups
    pub fn load(&mut self, location: &str) -> Result<Vec<Project>> {
        if let Some(projects) = self.cache.get(location) {
            debug!("Cache hit for {}", location);
            return Ok(projects.clone());
        }

        let projects = read_projects(&self.data_file(location))?;
        if !projects.is_empty() {
            self.cache.insert(location.to_string(), projects.clone());
        }
        Ok(projects)
    }

    /// Drop the cached entry and read the file again
    pub fn reload(&mut self, location: &str) -> Result<Vec<Project>> {
        self.cache.remove(location);
        self.load(location)
    }

    /// Write the location's file and replace its cache entry
    pub fn save(&mut self, location: &str, projects: &[Project]) -> Result<PathBuf> {
        std::fs::create_dir_all(&self.data_dir)
            .with_context(|| format!("Failed to create {}", self.data_dir.display()))?;

        let path = self.data_file(location);
        write_projects(&path, projects)?;
        self.cache.insert(location.to_string(), projects.to_vec());

        info!("Saved {} projects to {}", projects.len(), path.display());
        Ok(path)
    }

    pub fn cached_locations(&self) -> Vec<&str> {
        self.cache.keys().map(String::as_str).collect()
    }

    /// Cached locations, then locations with a data file, then the fallback list
    pub fn available_locations(&self) -> Result<Vec<String>> {
        let mut locations: Vec<String> = self.cache.keys().cloned().collect();

        for location in self.stored_locations()? {
            if !locations.contains(&location) {
                locations.push(location);
            }
        }

        for location in FALLBACK_LOCATIONS {
            if !locations.iter().any(|l| l == location) {
                locations.push(location.to_string());
            }
        }

        Ok(locations)
    }

    /// Locations that have a data file in the data directory, sorted
    pub fn stored_locations(&self) -> Result<Vec<String>> {
        if !self.data_dir.exists() {
            return Ok(Vec::new());
        }

        let entries = std::fs::read_dir(&self.data_dir)
            .with_context(|| format!("Failed to list {}", self.data_dir.display()))?;

        let mut locations: Vec<String> = entries
            .filter_map(|entry| entry.ok())
            .filter_map(|entry| entry.file_name().into_string().ok())
            .filter_map(|name| {
                name.strip_prefix(FILE_PREFIX)?
                    .strip_suffix(FILE_SUFFIX)
                    .filter(|location| !location.is_empty())
                    .map(str::to_string)
            })
            .collect();
        locations.sort();
        Ok(locations)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Configuration;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("housiey-store-{}-{}", name, std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn projects() -> Vec<Project> {
        vec![Project {
            project_name: "Vilas Javdekar Yashwin Encore".to_string(),
            builder_name: "Vilas Javdekar".to_string(),
            possession_date: "Ready to Move".to_string(),
            configurations: vec![
                Configuration {
                    bhk: "2 BHK".to_string(),
                    size: "749 sqft".to_string(),
                    price: "85.5 L".to_string(),
                },
                Configuration {
                    bhk: "3 BHK".to_string(),
                    size: "1,050 sqft".to_string(),
                    price: "1.2 Cr".to_string(),
                },
            ],
        }]
    }

    #[test]
    fn save_then_read_round_trips() {
        let dir = scratch_dir("round-trip");
        let mut repo = ProjectRepository::new(&dir);

        let path = repo.save("wakad", &projects()).unwrap();
        assert_eq!(path, dir.join("projects_data_wakad.json"));
        assert_eq!(read_projects(&path).unwrap(), projects());

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains("\n  {\n"), "expected pretty-printed JSON");
        assert!(written.contains("\"project_name\""));
    }

    #[test]
    fn missing_and_blank_files_mean_no_projects() {
        let dir = scratch_dir("empty");
        let mut repo = ProjectRepository::new(&dir);
        assert!(repo.load("baner").unwrap().is_empty());

        std::fs::write(dir.join("projects_data_baner.json"), "  \n").unwrap();
        assert!(repo.load("baner").unwrap().is_empty());
        assert!(repo.cached_locations().is_empty());
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = scratch_dir("malformed");
        std::fs::write(dir.join("projects_data_moshi.json"), "{not json").unwrap();
        let mut repo = ProjectRepository::new(&dir);
        let err = repo.load("moshi").unwrap_err();
        assert!(err.to_string().contains("Malformed project data"));
    }

    #[test]
    fn cache_is_consulted_before_file() {
        let dir = scratch_dir("cache");
        let mut repo = ProjectRepository::new(&dir);
        repo.save("ravet", &projects()).unwrap();

        // an external rewrite is invisible until reload
        write_projects(&repo.data_file("ravet"), &[]).unwrap();
        assert_eq!(repo.load("ravet").unwrap(), projects());
        assert!(repo.reload("ravet").unwrap().is_empty());
    }

    #[test]
    fn available_locations_order_and_dedup() {
        let dir = scratch_dir("locations");
        write_projects(&dir.join("projects_data_zeta-nagar.json"), &projects()).unwrap();
        write_projects(&dir.join("projects_data_wakad.json"), &projects()).unwrap();
        std::fs::write(dir.join("notes.json"), "[]").unwrap();

        let mut repo = ProjectRepository::new(&dir);
        repo.save("kharadi", &projects()).unwrap();

        let locations = repo.available_locations().unwrap();
        assert_eq!(&locations[..3], ["kharadi", "wakad", "zeta-nagar"]);
        assert_eq!(locations.iter().filter(|l| *l == "wakad").count(), 1);
        assert_eq!(locations.iter().filter(|l| *l == "kharadi").count(), 1);
        assert!(locations.iter().any(|l| l == "bavdhan"));
        assert_eq!(locations.len(), FALLBACK_LOCATIONS.len() + 1);
    }

    #[test]
    fn stored_locations_come_from_data_files_only() {
        let dir = scratch_dir("stored");
        write_projects(&dir.join("projects_data_wakad.json"), &projects()).unwrap();
        write_projects(&dir.join("projects_data_baner.json"), &[]).unwrap();
        std::fs::write(dir.join("projects_data_.json"), "[]").unwrap();
        std::fs::write(dir.join("notes.json"), "[]").unwrap();

        let repo = ProjectRepository::new(&dir);
        assert_eq!(repo.stored_locations().unwrap(), ["baner", "wakad"]);
        assert!(repo.cached_locations().is_empty());

        let missing = ProjectRepository::new(dir.join("not-created"));
        assert!(missing.stored_locations().unwrap().is_empty());
    }
}
