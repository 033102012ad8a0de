// src/config.rs

use serde::Deserialize;
use std::fs;

/// The websites.json structure: two optional URL lists plus the stopword list
/// used by the word ranking. Any missing field defaults to empty.
#[derive(Debug, Default, Deserialize)]
pub struct SiteConfig {
    #[serde(default)]
    pub urls: Vec<String>,
    #[serde(default)]
    pub partisans_urls: Vec<String>,
    #[serde(default)]
    pub stopwords: Vec<String>,
}

/// Loads the configuration file. A missing or malformed file is not fatal:
/// it degrades to an all-empty config with a diagnostic, and the caller
/// decides whether an empty run is worth reporting.
pub fn load_sites(path: &str) -> SiteConfig {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) => {
            eprintln!("error loading {}: {}", path, e);
            return SiteConfig::default();
        }
    };

    match serde_json::from_str(&raw) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error loading {}: {}", path, e);
            SiteConfig::default()
        }
    }
}
