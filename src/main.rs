// src/main.rs

use std::collections::HashSet;
use std::fs;
use std::path::PathBuf;

mod config;
mod extractor;
mod harvester;
mod reporter;

use harvester::{Group, Harvester};

const WEBSITES_FILE: &str = "websites.json";
const OUTPUT_DIR: &str = "output";
const PARTISANS_DIR: &str = "output/partisans";

/// Loads the configured URL groups and processes each in turn. One run, no
/// arguments; outputs land under `output/`.
#[tokio::main]
async fn main() {
    let sites = config::load_sites(WEBSITES_FILE);

    if sites.urls.is_empty() && sites.partisans_urls.is_empty() {
        println!(
            "No websites or partisans URLs found in {}. Please add URLs to the file.",
            WEBSITES_FILE
        );
        return;
    }

    // Output directories are created once up front and only read after that.
    for dir in [OUTPUT_DIR, PARTISANS_DIR] {
        if let Err(e) = fs::create_dir_all(dir) {
            eprintln!("failed to create output directory {}: {}", dir, e);
            return;
        }
    }

    let stopwords: HashSet<String> = sites.stopwords.iter().map(|w| w.to_lowercase()).collect();
    let harvester = Harvester::new(stopwords);

    let groups = [
        Group {
            urls: sites.urls,
            dir: PathBuf::from(OUTPUT_DIR),
            export_base: "metadata".to_string(),
        },
        Group {
            urls: sites.partisans_urls,
            dir: PathBuf::from(PARTISANS_DIR),
            export_base: "partisans_metadata".to_string(),
        },
    ];

    for group in &groups {
        if group.urls.is_empty() {
            continue;
        }
        harvester.process_group(group).await;
    }
}
