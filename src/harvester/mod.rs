// src/harvester/mod.rs

use chrono::Local;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

pub mod fetcher;
use fetcher::{FetchOutcome, Fetcher};

use crate::extractor::{self, MetadataRecord};
use crate::reporter::{self, exporter};

/// An independently processed partition of the configured URL list, with its
/// own output directory and export base name.
pub struct Group {
    pub urls: Vec<String>,
    pub dir: PathBuf,
    pub export_base: String,
}

/// Drives fetch -> extract -> report for each URL of a group, then exports
/// the group's accumulated records once.
pub struct Harvester {
    fetcher: Fetcher,
    stopwords: HashSet<String>,
}

impl Harvester {
    pub fn new(stopwords: HashSet<String>) -> Self {
        Self {
            fetcher: Fetcher::new(),
            stopwords,
        }
    }

    /// Processes one group sequentially. A failed fetch or write skips that
    /// URL with a diagnostic and never aborts the batch; the export runs once
    /// after the group's URLs are exhausted.
    pub async fn process_group(&self, group: &Group) {
        let date_stamp = Local::now().format("%Y%m%d").to_string();
        let mut records = Vec::with_capacity(group.urls.len());

        for url in &group.urls {
            println!("fetching metadata for: {}", url);
            let outcome = self.fetcher.fetch(url).await;
            if let Some(record) = self.handle_outcome(url, outcome, &group.dir, &date_stamp) {
                records.push(record);
            }
        }

        match exporter::export(&records, &group.dir, &group.export_base, &date_stamp) {
            Ok(Some(path)) => println!("saved to [{}]", path.display()),
            Ok(None) => {}
            Err(e) => eprintln!("failed to export {}: {}", group.export_base, e),
        }
    }

    /// Handles one URL's fetch outcome: a failure prints a skip diagnostic
    /// and yields no record, a success is extracted and written as a report.
    /// A failed report write still leaves the record in the batch.
    fn handle_outcome(
        &self,
        url: &str,
        outcome: FetchOutcome,
        dir: &Path,
        date_stamp: &str,
    ) -> Option<MetadataRecord> {
        let body = match outcome {
            Ok(body) => body,
            Err(e) => {
                eprintln!("skipping {}: {}", url, e);
                return None;
            }
        };

        let record = extractor::extract(url, &body, &self.stopwords);

        match reporter::save_report(&record, dir, date_stamp) {
            Ok(path) => println!("saved to [{}]", path.display()),
            Err(e) => eprintln!("failed to write report for {}: {}", url, e),
        }

        Some(record)
    }
}
