// src/reporter/exporter.rs

use std::path::{Path, PathBuf};

use crate::extractor::MetadataRecord;

/// Writes one CSV file for a group's accumulated records, named
/// `{base_name}_{date_stamp}.csv` so same-day reruns overwrite. The composite
/// columns (`top_words`, `external_links`) are embedded as compact JSON to
/// keep their shape in a flat format. An empty batch writes nothing.
pub fn export(
    records: &[MetadataRecord],
    dir: &Path,
    base_name: &str,
    date_stamp: &str,
) -> Result<Option<PathBuf>, Box<dyn std::error::Error + Send + Sync>> {
    if records.is_empty() {
        return Ok(None);
    }

    let path = dir.join(format!("{}_{}.csv", base_name, date_stamp));
    let mut writer = csv::Writer::from_path(&path)?;
    writer.write_record([
        "url",
        "title",
        "description",
        "keywords",
        "author",
        "og_image",
        "top_words",
        "external_links",
    ])?;

    for record in records {
        let top_words = serde_json::to_string(&record.top_words)?;
        let external_links = serde_json::to_string(&record.external_links)?;
        writer.write_record([
            record.url.as_str(),
            record.title.as_str(),
            record.description.as_str(),
            record.keywords.as_str(),
            record.author.as_str(),
            record.og_image.as_str(),
            top_words.as_str(),
            external_links.as_str(),
        ])?;
    }

    writer.flush()?;
    Ok(Some(path))
}
