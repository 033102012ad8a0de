// src/reporter/mod.rs

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use crate::extractor::{MetadataRecord, NO_DATA};

pub mod exporter;

/// Renders one record as a markdown document. Deterministic: the same record
/// always produces byte-identical output.
pub fn render(record: &MetadataRecord) -> String {
    let mut doc = String::with_capacity(1024);
    doc.push_str(&format!("# {}\n\n", record.url));

    for (label, value) in [
        ("Title", &record.title),
        ("Description", &record.description),
        ("Keywords", &record.keywords),
        ("Author", &record.author),
    ] {
        doc.push_str(&format!("**{}:** {}\n\n", label, value));
    }

    if record.og_image != NO_DATA && !record.og_image.is_empty() {
        let src = if record.og_image.starts_with('/') {
            format!("{}{}", record.url.trim_end_matches('/'), record.og_image)
        } else {
            record.og_image.clone()
        };
        doc.push_str(&format!("![Preview]({})\n\n", src));
    }

    if !record.top_words.is_empty() {
        doc.push_str("| Word | Count |\n| --- | --- |\n");
        for (word, count) in &record.top_words {
            doc.push_str(&format!("| {} | {} |\n", word, count));
        }
        doc.push('\n');
    }

    let external = filtered_external_links(record);
    if !external.is_empty() {
        doc.push_str("## External links\n\n");
        for link in &external {
            doc.push_str(&format!("- {}\n", link));
        }
    }

    doc
}

/// Deduplicates the record's external links (first-seen order) and drops
/// self-references, fragments, tel: links and blank entries.
fn filtered_external_links(record: &MetadataRecord) -> Vec<String> {
    let own_prefix = record.url.trim_end_matches('/');
    let mut seen = HashSet::new();
    let mut links = Vec::new();
    for link in &record.external_links {
        let trimmed = link.trim();
        if trimmed.is_empty()
            || trimmed.starts_with('#')
            || trimmed.starts_with("tel:")
            || trimmed.starts_with(own_prefix)
        {
            continue;
        }
        if seen.insert(link.as_str()) {
            links.push(link.clone());
        }
    }
    links
}

/// Strips the scheme prefix and flattens path separators so the URL can serve
/// as a file name.
pub fn sanitize_url(url: &str) -> String {
    url.replace("http://", "")
        .replace("https://", "")
        .replace('/', "_")
}

/// `{date_stamp}_{sanitized_url}.md`: same-day reruns overwrite, cross-day
/// runs produce distinct files.
pub fn report_file_name(url: &str, date_stamp: &str) -> String {
    format!("{}_{}.md", date_stamp, sanitize_url(url))
}

/// Writes the rendered report into the group directory and returns its path.
pub fn save_report(
    record: &MetadataRecord,
    dir: &Path,
    date_stamp: &str,
) -> Result<PathBuf, Box<dyn std::error::Error + Send + Sync>> {
    let path = dir.join(report_file_name(&record.url, date_stamp));
    fs::write(&path, render(record))?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_record() -> MetadataRecord {
        MetadataRecord {
            url: "https://example.com".to_string(),
            title: "Hi".to_string(),
            description: NO_DATA.to_string(),
            keywords: NO_DATA.to_string(),
            author: NO_DATA.to_string(),
            og_title: NO_DATA.to_string(),
            og_description: NO_DATA.to_string(),
            og_image: NO_DATA.to_string(),
            canonical: NO_DATA.to_string(),
            top_words: vec![("hello".to_string(), 2), ("world".to_string(), 1)],
            images: Vec::new(),
            internal_links: Vec::new(),
            external_links: Vec::new(),
        }
    }

    #[test]
    fn renders_labeled_fields_and_word_table() {
        let doc = render(&sample_record());

        assert!(doc.starts_with("# https://example.com\n\n"));
        assert!(doc.contains("**Title:** Hi\n"));
        assert!(doc.contains("**Description:** — — —\n"));
        assert!(doc.contains("| Word | Count |\n| --- | --- |\n"));
        assert!(doc.contains("| hello | 2 |\n| world | 1 |\n"));
    }

    #[test]
    fn root_relative_og_image_gets_origin_prepended() {
        let mut record = sample_record();
        record.url = "https://example.com/".to_string();
        record.og_image = "/img/x.png".to_string();

        let doc = render(&record);
        assert!(doc.contains("![Preview](https://example.com/img/x.png)"));
    }

    #[test]
    fn absolute_og_image_rendered_as_is() {
        let mut record = sample_record();
        record.og_image = "https://cdn.example.com/banner.jpg".to_string();

        let doc = render(&record);
        assert!(doc.contains("![Preview](https://cdn.example.com/banner.jpg)"));
    }

    #[test]
    fn sentinel_og_image_is_not_rendered() {
        let doc = render(&sample_record());
        assert!(!doc.contains("![Preview]"));
    }

    #[test]
    fn external_links_filtered_and_deduplicated() {
        let mut record = sample_record();
        record.external_links = vec![
            "https://other.org/a".to_string(),
            "https://other.org/a".to_string(),
            "#section".to_string(),
            "tel:12345".to_string(),
            "   ".to_string(),
            "https://example.com/self".to_string(),
            "https://another.net/".to_string(),
        ];

        let doc = render(&record);
        assert!(doc.contains("## External links\n"));
        assert_eq!(doc.matches("- https://other.org/a\n").count(), 1);
        assert!(doc.contains("- https://another.net/\n"));
        assert!(!doc.contains("#section"));
        assert!(!doc.contains("tel:12345"));
        assert!(!doc.contains("example.com/self"));
    }

    #[test]
    fn self_link_with_leading_whitespace_is_filtered() {
        let mut record = sample_record();
        record.external_links = vec![
            "  https://example.com/self".to_string(),
            "https://another.net/".to_string(),
        ];

        let doc = render(&record);
        assert!(!doc.contains("example.com/self"));
        assert!(doc.contains("- https://another.net/\n"));
    }

    #[test]
    fn no_external_links_section_when_all_filtered() {
        let mut record = sample_record();
        record.external_links = vec!["#top".to_string(), "tel:555".to_string()];

        let doc = render(&record);
        assert!(!doc.contains("## External links"));
    }

    #[test]
    fn rendering_is_deterministic() {
        let mut record = sample_record();
        record.external_links = vec![
            "https://b.org/".to_string(),
            "https://a.org/".to_string(),
            "https://b.org/".to_string(),
        ];
        assert_eq!(render(&record), render(&record));
    }

    #[test]
    fn report_file_name_sanitizes_url() {
        assert_eq!(
            report_file_name("https://example.com/news/today", "20260823"),
            "20260823_example.com_news_today.md"
        );
        assert_eq!(
            report_file_name("http://example.com", "20260823"),
            "20260823_example.com.md"
        );
    }

    #[test]
    fn save_report_writes_rendered_document() {
        let dir = tempfile::tempdir().unwrap();
        let record = sample_record();

        let path = save_report(&record, dir.path(), "20260823").unwrap();
        assert_eq!(
            path.file_name().unwrap().to_str().unwrap(),
            "20260823_example.com.md"
        );
        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written, render(&record));
    }
}
