// src/extractor/mod.rs

use scraper::{ElementRef, Html, Selector};
use std::collections::{HashMap, HashSet};
use std::sync::OnceLock;
use url::Url;

pub mod normalize;
use normalize::normalize;

/// Placeholder for fields the source document does not provide.
pub const NO_DATA: &str = "— — —";

/// How many ranked words a record keeps.
const TOP_WORD_LIMIT: usize = 20;

static TITLE_SELECTOR: OnceLock<Selector> = OnceLock::new();
static META_DESCRIPTION_SELECTOR: OnceLock<Selector> = OnceLock::new();
static META_KEYWORDS_SELECTOR: OnceLock<Selector> = OnceLock::new();
static META_AUTHOR_SELECTOR: OnceLock<Selector> = OnceLock::new();
static OG_TITLE_SELECTOR: OnceLock<Selector> = OnceLock::new();
static OG_DESCRIPTION_SELECTOR: OnceLock<Selector> = OnceLock::new();
static OG_IMAGE_SELECTOR: OnceLock<Selector> = OnceLock::new();
static CANONICAL_SELECTOR: OnceLock<Selector> = OnceLock::new();
static BODY_SELECTOR: OnceLock<Selector> = OnceLock::new();
static IMG_SELECTOR: OnceLock<Selector> = OnceLock::new();
static LINK_SELECTOR: OnceLock<Selector> = OnceLock::new();

/// The metadata gathered from one fetched page. Built once per successful
/// fetch and immutable afterwards; every string field is NFKC-normalized or
/// holds the `NO_DATA` sentinel.
#[derive(Debug, Clone)]
pub struct MetadataRecord {
    pub url: String,
    pub title: String,
    pub description: String,
    pub keywords: String,
    pub author: String,
    pub og_title: String,
    pub og_description: String,
    pub og_image: String,
    pub canonical: String,
    /// Ranked word frequencies, highest count first, first-seen order on ties.
    pub top_words: Vec<(String, u32)>,
    /// Every `<img src>` value in document order, duplicates kept.
    pub images: Vec<String>,
    pub internal_links: Vec<String>,
    pub external_links: Vec<String>,
}

/// Parses raw HTML into a `MetadataRecord`. Deterministic for identical input
/// and never fails: absent or malformed fields degrade to the sentinel.
pub fn extract(url: &str, raw_html: &str, stopwords: &HashSet<String>) -> MetadataRecord {
    init_selectors();
    let document = Html::parse_document(raw_html);

    let title = extract_title(&document);
    let description = attr_or_sentinel(&document, META_DESCRIPTION_SELECTOR.get().unwrap(), "content");
    let keywords = attr_or_sentinel(&document, META_KEYWORDS_SELECTOR.get().unwrap(), "content");
    let author = attr_or_sentinel(&document, META_AUTHOR_SELECTOR.get().unwrap(), "content");
    let og_title = attr_or_sentinel(&document, OG_TITLE_SELECTOR.get().unwrap(), "content");
    let og_description = attr_or_sentinel(&document, OG_DESCRIPTION_SELECTOR.get().unwrap(), "content");
    let og_image = attr_or_sentinel(&document, OG_IMAGE_SELECTOR.get().unwrap(), "content");
    let canonical = attr_or_sentinel(&document, CANONICAL_SELECTOR.get().unwrap(), "href");

    let corpus = visible_text(&document);
    let top_words = rank_words(&corpus, stopwords);
    let images = extract_images(&document);
    let (internal_links, external_links) = classify_links(&document, url);

    MetadataRecord {
        url: normalize(url),
        title: normalize(&title),
        description: normalize(&description),
        keywords: normalize(&keywords),
        author: normalize(&author),
        og_title: normalize(&og_title),
        og_description: normalize(&og_description),
        og_image: normalize(&og_image),
        canonical: normalize(&canonical),
        top_words,
        images,
        internal_links,
        external_links,
    }
}

fn init_selectors() {
    TITLE_SELECTOR.get_or_init(|| Selector::parse("title").unwrap());
    META_DESCRIPTION_SELECTOR.get_or_init(|| Selector::parse(r#"meta[name="description"]"#).unwrap());
    META_KEYWORDS_SELECTOR.get_or_init(|| Selector::parse(r#"meta[name="keywords"]"#).unwrap());
    META_AUTHOR_SELECTOR.get_or_init(|| Selector::parse(r#"meta[name="author"]"#).unwrap());
    OG_TITLE_SELECTOR.get_or_init(|| Selector::parse(r#"meta[property="og:title"]"#).unwrap());
    OG_DESCRIPTION_SELECTOR.get_or_init(|| Selector::parse(r#"meta[property="og:description"]"#).unwrap());
    OG_IMAGE_SELECTOR.get_or_init(|| Selector::parse(r#"meta[property="og:image"]"#).unwrap());
    CANONICAL_SELECTOR.get_or_init(|| Selector::parse(r#"link[rel="canonical"]"#).unwrap());
    BODY_SELECTOR.get_or_init(|| Selector::parse("body").unwrap());
    IMG_SELECTOR.get_or_init(|| Selector::parse("img[src]").unwrap());
    LINK_SELECTOR.get_or_init(|| Selector::parse("a[href]").unwrap());
}

/// `<title>` text, trimmed. The sentinel covers both a missing element and an
/// empty one.
fn extract_title(document: &Html) -> String {
    document
        .select(TITLE_SELECTOR.get().unwrap())
        .next()
        .map(|e| {
            e.text()
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .collect::<Vec<_>>()
                .join(" ")
        })
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| NO_DATA.to_string())
}

/// First match's attribute value, trimmed; the sentinel when the element or
/// the attribute is absent.
fn attr_or_sentinel(document: &Html, selector: &Selector, attr: &str) -> String {
    document
        .select(selector)
        .next()
        .and_then(|e| e.value().attr(attr))
        .map(|v| v.trim().to_string())
        .unwrap_or_else(|| NO_DATA.to_string())
}

/// Concatenates every rendered text node of the body, skipping
/// `<script>`/`<style>` subtrees, parts joined by single spaces.
fn visible_text(document: &Html) -> String {
    let Some(body) = document.select(BODY_SELECTOR.get().unwrap()).next() else {
        return String::new();
    };
    let mut parts = Vec::new();
    collect_visible_text(body, &mut parts);
    parts.join(" ")
}

fn collect_visible_text(element: ElementRef, parts: &mut Vec<String>) {
    if matches!(element.value().name(), "script" | "style") {
        return;
    }
    for child in element.children() {
        if let Some(text) = child.value().as_text() {
            let trimmed = text.trim();
            if !trimmed.is_empty() {
                parts.push(trimmed.to_string());
            }
        } else if let Some(child_element) = ElementRef::wrap(child) {
            collect_visible_text(child_element, parts);
        }
    }
}

/// Tokenizes the corpus and ranks word frequencies: lowercase, split on
/// non-word characters, drop stopwords, single characters and all-digit
/// tokens, then take the top `TOP_WORD_LIMIT` by count. The sort is stable,
/// so ties keep first-seen order.
fn rank_words(corpus: &str, stopwords: &HashSet<String>) -> Vec<(String, u32)> {
    let lowered = corpus.to_lowercase();
    let mut counts: HashMap<&str, u32> = HashMap::new();
    let mut first_seen: Vec<&str> = Vec::new();

    for token in lowered.split(|c: char| !(c.is_alphanumeric() || c == '_')) {
        if token.chars().count() <= 1 {
            continue;
        }
        if token.chars().all(|c| c.is_numeric()) {
            continue;
        }
        if stopwords.contains(token) {
            continue;
        }
        match counts.entry(token) {
            std::collections::hash_map::Entry::Occupied(mut e) => *e.get_mut() += 1,
            std::collections::hash_map::Entry::Vacant(e) => {
                e.insert(1);
                first_seen.push(token);
            }
        }
    }

    let mut ranked: Vec<(String, u32)> = first_seen
        .into_iter()
        .map(|word| (word.to_string(), counts[word]))
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    ranked.truncate(TOP_WORD_LIMIT);
    ranked
}

/// Every `<img src>` value in document order, unfiltered.
fn extract_images(document: &Html) -> Vec<String> {
    document
        .select(IMG_SELECTOR.get().unwrap())
        .filter_map(|e| e.value().attr("src"))
        .map(str::to_string)
        .collect()
}

/// Partitions every `<a href>` into internal and external. A link is internal
/// when it is root-relative or when its own authority textually contains the
/// source page's authority; everything else (including unparseable hrefs like
/// fragments and tel: links) is external.
fn classify_links(document: &Html, source_url: &str) -> (Vec<String>, Vec<String>) {
    let source_authority = authority_of(source_url);
    let mut internal = Vec::new();
    let mut external = Vec::new();

    for element in document.select(LINK_SELECTOR.get().unwrap()) {
        let Some(href) = element.value().attr("href") else {
            continue;
        };
        let is_internal = href.starts_with('/')
            || match (&source_authority, authority_of(href)) {
                (Some(source), Some(target)) => target.contains(source.as_str()),
                _ => false,
            };
        if is_internal {
            internal.push(href.to_string());
        } else {
            external.push(href.to_string());
        }
    }
    (internal, external)
}

/// The host[:port] portion of a URL, or `None` when it cannot be parsed as an
/// absolute URL with a host.
fn authority_of(url_str: &str) -> Option<String> {
    let parsed = Url::parse(url_str).ok()?;
    let host = parsed.host_str()?;
    Some(match parsed.port() {
        Some(port) => format!("{}:{}", host, port),
        None => host.to_string(),
    })
}
