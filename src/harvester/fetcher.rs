// src/harvester/fetcher.rs

use reqwest::Client;
use std::time::Duration;

/// A page body on success, or the error the orchestrator reports when
/// skipping the URL.
pub type FetchOutcome = Result<String, Box<dyn std::error::Error + Send + Sync>>;

/// The Fetcher owns the HTTP client and turns a URL into a page body, or an
/// error the orchestrator can report. It never inspects the body on failure.
#[derive(Clone)]
pub struct Fetcher {
    client: Client,
}

impl Fetcher {
    pub fn new() -> Self {
        let client = Client::builder()
            .user_agent("Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36")
            .timeout(Duration::from_secs(10))
            .build()
            .expect("Failed to build HTTP client");

        Self { client }
    }

    /// Fetches a URL. Network errors, timeouts and non-2xx statuses all
    /// surface as errors.
    pub async fn fetch(&self, url: &str) -> FetchOutcome {
        let response = self.client.get(url).send().await?;

        if !response.status().is_success() {
            return Err(format!("request failed: {}", response.status()).into());
        }

        Ok(response.text().await?)
    }
}
