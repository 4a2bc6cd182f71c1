// src/utils/http.rs

//! HTTP client utilities and the fetch seams used by the crawler.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use scraper::Html;

use crate::error::{AppError, Result};
use crate::models::CrawlerConfig;

/// Source of parsed HTML pages.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetch a page and parse it as HTML.
    ///
    /// Returns `Ok(None)` when the server answers with an error status and
    /// `Err` when the request itself could not be made.
    async fn fetch_page(&self, url: &str) -> Result<Option<Html>>;
}

/// Source of raw document bytes (article files).
#[async_trait]
pub trait DocumentSource: Send + Sync {
    async fn download(&self, url: &str) -> Result<Vec<u8>>;
}

/// Create a configured asynchronous HTTP client.
pub fn create_client(config: &CrawlerConfig) -> Result<Client> {
    let client = Client::builder()
        .user_agent(&config.user_agent)
        .timeout(Duration::from_secs(config.timeout_secs))
        .build()?;
    Ok(client)
}

/// Separate unreachable servers from other request failures.
fn request_error(url: &str, error: reqwest::Error) -> AppError {
    if error.is_connect() || error.is_timeout() {
        AppError::connection(url, error)
    } else {
        AppError::Http(error)
    }
}

/// `reqwest`-backed fetcher for both pages and documents.
#[derive(Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(config: &CrawlerConfig) -> Result<Self> {
        Ok(Self {
            client: create_client(config)?,
        })
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch_page(&self, url: &str) -> Result<Option<Html>> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| request_error(url, e))?;
        let status = response.status();
        if !status.is_success() {
            log::warn!("Page {} answered with {}", url, status);
            return Ok(None);
        }
        let text = response.text().await?;
        Ok(Some(Html::parse_document(&text)))
    }
}

#[async_trait]
impl DocumentSource for HttpFetcher {
    async fn download(&self, url: &str) -> Result<Vec<u8>> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| request_error(url, e))?
            .error_for_status()?;
        let bytes = response.bytes().await?;
        log::debug!("Downloaded {} bytes from {}", bytes.len(), url);
        Ok(bytes.to_vec())
    }
}
